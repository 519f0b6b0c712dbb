use ndarray::{Array, Dimension};

use crate::array::ArrayData;
use crate::errors::Error;
use crate::labeled::DataArray;
use crate::types::array_type::DataType;
use crate::types::element::{Element, Scalar};

/// Raw value that can be converted into an [`ArrayData`]: a scalar, a (possibly nested) sequence, an existing typed
/// array, or an existing labeled array.
///
/// # Examples
///
/// ```rust
/// # use xrecord_core::array_like::ArrayLike;
/// # use xrecord_core::types::{DataType, Shape};
/// let value = ArrayLike::from(vec![vec![1, 2, 3], vec![4, 5, 6]]);
/// let array = value.to_array_data(Some(DataType::Float64)).unwrap();
/// assert_eq!(array.shape(), Shape::new(vec![2, 3]));
/// assert_eq!(array.data_type(), DataType::Float64);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayLike {
    Scalar(Scalar),
    Sequence(Vec<ArrayLike>),
    Array(ArrayData),
    DataArray(DataArray),
}

impl ArrayLike {
    /// Converts this value into an [`ArrayData`]. When `data_type` is provided, the elements are converted to it,
    /// and otherwise the natural [`DataType`] of the value is preserved. Nested sequences must be rectangular, and
    /// their natural [`DataType`] is the promoted [`DataType`] of their elements.
    ///
    /// Labeled arrays lose their labels and metadata in the process.
    pub fn to_array_data(&self, data_type: Option<DataType>) -> Result<ArrayData, Error> {
        let array = match self {
            Self::Scalar(scalar) => ArrayData::scalar(*scalar),
            Self::Sequence(items) => {
                let items = items.iter().map(|item| item.to_array_data(None)).collect::<Result<Vec<_>, _>>()?;
                ArrayData::stack(items, data_type)?
            }
            Self::Array(array) => array.clone(),
            Self::DataArray(data_array) => data_array.data().clone(),
        };
        Ok(match data_type {
            Some(data_type) => array.into_cast(data_type),
            None => array,
        })
    }

    /// Same as [`ArrayLike::to_array_data`] but consumes this value, avoiding copies of any owned array.
    pub fn into_array_data(self, data_type: Option<DataType>) -> Result<ArrayData, Error> {
        match self {
            Self::Array(array) => Ok(match data_type {
                Some(data_type) => array.into_cast(data_type),
                None => array,
            }),
            Self::DataArray(data_array) => Self::Array(data_array.into_data()).into_array_data(data_type),
            value => value.to_array_data(data_type),
        }
    }
}

impl Default for ArrayLike {
    fn default() -> Self {
        Self::Scalar(Scalar::Int64(0))
    }
}

macro_rules! impl_from_element_for_array_like {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ArrayLike {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.into_scalar())
                }
            }
        )*
    };
}

impl_from_element_for_array_like!(bool, i8, i16, i32, i64, u8, u16, u32, u64, half::bf16, half::f16, f32, f64);

impl From<Scalar> for ArrayLike {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<ArrayData> for ArrayLike {
    fn from(value: ArrayData) -> Self {
        Self::Array(value)
    }
}

impl From<DataArray> for ArrayLike {
    fn from(value: DataArray) -> Self {
        Self::DataArray(value)
    }
}

impl<T: Element, D: Dimension> From<Array<T, D>> for ArrayLike {
    fn from(value: Array<T, D>) -> Self {
        Self::Array(value.into())
    }
}

impl<T: Into<ArrayLike>> From<Vec<T>> for ArrayLike {
    fn from(value: Vec<T>) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ArrayLike>, const N: usize> From<[T; N]> for ArrayLike {
    fn from(value: [T; N]) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}
