//! Dynamically typed multi-dimensional array storage backed by [`ndarray`].

use std::fmt::Display;

use ndarray::{Array, ArrayD, Axis, Dimension, IxDyn, ShapeBuilder};

use crate::errors::Error;
use crate::types::array_type::{DataType, Shape, ShapeBroadcastingError};
use crate::types::element::{Element, Scalar};

/// Evaluates `$body` with `$ty` bound to the Rust element type that corresponds to the provided [`DataType`].
macro_rules! with_element {
    ($data_type:expr, $ty:ident => $body:expr) => {
        match $data_type {
            $crate::types::DataType::Boolean => {
                type $ty = bool;
                $body
            }
            $crate::types::DataType::Int8 => {
                type $ty = i8;
                $body
            }
            $crate::types::DataType::Int16 => {
                type $ty = i16;
                $body
            }
            $crate::types::DataType::Int32 => {
                type $ty = i32;
                $body
            }
            $crate::types::DataType::Int64 => {
                type $ty = i64;
                $body
            }
            $crate::types::DataType::UnsignedInt8 => {
                type $ty = u8;
                $body
            }
            $crate::types::DataType::UnsignedInt16 => {
                type $ty = u16;
                $body
            }
            $crate::types::DataType::UnsignedInt32 => {
                type $ty = u32;
                $body
            }
            $crate::types::DataType::UnsignedInt64 => {
                type $ty = u64;
                $body
            }
            $crate::types::DataType::BFloat16 => {
                type $ty = ::half::bf16;
                $body
            }
            $crate::types::DataType::Float16 => {
                type $ty = ::half::f16;
                $body
            }
            $crate::types::DataType::Float32 => {
                type $ty = f32;
                $body
            }
            $crate::types::DataType::Float64 => {
                type $ty = f64;
                $body
            }
        }
    };
}

/// Evaluates `$body` with `$array` bound to the typed [`ndarray`] array stored in the provided [`ArrayData`].
macro_rules! with_array {
    ($data:expr, $array:ident => $body:expr) => {
        match $data {
            $crate::array::ArrayData::Boolean($array) => $body,
            $crate::array::ArrayData::Int8($array) => $body,
            $crate::array::ArrayData::Int16($array) => $body,
            $crate::array::ArrayData::Int32($array) => $body,
            $crate::array::ArrayData::Int64($array) => $body,
            $crate::array::ArrayData::UnsignedInt8($array) => $body,
            $crate::array::ArrayData::UnsignedInt16($array) => $body,
            $crate::array::ArrayData::UnsignedInt32($array) => $body,
            $crate::array::ArrayData::UnsignedInt64($array) => $body,
            $crate::array::ArrayData::BFloat16($array) => $body,
            $crate::array::ArrayData::Float16($array) => $body,
            $crate::array::ArrayData::Float32($array) => $body,
            $crate::array::ArrayData::Float64($array) => $body,
        }
    };
}

pub(crate) use with_array;

/// Memory layout of newly created arrays.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Row-major (C-style) layout, where the last index varies fastest.
    #[default]
    RowMajor,

    /// Column-major (Fortran-style) layout, where the first index varies fastest.
    ColumnMajor,
}

impl Order {
    /// Returns the [`ndarray`] shape for `shape` in this [`Order`]. Fails if the number of elements of `shape`
    /// (ignoring zero-sized dimensions) does not fit in an `isize`.
    fn shape(self, shape: &Shape) -> Result<ndarray::Shape<IxDyn>, Error> {
        let element_count = shape
            .dimensions
            .iter()
            .filter(|&&size| size != 0)
            .try_fold(1usize, |count, &size| count.checked_mul(size))
            .filter(|&count| count <= isize::MAX as usize);
        match element_count {
            Some(_) => Ok(IxDyn(&shape.dimensions).set_f(self == Order::ColumnMajor)),
            None => Err(Error::ShapeTooLarge { shape: shape.clone() }),
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::RowMajor => write!(f, "C"),
            Order::ColumnMajor => write!(f, "F"),
        }
    }
}

/// Unlabeled multi-dimensional array whose element type is only known at runtime. There is one variant per
/// supported [`DataType`], each one owning an [`ArrayD`] of the corresponding [`Element`] type.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
    Boolean(ArrayD<bool>),
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    UnsignedInt8(ArrayD<u8>),
    UnsignedInt16(ArrayD<u16>),
    UnsignedInt32(ArrayD<u32>),
    UnsignedInt64(ArrayD<u64>),
    BFloat16(ArrayD<half::bf16>),
    Float16(ArrayD<half::f16>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
}

impl ArrayData {
    /// Returns the [`DataType`] of the elements of this array.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Boolean(_) => DataType::Boolean,
            Self::Int8(_) => DataType::Int8,
            Self::Int16(_) => DataType::Int16,
            Self::Int32(_) => DataType::Int32,
            Self::Int64(_) => DataType::Int64,
            Self::UnsignedInt8(_) => DataType::UnsignedInt8,
            Self::UnsignedInt16(_) => DataType::UnsignedInt16,
            Self::UnsignedInt32(_) => DataType::UnsignedInt32,
            Self::UnsignedInt64(_) => DataType::UnsignedInt64,
            Self::BFloat16(_) => DataType::BFloat16,
            Self::Float16(_) => DataType::Float16,
            Self::Float32(_) => DataType::Float32,
            Self::Float64(_) => DataType::Float64,
        }
    }

    /// Returns the [`Shape`] of this array.
    pub fn shape(&self) -> Shape {
        with_array!(self, array => Shape::new(array.shape().to_vec()))
    }

    /// Returns the rank (i.e., the number of dimensions) of this array.
    pub fn rank(&self) -> usize {
        with_array!(self, array => array.ndim())
    }

    /// Returns the number of elements in this array.
    pub fn len(&self) -> usize {
        with_array!(self, array => array.len())
    }

    /// Returns `true` if this array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the elements of this array are laid out in column-major order and the array has more than
    /// one dimension (one-dimensional arrays are both row-major and column-major).
    pub fn is_column_major(&self) -> bool {
        with_array!(self, array => array.ndim() > 1 && array.t().is_standard_layout())
    }

    /// Constructs a zero-rank array holding the provided [`Scalar`].
    pub fn scalar(value: Scalar) -> Self {
        with_element!(value.data_type(), T => T::into_array_data(ArrayD::from_elem(IxDyn(&[]), T::from_scalar(value))))
    }

    /// Constructs an array of the provided [`Shape`] and [`DataType`] with every element set to `value`
    /// (converted to `data_type`).
    ///
    /// # Errors
    ///
    /// [`Error::ShapeTooLarge`] if the number of elements of `shape` overflows `isize`. The same holds for
    /// [`ArrayData::zeros`], [`ArrayData::ones`], and [`ArrayData::empty`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use xrecord_core::array::{ArrayData, Order};
    /// # use xrecord_core::types::{DataType, Scalar, Shape};
    /// let array = ArrayData::full([2, 3], Scalar::Int64(7), DataType::Float32, Order::RowMajor).unwrap();
    /// assert_eq!(array.shape(), Shape::new(vec![2, 3]));
    /// assert_eq!(array.data_type(), DataType::Float32);
    /// assert!(array.as_array::<f32>().unwrap().iter().all(|value| *value == 7.0));
    /// ```
    pub fn full(shape: impl Into<Shape>, value: Scalar, data_type: DataType, order: Order) -> Result<Self, Error> {
        let shape = order.shape(&shape.into())?;
        Ok(with_element!(data_type, T => T::into_array_data(ArrayD::from_elem(shape, T::from_scalar(value)))))
    }

    /// Constructs an array of the provided [`Shape`] and [`DataType`] filled with zeros (or `false`).
    pub fn zeros(shape: impl Into<Shape>, data_type: DataType, order: Order) -> Result<Self, Error> {
        let shape = order.shape(&shape.into())?;
        Ok(with_element!(data_type, T => T::into_array_data(ArrayD::from_elem(shape, T::default()))))
    }

    /// Constructs an array of the provided [`Shape`] and [`DataType`] filled with ones (or `true`).
    pub fn ones(shape: impl Into<Shape>, data_type: DataType, order: Order) -> Result<Self, Error> {
        let shape = order.shape(&shape.into())?;
        Ok(with_element!(data_type, T => T::into_array_data(ArrayD::from_elem(shape, T::one()))))
    }

    /// Constructs an array of the provided [`Shape`] and [`DataType`] whose contents are unspecified. Callers must
    /// not rely on the element values. The current implementation zero-initializes the storage.
    pub fn empty(shape: impl Into<Shape>, data_type: DataType, order: Order) -> Result<Self, Error> {
        Self::zeros(shape, data_type, order)
    }

    /// Stacks arrays of identical [`Shape`]s along a new leading axis. The elements of the result have the promoted
    /// [`DataType`] of the inputs, or `data_type` if one is provided. Inputs whose [`DataType`]s cannot be promoted
    /// to a common type are stacked as [`DataType::Float64`].
    pub fn stack(arrays: Vec<ArrayData>, data_type: Option<DataType>) -> Result<Self, Error> {
        let Some(first) = arrays.first() else {
            let data_type = data_type.unwrap_or(DataType::Float64);
            return Self::zeros([0], data_type, Order::RowMajor);
        };
        let expected = first.shape();
        if let Some(ragged) = arrays.iter().find(|array| array.shape() != expected) {
            return Err(Error::RaggedSequence { expected, actual: ragged.shape() });
        }
        let data_type = match data_type {
            Some(data_type) => data_type,
            None => {
                let data_types = arrays.iter().map(ArrayData::data_type).collect::<Vec<_>>();
                DataType::promoted(&data_types.iter().collect::<Vec<_>>()).unwrap_or(DataType::Float64)
            }
        };
        with_element!(data_type, T => {
            let arrays = arrays.into_iter().map(T::from_array_data).collect::<Vec<_>>();
            let views = arrays.iter().map(|array| array.view()).collect::<Vec<_>>();
            Ok(T::into_array_data(ndarray::stack(Axis(0), &views)?))
        })
    }

    /// Returns a copy of this array with its elements converted to the provided [`DataType`].
    pub fn cast(&self, data_type: DataType) -> Self {
        if self.data_type() == data_type { self.clone() } else { self.clone().into_cast(data_type) }
    }

    /// Converts the elements of this array to the provided [`DataType`], consuming the array.
    pub fn into_cast(self, data_type: DataType) -> Self {
        if self.data_type() == data_type {
            return self;
        }
        with_element!(data_type, T => T::into_array_data(T::from_array_data(self)))
    }

    /// Broadcasts this array to the provided [`Shape`] using NumPy-like broadcasting semantics, returning a new
    /// array that owns its (repeated) elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use xrecord_core::array::ArrayData;
    /// # use xrecord_core::types::{Scalar, Shape};
    /// let fill = ArrayData::scalar(Scalar::Float64(0.5));
    /// let array = fill.broadcast_to(&Shape::new(vec![10, 10])).unwrap();
    /// assert_eq!(array.shape(), Shape::new(vec![10, 10]));
    /// assert!(ArrayData::scalar(Scalar::Int32(1)).broadcast_to(&Shape::new(vec![3])).is_ok());
    /// ```
    pub fn broadcast_to(&self, shape: &Shape) -> Result<Self, Error> {
        let broadcast_shape = self.shape().broadcast_to(shape)?;
        with_array!(self, array => {
            let view = array.broadcast(IxDyn(&broadcast_shape.dimensions)).ok_or_else(|| {
                ShapeBroadcastingError::Incompatible { lhs: self.shape(), rhs: broadcast_shape.clone() }
            })?;
            Ok(ArrayData::from(view.to_owned()))
        })
    }

    /// Returns the underlying array if the elements of this array have type `T`.
    pub fn as_array<T: Element>(&self) -> Option<&ArrayD<T>> {
        T::array(self)
    }

    /// Converts this array into an array of `T`, casting elements if needed.
    pub fn into_array<T: Element>(self) -> ArrayD<T> {
        T::from_array_data(self)
    }

    /// Returns the element at the provided index, or `None` if the index is out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<Scalar> {
        with_array!(self, array => array.get(IxDyn(index)).map(|value| value.into_scalar()))
    }
}

impl Display for ArrayData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        with_array!(self, array => write!(f, "{array}"))
    }
}

impl<T: Element, D: Dimension> From<Array<T, D>> for ArrayData {
    fn from(value: Array<T, D>) -> Self {
        T::into_array_data(value.into_dyn())
    }
}

impl From<Scalar> for ArrayData {
    fn from(value: Scalar) -> Self {
        Self::scalar(value)
    }
}
