//! Factory functions that create (unlabeled-dimension) [`DataArray`]s from raw values or fill values.
//!
//! The arrays created by [`empty`], [`zeros`], [`ones`], and [`full`] are labeled with the default dimension names
//! (`dim_0`, `dim_1`, ...). Records that derive [`DataArray`](crate::records::DataArrayRecord) get typed versions of
//! these factories that use the dimension names and element type declared on their data field.

use crate::array::{ArrayData, Order};
use crate::array_like::ArrayLike;
use crate::errors::Error;
use crate::labeled::{Attrs, DataArray};
use crate::types::array_type::{DataType, Shape};
use crate::types::element::Scalar;

/// Memory layout used by the factory functions unless another one is requested.
pub const ORDER: Order = Order::RowMajor;

/// Optional arguments of the factory functions in this module.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    /// Element type of the new array. [`empty`], [`zeros`], and [`ones`] default to [`DataType::Float64`], while
    /// [`full`] defaults to the type of its fill value.
    pub data_type: Option<DataType>,
    pub order: Order,
    pub name: Option<String>,
    pub attrs: Attrs,
}

impl Options {
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }
}

/// Creates a [`DataArray`] from any [`ArrayLike`] value, keeping its natural element type.
///
/// # Examples
///
/// ```rust
/// # use xrecord_core::methods;
/// # use xrecord_core::labeled::Attrs;
/// let array = methods::new(vec![1.0, 2.0, 3.0], Some("values".to_string()), Attrs::new()).unwrap();
/// assert_eq!(array.dims(), ["dim_0"]);
/// assert_eq!(array.name(), Some("values"));
/// ```
pub fn new(data: impl Into<ArrayLike>, name: Option<String>, attrs: Attrs) -> Result<DataArray, Error> {
    let mut array = match data.into() {
        ArrayLike::DataArray(array) => array,
        data => DataArray::from_data(data.into_array_data(None)?),
    };
    array.set_name(name);
    Ok(array.with_attrs(attrs))
}

/// Creates a [`DataArray`] of the provided [`Shape`] whose element values are unspecified.
///
/// # Errors
///
/// [`Error::ShapeTooLarge`] if the number of elements of `shape` overflows `isize`. The other factory functions in
/// this module fail the same way.
pub fn empty(shape: impl Into<Shape>, options: Options) -> Result<DataArray, Error> {
    let data = ArrayData::empty(shape, options.data_type.unwrap_or(DataType::Float64), options.order)?;
    Ok(finish(data, options.name, options.attrs))
}

/// Creates a [`DataArray`] of the provided [`Shape`] filled with zeros.
pub fn zeros(shape: impl Into<Shape>, options: Options) -> Result<DataArray, Error> {
    let data = ArrayData::zeros(shape, options.data_type.unwrap_or(DataType::Float64), options.order)?;
    Ok(finish(data, options.name, options.attrs))
}

/// Creates a [`DataArray`] of the provided [`Shape`] filled with ones.
pub fn ones(shape: impl Into<Shape>, options: Options) -> Result<DataArray, Error> {
    let data = ArrayData::ones(shape, options.data_type.unwrap_or(DataType::Float64), options.order)?;
    Ok(finish(data, options.name, options.attrs))
}

/// Creates a [`DataArray`] of the provided [`Shape`] filled with `fill_value`.
///
/// # Examples
///
/// ```rust
/// # use xrecord_core::methods::{self, Options};
/// # use xrecord_core::types::{DataType, Scalar};
/// let array = methods::full([2, 2], 7i64, Options::default()).unwrap();
/// assert_eq!(array.data_type(), DataType::Int64);
///
/// let array = methods::full([2, 2], 7i64, Options::default().with_data_type(DataType::Float32)).unwrap();
/// assert_eq!(array.data().get(&[1, 1]), Some(Scalar::Float32(7.0)));
/// ```
pub fn full(shape: impl Into<Shape>, fill_value: impl Into<Scalar>, options: Options) -> Result<DataArray, Error> {
    let fill_value = fill_value.into();
    let data_type = options.data_type.unwrap_or(fill_value.data_type());
    let data = ArrayData::full(shape, fill_value, data_type, options.order)?;
    Ok(finish(data, options.name, options.attrs))
}

fn finish(data: ArrayData, name: Option<String>, attrs: Attrs) -> DataArray {
    let mut array = DataArray::from_data(data);
    array.set_name(name);
    array.with_attrs(attrs)
}

#[cfg(test)]
mod tests {
    use ndarray::arr2;

    use super::*;
    use crate::labeled::{AttrValue, Dimensioned};

    #[test]
    fn test_new() {
        let array = new(arr2(&[[1u16, 2], [3, 4]]), None, Attrs::new()).unwrap();
        assert_eq!(array.dims(), ["dim_0", "dim_1"]);
        assert_eq!(array.data_type(), DataType::UnsignedInt16);
        assert_eq!(array.name(), None);

        let labeled = DataArray::new(ArrayData::from(arr2(&[[1.0, 2.0]])), ["x", "y"]).unwrap();
        let array = new(labeled, Some("renamed".to_string()), Attrs::new()).unwrap();
        assert_eq!(array.dims(), ["x", "y"]);
        assert_eq!(array.name(), Some("renamed"));
    }

    #[test]
    fn test_empty_zeros_ones() {
        let empty = empty([3, 4], Options::default()).unwrap();
        let zeros = zeros([3, 4], Options::default().with_data_type(DataType::Int32)).unwrap();
        let ones = ones([3, 4], Options::default().with_order(Order::ColumnMajor).with_name("ones")).unwrap();

        assert_eq!(empty.shape(), Shape::new(vec![3, 4]));
        assert_eq!(empty.data_type(), DataType::Float64);
        assert_eq!(zeros.data_type(), DataType::Int32);
        assert!(zeros.data().as_array::<i32>().unwrap().iter().all(|value| *value == 0));
        assert!(ones.data().is_column_major());
        assert!(ones.data().as_array::<f64>().unwrap().iter().all(|value| *value == 1.0));
        assert_eq!(ones.name(), Some("ones"));
        assert_eq!(ones.sizes()["dim_1"], 4);
    }

    #[test]
    fn test_full() {
        let attrs = Attrs::from([("units".to_string(), AttrValue::from("K"))]);
        let array = full([2], true, Options::default().with_attrs(attrs.clone())).unwrap();
        assert_eq!(array.data_type(), DataType::Boolean);
        assert_eq!(array.attrs(), &attrs);
        assert_eq!(ORDER, Order::RowMajor);
    }

    #[test]
    fn test_factories_with_oversized_shape() {
        let shape = Shape::new(vec![usize::MAX, 2]);
        let error = Err(Error::ShapeTooLarge { shape: shape.clone() });
        assert_eq!(empty(shape.clone(), Options::default()), error);
        assert_eq!(zeros(shape.clone(), Options::default()), error);
        assert_eq!(ones(shape.clone(), Options::default()), error);
        assert_eq!(full(shape, 1.5f64, Options::default().with_name("oversized")), error);
    }
}
