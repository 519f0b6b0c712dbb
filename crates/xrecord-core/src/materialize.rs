//! Conversion of raw field values into [`DataArray`]s that follow the dimensions and element type declared for
//! their field.
//!
//! A value whose rank already matches the number of declared dimensions is used as is (converted to the declared
//! element type). Any other value is treated as a fill value and broadcast to the shape that the declared
//! dimensions have in a [`Sizes`] mapping, if one is available. The choice between the two is made up front by
//! [`Materialization::plan`].

use tracing::{debug, trace};

use crate::array::ArrayData;
use crate::array_like::ArrayLike;
use crate::errors::Error;
use crate::labeled::{DataArray, Sizes};
use crate::records::ArraySpec;
use crate::types::array_type::Shape;

/// Strategy used to turn a field value into an array with the declared dimensions.
#[derive(Clone, Debug, PartialEq)]
pub enum Materialization {
    /// The value already has the declared rank and is used as is.
    Literal(ArrayData),

    /// The value is a fill value that must be broadcast to `shape`.
    Broadcast { fill: ArrayData, shape: Shape },
}

impl Materialization {
    /// Picks the [`Materialization`] for `array` given the declared dimensions and (optionally) the sizes of the
    /// dimensions of the arrays it will be bound to.
    ///
    /// # Errors
    ///
    ///   - [`Error::DimensionCountMismatch`] if the rank of `array` does not match `dims` and no `sizes` are
    ///     available to broadcast against.
    ///   - [`Error::MissingDimensionSize`] if broadcasting is needed but one of `dims` is missing from `sizes`.
    pub fn plan(array: ArrayData, dims: &[String], sizes: Option<&Sizes>) -> Result<Self, Error> {
        if array.rank() == dims.len() {
            return Ok(Self::Literal(array));
        }
        let Some(sizes) = sizes else {
            return Err(Error::DimensionCountMismatch { dims: dims.to_vec(), shape: array.shape() });
        };
        let dimensions = dims
            .iter()
            .map(|dimension| match sizes.get(dimension) {
                Some(&size) => Ok(size),
                None => Err(Error::MissingDimensionSize { dimension: dimension.clone() }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::Broadcast { fill: array, shape: Shape::new(dimensions) })
    }

    /// Produces the array described by this [`Materialization`].
    pub fn into_array_data(self) -> Result<ArrayData, Error> {
        match self {
            Self::Literal(array) => Ok(array),
            Self::Broadcast { fill, shape } => fill.broadcast_to(&shape),
        }
    }
}

/// Converts `value` into a [`DataArray`] with the dimensions and element type declared in `spec`, broadcasting it
/// against `sizes` when its rank does not match the declared dimensions.
///
/// # Examples
///
/// ```rust
/// # use xrecord_core::array_like::ArrayLike;
/// # use xrecord_core::labeled::Sizes;
/// # use xrecord_core::materialize::materialize;
/// # use xrecord_core::records::ArraySpec;
/// # use xrecord_core::types::{DataType, Shape};
/// let spec = ArraySpec::new(["x", "y"], Some(DataType::Float64));
/// let sizes = Sizes::from([("x".to_string(), 10), ("y".to_string(), 10)]);
/// let array = materialize(ArrayLike::from(0), &spec, Some(&sizes)).unwrap();
/// assert_eq!(array.shape(), Shape::new(vec![10, 10]));
/// assert_eq!(array.dims(), ["x", "y"]);
///
/// assert!(materialize(ArrayLike::from(0), &spec, None).is_err());
/// ```
pub fn materialize(value: ArrayLike, spec: &ArraySpec, sizes: Option<&Sizes>) -> Result<DataArray, Error> {
    let array = value.into_array_data(spec.data_type)?;
    trace!(dims = ?spec.dims, shape = %array.shape(), data_type = %array.data_type(), "materializing field value");
    let materialization = Materialization::plan(array, &spec.dims, sizes)?;
    match &materialization {
        Materialization::Literal(array) => {
            debug!(dims = ?spec.dims, shape = %array.shape(), "field value used as is");
        }
        Materialization::Broadcast { fill, shape } => {
            debug!(dims = ?spec.dims, fill_shape = %fill.shape(), %shape, "field value broadcast as fill value");
        }
    }
    DataArray::new(materialization.into_array_data()?, spec.dims.iter().cloned())
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, arr2};

    use super::*;
    use crate::array::Order;
    use crate::types::array_type::ShapeBroadcastingError;
    use crate::types::{DataType, Scalar};

    fn sizes(entries: &[(&str, usize)]) -> Sizes {
        entries.iter().map(|(dimension, size)| (dimension.to_string(), *size)).collect()
    }

    #[test]
    fn test_plan() {
        let dims = vec!["x".to_string(), "y".to_string()];
        let scalar = ArrayData::scalar(Scalar::Float64(1.0));
        let matrix = ArrayData::zeros([2, 3], DataType::Float64, Order::RowMajor).unwrap();

        assert_eq!(Materialization::plan(matrix.clone(), &dims, None), Ok(Materialization::Literal(matrix)));
        assert_eq!(
            Materialization::plan(scalar.clone(), &dims, Some(&sizes(&[("x", 2), ("y", 3), ("z", 4)]))),
            Ok(Materialization::Broadcast { fill: scalar.clone(), shape: Shape::new(vec![2, 3]) }),
        );
        assert_eq!(
            Materialization::plan(scalar.clone(), &dims, Some(&sizes(&[("x", 2)]))),
            Err(Error::MissingDimensionSize { dimension: "y".to_string() }),
        );
        assert_eq!(
            Materialization::plan(scalar, &dims, None),
            Err(Error::DimensionCountMismatch { dims, shape: Shape::scalar() }),
        );
    }

    #[test]
    fn test_materialize_broadcast() {
        let spec = ArraySpec::new(["x", "y"], Some(DataType::Float64));
        let array = materialize(ArrayLike::from(0), &spec, Some(&sizes(&[("x", 10), ("y", 10)]))).unwrap();
        assert_eq!(array.dims(), ["x", "y"]);
        assert_eq!(array.shape(), Shape::new(vec![10, 10]));
        assert_eq!(array.data_type(), DataType::Float64);
        assert!(array.data().as_array::<f64>().unwrap().iter().all(|value| *value == 0.0));
    }

    #[test]
    fn test_materialize_broadcast_row() {
        let spec = ArraySpec::new(["x", "y"], None);
        let array = materialize(ArrayLike::from([1i32, 2, 3]), &spec, Some(&sizes(&[("x", 2), ("y", 3)]))).unwrap();
        assert_eq!(array.into_data(), ArrayData::from(arr2(&[[1i32, 2, 3], [1, 2, 3]])));

        let result = materialize(ArrayLike::from([1i32, 2]), &spec, Some(&sizes(&[("x", 2), ("y", 3)])));
        assert_eq!(
            result,
            Err(Error::ShapeBroadcasting(ShapeBroadcastingError::Incompatible {
                lhs: Shape::new(vec![2]),
                rhs: Shape::new(vec![2, 3]),
            })),
        );
    }

    #[test]
    fn test_materialize_literal_takes_precedence() {
        let spec = ArraySpec::new(["x", "y"], Some(DataType::Float64));
        let value = ArrayData::full([10, 10], Scalar::Int64(3), DataType::Int64, Order::RowMajor).unwrap();
        let array = materialize(value.into(), &spec, Some(&sizes(&[("x", 10), ("y", 10)]))).unwrap();
        let expected = ArrayData::full([10, 10], Scalar::Float64(3.0), DataType::Float64, Order::RowMajor).unwrap();
        assert_eq!(array.data(), &expected);
    }

    #[test]
    fn test_materialize_without_sizes() {
        let spec = ArraySpec::new(["x"], None);
        assert_eq!(
            materialize(ArrayLike::from(1.5), &spec, None),
            Err(Error::DimensionCountMismatch { dims: vec!["x".to_string()], shape: Shape::scalar() }),
        );

        let array = materialize(ArrayLike::from(vec![1u8, 2]), &spec, None).unwrap();
        assert_eq!(array.into_data(), ArrayData::from(arr1(&[1u8, 2])));
    }

    #[test]
    fn test_materialize_scalar() {
        let array = materialize(ArrayLike::from(true), &ArraySpec::default(), None).unwrap();
        assert_eq!(array.shape(), Shape::scalar());
        assert!(array.dims().is_empty());
        assert_eq!(array.data().get(&[]), Some(Scalar::Boolean(true)));
    }

    #[test]
    fn test_materialize_relabels_data_array() {
        let nested = DataArray::new(ArrayData::from(arr1(&[1.0f32, 2.0])), ["a"]).unwrap().with_name("nested");
        let array = materialize(nested.into(), &ArraySpec::new(["x"], None), None).unwrap();
        assert_eq!(array.dims(), ["x"]);
        assert_eq!(array.name(), None);
        assert_eq!(array.data_type(), DataType::Float32);
    }
}
