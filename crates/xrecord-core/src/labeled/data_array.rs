use std::collections::HashSet;
use std::fmt::Display;

use indexmap::IndexMap;

use crate::array::ArrayData;
use crate::errors::Error;
use crate::types::array_type::{DataType, Shape};

use super::attrs::Attrs;
use super::{Dimensioned, Sizes};

/// Multi-dimensional array whose dimensions are labeled with names, together with optional coordinate arrays
/// (themselves [`DataArray`]s defined over a subset of its dimensions), an optional name, and metadata attributes.
///
/// # Examples
///
/// ```rust
/// # use xrecord_core::array::{ArrayData, Order};
/// # use xrecord_core::labeled::{DataArray, Dimensioned};
/// # use xrecord_core::types::DataType;
/// let data = ArrayData::zeros([2, 3], DataType::Float64, Order::RowMajor).unwrap();
/// let image = DataArray::new(data, ["x", "y"]).unwrap().with_name("image");
/// assert_eq!(image.dims(), ["x", "y"]);
/// assert_eq!(image.sizes()["y"], 3);
/// assert_eq!(image.name(), Some("image"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DataArray {
    data: ArrayData,
    dims: Vec<String>,
    coords: IndexMap<String, DataArray>,
    name: Option<String>,
    attrs: Attrs,
}

impl DataArray {
    /// Labels `data` with the provided dimension names. Fails if the number of names does not match the rank of
    /// `data` or if a name is repeated.
    pub fn new<D: Into<String>>(data: ArrayData, dims: impl IntoIterator<Item = D>) -> Result<Self, Error> {
        let dims = dims.into_iter().map(Into::into).collect::<Vec<String>>();
        if dims.len() != data.rank() {
            return Err(Error::DimensionCountMismatch { dims, shape: data.shape() });
        }
        let mut seen = HashSet::with_capacity(dims.len());
        if let Some(dimension) = dims.iter().find(|dimension| !seen.insert(dimension.as_str())) {
            return Err(Error::DuplicateDimension { dimension: dimension.clone(), dims: dims.clone() });
        }
        Ok(Self { data, dims, coords: IndexMap::new(), name: None, attrs: Attrs::new() })
    }

    /// Labels `data` with the default dimension names `dim_0`, `dim_1`, and so on.
    pub fn from_data(data: ArrayData) -> Self {
        let dims = (0..data.rank()).map(|index| format!("dim_{index}")).collect();
        Self { data, dims, coords: IndexMap::new(), name: None, attrs: Attrs::new() }
    }

    /// Returns this [`DataArray`] with its name set to `name`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets (or clears) the name of this [`DataArray`].
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Returns this [`DataArray`] with its attributes replaced by `attrs`.
    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Returns this [`DataArray`] with the provided coordinates attached (replacing existing coordinates with the
    /// same names). Every dimension of a coordinate must be a dimension of this array with the same size.
    pub fn with_coords(mut self, coords: IndexMap<String, DataArray>) -> Result<Self, Error> {
        for (name, coord) in coords {
            self.insert_coord(name, coord)?;
        }
        Ok(self)
    }

    /// Attaches a single coordinate to this [`DataArray`]. Refer to [`DataArray::with_coords`] for the constraints
    /// that the coordinate must satisfy.
    pub fn insert_coord(&mut self, name: impl Into<String>, coord: DataArray) -> Result<(), Error> {
        let name = name.into();
        let sizes = self.sizes();
        for (dimension, &actual) in coord.sizes().iter() {
            match sizes.get(dimension) {
                Some(&expected) if expected == actual => {}
                Some(&expected) => {
                    return Err(Error::ConflictingSizes { dimension: dimension.clone(), expected, actual });
                }
                None => {
                    return Err(Error::UnknownCoordinateDimension { coordinate: name, dimension: dimension.clone() });
                }
            }
        }
        self.coords.insert(name, coord);
        Ok(())
    }

    /// Returns the unlabeled array stored in this [`DataArray`].
    #[inline]
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Consumes this [`DataArray`], returning its unlabeled array.
    #[inline]
    pub fn into_data(self) -> ArrayData {
        self.data
    }

    #[inline]
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    #[inline]
    pub fn coords(&self) -> &IndexMap<String, DataArray> {
        &self.coords
    }

    #[inline]
    pub fn coord(&self, name: &str) -> Option<&DataArray> {
        self.coords.get(name)
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.data.shape()
    }

    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }
}

impl Dimensioned for DataArray {
    fn sizes(&self) -> Sizes {
        self.dims.iter().cloned().zip(self.data.shape().dimensions).collect()
    }
}

impl Display for DataArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sizes = self.sizes().iter().map(|(dimension, size)| format!("{dimension}: {size}")).collect::<Vec<_>>();
        match &self.name {
            Some(name) => writeln!(f, "<DataArray '{name}' ({})>", sizes.join(", "))?,
            None => writeln!(f, "<DataArray ({})>", sizes.join(", "))?,
        }
        write!(f, "{}", self.data)?;
        if !self.coords.is_empty() {
            write!(f, "\nCoordinates:")?;
            for (name, coord) in &self.coords {
                write!(f, "\n    {name} ({}) {}", coord.dims.join(", "), coord.data_type())?;
            }
        }
        if !self.attrs.is_empty() {
            write!(f, "\nAttributes:")?;
            for (name, value) in &self.attrs {
                write!(f, "\n    {name}: {value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, arr2};

    use super::*;
    use crate::array::Order;
    use crate::labeled::AttrValue;

    fn image() -> DataArray {
        DataArray::new(ArrayData::zeros([3, 2], DataType::Float64, Order::RowMajor).unwrap(), ["x", "y"]).unwrap()
    }

    #[test]
    fn test_data_array_new() {
        let array = image();
        assert_eq!(array.dims(), ["x", "y"]);
        assert_eq!(array.shape(), Shape::new(vec![3, 2]));
        assert_eq!(array.name(), None);
        assert!(array.coords().is_empty());
        assert!(array.attrs().is_empty());

        assert_eq!(
            DataArray::new(ArrayData::from(arr1(&[1, 2])), ["x", "y"]),
            Err(Error::DimensionCountMismatch {
                dims: vec!["x".to_string(), "y".to_string()],
                shape: Shape::new(vec![2])
            }),
        );
        assert!(matches!(
            DataArray::new(ArrayData::from(arr2(&[[1, 2]])), ["x", "x"]),
            Err(Error::DuplicateDimension { .. }),
        ));
    }

    #[test]
    fn test_data_array_from_data() {
        let array = DataArray::from_data(ArrayData::from(arr2(&[[1u8, 2], [3, 4]])));
        assert_eq!(array.dims(), ["dim_0", "dim_1"]);
    }

    #[test]
    fn test_data_array_sizes() {
        let sizes = image().sizes();
        assert_eq!(sizes.keys().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(sizes["x"], 3);
        assert_eq!(sizes["y"], 2);
    }

    #[test]
    fn test_data_array_with_coords() {
        let x = DataArray::new(ArrayData::from(arr1(&[0i64, 1, 2])), ["x"]).unwrap();
        let array = image().with_coords(IndexMap::from([("x".to_string(), x.clone())])).unwrap();
        assert_eq!(array.coord("x"), Some(&x));

        let wrong_size = DataArray::new(ArrayData::from(arr1(&[0i64, 1])), ["x"]).unwrap();
        assert_eq!(
            image().with_coords(IndexMap::from([("x".to_string(), wrong_size)])),
            Err(Error::ConflictingSizes { dimension: "x".to_string(), expected: 3, actual: 2 }),
        );

        let unknown = DataArray::new(ArrayData::from(arr1(&[0i64])), ["t"]).unwrap();
        assert_eq!(
            image().with_coords(IndexMap::from([("t".to_string(), unknown)])),
            Err(Error::UnknownCoordinateDimension { coordinate: "t".to_string(), dimension: "t".to_string() }),
        );
    }

    #[test]
    fn test_data_array_to_string() {
        let array = DataArray::new(ArrayData::from(arr1(&[1i64, 2])), ["x"])
            .unwrap()
            .with_name("counts")
            .with_attrs(Attrs::from([("units".to_string(), AttrValue::from("m"))]));
        let rendered = array.to_string();
        assert!(rendered.starts_with("<DataArray 'counts' (x: 2)>\n[1, 2]"));
        assert!(rendered.ends_with("Attributes:\n    units: \"m\""));
    }
}
