use std::fmt::Display;

use indexmap::IndexMap;

use crate::errors::Error;

use super::attrs::Attrs;
use super::data_array::DataArray;
use super::{Dimensioned, Sizes};

/// Collection of named [`DataArray`]s (data variables) that share dimensions and coordinates.
///
/// All data variables and coordinates of a [`Dataset`] agree on the size of every dimension they have in common.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    data_vars: IndexMap<String, DataArray>,
    coords: IndexMap<String, DataArray>,
    attrs: Attrs,
}

impl Dataset {
    /// Constructs a new [`Dataset`], failing with [`Error::ConflictingSizes`] if two of the provided arrays
    /// disagree on the size of a dimension.
    pub fn new(
        data_vars: IndexMap<String, DataArray>,
        coords: IndexMap<String, DataArray>,
        attrs: Attrs,
    ) -> Result<Self, Error> {
        let mut sizes = Sizes::new();
        for array in data_vars.values().chain(coords.values()) {
            merge_sizes(&mut sizes, &array.sizes())?;
        }
        Ok(Self { data_vars, coords, attrs })
    }

    #[inline]
    pub fn data_vars(&self) -> &IndexMap<String, DataArray> {
        &self.data_vars
    }

    #[inline]
    pub fn data_var(&self, name: &str) -> Option<&DataArray> {
        self.data_vars.get(name)
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
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Returns the names of the dimensions of this [`Dataset`], in order of first appearance.
    pub fn dims(&self) -> Vec<String> {
        self.sizes().into_keys().collect()
    }

    /// Consumes this [`Dataset`], returning its data variables, coordinates, and attributes.
    pub fn into_parts(self) -> (IndexMap<String, DataArray>, IndexMap<String, DataArray>, Attrs) {
        (self.data_vars, self.coords, self.attrs)
    }
}

/// Merges `other` into `sizes`, failing if the two disagree on the size of a shared dimension.
pub(crate) fn merge_sizes(sizes: &mut Sizes, other: &Sizes) -> Result<(), Error> {
    for (dimension, &actual) in other {
        match sizes.get(dimension) {
            Some(&expected) if expected != actual => {
                return Err(Error::ConflictingSizes { dimension: dimension.clone(), expected, actual });
            }
            Some(_) => {}
            None => {
                sizes.insert(dimension.clone(), actual);
            }
        }
    }
    Ok(())
}

impl Dimensioned for Dataset {
    fn sizes(&self) -> Sizes {
        // Sizes are validated on construction.
        let mut sizes = Sizes::new();
        for array in self.data_vars.values().chain(self.coords.values()) {
            for (dimension, size) in array.sizes() {
                sizes.entry(dimension).or_insert(size);
            }
        }
        sizes
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sizes = self.sizes().iter().map(|(dimension, size)| format!("{dimension}: {size}")).collect::<Vec<_>>();
        write!(f, "<Dataset>\nDimensions: ({})", sizes.join(", "))?;
        if !self.coords.is_empty() {
            write!(f, "\nCoordinates:")?;
            for (name, coord) in &self.coords {
                write!(f, "\n    {name} ({}) {}", coord.dims().join(", "), coord.data_type())?;
            }
        }
        write!(f, "\nData variables:")?;
        for (name, data_var) in &self.data_vars {
            write!(f, "\n    {name} ({}) {}", data_var.dims().join(", "), data_var.data_type())?;
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
    use super::*;
    use crate::array::{ArrayData, Order};
    use crate::labeled::AttrValue;
    use crate::types::DataType;

    fn zeros(shape: &[usize], dims: &[&str]) -> DataArray {
        let data = ArrayData::zeros(shape, DataType::Float64, Order::RowMajor).unwrap();
        DataArray::new(data, dims.iter().copied()).unwrap()
    }

    #[test]
    fn test_dataset_new() {
        let dataset = Dataset::new(
            IndexMap::from([("red".to_string(), zeros(&[4, 3], &["x", "y"]))]),
            IndexMap::from([("x".to_string(), zeros(&[4], &["x"])), ("t".to_string(), zeros(&[2], &["t"]))]),
            Attrs::from([("dpi".to_string(), AttrValue::from(100))]),
        )
        .unwrap();

        assert_eq!(dataset.dims(), ["x", "y", "t"]);
        assert_eq!(dataset.sizes()["t"], 2);
        assert!(dataset.data_var("red").is_some());
        assert!(dataset.coord("x").is_some());
        assert_eq!(dataset.attrs()["dpi"], AttrValue::Integer(100));
    }

    #[test]
    fn test_dataset_new_conflicting_sizes() {
        let result = Dataset::new(
            IndexMap::from([
                ("red".to_string(), zeros(&[4, 3], &["x", "y"])),
                ("blue".to_string(), zeros(&[5], &["x"])),
            ]),
            IndexMap::new(),
            Attrs::new(),
        );
        assert_eq!(result, Err(Error::ConflictingSizes { dimension: "x".to_string(), expected: 4, actual: 5 }));
    }

    #[test]
    fn test_dataset_to_string() {
        let dataset = Dataset::new(
            IndexMap::from([("red".to_string(), zeros(&[2, 2], &["x", "y"]))]),
            IndexMap::new(),
            Attrs::new(),
        )
        .unwrap();
        assert_eq!(dataset.to_string(), "<Dataset>\nDimensions: (x: 2, y: 2)\nData variables:\n    red (x, y) f64");
    }
}
