//! Records are structs whose fields carry roles ([`Role`]) that describe how they contribute to a [`DataArray`] or a
//! [`Dataset`]. They are typically implemented using `#[derive(DataArray)]` or `#[derive(Dataset)]`, but they can
//! also be implemented by hand:
//!
//! ```rust
//! # use xrecord_core::array_like::ArrayLike;
//! # use xrecord_core::labeled::DataArray;
//! # use xrecord_core::records::{ArraySpec, DataArrayRecord, Field, FieldSchema, Record, Role};
//! # use xrecord_core::types::DataType;
//! struct Temperature {
//!     data: ArrayLike,
//!     units: String,
//! }
//!
//! impl Record for Temperature {
//!     fn schema() -> Vec<FieldSchema> {
//!         vec![
//!             FieldSchema::new("data", Role::Data(ArraySpec::new(["t"], Some(DataType::Float32)))),
//!             FieldSchema::new("units", Role::Attr),
//!         ]
//!     }
//!
//!     fn into_fields(self) -> Vec<Field> {
//!         vec![
//!             Field::data("data", ArraySpec::new(["t"], Some(DataType::Float32)), self.data),
//!             Field::attr("units", self.units),
//!         ]
//!     }
//! }
//!
//! impl DataArrayRecord for Temperature {
//!     type Output = DataArray;
//! }
//!
//! let temperature = Temperature { data: vec![20.5, 21.0].into(), units: "C".to_string() };
//! let array = temperature.to_dataarray().unwrap();
//! assert_eq!(array.dims(), ["t"]);
//! assert_eq!(array.data_type(), DataType::Float32);
//! ```

use indexmap::IndexMap;

use crate::array_like::ArrayLike;
use crate::assemble;
use crate::errors::Error;
use crate::labeled::{AttrValue, Attrs, DataArray, Dataset};
use crate::types::array_type::DataType;

/// Dimension names and element type declared for an array-valued ([`Role::Data`] or [`Role::Coord`]) field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ArraySpec {
    /// Names of the dimensions of the array, in order. Empty for zero-rank arrays.
    pub dims: Vec<String>,

    /// Element type of the array, or `None` to keep the natural element type of the field value.
    pub data_type: Option<DataType>,
}

impl ArraySpec {
    pub fn new<D: Into<String>>(dims: impl IntoIterator<Item = D>, data_type: Option<DataType>) -> Self {
        Self { dims: dims.into_iter().map(Into::into).collect(), data_type }
    }
}

/// Role of a record field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Payload array. Single-array records have exactly one, and multi-array records have one per member array.
    Data(ArraySpec),

    /// Coordinate array that is broadcast against the sizes of the payload array(s).
    Coord(ArraySpec),

    /// Metadata value that is passed through verbatim.
    Attr,

    /// Name of the resulting array or collection.
    Name,
}

impl Role {
    #[inline]
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    #[inline]
    pub fn is_coord(&self) -> bool {
        matches!(self, Self::Coord(_))
    }

    #[inline]
    pub fn is_attr(&self) -> bool {
        matches!(self, Self::Attr)
    }

    #[inline]
    pub fn is_name(&self) -> bool {
        matches!(self, Self::Name)
    }

    /// Returns the [`ArraySpec`] of array-valued roles.
    #[inline]
    pub fn array_spec(&self) -> Option<&ArraySpec> {
        match self {
            Self::Data(spec) | Self::Coord(spec) => Some(spec),
            Self::Attr | Self::Name => None,
        }
    }
}

/// Static description of a record field: its name and its [`Role`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldSchema {
    pub name: String,
    pub role: Role,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self { name: name.into(), role }
    }
}

/// Value of a record field, tagged with the field's [`Role`].
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Data { spec: ArraySpec, value: ArrayLike },
    Coord { spec: ArraySpec, value: ArrayLike },
    Attr(AttrValue),
    Name(Option<String>),
}

/// Named field value extracted from a record instance. Fields only live for the duration of a single assembly.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

impl Field {
    pub fn data(name: impl Into<String>, spec: ArraySpec, value: impl Into<ArrayLike>) -> Self {
        Self { name: name.into(), value: FieldValue::Data { spec, value: value.into() } }
    }

    pub fn coord(name: impl Into<String>, spec: ArraySpec, value: impl Into<ArrayLike>) -> Self {
        Self { name: name.into(), value: FieldValue::Coord { spec, value: value.into() } }
    }

    pub fn attr(name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self { name: name.into(), value: FieldValue::Attr(value.into()) }
    }

    /// Creates a [`Role::Name`] field. `value` is the name that will be given to the assembled array.
    pub fn name<N: Into<String>>(name: impl Into<String>, value: Option<N>) -> Self {
        Self { name: name.into(), value: FieldValue::Name(value.map(Into::into)) }
    }

    /// Returns the [`FieldSchema`] that describes this field.
    pub fn schema(&self) -> FieldSchema {
        let role = match &self.value {
            FieldValue::Data { spec, .. } => Role::Data(spec.clone()),
            FieldValue::Coord { spec, .. } => Role::Coord(spec.clone()),
            FieldValue::Attr(_) => Role::Attr,
            FieldValue::Name(_) => Role::Name,
        };
        FieldSchema::new(self.name.clone(), role)
    }

    #[inline]
    pub fn is_data(&self) -> bool {
        matches!(self.value, FieldValue::Data { .. })
    }

    #[inline]
    pub fn is_coord(&self) -> bool {
        matches!(self.value, FieldValue::Coord { .. })
    }

    #[inline]
    pub fn is_attr(&self) -> bool {
        matches!(self.value, FieldValue::Attr(_))
    }

    #[inline]
    pub fn is_name(&self) -> bool {
        matches!(self.value, FieldValue::Name(_))
    }
}

/// Struct whose fields have [`Role`]s. Fields without a role are not part of the record's schema.
pub trait Record {
    /// Returns the schema of this record, i.e., the name and [`Role`] of each field with a role, in declaration
    /// order.
    fn schema() -> Vec<FieldSchema>;

    /// Splits this record into its role-tagged fields, in declaration order.
    fn into_fields(self) -> Vec<Field>;
}

/// Type that can be constructed from an assembled [`DataArray`].
pub trait DataArrayFactory: Sized {
    fn from_dataarray(array: DataArray) -> Result<Self, Error>;
}

impl DataArrayFactory for DataArray {
    #[inline]
    fn from_dataarray(array: DataArray) -> Result<Self, Error> {
        Ok(array)
    }
}

/// Type that can be constructed from the data variables, coordinates, and attributes of an assembled [`Dataset`].
pub trait DatasetFactory: Sized {
    fn from_parts(
        data_vars: IndexMap<String, DataArray>,
        coords: IndexMap<String, DataArray>,
        attrs: Attrs,
    ) -> Result<Self, Error>;
}

impl DatasetFactory for Dataset {
    #[inline]
    fn from_parts(
        data_vars: IndexMap<String, DataArray>,
        coords: IndexMap<String, DataArray>,
        attrs: Attrs,
    ) -> Result<Self, Error> {
        Dataset::new(data_vars, coords, attrs)
    }
}

/// [`Record`] that describes a single [`DataArray`].
pub trait DataArrayRecord: Record + Sized {
    /// Type that is created from this record (usually [`DataArray`]).
    type Output: DataArrayFactory;

    /// Assembles this record into its [`DataArrayRecord::Output`].
    fn to_dataarray(self) -> Result<Self::Output, Error> {
        assemble::assemble_dataarray(self.into_fields())
    }
}

/// [`Record`] that describes a [`Dataset`].
pub trait DatasetRecord: Record + Sized {
    /// Type that is created from this record (usually [`Dataset`]).
    type Output: DatasetFactory;

    /// Assembles this record into its [`DatasetRecord::Output`].
    fn to_dataset(self) -> Result<Self::Output, Error> {
        assemble::assemble_dataset(vec![self.into_fields()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_predicates() {
        let data = Role::Data(ArraySpec::new(["x", "y"], Some(DataType::Float64)));
        let coord = Role::Coord(ArraySpec::new(["x"], None));

        assert!(data.is_data() && !data.is_coord() && !data.is_attr() && !data.is_name());
        assert!(coord.is_coord());
        assert!(Role::Attr.is_attr());
        assert!(Role::Name.is_name());
        assert_eq!(coord.array_spec(), Some(&ArraySpec { dims: vec!["x".to_string()], data_type: None }));
        assert_eq!(Role::Attr.array_spec(), None);
    }

    #[test]
    fn test_field_schema() {
        let field = Field::coord("x", ArraySpec::new(["x"], Some(DataType::Int64)), 0);
        assert!(field.is_coord());
        assert_eq!(
            field.schema(),
            FieldSchema::new("x", Role::Coord(ArraySpec::new(["x"], Some(DataType::Int64)))),
        );

        let field = Field::name("name", Some("image"));
        assert!(field.is_name());
        assert_eq!(field.value, FieldValue::Name(Some("image".to_string())));
        assert_eq!(field.schema().role, Role::Name);

        let field = Field::attr("dpi", 100);
        assert!(field.is_attr() && !field.is_data());
    }

    #[test]
    fn test_array_spec_scalar() {
        let spec = ArraySpec::new(Vec::<String>::new(), None);
        assert!(spec.dims.is_empty());
        assert_eq!(spec, ArraySpec::default());
    }
}
