//! Assembly of [`DataArray`]s and [`Dataset`](crate::labeled::Dataset)s from the fields of [`Record`]s.
//!
//! The `collect_*` functions each look at the fields with one particular [`Role`](crate::records::Role) and ignore
//! all other fields, so they can be called with the complete field list of a record.
//!
//! [`Record`]: crate::records::Record

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, trace};

use crate::array_like::ArrayLike;
use crate::errors::Error;
use crate::labeled::{Attrs, DataArray, Dimensioned, Sizes, merge_sizes};
use crate::materialize::materialize;
use crate::records::{ArraySpec, DataArrayFactory, DatasetFactory, Field, FieldValue};

/// Fields of a single record, split by role.
#[derive(Default)]
struct RoleFields {
    data: Vec<Field>,
    coords: Vec<Field>,
    attrs: Vec<Field>,
    names: Vec<Field>,
}

impl RoleFields {
    fn split(fields: impl IntoIterator<Item = Field>) -> Self {
        let mut split = Self::default();
        for field in fields {
            trace!(field = %field.name, role = ?field.schema().role, "classified record field");
            match field.value {
                FieldValue::Data { .. } => split.data.push(field),
                FieldValue::Coord { .. } => split.coords.push(field),
                FieldValue::Attr(_) => split.attrs.push(field),
                FieldValue::Name(_) => split.names.push(field),
            }
        }
        split
    }
}

/// Returns the `(name, spec, value)` triples of the [`Role::Data`](crate::records::Role::Data) fields.
fn data_fields(fields: impl IntoIterator<Item = Field>) -> Vec<(String, ArraySpec, ArrayLike)> {
    fields
        .into_iter()
        .filter_map(|field| match field.value {
            FieldValue::Data { spec, value } => Some((field.name, spec, value)),
            _ => None,
        })
        .collect()
}

/// Collects the values of all [`Role::Attr`](crate::records::Role::Attr) fields, verbatim and in order.
pub fn collect_attrs(fields: impl IntoIterator<Item = Field>) -> Attrs {
    fields
        .into_iter()
        .filter_map(|field| match field.value {
            FieldValue::Attr(value) => Some((field.name, value)),
            _ => None,
        })
        .collect()
}

/// Materializes the single [`Role::Data`](crate::records::Role::Data) field with no sizes to broadcast against.
///
/// # Errors
///
///   - [`Error::MissingDataField`] if there is no data field.
///   - [`Error::MultipleDataFields`] if there is more than one data field.
///   - Any error returned by [`materialize`].
pub fn collect_data(fields: impl IntoIterator<Item = Field>) -> Result<DataArray, Error> {
    let mut data = data_fields(fields);
    match data.len() {
        0 => Err(Error::MissingDataField),
        1 => {
            let (_, spec, value) = data.remove(0);
            materialize(value, &spec, None)
        }
        _ => Err(Error::MultipleDataFields { names: data.into_iter().map(|(name, _, _)| name).collect() }),
    }
}

/// Materializes every [`Role::Data`](crate::records::Role::Data) field with no sizes to broadcast against, keyed by
/// field name. Fails with [`Error::MissingDataField`] if there is no data field.
pub fn collect_data_vars(fields: impl IntoIterator<Item = Field>) -> Result<IndexMap<String, DataArray>, Error> {
    let data = data_fields(fields);
    if data.is_empty() {
        return Err(Error::MissingDataField);
    }
    data.into_iter().map(|(name, spec, value)| Ok((name, materialize(value, &spec, None)?))).collect()
}

/// Returns the value of the single [`Role::Name`](crate::records::Role::Name) field, or `None` if there is no such
/// field. Fails with [`Error::MultipleNameFields`] if there is more than one.
pub fn collect_name(fields: impl IntoIterator<Item = Field>) -> Result<Option<String>, Error> {
    let mut names = fields
        .into_iter()
        .filter_map(|field| match field.value {
            FieldValue::Name(value) => Some((field.name, value)),
            _ => None,
        })
        .collect::<Vec<_>>();
    match names.len() {
        0 => Ok(None),
        1 => Ok(names.remove(0).1),
        _ => Err(Error::MultipleNameFields { names: names.into_iter().map(|(name, _)| name).collect() }),
    }
}

/// Materializes every [`Role::Coord`](crate::records::Role::Coord) field, broadcasting values against the sizes
/// of the dimensions of `bound_to` when needed.
pub fn collect_coords(
    fields: impl IntoIterator<Item = Field>,
    bound_to: &impl Dimensioned,
) -> Result<IndexMap<String, DataArray>, Error> {
    let sizes = bound_to.sizes();
    fields
        .into_iter()
        .filter_map(|field| match field.value {
            FieldValue::Coord { spec, value } => Some((field.name, spec, value)),
            _ => None,
        })
        .map(|(name, spec, value)| Ok((name, materialize(value, &spec, Some(&sizes))?)))
        .collect()
}

/// Assembles the fields of a single-array record into a [`DataArray`] (or another [`DataArrayFactory`]).
pub fn assemble_dataarray<F: DataArrayFactory>(fields: impl IntoIterator<Item = Field>) -> Result<F, Error> {
    let RoleFields { data, coords, attrs, names } = RoleFields::split(fields);
    let array = collect_data(data)?;
    let name = collect_name(names)?;
    let coords = collect_coords(coords, &array)?;
    let mut array = array.with_coords(coords)?.with_attrs(collect_attrs(attrs));
    array.set_name(name);
    debug!(
        name = array.name(),
        dims = ?array.dims(),
        coords = array.coords().len(),
        attrs = array.attrs().len(),
        "assembled data array"
    );
    F::from_dataarray(array)
}

/// Assembles the fields of one or more multi-array records into a [`Dataset`](crate::labeled::Dataset) (or another
/// [`DatasetFactory`]).
///
/// Data variables of all records are materialized first, and the coordinates of all records are then bound to the
/// sizes of those data variables. A variable name that is used more than once across records results in an
/// [`Error::DuplicateVariable`] unless both uses produce identical coordinates. When several records have an
/// attribute with the same name, the value of the last record wins.
pub fn assemble_dataset<F: DatasetFactory>(
    records: impl IntoIterator<Item = impl IntoIterator<Item = Field>>,
) -> Result<F, Error> {
    let records = records.into_iter().map(RoleFields::split).collect::<Vec<_>>();
    let mut data_vars = IndexMap::new();
    let mut coords = IndexMap::<String, DataArray>::new();
    let mut attrs = Attrs::new();
    let mut sizes = Sizes::new();

    let mut remaining = Vec::with_capacity(records.len());
    for RoleFields { data, coords: record_coords, attrs: record_attrs, names } in records {
        for (name, array) in collect_data_vars(data)? {
            merge_sizes(&mut sizes, &array.sizes())?;
            if data_vars.insert(name.clone(), array).is_some() {
                return Err(Error::DuplicateVariable { name });
            }
        }
        // Collections have no name of their own, but the name fields are still validated.
        if let Some(name) = collect_name(names)? {
            trace!(name = %name, "ignoring name of a record assembled into a dataset");
        }
        remaining.push((record_coords, record_attrs));
    }

    for (record_coords, record_attrs) in remaining {
        for (name, coord) in collect_coords(record_coords, &sizes)? {
            if data_vars.contains_key(&name) {
                return Err(Error::DuplicateVariable { name });
            }
            match coords.entry(name) {
                Entry::Occupied(entry) if entry.get() != &coord => {
                    return Err(Error::DuplicateVariable { name: entry.key().clone() });
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(entry) => {
                    entry.insert(coord);
                }
            }
        }
        for (name, value) in collect_attrs(record_attrs) {
            if let Some(previous) = attrs.insert(name.clone(), value) {
                debug!(attr = %name, %previous, "attribute overridden by a later record");
            }
        }
    }

    debug!(data_vars = data_vars.len(), coords = coords.len(), attrs = attrs.len(), "assembled dataset");
    F::from_parts(data_vars, coords, attrs)
}
