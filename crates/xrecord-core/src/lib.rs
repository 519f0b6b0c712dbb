pub mod array;
pub mod array_like;
pub mod assemble;
pub mod errors;
pub mod labeled;
pub mod materialize;
pub mod methods;
pub mod records;
pub mod types;

pub use array::{ArrayData, Order};
pub use array_like::ArrayLike;
pub use errors::Error;
pub use labeled::{AttrValue, Attrs, DataArray, Dataset, Dimensioned, Sizes};
pub use records::{
    ArraySpec, DataArrayFactory, DataArrayRecord, DatasetFactory, DatasetRecord, Field, FieldSchema, FieldValue, Record,
    Role,
};
pub use types::{DataType, Element, Scalar, Shape};
