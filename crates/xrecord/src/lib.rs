//! Declarative labeled multi-dimensional arrays.
//!
//! A record is a struct whose fields are tagged with the role they play in a labeled array: the `data` payload,
//! `coord`inates, `attr`ibutes, and an optional `name`. Deriving [`DataArray`](macro@DataArray) or
//! [`Dataset`](macro@Dataset) for a record generates constructors that materialize each array-valued field with the
//! dimension names and element type declared on it, broadcasting scalar (or under-shaped) coordinate values against
//! the sizes of the data.
//!
//! # Field attributes
//!
//!   - `data`, `coord`, `attr`, or `name`: role of the field. Fields without a role are not part of the record's
//!     schema. A field can have at most one role.
//!   - `dims = "x"`, `dims = ("x", Y)`, or `dims = ()`: dimension names of a `data` or `coord` field, given as string
//!     literals or `&str` constants.
//!   - `dtype = "f64"`: element type of a `data` or `coord` field. Values keep their natural element type if this is
//!     omitted.
//!   - `default` or `default = "expr"`: value used for the field when it is not passed to the generated `new`
//!     constructor.
//!
//! # Container attributes
//!
//!   - `crate = "path"`: path to this crate, for libraries that re-export it.
//!   - `factory = "Type"`: type that assembled records are turned into, which must implement [`DataArrayFactory`] or
//!     [`DatasetFactory`].
//!
//! # Examples
//!
//! ```rust
//! use xrecord::{ArrayLike, AttrValue, DataArray, Dataset, DataType, Shape};
//!
//! #[derive(DataArray)]
//! struct Image {
//!     #[xrecord(data, dims = ("x", "y"), dtype = "f64")]
//!     data: ArrayLike,
//! }
//!
//! #[derive(Dataset)]
//! struct ColorImage {
//!     #[xrecord(data, dims = ("x", "y"), dtype = "f64")]
//!     red: ArrayLike,
//!     #[xrecord(data, dims = ("x", "y"), dtype = "f64")]
//!     green: ArrayLike,
//!     #[xrecord(coord, dims = "x", dtype = "i64", default = "0i64")]
//!     x: ArrayLike,
//!     #[xrecord(attr, default = "100i64")]
//!     dpi: i64,
//! }
//!
//! let image = ColorImage::new(Image::ones([4, 3]).unwrap(), Image::zeros([4, 3]).unwrap()).unwrap();
//! assert_eq!(image.data_var("red").map(|red| red.shape()), Some(Shape::new(vec![4, 3])));
//! assert_eq!(image.coord("x").map(|x| x.data_type()), Some(DataType::Int64));
//! assert_eq!(image.attrs()["dpi"], AttrValue::Integer(100));
//! ```

pub use xrecord_core as core;
pub use xrecord_macros as macros;

pub use xrecord_core::errors::Error;
pub use xrecord_core::{array, array_like, assemble, labeled, materialize, methods, records, types};
pub use xrecord_core::{ArrayData, ArrayLike, AttrValue, Attrs, DataArray, Dataset, Dimensioned, Order, Sizes};
pub use xrecord_core::{ArraySpec, DataArrayFactory, DataArrayRecord, DatasetFactory, DatasetRecord};
pub use xrecord_core::{DataType, Element, Field, FieldSchema, FieldValue, Record, Role, Scalar, Shape};
pub use xrecord_macros::{DataArray, Dataset, Record};
