pub mod array_type;
pub mod element;

pub use array_type::{DataType, Shape};
pub use element::{Element, Scalar};
