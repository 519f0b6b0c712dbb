//! Labeled arrays ([`DataArray`]) and collections of labeled arrays that share dimensions ([`Dataset`]).

pub mod attrs;
pub mod data_array;
pub mod dataset;

use indexmap::IndexMap;

pub use attrs::{AttrValue, Attrs};
pub use data_array::DataArray;
pub use dataset::Dataset;

pub(crate) use dataset::merge_sizes;

/// Mapping from dimension names to dimension sizes, in dimension order.
pub type Sizes = IndexMap<String, usize>;

/// Value whose dimensions have names and sizes (e.g., a [`DataArray`] or a [`Dataset`]).
pub trait Dimensioned {
    fn sizes(&self) -> Sizes;
}

impl Dimensioned for Sizes {
    fn sizes(&self) -> Sizes {
        self.clone()
    }
}
