/// Contains helpers for parsing `#[xrecord(...)]` attribute values.
pub mod attribute;

/// Contains helpers for making macros [hygienic](https://en.wikipedia.org/wiki/Hygienic_macro)
/// (e.g., making sure that any generated symbols do not pollute the scope in which a macro is invoked).
pub mod hygiene;

/// Contains helpers for working with [`syn::Path`]s.
pub mod path;

/// Contains a wrapper over `&'static str` that provides convenient [`PartialEq`], [`Display`],
/// and [`From`] implementations for working with [`syn`] abstract syntax trees.
pub mod symbol;
