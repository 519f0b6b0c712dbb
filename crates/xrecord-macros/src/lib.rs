//! Derive macros for `xrecord` records. These are re-exported by the `xrecord` crate, whose documentation describes
//! the `#[xrecord(...)]` attributes that they support.

use proc_macro::TokenStream;

mod dims;
mod helpers;
mod records;
mod roles;

use records::{CodeGenerator, RecordKind};

/// Generates a `Record` implementation for the struct this macro is applied on.
#[proc_macro_derive(Record, attributes(xrecord))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    CodeGenerator::generate(&input, RecordKind::Record).into()
}

/// Generates `Record` and `DataArrayRecord` implementations for the struct this macro is applied on, along with a
/// `new` constructor (and `empty`, `zeros`, `ones`, and `full`, when the `data` field is the only field without a
/// default) that returns the assembled `DataArray`.
///
/// ```rust,ignore
/// #[derive(DataArray)]
/// struct Image {
///     #[xrecord(data, dims = ("x", "y"), dtype = "f64")]
///     data: ArrayLike,
///     #[xrecord(coord, dims = "x", dtype = "i64", default = "0i64")]
///     x: ArrayLike,
///     #[xrecord(attr, default = "\"px\"")]
///     units: String,
/// }
///
/// let image = Image::ones([2, 3])?;
/// ```
#[proc_macro_derive(DataArray, attributes(xrecord))]
pub fn derive_data_array(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    CodeGenerator::generate(&input, RecordKind::DataArray).into()
}

/// Generates `Record` and `DatasetRecord` implementations for the struct this macro is applied on, along with a `new`
/// constructor that returns the assembled `Dataset`.
#[proc_macro_derive(Dataset, attributes(xrecord))]
pub fn derive_dataset(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    CodeGenerator::generate(&input, RecordKind::Dataset).into()
}
