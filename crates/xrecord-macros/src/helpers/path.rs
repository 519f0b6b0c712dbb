/// Helper private module making sure that [`PathHelpers`] is a sealed trait. Refer to
/// [this page](https://predr.ag/blog/definitive-guide-to-sealed-traits-in-rust/) for more information
/// on private traits in Rust.
mod private {
    pub trait Sealed {}
    impl Sealed for syn::Path {}
}

/// Defines helper functions for working with [`syn::Path`]s.
pub trait PathHelpers: private::Sealed {
    /// Appends the provided [`syn::PathSegment`] to this [`syn::Path`].
    fn with_segment(&self, value: impl Into<syn::PathSegment>) -> Self;

    /// Returns a [`syn::Type`] that refers to this [`syn::Path`].
    fn to_type(&self) -> syn::Type;
}

impl PathHelpers for syn::Path {
    fn with_segment(&self, value: impl Into<syn::PathSegment>) -> Self {
        let mut path = self.clone();
        path.segments.push(value.into());
        path
    }

    fn to_type(&self) -> syn::Type {
        syn::Type::Path(syn::TypePath { qself: None, path: self.clone() })
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::PathHelpers;
    use crate::helpers::symbol::Symbol;

    #[test]
    fn test_with_segment() {
        let path: syn::Path = parse_quote!(xrecord);
        let expected: syn::Path = parse_quote!(xrecord::DataArray);
        let ty: syn::Type = parse_quote!(xrecord::DataArray);
        assert_eq!(path.with_segment(syn::Ident::from(Symbol::new("DataArray"))), expected);
        assert_eq!(expected.to_type(), ty);
    }
}
