use std::fmt::{self, Display};

use proc_macro2::Span;

/// Wrapper over `&'static str` that provides convenient [`PartialEq`], [`Display`],
/// and [`From`] implementations for working with [`syn`] abstract syntax trees.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Symbol(&'static str);

impl Symbol {
    pub const fn new(symbol: &'static str) -> Self {
        Self(symbol)
    }
}

impl PartialEq<Symbol> for syn::Ident {
    fn eq(&self, word: &Symbol) -> bool {
        self == word.0
    }
}

impl PartialEq<Symbol> for syn::Path {
    fn eq(&self, word: &Symbol) -> bool {
        self.is_ident(word.0)
    }
}

impl PartialEq<Symbol> for syn::TypePath {
    fn eq(&self, word: &Symbol) -> bool {
        self.qself.is_none() && &self.path == word
    }
}

/// Formats `symbols` as a comma-separated list of quoted names (e.g., `'data', 'coord'`) for error messages.
pub fn join(symbols: &[Symbol]) -> String {
    symbols.iter().map(|symbol| format!("'{symbol}'")).collect::<Vec<_>>().join(", ")
}

impl Display for Symbol {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.0)
    }
}

impl From<Symbol> for syn::Ident {
    fn from(value: Symbol) -> Self {
        syn::Ident::new(value.0, Span::call_site())
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{Symbol, join};

    const DATA: Symbol = Symbol::new("data");

    #[test]
    fn test_symbol_comparisons() {
        let ident: syn::Ident = parse_quote!(data);
        let path: syn::Path = parse_quote!(data);
        let qualified_path: syn::Path = parse_quote!(xrecord::data);
        let type_path: syn::TypePath = parse_quote!(data);

        assert!(ident == DATA);
        assert!(path == DATA);
        assert!(qualified_path != DATA);
        assert!(type_path == DATA);
        assert_eq!(DATA.to_string(), "data");
        assert_eq!(syn::Path::from(DATA), path);
        assert_eq!(join(&[DATA, Symbol::new("coord")]), "'data', 'coord'");
    }
}
