//! Decoding of the `dims = ...` and `dtype = "..."` field attributes.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use crate::helpers::attribute::AttributeValue;
use crate::helpers::symbol::Symbol;

const UNRECOGNIZED_DIMENSION_NAME_TYPE: &str = "\
  Unrecognized dimension-name type. Dimensions must be declared as a string literal (`dims = \"x\"`), \
  a `&str` constant (`dims = X`), a tuple of those (`dims = (\"x\", Y)`), or `()` for scalars.";

/// Name of a single dimension in a `dims = ...` attribute.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DimensionName {
    Literal(syn::LitStr),

    /// Path to a `&str` constant, which is only resolved by the compiler.
    Constant(syn::ExprPath),
}

impl ToTokens for DimensionName {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Self::Literal(literal) => literal.to_tokens(tokens),
            Self::Constant(path) => path.to_tokens(tokens),
        }
    }
}

/// Ordered dimension names declared for an array-valued field.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Dims(pub(crate) Vec<DimensionName>);

impl Dims {
    /// Decodes the right-hand side of `dims = ...`. A single name becomes a one-element sequence, a tuple of names
    /// keeps its order, and `()` is the empty sequence of a scalar field.
    pub(crate) fn from_expr(expr: &syn::Expr) -> syn::Result<Self> {
        match Self::ungroup(expr) {
            syn::Expr::Tuple(tuple) => tuple.elems.iter().map(Self::name).collect::<syn::Result<Vec<_>>>().map(Self),
            expr => Self::name(expr).map(|name| Self(vec![name])),
        }
    }

    fn name(expr: &syn::Expr) -> syn::Result<DimensionName> {
        match Self::ungroup(expr) {
            syn::Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(literal), .. }) if literal.suffix().is_empty() => {
                Ok(DimensionName::Literal(literal.clone()))
            }
            syn::Expr::Path(path) if path.qself.is_none() => Ok(DimensionName::Constant(path.clone())),
            _ => Err(syn::Error::new_spanned(expr, UNRECOGNIZED_DIMENSION_NAME_TYPE)),
        }
    }

    /// Strips invisible groups and single parentheses, so that `("x")` is the same as `"x"`.
    fn ungroup(mut expr: &syn::Expr) -> &syn::Expr {
        loop {
            match expr {
                syn::Expr::Group(group) => expr = &group.expr,
                syn::Expr::Paren(paren) => expr = &paren.expr,
                _ => return expr,
            }
        }
    }

    /// Generates an expression of type `Vec<String>` that evaluates to these dimension names.
    pub(crate) fn to_vec_tokens(&self) -> TokenStream {
        let names = &self.0;
        quote!(::std::vec![#(::std::string::String::from(#names)),*])
    }
}

impl AttributeValue for Dims {
    fn from_meta(name: &Symbol, meta: &syn::meta::ParseNestedMeta) -> syn::Result<Self> {
        if &meta.path != name {
            return Err(meta.error("Cannot parse attribute value from a 'ParseNestedMeta' with a different path."));
        }
        let expr: syn::Expr = meta.value()?.parse()?;
        Self::from_expr(&expr)
    }
}

/// Generates an expression of type `Option<DataType>` for an optional `dtype = "..."` attribute. The element type
/// is resolved through its `Element` implementation.
pub(crate) fn data_type_tokens(krate: &syn::Path, data_type: Option<&syn::Type>) -> TokenStream {
    match data_type {
        Some(ty) => quote!(::std::option::Option::Some(<#ty as #krate::Element>::DATA_TYPE)),
        None => quote!(::std::option::Option::None),
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn names(dims: &Dims) -> Vec<String> {
        dims.0.iter().map(|name| name.to_token_stream().to_string()).collect()
    }

    #[test]
    fn test_single_name() {
        let dims = Dims::from_expr(&parse_quote!("x")).unwrap();
        assert_eq!(names(&dims), vec!["\"x\""]);

        let dims = Dims::from_expr(&parse_quote!(("x"))).unwrap();
        assert_eq!(names(&dims), vec!["\"x\""]);

        let dims = Dims::from_expr(&parse_quote!(consts::X)).unwrap();
        assert_eq!(dims.0, vec![DimensionName::Constant(parse_quote!(consts::X))]);
    }

    #[test]
    fn test_tuple_of_names() {
        let dims = Dims::from_expr(&parse_quote!(("x", Y, "z"))).unwrap();
        assert_eq!(names(&dims), vec!["\"x\"", "Y", "\"z\""]);

        let dims = Dims::from_expr(&parse_quote!(("x",))).unwrap();
        assert_eq!(names(&dims), vec!["\"x\""]);

        let dims = Dims::from_expr(&parse_quote!(())).unwrap();
        assert_eq!(dims, Dims::default());
    }

    #[test]
    fn test_unrecognized_dimension_names() {
        let exprs: [syn::Expr; 5] = [
            parse_quote!(1),
            parse_quote!(("x", ("y", "z"))),
            parse_quote!(["x", "y"]),
            parse_quote!(name()),
            parse_quote!(<T as Dims>::X),
        ];
        for expr in exprs {
            let error = Dims::from_expr(&expr).unwrap_err();
            assert!(error.to_string().starts_with("Unrecognized dimension-name type."));
        }
    }

    #[test]
    fn test_to_vec_tokens() {
        let dims = Dims::from_expr(&parse_quote!(("x", Y))).unwrap();
        let expected = quote!(::std::vec![::std::string::String::from("x"), ::std::string::String::from(Y)]);
        assert_eq!(dims.to_vec_tokens().to_string(), expected.to_string());
        assert_eq!(Dims::default().to_vec_tokens().to_string(), quote!(::std::vec![]).to_string());
    }

    #[test]
    fn test_data_type_tokens() {
        let krate: syn::Path = parse_quote!(xrecord);
        let ty: syn::Type = parse_quote!(f64);
        assert_eq!(
            data_type_tokens(&krate, Some(&ty)).to_string(),
            quote!(::std::option::Option::Some(<f64 as xrecord::Element>::DATA_TYPE)).to_string(),
        );
        assert_eq!(data_type_tokens(&krate, None).to_string(), quote!(::std::option::Option::None).to_string());
    }
}
