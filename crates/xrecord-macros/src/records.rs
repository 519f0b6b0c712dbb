use std::fmt::Display;

use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::ext::IdentExt;

use crate::dims::data_type_tokens;
use crate::helpers::attribute::Attribute;
use crate::helpers::hygiene::const_block;
use crate::helpers::path::PathHelpers;
use crate::helpers::symbol::{self, Symbol};
use crate::roles::{ArraySpec, DefaultValue, FieldRole, RecordField, XRECORD_ATTRIBUTE};

const CRATE_ATTRIBUTE: Symbol = Symbol::new("crate");
const FACTORY_ATTRIBUTE: Symbol = Symbol::new("factory");
const VALID_CONTAINER_ATTRIBUTES: [Symbol; 2] = [CRATE_ATTRIBUTE, FACTORY_ATTRIBUTE];

const DEFAULT_XRECORD_CRATE: Symbol = Symbol::new("xrecord");

/// Field types for which single-array records also get `empty`, `zeros`, `ones`, and `full` constructors.
const ARRAY_VALUE_TYPES: [Symbol; 2] = [Symbol::new("ArrayLike"), Symbol::new("ArrayData")];

/// Derive macro that a [`CodeGenerator`] is generating code for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RecordKind {
    /// `#[derive(Record)]`: only the `Record` implementation.
    Record,

    /// `#[derive(DataArray)]`: `Record`, `DataArrayRecord`, and the record constructors.
    DataArray,

    /// `#[derive(Dataset)]`: `Record`, `DatasetRecord`, and the `new` record constructor.
    Dataset,
}

impl RecordKind {
    fn derive_name(&self) -> &'static str {
        match self {
            Self::Record => "Record",
            Self::DataArray => "DataArray",
            Self::Dataset => "Dataset",
        }
    }
}

/// [`CodeGenerator`]s are used to generate implementations of the `Record` trait (and of `DataArrayRecord` or
/// `DatasetRecord`, along with the record constructors) via the `#[derive(Record)]`, `#[derive(DataArray)]`, and
/// `#[derive(Dataset)]` macros.
pub(crate) struct CodeGenerator {
    /// [`syn::Path`] that represents the root `xrecord` library path (e.g., `xrecord`). This is customizable via the
    /// `#[xrecord(crate = "...")]` attribute and it is meant to support libraries that build on top of `xrecord` and
    /// re-export its types as part of their namespace, similar to `#[serde(crate = "...")]`.
    krate: syn::Path,

    /// Type that assembled records are turned into, set via `#[xrecord(factory = "...")]`. Defaults to `DataArray`
    /// or `Dataset`, depending on [`CodeGenerator::kind`].
    factory: Option<syn::Type>,

    kind: RecordKind,

    ident: syn::Ident,

    /// [`syn::Generics`] of the record, extended with the conversion bounds that generic field types need.
    generics: syn::Generics,

    /// Fields of the record in declaration order, including fields without a role.
    fields: Vec<RecordField>,

    /// Errors accumulated in this [`CodeGenerator`]. We keep going as far as we can after encountering an error so
    /// that all problems with a record declaration are reported at once.
    errors: Vec<syn::Error>,
}

impl CodeGenerator {
    /// Extracts everything that is needed for code generation from `input`, collecting any errors along the way.
    pub(crate) fn new(input: &syn::DeriveInput, kind: RecordKind) -> Self {
        let mut generator = CodeGenerator {
            krate: DEFAULT_XRECORD_CRATE.into(),
            factory: None,
            kind,
            ident: input.ident.clone(),
            generics: syn::Generics::default(),
            fields: Vec::new(),
            errors: Vec::new(),
        };

        generator.extract_attributes(input);
        generator.extract_fields(input);
        generator.check_roles();
        generator.extract_generics(input);
        generator
    }

    /// Generates the implementations for the provided input, or a [`compile_error!`] invocation that describes
    /// every problem found in it. As an example, the generated code for a `#[derive(DataArray)]` record looks
    /// something like this:
    ///
    /// ```ignore
    /// #[doc(hidden)]
    /// #[allow(non_upper_case_globals, unused_attributes, unused_qualifications)]
    /// const _: () = {
    ///     #[automatically_derived]
    ///     impl xrecord::Record for Image {
    ///         fn schema() -> Vec<xrecord::FieldSchema> { ... }
    ///         fn into_fields(self) -> Vec<xrecord::Field> { ... }
    ///     }
    ///
    ///     #[automatically_derived]
    ///     impl xrecord::DataArrayRecord for Image {
    ///         type Output = xrecord::DataArray;
    ///     }
    ///
    ///     #[automatically_derived]
    ///     impl Image {
    ///         pub fn new(data: impl Into<ArrayLike>) -> Result<xrecord::DataArray, xrecord::Error> { ... }
    ///         pub fn empty(shape: impl Into<xrecord::Shape>) -> Result<xrecord::DataArray, xrecord::Error> { ... }
    ///         ...
    ///     }
    /// };
    /// ```
    pub(crate) fn generate(input: &syn::DeriveInput, kind: RecordKind) -> TokenStream {
        let generator = Self::new(input, kind);
        if let Some(error) = generator.compile_error() {
            return error;
        }

        let record_impl = generator.generate_record_impl();
        let output_impl = generator.generate_output_impl();
        let constructors = generator.generate_constructors();
        const_block(quote! {
            #record_impl
            #output_impl
            #constructors
        })
    }

    /// Returns a [`TokenStream`] that represents a [`compile_error!`] invocation that contain information about
    /// [`syn::Error`]s that have been collected by this [`CodeGenerator`] so far. If there are no errors, then this
    /// function returns [`None`].
    fn compile_error(&self) -> Option<TokenStream> {
        self.errors
            .iter()
            .cloned()
            .reduce(|mut combined_error, error| {
                combined_error.combine(error);
                combined_error
            })
            .map(|error| error.into_compile_error())
    }

    /// Extracts the container-level `#[xrecord(...)]` attributes, setting [`CodeGenerator::krate`] and
    /// [`CodeGenerator::factory`].
    fn extract_attributes(&mut self, input: &syn::DeriveInput) {
        let mut krate = Attribute::<syn::Path>::new(CRATE_ATTRIBUTE);
        let mut factory = Attribute::<syn::Type>::new(FACTORY_ATTRIBUTE);
        input.attrs.iter().filter(|attr| attr.path() == &XRECORD_ATTRIBUTE).for_each(|attr| {
            attr.parse_nested_meta(|meta| match &meta.path {
                path if path == &CRATE_ATTRIBUTE => krate.set(&meta),
                path if path == &FACTORY_ATTRIBUTE => factory.set(&meta),
                path => Err(meta.error(format_args!(
                    "Invalid '#[xrecord(...)]' attribute: '{}'. These are the attributes that are supported here: {}.",
                    path.to_token_stream().to_string().replace(' ', ""),
                    symbol::join(&VALID_CONTAINER_ATTRIBUTES),
                ))),
            })
            .unwrap_or_else(|error| self.errors.push(error));
        });

        if factory.is_set() && self.kind == RecordKind::Record {
            self.add_error(
                factory.tokens(),
                "The xrecord 'factory' attribute is only supported by '#[derive(DataArray)]' and '#[derive(Dataset)]'.",
            );
        }
        if let Some(krate) = krate.get() {
            self.krate = krate;
        }
        self.factory = factory.get();
    }

    /// Extracts the [`RecordField`]s of the provided input, which must be a struct with named fields.
    fn extract_fields(&mut self, input: &syn::DeriveInput) {
        match &input.data {
            syn::Data::Struct(syn::DataStruct { fields: syn::Fields::Named(fields), .. }) => {
                let errors = &mut self.errors;
                self.fields = fields
                    .named
                    .iter()
                    .filter_map(|field| field.ident.clone().map(|ident| RecordField::extract(ident, field, errors)))
                    .collect();
            }
            _ => {
                let message = format!(
                    "The '#[derive(xrecord::{})]' macro only supports structs with named fields.",
                    self.kind.derive_name(),
                );
                self.add_error(&input.ident, message);
            }
        }
    }

    /// Checks that the number of `data` and `name` fields matches what the derived record kind requires.
    fn check_roles(&mut self) {
        let data_count = self.fields.iter().filter(|field| field.is_data()).count();
        let ident = self.ident.clone();
        match self.kind {
            RecordKind::DataArray if data_count != 1 => self.add_error(
                &ident,
                format!(
                    "'#[derive(DataArray)]' records must have exactly one '#[xrecord(data)]' field, but '{ident}' has \
                    {data_count}.",
                ),
            ),
            RecordKind::Dataset if data_count == 0 => {
                self.add_error(&ident, "'#[derive(Dataset)]' records must have at least one '#[xrecord(data)]' field.")
            }
            _ => {}
        }

        let extra_names = self.fields.iter().filter(|field| field.is_name()).skip(1).map(|field| field.ident.clone());
        for ident in extra_names.collect::<Vec<_>>() {
            self.add_error(ident, "Records can have at most one '#[xrecord(name)]' field.");
        }
    }

    /// Extracts the [`syn::Generics`] of the provided input and, for generic records, adds the conversion bounds that
    /// the generated code relies on for each field with a role. Note that these bounds may be redundant (e.g., for
    /// fields whose types do not depend on the type parameters), which is fine.
    fn extract_generics(&mut self, input: &syn::DeriveInput) {
        let mut generics = input.generics.clone();
        if input.generics.type_params().next().is_some() {
            let krate = &self.krate;
            for field in &self.fields {
                let ty = &field.ty;
                let predicate: syn::WherePredicate = match &field.role {
                    Some(FieldRole::Data(_) | FieldRole::Coord(_)) => {
                        syn::parse_quote!(#ty: ::std::convert::Into<#krate::ArrayLike>)
                    }
                    Some(FieldRole::Attr) => syn::parse_quote!(#ty: ::std::convert::Into<#krate::AttrValue>),
                    Some(FieldRole::Name) => {
                        syn::parse_quote!(#ty: ::std::convert::Into<::std::option::Option<::std::string::String>>)
                    }
                    None => continue,
                };
                generics.make_where_clause().predicates.push(predicate);
            }
        }
        self.generics = generics;
    }

    /// Adds an error to this [`CodeGenerator`] with the specified message spanning the provided tokens.
    fn add_error<T: ToTokens, U: Display>(&mut self, tokens: T, message: U) {
        self.errors.push(syn::Error::new_spanned(tokens.into_token_stream(), message));
    }

    /// Type that assembled records are turned into, or [`None`] for plain `#[derive(Record)]` records.
    fn output(&self) -> Option<syn::Type> {
        let default = match self.kind {
            RecordKind::Record => return None,
            RecordKind::DataArray => Symbol::new("DataArray"),
            RecordKind::Dataset => Symbol::new("Dataset"),
        };
        Some(self.factory.clone().unwrap_or_else(|| self.krate.with_segment(syn::Ident::from(default)).to_type()))
    }

    fn generate_array_spec(&self, spec: &ArraySpec) -> TokenStream {
        let krate = &self.krate;
        let dims = spec.dims.to_vec_tokens();
        let data_type = data_type_tokens(krate, spec.data_type.as_ref());
        quote!(#krate::ArraySpec { dims: #dims, data_type: #data_type })
    }

    /// Generates the `Record` implementation, whose schema and fields follow the declaration order of the fields
    /// with a role.
    fn generate_record_impl(&self) -> TokenStream {
        let krate = &self.krate;
        let ident = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let role_fields = self
            .fields
            .iter()
            .filter_map(|field| field.role.as_ref().map(|role| (field, role)))
            .collect::<Vec<_>>();

        let schema = role_fields.iter().map(|(field, role)| {
            let name = field_name(field);
            let role = match role {
                FieldRole::Data(spec) => {
                    let spec = self.generate_array_spec(spec);
                    quote!(#krate::Role::Data(#spec))
                }
                FieldRole::Coord(spec) => {
                    let spec = self.generate_array_spec(spec);
                    quote!(#krate::Role::Coord(#spec))
                }
                FieldRole::Attr => quote!(#krate::Role::Attr),
                FieldRole::Name => quote!(#krate::Role::Name),
            };
            quote!(#krate::FieldSchema::new(#name, #role))
        });

        let fields = role_fields.iter().map(|(field, role)| {
            let name = field_name(field);
            let member = &field.ident;
            match role {
                FieldRole::Data(spec) => {
                    let spec = self.generate_array_spec(spec);
                    quote!(#krate::Field::data(#name, #spec, self.#member))
                }
                FieldRole::Coord(spec) => {
                    let spec = self.generate_array_spec(spec);
                    quote!(#krate::Field::coord(#name, #spec, self.#member))
                }
                FieldRole::Attr => quote!(#krate::Field::attr(#name, self.#member)),
                FieldRole::Name => quote! {
                    #krate::Field::name(
                        #name,
                        ::std::convert::Into::<::std::option::Option<::std::string::String>>::into(self.#member),
                    )
                },
            }
        });

        quote! {
            #[automatically_derived]
            impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
                fn schema() -> ::std::vec::Vec<#krate::FieldSchema> {
                    ::std::vec![#(#schema),*]
                }

                fn into_fields(self) -> ::std::vec::Vec<#krate::Field> {
                    ::std::vec![#(#fields),*]
                }
            }
        }
    }

    /// Generates the `where` clause of the record constructors of generic records, which requires a [`Default`]
    /// implementation for every field type that is set to its default value by those constructors.
    fn generate_default_bounds(&self) -> TokenStream {
        if self.generics.type_params().next().is_none() {
            return TokenStream::new();
        }
        let bounds = self
            .fields
            .iter()
            .filter(|field| field.default == Some(DefaultValue::Default))
            .map(|field| {
                let ty = &field.ty;
                quote!(#ty: ::std::default::Default)
            })
            .collect::<Vec<_>>();
        match bounds.is_empty() {
            true => TokenStream::new(),
            false => quote!(where #(#bounds),*),
        }
    }

    /// Generates the `DataArrayRecord` or `DatasetRecord` implementation.
    fn generate_output_impl(&self) -> TokenStream {
        let Some(output) = self.output() else {
            return TokenStream::new();
        };
        let krate = &self.krate;
        let ident = &self.ident;
        let record_trait = format_ident!("{}Record", self.kind.derive_name());
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        quote! {
            #[automatically_derived]
            impl #impl_generics #krate::#record_trait for #ident #ty_generics #where_clause {
                type Output = #output;
            }
        }
    }

    /// Generates the inherent `new` constructor and, for single-array records, the typed factories.
    fn generate_constructors(&self) -> TokenStream {
        let Some(output) = self.output() else {
            return TokenStream::new();
        };
        let krate = &self.krate;
        let ident = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let assemble = match self.kind {
            RecordKind::Dataset => quote!(#krate::DatasetRecord::to_dataset),
            _ => quote!(#krate::DataArrayRecord::to_dataarray),
        };

        let params = self.fields.iter().filter(|field| field.is_required()).map(|field| {
            let ident = &field.ident;
            let ty = &field.ty;
            quote!(#ident: impl ::std::convert::Into<#ty>)
        });
        let inits = self.fields.iter().map(|field| {
            let ident = &field.ident;
            match &field.default {
                None => quote!(#ident: ::std::convert::Into::into(#ident)),
                Some(DefaultValue::Default) => quote!(#ident: ::std::default::Default::default()),
                Some(DefaultValue::Expr(expr)) => quote!(#ident: ::std::convert::Into::into(#expr)),
            }
        });
        let default_bounds = self.generate_default_bounds();
        let doc = format!(
            "Creates a new `{}` from the provided field values. Fields that have an `#[xrecord(default)]` are set to \
            their default values.",
            output.to_token_stream().to_string().replace(' ', ""),
        );
        let factories = self.generate_typed_factories(&output, &default_bounds);

        quote! {
            #[automatically_derived]
            impl #impl_generics #ident #ty_generics #where_clause {
                #[doc = #doc]
                pub fn new(#(#params),*) -> ::std::result::Result<#output, #krate::Error> #default_bounds {
                    #assemble(Self { #(#inits),* })
                }

                #factories
            }
        }
    }

    /// Generates `empty`, `zeros`, `ones`, and `full` for `#[derive(DataArray)]` records whose only field without a
    /// default is the `data` field, and only when that field holds an `ArrayLike` or an `ArrayData`. The new arrays
    /// use the element type declared on the `data` field, or `f64` (or the type of the fill value for `full`) if
    /// there is none.
    fn generate_typed_factories(&self, output: &syn::Type, default_bounds: &TokenStream) -> TokenStream {
        if self.kind != RecordKind::DataArray {
            return TokenStream::new();
        }
        let required = self.fields.iter().filter(|field| field.is_required()).collect::<Vec<_>>();
        let [field] = required.as_slice() else {
            return TokenStream::new();
        };
        let Some(FieldRole::Data(spec)) = &field.role else {
            return TokenStream::new();
        };
        if !is_array_value_type(&field.ty) {
            return TokenStream::new();
        }

        let krate = &self.krate;
        let order = quote!(#krate::methods::ORDER);
        let (data_type, fill_data_type) = match &spec.data_type {
            Some(ty) => (quote!(<#ty as #krate::Element>::DATA_TYPE), quote!(<#ty as #krate::Element>::DATA_TYPE)),
            None => (quote!(#krate::DataType::Float64), quote!(fill_value.data_type())),
        };
        let shape = quote!(shape: impl ::std::convert::Into<#krate::Shape>);
        let result = quote!(::std::result::Result<#output, #krate::Error> #default_bounds);
        quote! {
            /// Creates a new record output whose data is an array of the provided shape with unspecified values.
            pub fn empty(#shape) -> #result {
                Self::new(#krate::ArrayData::empty(shape, #data_type, #order)?)
            }

            /// Creates a new record output whose data is an array of the provided shape filled with zeros.
            pub fn zeros(#shape) -> #result {
                Self::new(#krate::ArrayData::zeros(shape, #data_type, #order)?)
            }

            /// Creates a new record output whose data is an array of the provided shape filled with ones.
            pub fn ones(#shape) -> #result {
                Self::new(#krate::ArrayData::ones(shape, #data_type, #order)?)
            }

            /// Creates a new record output whose data is an array of the provided shape filled with `fill_value`.
            pub fn full(#shape, fill_value: impl ::std::convert::Into<#krate::Scalar>) -> #result {
                let fill_value = ::std::convert::Into::<#krate::Scalar>::into(fill_value);
                let data_type = #fill_data_type;
                Self::new(#krate::ArrayData::full(shape, fill_value, data_type, #order)?)
            }
        }
    }
}

/// Name of the field as it appears in schemas and assembled arrays (i.e., without any `r#` prefix).
fn field_name(field: &RecordField) -> syn::LitStr {
    syn::LitStr::new(&field.ident.unraw().to_string(), field.ident.span())
}

fn is_array_value_type(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| {
                segment.arguments.is_empty() && ARRAY_VALUE_TYPES.iter().any(|symbol| segment.ident == *symbol)
            }),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn errors(input: &syn::DeriveInput, kind: RecordKind) -> Vec<String> {
        CodeGenerator::new(input, kind).errors.iter().map(|error| error.to_string()).collect()
    }

    /// Generates code for `input` and returns the `impl` blocks inside the generated `const` block.
    fn generated_impls(input: &syn::DeriveInput, kind: RecordKind) -> Vec<syn::ItemImpl> {
        let item: syn::ItemConst = syn::parse2(CodeGenerator::generate(input, kind)).expect("expected a const block");
        let syn::Expr::Block(block) = *item.expr else { panic!("expected a block expression") };
        block
            .block
            .stmts
            .into_iter()
            .filter_map(|stmt| match stmt {
                syn::Stmt::Item(syn::Item::Impl(item)) => Some(item),
                _ => None,
            })
            .collect()
    }

    fn trait_name(item: &syn::ItemImpl) -> Option<String> {
        item.trait_.as_ref().map(|(_, path, _)| path.to_token_stream().to_string().replace(' ', ""))
    }

    fn function_names(item: &syn::ItemImpl) -> Vec<String> {
        item.items
            .iter()
            .filter_map(|item| match item {
                syn::ImplItem::Fn(function) => Some(function.sig.ident.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_generate_data_array() {
        let input: syn::DeriveInput = parse_quote! {
            struct Image {
                #[xrecord(data, dims = ("x", "y"), dtype = "f64")]
                data: ArrayLike,
                #[xrecord(coord, dims = "x", dtype = "i64", default = "0i64")]
                x: ArrayLike,
                #[xrecord(attr, default = "100i64")]
                dpi: i64,
                #[xrecord(name, default)]
                name: Option<String>,
                cache: Vec<u8>,
            }
        };
        assert!(errors(&input, RecordKind::DataArray).is_empty());

        let impls = generated_impls(&input, RecordKind::DataArray);
        assert_eq!(impls.len(), 3);
        assert_eq!(trait_name(&impls[0]).as_deref(), Some("xrecord::Record"));
        assert_eq!(function_names(&impls[0]), vec!["schema", "into_fields"]);
        assert_eq!(trait_name(&impls[1]).as_deref(), Some("xrecord::DataArrayRecord"));
        assert_eq!(trait_name(&impls[2]), None);

        // `cache` has no default, so the typed factories cannot be generated.
        assert_eq!(function_names(&impls[2]), vec!["new"]);
        let syn::ImplItem::Fn(new) = &impls[2].items[0] else { panic!("expected a function") };
        assert_eq!(new.sig.inputs.len(), 2);

        let schema = impls[0].to_token_stream().to_string();
        assert!(schema.contains("xrecord :: Role :: Coord"));
        assert!(schema.contains("< f64 as xrecord :: Element > :: DATA_TYPE"));
        assert!(!schema.contains("\"cache\""));
    }

    #[test]
    fn test_generate_typed_factories() {
        let input: syn::DeriveInput = parse_quote! {
            #[xrecord(crate = "my_crate::xrecord", factory = "Custom")]
            struct Image {
                #[xrecord(data, dims = (X, Y))]
                data: my_crate::xrecord::ArrayLike,
            }
        };
        let impls = generated_impls(&input, RecordKind::DataArray);
        assert_eq!(trait_name(&impls[0]).as_deref(), Some("my_crate::xrecord::Record"));
        assert_eq!(function_names(&impls[2]), vec!["new", "empty", "zeros", "ones", "full"]);

        let output = impls[1].to_token_stream().to_string();
        assert!(output.contains("type Output = Custom"));
        let constructors = impls[2].to_token_stream().to_string();
        assert!(constructors.contains("my_crate :: xrecord :: DataType :: Float64"));
        assert!(constructors.contains("fill_value . data_type ()"));
    }

    #[test]
    fn test_generate_dataset() {
        let input: syn::DeriveInput = parse_quote! {
            struct Rgb<T> {
                #[xrecord(data, dims = ("x", "y"))]
                red: T,
                #[xrecord(data, dims = ("x", "y"))]
                green: T,
                #[xrecord(attr)]
                units: String,
            }
        };
        let impls = generated_impls(&input, RecordKind::Dataset);
        assert_eq!(impls.len(), 3);
        assert_eq!(trait_name(&impls[1]).as_deref(), Some("xrecord::DatasetRecord"));
        assert_eq!(function_names(&impls[2]), vec!["new"]);
        assert!(impls[1].to_token_stream().to_string().contains("type Output = xrecord :: Dataset"));

        let where_clause = impls[0].generics.where_clause.as_ref().expect("expected a where clause");
        assert_eq!(where_clause.predicates.len(), 3);
    }

    #[test]
    fn test_generate_default_bounds() {
        let input: syn::DeriveInput = parse_quote! {
            struct Series<T, U> {
                #[xrecord(data, dims = "t")]
                data: T,
                #[xrecord(attr, default)]
                units: U,
            }
        };
        let impls = generated_impls(&input, RecordKind::DataArray);
        let syn::ImplItem::Fn(new) = &impls[2].items[0] else { panic!("expected a function") };
        let where_clause: syn::WhereClause = parse_quote!(where U: ::std::default::Default);
        assert_eq!(new.sig.generics.where_clause, Some(where_clause));

        let input: syn::DeriveInput = parse_quote! {
            struct Image {
                #[xrecord(data, dims = "t")]
                data: ArrayLike,
                #[xrecord(attr, default)]
                units: String,
            }
        };
        let impls = generated_impls(&input, RecordKind::DataArray);
        let syn::ImplItem::Fn(new) = &impls[2].items[0] else { panic!("expected a function") };
        assert!(new.sig.generics.where_clause.is_none());
    }

    #[test]
    fn test_generate_record() {
        let input: syn::DeriveInput = parse_quote! {
            struct Metadata {
                #[xrecord(attr)]
                units: String,
            }
        };
        let impls = generated_impls(&input, RecordKind::Record);
        assert_eq!(impls.len(), 1);
        assert_eq!(trait_name(&impls[0]).as_deref(), Some("xrecord::Record"));
    }

    #[test]
    fn test_data_field_counts() {
        let input: syn::DeriveInput = parse_quote!(
            struct Image {
                #[xrecord(attr)]
                units: String,
            }
        );
        assert_eq!(
            errors(&input, RecordKind::DataArray),
            vec!["'#[derive(DataArray)]' records must have exactly one '#[xrecord(data)]' field, but 'Image' has 0."],
        );
        assert_eq!(
            errors(&input, RecordKind::Dataset),
            vec!["'#[derive(Dataset)]' records must have at least one '#[xrecord(data)]' field."],
        );
        assert!(errors(&input, RecordKind::Record).is_empty());

        let input: syn::DeriveInput = parse_quote!(
            struct Image {
                #[xrecord(data)]
                red: ArrayLike,
                #[xrecord(data)]
                green: ArrayLike,
                #[xrecord(name)]
                name: String,
                #[xrecord(name)]
                label: String,
            }
        );
        assert_eq!(
            errors(&input, RecordKind::DataArray),
            vec![
                "'#[derive(DataArray)]' records must have exactly one '#[xrecord(data)]' field, but 'Image' has 2.",
                "Records can have at most one '#[xrecord(name)]' field.",
            ],
        );
        assert_eq!(errors(&input, RecordKind::Dataset), vec!["Records can have at most one '#[xrecord(name)]' field."]);
    }

    #[test]
    fn test_invalid_containers() {
        let input: syn::DeriveInput = parse_quote!(struct Image(ArrayLike););
        assert_eq!(
            errors(&input, RecordKind::DataArray),
            vec![
                "The '#[derive(xrecord::DataArray)]' macro only supports structs with named fields.",
                "'#[derive(DataArray)]' records must have exactly one '#[xrecord(data)]' field, but 'Image' has 0.",
            ],
        );

        let input: syn::DeriveInput = parse_quote!(
            enum Image {
                Red,
            }
        );
        assert_eq!(
            errors(&input, RecordKind::Record),
            vec!["The '#[derive(xrecord::Record)]' macro only supports structs with named fields."],
        );
    }

    #[test]
    fn test_invalid_container_attributes() {
        let input: syn::DeriveInput = parse_quote! {
            #[xrecord(factory = "Custom", order = "F")]
            struct Metadata {
                #[xrecord(attr)]
                units: String,
            }
        };
        assert_eq!(
            errors(&input, RecordKind::Record),
            vec![
                "Invalid '#[xrecord(...)]' attribute: 'order'. These are the attributes that are supported here: \
                'crate', 'factory'.",
                "The xrecord 'factory' attribute is only supported by '#[derive(DataArray)]' and '#[derive(Dataset)]'.",
            ],
        );

        let tokens = CodeGenerator::generate(&input, RecordKind::Record).to_string();
        assert!(tokens.contains("compile_error"));
    }

    #[test]
    fn test_is_array_value_type() {
        assert!(is_array_value_type(&parse_quote!(ArrayLike)));
        assert!(is_array_value_type(&parse_quote!(xrecord::ArrayData)));
        assert!(!is_array_value_type(&parse_quote!(DataArray)));
        assert!(!is_array_value_type(&parse_quote!(Vec<f64>)));
    }
}
