//! Classification of record fields by their `#[xrecord(...)]` role tags.

use crate::dims::Dims;
use crate::helpers::attribute::{Attribute, AttributeValue};
use crate::helpers::symbol::{self, Symbol};

pub(crate) const XRECORD_ATTRIBUTE: Symbol = Symbol::new("xrecord");

const DATA_ATTRIBUTE: Symbol = Symbol::new("data");
const COORD_ATTRIBUTE: Symbol = Symbol::new("coord");
const ATTR_ATTRIBUTE: Symbol = Symbol::new("attr");
const NAME_ATTRIBUTE: Symbol = Symbol::new("name");
const DIMS_ATTRIBUTE: Symbol = Symbol::new("dims");
const DTYPE_ATTRIBUTE: Symbol = Symbol::new("dtype");
const DEFAULT_ATTRIBUTE: Symbol = Symbol::new("default");
const VALID_FIELD_ATTRIBUTES: [Symbol; 7] = [
    DATA_ATTRIBUTE,
    COORD_ATTRIBUTE,
    ATTR_ATTRIBUTE,
    NAME_ATTRIBUTE,
    DIMS_ATTRIBUTE,
    DTYPE_ATTRIBUTE,
    DEFAULT_ATTRIBUTE,
];

/// Value used for a field that is omitted from the generated `new` constructor.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DefaultValue {
    /// `#[xrecord(default)]`: the [`Default`] value of the field type.
    Default,

    /// `#[xrecord(default = "expr")]`: `expr` converted into the field type with [`Into`].
    Expr(syn::Expr),
}

impl AttributeValue for DefaultValue {
    fn from_meta(name: &Symbol, meta: &syn::meta::ParseNestedMeta) -> syn::Result<Self> {
        match meta.input.peek(syn::Token![=]) {
            true => syn::Expr::from_meta(name, meta).map(Self::Expr),
            false => Ok(Self::Default),
        }
    }
}

/// Dimensions and element type declared on a `data` or `coord` field.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ArraySpec {
    pub(crate) dims: Dims,
    pub(crate) data_type: Option<syn::Type>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FieldRole {
    Data(ArraySpec),
    Coord(ArraySpec),
    Attr,
    Name,
}

/// Field of a record struct together with everything its `#[xrecord(...)]` attributes declare about it. Fields
/// without a role are kept because the generated constructors still need to initialize them.
#[derive(Clone, Debug)]
pub(crate) struct RecordField {
    pub(crate) ident: syn::Ident,
    pub(crate) ty: syn::Type,
    pub(crate) role: Option<FieldRole>,
    pub(crate) default: Option<DefaultValue>,
}

impl RecordField {
    /// Extracts a [`RecordField`] from `field`, pushing an error to `errors` for every invalid, unknown, or
    /// conflicting `#[xrecord(...)]` attribute that is attached to it.
    pub(crate) fn extract(ident: syn::Ident, field: &syn::Field, errors: &mut Vec<syn::Error>) -> Self {
        let mut data_role = Attribute::<bool>::new(DATA_ATTRIBUTE);
        let mut coord_role = Attribute::<bool>::new(COORD_ATTRIBUTE);
        let mut attr_role = Attribute::<bool>::new(ATTR_ATTRIBUTE);
        let mut name_role = Attribute::<bool>::new(NAME_ATTRIBUTE);
        let mut dims = Attribute::<Dims>::new(DIMS_ATTRIBUTE);
        let mut data_type = Attribute::<syn::Type>::new(DTYPE_ATTRIBUTE);
        let mut default = Attribute::<DefaultValue>::new(DEFAULT_ATTRIBUTE);

        for attr in field.attrs.iter().filter(|attr| attr.path() == &XRECORD_ATTRIBUTE) {
            attr.parse_nested_meta(|meta| match &meta.path {
                path if path == &DATA_ATTRIBUTE => data_role.set(&meta),
                path if path == &COORD_ATTRIBUTE => coord_role.set(&meta),
                path if path == &ATTR_ATTRIBUTE => attr_role.set(&meta),
                path if path == &NAME_ATTRIBUTE => name_role.set(&meta),
                path if path == &DIMS_ATTRIBUTE => dims.set(&meta),
                path if path == &DTYPE_ATTRIBUTE => data_type.set(&meta),
                path if path == &DEFAULT_ATTRIBUTE => default.set(&meta),
                path => Err(meta.error(format_args!(
                    "Invalid '#[xrecord(...)]' field attribute: '{}'. These are the attributes that are supported \
                    here: {}.",
                    quote::ToTokens::to_token_stream(path).to_string().replace(' ', ""),
                    symbol::join(&VALID_FIELD_ATTRIBUTES),
                ))),
            })
            .unwrap_or_else(|error| errors.push(error));
        }

        let roles = [&data_role, &coord_role, &attr_role, &name_role]
            .into_iter()
            .filter(|role| role.is_set())
            .collect::<Vec<_>>();
        if roles.len() > 1 {
            let names = roles.iter().map(|role| role.name()).collect::<Vec<_>>();
            roles.iter().skip(1).for_each(|role| {
                errors.push(syn::Error::new_spanned(
                    role.tokens(),
                    format!(
                        "Field '{ident}' has more than one xrecord role ({}). A field can have at most one role.",
                        symbol::join(&names),
                    ),
                ))
            });
        }

        let is_array = data_role.is_set() || coord_role.is_set();
        if !is_array {
            if dims.is_set() {
                errors.push(array_only_error(&dims));
            }
            if data_type.is_set() {
                errors.push(array_only_error(&data_type));
            }
        }

        let spec = ArraySpec { dims: dims.get().unwrap_or_default(), data_type: data_type.get() };
        let role = if data_role.is_set() {
            Some(FieldRole::Data(spec))
        } else if coord_role.is_set() {
            Some(FieldRole::Coord(spec))
        } else if attr_role.is_set() {
            Some(FieldRole::Attr)
        } else if name_role.is_set() {
            Some(FieldRole::Name)
        } else {
            None
        };

        Self { ident, ty: field.ty.clone(), role, default: default.get() }
    }

    /// Returns `true` if the generated `new` constructor takes this field as an argument.
    pub(crate) fn is_required(&self) -> bool {
        self.default.is_none()
    }

    pub(crate) fn is_data(&self) -> bool {
        matches!(self.role, Some(FieldRole::Data(_)))
    }

    pub(crate) fn is_name(&self) -> bool {
        matches!(self.role, Some(FieldRole::Name))
    }
}

fn array_only_error<V>(attribute: &Attribute<V>) -> syn::Error {
    syn::Error::new_spanned(
        attribute.tokens(),
        format!(
            "The xrecord '{}' attribute is only supported on {} fields.",
            attribute.name(),
            symbol::join(&[DATA_ATTRIBUTE, COORD_ATTRIBUTE]),
        ),
    )
}
