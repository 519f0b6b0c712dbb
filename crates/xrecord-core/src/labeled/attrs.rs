use std::fmt::Display;

use indexmap::IndexMap;

/// Arbitrary metadata attached to a [`DataArray`](crate::labeled::DataArray) or a
/// [`Dataset`](crate::labeled::Dataset), keyed by name and kept in insertion order.
pub type Attrs = IndexMap<String, AttrValue>;

/// Value of a metadata attribute. Attribute values are stored verbatim and are never turned into arrays.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Boolean(bool),
    Integer(i64),
    UnsignedInteger(u64),
    Float(f64),
    String(String),
    List(Vec<AttrValue>),
}

impl Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::UnsignedInteger(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
            Self::List(values) => {
                write!(f, "[{}]", values.iter().map(|value| value.to_string()).collect::<Vec<_>>().join(", "))
            }
        }
    }
}

macro_rules! impl_from_for_attr_value {
    ($variant:ident: $target:ty => $($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from_for_attr_value!(Boolean: bool => bool);
impl_from_for_attr_value!(Integer: i64 => i8, i16, i32, i64);
impl_from_for_attr_value!(UnsignedInteger: u64 => u8, u16, u32, u64);
impl_from_for_attr_value!(Float: f64 => f32, f64);
impl_from_for_attr_value!(String: String => String, &str);

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}
