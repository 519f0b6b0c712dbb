use std::fmt::Display;

use half::{bf16, f16};
use ndarray::ArrayD;

use crate::array::ArrayData;

use super::array_type::DataType;

/// Rust type that can be stored as an element of an [`ArrayData`].
///
/// Every [`Element`] corresponds to exactly one [`DataType`]. Conversions between element types follow unchecked
/// casting semantics: floats are truncated when converted to integers, integers wrap when narrowed, and any value
/// converted to `bool` becomes `true` exactly when it is non-zero.
pub trait Element: Copy + Clone + Default + PartialEq + Send + Sync + std::fmt::Debug + 'static {
    /// [`DataType`] that corresponds to this element type.
    const DATA_TYPE: DataType;

    /// Value of this type that is used to fill arrays created with [`ArrayData::ones`].
    fn one() -> Self;

    /// Wraps this value into a dynamically typed [`Scalar`].
    fn into_scalar(self) -> Scalar;

    /// Converts the provided [`Scalar`] into this element type.
    fn from_scalar(scalar: Scalar) -> Self;

    /// Wraps the provided array into a dynamically typed [`ArrayData`].
    fn into_array_data(array: ArrayD<Self>) -> ArrayData;

    /// Returns a reference to the underlying array if `data` stores elements of this type.
    fn array(data: &ArrayData) -> Option<&ArrayD<Self>>;

    /// Converts the provided [`ArrayData`] into an array of this element type, casting elements if needed.
    fn from_array_data(data: ArrayData) -> ArrayD<Self>;
}

/// Dynamically typed scalar value that can be converted to any [`Element`] type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UnsignedInt8(u8),
    UnsignedInt16(u16),
    UnsignedInt32(u32),
    UnsignedInt64(u64),
    BFloat16(bf16),
    Float16(f16),
    Float32(f32),
    Float64(f64),
}

impl Scalar {
    /// Returns the [`DataType`] of this scalar.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Boolean(_) => DataType::Boolean,
            Self::Int8(_) => DataType::Int8,
            Self::Int16(_) => DataType::Int16,
            Self::Int32(_) => DataType::Int32,
            Self::Int64(_) => DataType::Int64,
            Self::UnsignedInt8(_) => DataType::UnsignedInt8,
            Self::UnsignedInt16(_) => DataType::UnsignedInt16,
            Self::UnsignedInt32(_) => DataType::UnsignedInt32,
            Self::UnsignedInt64(_) => DataType::UnsignedInt64,
            Self::BFloat16(_) => DataType::BFloat16,
            Self::Float16(_) => DataType::Float16,
            Self::Float32(_) => DataType::Float32,
            Self::Float64(_) => DataType::Float64,
        }
    }

    /// Returns this scalar as an `f64`.
    pub fn to_f64(&self) -> f64 {
        match *self {
            Self::Boolean(value) => u8::from(value) as f64,
            Self::Int8(value) => value as f64,
            Self::Int16(value) => value as f64,
            Self::Int32(value) => value as f64,
            Self::Int64(value) => value as f64,
            Self::UnsignedInt8(value) => value as f64,
            Self::UnsignedInt16(value) => value as f64,
            Self::UnsignedInt32(value) => value as f64,
            Self::UnsignedInt64(value) => value as f64,
            Self::BFloat16(value) => value.to_f64(),
            Self::Float16(value) => value.to_f64(),
            Self::Float32(value) => value as f64,
            Self::Float64(value) => value,
        }
    }

    /// Returns this scalar as an `i128`. Floating-point values are truncated towards zero (saturating at the bounds
    /// of `i128` and mapping NaN to zero).
    pub fn to_i128(&self) -> i128 {
        match *self {
            Self::Boolean(value) => i128::from(value),
            Self::Int8(value) => i128::from(value),
            Self::Int16(value) => i128::from(value),
            Self::Int32(value) => i128::from(value),
            Self::Int64(value) => i128::from(value),
            Self::UnsignedInt8(value) => i128::from(value),
            Self::UnsignedInt16(value) => i128::from(value),
            Self::UnsignedInt32(value) => i128::from(value),
            Self::UnsignedInt64(value) => i128::from(value),
            Self::BFloat16(_) | Self::Float16(_) | Self::Float32(_) | Self::Float64(_) => self.to_f64() as i128,
        }
    }

    /// Returns `true` if this scalar is not equal to zero.
    pub fn is_nonzero(&self) -> bool {
        match *self {
            Self::Boolean(value) => value,
            Self::BFloat16(_) | Self::Float16(_) | Self::Float32(_) | Self::Float64(_) => self.to_f64() != 0.0,
            _ => self.to_i128() != 0,
        }
    }

    /// Converts this scalar to the provided [`DataType`] using unchecked casting semantics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use xrecord_core::types::{DataType, Scalar};
    /// assert_eq!(Scalar::Float64(2.7).cast(DataType::Int32), Scalar::Int32(2));
    /// assert_eq!(Scalar::Int64(0).cast(DataType::Boolean), Scalar::Boolean(false));
    /// assert_eq!(Scalar::Int32(100).cast(DataType::Float64), Scalar::Float64(100.0));
    /// ```
    pub fn cast(self, data_type: DataType) -> Scalar {
        if self.data_type() == data_type {
            return self;
        }
        match data_type {
            DataType::Boolean => Self::Boolean(bool::from_scalar(self)),
            DataType::Int8 => Self::Int8(i8::from_scalar(self)),
            DataType::Int16 => Self::Int16(i16::from_scalar(self)),
            DataType::Int32 => Self::Int32(i32::from_scalar(self)),
            DataType::Int64 => Self::Int64(i64::from_scalar(self)),
            DataType::UnsignedInt8 => Self::UnsignedInt8(u8::from_scalar(self)),
            DataType::UnsignedInt16 => Self::UnsignedInt16(u16::from_scalar(self)),
            DataType::UnsignedInt32 => Self::UnsignedInt32(u32::from_scalar(self)),
            DataType::UnsignedInt64 => Self::UnsignedInt64(u64::from_scalar(self)),
            DataType::BFloat16 => Self::BFloat16(bf16::from_scalar(self)),
            DataType::Float16 => Self::Float16(f16::from_scalar(self)),
            DataType::Float32 => Self::Float32(f32::from_scalar(self)),
            DataType::Float64 => Self::Float64(f64::from_scalar(self)),
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Int8(value) => write!(f, "{value}"),
            Self::Int16(value) => write!(f, "{value}"),
            Self::Int32(value) => write!(f, "{value}"),
            Self::Int64(value) => write!(f, "{value}"),
            Self::UnsignedInt8(value) => write!(f, "{value}"),
            Self::UnsignedInt16(value) => write!(f, "{value}"),
            Self::UnsignedInt32(value) => write!(f, "{value}"),
            Self::UnsignedInt64(value) => write!(f, "{value}"),
            Self::BFloat16(value) => write!(f, "{value}"),
            Self::Float16(value) => write!(f, "{value}"),
            Self::Float32(value) => write!(f, "{value}"),
            Self::Float64(value) => write!(f, "{value}"),
        }
    }
}

macro_rules! impl_element {
    ($ty:ty, $variant:ident, one = $one:expr, from = |$scalar:ident| $from_scalar:expr) => {
        impl Element for $ty {
            const DATA_TYPE: DataType = DataType::$variant;

            #[inline]
            fn one() -> Self {
                $one
            }

            #[inline]
            fn into_scalar(self) -> Scalar {
                Scalar::$variant(self)
            }

            #[inline]
            fn from_scalar($scalar: Scalar) -> Self {
                match $scalar {
                    Scalar::$variant(value) => value,
                    _ => $from_scalar,
                }
            }

            #[inline]
            fn into_array_data(array: ArrayD<Self>) -> ArrayData {
                ArrayData::$variant(array)
            }

            #[inline]
            fn array(data: &ArrayData) -> Option<&ArrayD<Self>> {
                match data {
                    ArrayData::$variant(array) => Some(array),
                    _ => None,
                }
            }

            fn from_array_data(data: ArrayData) -> ArrayD<Self> {
                match data {
                    ArrayData::$variant(array) => array,
                    data => crate::array::with_array!(data, array => {
                        array.mapv(|value| Self::from_scalar(value.into_scalar()))
                    }),
                }
            }
        }

        impl From<$ty> for Scalar {
            fn from(value: $ty) -> Self {
                Scalar::$variant(value)
            }
        }
    };
}

impl_element!(bool, Boolean, one = true, from = |scalar| scalar.is_nonzero());
impl_element!(i8, Int8, one = 1, from = |scalar| scalar.to_i128() as i8);
impl_element!(i16, Int16, one = 1, from = |scalar| scalar.to_i128() as i16);
impl_element!(i32, Int32, one = 1, from = |scalar| scalar.to_i128() as i32);
impl_element!(i64, Int64, one = 1, from = |scalar| scalar.to_i128() as i64);
impl_element!(u8, UnsignedInt8, one = 1, from = |scalar| scalar.to_i128() as u8);
impl_element!(u16, UnsignedInt16, one = 1, from = |scalar| scalar.to_i128() as u16);
impl_element!(u32, UnsignedInt32, one = 1, from = |scalar| scalar.to_i128() as u32);
impl_element!(u64, UnsignedInt64, one = 1, from = |scalar| scalar.to_i128() as u64);
impl_element!(bf16, BFloat16, one = bf16::ONE, from = |scalar| bf16::from_f64(scalar.to_f64()));
impl_element!(f16, Float16, one = f16::ONE, from = |scalar| f16::from_f64(scalar.to_f64()));
impl_element!(f32, Float32, one = 1.0, from = |scalar| scalar.to_f64() as f32);
impl_element!(f64, Float64, one = 1.0, from = |scalar| scalar.to_f64());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_data_type() {
        assert_eq!(Scalar::from(true).data_type(), DataType::Boolean);
        assert_eq!(Scalar::from(100i64).data_type(), DataType::Int64);
        assert_eq!(Scalar::from(3u16).data_type(), DataType::UnsignedInt16);
        assert_eq!(Scalar::from(f16::from_f32(0.5)).data_type(), DataType::Float16);
        assert_eq!(Scalar::from(0.5f64).data_type(), DataType::Float64);
    }

    #[test]
    fn test_scalar_cast() {
        assert_eq!(Scalar::Float64(-2.7).cast(DataType::Int64), Scalar::Int64(-2));
        assert_eq!(Scalar::Float32(0.25).cast(DataType::Boolean), Scalar::Boolean(true));
        assert_eq!(Scalar::Int32(0).cast(DataType::Boolean), Scalar::Boolean(false));
        assert_eq!(Scalar::Boolean(true).cast(DataType::Float32), Scalar::Float32(1.0));
        assert_eq!(Scalar::Int16(300).cast(DataType::UnsignedInt8), Scalar::UnsignedInt8(44));
        assert_eq!(Scalar::Int8(-1).cast(DataType::UnsignedInt16), Scalar::UnsignedInt16(u16::MAX));
        assert_eq!(Scalar::Float64(1.5).cast(DataType::BFloat16), Scalar::BFloat16(bf16::from_f64(1.5)));
        assert_eq!(Scalar::Int64(7).cast(DataType::Int64), Scalar::Int64(7));
    }

    #[test]
    fn test_element_from_scalar() {
        assert_eq!(f64::from_scalar(Scalar::Int32(100)), 100.0);
        assert_eq!(i32::from_scalar(Scalar::Float64(9.99)), 9);
        assert_eq!(u8::from_scalar(Scalar::Float64(-1.0)), u8::MAX);
        assert!(bool::from_scalar(Scalar::UnsignedInt64(2)));
    }

    #[test]
    fn test_element_one() {
        assert!(bool::one());
        assert_eq!(i16::one(), 1);
        assert_eq!(f16::one(), f16::from_f32(1.0));
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(Scalar::Boolean(false).to_string(), "false");
        assert_eq!(Scalar::Int64(100).to_string(), "100");
        assert_eq!(Scalar::Float64(0.5).to_string(), "0.5");
    }
}
