//! Element types and shapes for labeled multi-dimensional arrays.
//!
//! This module provides the [`DataType`]s that array elements can have and the [`Shape`]s that arrays can take. It
//! implements [NumPy-like broadcasting semantics](https://numpy.org/doc/stable/user/basics.broadcasting.html) for
//! shapes and [JAX-like data type promotion rules](https://docs.jax.dev/en/latest/type_promotion.html) which are used
//! to pick the natural element type of nested sequences that mix different element types.

use std::fmt::Display;

use thiserror::Error;

/// Represents the primitive data types that can be stored in arrays, ranging from booleans to integers and
/// floating-point numbers of various precisions. Each [`DataType`] corresponds to exactly one Rust element type
/// (refer to [`Element`](crate::types::Element) for that mapping).
///
/// # Type Promotion
///
/// The data types form a hierarchy for type promotion when data of multiple types is mixed together (e.g., in a
/// nested sequence that contains both integers and floats). At a high level, type promotion is governed by the
/// following rules:
///
///   - [`DataType::Boolean`] can be promoted to any numeric type.
///   - Integer types can be promoted to wider integer types and floating-point types.
///   - Floating-point types can be promoted to wider floating-point types.
///
/// The type promotion logic is implemented in [`DataType::promotable_to`]. These rules only govern *automatic*
/// promotions. A declared element type always wins, and values are converted to it using unchecked casts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean [`DataType`] that represents `true`/`false` values but can be promoted to any other [`DataType`].
    Boolean,

    /// [`DataType`] that represents 8-bit signed integer values.
    Int8,

    /// [`DataType`] that represents 16-bit signed integer values.
    Int16,

    /// [`DataType`] that represents 32-bit signed integer values.
    Int32,

    /// [`DataType`] that represents 64-bit signed integer values.
    Int64,

    /// [`DataType`] that represents 8-bit unsigned integer values.
    UnsignedInt8,

    /// [`DataType`] that represents 16-bit unsigned integer values.
    UnsignedInt16,

    /// [`DataType`] that represents 32-bit unsigned integer values.
    UnsignedInt32,

    /// [`DataType`] that represents 64-bit unsigned integer values.
    UnsignedInt64,

    /// [`DataType`] that represents 16-bit "brain" floating-point values (S1E8M7). It has lower precision but higher
    /// dynamic range compared to [`DataType::Float16`], and neither of the two can be promoted to the other.
    BFloat16,

    /// [`DataType`] that represents 16-bit floating-point values following the
    /// [IEEE 754 standard](https://en.wikipedia.org/wiki/Half-precision_floating-point_format) (S1E5M10).
    Float16,

    /// [`DataType`] that represents 32-bit floating-point values following the
    /// [IEEE 754 standard](https://en.wikipedia.org/wiki/Single-precision_floating-point_format).
    Float32,

    /// [`DataType`] that represents 64-bit floating-point values following the
    /// [IEEE 754 standard](https://en.wikipedia.org/wiki/Double-precision_floating-point_format). This is the
    /// [`DataType`] that factory functions use when no other [`DataType`] is requested.
    Float64,
}

impl DataType {
    /// Constructs a new [`DataType`] that is the widest data type from the provided data types and which all of the
    /// provided data types can be promoted to.
    ///
    /// Note that this operation is *order-invariant* meaning that it will return the same [`DataType`] irrespective
    /// of the order in which the input [`DataType`]s are provided.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use xrecord_core::types::array_type::DataType;
    /// let x = DataType::Boolean;
    /// let y = DataType::UnsignedInt16;
    /// let z = DataType::Float32;
    ///
    /// assert_eq!(DataType::promoted(&[&x]), Ok(x));
    /// assert_eq!(DataType::promoted(&[&x, &y]), Ok(y));
    /// assert_eq!(DataType::promoted(&[&x, &z]), Ok(z));
    /// assert_eq!(DataType::promoted(&[&z, &y]), Ok(z));
    /// assert_eq!(DataType::promoted(&[&x, &y, &z]), Ok(z));
    /// ```
    pub fn promoted(data_types: &[&Self]) -> Result<Self, DataTypePromotionError> {
        let widest = data_types
            .iter()
            .copied()
            .reduce(|lhs, rhs| if lhs.promotable_to(rhs) { rhs } else { lhs })
            .ok_or(DataTypePromotionError::Empty)?;
        data_types.iter().try_fold(*widest, |rhs, lhs| match lhs.promotable_to(&rhs) {
            true => Ok(rhs),
            false => Err(DataTypePromotionError::Incompatible { lhs: **lhs, rhs }),
        })
    }

    /// Returns `true` if this [`DataType`] can be promoted to the provided [`DataType`]. Note that this function will
    /// always return `true` when `self == other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use xrecord_core::types::array_type::DataType;
    /// assert!(DataType::Int32.promotable_to(&DataType::Float64));
    /// assert!(DataType::UnsignedInt8.promotable_to(&DataType::Int16));
    /// assert!(!DataType::Float64.promotable_to(&DataType::Int32));
    /// ```
    #[inline]
    pub fn promotable_to(&self, other: &Self) -> bool {
        use DataType::*;
        match (self, other) {
            (Boolean, _) => true,
            (_, Boolean) => false,
            (Int8, UnsignedInt8 | UnsignedInt16 | UnsignedInt32 | UnsignedInt64) => false,
            (Int8, _) => true,
            (Int16, Int8 | UnsignedInt8 | UnsignedInt16 | UnsignedInt32 | UnsignedInt64) => false,
            (Int16, _) => true,
            (Int32, Int8 | Int16 | UnsignedInt8 | UnsignedInt16 | UnsignedInt32 | UnsignedInt64) => false,
            (Int32, _) => true,
            (Int64, Int8 | Int16 | Int32 | UnsignedInt8 | UnsignedInt16 | UnsignedInt32 | UnsignedInt64) => false,
            (Int64, _) => true,
            (UnsignedInt8, Int8) => false,
            (UnsignedInt8, _) => true,
            (UnsignedInt16, Int8 | Int16 | UnsignedInt8) => false,
            (UnsignedInt16, _) => true,
            (UnsignedInt32, Int8 | Int16 | Int32 | UnsignedInt8 | UnsignedInt16) => false,
            (UnsignedInt32, _) => true,
            (UnsignedInt64, Int8 | Int16 | Int32 | Int64 | UnsignedInt8 | UnsignedInt16 | UnsignedInt32) => false,
            (UnsignedInt64, _) => true,
            (BFloat16, BFloat16 | Float32 | Float64) => true,
            (BFloat16, _) => false,
            (Float16, Float16 | Float32 | Float64) => true,
            (Float16, _) => false,
            (Float32, Float32 | Float64) => true,
            (Float32, _) => false,
            (Float64, Float64) => true,
            (Float64, _) => false,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            DataType::Boolean => write!(f, "bool"),
            DataType::Int8 => write!(f, "i8"),
            DataType::Int16 => write!(f, "i16"),
            DataType::Int32 => write!(f, "i32"),
            DataType::Int64 => write!(f, "i64"),
            DataType::UnsignedInt8 => write!(f, "u8"),
            DataType::UnsignedInt16 => write!(f, "u16"),
            DataType::UnsignedInt32 => write!(f, "u32"),
            DataType::UnsignedInt64 => write!(f, "u64"),
            DataType::BFloat16 => write!(f, "bf16"),
            DataType::Float16 => write!(f, "f16"),
            DataType::Float32 => write!(f, "f32"),
            DataType::Float64 => write!(f, "f64"),
        }
    }
}

/// Error returned when a [`DataType`] cannot be promoted to another [`DataType`].
#[derive(Error, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DataTypePromotionError {
    /// Error returned when attempting to compute a promoted [`DataType`] for an empty collection
    /// of [`DataType`]s (i.e., using [`DataType::promoted`]).
    #[error("Cannot construct a promoted data type from an empty collection of data types.")]
    Empty,

    /// Error returned when a [`DataType`] promotion fails due to incompatible data types.
    #[error("Cannot promote type `{lhs}` to type `{rhs}`.")]
    Incompatible { lhs: DataType, rhs: DataType },
}

/// Represents the shape of an array (i.e., the number of dimensions in the array and the size of each dimension).
///
/// Note that the [`Display`] implementation of [`Shape`] renders shapes as the dimension sizes in a comma-separated
/// list surrounded by square brackets.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Shape {
    /// Sizes of the array dimensions ordered from outermost to innermost.
    pub dimensions: Vec<usize>,
}

impl Shape {
    /// Constructs a new [`Shape`] with the provided dimension sizes.
    #[inline]
    pub fn new(dimensions: Vec<usize>) -> Self {
        Self { dimensions }
    }

    /// Constructs a new scalar [`Shape`]. The resulting [`Shape::dimensions`] will be empty.
    #[inline]
    pub fn scalar() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the rank (i.e., the number of dimensions) of this [`Shape`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use xrecord_core::types::array_type::Shape;
    ///
    /// // Scalar.
    /// assert_eq!(Shape::scalar().rank(), 0);
    ///
    /// // Vector with 42 elements.
    /// assert_eq!(Shape::new(vec![42]).rank(), 1);
    ///
    /// // Matrix with 42 rows and 10 columns.
    /// assert_eq!(Shape::new(vec![42, 10]).rank(), 2);
    /// ```
    #[inline]
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Broadcasts this [`Shape`] to the provided [`Shape`] using
    /// [NumPy-like semantics](https://numpy.org/doc/stable/user/basics.broadcasting.html).
    ///
    /// Note that this operation is *not necessarily symmetric* meaning that `x.broadcast_to(y)` is not necessarily
    /// going to be equal `y.broadcast_to(x)` for all `x` and `y`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use xrecord_core::types::array_type::Shape;
    /// let w = Shape::new(vec![42, 42]);
    /// let x = Shape::scalar();
    /// let y = Shape::new(vec![10]);
    /// let z = Shape::new(vec![42, 10]);
    ///
    /// assert_eq!(x.broadcast_to(&x), Ok(x.clone()));
    /// assert_eq!(x.broadcast_to(&y), Ok(y.clone()));
    /// assert_eq!(x.broadcast_to(&z), Ok(z.clone()));
    /// assert!(z.broadcast_to(&y).is_err());
    /// assert_eq!(x.broadcast_to(&w), Ok(w.clone()));
    /// assert!(w.broadcast_to(&x).is_err());
    /// ```
    pub fn broadcast_to(&self, other: &Self) -> Result<Self, ShapeBroadcastingError> {
        if self.broadcastable_to(other) {
            Ok(other.clone())
        } else {
            Err(ShapeBroadcastingError::Incompatible { lhs: self.clone(), rhs: other.clone() })
        }
    }

    /// Returns `true` if this [`Shape`] can be broadcast to the provided [`Shape`], and `false` otherwise.
    /// Refer to the documentation of [`Shape::broadcast_to`] for more information on [`Shape`] broadcasting.
    pub fn broadcastable_to(&self, other: &Self) -> bool {
        if self.rank() > other.rank() {
            return false;
        }

        let offset = other.rank() - self.rank();
        other.dimensions.iter().enumerate().all(|(i, &rhs_size)| {
            let lhs_size = if i < offset { 1 } else { self.dimensions[i - offset] };
            lhs_size == 1 || lhs_size == rhs_size
        })
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.dimensions.iter().map(|dimension| dimension.to_string()).collect::<Vec<_>>().join(", "))
    }
}

impl From<Vec<usize>> for Shape {
    fn from(value: Vec<usize>) -> Self {
        Self::new(value)
    }
}

impl From<&[usize]> for Shape {
    fn from(value: &[usize]) -> Self {
        Self::new(value.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(value: [usize; N]) -> Self {
        Self::new(value.to_vec())
    }
}

/// Error returned when a [`Shape`] cannot be broadcast to another [`Shape`].
#[derive(Error, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShapeBroadcastingError {
    /// Error returned when a [`Shape`] broadcasting fails due to incompatible shapes.
    #[error("Cannot broadcast shape `{lhs}` to shape `{rhs}`.")]
    Incompatible { lhs: Shape, rhs: Shape },
}

#[cfg(test)]
mod tests {
    use super::*;

    use DataType::*;

    #[test]
    fn test_data_type_promoted() {
        assert_eq!(DataType::promoted(&[&Boolean]), Ok(Boolean));
        assert_eq!(DataType::promoted(&[&Boolean, &Float64]), Ok(Float64));
        assert_eq!(DataType::promoted(&[&Boolean, &Int8, &Float32]), Ok(Float32));
        assert_eq!(DataType::promoted(&[&Float32, &Int64, &BFloat16]), Ok(Float32));
        assert_eq!(DataType::promoted(&[&Float16, &BFloat16, &Float64]), Ok(Float64));
        assert_eq!(DataType::promoted(&[&UnsignedInt8, &Int16]), Ok(Int16));
        assert_eq!(DataType::promoted(&[&Int32, &Float64, &Int32]), Ok(Float64));

        assert!(DataType::promoted(&[]).is_err());
        assert!(DataType::promoted(&[&Float16, &BFloat16]).is_err());
        assert!(DataType::promoted(&[&Int8, &UnsignedInt8]).is_err());
    }

    #[test]
    fn test_data_type_promotable_to() {
        assert!(Boolean.promotable_to(&BFloat16));
        assert!(UnsignedInt8.promotable_to(&UnsignedInt8));
        assert!(UnsignedInt8.promotable_to(&Int64));
        assert!(Float16.promotable_to(&Float32));

        assert!(!UnsignedInt8.promotable_to(&Int8));
        assert!(!Int8.promotable_to(&Boolean));
        assert!(!Float32.promotable_to(&Int64));
        assert!(!BFloat16.promotable_to(&Float16));
    }

    #[test]
    fn test_data_type_to_string() {
        assert_eq!(Boolean.to_string(), "bool");
        assert_eq!(UnsignedInt16.to_string(), "u16");
        assert_eq!(Int64.to_string(), "i64");
        assert_eq!(BFloat16.to_string(), "bf16");
        assert_eq!(Float64.to_string(), "f64");
    }

    #[test]
    fn test_shape_broadcast_to() {
        let s0 = Shape::scalar();
        let s1 = Shape::new(vec![42, 4, 2]);
        let s2 = Shape::new(vec![4, 1]);
        let s3 = Shape::new(vec![10, 10]);
        let s4 = Shape::new(vec![10]);

        assert_eq!(s0.broadcast_to(&s1), Ok(s1.clone()));
        assert_eq!(s2.broadcast_to(&s1), Ok(s1.clone()));
        assert_eq!(s4.broadcast_to(&s3), Ok(s3.clone()));

        assert!(s1.broadcast_to(&s0).is_err());
        assert!(s1.broadcast_to(&s2).is_err());
        assert_eq!(
            s3.broadcast_to(&s4),
            Err(ShapeBroadcastingError::Incompatible { lhs: s3.clone(), rhs: s4.clone() }),
        );
    }

    #[test]
    fn test_shape_broadcastable_to() {
        let s0 = Shape::scalar();
        let s1 = Shape::new(vec![3, 5]);
        let s2 = Shape::new(vec![1, 5]);
        let s3 = Shape::new(vec![3]);

        assert!(s0.broadcastable_to(&s1));
        assert!(s2.broadcastable_to(&s1));
        assert!(!s3.broadcastable_to(&s1));
        assert!(!s1.broadcastable_to(&s2));
    }

    #[test]
    fn test_shape_to_string() {
        assert_eq!(Shape::scalar().to_string(), "[]");
        assert_eq!(Shape::new(vec![42, 4, 2]).to_string(), "[42, 4, 2]");
        assert_eq!(Shape::from([10, 10]).to_string(), "[10, 10]");
    }
}
