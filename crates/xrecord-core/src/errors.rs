use thiserror::Error;

use crate::types::array_type::{Shape, ShapeBroadcastingError};

#[derive(Error, Clone, Debug, PartialEq)]
pub enum Error {
    #[error("record has no data field")]
    MissingDataField,

    #[error("record has more than one data field: {}", names.join(", "))]
    MultipleDataFields { names: Vec<String> },

    #[error("record has more than one name field: {}", names.join(", "))]
    MultipleNameFields { names: Vec<String> },

    #[error("cannot label an array of shape `{shape}` with dimensions ({}): expected {} dimensions but got {}",
        dims.join(", "), dims.len(), shape.rank())]
    DimensionCountMismatch { dims: Vec<String>, shape: Shape },

    #[error("missing size for dimension '{dimension}'")]
    MissingDimensionSize { dimension: String },

    #[error("dimension '{dimension}' appears more than once in ({})", dims.join(", "))]
    DuplicateDimension { dimension: String, dims: Vec<String> },

    #[error("{0}")]
    ShapeBroadcasting(#[from] ShapeBroadcastingError),

    #[error("cannot allocate an array of shape `{shape}`: its number of elements overflows `isize`")]
    ShapeTooLarge { shape: Shape },

    #[error("ragged nested sequence: expected an element of shape `{expected}` but got one of shape `{actual}`")]
    RaggedSequence { expected: Shape, actual: Shape },

    #[error("conflicting sizes for dimension '{dimension}': {expected} vs {actual}")]
    ConflictingSizes { dimension: String, expected: usize, actual: usize },

    #[error("coordinate '{coordinate}' uses dimension '{dimension}' which its array does not have")]
    UnknownCoordinateDimension { coordinate: String, dimension: String },

    #[error("duplicate variable '{name}'")]
    DuplicateVariable { name: String },

    #[error("array backend error: {message}")]
    Backend { message: String },
}

impl From<ndarray::ShapeError> for Error {
    fn from(error: ndarray::ShapeError) -> Self {
        Self::Backend { message: error.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::MissingDataField.to_string(), "record has no data field");
        assert_eq!(
            Error::MultipleNameFields { names: vec!["a".to_string(), "b".to_string()] }.to_string(),
            "record has more than one name field: a, b",
        );
        assert_eq!(
            Error::DimensionCountMismatch {
                dims: vec!["x".to_string(), "y".to_string()],
                shape: Shape::scalar()
            }
            .to_string(),
            "cannot label an array of shape `[]` with dimensions (x, y): expected 2 dimensions but got 0",
        );
        assert_eq!(
            Error::MissingDimensionSize { dimension: "t".to_string() }.to_string(),
            "missing size for dimension 't'",
        );
        assert_eq!(
            Error::ShapeTooLarge { shape: Shape::new(vec![3, 2]) }.to_string(),
            "cannot allocate an array of shape `[3, 2]`: its number of elements overflows `isize`",
        );
    }

    #[test]
    fn test_error_from_shape_broadcasting_error() {
        let lhs = Shape::new(vec![2]);
        let rhs = Shape::new(vec![3]);
        let error: Error = ShapeBroadcastingError::Incompatible { lhs: lhs.clone(), rhs: rhs.clone() }.into();
        assert_eq!(error, Error::ShapeBroadcasting(ShapeBroadcastingError::Incompatible { lhs, rhs }));
        assert_eq!(error.to_string(), "Cannot broadcast shape `[2]` to shape `[3]`.");
    }
}
