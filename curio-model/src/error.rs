use std::fmt::{self, Display};

/// Errors produced by model constructors and conversion routines.
#[derive(Debug)]
pub enum ModelError {
    InvalidItemType(i64),
    InvalidLocationType(i64),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidItemType(value) => {
                write!(f, "invalid item type discriminant: {value}")
            }
            ModelError::InvalidLocationType(value) => {
                write!(f, "invalid location type discriminant: {value}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
