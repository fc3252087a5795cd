use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid requirement name: {0:?}")]
    InvalidRequirement(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
