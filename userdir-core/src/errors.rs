use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirectoryError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Invalid page size: {0}, must be at least 1")]
    InvalidPageSize(u32),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
