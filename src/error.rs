use thiserror::Error;

#[derive(Debug, Error)]
pub enum AbookError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("invalid phone number: {value}")]
    InvalidPhone { value: String },

    #[error("invalid email address: {value}")]
    InvalidEmail { value: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: i64 },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AbookResult<T> = Result<T, AbookError>;
