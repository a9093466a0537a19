use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserqlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid user ID: {0}")]
    InvalidId(String),

    #[error("Field cannot be null: {0}")]
    NullField(&'static str),

    #[error("Unsupported database URL: {0}")]
    UnsupportedDatabase(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, UserqlError>;
