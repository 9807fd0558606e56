use thiserror::Error;

#[derive(Error, Debug)]
pub enum IslandsError {
    /// Interactive input that could not be understood
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type IslandsResult<T> = Result<T, IslandsError>;
