use regfield::RegisterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Register error: {0}")]
    Register(#[from] RegisterError),

    #[error("Field {name}: {source}")]
    Field {
        name: String,
        #[source]
        source: RegisterError,
    },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
