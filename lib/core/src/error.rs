use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Connection error during {operation}: {message}")]
    Connection { operation: String, message: String },

    #[error("Query rejected during {operation}: {message}")]
    Query {
        operation: String,
        status: Option<u16>,
        message: String,
    },

    #[error("No row in {collection} where {field} = {value}")]
    NotFound {
        collection: String,
        field: String,
        value: String,
    },

    #[error("More than one row in {collection} where {field} = {value}")]
    Ambiguous {
        collection: String,
        field: String,
        value: String,
    },

    #[error("Required field missing: {0}")]
    MissingField(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn connection(operation: impl Into<String>, message: impl ToString) -> Self {
        Error::Connection {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    pub fn query(operation: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        Error::Query {
            operation: operation.into(),
            status,
            message: message.into(),
        }
    }
}
