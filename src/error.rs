//! Error model for the edges of the crate.
//! The policy algebra itself is total; errors only come from decoding records,
//! validating user parameters, and driving the policy tool.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid user type: {0}")]
    InvalidUserType(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("usage: {0}")]
    Usage(String),
}

impl Error {
    pub fn code_str(&self) -> &'static str {
        match self {
            Error::InvalidUserType(_) => "invalid_user_type",
            Error::MissingField(_) => "missing_field",
            Error::Json(_) => "json_error",
            Error::Io(_) => "io_error",
            Error::Usage(_) => "usage",
        }
    }

    pub fn usage<S: Into<String>>(msg: S) -> Self { Error::Usage(msg.into()) }
}

pub type Result<T> = std::result::Result<T, Error>;
