use thiserror::Error;

use crate::rfc::ical::parse::ParseError;

/// RFC parsing and validation errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
