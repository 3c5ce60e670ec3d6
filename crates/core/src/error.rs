use crate::validate::ValidityError;
use thiserror::Error;
use xrefscope_api::ApiError;
use xrefscope_api::models::Specifier;

#[derive(Error, Debug)]
pub enum XrefError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record error: {0}")]
    Record(#[from] ApiError),
    #[error("Invalid occurrence: {0}")]
    Invalid(#[from] ValidityError),
    #[error("Entity `{name}` is bound to specifier {bound} but received a {offered} occurrence")]
    SpecifierCollision {
        name: String,
        bound: Specifier,
        offered: Specifier,
    },
    #[error("Parser error in {unit}: {message}")]
    Parser { unit: String, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, XrefError>;
