#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Malformed record: expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("Malformed record field `{field}`: {reason}")]
    Malformed { field: &'static str, reason: String },
    #[error("Unknown {what}: {value}")]
    UnknownTag { what: &'static str, value: String },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
