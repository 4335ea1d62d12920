use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IncomeStatementError {
    #[error("Validation error on {field}: {details}")]
    Validation { field: String, details: String },

    #[error("Could not parse date '{input}': {details}")]
    Parse { input: String, details: String },

    #[error("Income statement identity violated for {identity}: expected {expected}, found {actual}")]
    IdentityViolation {
        identity: String,
        expected: Decimal,
        actual: Decimal,
    },

    #[error("Arithmetic overflow while computing {0}")]
    Overflow(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IncomeStatementError {
    pub fn validation(field: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            details: details.into(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for IncomeStatementError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        match err {
            rust_xlsxwriter::XlsxError::IoError(io) => Self::Io(io),
            other => Self::Workbook(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, IncomeStatementError>;
