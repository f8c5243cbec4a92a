use thiserror::Error;

/// A stitch stream that could not be turned into design geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Stitch {index}: missing {axis} coordinate")]
    MissingCoordinate { index: usize, axis: char },

    #[error("Stitch {index}: {axis} coordinate '{value}' is not a number")]
    InvalidCoordinate {
        index: usize,
        axis: char,
        value: String,
    },

    #[error("Stitch {index}: missing command code")]
    MissingCommand { index: usize },

    #[error("Stitch {index}: unrecognized command code {code}")]
    UnknownCommand { index: usize, code: String },

    #[error("Stitch {index}: entry is neither an array nor an object")]
    InvalidEntry { index: usize },

    #[error("Stitch stream unreadable: {0}")]
    Unreadable(String),
}

impl DecodeError {
    /// Position of the offending entry, when the failure is tied to one.
    pub fn index(&self) -> Option<usize> {
        match self {
            DecodeError::MissingCoordinate { index, .. }
            | DecodeError::InvalidCoordinate { index, .. }
            | DecodeError::MissingCommand { index }
            | DecodeError::UnknownCommand { index, .. }
            | DecodeError::InvalidEntry { index } => Some(*index),
            DecodeError::Unreadable(_) => None,
        }
    }
}

/// Job parameters or design inputs rejected before any arithmetic runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Quantity must be at least 1 (got {0})")]
    Quantity(u32),

    #[error("Active heads must be at least 1 (got {0})")]
    ActiveHeads(u32),

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("Markup factor must not be negative (got {0})")]
    MarkupFactor(f64),

    #[error("Productivity override must be a positive number (got {0})")]
    ProductivityOverride(f64),

    #[error("Color count must be at least 1 (got {0})")]
    ColorCount(u32),

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("Units per mm must be a positive finite number (got {0})")]
    UnitScale(f64),
}

/// A rate table that is structurally unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Rate '{key}' must not be negative (got {value})")]
    NegativeRate { key: String, value: f64 },

    #[error("Rate '{key}' must be a finite number")]
    NonFiniteRate { key: String },

    #[error("Rate '{key}' must be greater than zero")]
    ZeroRate { key: String },

    #[error("Unknown rate key '{0}'")]
    UnknownKey(String),
}

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Decode Error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Validation Error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type QuoteResult<T> = Result<T, QuoteError>;
