//! Errors raised while turning user input into orders and settings.
//!
//! The packing core itself never fails; these cover the edges around it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("no size like WxL found in '{text}'")]
    InvalidSize { text: String },

    #[error("column '{column}' not found in sheet header")]
    MissingColumn { column: String },

    #[error("dimensions must be positive, got {width}x{length}")]
    NonPositiveDimension { width: f64, length: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
