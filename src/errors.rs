//! Unified application error type.
//! All modules (db, core, source, cli) return AppError so that a run-level
//! failure always reaches main() the same way.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Input spreadsheet
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Unsupported input file: {0}")]
    UnsupportedInput(String),

    #[error("Required column '{column}' not found in sheet header")]
    MissingColumn { column: String },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Reference data
    // ---------------------------
    #[error("Reference data error: {0}")]
    Reference(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid batch size {0}: must be between 1 and {max}", max = crate::core::batch::MAX_BATCH_SIZE)]
    InvalidBatchSize(usize),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<calamine::Error> for AppError {
    fn from(e: calamine::Error) -> Self {
        AppError::Spreadsheet(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
