/*!
 * Error types for the tslate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::translation::engine::RunReport;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised when a batch response fails length or emptiness validation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The decoded list does not match the requested batch length
    #[error("expected {expected} translations, got {actual}")]
    WrongCount {
        /// Number of entries the batch asked for
        expected: usize,
        /// Number of entries actually decoded
        actual: usize,
    },

    /// A decoded entry is blank
    #[error("empty translation received for entry #{}", .index + 1)]
    EmptyEntry {
        /// Zero-based position of the blank entry within the batch
        index: usize,
    },
}

/// Errors that can occur while reading or writing a .ts catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Underlying file I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML in the catalog file
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A structurally required element was missing
    #[error("Missing element: {0}")]
    MissingElement(String),
}

/// Errors that can occur during a translation run
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error decoding a batch response
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A batch failed every allowed attempt; the run is aborted
    #[error("batch {batch_index} failed after {attempts} attempts, aborting run")]
    RetriesExhausted {
        /// Total attempts made on the failing batch
        attempts: u32,
        /// Zero-based index of the batch that exhausted its retries
        batch_index: usize,
        /// Snapshot of run progress at the moment of the abort
        report: RunReport,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from catalog processing
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
