// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application

/// Faults of the document accessor itself. Any of these means the page
/// collaborator is unusable and the whole extraction run fails; section-level
/// problems never surface here.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 Not Found, 403 Forbidden

    #[error("Snapshot unreadable: {0}")]
    Unreadable(String),
}

/// Section-level structural faults. Extractors prefer returning `Ok(None)`
/// for "section not present on this document version"; an `Err` marks a
/// genuinely unexpected condition, and the orchestrator treats both the same
/// way (the section slot becomes null, the run continues).
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Section '{section}' dispatched to the wrong extractor (expected {expected} shape)")]
    ShapeMismatch {
        section: &'static str,
        expected: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Page access failed: {0}")]
    Page(#[from] PageError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
