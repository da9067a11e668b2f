//! Error types for the formweaver rendering pipeline.
//!
//! This module defines the centralized error type [`FormweaverError`] and a type
//! alias [`Result`] for convenient error handling throughout the crate. All
//! errors are implemented using the `thiserror` crate for automatic `Error`
//! trait implementation.
//!
//! # Severity Model
//!
//! Only caller-side mistakes in the form definition become errors: circular
//! nested-model references, recursion past the configured bound, layout
//! overrides naming unknown fields, or more submitted list items than the
//! declared cardinality allows. Everything that can be degraded gracefully
//! (an unknown widget, an unregistered theme variant, a missing optional UI
//! hint) is *not* an error; those paths log a low-severity `tracing` event
//! and fall back to a safe default.

use thiserror::Error;

/// The main error type for formweaver rendering operations.
///
/// This enum consolidates all error conditions that can occur while turning a
/// model description into markup, from schema extraction to layout
/// composition and worker-pool hand-off. Fatal variants indicate a
/// programming error in the form definition, not a runtime condition.
///
/// # Examples
///
/// ```
/// use formweaver::FormweaverError;
///
/// fn reject_cycle() -> Result<(), FormweaverError> {
///     Err(FormweaverError::Schema(
///         "circular nested-model reference: profile -> profile".to_string(),
///     ))
/// }
/// ```
#[derive(Debug, Error)]
pub enum FormweaverError {
    /// Schema extraction failed.
    ///
    /// Raised at extraction time for irreducible circular nested-model
    /// references or schemas nested deeper than the configured maximum.
    /// The model description must be fixed by the caller.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Layout composition referenced a field absent from the schema.
    ///
    /// Raised immediately during composition rather than silently dropped,
    /// since a silent drop produces forms missing fields without any signal.
    #[error("Layout error: {0}")]
    Layout(String),

    /// A model-list field received more submitted items than its declared
    /// maximum cardinality allows.
    #[error("Cardinality error: {0}")]
    Cardinality(String),

    /// Theme bundle parsing or loading failed.
    ///
    /// Occurs when a custom TOML theme bundle cannot be parsed. Theme
    /// *resolution* never fails; only explicit bundle loading can.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Model description parsing failed.
    ///
    /// Occurs when a TOML or JSON model description is malformed, or when
    /// render options are inconsistent (e.g. an unknown layout name).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Hand-off to the render worker pool failed.
    ///
    /// Occurs when the async bridge cannot deliver a render job to the pool,
    /// typically because the pool threads have shut down.
    #[error("Worker error: {0}")]
    Worker(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations (theme or model
    /// files). Automatically converts from `std::io::Error`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for formweaver operations.
///
/// This is a type alias for `std::result::Result<T, FormweaverError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, FormweaverError>;
