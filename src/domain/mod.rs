//! Core domain types: model descriptions, the render context, and errors.
//!
//! This layer has no knowledge of markup generation. It defines what a form
//! *is* (fields, types, constraints, hints), the immutable per-call context
//! threaded through the pipeline, and the crate-wide error taxonomy.

pub mod context;
pub mod error;
pub mod model;

pub use context::{RenderContext, DEFAULT_MAX_DEPTH};
pub use error::{FormweaverError, Result};
pub use model::{ConstraintSpec, FieldSpec, FieldType, ModelSchema, UiHints};
