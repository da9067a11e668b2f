//! Formweaver: schema-driven HTML form rendering.
//!
//! Formweaver turns declarative model descriptions into complete HTML forms:
//! - Cached schema metadata extraction with stable field ordering
//! - Pluggable input components resolved through a runtime registry
//! - Nested models and repeatable model lists with indexed input names
//! - Structural layouts: vertical, tabbed, accordion, grid, side-by-side
//! - Theme bundles (plain, Bootstrap 5/4, Material) with graceful fallback
//! - An async bridge producing byte-identical output over a worker pool
//!
//! # Architecture
//!
//! The crate follows a layered pipeline architecture:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Public API (lib.rs)                                │  ← render / render_async
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Schema Layer (schema/)                             │  ← Metadata extraction
//! │  - Cycle/depth validation                           │  ← LRU caching
//! │  - Label resolution, field ordering                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ UI Layer (ui/)            │   │ Layout Layer (layout/)    │
//! │ - Input components        │   │ - Node tree construction  │
//! │ - Field dispatch + chrome │   │ - Grouping heuristic      │
//! │ - Theme bundles           │   │ - Tab/accordion/grid      │
//! └───────────────────────────┘   └───────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Worker Layers                             │
//! │  - Model types, render context, errors (domain/)    │
//! │  - Async render pool and futures (worker/)          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Model descriptions, render context, error taxonomy
//! - [`schema`]: Metadata extraction with process-wide caching
//! - [`ui`]: Input components, field dispatch, themes, form assembly
//! - [`layout`]: Structural composition of dispatched fields
//! - [`worker`]: Asynchronous bridge over the synchronous pipeline
//! - [`observability`]: Optional tracing subscriber setup
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust
//! use formweaver::{render, FieldSpec, FieldType, ModelSchema, RenderOptions};
//! use serde_json::Map;
//! use std::collections::HashMap;
//!
//! let model = ModelSchema::new("contact")
//!     .with_field(FieldSpec::new("email", FieldType::Text).required())
//!     .with_field(FieldSpec::new("message", FieldType::Text));
//!
//! let html = render(&model, &Map::new(), &HashMap::new(), &RenderOptions::default()).unwrap();
//! assert!(html.contains(r#"name="email""#));
//! ```
//!
//! ## Themed, Tabbed Rendering
//!
//! ```rust
//! use formweaver::{render, FieldSpec, FieldType, LayoutKind, ModelSchema, RenderOptions};
//! use serde_json::Map;
//! use std::collections::HashMap;
//!
//! let model = ModelSchema::new("signup")
//!     .with_field(FieldSpec::new("username", FieldType::Text).required())
//!     .with_field(FieldSpec::new("email", FieldType::Text).required());
//!
//! let options = RenderOptions {
//!     framework: "bootstrap".to_string(),
//!     variant: Some("5".to_string()),
//!     layout: LayoutKind::Tabbed,
//!     ..RenderOptions::default()
//! };
//! let html = render(&model, &Map::new(), &HashMap::new(), &options).unwrap();
//! assert!(html.contains("nav-tabs"));
//! ```
//!
//! ## Asynchronous Rendering
//!
//! ```rust
//! use formweaver::{render_async, FieldSpec, FieldType, ModelSchema, RenderOptions};
//! use serde_json::Map;
//! use std::collections::HashMap;
//!
//! let model = ModelSchema::new("async_contact")
//!     .with_field(FieldSpec::new("email", FieldType::Text));
//!
//! let future = render_async(model, Map::new(), HashMap::new(), RenderOptions::default());
//! let html = futures_executor::block_on(future).unwrap();
//! assert!(html.contains(r#"name="email""#));
//! ```

pub mod domain;
pub mod layout;
pub mod observability;
pub mod schema;
pub mod ui;
pub mod worker;

use serde_json::{Map, Value};
use std::collections::HashMap;

pub use domain::{
    ConstraintSpec, FieldSpec, FieldType, FormweaverError, ModelSchema, RenderContext, Result,
    UiHints, DEFAULT_MAX_DEPTH,
};
pub use layout::{LayoutKind, LayoutNode, LayoutRenderer};
pub use ui::{InputComponent, ThemeDescriptor};
pub use worker::RenderFuture;

/// Per-call rendering options.
///
/// The defaults render a plain-themed vertical form posting to `#` with a
/// `Submit` button and the standard recursion bound.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Theme framework name (`"plain"`, `"bootstrap"`, `"material"`, ...).
    pub framework: String,

    /// Framework variant; `None` requests the framework default.
    pub variant: Option<String>,

    /// Top-level layout mode.
    pub layout: LayoutKind,

    /// Form `action` attribute.
    pub action: String,

    /// Form `method` attribute.
    pub method: String,

    /// Appends a collapsed inspection panel after the form.
    pub debug: bool,

    /// Submit button label; `None` omits the button.
    pub submit_label: Option<String>,

    /// Nesting depth bound for schemas and submitted data.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            framework: "plain".to_string(),
            variant: None,
            layout: LayoutKind::Vertical,
            action: "#".to_string(),
            method: "post".to_string(),
            debug: false,
            submit_label: Some("Submit".to_string()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Renders a complete HTML form for a model.
///
/// Deterministic: identical inputs always produce byte-identical markup.
/// Metadata extraction is cached process-wide by `(model.name,
/// model.version)`.
///
/// # Parameters
///
/// * `model` - The model description to render
/// * `values` - Submitted values to pre-fill, keyed by field name
/// * `errors` - Validation errors keyed by fully-prefixed field name
/// * `options` - Theme, layout, and shell options
///
/// # Errors
///
/// - [`FormweaverError::Schema`] for circular or over-deep model nesting
/// - [`FormweaverError::Cardinality`] for over-long model-list submissions
/// - [`FormweaverError::Layout`] for layout trees referencing unknown fields
pub fn render(
    model: &ModelSchema,
    values: &Map<String, Value>,
    errors: &HashMap<String, Vec<String>>,
    options: &RenderOptions,
) -> Result<String> {
    let metadata = schema::extract_bounded(model, options.max_depth)?;
    let theme = ui::theme::resolve(&options.framework, options.variant.as_deref());
    let ctx = RenderContext::new(
        values,
        errors,
        &theme,
        options.layout,
        options.debug,
        options.max_depth,
    );
    ui::renderer::render_form(
        &metadata,
        &ctx,
        &options.action,
        &options.method,
        options.submit_label.as_deref(),
    )
}

/// Renders a form on the shared worker pool.
///
/// Takes owned inputs so nothing is borrowed across the await point; the
/// resolved markup is byte-identical to what [`render`] produces for the
/// same inputs.
pub fn render_async(
    model: ModelSchema,
    values: Map<String, Value>,
    errors: HashMap<String, Vec<String>>,
    options: RenderOptions,
) -> RenderFuture {
    worker::render_async(model, values, errors, options)
}
