//! Model descriptions: the caller-facing definition of a form.
//!
//! A [`ModelSchema`] describes the fields of a data model (names, semantic
//! types, constraints, and UI hints) without any rendered markup. It is the
//! sole input to the schema extraction layer and can be built in code or
//! loaded from TOML/JSON files.
//!
//! # Model Identity
//!
//! Extracted metadata is cached per model identity, which is the
//! `(name, version)` pair. Callers that change a model's fields at runtime
//! must bump `version` so the cache rebuilds; two descriptions sharing an
//! identity are assumed structurally identical.
//!
//! # TOML Format
//!
//! ```toml
//! name = "signup"
//! version = 1
//!
//! [[fields]]
//! name = "email"
//! required = true
//! [fields.kind]
//! type = "text"
//! [fields.ui]
//! element = "email"
//! placeholder = "you@example.com"
//! ```
//!
//! # Example
//!
//! ```rust
//! use formweaver::{FieldSpec, FieldType, ModelSchema};
//!
//! let model = ModelSchema::new("signup")
//!     .with_field(FieldSpec::new("email", FieldType::Text).required())
//!     .with_field(FieldSpec::new("age", FieldType::Number));
//! assert_eq!(model.fields.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::{FormweaverError, Result};

/// Declarative description of one data model.
///
/// Field declaration order is significant: it is preserved through extraction
/// and rendering, reordered only by explicit per-field `order` hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Model name; also the default title chrome for nested sections.
    pub name: String,

    /// Cache-busting version. Part of the model identity used as cache key.
    #[serde(default)]
    pub version: u64,

    /// Ordered field declarations.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl ModelSchema {
    /// Creates an empty model description with version 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: 0,
            fields: Vec::new(),
        }
    }

    /// Appends a field declaration, preserving declaration order.
    #[must_use]
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the cache-busting version.
    #[must_use]
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Parses a model description from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`FormweaverError::Config`] if the TOML is malformed or does
    /// not match the model description structure.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| FormweaverError::Config(format!("Failed to parse model TOML: {e}")))
    }

    /// Loads a model description from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FormweaverError::Io`] if the file cannot be read, or
    /// [`FormweaverError::Config`] if its contents are malformed.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a model description from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`FormweaverError::Config`] if the JSON is malformed.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| FormweaverError::Config(format!("Failed to parse model JSON: {e}")))
    }
}

/// Declaration of a single field within a [`ModelSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, used for input names, value lookup, and error lookup.
    pub name: String,

    /// Human-readable label. Defaults to the humanized field name.
    #[serde(default)]
    pub label: Option<String>,

    /// Semantic type of the field.
    pub kind: FieldType,

    /// Whether a value must be submitted for this field.
    #[serde(default)]
    pub required: bool,

    /// Validation constraints echoed into the markup.
    #[serde(default)]
    pub constraints: ConstraintSpec,

    /// Presentation hints; never affect validation semantics.
    #[serde(default)]
    pub ui: UiHints,
}

impl FieldSpec {
    /// Creates a field declaration with default constraints and hints.
    pub fn new(name: impl Into<String>, kind: FieldType) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
            required: false,
            constraints: ConstraintSpec::default(),
            ui: UiHints::default(),
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Replaces the constraint set.
    #[must_use]
    pub fn with_constraints(mut self, constraints: ConstraintSpec) -> Self {
        self.constraints = constraints;
        self
    }

    /// Replaces the UI hints.
    #[must_use]
    pub fn with_ui(mut self, ui: UiHints) -> Self {
        self.ui = ui;
        self
    }
}

/// Semantic field types supported by the pipeline.
///
/// Scalar kinds map to input widgets via the component registry; `Model` and
/// `ModelList` recurse into a child schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldType {
    /// Free-form text.
    Text,
    /// Numeric input.
    Number,
    /// True/false toggle.
    Boolean,
    /// Calendar date (values are opaque `YYYY-MM-DD` strings).
    Date,
    /// One value out of a fixed choice list.
    Enum {
        /// Allowed values, rendered in declaration order.
        choices: Vec<String>,
    },
    /// A nested sub-model rendered inline as a titled section.
    Model {
        /// Child model description.
        schema: ModelSchema,
    },
    /// A repeatable list of nested sub-models with add/remove affordances.
    ModelList {
        /// Item template description.
        item: ModelSchema,
        /// Minimum number of item blocks to render.
        #[serde(default)]
        min_items: usize,
        /// Maximum number of item blocks accepted.
        #[serde(default = "default_max_items")]
        max_items: usize,
    },
}

fn default_max_items() -> usize {
    10
}

/// Validation constraints echoed into widget attributes.
///
/// The pipeline never evaluates these; it only reflects them into markup
/// (`min`, `max`, `minlength`, `maxlength`, `pattern`, `step`). Rule
/// evaluation belongs to the external validation engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstraintSpec {
    /// Minimum numeric value.
    #[serde(default)]
    pub min: Option<f64>,

    /// Maximum numeric value.
    #[serde(default)]
    pub max: Option<f64>,

    /// Numeric step granularity.
    #[serde(default)]
    pub step: Option<f64>,

    /// Minimum text length.
    #[serde(default)]
    pub min_length: Option<usize>,

    /// Maximum text length.
    #[serde(default)]
    pub max_length: Option<usize>,

    /// Regular expression the value must match (echoed verbatim).
    #[serde(default)]
    pub pattern: Option<String>,
}

/// Presentation hints for one field.
///
/// A closed, validated structure rather than an open bag of keys: unknown
/// widget names funnel through a single documented fallback path (the plain
/// text component) instead of ad-hoc lookups scattered through the pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UiHints {
    /// Widget identifier resolved through the input component registry
    /// (e.g. `"textarea"`, `"email"`, `"range"`). Unset means "derive from
    /// the field kind".
    #[serde(default)]
    pub element: Option<String>,

    /// Short hint describing the expected value, shown inside the widget.
    #[serde(default)]
    pub placeholder: Option<String>,

    /// Longer help text rendered beneath the widget.
    #[serde(default)]
    pub help_text: Option<String>,

    /// Ordering weight; lower renders earlier. Unset sorts last (weight 999)
    /// while preserving declaration order among equals.
    #[serde(default)]
    pub order: Option<u32>,

    /// Explicit tab/accordion group title. The documented primary grouping
    /// path; when no field in a model declares one, a best-effort keyword
    /// heuristic applies.
    #[serde(default)]
    pub group: Option<String>,

    /// Render the field as a hidden input without chrome.
    #[serde(default)]
    pub hidden: bool,

    /// Render the widget disabled.
    #[serde(default)]
    pub disabled: bool,

    /// Render the widget read-only.
    #[serde(default)]
    pub readonly: bool,

    /// Name of a registered custom layout renderer that takes over this
    /// field's composition entirely.
    #[serde(default)]
    pub custom_renderer: Option<String>,
}
