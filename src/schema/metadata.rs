//! Render-ready schema metadata.
//!
//! [`SchemaMetadata`] is the cached, immutable output of schema extraction: a
//! flattened, ordered view of a model's fields with labels resolved and
//! nested schemas pre-extracted. Downstream stages (dispatcher, layout
//! engine) consume metadata only; they never look at the raw
//! [`ModelSchema`](crate::ModelSchema) again.
//!
//! Descriptors hold pure metadata; rendered markup never appears here.

use std::sync::Arc;

use crate::domain::model::{ConstraintSpec, UiHints};

/// Immutable, ordered metadata for one model.
///
/// Field order is stable: declaration order, reordered only by explicit
/// `order` hints (stable sort, so equal weights keep declaration order).
/// Rebuilding metadata for the same model identity yields a structurally
/// equal tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaMetadata {
    /// Source model name.
    pub model_name: String,

    /// Source model version; together with the name, the cache identity.
    pub version: u64,

    /// Ordered field descriptors.
    pub fields: Vec<FieldDescriptor>,
}

impl SchemaMetadata {
    /// Looks up a field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True if the schema declares a field with the given name.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Iterates field names in render order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// Render-ready description of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name (unprefixed; scoping happens in the render context).
    pub name: String,

    /// Display label, resolved at extraction time.
    pub label: String,

    /// Semantic kind, with nested schemas already extracted.
    pub kind: FieldKind,

    /// Whether the field is required.
    pub required: bool,

    /// Constraints echoed into widget attributes.
    pub constraints: ConstraintSpec,

    /// Presentation hints.
    pub hints: UiHints,
}

/// Semantic field kinds after extraction.
///
/// Nested kinds reference child metadata behind `Arc` so the cached tree is
/// cheap to share across concurrent renders.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free-form text.
    Text,
    /// Numeric input.
    Number,
    /// True/false toggle.
    Boolean,
    /// Calendar date.
    Date,
    /// One value out of a fixed choice list.
    Enum {
        /// Allowed values in declaration order.
        choices: Vec<String>,
    },
    /// Nested sub-model.
    Nested {
        /// Pre-extracted child metadata.
        schema: Arc<SchemaMetadata>,
    },
    /// Repeatable list of nested sub-models.
    List {
        /// Pre-extracted item-template metadata.
        item: Arc<SchemaMetadata>,
        /// Minimum number of item blocks rendered.
        min_items: usize,
        /// Maximum number of item blocks accepted.
        max_items: usize,
    },
}

impl FieldKind {
    /// Default widget identifier for this kind, used when the field declares
    /// no explicit `element` hint.
    pub fn default_element(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Boolean => "checkbox",
            FieldKind::Date => "date",
            FieldKind::Enum { .. } => "select",
            // Nested kinds never reach the component registry.
            FieldKind::Nested { .. } | FieldKind::List { .. } => "text",
        }
    }
}
