//! Schema metadata extraction with process-wide caching.
//!
//! This module turns a [`ModelSchema`] description into a cached, render-ready
//! [`SchemaMetadata`] tree: labels resolved, fields ordered by hint weight,
//! nested schemas pre-extracted. Repeated calls for the same model identity
//! return the same cached tree without recomputation.
//!
//! # Failure at the Door
//!
//! A model with a circular nested-model reference, or one nested deeper than
//! the configured maximum, is rejected here with
//! [`FormweaverError::Schema`], never discovered later mid-render.
//!
//! # Example
//!
//! ```rust
//! use formweaver::{schema, FieldSpec, FieldType, ModelSchema};
//!
//! let model = ModelSchema::new("contact")
//!     .with_field(FieldSpec::new("email", FieldType::Text).required());
//!
//! let metadata = schema::extract(&model).unwrap();
//! assert_eq!(metadata.fields[0].label, "Email");
//! ```

pub mod cache;
pub mod metadata;

use std::sync::{Arc, OnceLock};

use crate::domain::context::DEFAULT_MAX_DEPTH;
use crate::domain::error::{FormweaverError, Result};
use crate::domain::model::{FieldSpec, FieldType, ModelSchema};

pub use cache::{MetadataCache, ModelKey};
pub use metadata::{FieldDescriptor, FieldKind, SchemaMetadata};

/// Capacity of the process-wide metadata cache.
const CACHE_CAPACITY: usize = 128;

/// Fields with no explicit `order` hint sort with this weight (i.e. last,
/// in declaration order among themselves).
const DEFAULT_ORDER_WEIGHT: u32 = 999;

static CACHE: OnceLock<MetadataCache> = OnceLock::new();

fn global_cache() -> &'static MetadataCache {
    CACHE.get_or_init(|| MetadataCache::new(CACHE_CAPACITY))
}

/// Extracts (cached) render-ready metadata for a model.
///
/// Cache identity is `(model.name, model.version)`; callers must bump the
/// version when a model's fields change at runtime.
///
/// # Errors
///
/// Returns [`FormweaverError::Schema`] for circular nested-model references
/// or nesting deeper than [`DEFAULT_MAX_DEPTH`].
pub fn extract(model: &ModelSchema) -> Result<Arc<SchemaMetadata>> {
    extract_bounded(model, DEFAULT_MAX_DEPTH)
}

/// [`extract`] with an explicit nesting bound.
///
/// # Errors
///
/// Same as [`extract`], with the supplied bound in place of the default.
pub fn extract_bounded(model: &ModelSchema, max_depth: usize) -> Result<Arc<SchemaMetadata>> {
    let key = ModelKey {
        name: model.name.clone(),
        version: model.version,
    };
    let metadata = global_cache().get_or_insert_with(&key, || {
        let mut ancestry = Vec::new();
        build_metadata(model, &mut ancestry, max_depth).map(Arc::new)
    })?;

    // The cache key carries no depth bound, so a tree cached under a looser
    // bound must be re-checked against the bound requested now.
    let depth = nesting_depth(&metadata);
    if depth > max_depth {
        return Err(FormweaverError::Schema(format!(
            "model nesting depth {depth} exceeds maximum depth {max_depth} at {}",
            metadata.model_name
        )));
    }
    Ok(metadata)
}

/// Number of nested-model levels below the top-level model (0 for a flat
/// schema).
fn nesting_depth(metadata: &SchemaMetadata) -> usize {
    metadata
        .fields
        .iter()
        .map(|field| match &field.kind {
            FieldKind::Nested { schema } => 1 + nesting_depth(schema),
            FieldKind::List { item, .. } => 1 + nesting_depth(item),
            _ => 0,
        })
        .max()
        .unwrap_or(0)
}

/// Clears the process-wide metadata cache (hot-reload/testing hook).
pub fn reset() {
    global_cache().clear();
}

/// Recursively builds the metadata tree, tracking the ancestry of model
/// names to reject cycles.
fn build_metadata(
    model: &ModelSchema,
    ancestry: &mut Vec<String>,
    max_depth: usize,
) -> Result<SchemaMetadata> {
    if ancestry.iter().any(|name| name == &model.name) {
        return Err(FormweaverError::Schema(format!(
            "circular nested-model reference: {} -> {}",
            ancestry.join(" -> "),
            model.name
        )));
    }
    // `ancestry` holds the models above this one, so its length is the
    // nesting level being entered. Matches the dispatcher's runtime check:
    // `max_depth` nested levels are allowed, one more is rejected.
    if ancestry.len() > max_depth {
        return Err(FormweaverError::Schema(format!(
            "model nesting exceeds maximum depth {max_depth} at {}",
            model.name
        )));
    }

    ancestry.push(model.name.clone());
    let mut fields = Vec::with_capacity(model.fields.len());
    for spec in &model.fields {
        fields.push(build_descriptor(spec, ancestry, max_depth)?);
    }
    ancestry.pop();

    // Stable sort: equal weights keep declaration order.
    fields.sort_by_key(|f| f.hints.order.unwrap_or(DEFAULT_ORDER_WEIGHT));

    Ok(SchemaMetadata {
        model_name: model.name.clone(),
        version: model.version,
        fields,
    })
}

fn build_descriptor(
    spec: &FieldSpec,
    ancestry: &mut Vec<String>,
    max_depth: usize,
) -> Result<FieldDescriptor> {
    let kind = match &spec.kind {
        FieldType::Text => FieldKind::Text,
        FieldType::Number => FieldKind::Number,
        FieldType::Boolean => FieldKind::Boolean,
        FieldType::Date => FieldKind::Date,
        FieldType::Enum { choices } => FieldKind::Enum {
            choices: choices.clone(),
        },
        FieldType::Model { schema } => FieldKind::Nested {
            schema: Arc::new(build_metadata(schema, ancestry, max_depth)?),
        },
        FieldType::ModelList {
            item,
            min_items,
            max_items,
        } => {
            if min_items > max_items {
                return Err(FormweaverError::Schema(format!(
                    "field '{}' declares min_items {} > max_items {}",
                    spec.name, min_items, max_items
                )));
            }
            FieldKind::List {
                item: Arc::new(build_metadata(item, ancestry, max_depth)?),
                min_items: *min_items,
                max_items: *max_items,
            }
        }
    };

    Ok(FieldDescriptor {
        name: spec.name.clone(),
        label: spec
            .label
            .clone()
            .unwrap_or_else(|| humanize_label(&spec.name)),
        kind,
        required: spec.required,
        constraints: spec.constraints.clone(),
        hints: spec.ui.clone(),
    })
}

/// Turns a `snake_case` field name into a title-cased label
/// (`"first_name"` → `"First Name"`).
fn humanize_label(field_name: &str) -> String {
    field_name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::UiHints;

    // Tests touching the global cache's identity guarantees serialize here
    // so a concurrent `reset()` cannot invalidate a ptr_eq assertion.
    static CACHE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn text_field(name: &str) -> FieldSpec {
        FieldSpec::new(name, FieldType::Text)
    }

    fn ordered(name: &str, order: u32) -> FieldSpec {
        FieldSpec::new(name, FieldType::Text).with_ui(UiHints {
            order: Some(order),
            ..UiHints::default()
        })
    }

    #[test]
    fn labels_are_humanized_unless_declared() {
        let model = ModelSchema::new("labels")
            .with_field(text_field("first_name"))
            .with_field(text_field("bio").with_label("About you"));

        let meta = extract(&model).unwrap();
        assert_eq!(meta.fields[0].label, "First Name");
        assert_eq!(meta.fields[1].label, "About you");
    }

    #[test]
    fn order_hints_reorder_while_ties_keep_declaration_order() {
        let model = ModelSchema::new("ordering")
            .with_field(ordered("last", 20))
            .with_field(ordered("first", 10))
            .with_field(text_field("tail_a"))
            .with_field(text_field("tail_b"));

        let meta = extract(&model).unwrap();
        let names: Vec<&str> = meta.field_names().collect();
        assert_eq!(names, ["first", "last", "tail_a", "tail_b"]);
    }

    #[test]
    fn same_identity_returns_cached_tree() {
        let _guard = CACHE_TEST_LOCK.lock().unwrap();
        let model = ModelSchema::new("cached").with_field(text_field("a"));
        let first = extract(&model).unwrap();
        let second = extract(&model).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[test]
    fn reset_rebuilds_structurally_equal_tree() {
        let _guard = CACHE_TEST_LOCK.lock().unwrap();
        let model = ModelSchema::new("reset_me").with_field(text_field("a"));
        let before = extract(&model).unwrap();
        reset();
        let after = extract(&model).unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before, after);
    }

    #[test]
    fn circular_reference_is_rejected_at_extraction() {
        // A model that nests a model of the same name is irreducibly circular.
        let inner = ModelSchema::new("node").with_field(text_field("leaf"));
        let model = ModelSchema::new("node").with_field(FieldSpec::new(
            "child",
            FieldType::Model { schema: inner },
        ));

        let err = extract(&model).unwrap_err();
        assert!(matches!(err, FormweaverError::Schema(_)));
        assert!(err.to_string().contains("circular"));
    }

    #[test]
    fn nesting_beyond_the_bound_is_rejected() {
        // chain: m0 nests m1 nests m2 ... deeper than the bound allows.
        let mut model = ModelSchema::new("m5").with_field(text_field("leaf"));
        for i in (0..5).rev() {
            model = ModelSchema::new(format!("m{i}")).with_field(FieldSpec::new(
                "child",
                FieldType::Model { schema: model },
            ));
        }

        let err = extract_bounded(&model, 3).unwrap_err();
        assert!(matches!(err, FormweaverError::Schema(_)));
        assert!(err.to_string().contains("depth"));
    }

    #[test]
    fn one_nested_level_fits_a_bound_of_one() {
        let child = ModelSchema::new("depth_one_child").with_field(text_field("leaf"));
        let model = ModelSchema::new("depth_one_root").with_field(FieldSpec::new(
            "child",
            FieldType::Model { schema: child },
        ));

        let meta = extract_bounded(&model, 1).unwrap();
        assert!(meta.has_field("child"));
    }

    #[test]
    fn cached_tree_is_rechecked_against_a_tighter_bound() {
        let inner = ModelSchema::new("depth_recheck_inner").with_field(text_field("leaf"));
        let middle = ModelSchema::new("depth_recheck_middle").with_field(FieldSpec::new(
            "inner",
            FieldType::Model { schema: inner },
        ));
        let model = ModelSchema::new("depth_recheck_outer").with_field(FieldSpec::new(
            "middle",
            FieldType::Model { schema: middle },
        ));

        // Warm the cache under the default bound, then tighten.
        extract(&model).unwrap();
        let err = extract_bounded(&model, 1).unwrap_err();
        assert!(matches!(err, FormweaverError::Schema(_)));
        assert!(err.to_string().contains("depth"));
        // A bound the tree fits still resolves from the cache.
        assert!(extract_bounded(&model, 2).is_ok());
    }

    #[test]
    fn inverted_cardinality_is_rejected() {
        let item = ModelSchema::new("item").with_field(text_field("x"));
        let model = ModelSchema::new("bad_bounds").with_field(FieldSpec::new(
            "items",
            FieldType::ModelList {
                item,
                min_items: 5,
                max_items: 2,
            },
        ));

        let err = extract(&model).unwrap_err();
        assert!(matches!(err, FormweaverError::Schema(_)));
    }
}
