//! Per-field dispatch: metadata in, field markup out.
//!
//! The dispatcher walks field descriptors and produces one [`RenderedField`]
//! per field. Scalars resolve an input component through the registry and
//! get wrapped in theme chrome (label, help text, inline errors). Nested
//! models recurse with a dot-scoped derived context; model lists iterate
//! submitted items with indexed prefixes and add/remove affordances from the
//! active theme.
//!
//! Recursion depth is tracked in the render context and bounded, so a
//! pathological data/schema combination fails fast with a schema error
//! instead of overflowing the call stack.

use crate::domain::context::RenderContext;
use crate::domain::error::{FormweaverError, Result};
use crate::schema::metadata::{FieldDescriptor, FieldKind, SchemaMetadata};
use crate::ui::components::{self, FieldBinding};
use crate::ui::helpers::{dom_id, escape_html, fill};

/// One field's rendered markup.
///
/// Ephemeral: owned by the dispatcher, consumed by the layout engine,
/// discarded after composition.
#[derive(Debug, Clone)]
pub struct RenderedField {
    /// Unprefixed field name (the layout engine's leaf key).
    pub name: String,

    /// Complete field markup including chrome.
    pub markup: String,

    /// Whether the field rendered with at least one validation error.
    pub has_error: bool,
}

/// Renders one field in the given context.
///
/// # Errors
///
/// - [`FormweaverError::Schema`] when recursion would exceed the context's
///   depth bound.
/// - [`FormweaverError::Cardinality`] when a model-list field has more
///   submitted items than its declared maximum.
pub fn dispatch(field: &FieldDescriptor, ctx: &RenderContext<'_>) -> Result<RenderedField> {
    match &field.kind {
        FieldKind::Nested { schema } => dispatch_nested(field, schema, ctx),
        FieldKind::List {
            item,
            min_items,
            max_items,
        } => dispatch_list(field, item, *min_items, *max_items, ctx),
        _ => dispatch_scalar(field, ctx),
    }
}

/// Renders every field of a schema in order, vertically concatenated.
///
/// Shared by nested-model sections and list items, which always stack their
/// child fields vertically regardless of the top-level layout mode.
pub fn dispatch_all(metadata: &SchemaMetadata, ctx: &RenderContext<'_>) -> Result<Vec<RenderedField>> {
    metadata
        .fields
        .iter()
        .map(|field| dispatch(field, ctx))
        .collect()
}

fn dispatch_scalar(field: &FieldDescriptor, ctx: &RenderContext<'_>) -> Result<RenderedField> {
    let input_name = ctx.input_name(&field.name);
    let errors = ctx.errors_for(&field.name);
    let has_error = !errors.is_empty();

    let element = field
        .hints
        .element
        .as_deref()
        .unwrap_or_else(|| field.kind.default_element());
    let component = components::resolve(element);

    let binding = FieldBinding {
        id: dom_id(&input_name),
        input_name,
        value: ctx.value_of(&field.name),
        has_error,
        theme: ctx.theme,
    };
    let control = component.render(field, &binding);

    // Hidden fields carry no chrome at all.
    if field.hints.hidden || element == "hidden" {
        return Ok(RenderedField {
            name: field.name.clone(),
            markup: control,
            has_error,
        });
    }

    let markup = wrap_with_chrome(field, &binding.id, control, errors, ctx);
    Ok(RenderedField {
        name: field.name.clone(),
        markup,
        has_error,
    })
}

fn dispatch_nested(
    field: &FieldDescriptor,
    schema: &SchemaMetadata,
    ctx: &RenderContext<'_>,
) -> Result<RenderedField> {
    if ctx.at_max_depth() {
        return Err(depth_error(field, ctx));
    }

    let child_ctx = ctx.nested(&field.name);
    let children = dispatch_all(schema, &child_ctx)?;
    let body: String = children.into_iter().map(|c| c.markup).collect();

    let section = fill(
        ctx.theme.section(),
        &[("title", &escape_html(&field.label)), ("content", &body)],
    );

    let errors = ctx.errors_for(&field.name);
    let has_error = !errors.is_empty();
    let mut content = section;
    append_help_and_errors(&mut content, field, errors, ctx);

    Ok(RenderedField {
        name: field.name.clone(),
        markup: wrap_in_field(field, content, ctx),
        has_error,
    })
}

fn dispatch_list(
    field: &FieldDescriptor,
    item_schema: &SchemaMetadata,
    min_items: usize,
    max_items: usize,
    ctx: &RenderContext<'_>,
) -> Result<RenderedField> {
    if ctx.at_max_depth() {
        return Err(depth_error(field, ctx));
    }

    let input_name = ctx.input_name(&field.name);
    let submitted = ctx
        .value_of(&field.name)
        .and_then(serde_json::Value::as_array);
    let submitted_count = submitted.map_or(0, Vec::len);

    if submitted_count > max_items {
        return Err(FormweaverError::Cardinality(format!(
            "field '{input_name}' received {submitted_count} items but allows at most {max_items}"
        )));
    }

    // Blank blocks pad the render up to the declared minimum.
    let render_count = submitted_count.max(min_items);
    tracing::debug!(
        field = %input_name,
        submitted = submitted_count,
        rendered = render_count,
        "dispatching model list"
    );

    let mut items_markup = String::new();
    for index in 0..render_count {
        let item_value = submitted.and_then(|items| items.get(index));
        let item_ctx = ctx.indexed(&field.name, index, item_value);
        let children = dispatch_all(item_schema, &item_ctx)?;
        let body: String = children.into_iter().map(|c| c.markup).collect();

        let remove = fill(ctx.theme.remove_button(), &[("index", &index.to_string())]);
        items_markup.push_str(&fill(
            ctx.theme.list_item(),
            &[
                ("index", index.to_string().as_str()),
                ("number", (index + 1).to_string().as_str()),
                ("title", &escape_html(&item_schema.model_name)),
                ("remove", &remove),
                ("content", &body),
            ],
        ));
    }

    // The add affordance disappears once the list is at capacity.
    let controls = if render_count < max_items {
        fill(
            ctx.theme.add_button(),
            &[
                ("name", escape_html(&input_name).as_str()),
                ("label", &escape_html(&item_schema.model_name)),
            ],
        )
    } else {
        String::new()
    };

    let container = fill(
        ctx.theme.list_wrapper(),
        &[
            ("name", escape_html(&input_name).as_str()),
            ("id", &dom_id(&input_name)),
            ("min", &min_items.to_string()),
            ("max", &max_items.to_string()),
            ("items", &items_markup),
            ("controls", &controls),
        ],
    );

    let errors = ctx.errors_for(&field.name);
    let has_error = !errors.is_empty();
    let label = fill(
        ctx.theme.label(),
        &[
            ("for", dom_id(&input_name).as_str()),
            ("text", &escape_html(&field.label)),
            ("required", required_marker(field, ctx)),
        ],
    );
    let mut content = label;
    content.push_str(&container);
    append_help_and_errors(&mut content, field, errors, ctx);

    Ok(RenderedField {
        name: field.name.clone(),
        markup: wrap_in_field(field, content, ctx),
        has_error,
    })
}

fn depth_error(field: &FieldDescriptor, ctx: &RenderContext<'_>) -> FormweaverError {
    FormweaverError::Schema(format!(
        "recursion depth {} exceeded at field '{}'",
        ctx.max_depth,
        ctx.input_name(&field.name)
    ))
}

fn required_marker<'a>(field: &FieldDescriptor, ctx: &RenderContext<'a>) -> &'a str {
    if field.required {
        ctx.theme.required_marker()
    } else {
        ""
    }
}

/// Assembles label + control + help + errors inside the field wrapper.
fn wrap_with_chrome(
    field: &FieldDescriptor,
    id: &str,
    control: String,
    errors: &[String],
    ctx: &RenderContext<'_>,
) -> String {
    let label = fill(
        ctx.theme.label(),
        &[
            ("for", id),
            ("text", &escape_html(&field.label)),
            ("required", required_marker(field, ctx)),
        ],
    );
    let mut content = label;
    content.push_str(&control);
    append_help_and_errors(&mut content, field, errors, ctx);
    wrap_in_field(field, content, ctx)
}

fn append_help_and_errors(
    content: &mut String,
    field: &FieldDescriptor,
    errors: &[String],
    ctx: &RenderContext<'_>,
) {
    if let Some(help) = &field.hints.help_text {
        content.push_str(&fill(
            ctx.theme.help_text(),
            &[("text", escape_html(help).as_str())],
        ));
    }
    for message in errors {
        content.push_str(&fill(
            ctx.theme.error_block(),
            &[("message", escape_html(message).as_str())],
        ));
    }
}

fn wrap_in_field(field: &FieldDescriptor, content: String, ctx: &RenderContext<'_>) -> String {
    fill(
        ctx.theme.field_wrapper(),
        &[
            ("name", escape_html(&ctx.input_name(&field.name)).as_str()),
            ("content", &content),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FieldSpec, FieldType, ModelSchema, UiHints};
    use crate::layout::LayoutKind;
    use crate::schema;
    use crate::ui::theme;
    use serde_json::{json, Map, Value};
    use std::collections::HashMap;

    fn ctx_parts(values: Value) -> (Map<String, Value>, HashMap<String, Vec<String>>) {
        (
            values.as_object().cloned().unwrap_or_default(),
            HashMap::new(),
        )
    }

    fn item_model() -> ModelSchema {
        ModelSchema::new("Task")
            .with_field(FieldSpec::new("summary", FieldType::Text).required())
    }

    #[test]
    fn scalar_field_gets_label_control_and_error_chrome() {
        let model = ModelSchema::new("dispatch_scalar")
            .with_field(FieldSpec::new("email", FieldType::Text).required());
        let meta = schema::extract(&model).unwrap();
        let (values, _) = ctx_parts(json!({"email": "x@y.z"}));
        let mut errors = HashMap::new();
        errors.insert("email".to_string(), vec!["already taken".to_string()]);
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(&values, &errors, &theme, LayoutKind::Vertical, false, 8);

        let rendered = dispatch(&meta.fields[0], &ctx).unwrap();
        assert!(rendered.has_error);
        assert!(rendered.markup.contains(r#"<label for="email">Email"#));
        assert!(rendered.markup.contains(r#"value="x@y.z""#));
        assert!(rendered.markup.contains("already taken"));
    }

    #[test]
    fn hidden_hint_skips_chrome() {
        let model = ModelSchema::new("dispatch_hidden").with_field(
            FieldSpec::new("token", FieldType::Text).with_ui(UiHints {
                hidden: true,
                element: Some("hidden".to_string()),
                ..UiHints::default()
            }),
        );
        let meta = schema::extract(&model).unwrap();
        let (values, errors) = ctx_parts(json!({"token": "abc"}));
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(&values, &errors, &theme, LayoutKind::Vertical, false, 8);

        let rendered = dispatch(&meta.fields[0], &ctx).unwrap();
        assert!(rendered.markup.starts_with("<input"));
        assert!(!rendered.markup.contains("<label"));
    }

    #[test]
    fn nested_model_prefixes_child_inputs() {
        let child = ModelSchema::new("Profile")
            .with_field(FieldSpec::new("city", FieldType::Text));
        let model = ModelSchema::new("dispatch_nested")
            .with_field(FieldSpec::new("profile", FieldType::Model { schema: child }));
        let meta = schema::extract(&model).unwrap();
        let (values, errors) = ctx_parts(json!({"profile": {"city": "Oslo"}}));
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(&values, &errors, &theme, LayoutKind::Vertical, false, 8);

        let rendered = dispatch(&meta.fields[0], &ctx).unwrap();
        assert!(rendered.markup.contains(r#"name="profile.city""#));
        assert!(rendered.markup.contains(r#"value="Oslo""#));
        assert!(rendered.markup.contains("<legend>Profile</legend>"));
    }

    #[test]
    fn list_renders_submitted_items_with_indexed_names_and_add_affordance() {
        let model = ModelSchema::new("dispatch_list").with_field(FieldSpec::new(
            "items",
            FieldType::ModelList {
                item: item_model(),
                min_items: 1,
                max_items: 3,
            },
        ));
        let meta = schema::extract(&model).unwrap();
        let (values, errors) =
            ctx_parts(json!({"items": [{"summary": "one"}, {"summary": "two"}]}));
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(&values, &errors, &theme, LayoutKind::Vertical, false, 8);

        let rendered = dispatch(&meta.fields[0], &ctx).unwrap();
        assert!(rendered.markup.contains(r#"name="items[0].summary""#));
        assert!(rendered.markup.contains(r#"name="items[1].summary""#));
        assert!(!rendered.markup.contains(r#"name="items[2].summary""#));
        // Two of three allowed items: the add affordance is present.
        assert!(rendered.markup.contains("add-item-btn"));
        assert_eq!(rendered.markup.matches("remove-item-btn").count(), 2);
    }

    #[test]
    fn list_at_max_capacity_has_no_add_affordance() {
        let model = ModelSchema::new("dispatch_list_full").with_field(FieldSpec::new(
            "items",
            FieldType::ModelList {
                item: item_model(),
                min_items: 1,
                max_items: 2,
            },
        ));
        let meta = schema::extract(&model).unwrap();
        let (values, errors) =
            ctx_parts(json!({"items": [{"summary": "one"}, {"summary": "two"}]}));
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(&values, &errors, &theme, LayoutKind::Vertical, false, 8);

        let rendered = dispatch(&meta.fields[0], &ctx).unwrap();
        assert!(!rendered.markup.contains("add-item-btn"));
    }

    #[test]
    fn list_pads_blank_items_up_to_minimum() {
        let model = ModelSchema::new("dispatch_list_min").with_field(FieldSpec::new(
            "items",
            FieldType::ModelList {
                item: item_model(),
                min_items: 2,
                max_items: 5,
            },
        ));
        let meta = schema::extract(&model).unwrap();
        let (values, errors) = ctx_parts(json!({}));
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(&values, &errors, &theme, LayoutKind::Vertical, false, 8);

        let rendered = dispatch(&meta.fields[0], &ctx).unwrap();
        assert!(rendered.markup.contains(r#"name="items[0].summary""#));
        assert!(rendered.markup.contains(r#"name="items[1].summary""#));
    }

    #[test]
    fn too_many_items_is_a_cardinality_error() {
        let model = ModelSchema::new("dispatch_list_over").with_field(FieldSpec::new(
            "items",
            FieldType::ModelList {
                item: item_model(),
                min_items: 0,
                max_items: 1,
            },
        ));
        let meta = schema::extract(&model).unwrap();
        let (values, errors) =
            ctx_parts(json!({"items": [{"summary": "a"}, {"summary": "b"}]}));
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(&values, &errors, &theme, LayoutKind::Vertical, false, 8);

        let err = dispatch(&meta.fields[0], &ctx).unwrap_err();
        assert!(matches!(err, FormweaverError::Cardinality(_)));
    }

    #[test]
    fn recursion_past_the_context_bound_is_a_schema_error() {
        let child = ModelSchema::new("Inner").with_field(FieldSpec::new("leaf", FieldType::Text));
        let model = ModelSchema::new("dispatch_depth")
            .with_field(FieldSpec::new("inner", FieldType::Model { schema: child }));
        let meta = schema::extract(&model).unwrap();
        let (values, errors) = ctx_parts(json!({}));
        let theme = theme::resolve("plain", None);
        // A zero bound forbids the very first nested step.
        let ctx = RenderContext::new(&values, &errors, &theme, LayoutKind::Vertical, false, 0);

        let err = dispatch(&meta.fields[0], &ctx).unwrap_err();
        assert!(matches!(err, FormweaverError::Schema(_)));
    }

    #[test]
    fn unknown_element_hint_degrades_to_text() {
        let model = ModelSchema::new("dispatch_unknown_widget").with_field(
            FieldSpec::new("thing", FieldType::Text).with_ui(UiHints {
                element: Some("holo-projector".to_string()),
                ..UiHints::default()
            }),
        );
        let meta = schema::extract(&model).unwrap();
        let (values, errors) = ctx_parts(json!({}));
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(&values, &errors, &theme, LayoutKind::Vertical, false, 8);

        let rendered = dispatch(&meta.fields[0], &ctx).unwrap();
        assert!(rendered.markup.contains(r#"type="text""#));
    }
}
