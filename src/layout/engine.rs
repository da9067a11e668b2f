//! Layout composition: a node tree in, one markup string out.
//!
//! The engine builds a [`LayoutNode`] tree for the requested layout mode
//! (honoring per-field `custom_renderer` overrides), then walks it bottom-up,
//! substituting each leaf with its dispatched markup and wrapping groups in
//! the active theme's tab/accordion/grid templates.
//!
//! # First Group Is Always Active
//!
//! Tabbed and accordion output marks the first group active/expanded in the
//! initial markup. A tab bar that renders with no visible panel until a
//! client-side switch is a known regression class; the engine never produces
//! that state.

use std::collections::HashMap;

use crate::domain::context::RenderContext;
use crate::domain::error::{FormweaverError, Result};
use crate::layout::custom;
use crate::layout::grouping;
use crate::layout::node::{LayoutKind, LayoutNode, Orientation};
use crate::schema::metadata::SchemaMetadata;
use crate::ui::dispatcher::RenderedField;
use crate::ui::helpers::{dom_id, escape_html, fill};

/// Builds the layout tree for a schema under the requested mode.
///
/// Fields whose hints declare a `custom_renderer` become [`LayoutNode::Custom`]
/// nodes in place; all other fields become leaves.
pub fn build_tree(layout: LayoutKind, metadata: &SchemaMetadata) -> LayoutNode {
    match layout {
        LayoutKind::Vertical => LayoutNode::Stack {
            children: field_nodes(metadata),
            orientation: Orientation::Vertical,
        },
        LayoutKind::Grid { columns } => LayoutNode::Grid {
            children: field_nodes(metadata),
            columns,
        },
        LayoutKind::SideBySide => {
            // Pair fields into two-column rows, last row possibly short.
            let nodes = field_nodes(metadata);
            let rows = nodes
                .chunks(2)
                .map(|pair| LayoutNode::Stack {
                    children: pair.to_vec(),
                    orientation: Orientation::Horizontal,
                })
                .collect();
            LayoutNode::Stack {
                children: rows,
                orientation: Orientation::Vertical,
            }
        }
        LayoutKind::Tabbed => LayoutNode::TabGroup {
            tabs: grouped_nodes(metadata),
        },
        LayoutKind::Accordion => LayoutNode::AccordionGroup {
            sections: grouped_nodes(metadata),
        },
    }
}

/// Composes the final body markup for a schema.
///
/// Convenience wrapper: builds the tree for `ctx.layout` and renders it.
///
/// # Errors
///
/// See [`compose_tree`].
pub fn compose(
    metadata: &SchemaMetadata,
    rendered: &[RenderedField],
    ctx: &RenderContext<'_>,
) -> Result<String> {
    let tree = build_tree(ctx.layout, metadata);
    compose_tree(&tree, metadata, rendered, ctx)
}

/// Renders a layout tree bottom-up against dispatched field markup.
///
/// Public so callers can supply hand-built trees; every leaf and custom node
/// is validated against the schema.
///
/// # Errors
///
/// Returns [`FormweaverError::Layout`] when a leaf or custom node references
/// a field name absent from the schema, or when a leaf has no dispatched
/// markup.
pub fn compose_tree(
    tree: &LayoutNode,
    metadata: &SchemaMetadata,
    rendered: &[RenderedField],
    ctx: &RenderContext<'_>,
) -> Result<String> {
    let by_name: HashMap<&str, &RenderedField> =
        rendered.iter().map(|f| (f.name.as_str(), f)).collect();
    render_node(tree, metadata, &by_name, ctx)
}

fn field_nodes(metadata: &SchemaMetadata) -> Vec<LayoutNode> {
    metadata
        .fields
        .iter()
        .map(|field| match &field.hints.custom_renderer {
            Some(renderer) => LayoutNode::Custom {
                renderer: renderer.clone(),
                field: field.name.clone(),
            },
            None => LayoutNode::Leaf(field.name.clone()),
        })
        .collect()
}

fn grouped_nodes(metadata: &SchemaMetadata) -> Vec<(String, Vec<LayoutNode>)> {
    grouping::group_fields(metadata)
        .into_iter()
        .map(|(title, fields)| {
            let nodes = fields
                .into_iter()
                .map(|field| match &field.hints.custom_renderer {
                    Some(renderer) => LayoutNode::Custom {
                        renderer: renderer.clone(),
                        field: field.name.clone(),
                    },
                    None => LayoutNode::Leaf(field.name.clone()),
                })
                .collect();
            (title, nodes)
        })
        .collect()
}

fn render_node(
    node: &LayoutNode,
    metadata: &SchemaMetadata,
    by_name: &HashMap<&str, &RenderedField>,
    ctx: &RenderContext<'_>,
) -> Result<String> {
    match node {
        LayoutNode::Leaf(name) => {
            if !metadata.has_field(name) {
                return Err(FormweaverError::Layout(format!(
                    "layout references unknown field '{name}'"
                )));
            }
            by_name
                .get(name.as_str())
                .map(|f| f.markup.clone())
                .ok_or_else(|| {
                    FormweaverError::Layout(format!(
                        "layout references field '{name}' with no rendered markup"
                    ))
                })
        }
        LayoutNode::Stack {
            children,
            orientation,
        } => {
            let parts = render_children(children, metadata, by_name, ctx)?;
            match orientation {
                Orientation::Vertical => Ok(parts.concat()),
                // A horizontal run renders as a one-row grid.
                Orientation::Horizontal => Ok(wrap_grid(parts, children.len().max(1), ctx)),
            }
        }
        LayoutNode::Grid { children, columns } => {
            let parts = render_children(children, metadata, by_name, ctx)?;
            Ok(wrap_grid(parts, (*columns).max(1), ctx))
        }
        LayoutNode::TabGroup { tabs } => render_tabs(tabs, metadata, by_name, ctx),
        LayoutNode::AccordionGroup { sections } => {
            render_accordion(sections, metadata, by_name, ctx)
        }
        LayoutNode::Custom { renderer, field } => render_custom(renderer, field, metadata, ctx),
    }
}

fn render_children(
    children: &[LayoutNode],
    metadata: &SchemaMetadata,
    by_name: &HashMap<&str, &RenderedField>,
    ctx: &RenderContext<'_>,
) -> Result<Vec<String>> {
    children
        .iter()
        .map(|child| render_node(child, metadata, by_name, ctx))
        .collect()
}

fn wrap_grid(parts: Vec<String>, columns: usize, ctx: &RenderContext<'_>) -> String {
    let cells: String = parts
        .into_iter()
        .map(|part| fill(ctx.theme.grid_cell(), &[("content", part.as_str())]))
        .collect();
    fill(
        ctx.theme.grid_wrapper(),
        &[
            ("columns", columns.to_string().as_str()),
            ("content", &cells),
        ],
    )
}

fn render_tabs(
    tabs: &[(String, Vec<LayoutNode>)],
    metadata: &SchemaMetadata,
    by_name: &HashMap<&str, &RenderedField>,
    ctx: &RenderContext<'_>,
) -> Result<String> {
    if tabs.is_empty() {
        return Ok(String::new());
    }

    let mut nav = String::new();
    let mut panels = String::new();
    for (index, (title, children)) in tabs.iter().enumerate() {
        let content = render_children(children, metadata, by_name, ctx)?.concat();
        let id = group_id(&ctx.prefix, title, index);
        // Index 0 is the initially visible tab; the output must never show
        // an empty pane on first render.
        let (tab_active, panel_active) = if index == 0 {
            (ctx.theme.tab_active(), ctx.theme.panel_active())
        } else {
            ("", "")
        };

        nav.push_str(&fill(
            ctx.theme.tab_button(),
            &[
                ("id", id.as_str()),
                ("target", &id),
                ("title", &escape_html(title)),
                ("active", tab_active),
            ],
        ));
        panels.push_str(&fill(
            ctx.theme.tab_panel(),
            &[
                ("id", id.as_str()),
                ("content", &content),
                ("active", panel_active),
            ],
        ));
    }

    Ok(fill(
        ctx.theme.tabs_wrapper(),
        &[("nav", nav.as_str()), ("panels", &panels)],
    ))
}

fn render_accordion(
    sections: &[(String, Vec<LayoutNode>)],
    metadata: &SchemaMetadata,
    by_name: &HashMap<&str, &RenderedField>,
    ctx: &RenderContext<'_>,
) -> Result<String> {
    if sections.is_empty() {
        return Ok(String::new());
    }

    let mut body = String::new();
    for (index, (title, children)) in sections.iter().enumerate() {
        let content = render_children(children, metadata, by_name, ctx)?.concat();
        let id = group_id(&ctx.prefix, title, index);
        let expanded = if index == 0 {
            ctx.theme.accordion_expanded()
        } else {
            ""
        };
        body.push_str(&fill(
            ctx.theme.accordion_section(),
            &[
                ("id", id.as_str()),
                ("title", &escape_html(title)),
                ("content", &content),
                ("expanded", expanded),
            ],
        ));
    }

    Ok(fill(
        ctx.theme.accordion_wrapper(),
        &[("content", body.as_str())],
    ))
}

fn render_custom(
    renderer: &str,
    field_name: &str,
    metadata: &SchemaMetadata,
    ctx: &RenderContext<'_>,
) -> Result<String> {
    let field = metadata.field(field_name).ok_or_else(|| {
        FormweaverError::Layout(format!(
            "custom layout node references unknown field '{field_name}'"
        ))
    })?;

    match custom::resolve_layout_renderer(renderer) {
        Some(handler) => Ok(handler.render(field, ctx.value_of(field_name), ctx)),
        None => {
            tracing::warn!(
                renderer,
                field = field_name,
                "unregistered custom layout renderer, emitting placeholder"
            );
            Ok(fill(
                ctx.theme.custom_placeholder(),
                &[
                    ("renderer", escape_html(renderer).as_str()),
                    ("name", &escape_html(field_name)),
                ],
            ))
        }
    }
}

/// Deterministic DOM id for a tab/accordion group.
fn group_id(prefix: &str, title: &str, index: usize) -> String {
    let slug = dom_id(&title.to_lowercase().replace(' ', "-"));
    if prefix.is_empty() {
        format!("fw-group-{index}-{slug}")
    } else {
        format!("{}fw-group-{index}-{slug}", dom_id(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FieldSpec, FieldType, ModelSchema, UiHints};
    use crate::schema;
    use crate::ui::dispatcher;
    use crate::ui::theme;
    use serde_json::Map;
    use std::collections::HashMap as StdHashMap;

    fn render_all(
        model: &ModelSchema,
        layout: LayoutKind,
    ) -> (std::sync::Arc<SchemaMetadata>, String) {
        let meta = schema::extract(model).unwrap();
        let values = Map::new();
        let errors = StdHashMap::new();
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(&values, &errors, &theme, layout, false, 8);
        let rendered = dispatcher::dispatch_all(&meta, &ctx).unwrap();
        let html = compose(&meta, &rendered, &ctx).unwrap();
        (meta, html)
    }

    #[test]
    fn vertical_layout_preserves_field_order() {
        let model = ModelSchema::new("engine_order")
            .with_field(FieldSpec::new("alpha", FieldType::Text))
            .with_field(FieldSpec::new("beta", FieldType::Text))
            .with_field(FieldSpec::new("gamma", FieldType::Text));
        let (_, html) = render_all(&model, LayoutKind::Vertical);

        let a = html.find(r#"name="alpha""#).unwrap();
        let b = html.find(r#"name="beta""#).unwrap();
        let c = html.find(r#"name="gamma""#).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn first_tab_is_active_with_content() {
        let model = ModelSchema::new("engine_tabs")
            .with_field(FieldSpec::new("username", FieldType::Text))
            .with_field(FieldSpec::new("email", FieldType::Text));
        let (_, html) = render_all(&model, LayoutKind::Tabbed);

        let first_panel = html.find("formweaver-tab-panel active").unwrap();
        let username = html.find(r#"name="username""#).unwrap();
        assert!(username > first_panel);
        // Exactly one active button and one active panel.
        assert_eq!(html.matches("formweaver-tab active").count(), 1);
        assert_eq!(html.matches("formweaver-tab-panel active").count(), 1);
    }

    #[test]
    fn accordion_expands_only_the_first_section() {
        let model = ModelSchema::new("engine_accordion")
            .with_field(FieldSpec::new("username", FieldType::Text))
            .with_field(FieldSpec::new("email", FieldType::Text))
            .with_field(FieldSpec::new("other_thing", FieldType::Text));
        let (_, html) = render_all(&model, LayoutKind::Accordion);
        assert_eq!(html.matches(" open").count(), 1);
        assert!(html.matches("formweaver-accordion-section").count() >= 2);
    }

    #[test]
    fn grid_flows_fields_into_cells() {
        let model = ModelSchema::new("engine_grid")
            .with_field(FieldSpec::new("a", FieldType::Text))
            .with_field(FieldSpec::new("b", FieldType::Text))
            .with_field(FieldSpec::new("c", FieldType::Text));
        let (_, html) = render_all(&model, LayoutKind::Grid { columns: 3 });
        assert!(html.contains("repeat(3,1fr)"));
        assert_eq!(html.matches("formweaver-grid-cell").count(), 3);
    }

    #[test]
    fn side_by_side_pairs_fields_into_rows() {
        let model = ModelSchema::new("engine_sbs")
            .with_field(FieldSpec::new("a", FieldType::Text))
            .with_field(FieldSpec::new("b", FieldType::Text))
            .with_field(FieldSpec::new("c", FieldType::Text));
        let (_, html) = render_all(&model, LayoutKind::SideBySide);
        // Two rows: (a, b) and (c).
        assert_eq!(html.matches("repeat(2,1fr)").count(), 1);
        assert_eq!(html.matches("repeat(1,1fr)").count(), 1);
    }

    #[test]
    fn dangling_leaf_is_a_layout_error() {
        let model =
            ModelSchema::new("engine_dangling").with_field(FieldSpec::new("a", FieldType::Text));
        let meta = schema::extract(&model).unwrap();
        let values = Map::new();
        let errors = StdHashMap::new();
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(&values, &errors, &theme, LayoutKind::Vertical, false, 8);
        let rendered = dispatcher::dispatch_all(&meta, &ctx).unwrap();

        let tree = LayoutNode::Stack {
            children: vec![LayoutNode::Leaf("missing".to_string())],
            orientation: Orientation::Vertical,
        };
        let err = compose_tree(&tree, &meta, &rendered, &ctx).unwrap_err();
        assert!(matches!(err, FormweaverError::Layout(_)));
    }

    #[test]
    fn unregistered_custom_renderer_emits_inert_placeholder() {
        let model = ModelSchema::new("engine_custom_missing").with_field(
            FieldSpec::new("widget", FieldType::Text).with_ui(UiHints {
                custom_renderer: Some("sparkline".to_string()),
                ..UiHints::default()
            }),
        );
        let (_, html) = render_all(&model, LayoutKind::Vertical);
        assert!(html.contains("formweaver-custom-placeholder"));
        assert!(html.contains(r#"data-renderer="sparkline""#));
    }
}
