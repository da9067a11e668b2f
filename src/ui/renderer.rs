//! Full-form assembly: metadata + context in, one HTML document fragment out.
//!
//! The renderer owns the outermost shell only. It opens the form with the
//! theme's wrapper, hands the field body to the layout engine, appends the
//! optional submit control, and closes the form. With the context's debug
//! flag set, a collapsed inspection panel follows the form.
//!
//! Output is deterministic: the same metadata, values, errors, theme, and
//! layout always produce byte-identical markup.

use serde_json::json;

use crate::domain::context::RenderContext;
use crate::domain::error::Result;
use crate::layout::engine;
use crate::schema::metadata::SchemaMetadata;
use crate::ui::dispatcher;
use crate::ui::helpers::{escape_html, fill};

/// Renders the complete form for one model.
///
/// `submit_label` controls the trailing submit button: `Some(label)` renders
/// the theme's submit control, `None` omits it (for callers embedding the
/// form in a larger page with their own controls).
///
/// # Errors
///
/// Propagates dispatch errors ([`FormweaverError::Schema`],
/// [`FormweaverError::Cardinality`]) and layout errors
/// ([`FormweaverError::Layout`]).
///
/// [`FormweaverError::Schema`]: crate::FormweaverError::Schema
/// [`FormweaverError::Cardinality`]: crate::FormweaverError::Cardinality
/// [`FormweaverError::Layout`]: crate::FormweaverError::Layout
pub fn render_form(
    metadata: &SchemaMetadata,
    ctx: &RenderContext<'_>,
    action: &str,
    method: &str,
    submit_label: Option<&str>,
) -> Result<String> {
    tracing::debug!(
        model = %metadata.model_name,
        version = metadata.version,
        layout = %ctx.layout,
        theme = %ctx.theme.framework,
        "rendering form"
    );

    let rendered = dispatcher::dispatch_all(metadata, ctx)?;
    let body = engine::compose(metadata, &rendered, ctx)?;

    let mut html = fill(
        ctx.theme.form_open(),
        &[
            ("action", escape_html(action).as_str()),
            ("method", &escape_html(method)),
        ],
    );
    html.push_str(&body);
    if let Some(label) = submit_label {
        html.push_str(&fill(
            ctx.theme.submit_button(),
            &[("label", escape_html(label).as_str())],
        ));
    }
    html.push_str(ctx.theme.form_close());

    if ctx.debug {
        let panel = debug_panel(metadata, ctx, &html);
        html.push_str(&panel);
    }
    Ok(html)
}

/// Builds the collapsed inspection panel appended in debug mode.
///
/// The snapshot (metadata, context, and the raw form markup) is serialized
/// to pretty JSON and HTML-escaped, so submitted values render inert inside
/// the `<pre>` block.
fn debug_panel(metadata: &SchemaMetadata, ctx: &RenderContext<'_>, markup: &str) -> String {
    let snapshot = json!({
        "model": metadata.model_name,
        "version": metadata.version,
        "fields": metadata.field_names().collect::<Vec<_>>(),
        "layout": ctx.layout.as_str(),
        "theme": {
            "framework": ctx.theme.framework,
            "variant": ctx.theme.variant,
        },
        "max_depth": ctx.max_depth,
        "values": ctx.values,
        "errors": ctx.errors,
        "markup": markup,
    });
    let content = serde_json::to_string_pretty(&snapshot).unwrap_or_else(|_| snapshot.to_string());
    fill(
        ctx.theme.debug_panel(),
        &[
            ("summary", "Render debug"),
            ("content", escape_html(&content).as_str()),
        ],
    )
}
