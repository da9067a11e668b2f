//! Named custom layout renderers (the plugin escape hatch).
//!
//! A field whose UI hints declare a `custom_renderer` is composed by a
//! registered [`LayoutRenderer`] instead of the standard field pipeline. The
//! registry is an ordinary mutable table populated at startup (no dynamic
//! attribute injection), with a reset hook for tests.
//!
//! An unregistered name never fails composition: the engine falls back to
//! the theme's inert placeholder and logs a warning.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::domain::context::RenderContext;
use crate::schema::metadata::FieldDescriptor;

/// A named renderer that takes over one field's composition.
pub trait LayoutRenderer: Send + Sync {
    /// Renders the field's complete block.
    ///
    /// Receives the field descriptor (name, hints, constraints), the raw
    /// submitted value for the field, and the active render context.
    fn render(
        &self,
        field: &FieldDescriptor,
        value: Option<&Value>,
        ctx: &RenderContext<'_>,
    ) -> String;
}

type RendererTable = HashMap<String, Arc<dyn LayoutRenderer>>;

static RENDERERS: OnceLock<RwLock<RendererTable>> = OnceLock::new();

fn registry() -> &'static RwLock<RendererTable> {
    RENDERERS.get_or_init(|| RwLock::new(RendererTable::new()))
}

/// Registers (or replaces) a named layout renderer.
///
/// Call at process start; registration during concurrent renders is not
/// supported.
pub fn register_layout_renderer(name: &str, renderer: Arc<dyn LayoutRenderer>) {
    registry()
        .write()
        .expect("layout renderer registry lock poisoned")
        .insert(name.to_string(), renderer);
}

/// Looks up a named layout renderer.
pub fn resolve_layout_renderer(name: &str) -> Option<Arc<dyn LayoutRenderer>> {
    registry()
        .read()
        .expect("layout renderer registry lock poisoned")
        .get(name)
        .map(Arc::clone)
}

/// Empties the renderer table (testing hook).
pub fn reset_layout_renderers() {
    registry()
        .write()
        .expect("layout renderer registry lock poisoned")
        .clear();
}
