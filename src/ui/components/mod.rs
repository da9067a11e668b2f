//! Input components and their runtime registry.
//!
//! Each component renders the bare widget markup for one scalar field; all
//! surrounding chrome (label, help text, error block, wrapper) belongs to
//! the dispatcher and the active theme. Components are stateless and shared
//! behind `Arc`, so concurrent renders use them freely.
//!
//! # Registry
//!
//! [`register`] maps a UI-element identifier (plus aliases) to a component;
//! [`resolve`] looks one up. Unknown identifiers resolve to the plain text
//! component with a low-severity warning: a missing widget degrades
//! gracefully instead of failing the render. Registration is idempotent
//! (last write wins) and intended for process start, before render traffic;
//! [`reset_components`] restores the built-in table for tests.
//!
//! # Built-in Components
//!
//! | Identifier | Aliases | Widget |
//! |---|---|---|
//! | `text` | `string` | `<input type="text">` |
//! | `textarea` | `multiline` | `<textarea>` |
//! | `password` | — | `<input type="password">` |
//! | `email` | — | `<input type="email">` |
//! | `hidden` | — | `<input type="hidden">` |
//! | `number` | `integer`, `float` | `<input type="number">` |
//! | `range` | `slider` | `<input type="range">` |
//! | `checkbox` | `switch` | `<input type="checkbox">` |
//! | `radio` | — | radio group |
//! | `select` | `dropdown` | `<select>` |
//! | `date` | — | `<input type="date">` |
//! | `datetime` | `datetime-local` | `<input type="datetime-local">` |

mod datetime;
mod numeric;
mod selection;
mod text;

pub use datetime::DateInput;
pub use numeric::{NumberInput, RangeInput};
pub use selection::{CheckboxInput, RadioGroup, SelectInput};
pub use text::{TextArea, TextInput};

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::schema::metadata::FieldDescriptor;
use crate::ui::helpers::escape_html;
use crate::ui::theme::ThemeDescriptor;

/// Per-field inputs a component needs to render its widget.
///
/// Owned by the dispatcher for the duration of one field render.
#[derive(Debug)]
pub struct FieldBinding<'a> {
    /// Fully-prefixed input name (`items[0].weight`).
    pub input_name: String,

    /// DOM id derived from the input name.
    pub id: String,

    /// Submitted value for this field, if any.
    pub value: Option<&'a Value>,

    /// Whether the field currently carries validation errors.
    pub has_error: bool,

    /// Active theme, for widget CSS classes.
    pub theme: &'a ThemeDescriptor,
}

/// A renderer for one scalar field's widget markup.
pub trait InputComponent: Send + Sync {
    /// Renders the widget for `field` bound to `binding`.
    ///
    /// Implementations must escape any user-supplied text they interpolate
    /// and must not emit chrome (labels, errors); that is theme territory.
    fn render(&self, field: &FieldDescriptor, binding: &FieldBinding<'_>) -> String;
}

/// Renders a submitted value as attribute text.
///
/// Strings pass through, numbers and booleans format naturally, and anything
/// non-scalar renders empty (nested values never reach scalar widgets).
pub(crate) fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Builds the attribute fragment shared by most widgets: required, flag
/// hints, placeholder, and length/pattern constraints.
pub(crate) fn common_attrs(field: &FieldDescriptor, _binding: &FieldBinding<'_>) -> String {
    let mut attrs = String::new();
    if field.required {
        attrs.push_str(" required");
    }
    if field.hints.readonly {
        attrs.push_str(" readonly");
    }
    if field.hints.disabled {
        attrs.push_str(" disabled");
    }
    if let Some(placeholder) = &field.hints.placeholder {
        attrs.push_str(&format!(" placeholder=\"{}\"", escape_html(placeholder)));
    }
    if let Some(min_length) = field.constraints.min_length {
        attrs.push_str(&format!(" minlength=\"{min_length}\""));
    }
    if let Some(max_length) = field.constraints.max_length {
        attrs.push_str(&format!(" maxlength=\"{max_length}\""));
    }
    if let Some(pattern) = &field.constraints.pattern {
        attrs.push_str(&format!(" pattern=\"{}\"", escape_html(pattern)));
    }
    attrs
}

/// Formats an `f64` constraint without a trailing `.0` for whole numbers.
pub(crate) fn number_attr(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// =============================================================================
// Registry
// =============================================================================

type ComponentTable = HashMap<String, Arc<dyn InputComponent>>;

static COMPONENTS: OnceLock<RwLock<ComponentTable>> = OnceLock::new();

fn builtin_table() -> ComponentTable {
    let mut table = ComponentTable::new();
    let mut seed = |id: &str, aliases: &[&str], component: Arc<dyn InputComponent>| {
        table.insert(id.to_string(), Arc::clone(&component));
        for alias in aliases {
            table.insert((*alias).to_string(), Arc::clone(&component));
        }
    };

    seed("text", &["string"], Arc::new(TextInput::new("text")));
    seed("textarea", &["multiline"], Arc::new(TextArea));
    seed("password", &[], Arc::new(TextInput::new("password")));
    seed("email", &[], Arc::new(TextInput::new("email")));
    seed("hidden", &[], Arc::new(TextInput::new("hidden")));
    seed("number", &["integer", "float"], Arc::new(NumberInput));
    seed("range", &["slider"], Arc::new(RangeInput));
    seed("checkbox", &["switch"], Arc::new(CheckboxInput));
    seed("radio", &[], Arc::new(RadioGroup));
    seed("select", &["dropdown"], Arc::new(SelectInput));
    seed("date", &[], Arc::new(DateInput::new("date")));
    seed("datetime", &["datetime-local"], Arc::new(DateInput::new("datetime-local")));
    table
}

fn registry() -> &'static RwLock<ComponentTable> {
    COMPONENTS.get_or_init(|| RwLock::new(builtin_table()))
}

/// Registers a component for an identifier and optional aliases.
///
/// Idempotent: registering an identifier twice replaces the earlier entry.
/// Call at process start; registration during concurrent renders is not
/// supported.
pub fn register(id: &str, component: Arc<dyn InputComponent>, aliases: &[&str]) {
    let mut table = registry().write().expect("component registry lock poisoned");
    table.insert(id.to_string(), Arc::clone(&component));
    for alias in aliases {
        table.insert((*alias).to_string(), Arc::clone(&component));
    }
}

/// Resolves a component for a UI-element identifier.
///
/// Unknown identifiers fall back to the plain text component so a missing
/// widget never fails the render.
pub fn resolve(id: &str) -> Arc<dyn InputComponent> {
    let table = registry().read().expect("component registry lock poisoned");
    if let Some(found) = table.get(id) {
        return Arc::clone(found);
    }
    tracing::warn!(ui_element = id, "unknown input component, using text fallback");
    table
        .get("text")
        .map(Arc::clone)
        .unwrap_or_else(|| Arc::new(TextInput::new("text")))
}

/// Restores the built-in component table (testing hook).
pub fn reset_components() {
    *registry().write().expect("component registry lock poisoned") = builtin_table();
}
