//! Text-like input components.

use crate::schema::metadata::FieldDescriptor;
use crate::ui::components::{common_attrs, value_text, FieldBinding, InputComponent};
use crate::ui::helpers::escape_html;

/// Single-line input with a configurable `type` attribute.
///
/// Covers the `text`, `password`, `email`, and `hidden` identifiers; the
/// hidden variant carries no chrome because the dispatcher skips chrome for
/// hidden hints entirely.
pub struct TextInput {
    input_type: &'static str,
}

impl TextInput {
    /// Creates a text input rendering with the given `type` attribute.
    pub fn new(input_type: &'static str) -> Self {
        Self { input_type }
    }
}

impl InputComponent for TextInput {
    fn render(&self, field: &FieldDescriptor, binding: &FieldBinding<'_>) -> String {
        let value = value_text(binding.value);
        let value_attr = if value.is_empty() {
            String::new()
        } else {
            format!(" value=\"{}\"", escape_html(&value))
        };
        format!(
            r#"<input type="{ty}" name="{name}" id="{id}" class="{class}"{attrs}{value} />"#,
            ty = self.input_type,
            name = escape_html(&binding.input_name),
            id = binding.id,
            class = binding.theme.input_class(),
            attrs = common_attrs(field, binding),
            value = value_attr,
        )
    }
}

/// Multi-line text area.
///
/// The submitted value renders as element content rather than a `value`
/// attribute.
pub struct TextArea;

impl InputComponent for TextArea {
    fn render(&self, field: &FieldDescriptor, binding: &FieldBinding<'_>) -> String {
        format!(
            r#"<textarea name="{name}" id="{id}" class="{class}" rows="4"{attrs}>{value}</textarea>"#,
            name = escape_html(&binding.input_name),
            id = binding.id,
            class = binding.theme.textarea_class(),
            attrs = common_attrs(field, binding),
            value = escape_html(&value_text(binding.value)),
        )
    }
}
