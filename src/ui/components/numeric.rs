//! Numeric input components.

use crate::schema::metadata::FieldDescriptor;
use crate::ui::components::{common_attrs, number_attr, value_text, FieldBinding, InputComponent};
use crate::ui::helpers::escape_html;

/// Builds the `min`/`max`/`step` attribute fragment from the field's
/// numeric constraints.
fn numeric_attrs(field: &FieldDescriptor) -> String {
    let mut attrs = String::new();
    if let Some(min) = field.constraints.min {
        attrs.push_str(&format!(" min=\"{}\"", number_attr(min)));
    }
    if let Some(max) = field.constraints.max {
        attrs.push_str(&format!(" max=\"{}\"", number_attr(max)));
    }
    if let Some(step) = field.constraints.step {
        attrs.push_str(&format!(" step=\"{}\"", number_attr(step)));
    }
    attrs
}

/// `<input type="number">` widget.
pub struct NumberInput;

impl InputComponent for NumberInput {
    fn render(&self, field: &FieldDescriptor, binding: &FieldBinding<'_>) -> String {
        let value = value_text(binding.value);
        let value_attr = if value.is_empty() {
            String::new()
        } else {
            format!(" value=\"{}\"", escape_html(&value))
        };
        format!(
            r#"<input type="number" name="{name}" id="{id}" class="{class}"{numeric}{attrs}{value} />"#,
            name = escape_html(&binding.input_name),
            id = binding.id,
            class = binding.theme.input_class(),
            numeric = numeric_attrs(field),
            attrs = common_attrs(field, binding),
            value = value_attr,
        )
    }
}

/// `<input type="range">` widget.
pub struct RangeInput;

impl InputComponent for RangeInput {
    fn render(&self, field: &FieldDescriptor, binding: &FieldBinding<'_>) -> String {
        let value = value_text(binding.value);
        let value_attr = if value.is_empty() {
            String::new()
        } else {
            format!(" value=\"{}\"", escape_html(&value))
        };
        format!(
            r#"<input type="range" name="{name}" id="{id}" class="{class}"{numeric}{attrs}{value} />"#,
            name = escape_html(&binding.input_name),
            id = binding.id,
            class = binding.theme.input_class(),
            numeric = numeric_attrs(field),
            attrs = common_attrs(field, binding),
            value = value_attr,
        )
    }
}
