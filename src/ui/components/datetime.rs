//! Date and datetime input components.

use crate::schema::metadata::FieldDescriptor;
use crate::ui::components::{common_attrs, value_text, FieldBinding, InputComponent};
use crate::ui::helpers::escape_html;

/// Calendar input with a configurable `type` attribute (`date` or
/// `datetime-local`).
///
/// Values are opaque strings supplied by the caller; the pipeline performs
/// no date parsing or formatting.
pub struct DateInput {
    input_type: &'static str,
}

impl DateInput {
    /// Creates a date input rendering with the given `type` attribute.
    pub fn new(input_type: &'static str) -> Self {
        Self { input_type }
    }
}

impl InputComponent for DateInput {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::metadata::FieldKind;
    use crate::ui::theme;
    use serde_json::json;

    #[test]
    fn date_value_passes_through_verbatim() {
        let theme = theme::resolve("plain", None);
        let field = FieldDescriptor {
            name: "born".to_string(),
            label: "Born".to_string(),
            kind: FieldKind::Date,
            required: false,
            constraints: Default::default(),
            hints: Default::default(),
        };
        let value = json!("1990-04-01");
        let binding = FieldBinding {
            input_name: "born".to_string(),
            id: "born".to_string(),
            value: Some(&value),
            has_error: false,
            theme: &theme,
        };
        let html = DateInput::new("date").render(&field, &binding);
        assert!(html.contains(r#"type="date""#));
        assert!(html.contains(r#"value="1990-04-01""#));
    }
}
