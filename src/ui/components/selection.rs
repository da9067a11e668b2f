//! Selection components: checkbox, radio group, select.

use serde_json::Value;

use crate::schema::metadata::{FieldDescriptor, FieldKind};
use crate::ui::components::{common_attrs, value_text, FieldBinding, InputComponent};
use crate::ui::helpers::escape_html;

/// True when a submitted value should tick a checkbox.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.as_str(), "true" | "on" | "1" | "yes"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

/// Choice list for a field; empty for non-enum kinds.
fn choices(field: &FieldDescriptor) -> &[String] {
    match &field.kind {
        FieldKind::Enum { choices } => choices,
        _ => &[],
    }
}

/// `<input type="checkbox">` widget.
///
/// Submits `"true"` when checked; the checked state derives from common
/// truthy forms of the submitted value (`true`, `"on"`, `"1"`, `"yes"`).
pub struct CheckboxInput;

impl InputComponent for CheckboxInput {
    fn render(&self, field: &FieldDescriptor, binding: &FieldBinding<'_>) -> String {
        let checked = if is_truthy(binding.value) { " checked" } else { "" };
        format!(
            r#"<input type="checkbox" name="{name}" id="{id}" class="{class}" value="true"{checked}{attrs} />"#,
            name = escape_html(&binding.input_name),
            id = binding.id,
            class = binding.theme.checkbox_class(),
            checked = checked,
            attrs = common_attrs(field, binding),
        )
    }
}

/// Radio-button group over an enum field's choices.
pub struct RadioGroup;

impl InputComponent for RadioGroup {
    fn render(&self, field: &FieldDescriptor, binding: &FieldBinding<'_>) -> String {
        let current = value_text(binding.value);
        let mut html = String::new();
        for (i, choice) in choices(field).iter().enumerate() {
            let checked = if *choice == current { " checked" } else { "" };
            html.push_str(&format!(
                r#"<label class="formweaver-radio-option"><input type="radio" name="{name}" id="{id}-{i}" class="{class}" value="{value}"{checked}{attrs} /> {text}</label>"#,
                name = escape_html(&binding.input_name),
                id = binding.id,
                i = i,
                class = binding.theme.checkbox_class(),
                value = escape_html(choice),
                checked = checked,
                attrs = common_attrs(field, binding),
                text = escape_html(choice),
            ));
        }
        html
    }
}

/// `<select>` widget over an enum field's choices.
///
/// Always leads with an empty option so an unanswered optional field
/// submits no choice.
pub struct SelectInput;

impl InputComponent for SelectInput {
    fn render(&self, field: &FieldDescriptor, binding: &FieldBinding<'_>) -> String {
        let current = value_text(binding.value);
        let mut options = String::from(r#"<option value=""></option>"#);
        for choice in choices(field) {
            let selected = if *choice == current { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{value}"{selected}>{text}</option>"#,
                value = escape_html(choice),
                selected = selected,
                text = escape_html(choice),
            ));
        }
        format!(
            r#"<select name="{name}" id="{id}" class="{class}"{attrs}>{options}</select>"#,
            name = escape_html(&binding.input_name),
            id = binding.id,
            class = binding.theme.select_class(),
            attrs = common_attrs(field, binding),
            options = options,
        )
    }
}
