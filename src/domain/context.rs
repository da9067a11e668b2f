//! The immutable per-call render context.
//!
//! A [`RenderContext`] bundles everything one render call needs: scoped
//! submitted values, validation errors, the active theme, the requested
//! layout, debug flag, and recursion depth. It is threaded explicitly
//! through every dispatch and composition call. No component reads or writes
//! shared renderer state, which is what makes concurrent renders of the same
//! or different models fully independent.
//!
//! # Derivation
//!
//! Nested models and list items never mutate the parent context. They build
//! derived copies via [`RenderContext::nested`] / [`RenderContext::indexed`]
//! that narrow the value scope, extend the field-name prefix
//! (`parent.child`, `items[0].child`), and increment the recursion depth.

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::layout::LayoutKind;
use crate::ui::theme::ThemeDescriptor;

/// Default recursion bound for nested-model chains.
///
/// Generous but finite: pathological self-referential schemas fail fast with
/// a schema error rather than overflowing the call stack.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Immutable bundle of per-call render inputs.
///
/// Constructed once per top-level render call; nested calls construct derived
/// copies. All borrowed data outlives the call stack that uses it.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Submitted values scoped to the current model level. `None` when the
    /// current scope has no submitted object (e.g. a blank list item).
    pub values: Option<&'a Map<String, Value>>,

    /// Validation errors keyed by fully-prefixed field name
    /// (`"items[0].weight"`). Supplied by the caller's validation engine and
    /// consumed read-only.
    pub errors: &'a HashMap<String, Vec<String>>,

    /// Active theme bundle; supplies every byte of chrome.
    pub theme: &'a ThemeDescriptor,

    /// Requested top-level layout mode.
    pub layout: LayoutKind,

    /// When set, a collapsed inspection panel is appended to the output.
    pub debug: bool,

    /// Current nesting depth (0 at the top-level model).
    pub depth: usize,

    /// Depth at which dispatch refuses to recurse further.
    pub max_depth: usize,

    /// Name prefix applied to every input in the current scope, including
    /// the trailing separator (`""`, `"profile."`, `"items[0]."`).
    pub prefix: String,
}

impl<'a> RenderContext<'a> {
    /// Creates the top-level context for one render call.
    pub fn new(
        values: &'a Map<String, Value>,
        errors: &'a HashMap<String, Vec<String>>,
        theme: &'a ThemeDescriptor,
        layout: LayoutKind,
        debug: bool,
        max_depth: usize,
    ) -> Self {
        Self {
            values: Some(values),
            errors,
            theme,
            layout,
            debug,
            depth: 0,
            max_depth,
            prefix: String::new(),
        }
    }

    /// Looks up the submitted value for a field in the current scope.
    pub fn value_of(&self, field_name: &str) -> Option<&'a Value> {
        self.values.and_then(|map| map.get(field_name))
    }

    /// Returns the fully-prefixed input name for a field in this scope.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use formweaver::{ModelSchema, RenderOptions};
    /// // At prefix "items[0]." the field "weight" submits as "items[0].weight".
    /// ```
    pub fn input_name(&self, field_name: &str) -> String {
        format!("{}{}", self.prefix, field_name)
    }

    /// Returns the validation errors for a field in this scope, if any.
    ///
    /// Errors are keyed by fully-prefixed name, so nested and indexed scopes
    /// resolve their own entries without touching sibling scopes.
    pub fn errors_for(&self, field_name: &str) -> &'a [String] {
        self.errors
            .get(&self.input_name(field_name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True once the next recursion step would exceed the configured bound.
    pub fn at_max_depth(&self) -> bool {
        self.depth >= self.max_depth
    }

    /// Derives a context for a nested-model field.
    ///
    /// The child scope sees the field's submitted object (if any), a
    /// dot-extended prefix, and depth + 1. The parent context is untouched.
    pub fn nested(&self, field_name: &str) -> RenderContext<'a> {
        let child_values = self
            .value_of(field_name)
            .and_then(Value::as_object);
        RenderContext {
            values: child_values,
            prefix: format!("{}{}.", self.prefix, field_name),
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Derives a context for one indexed item of a model-list field.
    ///
    /// The item scope sees the submitted item object (if any) and an indexed
    /// prefix (`items[2].`).
    pub fn indexed(&self, field_name: &str, index: usize, item: Option<&'a Value>) -> RenderContext<'a> {
        RenderContext {
            values: item.and_then(Value::as_object),
            prefix: format!("{}{}[{}].", self.prefix, field_name, index),
            depth: self.depth + 1,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutKind;
    use crate::ui::theme;
    use serde_json::json;

    fn errors_with(key: &str, msg: &str) -> HashMap<String, Vec<String>> {
        let mut errors = HashMap::new();
        errors.insert(key.to_string(), vec![msg.to_string()]);
        errors
    }

    #[test]
    fn nested_scope_narrows_values_and_extends_prefix() {
        let values = json!({"profile": {"city": "Oslo"}});
        let values = values.as_object().unwrap();
        let errors = HashMap::new();
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(values, &errors, &theme, LayoutKind::Vertical, false, 8);

        let child = ctx.nested("profile");
        assert_eq!(child.prefix, "profile.");
        assert_eq!(child.depth, 1);
        assert_eq!(child.value_of("city"), Some(&json!("Oslo")));
        // Parent scope is untouched.
        assert_eq!(ctx.prefix, "");
        assert_eq!(ctx.depth, 0);
    }

    #[test]
    fn indexed_scope_uses_bracketed_prefix() {
        let values = json!({"items": [{"x": 1}, {"x": 2}]});
        let values = values.as_object().unwrap();
        let errors = errors_with("items[1].x", "too big");
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(values, &errors, &theme, LayoutKind::Vertical, false, 8);

        let items = ctx.value_of("items").unwrap().as_array().unwrap();
        let item = ctx.indexed("items", 1, Some(&items[1]));
        assert_eq!(item.input_name("x"), "items[1].x");
        assert_eq!(item.errors_for("x"), ["too big".to_string()]);
        assert_eq!(item.value_of("x"), Some(&json!(2)));
    }

    #[test]
    fn max_depth_trips_after_configured_levels() {
        let values = Map::new();
        let errors = HashMap::new();
        let theme = theme::resolve("plain", None);
        let ctx = RenderContext::new(&values, &errors, &theme, LayoutKind::Vertical, false, 2);

        assert!(!ctx.at_max_depth());
        let one = ctx.nested("a");
        assert!(!one.at_max_depth());
        let two = one.nested("b");
        assert!(two.at_max_depth());
    }
}
