//! Shared rendering utilities.
//!
//! This module provides the low-level string utilities used across the UI
//! layer: HTML escaping for user-supplied text and `{placeholder}`
//! substitution for theme templates.
//!
//! # Example
//!
//! ```rust
//! use formweaver::ui::helpers::{escape_html, fill};
//!
//! let safe = escape_html("a < b & \"c\"");
//! assert_eq!(safe, "a &lt; b &amp; &quot;c&quot;");
//!
//! let html = fill("<label for=\"{id}\">{text}</label>", &[("id", "f1"), ("text", "Name")]);
//! assert_eq!(html, "<label for=\"f1\">Name</label>");
//! ```

/// Escapes the five HTML-significant characters.
///
/// Applied to every piece of user-supplied text before it enters markup:
/// labels, help text, error messages, submitted values, placeholders, and
/// choice labels.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Substitutes `{key}` placeholders in a theme template.
///
/// Unknown placeholders are left verbatim so a template typo is visible in
/// the output instead of silently vanishing. Substitution values are
/// inserted as-is: callers escape user-supplied text first, while trusted
/// pre-rendered markup passes through unchanged.
///
/// Single pass over the template: a substituted value that happens to
/// contain `{key}` text is never re-substituted.
pub fn fill(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let Some(end) = rest.find('}') else {
            break;
        };
        let key = &rest[1..end];
        match substitutions.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[..=end]),
        }
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    out
}

/// Builds a DOM id from a (possibly prefixed) input name.
///
/// Output is restricted to `[A-Za-z0-9_-]`; everything else maps to `_`.
/// Ids are interpolated into attributes unescaped, so the restriction is
/// what keeps a hostile field name from breaking out of the attribute.
/// `items[0].name` becomes `items_0__name`.
pub fn dom_id(input_name: &str) -> String {
    input_name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_all_significant_characters() {
        assert_eq!(
            escape_html("<script>alert('&\"')</script>"),
            "&lt;script&gt;alert(&#x27;&amp;&quot;&#x27;)&lt;/script&gt;"
        );
    }

    #[test]
    fn fill_replaces_every_occurrence() {
        let out = fill("{a}-{b}-{a}", &[("a", "1"), ("b", "2")]);
        assert_eq!(out, "1-2-1");
    }

    #[test]
    fn fill_leaves_unknown_placeholders_visible() {
        let out = fill("{known} {unknown}", &[("known", "x")]);
        assert_eq!(out, "x {unknown}");
    }

    #[test]
    fn fill_never_rescans_substituted_values() {
        // A value containing a later key's placeholder text stays verbatim.
        let out = fill(
            "<b>{title}</b>{content}",
            &[("title", "x{content}y"), ("content", "BODY")],
        );
        assert_eq!(out, "<b>x{content}y</b>BODY");
    }

    #[test]
    fn fill_keeps_an_unterminated_brace_verbatim() {
        assert_eq!(fill("a{b", &[("b", "x")]), "a{b");
    }

    #[test]
    fn dom_ids_have_no_selector_metacharacters() {
        assert_eq!(dom_id("items[0].name"), "items_0__name");
    }

    #[test]
    fn dom_ids_neutralize_attribute_breakout_characters() {
        assert_eq!(dom_id(r#"a"b<c>'d"#), "a_b_c__d");
        assert_eq!(dom_id("f=\"x\" onmouseover"), "f__x__onmouseover");
    }
}
