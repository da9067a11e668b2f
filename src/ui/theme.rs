//! Theme bundles and the framework/variant registry.
//!
//! A [`ThemeDescriptor`] ties a `{framework, variant}` pair to a bundle of
//! named markup templates and asset references. It supplies every byte of
//! framework-specific chrome; the dispatcher and layout engine never
//! hard-code a CSS class. Built-in bundles cover `plain` (the global
//! default), `bootstrap` variants `5` (framework default) and `4`, and
//! `material`; additional bundles register at runtime or load from TOML.
//!
//! # Resolution
//!
//! Lookup order is exact `{framework, variant}` → `{framework, default
//! variant}` → the global `plain` bundle. Resolution never fails; a miss
//! logs a low-severity warning and degrades.
//!
//! # Template Slots
//!
//! Every slot is optional in a bundle and falls back to the plain default,
//! so a partial bundle (or a partial TOML file) still satisfies every slot
//! the pipeline requests.
//!
//! # TOML Format
//!
//! ```toml
//! framework = "corporate"
//! variant = "2024"
//!
//! [templates]
//! form_open = "<form class=\"corp-form\" action=\"{action}\" method=\"{method}\">"
//! submit_button = "<button type=\"submit\" class=\"corp-btn\">{label}</button>"
//!
//! [assets]
//! css = ["https://cdn.example.com/corp.css"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};

use crate::domain::error::{FormweaverError, Result};

/// Variant key used when a framework is requested without one.
pub const DEFAULT_VARIANT: &str = "default";

/// Plain-bundle template defaults, used whenever a bundle leaves a slot unset.
mod defaults {
    pub const FORM_OPEN: &str =
        r#"<form class="formweaver-form" action="{action}" method="{method}">"#;
    pub const FORM_CLOSE: &str = "</form>";
    pub const FIELD_WRAPPER: &str =
        r#"<div class="formweaver-field" data-field="{name}">{content}</div>"#;
    pub const LABEL: &str = r#"<label for="{for}">{text}{required}</label>"#;
    pub const REQUIRED_MARKER: &str = r#"<span class="formweaver-required">*</span>"#;
    pub const HELP_TEXT: &str = r#"<div class="formweaver-help">{text}</div>"#;
    pub const ERROR_BLOCK: &str = r#"<div class="formweaver-error">{message}</div>"#;
    pub const SECTION: &str =
        r#"<fieldset class="formweaver-section"><legend>{title}</legend>{content}</fieldset>"#;
    pub const TABS_WRAPPER: &str = r#"<div class="formweaver-tabs"><div class="formweaver-tab-nav" role="tablist">{nav}</div><div class="formweaver-tab-panels">{panels}</div></div>"#;
    pub const TAB_BUTTON: &str = r##"<button type="button" class="formweaver-tab{active}" id="{id}-tab" data-target="#{target}" role="tab">{title}</button>"##;
    pub const TAB_PANEL: &str =
        r#"<div class="formweaver-tab-panel{active}" id="{id}" role="tabpanel">{content}</div>"#;
    pub const TAB_ACTIVE: &str = " active";
    pub const PANEL_ACTIVE: &str = " active";
    pub const ACCORDION_WRAPPER: &str = r#"<div class="formweaver-accordion">{content}</div>"#;
    pub const ACCORDION_SECTION: &str = r#"<details class="formweaver-accordion-section" id="{id}"{expanded}><summary>{title}</summary><div class="formweaver-accordion-body">{content}</div></details>"#;
    pub const ACCORDION_EXPANDED: &str = " open";
    pub const GRID_WRAPPER: &str = r#"<div class="formweaver-grid" style="display:grid;grid-template-columns:repeat({columns},1fr);gap:1rem;">{content}</div>"#;
    pub const GRID_CELL: &str = r#"<div class="formweaver-grid-cell">{content}</div>"#;
    pub const LIST_WRAPPER: &str = r#"<div class="model-list-container" data-field-name="{name}" data-min-items="{min}" data-max-items="{max}"><div class="model-list-items" id="{id}-items">{items}</div><div class="model-list-controls">{controls}</div></div>"#;
    pub const LIST_ITEM: &str = r#"<div class="model-list-item" data-index="{index}"><div class="model-list-item-header"><span class="model-list-item-title">{title} #{number}</span>{remove}</div>{content}</div>"#;
    pub const ADD_BUTTON: &str = r#"<button type="button" class="add-item-btn" data-target="{name}">Add {label}</button>"#;
    pub const REMOVE_BUTTON: &str =
        r#"<button type="button" class="remove-item-btn" data-index="{index}">Remove</button>"#;
    pub const SUBMIT_BUTTON: &str =
        r#"<button type="submit" class="formweaver-submit">{label}</button>"#;
    pub const DEBUG_PANEL: &str = r#"<details class="formweaver-debug"><summary>{summary}</summary><pre>{content}</pre></details>"#;
    pub const CUSTOM_PLACEHOLDER: &str = r#"<div class="formweaver-custom-placeholder" data-renderer="{renderer}" data-field="{name}"></div>"#;
    pub const INPUT_CLASS: &str = "formweaver-input";
    pub const SELECT_CLASS: &str = "formweaver-select";
    pub const CHECKBOX_CLASS: &str = "formweaver-checkbox";
    pub const TEXTAREA_CLASS: &str = "formweaver-textarea";
}

/// Named markup templates for one bundle.
///
/// Unset slots fall back to the plain defaults via the accessor methods on
/// [`ThemeDescriptor`]; bundles only carry what they customize.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeTemplates {
    /// Form wrapper opening tag; `{action}`, `{method}`.
    #[serde(default)]
    pub form_open: Option<String>,
    /// Form wrapper closing tag.
    #[serde(default)]
    pub form_close: Option<String>,
    /// Per-field chrome wrapper; `{name}`, `{content}`.
    #[serde(default)]
    pub field_wrapper: Option<String>,
    /// Field label; `{for}`, `{text}`, `{required}`.
    #[serde(default)]
    pub label: Option<String>,
    /// Marker appended to required-field labels.
    #[serde(default)]
    pub required_marker: Option<String>,
    /// Help text block; `{text}`.
    #[serde(default)]
    pub help_text: Option<String>,
    /// Inline error block; `{message}`.
    #[serde(default)]
    pub error_block: Option<String>,
    /// Titled section wrapping a nested model; `{title}`, `{content}`.
    #[serde(default)]
    pub section: Option<String>,
    /// Tab group shell; `{nav}`, `{panels}`.
    #[serde(default)]
    pub tabs_wrapper: Option<String>,
    /// One tab button; `{id}`, `{target}`, `{title}`, `{active}`.
    #[serde(default)]
    pub tab_button: Option<String>,
    /// One tab panel; `{id}`, `{content}`, `{active}`.
    #[serde(default)]
    pub tab_panel: Option<String>,
    /// Class fragment marking the active tab button.
    #[serde(default)]
    pub tab_active: Option<String>,
    /// Class fragment marking the visible tab panel.
    #[serde(default)]
    pub panel_active: Option<String>,
    /// Accordion shell; `{content}`.
    #[serde(default)]
    pub accordion_wrapper: Option<String>,
    /// One accordion section; `{id}`, `{title}`, `{content}`, `{expanded}`.
    #[serde(default)]
    pub accordion_section: Option<String>,
    /// Fragment marking the initially expanded accordion section.
    #[serde(default)]
    pub accordion_expanded: Option<String>,
    /// Grid shell; `{columns}`, `{content}`.
    #[serde(default)]
    pub grid_wrapper: Option<String>,
    /// One grid cell; `{content}`.
    #[serde(default)]
    pub grid_cell: Option<String>,
    /// Model-list container; `{name}`, `{id}`, `{min}`, `{max}`, `{items}`,
    /// `{controls}`.
    #[serde(default)]
    pub list_wrapper: Option<String>,
    /// One model-list item block; `{index}`, `{number}`, `{title}`,
    /// `{remove}`, `{content}`.
    #[serde(default)]
    pub list_item: Option<String>,
    /// Add-item affordance; `{name}`, `{label}`.
    #[serde(default)]
    pub add_button: Option<String>,
    /// Remove-item affordance; `{index}`.
    #[serde(default)]
    pub remove_button: Option<String>,
    /// Submit control; `{label}`.
    #[serde(default)]
    pub submit_button: Option<String>,
    /// Collapsed debug inspection panel; `{summary}`, `{content}`.
    #[serde(default)]
    pub debug_panel: Option<String>,
    /// Inert placeholder for an unregistered custom layout renderer;
    /// `{renderer}`, `{name}`.
    #[serde(default)]
    pub custom_placeholder: Option<String>,
    /// CSS class for text-like inputs.
    #[serde(default)]
    pub input_class: Option<String>,
    /// CSS class for select widgets.
    #[serde(default)]
    pub select_class: Option<String>,
    /// CSS class for checkbox/radio widgets.
    #[serde(default)]
    pub checkbox_class: Option<String>,
    /// CSS class for textarea widgets.
    #[serde(default)]
    pub textarea_class: Option<String>,
}

/// CSS/JS asset references for one bundle.
///
/// Opaque to the pipeline: URLs or inline blobs supplied by the caller's
/// asset provider. The crate never fetches or vendors them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeAssets {
    /// Stylesheet references.
    #[serde(default)]
    pub css: Vec<String>,
    /// Script references.
    #[serde(default)]
    pub js: Vec<String>,
}

/// A `{framework, variant}` bundle of templates and assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeDescriptor {
    /// Framework name (`"plain"`, `"bootstrap"`, `"material"`, ...).
    pub framework: String,

    /// Variant within the framework (`"5"`, `"4"`, `"default"`, ...).
    #[serde(default = "default_variant")]
    pub variant: String,

    /// Markup template slots; unset slots degrade to plain defaults.
    #[serde(default)]
    pub templates: ThemeTemplates,

    /// Asset descriptors for this bundle.
    #[serde(default)]
    pub assets: ThemeAssets,
}

fn default_variant() -> String {
    DEFAULT_VARIANT.to_string()
}

macro_rules! slot_accessor {
    ($(#[$doc:meta])* $name:ident, $field:ident, $default:expr) => {
        $(#[$doc])*
        pub fn $name(&self) -> &str {
            self.templates.$field.as_deref().unwrap_or($default)
        }
    };
}

impl ThemeDescriptor {
    /// Creates an empty bundle (every slot on plain defaults).
    pub fn new(framework: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            framework: framework.into(),
            variant: variant.into(),
            templates: ThemeTemplates::default(),
            assets: ThemeAssets::default(),
        }
    }

    /// Parses a bundle from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`FormweaverError::Theme`] if the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| FormweaverError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Loads a bundle from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FormweaverError::Io`] if the file cannot be read, or
    /// [`FormweaverError::Theme`] if its contents are malformed.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    slot_accessor!(
        /// Form wrapper opening tag.
        form_open, form_open, defaults::FORM_OPEN
    );
    slot_accessor!(
        /// Form wrapper closing tag.
        form_close, form_close, defaults::FORM_CLOSE
    );
    slot_accessor!(
        /// Per-field chrome wrapper.
        field_wrapper, field_wrapper, defaults::FIELD_WRAPPER
    );
    slot_accessor!(
        /// Field label.
        label, label, defaults::LABEL
    );
    slot_accessor!(
        /// Required-field marker.
        required_marker, required_marker, defaults::REQUIRED_MARKER
    );
    slot_accessor!(
        /// Help text block.
        help_text, help_text, defaults::HELP_TEXT
    );
    slot_accessor!(
        /// Inline error block.
        error_block, error_block, defaults::ERROR_BLOCK
    );
    slot_accessor!(
        /// Nested-model section.
        section, section, defaults::SECTION
    );
    slot_accessor!(
        /// Tab group shell.
        tabs_wrapper, tabs_wrapper, defaults::TABS_WRAPPER
    );
    slot_accessor!(
        /// One tab button.
        tab_button, tab_button, defaults::TAB_BUTTON
    );
    slot_accessor!(
        /// One tab panel.
        tab_panel, tab_panel, defaults::TAB_PANEL
    );
    slot_accessor!(
        /// Active-tab class fragment.
        tab_active, tab_active, defaults::TAB_ACTIVE
    );
    slot_accessor!(
        /// Visible-panel class fragment.
        panel_active, panel_active, defaults::PANEL_ACTIVE
    );
    slot_accessor!(
        /// Accordion shell.
        accordion_wrapper, accordion_wrapper, defaults::ACCORDION_WRAPPER
    );
    slot_accessor!(
        /// One accordion section.
        accordion_section, accordion_section, defaults::ACCORDION_SECTION
    );
    slot_accessor!(
        /// Initially-expanded fragment.
        accordion_expanded, accordion_expanded, defaults::ACCORDION_EXPANDED
    );
    slot_accessor!(
        /// Grid shell.
        grid_wrapper, grid_wrapper, defaults::GRID_WRAPPER
    );
    slot_accessor!(
        /// One grid cell.
        grid_cell, grid_cell, defaults::GRID_CELL
    );
    slot_accessor!(
        /// Model-list container.
        list_wrapper, list_wrapper, defaults::LIST_WRAPPER
    );
    slot_accessor!(
        /// One model-list item block.
        list_item, list_item, defaults::LIST_ITEM
    );
    slot_accessor!(
        /// Add-item affordance.
        add_button, add_button, defaults::ADD_BUTTON
    );
    slot_accessor!(
        /// Remove-item affordance.
        remove_button, remove_button, defaults::REMOVE_BUTTON
    );
    slot_accessor!(
        /// Submit control.
        submit_button, submit_button, defaults::SUBMIT_BUTTON
    );
    slot_accessor!(
        /// Debug inspection panel.
        debug_panel, debug_panel, defaults::DEBUG_PANEL
    );
    slot_accessor!(
        /// Unregistered-custom-renderer placeholder.
        custom_placeholder, custom_placeholder, defaults::CUSTOM_PLACEHOLDER
    );
    slot_accessor!(
        /// CSS class for text-like inputs.
        input_class, input_class, defaults::INPUT_CLASS
    );
    slot_accessor!(
        /// CSS class for select widgets.
        select_class, select_class, defaults::SELECT_CLASS
    );
    slot_accessor!(
        /// CSS class for checkbox/radio widgets.
        checkbox_class, checkbox_class, defaults::CHECKBOX_CLASS
    );
    slot_accessor!(
        /// CSS class for textarea widgets.
        textarea_class, textarea_class, defaults::TEXTAREA_CLASS
    );
}

// =============================================================================
// Built-in bundles
// =============================================================================

fn plain_theme() -> ThemeDescriptor {
    ThemeDescriptor::new("plain", DEFAULT_VARIANT)
}

fn bootstrap5_theme() -> ThemeDescriptor {
    let mut theme = ThemeDescriptor::new("bootstrap", "5");
    theme.templates = ThemeTemplates {
        form_open: Some(
            r#"<form class="formweaver-form" action="{action}" method="{method}" novalidate>"#
                .to_string(),
        ),
        field_wrapper: Some(r#"<div class="mb-3" data-field="{name}">{content}</div>"#.to_string()),
        label: Some(r#"<label class="form-label" for="{for}">{text}{required}</label>"#.to_string()),
        required_marker: Some(r#"<span class="text-danger">*</span>"#.to_string()),
        help_text: Some(r#"<div class="form-text text-muted">{text}</div>"#.to_string()),
        error_block: Some(r#"<div class="invalid-feedback d-block">{message}</div>"#.to_string()),
        section: Some(
            r#"<div class="card mb-4"><div class="card-header">{title}</div><div class="card-body">{content}</div></div>"#
                .to_string(),
        ),
        tabs_wrapper: Some(
            r#"<ul class="nav nav-tabs" role="tablist">{nav}</ul><div class="tab-content">{panels}</div>"#
                .to_string(),
        ),
        tab_button: Some(
            r##"<li class="nav-item" role="presentation"><button class="nav-link{active}" id="{id}-tab" data-bs-toggle="tab" data-bs-target="#{target}" type="button" role="tab">{title}</button></li>"##
                .to_string(),
        ),
        tab_panel: Some(
            r#"<div class="tab-pane fade{active}" id="{id}" role="tabpanel">{content}</div>"#
                .to_string(),
        ),
        tab_active: Some(" active".to_string()),
        panel_active: Some(" show active".to_string()),
        accordion_wrapper: Some(r#"<div class="accordion">{content}</div>"#.to_string()),
        accordion_section: Some(
            r##"<div class="accordion-item"><h2 class="accordion-header"><button class="accordion-button" type="button" data-bs-toggle="collapse" data-bs-target="#{id}">{title}</button></h2><div id="{id}" class="accordion-collapse collapse{expanded}"><div class="accordion-body">{content}</div></div></div>"##
                .to_string(),
        ),
        accordion_expanded: Some(" show".to_string()),
        grid_wrapper: Some(r#"<div class="row row-cols-{columns} g-3">{content}</div>"#.to_string()),
        grid_cell: Some(r#"<div class="col">{content}</div>"#.to_string()),
        list_item: Some(
            r#"<div class="model-list-item border rounded p-3 mb-2 bg-light" data-index="{index}"><div class="d-flex justify-content-between align-items-start mb-2"><h6 class="mb-0 text-primary">{title} #{number}</h6>{remove}</div>{content}</div>"#
                .to_string(),
        ),
        add_button: Some(
            r#"<button type="button" class="btn btn-outline-primary btn-sm add-item-btn" data-target="{name}">Add {label}</button>"#
                .to_string(),
        ),
        remove_button: Some(
            r#"<button type="button" class="btn btn-outline-danger btn-sm remove-item-btn" data-index="{index}">Remove</button>"#
                .to_string(),
        ),
        submit_button: Some(
            r#"<button type="submit" class="btn btn-primary">{label}</button>"#.to_string(),
        ),
        input_class: Some("form-control".to_string()),
        select_class: Some("form-select".to_string()),
        checkbox_class: Some("form-check-input".to_string()),
        textarea_class: Some("form-control".to_string()),
        ..ThemeTemplates::default()
    };
    theme.assets = ThemeAssets {
        css: vec!["https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css".to_string()],
        js: vec!["https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js".to_string()],
    };
    theme
}

fn bootstrap4_theme() -> ThemeDescriptor {
    // Bootstrap 4 differs from 5 mainly in data-attribute names and spacing
    // utilities; start from the 5 bundle and override the divergent slots.
    let mut theme = bootstrap5_theme();
    theme.variant = "4".to_string();
    theme.templates.field_wrapper =
        Some(r#"<div class="form-group" data-field="{name}">{content}</div>"#.to_string());
    theme.templates.label = Some(r#"<label for="{for}">{text}{required}</label>"#.to_string());
    theme.templates.help_text =
        Some(r#"<small class="form-text text-muted">{text}</small>"#.to_string());
    theme.templates.tab_button = Some(
        r##"<li class="nav-item"><a class="nav-link{active}" id="{id}-tab" data-toggle="tab" href="#{target}" role="tab">{title}</a></li>"##
            .to_string(),
    );
    theme.templates.accordion_section = Some(
        r##"<div class="card"><div class="card-header"><button class="btn btn-link" type="button" data-toggle="collapse" data-target="#{id}">{title}</button></div><div id="{id}" class="collapse{expanded}"><div class="card-body">{content}</div></div></div>"##
            .to_string(),
    );
    theme.templates.select_class = Some("form-control".to_string());
    theme.templates.grid_wrapper = Some(r#"<div class="form-row">{content}</div>"#.to_string());
    theme.assets = ThemeAssets {
        css: vec!["https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css".to_string()],
        js: vec!["https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/js/bootstrap.bundle.min.js".to_string()],
    };
    theme
}

fn material_theme() -> ThemeDescriptor {
    let mut theme = ThemeDescriptor::new("material", DEFAULT_VARIANT);
    theme.templates = ThemeTemplates {
        field_wrapper: Some(
            r#"<div class="mdc-form-field-container mb-4" data-field="{name}">{content}</div>"#
                .to_string(),
        ),
        label: Some(
            r#"<label class="mdc-floating-label" for="{for}">{text}{required}</label>"#.to_string(),
        ),
        help_text: Some(r#"<div class="mdc-text-field-helper-text">{text}</div>"#.to_string()),
        error_block: Some(
            r#"<div class="mdc-text-field-helper-text mdc-text-field-helper-text--validation-msg">{message}</div>"#
                .to_string(),
        ),
        section: Some(
            r#"<div class="mdc-card mdc-card--outlined mb-3"><h6 class="mdc-typography--subtitle1">{title}</h6>{content}</div>"#
                .to_string(),
        ),
        list_item: Some(
            r#"<div class="model-list-item mdc-card mdc-card--outlined mb-3" data-index="{index}"><div class="mdc-card__content"><h6 class="mdc-typography--subtitle2">{title} #{number}</h6>{remove}{content}</div></div>"#
                .to_string(),
        ),
        add_button: Some(
            r#"<button type="button" class="mdc-button mdc-button--outlined add-item-btn" data-target="{name}"><span class="mdc-button__label">Add {label}</span></button>"#
                .to_string(),
        ),
        remove_button: Some(
            r#"<button type="button" class="mdc-icon-button remove-item-btn" data-index="{index}">delete</button>"#
                .to_string(),
        ),
        submit_button: Some(
            r#"<button type="submit" class="mdc-button mdc-button--raised"><span class="mdc-button__label">{label}</span></button>"#
                .to_string(),
        ),
        input_class: Some("mdc-text-field__input".to_string()),
        select_class: Some("mdc-select__native-control".to_string()),
        checkbox_class: Some("mdc-checkbox__native-control".to_string()),
        textarea_class: Some("mdc-text-field__input".to_string()),
        ..ThemeTemplates::default()
    };
    theme
}

// =============================================================================
// Registry
// =============================================================================

type ThemeTable = HashMap<(String, String), Arc<ThemeDescriptor>>;

static THEMES: OnceLock<RwLock<ThemeTable>> = OnceLock::new();

fn builtin_table() -> ThemeTable {
    let mut table = ThemeTable::new();
    let mut seed = |theme: ThemeDescriptor, also_default: bool| {
        let shared = Arc::new(theme);
        table.insert(
            (shared.framework.clone(), shared.variant.clone()),
            Arc::clone(&shared),
        );
        if also_default {
            table.insert(
                (shared.framework.clone(), DEFAULT_VARIANT.to_string()),
                shared,
            );
        }
    };
    seed(plain_theme(), false);
    // Bootstrap's framework default is the 5.x bundle.
    seed(bootstrap5_theme(), true);
    seed(bootstrap4_theme(), false);
    seed(material_theme(), false);
    table
}

fn registry() -> &'static RwLock<ThemeTable> {
    THEMES.get_or_init(|| RwLock::new(builtin_table()))
}

/// Registers (or replaces) a bundle for its `{framework, variant}` key.
///
/// Runtime extension point: new visual frameworks are added here without
/// touching dispatcher or layout-engine code. Last write wins.
pub fn register(theme: ThemeDescriptor) {
    let key = (theme.framework.clone(), theme.variant.clone());
    registry()
        .write()
        .expect("theme registry lock poisoned")
        .insert(key, Arc::new(theme));
}

/// Resolves a bundle for a `{framework, variant}` request.
///
/// Lookup order: exact pair → framework default variant → global plain
/// bundle. Never fails; misses log a warning and degrade.
pub fn resolve(framework: &str, variant: Option<&str>) -> Arc<ThemeDescriptor> {
    let table = registry().read().expect("theme registry lock poisoned");
    let requested = variant.unwrap_or(DEFAULT_VARIANT);

    if let Some(found) = table.get(&(framework.to_string(), requested.to_string())) {
        return Arc::clone(found);
    }
    if let Some(found) = table.get(&(framework.to_string(), DEFAULT_VARIANT.to_string())) {
        tracing::warn!(
            framework,
            variant = requested,
            "unknown theme variant, using framework default"
        );
        return Arc::clone(found);
    }

    tracing::warn!(framework, "unknown theme framework, using plain bundle");
    table
        .get(&("plain".to_string(), DEFAULT_VARIANT.to_string()))
        .map(Arc::clone)
        .unwrap_or_else(|| Arc::new(plain_theme()))
}

/// Restores the built-in bundle table, discarding runtime registrations
/// (testing hook).
pub fn reset_themes() {
    *registry().write().expect("theme registry lock poisoned") = builtin_table();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_pair_resolves() {
        let theme = resolve("bootstrap", Some("4"));
        assert_eq!((theme.framework.as_str(), theme.variant.as_str()), ("bootstrap", "4"));
        assert!(theme.tab_button().contains("data-toggle"));
    }

    #[test]
    fn unknown_variant_degrades_to_framework_default() {
        let theme = resolve("bootstrap", Some("99"));
        assert_eq!(theme.variant, "5");
        assert!(theme.tab_button().contains("data-bs-toggle"));
    }

    #[test]
    fn unknown_framework_degrades_to_plain() {
        let theme = resolve("no-such-framework", None);
        assert_eq!(theme.framework, "plain");
    }

    #[test]
    fn unset_slots_fall_back_to_plain_defaults() {
        let sparse = ThemeDescriptor::new("sparse", "default");
        assert_eq!(sparse.form_close(), "</form>");
        assert!(sparse.tab_panel().contains("formweaver-tab-panel"));
    }

    #[test]
    fn toml_bundle_overrides_only_named_slots() {
        let toml_src = r#"
            framework = "corporate"

            [templates]
            submit_button = "<button class=\"corp\">{label}</button>"

            [assets]
            css = ["corp.css"]
        "#;
        let theme = ThemeDescriptor::from_toml_str(toml_src).unwrap();
        assert_eq!(theme.variant, DEFAULT_VARIANT);
        assert!(theme.submit_button().contains("corp"));
        assert_eq!(theme.form_close(), "</form>");
        assert_eq!(theme.assets.css, ["corp.css".to_string()]);
    }

    #[test]
    fn tab_and_accordion_toggles_carry_fragment_anchors() {
        let plain = resolve("plain", None);
        assert!(plain.tab_button().contains(r##"data-target="#{target}""##));

        let bs5 = resolve("bootstrap", Some("5"));
        assert!(bs5.tab_button().contains(r##"data-bs-target="#{target}""##));
        assert!(bs5.accordion_section().contains(r##"data-bs-target="#{id}""##));

        let bs4 = resolve("bootstrap", Some("4"));
        assert!(bs4.tab_button().contains(r##"href="#{target}""##));
        assert!(bs4.accordion_section().contains(r##"data-target="#{id}""##));
    }

    #[test]
    fn bundle_loads_from_a_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corp.toml");
        fs::write(
            &path,
            "framework = \"corporate\"\nvariant = \"2024\"\n\n[templates]\nform_close = \"</form><!-- corp -->\"\n",
        )
        .unwrap();

        let theme = ThemeDescriptor::from_toml_file(&path).unwrap();
        assert_eq!(theme.variant, "2024");
        assert!(theme.form_close().contains("corp"));
    }

    #[test]
    fn runtime_registration_is_resolvable_and_last_write_wins() {
        let mut first = ThemeDescriptor::new("acme", "1");
        first.templates.submit_button = Some("<button>v1</button>".to_string());
        register(first);

        let mut second = ThemeDescriptor::new("acme", "1");
        second.templates.submit_button = Some("<button>v2</button>".to_string());
        register(second);

        let resolved = resolve("acme", Some("1"));
        assert_eq!(resolved.submit_button(), "<button>v2</button>");
        reset_themes();
        assert_eq!(resolve("acme", Some("1")).framework, "plain");
    }
}
