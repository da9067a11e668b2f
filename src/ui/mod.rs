//! Markup production: components, dispatch, themes, and form assembly.
//!
//! The `ui` layer turns extracted schema metadata into HTML. Components
//! render individual input widgets, the dispatcher assembles per-field
//! blocks with theme chrome, and the renderer wraps the composed layout in
//! the form shell. Every byte of framework-specific markup comes from the
//! active theme bundle.

pub mod components;
pub mod dispatcher;
pub mod helpers;
pub mod renderer;
pub mod theme;

pub use components::{register as register_component, InputComponent};
pub use dispatcher::RenderedField;
pub use renderer::render_form;
pub use theme::{register as register_theme, resolve as resolve_theme, ThemeDescriptor};
