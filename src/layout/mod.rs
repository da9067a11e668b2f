//! Structural composition of dispatched field markup.
//!
//! The layout stage sits between field dispatch and the final form shell:
//! it arranges already-rendered field blocks into the requested structure
//! (vertical, tabbed, accordion, grid, side-by-side) using the active
//! theme's wrapper templates.

pub mod custom;
pub mod engine;
pub mod grouping;
pub mod node;

pub use custom::{register_layout_renderer, reset_layout_renderers, LayoutRenderer};
pub use engine::{build_tree, compose, compose_tree};
pub use node::{LayoutKind, LayoutNode, Orientation};
