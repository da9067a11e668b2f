//! Layout modes and the composable layout-node tree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::FormweaverError;

/// Requested top-level layout mode.
///
/// Parsed from the caller's layout string; `grid` accepts an optional column
/// count suffix (`"grid-3"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// One field per row, declaration order.
    Vertical,
    /// Fields grouped into tab panels.
    Tabbed,
    /// Fields grouped into accordion sections.
    Accordion,
    /// Fields flowed into a fixed-column grid.
    Grid {
        /// Number of grid columns.
        columns: usize,
    },
    /// Fields paired into two-column rows.
    SideBySide,
}

impl Default for LayoutKind {
    fn default() -> Self {
        LayoutKind::Vertical
    }
}

impl LayoutKind {
    /// Canonical name of the mode (without any column suffix).
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Vertical => "vertical",
            LayoutKind::Tabbed => "tabbed",
            LayoutKind::Accordion => "accordion",
            LayoutKind::Grid { .. } => "grid",
            LayoutKind::SideBySide => "side-by-side",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = FormweaverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(LayoutKind::Vertical),
            "tabbed" => Ok(LayoutKind::Tabbed),
            "accordion" => Ok(LayoutKind::Accordion),
            "grid" => Ok(LayoutKind::Grid { columns: 2 }),
            "side-by-side" => Ok(LayoutKind::SideBySide),
            other => {
                if let Some(cols) = other.strip_prefix("grid-") {
                    let columns: usize = cols.parse().map_err(|_| {
                        FormweaverError::Config(format!("invalid grid column count in '{other}'"))
                    })?;
                    if columns == 0 {
                        return Err(FormweaverError::Config(
                            "grid layout requires at least one column".to_string(),
                        ));
                    }
                    return Ok(LayoutKind::Grid { columns });
                }
                Err(FormweaverError::Config(format!("unknown layout '{other}'")))
            }
        }
    }
}

/// One composable unit of the rendered form's structural tree.
///
/// Trees are built top-down from schema metadata, never from other nodes,
/// so cycles are impossible. Every `Leaf` must reference a field present in
/// the associated schema; composition validates this and raises a layout
/// error otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    /// A single field's markup, referenced by field name.
    Leaf(String),
    /// A run of children, stacked vertically or flowed horizontally.
    Stack {
        /// Child nodes in render order.
        children: Vec<LayoutNode>,
        /// Stacking direction.
        orientation: Orientation,
    },
    /// Named tab panels; the first tab renders active.
    TabGroup {
        /// `(title, children)` pairs in tab order.
        tabs: Vec<(String, Vec<LayoutNode>)>,
    },
    /// Named accordion sections; the first section renders expanded.
    AccordionGroup {
        /// `(title, children)` pairs in section order.
        sections: Vec<(String, Vec<LayoutNode>)>,
    },
    /// A fixed-column grid of children.
    Grid {
        /// Child nodes in flow order.
        children: Vec<LayoutNode>,
        /// Number of columns.
        columns: usize,
    },
    /// Dispatch to a registered named layout renderer (plugin escape hatch).
    Custom {
        /// Registered renderer name.
        renderer: String,
        /// Field the renderer takes over.
        field: String,
    },
}

/// Stacking direction for [`LayoutNode::Stack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Children render one per row.
    Vertical,
    /// Children share one row.
    Horizontal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_strings_parse() {
        assert_eq!("vertical".parse::<LayoutKind>().unwrap(), LayoutKind::Vertical);
        assert_eq!("tabbed".parse::<LayoutKind>().unwrap(), LayoutKind::Tabbed);
        assert_eq!(
            "grid".parse::<LayoutKind>().unwrap(),
            LayoutKind::Grid { columns: 2 }
        );
        assert_eq!(
            "grid-4".parse::<LayoutKind>().unwrap(),
            LayoutKind::Grid { columns: 4 }
        );
        assert_eq!(
            "side-by-side".parse::<LayoutKind>().unwrap(),
            LayoutKind::SideBySide
        );
    }

    #[test]
    fn unknown_layout_is_a_config_error() {
        let err = "diagonal".parse::<LayoutKind>().unwrap_err();
        assert!(matches!(err, FormweaverError::Config(_)));
    }

    #[test]
    fn zero_column_grid_is_rejected() {
        assert!("grid-0".parse::<LayoutKind>().is_err());
    }
}
