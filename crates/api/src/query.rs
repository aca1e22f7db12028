//! Trowel queries - read-only access to editor state.
//!
//! Queries inspect the tree, the sorter placeholder and the overlay spots
//! between replayed steps without changing anything.

use crate::Target;
use canvas::Spot;
use drag::{DragEvent, Placeholder, Pos};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A query for editor state (read-only).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Names of the children of a component, in order.
    Children {
        #[serde(default)]
        target: Target,
    },

    /// The whole component tree.
    Tree,

    /// Sorter placeholder, current drop target and position.
    Placeholder,

    /// Overlay spots, optionally of one type.
    Spots {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        spot_type: Option<String>,
    },

    /// Every event emitted so far.
    Events,

    /// Warnings logged for rejected moves.
    Warnings,

    /// Inline style of a component.
    Style { target: String },

    /// Position and size of a frame.
    Frame { name: String },

    /// Current zoom and pan.
    Viewport,
}

/// Response to a query.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    Names {
        names: Vec<String>,
    },

    Tree {
        root: TreeNode,
    },

    Placeholder {
        placeholder: Placeholder,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pos: Option<Pos>,
    },

    Spots {
        spots: Vec<Spot>,
    },

    Events {
        events: Vec<DragEvent>,
    },

    Warnings {
        warnings: Vec<WarningInfo>,
    },

    Style {
        style: BTreeMap<String, String>,
    },

    Frame {
        position: Vec2,
        size: Vec2,
    },

    Viewport {
        zoom: f32,
        coords: Vec2,
    },

    Error {
        message: String,
    },
}

impl QueryResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Serializable view of a component subtree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Indented outline, one component per line
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.name);
        if self.name != self.kind {
            out.push_str(&format!(" ({})", self.kind));
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(out, depth + 1);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WarningInfo {
    pub message: String,
    pub errors: Vec<String>,
    pub context: &'static str,
}
