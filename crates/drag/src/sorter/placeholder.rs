//! The drop indicator drawn while sorting.
//!
//! Between siblings the placeholder is a bar: horizontal across the width of
//! an in-flow sibling, vertical along the height of an out-of-flow one.
//! Inside an empty container it spans the container's padding box.

use super::dims::Dim;
use super::position::{Method, Pos};
use serde::Serialize;
use trowel_core::Length;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Placeholder geometry in the sorter's measurement space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placeholder {
    pub visible: bool,
    pub orientation: Orientation,
    pub top: f32,
    pub left: f32,
    pub width: Length,
    pub height: Length,
}

impl Default for Placeholder {
    fn default() -> Self {
        Self {
            visible: false,
            orientation: Orientation::Horizontal,
            top: 0.0,
            left: 0.0,
            width: Length::Auto,
            height: Length::Auto,
        }
    }
}

impl Placeholder {
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Positions the placeholder for `pos`.
    ///
    /// `target_dim` is the dim of the container the drop goes into; it is
    /// used when there are no sibling dims. Without `nested` an empty
    /// container hides the placeholder instead.
    pub fn move_to(
        &mut self,
        dims: &[Dim],
        pos: &Pos,
        target_dim: Option<&Dim>,
        nested: bool,
        default_padding: f32,
    ) {
        self.orientation = Orientation::Horizontal;

        if let Some(dim) = dims.get(pos.index) {
            let before = pos.method == Method::Before;
            if !dim.in_flow {
                self.orientation = Orientation::Vertical;
                self.width = Length::Auto;
                self.height = Length::px(dim.height);
                self.top = dim.top;
                self.left = if before { dim.left } else { dim.left + dim.width };
            } else {
                self.width = Length::px(dim.width);
                self.height = Length::Auto;
                self.top = if before { dim.top } else { dim.top + dim.height };
                self.left = dim.left;
            }
            return;
        }

        if !nested {
            self.hide();
            return;
        }
        let Some(target) = target_dim else {
            self.hide();
            return;
        };

        let padding = target.offsets.padding;
        let border = target.offsets.border;
        let pad_top = if padding.top != 0.0 { padding.top } else { default_padding };
        let pad_left = if padding.left != 0.0 { padding.left } else { default_padding };
        self.top = target.top + pad_top + border.top;
        self.left = target.left + pad_left + border.left;
        self.width = Length::px(target.width - pad_left * 2.0 - border.left - border.right);
        self.height = Length::Auto;
    }
}
