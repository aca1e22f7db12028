//! Rendered elements and the computed style values the drag engine reads.

use crate::DocumentId;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trowel_core::{Bounds, BoxOffsets};

macro_rules! css_keyword {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Default,
            Serialize,
            Deserialize,
            strum_macros::Display,
            strum_macros::EnumString,
        )]
        #[serde(rename_all = "kebab-case")]
        #[strum(serialize_all = "kebab-case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }
    };
}

css_keyword!(
    /// `display`
    CssDisplay {
        #[default]
        Block,
        Inline,
        InlineBlock,
        Flex,
        InlineFlex,
        Grid,
        InlineGrid,
        Table,
        TableRow,
        TableCell,
        ListItem,
        Contents,
        None,
    }
);

css_keyword!(
    /// `float`
    CssFloat {
        #[default]
        None,
        Left,
        Right,
    }
);

css_keyword!(
    /// `position`
    CssPosition {
        #[default]
        Static,
        Relative,
        Absolute,
        Fixed,
        Sticky,
    }
);

css_keyword!(
    /// `overflow`
    CssOverflow {
        #[default]
        Visible,
        Hidden,
        Clip,
        Scroll,
        Auto,
    }
);

css_keyword!(
    /// `flex-direction`
    FlexDirection {
        #[default]
        Row,
        RowReverse,
        Column,
        ColumnReverse,
    }
);

impl FlexDirection {
    pub fn is_column(&self) -> bool {
        matches!(self, FlexDirection::Column | FlexDirection::ColumnReverse)
    }
}

/// The subset of computed style that decides how siblings flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComputedStyle {
    pub display: CssDisplay,
    pub float: CssFloat,
    pub position: CssPosition,
    pub overflow: CssOverflow,
    pub flex_direction: FlexDirection,
}

/// One node of a rendered document.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) document: DocumentId,
    pub(crate) parent: Option<crate::ElementId>,
    pub(crate) children: Vec<crate::ElementId>,

    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub style: ComputedStyle,
    /// Border box in the coordinate space of the owning document, ignoring
    /// its scroll position
    pub rect: Bounds,
    pub offsets: BoxOffsets,
    /// Text nodes take part in dims but are never hit-test targets
    pub text: bool,
    pub visible: bool,
}

impl Element {
    pub const TEXT_TAG: &'static str = "#text";

    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            document: DocumentId::default(),
            parent: None,
            children: Vec::new(),
            tag: tag.into(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: ComputedStyle::default(),
            rect: Bounds::zero(),
            offsets: BoxOffsets::default(),
            text: false,
            visible: true,
        }
    }

    pub fn text_node(rect: Bounds) -> Self {
        let mut element = Self::new(Self::TEXT_TAG).with_rect(rect);
        element.text = true;
        element.style.display = CssDisplay::Inline;
        element
    }

    pub fn with_rect(mut self, rect: Bounds) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_offsets(mut self, offsets: BoxOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn parent(&self) -> Option<crate::ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[crate::ElementId] {
        &self.children
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn size(&self) -> Vec2 {
        self.rect.size()
    }
}
