//! Component records stored in the [`ComponentTree`](crate::ComponentTree).
//!
//! A component only carries the attributes the drag engine consults: its
//! kind and tag, the draggable/droppable predicates, interaction flags and an
//! inline style map used for visibility, absolute positioning and resizing.

use crate::predicate::Predicate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Interaction state of a component.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    None,
    Selected,
    Hovered,
    /// The current drop target of an active sort
    #[serde(rename = "selected-parent")]
    #[strum(serialize = "selected-parent")]
    SelectedParent,
    /// Set on the source of an active sort so it is not hovered or selected
    Freezed,
}

/// Boolean capabilities of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentFlags {
    pub layerable: bool,
    pub hoverable: bool,
    pub resizable: bool,
    pub badgable: bool,
    pub selectable: bool,
    /// Accepts being dropped inside text components at the caret position
    pub textable: bool,
}

impl Default for ComponentFlags {
    fn default() -> Self {
        Self {
            layerable: true,
            hoverable: true,
            resizable: true,
            badgable: true,
            selectable: true,
            textable: false,
        }
    }
}

/// A node of the component tree.
#[derive(Debug, Clone)]
pub struct Component {
    /// Component type, e.g. `default`, `text`, `image`, `link`, `wrapper`
    pub kind: String,
    pub tag_name: String,
    /// Optional handle used to refer to the component from scenarios and queries
    pub name: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub content: String,
    pub draggable: Predicate,
    pub droppable: Predicate,
    pub flags: ComponentFlags,
    pub status: Status,
}

impl Component {
    pub const DEFAULT_KIND: &'static str = "default";
    pub const TEXT_KIND: &'static str = "text";
    pub const IMAGE_KIND: &'static str = "image";
    pub const LINK_KIND: &'static str = "link";
    pub const WRAPPER_KIND: &'static str = "wrapper";

    /// Creates a component of the given kind with the defaults of that kind.
    ///
    /// Text and image components don't accept children.
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        let tag_name = match kind.as_str() {
            Self::IMAGE_KIND => "img",
            Self::LINK_KIND => "a",
            Self::WRAPPER_KIND => "body",
            _ => "div",
        }
        .to_string();
        let droppable = !matches!(kind.as_str(), Self::TEXT_KIND | Self::IMAGE_KIND);
        let draggable = kind != Self::WRAPPER_KIND;

        Self {
            kind,
            tag_name,
            name: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            content: String::new(),
            draggable: Predicate::Always(draggable),
            droppable: Predicate::Always(droppable),
            flags: ComponentFlags::default(),
            status: Status::None,
        }
    }

    pub fn wrapper() -> Self {
        Self::new(Self::WRAPPER_KIND)
    }

    pub fn text(content: impl Into<String>) -> Self {
        let mut component = Self::new(Self::TEXT_KIND);
        component.content = content.into();
        component
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self::new(Self::IMAGE_KIND).with_attribute("src", src)
    }

    pub fn link(href: impl Into<String>) -> Self {
        Self::new(Self::LINK_KIND).with_attribute("href", href)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tag(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = tag_name.into();
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

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_draggable(mut self, predicate: Predicate) -> Self {
        self.draggable = predicate;
        self
    }

    pub fn with_droppable(mut self, predicate: Predicate) -> Self {
        self.droppable = predicate;
        self
    }

    pub fn with_textable(mut self, textable: bool) -> Self {
        self.flags.textable = textable;
        self
    }

    pub fn style_value(&self, key: &str) -> Option<&str> {
        self.style.get(key).map(String::as_str)
    }

    pub fn set_style(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.style.insert(key.into(), value.into());
    }

    pub fn remove_style(&mut self, key: &str) -> Option<String> {
        self.style.remove(key)
    }

    /// A component hidden with `display: none` is skipped when dims are built
    pub fn is_visible(&self) -> bool {
        self.style_value("display")
            .map(|display| display.trim() != "none")
            .unwrap_or(true)
    }

    pub fn is_text(&self) -> bool {
        self.kind == Self::TEXT_KIND
    }

    pub fn is_textable(&self) -> bool {
        self.flags.textable
    }

    /// Short label used in logs: the name when present, otherwise the kind
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_defaults() {
        let text = Component::text("Hello");
        assert!(text.is_text());
        assert_eq!(text.droppable, Predicate::Always(false));
        assert_eq!(text.content, "Hello");

        let image = Component::image("a.png");
        assert_eq!(image.tag_name, "img");
        assert_eq!(image.attributes.get("src").map(String::as_str), Some("a.png"));

        let wrapper = Component::wrapper();
        assert_eq!(wrapper.draggable, Predicate::Always(false));
        assert_eq!(wrapper.droppable, Predicate::Always(true));
    }

    #[test]
    fn test_visibility_follows_display_style() {
        let mut component = Component::default();
        assert!(component.is_visible());
        component.set_style("display", "none");
        assert!(!component.is_visible());
        component.set_style("display", "block");
        assert!(component.is_visible());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(Status::Freezed.to_string(), "freezed");
        assert_eq!("selected".parse::<Status>().unwrap(), Status::Selected);
    }
}
