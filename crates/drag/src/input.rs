//! Host input delivered to the drag engine.
//!
//! Pointer positions are client coordinates of the document the event was
//! dispatched on, the way a DOM event reports `clientX`/`clientY`.

use glam::Vec2;
use scene_graph::{DocumentId, ElementId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub document: DocumentId,
    pub client: Vec2,
    /// Element under the pointer as reported by the host, if any
    pub target: Option<ElementId>,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(document: DocumentId, client: Vec2) -> Self {
        Self {
            document,
            client,
            target: None,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum Key {
    Escape,
    Shift,
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub document: DocumentId,
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(document: DocumentId, key: Key) -> Self {
        Self {
            document,
            key,
            modifiers: Modifiers::default(),
        }
    }
}
