//! Notifications emitted while dragging, sorting, resizing and dropping.

use crate::resizer::{Handle, ResizeBox};
use crate::sorter::{Pos, ValidationResult};
use canvas::{Spot, SpotEvent};
use glam::Vec2;
use node::ComponentId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragEvent {
    SortStart {
        sources: Vec<ComponentId>,
    },
    /// The pointer moved during a sort
    SortMove {
        target: Option<ComponentId>,
        pos: Pos,
        pointer: Vec2,
    },
    Validation(ValidationResult),
    Drop {
        target: Option<ComponentId>,
        index: usize,
        component: Option<ComponentId>,
    },
    SortEnd {
        moved: Vec<ComponentId>,
        cancelled: bool,
    },
    DraggerStart {
        position: Vec2,
    },
    DraggerMove {
        position: Vec2,
        delta: Vec2,
    },
    DraggerEnd {
        position: Vec2,
        cancelled: bool,
    },
    ResizeStart {
        handle: Handle,
    },
    ResizeMove {
        rect: ResizeBox,
    },
    ResizeEnd {
        rect: ResizeBox,
        cancelled: bool,
    },
    SpotAdded {
        spot: Spot,
    },
    SpotUpdated {
        spot: Spot,
    },
    SpotRemoved {
        spot: Spot,
    },
    CanvasDragEnter,
    CanvasDragOver,
    CanvasDrop {
        component: ComponentId,
    },
    CanvasDragEnd {
        cancelled: bool,
    },
}

impl From<SpotEvent> for DragEvent {
    fn from(event: SpotEvent) -> Self {
        match event {
            SpotEvent::Added { spot } => DragEvent::SpotAdded { spot },
            SpotEvent::Updated { spot } => DragEvent::SpotUpdated { spot },
            SpotEvent::Removed { spot } => DragEvent::SpotRemoved { spot },
        }
    }
}

/// Receiver of [`DragEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: DragEvent);
}

impl EventSink for Vec<DragEvent> {
    fn emit(&mut self, event: DragEvent) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventSink for NoEvents {
    fn emit(&mut self, _event: DragEvent) {}
}
