//! Trowel commands: recorded host input replayed against an [`Editor`](crate::Editor).
//!
//! A command is one step of a gesture as the host saw it: a pointer event, a
//! key press, a scroll. The editor routes it to whichever session is
//! running, the same way the host's event listeners would.

use crate::{DragSubject, Target};
use drag::{DataTransfer, DropContent, Handle, Key, Modifiers};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pointer position of a command.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pointer {
    /// Client position inside the document of `frame`
    pub at: Vec2,
    /// Frame the event is dispatched on; the content document when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
    /// Dispatched on the editor document hosting the canvas, as frame
    /// drags are
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub canvas: bool,
    /// Component reported under the pointer; hit-tested when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub over: Option<String>,
    pub modifiers: Modifiers,
}

impl Pointer {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            at: Vec2::new(x, y),
            ..Default::default()
        }
    }

    pub fn over(mut self, name: impl Into<String>) -> Self {
        self.over = Some(name.into());
        self
    }

    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        self.frame = Some(frame.into());
        self
    }

    pub fn on_canvas(mut self) -> Self {
        self.canvas = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers = Modifiers::shift();
        self
    }
}

/// One replayable step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Sorting ===
    /// Start sorting components that are already in the tree.
    StartSort { target: Target },

    /// Start sorting content that doesn't exist in the tree yet.
    StartSortContent { content: DropContent },

    // === Pointer and keyboard ===
    /// Move the pointer; forwarded to the running session.
    PointerMove(Pointer),

    /// Release the pointer, committing the running session.
    PointerUp(Pointer),

    KeyDown {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },

    // === Viewport ===
    /// Scroll a frame document, or the content document.
    Scroll {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        frame: Option<String>,
        scroll: Vec2,
    },

    /// Scroll the canvas element itself.
    ScrollCanvas { scroll: Vec2 },

    /// Set the canvas zoom, in percent.
    SetZoom { zoom: f32 },

    /// Pan the canvas viewport.
    SetCoords { coords: Vec2 },

    /// Run one autoscroll animation frame.
    Tick,

    // === Resizing and free dragging ===
    /// Focus a component and start resizing it from `handle`.
    StartResize {
        target: String,
        handle: Handle,
        #[serde(flatten)]
        pointer: Pointer,
    },

    /// Start dragging a frame or an absolutely positioned component.
    StartDrag {
        subject: DragSubject,
        #[serde(flatten)]
        pointer: Pointer,
    },

    // === External drops ===
    /// Preset content for the next external drag, as a block would provide.
    SetDragContent {
        #[serde(default)]
        content: Option<DropContent>,
    },

    DragEnter(Pointer),

    DragOver(Pointer),

    DragLeave,

    /// Drop the dragged data at the pointer.
    Drop {
        #[serde(flatten)]
        pointer: Pointer,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<DataTransfer>,
    },

    // === History ===
    /// Revert the last undo group.
    Undo,
}

impl Command {
    /// Names of components the command refers to.
    pub fn component_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        match self {
            Command::StartSort { target } => match target {
                Target::Root => {}
                Target::Component(name) => names.push(name.as_str()),
                Target::Components(list) => names.extend(list.iter().map(String::as_str)),
            },
            Command::StartResize { target, pointer, .. } => {
                names.push(target.as_str());
                names.extend(pointer.over.as_deref());
            }
            Command::StartDrag { subject, pointer } => {
                if let DragSubject::Component(name) = subject {
                    names.push(name.as_str());
                }
                names.extend(pointer.over.as_deref());
            }
            Command::PointerMove(pointer)
            | Command::PointerUp(pointer)
            | Command::DragEnter(pointer)
            | Command::DragOver(pointer)
            | Command::Drop { pointer, .. } => names.extend(pointer.over.as_deref()),
            _ => {}
        }
        names
    }

    /// Names of frames the command refers to.
    pub fn frame_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        match self {
            Command::Scroll { frame, .. } => names.extend(frame.as_deref()),
            Command::StartDrag { subject, pointer } => {
                if let DragSubject::Frame(name) = subject {
                    names.push(name.as_str());
                }
                names.extend(pointer.frame.as_deref());
            }
            Command::StartResize { pointer, .. }
            | Command::PointerMove(pointer)
            | Command::PointerUp(pointer)
            | Command::DragEnter(pointer)
            | Command::DragOver(pointer)
            | Command::Drop { pointer, .. } => names.extend(pointer.frame.as_deref()),
            _ => {}
        }
        names
    }
}

/// Result of executing a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    /// Command succeeded.
    Success {
        /// Components inserted or moved by a committed drop.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        moved: Vec<String>,
        /// A session ended without changing the tree.
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        cancelled: bool,
    },
    /// Command failed.
    Error { message: String },
}

impl CommandResult {
    pub fn success() -> Self {
        Self::Success {
            moved: vec![],
            cancelled: false,
        }
    }

    pub fn ended(moved: Vec<String>, cancelled: bool) -> Self {
        Self::Success { moved, cancelled }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
