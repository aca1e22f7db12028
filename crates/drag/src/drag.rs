//! # Drag
//!
//! The interactive core of the editor: everything that happens between a
//! pointer press and its release.
//!
//! ## Key Concepts
//!
//! - [`Dragger`]: free-form drag of one object with axis locking and guides
//! - [`Resizer`]: eight-handle resize of a box
//! - [`Sorter`]: reorders components and drops new content, resolving the
//!   target under the pointer and committing the move on release
//! - [`Droppable`]: feeds external drags into a sorter or an absolute dragger
//!
//! Every session step borrows the tree, the scene and the canvas through a
//! [`DragContext`] and reports what happened as [`DragEvent`]s. Invalid moves
//! are outcomes, reported through the [`WarningLog`], never errors.

pub mod content;
pub mod context;
pub mod dragger;
pub mod droppable;
pub mod events;
pub mod input;
pub mod resizer;
pub mod sorter;

pub use content::{content_by_data, DataTransfer, DragDataResult, DropContent, DroppedFile};
pub use context::DragContext;
pub use dragger::{
    Axis, ComponentDragHandler, DragHandler, Dragger, DraggerConfig, FrameDragHandler, Guide,
};
pub use droppable::{Droppable, DroppableConfig};
pub use events::{DragEvent, EventSink, NoEvents};
pub use input::{Key, KeyEvent, Modifiers, PointerEvent};
pub use resizer::{
    ComponentResizeTarget, Handle, ResizeBox, ResizeTarget, Resizer, ResizerConfig, UpdateOptions,
};
pub use sorter::{
    Direction, LogWarnings, Method, MoveResult, MoveSource, MoveWarning, Placeholder, Pos,
    RecordedWarnings, SortOutcome, SortSource, Sorter, SorterConfig, SorterState,
    ValidationResult, WarningLog,
};
