//! # Component Tree
//!
//! The model side of the editor: components with their draggable/droppable
//! rules, the tree that orders them and the undo history that groups the
//! two halves of a move.
//!
//! ## Key Types
//!
//! - [`Component`]: kind, tag, style map, predicates and interaction flags
//! - [`Predicate`]: constant, selector list or custom rule, evaluated through
//!   a single [`Predicate::evaluate`]
//! - [`ComponentTree`]: slotmap-backed tree with `add` / `remove` options
//!   mirroring collection semantics (`at`, `action`, `temporary`)
//! - [`History`]: undo groups; a temporary removal is merged with the next add

pub mod component;
pub mod def;
pub mod error;
pub mod history;
pub mod predicate;
pub mod tree;

pub use component::{Component, ComponentFlags, Status};
pub use def::ComponentDef;
pub use error::TreeError;
pub use history::{History, TreeChange, UndoGroup};
pub use predicate::{Predicate, PredicateContext, PredicateValue, Verdict};
pub use tree::{AddOptions, ComponentId, ComponentTree, MoveAction, RemoveOptions};
