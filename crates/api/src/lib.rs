//! Trowel API - editor facade, scenarios and the command/query language.
//!
//! This crate wires the drag engines to one component tree and its rendered
//! scene, and exposes them through serializable commands and queries.
//! Commands are recorded host input and are:
//! - Serializable (for recording gestures and replaying them)
//! - Routed like host events (to whichever session is running)
//! - Addressed by component name, not by id
//!
//! # Example
//! ```ignore
//! use api::{Command, Pointer, Query, Scenario, Target};
//!
//! let mut editor = Scenario::load("page.json")?.build()?;
//! editor.execute(Command::StartSort { target: Target::from("hero") });
//! editor.execute(Command::PointerMove(Pointer::at(150.0, 90.0)));
//! editor.execute(Command::PointerUp(Pointer::at(150.0, 90.0)));
//! let tree = editor.query(Query::Tree);
//! ```

mod command;
mod config;
mod editor;
mod error;
mod executor;
mod query;
mod scenario;
mod target;

pub use command::*;
pub use config::EditorConfig;
pub use editor::{Editor, EditorState};
pub use error::{ApiError, ScenarioError};
pub use query::*;
pub use scenario::*;
pub use target::*;
