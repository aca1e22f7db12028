//! Naming components and frames from commands and queries.
//!
//! Scenarios give components a `name`; commands refer to them by it so a
//! recorded gesture stays readable and survives re-building the tree.

use serde::{Deserialize, Serialize};

/// Specifies which components a command targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The root (wrapper) component.
    Root,

    /// One component by name.
    Component(String),

    /// Several components by name.
    Components(Vec<String>),
}

impl Default for Target {
    fn default() -> Self {
        Self::Root
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Self::Component(name.to_string())
    }
}

impl From<Vec<String>> for Target {
    fn from(names: Vec<String>) -> Self {
        Self::Components(names)
    }
}

/// What a [`Command::StartDrag`](crate::Command::StartDrag) moves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragSubject {
    /// A canvas frame by name
    Frame(String),
    /// An absolutely positioned component
    Component(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_json_forms() {
        let target: Target = serde_json::from_str(r#"{ "component": "div0" }"#).unwrap();
        assert_eq!(target, Target::from("div0"));

        let target: Target = serde_json::from_str(r#""root""#).unwrap();
        assert_eq!(target, Target::Root);

        let target: Target = serde_json::from_str(r#"{ "components": ["a", "b"] }"#).unwrap();
        assert_eq!(
            target,
            Target::Components(vec!["a".to_string(), "b".to_string()])
        );
    }
}
