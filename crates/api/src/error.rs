use canvas::CanvasError;
use node::TreeError;
use scene_graph::SceneError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or build a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown component {0:?}")]
    UnknownComponent(String),
    #[error("unknown frame {0:?}")]
    UnknownFrame(String),
    #[error("component name {0:?} is used more than once")]
    DuplicateName(String),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Failure to execute a command against an editor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("unknown component {0:?}")]
    UnknownComponent(String),
    #[error("unknown frame {0:?}")]
    UnknownFrame(String),
    #[error("component {0:?} is not rendered")]
    NotRendered(String),
    #[error("component {0:?} has no box to resize")]
    NotResizable(String),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}
