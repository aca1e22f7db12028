use crate::tree::ComponentId;
use thiserror::Error;

/// Misuse of the component tree. Invalid drops never end up here: they are
/// rejected by validation before the tree is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("component {0} not found")]
    NotFound(ComponentId),
    #[error("component {0} is already attached to a parent")]
    AlreadyAttached(ComponentId),
    #[error("component {0} is not attached to a parent")]
    NotAttached(ComponentId),
    #[error("cannot add {child} inside its own descendant {parent}")]
    Cycle {
        parent: ComponentId,
        child: ComponentId,
    },
    #[error("index {index} is out of range for a collection of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("the root component cannot be moved or removed")]
    RootImmovable,
}
