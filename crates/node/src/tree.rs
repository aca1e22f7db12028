//! The component tree.
//!
//! Components live in a slotmap and are linked by parent/children lists. A
//! component may exist detached from the tree: freshly created drop content,
//! a probe used to test droppability, or a component that was removed but
//! not destroyed. Only the wrapper root is never detached.

use crate::component::Component;
use crate::error::TreeError;
use crate::history::{History, TreeChange, UndoGroup};
use serde::{Deserialize, Serialize};
use slotmap::{KeyData, SlotMap};
use std::cmp::Ordering;
use std::fmt::{self, Display};

slotmap::new_key_type! {
    /// Stable handle of a component.
    pub struct ComponentId;
}

impl ComponentId {
    pub fn as_u64(self) -> u64 {
        self.0.as_ffi()
    }
}

impl From<u64> for ComponentId {
    fn from(value: u64) -> Self {
        Self(KeyData::from_ffi(value))
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

/// Why a component was added, forwarded to undo groups and observers.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MoveAction {
    MoveComponent,
    AddComponent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Insertion index; appends when `None`
    pub at: Option<usize>,
    pub action: Option<MoveAction>,
    pub temporary: bool,
}

impl AddOptions {
    pub fn at(index: usize) -> Self {
        Self {
            at: Some(index),
            ..Default::default()
        }
    }

    pub fn with_action(mut self, action: MoveAction) -> Self {
        self.action = Some(action);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    /// The removal is the first half of a move; undo merges it with the add
    pub temporary: bool,
}

impl RemoveOptions {
    pub fn temporary() -> Self {
        Self { temporary: true }
    }
}

#[derive(Debug)]
struct TreeNode {
    component: Component,
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
}

/// Owns every component and the structure connecting them.
#[derive(Debug)]
pub struct ComponentTree {
    root: ComponentId,
    nodes: SlotMap<ComponentId, TreeNode>,
    history: History,
}

impl ComponentTree {
    /// Creates a tree with a wrapper root
    pub fn new() -> Self {
        Self::with_root(Component::wrapper())
    }

    pub fn with_root(root: Component) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(TreeNode {
            component: root,
            parent: None,
            children: Vec::new(),
        });
        Self {
            root,
            nodes,
            history: History::new(),
        }
    }

    pub fn root(&self) -> ComponentId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.nodes.get(id).map(|node| &node.component)
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.nodes.get_mut(id).map(|node| &mut node.component)
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children of `id` in order; empty for unknown ids
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Position of `id` inside its parent's collection
    pub fn index(&self, id: ComponentId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|child| *child == id)
    }

    /// Creates a detached component
    pub fn create(&mut self, component: Component) -> ComponentId {
        self.nodes.insert(TreeNode {
            component,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Creates a component and adds it to `parent`
    pub fn insert(
        &mut self,
        parent: ComponentId,
        component: Component,
        at: Option<usize>,
    ) -> Result<ComponentId, TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::NotFound(parent));
        }
        let id = self.create(component);
        self.add(
            parent,
            id,
            AddOptions {
                at,
                ..Default::default()
            },
        )?;
        Ok(id)
    }

    /// Adds the detached component `id` to `parent`'s collection.
    ///
    /// Returns the index the component landed at.
    pub fn add(
        &mut self,
        parent: ComponentId,
        id: ComponentId,
        options: AddOptions,
    ) -> Result<usize, TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::NotFound(parent));
        }
        let node = self.nodes.get(id).ok_or(TreeError::NotFound(id))?;
        if id == self.root {
            return Err(TreeError::RootImmovable);
        }
        if node.parent.is_some() {
            return Err(TreeError::AlreadyAttached(id));
        }
        if parent == id || self.is_ancestor(id, parent) {
            return Err(TreeError::Cycle { parent, child: id });
        }

        let len = self.children(parent).len();
        let index = options.at.unwrap_or(len);
        if index > len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }

        self.attach(parent, id, index);
        log::trace!("added component {id} to {parent} at {index}");
        self.history
            .record_add(TreeChange::Added { id, parent, index }, options.action);
        Ok(index)
    }

    /// Detaches `id` from its parent without destroying it.
    ///
    /// Returns the former parent and index.
    pub fn remove(
        &mut self,
        id: ComponentId,
        options: RemoveOptions,
    ) -> Result<(ComponentId, usize), TreeError> {
        if id == self.root {
            return Err(TreeError::RootImmovable);
        }
        let (parent, index) = self.detach(id)?;
        log::trace!(
            "removed component {id} from {parent} at {index} (temporary: {})",
            options.temporary
        );
        self.history.record_remove(
            TreeChange::Removed { id, parent, index },
            options.temporary,
        );
        Ok((parent, index))
    }

    /// Drops `id` and its whole subtree.
    ///
    /// Destroying is not recorded in the history: it is used for transient
    /// components that never took part in an undoable change.
    pub fn destroy(&mut self, id: ComponentId) -> Result<Component, TreeError> {
        if id == self.root {
            return Err(TreeError::RootImmovable);
        }
        if !self.contains(id) {
            return Err(TreeError::NotFound(id));
        }
        if self.parent(id).is_some() {
            self.detach(id)?;
        }

        let mut stack = self.children(id).to_vec();
        while let Some(child) = stack.pop() {
            stack.extend_from_slice(self.children(child));
            self.nodes.remove(child);
        }
        self.nodes
            .remove(id)
            .map(|node| node.component)
            .ok_or(TreeError::NotFound(id))
    }

    /// Whether `ancestor` is a strict ancestor of `node`
    pub fn is_ancestor(&self, ancestor: ComponentId, node: ComponentId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether `id` is reachable from the root
    pub fn is_attached(&self, id: ComponentId) -> bool {
        id == self.root || self.is_ancestor(self.root, id)
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut result = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            result.push(parent);
            current = self.parent(parent);
        }
        result
    }

    /// `id` and its descendants in document order
    pub fn descendants(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut result = Vec::new();
        if !self.contains(id) {
            return result;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    /// Finds a component by its name, searching the attached tree first
    pub fn find_by_name(&self, name: &str) -> Option<ComponentId> {
        let has_name = |id: &ComponentId| {
            self.get(*id)
                .and_then(|component| component.name.as_deref())
                == Some(name)
        };
        self.descendants(self.root)
            .into_iter()
            .find(has_name)
            .or_else(|| self.nodes.keys().find(has_name))
    }

    /// Sibling indices from the topmost ancestor down to `id`
    fn path(&self, id: ComponentId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(index) = self.index(current) {
            path.push(index);
            current = match self.parent(current) {
                Some(parent) => parent,
                None => break,
            };
        }
        path.reverse();
        path
    }

    /// Orders two components by document order.
    ///
    /// The first differing sibling index under their lowest common ancestor
    /// decides; an ancestor sorts before its descendants.
    pub fn compare_tree_order(&self, a: ComponentId, b: ComponentId) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let path_a = self.path(a);
        let path_b = self.path(b);
        for (ia, ib) in path_a.iter().zip(path_b.iter()) {
            if ia != ib {
                return ia.cmp(ib);
            }
        }
        path_a.len().cmp(&path_b.len())
    }

    pub fn sort_by_tree_order(&self, ids: &mut [ComponentId]) {
        ids.sort_by(|a, b| self.compare_tree_order(*a, *b));
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Reverts the last undo group. Returns the reverted group.
    pub fn undo(&mut self) -> Option<UndoGroup> {
        let group = self.history.pop()?;
        for change in group.changes.iter().rev() {
            match *change {
                TreeChange::Added { id, .. } => {
                    if let Err(err) = self.detach(id) {
                        log::warn!("undo could not detach {id}: {err}");
                    }
                }
                TreeChange::Removed { id, parent, index } => {
                    let len = self.children(parent).len();
                    if self.contains(id) && self.contains(parent) {
                        self.attach(parent, id, index.min(len));
                    }
                }
            }
        }
        log::debug!("undid {} tree change(s)", group.changes.len());
        Some(group)
    }

    fn attach(&mut self, parent: ComponentId, id: ComponentId, index: usize) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.insert(index, id);
        }
    }

    fn detach(&mut self, id: ComponentId) -> Result<(ComponentId, usize), TreeError> {
        let parent = self
            .nodes
            .get(id)
            .ok_or(TreeError::NotFound(id))?
            .parent
            .ok_or(TreeError::NotAttached(id))?;
        let index = self.index(id).ok_or(TreeError::NotAttached(id))?;

        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.remove(index);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
        }
        Ok((parent, index))
    }
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Component {
        Component::default().with_name(name)
    }

    fn names(tree: &ComponentTree, parent: ComponentId) -> Vec<String> {
        tree.children(parent)
            .iter()
            .map(|id| tree.get(*id).unwrap().label().to_string())
            .collect()
    }

    #[test]
    fn test_add_and_remove() {
        let mut tree = ComponentTree::new();
        let root = tree.root();
        let a = tree.insert(root, named("a"), None).unwrap();
        let c = tree.insert(root, named("c"), None).unwrap();
        let b = tree.insert(root, named("b"), Some(1)).unwrap();

        assert_eq!(names(&tree, root), ["a", "b", "c"]);
        assert_eq!(tree.index(c), Some(2));
        assert_eq!(tree.parent(b), Some(root));

        assert_eq!(tree.remove(a, RemoveOptions::default()), Ok((root, 0)));
        assert_eq!(names(&tree, root), ["b", "c"]);
        assert!(tree.contains(a));
        assert!(!tree.is_attached(a));
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut tree = ComponentTree::new();
        let root = tree.root();
        let outer = tree.insert(root, named("outer"), None).unwrap();
        let inner = tree.insert(outer, named("inner"), None).unwrap();

        assert_eq!(
            tree.add(inner, outer, AddOptions::default()),
            Err(TreeError::AlreadyAttached(outer))
        );

        tree.remove(outer, RemoveOptions::default()).unwrap();
        assert_eq!(
            tree.add(inner, outer, AddOptions::default()),
            Err(TreeError::Cycle {
                parent: inner,
                child: outer
            })
        );
        assert_eq!(
            tree.add(root, outer, AddOptions::at(3)),
            Err(TreeError::IndexOutOfRange { index: 3, len: 0 })
        );
        assert_eq!(
            tree.remove(root, RemoveOptions::default()),
            Err(TreeError::RootImmovable)
        );
    }

    #[test]
    fn test_destroy_removes_subtree() {
        let mut tree = ComponentTree::new();
        let root = tree.root();
        let outer = tree.insert(root, named("outer"), None).unwrap();
        let inner = tree.insert(outer, named("inner"), None).unwrap();

        let destroyed = tree.destroy(outer).unwrap();
        assert_eq!(destroyed.label(), "outer");
        assert!(!tree.contains(inner));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_tree_order() {
        let mut tree = ComponentTree::new();
        let root = tree.root();
        let a = tree.insert(root, named("a"), None).unwrap();
        let a1 = tree.insert(a, named("a1"), None).unwrap();
        let b = tree.insert(root, named("b"), None).unwrap();
        let b1 = tree.insert(b, named("b1"), None).unwrap();

        assert_eq!(tree.compare_tree_order(a1, b), Ordering::Less);
        assert_eq!(tree.compare_tree_order(b1, a1), Ordering::Greater);
        assert_eq!(tree.compare_tree_order(a, a1), Ordering::Less);

        let mut ids = vec![b1, a, b, a1];
        tree.sort_by_tree_order(&mut ids);
        assert_eq!(ids, vec![a, a1, b, b1]);
        assert_eq!(tree.find_by_name("b1"), Some(b1));
    }

    #[test]
    fn test_temporary_remove_is_grouped_with_add() {
        let mut tree = ComponentTree::new();
        let root = tree.root();
        let a = tree.insert(root, named("a"), None).unwrap();
        tree.insert(root, named("b"), None).unwrap();
        tree.insert(root, named("c"), None).unwrap();
        let groups_before = tree.history().len();

        tree.remove(a, RemoveOptions::temporary()).unwrap();
        assert!(tree.history().has_pending());
        tree.add(
            root,
            a,
            AddOptions::at(2).with_action(MoveAction::MoveComponent),
        )
        .unwrap();

        assert_eq!(tree.history().len(), groups_before + 1);
        assert_eq!(names(&tree, root), ["b", "c", "a"]);

        let group = tree.undo().unwrap();
        assert_eq!(group.changes.len(), 2);
        assert_eq!(group.action, Some(MoveAction::MoveComponent));
        assert_eq!(names(&tree, root), ["a", "b", "c"]);
    }

    #[test]
    fn test_move_action_strings() {
        assert_eq!(MoveAction::AddComponent.to_string(), "add-component");
        assert_eq!(
            serde_json::to_string(&MoveAction::MoveComponent).unwrap(),
            "\"move-component\""
        );
    }
}
