//! # Scene Graph
//!
//! A mirror of the rendered documents the editor works against: the editor
//! page itself and one document per canvas frame. Elements carry only what
//! the drag engine needs to reason about geometry: layout boxes, box model
//! offsets and the computed style keywords that decide whether siblings flow
//! vertically or horizontally.
//!
//! ## Key Concepts
//!
//! - **Documents**: each has a root element, a scroll position, a viewport
//!   size and, for frame documents, the host element (the iframe) that
//!   embeds it in its parent document
//! - **Element rects**: expressed in the owning document's layout space;
//!   [`SceneGraph::client_rect`] subtracts the document scroll the way a
//!   bounding client rect would
//! - **Data Mapping**: a side table binds elements to the components they
//!   render, so no model data is attached to elements themselves
//!
//! Selector matching and hit testing are kept in their own modules.

pub mod element;
mod hit_test;
mod selector;

pub use element::{
    ComputedStyle, CssDisplay, CssFloat, CssOverflow, CssPosition, Element, FlexDirection,
};

use glam::Vec2;
use node::ComponentId;
use slotmap::{KeyData, SlotMap};
use std::collections::HashMap;
use std::fmt::{self, Display};
use thiserror::Error;
use trowel_core::Bounds;

slotmap::new_key_type! {
    /// Identifier of a rendered element.
    pub struct ElementId;
    /// Identifier of a rendered document.
    pub struct DocumentId;
}

impl ElementId {
    pub fn as_u64(self) -> u64 {
        self.0.as_ffi()
    }
}

impl From<u64> for ElementId {
    fn from(value: u64) -> Self {
        Self(KeyData::from_ffi(value))
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_ffi())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("element {0} not found")]
    ElementNotFound(ElementId),
    #[error("document {0} not found")]
    DocumentNotFound(DocumentId),
    #[error("element {child} belongs to another document than {parent}")]
    CrossDocument { parent: ElementId, child: ElementId },
    #[error("cannot move {child} inside its own descendant {parent}")]
    Cycle { parent: ElementId, child: ElementId },
    #[error("the root element of a document cannot be moved or removed")]
    DocumentRoot,
}

/// One rendered document.
#[derive(Debug, Clone)]
pub struct Document {
    pub root: ElementId,
    /// Scroll position of the document viewport
    pub scroll: Vec2,
    /// Size of the document viewport
    pub viewport: Vec2,
    /// Element embedding this document in its parent document
    pub host: Option<ElementId>,
}

/// All rendered documents plus the element↔component side table.
#[derive(Debug, Default)]
pub struct SceneGraph {
    documents: SlotMap<DocumentId, Document>,
    elements: SlotMap<ElementId, Element>,
    element_to_component: HashMap<ElementId, ComponentId>,
    component_to_element: HashMap<ComponentId, ElementId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document whose root element fills the viewport.
    ///
    /// `host` is the iframe element of the parent document, if any.
    pub fn create_document(&mut self, viewport: Vec2, host: Option<ElementId>) -> DocumentId {
        let document = self.documents.insert_with_key(|_| Document {
            root: ElementId::default(),
            scroll: Vec2::ZERO,
            viewport,
            host,
        });
        let mut root = Element::new("body").with_rect(Bounds::from_origin_size(Vec2::ZERO, viewport));
        root.document = document;
        let root = self.elements.insert(root);
        if let Some(doc) = self.documents.get_mut(document) {
            doc.root = root;
        }
        document
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn document_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.get_mut(id)
    }

    pub fn documents(&self) -> impl Iterator<Item = (DocumentId, &Document)> {
        self.documents.iter()
    }

    pub fn document_of(&self, el: ElementId) -> Option<DocumentId> {
        self.elements.get(el).map(|e| e.document)
    }

    /// The document embedded by `host`, if `host` is an iframe element
    pub fn hosted_document(&self, host: ElementId) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|(_, doc)| doc.host == Some(host))
            .map(|(id, _)| id)
    }

    pub fn set_scroll(&mut self, document: DocumentId, scroll: Vec2) -> Result<(), SceneError> {
        let doc = self
            .documents
            .get_mut(document)
            .ok_or(SceneError::DocumentNotFound(document))?;
        doc.scroll = scroll;
        Ok(())
    }

    pub fn scroll(&self, document: DocumentId) -> Vec2 {
        self.documents
            .get(document)
            .map(|doc| doc.scroll)
            .unwrap_or(Vec2::ZERO)
    }

    /// Appends `element` to `parent`, or inserts it at `at`
    pub fn create_element(
        &mut self,
        parent: ElementId,
        mut element: Element,
        at: Option<usize>,
    ) -> Result<ElementId, SceneError> {
        let document = self
            .elements
            .get(parent)
            .ok_or(SceneError::ElementNotFound(parent))?
            .document;
        element.document = document;
        element.parent = Some(parent);
        element.children.clear();
        let id = self.elements.insert(element);
        if let Some(parent_el) = self.elements.get_mut(parent) {
            let index = at.unwrap_or(parent_el.children.len()).min(parent_el.children.len());
            parent_el.children.insert(index, id);
        }
        Ok(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|el| el.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn index(&self, id: ElementId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|child| *child == id)
    }

    pub fn is_text(&self, id: ElementId) -> bool {
        self.elements.get(id).map(|el| el.text).unwrap_or(false)
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Moves `id` under `parent` at `index` (clamped), within one document
    pub fn move_element(
        &mut self,
        id: ElementId,
        parent: ElementId,
        index: usize,
    ) -> Result<(), SceneError> {
        let child_doc = self.document_of(id).ok_or(SceneError::ElementNotFound(id))?;
        let parent_doc = self
            .document_of(parent)
            .ok_or(SceneError::ElementNotFound(parent))?;
        if child_doc != parent_doc {
            return Err(SceneError::CrossDocument { parent, child: id });
        }
        if id == parent || self.is_ancestor(id, parent) {
            return Err(SceneError::Cycle { parent, child: id });
        }
        let old_parent = self.parent(id).ok_or(SceneError::DocumentRoot)?;

        if let Some(el) = self.elements.get_mut(old_parent) {
            el.children.retain(|child| *child != id);
        }
        if let Some(el) = self.elements.get_mut(parent) {
            let index = index.min(el.children.len());
            el.children.insert(index, id);
        }
        if let Some(el) = self.elements.get_mut(id) {
            el.parent = Some(parent);
        }
        Ok(())
    }

    /// Removes `id` and its subtree, dropping their bindings
    pub fn remove(&mut self, id: ElementId) -> Result<(), SceneError> {
        let parent = self
            .elements
            .get(id)
            .ok_or(SceneError::ElementNotFound(id))?
            .parent
            .ok_or(SceneError::DocumentRoot)?;
        if let Some(el) = self.elements.get_mut(parent) {
            el.children.retain(|child| *child != id);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(el) = self.elements.remove(current) {
                stack.extend(el.children);
            }
            self.unbind(current);
        }
        Ok(())
    }

    /// Records that `element` renders `component`
    pub fn bind(&mut self, element: ElementId, component: ComponentId) {
        if let Some(previous) = self.component_to_element.insert(component, element) {
            if previous != element {
                self.element_to_component.remove(&previous);
            }
        }
        if let Some(previous) = self.element_to_component.insert(element, component) {
            if previous != component {
                self.component_to_element.remove(&previous);
            }
        }
    }

    pub fn unbind(&mut self, element: ElementId) -> Option<ComponentId> {
        let component = self.element_to_component.remove(&element)?;
        self.component_to_element.remove(&component);
        Some(component)
    }

    pub fn component_of(&self, element: ElementId) -> Option<ComponentId> {
        self.element_to_component.get(&element).copied()
    }

    pub fn element_of(&self, component: ComponentId) -> Option<ElementId> {
        self.component_to_element.get(&component).copied()
    }

    /// Bounding box relative to the document viewport (layout rect minus scroll)
    pub fn client_rect(&self, id: ElementId) -> Option<Bounds> {
        let el = self.elements.get(id)?;
        Some(el.rect.translate(-self.scroll(el.document)))
    }

    /// Whether `id` matches a comma separated selector list
    pub fn matches(&self, id: ElementId, selectors: &str) -> bool {
        selector::matches_list(self, id, selectors)
    }

    /// `id` or its nearest ancestor matching `selectors`
    pub fn closest(&self, id: ElementId, selectors: &str) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(el) = current {
            if self.matches(el, selectors) {
                return Some(el);
            }
            current = self.parent(el);
        }
        None
    }

    /// Nearest element (starting at `id`) that is bound to a component
    pub fn closest_bound(&self, id: ElementId) -> Option<(ElementId, ComponentId)> {
        let mut current = Some(id);
        while let Some(el) = current {
            if let Some(component) = self.component_of(el) {
                return Some((el, component));
            }
            current = self.parent(el);
        }
        None
    }

    /// Reorders the children of `parent` so bound children follow the order of
    /// `components`. Unbound children keep their slots.
    pub fn sync_children(&mut self, parent: ElementId, components: &[ComponentId]) {
        let ordered: Vec<ElementId> = components
            .iter()
            .filter_map(|component| self.element_of(*component))
            .filter(|el| self.parent(*el) == Some(parent))
            .collect();
        let Some(parent_el) = self.elements.get(parent) else {
            return;
        };
        let bound_slots: Vec<usize> = parent_el
            .children
            .iter()
            .enumerate()
            .filter(|(_, child)| self.element_to_component.contains_key(child))
            .map(|(slot, _)| slot)
            .collect();
        if bound_slots.len() != ordered.len() {
            log::debug!("skipping child sync of {parent}: bound children differ from model");
            return;
        }
        if let Some(parent_el) = self.elements.get_mut(parent) {
            for (slot, el) in bound_slots.into_iter().zip(ordered) {
                parent_el.children[slot] = el;
            }
        }
    }
}
