//! Memoized document and canvas offsets.
//!
//! Offsets are read on every pointer move, so they are cached until
//! something that moves documents around happens: scroll, resize, zoom, pan,
//! frame moves or an explicit refresh. A stale entry is a correctness bug,
//! nested frames would hit-test against the wrong origin.

use glam::Vec2;
use scene_graph::DocumentId;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use trowel_core::Bounds;

/// Where a document's viewport sits on screen and how much it is scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentOffset {
    /// Screen position of the document viewport's top-left corner
    pub origin: Vec2,
    /// Factor from document pixels to screen pixels
    pub scale: f32,
}

impl DocumentOffset {
    pub const IDENTITY: DocumentOffset = DocumentOffset {
        origin: Vec2::ZERO,
        scale: 1.0,
    };

    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        self.origin + point * self.scale
    }
}

#[derive(Debug, Default)]
pub struct OffsetCache {
    canvas: Cell<Option<Bounds>>,
    documents: RefCell<HashMap<DocumentId, DocumentOffset>>,
}

impl OffsetCache {
    pub fn canvas(&self) -> Option<Bounds> {
        self.canvas.get()
    }

    pub fn set_canvas(&self, bounds: Bounds) {
        self.canvas.set(Some(bounds));
    }

    pub fn document(&self, document: DocumentId) -> Option<DocumentOffset> {
        self.documents.borrow().get(&document).copied()
    }

    pub fn set_document(&self, document: DocumentId, offset: DocumentOffset) {
        self.documents.borrow_mut().insert(document, offset);
    }

    pub fn clear(&self) {
        self.canvas.set(None);
        self.documents.borrow_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.canvas.get().is_none() && self.documents.borrow().is_empty()
    }
}
