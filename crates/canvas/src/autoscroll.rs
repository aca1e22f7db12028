//! Scrolling frame documents while a drag hovers near their edges.
//!
//! The host calls [`Canvas::autoscroll_frame`] once per animation frame
//! while it returns `reschedule: true`; the loop ends by itself once the
//! session stops it.

use crate::{Canvas, CanvasError};
use glam::Vec2;
use scene_graph::{DocumentId, ElementId, SceneGraph};

#[derive(Debug, Default)]
pub(crate) struct Autoscroll {
    dragging: bool,
    document: Option<DocumentId>,
    /// Last pointer Y relative to the frame viewport, zoom applied
    last_client_y: Option<f32>,
}

/// Outcome of one autoscroll tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoscrollTick {
    pub reschedule: bool,
    /// Vertical scroll applied during this tick
    pub scrolled_by: f32,
}

impl AutoscrollTick {
    const STOPPED: AutoscrollTick = AutoscrollTick {
        reschedule: false,
        scrolled_by: 0.0,
    };
}

impl Canvas {
    /// Starts autoscrolling `document` (a frame document)
    pub fn start_autoscroll(&mut self, document: DocumentId) {
        self.autoscroll.dragging = true;
        self.autoscroll.document = Some(document);
        self.autoscroll.last_client_y = None;
        log::trace!("autoscroll started on document {document}");
    }

    pub fn stop_autoscroll(&mut self) {
        if self.autoscroll.dragging {
            log::trace!("autoscroll stopped");
        }
        self.autoscroll = Default::default();
    }

    pub fn is_autoscrolling(&self) -> bool {
        self.autoscroll.dragging
    }

    /// Records the pointer position, in client coordinates of the
    /// autoscrolled document
    pub fn update_autoscroll_pointer(&mut self, client_y: f32) {
        self.autoscroll.last_client_y = Some(client_y * self.zoom_decimal());
    }

    /// One animation-frame step.
    ///
    /// When the pointer is within `autoscroll_limit` of the top or bottom of
    /// the frame, the document scrolls by the distance the pointer went past
    /// the limit, bounded by its scrollable range.
    pub fn autoscroll_frame(&mut self, scene: &mut SceneGraph) -> Result<AutoscrollTick, CanvasError> {
        if !self.autoscroll.dragging {
            return Ok(AutoscrollTick::STOPPED);
        }
        let Some(document) = self.autoscroll.document else {
            return Ok(AutoscrollTick::STOPPED);
        };
        let Some(client_y) = self.autoscroll.last_client_y else {
            return Ok(AutoscrollTick {
                reschedule: true,
                scrolled_by: 0.0,
            });
        };

        let doc = scene
            .document(document)
            .ok_or(CanvasError::DocumentNotInCanvas(document))?;
        let scroll = doc.scroll;
        let viewport = doc.viewport;
        let limit_top = self.config().autoscroll_limit;
        let limit_bottom = viewport.y * self.zoom_decimal() - limit_top;

        let mut next_top = scroll.y;
        if client_y < limit_top {
            next_top += client_y - limit_top;
        }
        if client_y > limit_bottom {
            next_top += client_y - limit_bottom;
        }
        let max_scroll = (content_height(scene, doc.root) - viewport.y).max(0.0);
        let next_top = next_top.clamp(0.0, max_scroll);

        let scrolled_by = next_top - scroll.y;
        if scrolled_by != 0.0 {
            self.scroll_document(scene, document, Vec2::new(scroll.x, next_top))?;
            self.refresh_spots(scene);
        }
        Ok(AutoscrollTick {
            reschedule: true,
            scrolled_by,
        })
    }
}

/// Bottom edge of the lowest element under `root`
fn content_height(scene: &SceneGraph, root: ElementId) -> f32 {
    let mut bottom = scene.get(root).map(|el| el.rect.bottom()).unwrap_or(0.0);
    let mut stack = scene.children(root).to_vec();
    while let Some(id) = stack.pop() {
        if let Some(el) = scene.get(id) {
            bottom = bottom.max(el.rect.bottom());
        }
        stack.extend_from_slice(scene.children(id));
    }
    bottom
}
