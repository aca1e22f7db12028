//! # Canvas
//!
//! The canvas is the editing surface: an element of the editor document that
//! hosts one or more frames, each rendering its own document. Every piece of
//! position math the drag engine performs goes through here.
//!
//! ## Coordinate Spaces
//!
//! - **Screen**: client coordinates of the editor document
//! - **Canvas**: relative to the canvas element's content box, including the
//!   canvas scroll; dims, placeholder and spots live here
//! - **Frame**: client coordinates inside one frame document, before zoom
//! - **World**: zoom independent space where frames are positioned
//!
//! A frame document is scaled by the canvas zoom and placed at
//! `world_to_canvas(frame.position)`. Documents nested inside a frame (an
//! iframe within a frame) are resolved recursively through their host
//! element. The resulting offsets are memoized in an [`OffsetCache`] that
//! every geometry change clears.

pub mod autoscroll;
pub mod config;
pub mod coord;
pub mod offsets;
pub mod spots;
pub mod viewport;

pub use autoscroll::AutoscrollTick;
pub use config::{CanvasConfig, CustomSpots};
pub use coord::Coord;
pub use offsets::{DocumentOffset, OffsetCache};
pub use spots::{Spot, SpotEvent, SpotFilter, SpotProps, SpotType};
pub use viewport::Viewport;

use autoscroll::Autoscroll;
use glam::Vec2;
use scene_graph::{DocumentId, ElementId, SceneError, SceneGraph};
use slotmap::SlotMap;
use spots::SpotRegistry;
use std::fmt::{self, Display};
use thiserror::Error;
use trowel_core::{Bounds, BoxOffsets, CanvasPoint, FramePoint, ScreenPoint, WorldPoint};

slotmap::new_key_type! {
    pub struct FrameId;
}

impl Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_ffi())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    #[error("element {0} not found")]
    ElementNotFound(ElementId),
    #[error("document {0} is not part of the canvas")]
    DocumentNotInCanvas(DocumentId),
    #[error("frame {0} not found")]
    FrameNotFound(FrameId),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// One frame of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub document: DocumentId,
    pub position: WorldPoint,
    pub width: f32,
    pub height: f32,
    pub name: Option<String>,
}

impl Frame {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Options of [`Canvas::element_pos`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementPosOptions {
    /// Return the rect relative to its own document instead of the canvas
    pub avoid_frame_offset: bool,
    /// Don't scale the rect by the document zoom
    pub avoid_frame_zoom: bool,
    /// Ignore the canvas scroll
    pub no_scroll: bool,
}

pub struct Canvas {
    config: CanvasConfig,
    /// The editor document hosting the canvas element
    document: DocumentId,
    element: ElementId,
    scroll: Vec2,
    viewport: Viewport,
    frames: SlotMap<FrameId, Frame>,
    frame_order: Vec<FrameId>,
    offsets: OffsetCache,
    spots: SpotRegistry,
    autoscroll: Autoscroll,
}

impl Canvas {
    /// Creates a canvas rendered by `element`, an element of the editor
    /// document.
    pub fn new(
        scene: &SceneGraph,
        element: ElementId,
        config: CanvasConfig,
    ) -> Result<Self, CanvasError> {
        let el = scene
            .get(element)
            .ok_or(CanvasError::ElementNotFound(element))?;
        let mut viewport = Viewport::new(el.size());
        viewport.set_zoom(config.zoom);

        Ok(Self {
            config,
            document: el.document(),
            element,
            scroll: Vec2::ZERO,
            viewport,
            frames: SlotMap::with_key(),
            frame_order: Vec::new(),
            offsets: OffsetCache::default(),
            spots: SpotRegistry::default(),
            autoscroll: Autoscroll::default(),
        })
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    // Frames

    /// Creates a frame and its document at `position` in world space.
    pub fn add_frame(
        &mut self,
        scene: &mut SceneGraph,
        position: WorldPoint,
        size: Vec2,
        name: Option<String>,
    ) -> FrameId {
        let document = scene.create_document(size, None);
        let id = self.frames.insert(Frame {
            document,
            position,
            width: size.x,
            height: size.y,
            name,
        });
        self.frame_order.push(id);
        self.clear_offsets();
        log::debug!("added frame {id} with document {document}");
        id
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id)
    }

    /// Frames in stacking order, bottom first
    pub fn frames(&self) -> impl Iterator<Item = (FrameId, &Frame)> {
        self.frame_order
            .iter()
            .filter_map(|id| self.frames.get(*id).map(|frame| (*id, frame)))
    }

    pub fn frame_by_name(&self, name: &str) -> Option<FrameId> {
        self.frames()
            .find(|(_, frame)| frame.name.as_deref() == Some(name))
            .map(|(id, _)| id)
    }

    /// The top-level frame rendering `document`
    pub fn frame_of_document(&self, document: DocumentId) -> Option<FrameId> {
        self.frames()
            .find(|(_, frame)| frame.document == document)
            .map(|(id, _)| id)
    }

    /// The top-level frame an element belongs to, following nested hosts
    pub fn frame_of_element(&self, scene: &SceneGraph, el: ElementId) -> Option<FrameId> {
        let mut document = scene.document_of(el)?;
        loop {
            if let Some(frame) = self.frame_of_document(document) {
                return Some(frame);
            }
            let host = scene.document(document)?.host?;
            document = scene.document_of(host)?;
        }
    }

    pub fn move_frame(&mut self, id: FrameId, position: WorldPoint) -> Result<(), CanvasError> {
        let frame = self.frames.get_mut(id).ok_or(CanvasError::FrameNotFound(id))?;
        frame.position = position;
        self.clear_offsets();
        Ok(())
    }

    pub fn resize_frame(
        &mut self,
        scene: &mut SceneGraph,
        id: FrameId,
        size: Vec2,
    ) -> Result<(), CanvasError> {
        let frame = self.frames.get_mut(id).ok_or(CanvasError::FrameNotFound(id))?;
        frame.width = size.x;
        frame.height = size.y;
        if let Some(doc) = scene.document_mut(frame.document) {
            doc.viewport = size;
        }
        self.clear_offsets();
        Ok(())
    }

    /// The frame under a screen point; the last frame in stacking order wins
    pub fn frame_at(&self, scene: &SceneGraph, point: ScreenPoint) -> Option<FrameId> {
        self.frames()
            .filter(|(id, _)| {
                self.frame_bounds(scene, *id)
                    .map(|bounds| bounds.contains_point(point.as_vec2()))
                    .unwrap_or(false)
            })
            .last()
            .map(|(id, _)| id)
    }

    /// Screen bounds of a frame
    pub fn frame_bounds(&self, scene: &SceneGraph, id: FrameId) -> Result<Bounds, CanvasError> {
        let frame = self.frames.get(id).ok_or(CanvasError::FrameNotFound(id))?;
        let offset = self.document_offset(scene, frame.document)?;
        Ok(Bounds::from_origin_size(
            offset.origin,
            frame.size() * offset.scale,
        ))
    }

    // Viewport

    pub fn zoom(&self) -> f32 {
        self.viewport.zoom
    }

    pub fn zoom_decimal(&self) -> f32 {
        self.viewport.zoom_decimal()
    }

    pub fn zoom_multiplier(&self) -> f32 {
        self.viewport.zoom_multiplier()
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.viewport.set_zoom(zoom);
        self.clear_offsets();
    }

    pub fn coords(&self) -> Vec2 {
        self.viewport.coords
    }

    pub fn set_coords(&mut self, coords: Vec2) {
        self.viewport.coords = coords;
        self.clear_offsets();
    }

    /// Resizes the canvas element
    pub fn resize(&mut self, scene: &mut SceneGraph, size: Vec2) -> Result<(), CanvasError> {
        let el = scene
            .get_mut(self.element)
            .ok_or(CanvasError::ElementNotFound(self.element))?;
        el.rect = el.rect.with_size(size);
        self.viewport.size = size;
        self.clear_offsets();
        Ok(())
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Scrolls the canvas element itself
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
        self.clear_offsets();
    }

    /// Scrolls a document rendered in the canvas
    pub fn scroll_document(
        &mut self,
        scene: &mut SceneGraph,
        document: DocumentId,
        scroll: Vec2,
    ) -> Result<(), CanvasError> {
        scene.set_scroll(document, scroll)?;
        self.clear_offsets();
        Ok(())
    }

    // Offsets

    /// Drops every memoized offset
    pub fn clear_offsets(&self) {
        self.offsets.clear();
    }

    pub fn offsets(&self) -> &OffsetCache {
        &self.offsets
    }

    /// Screen bounds of the canvas element
    pub fn canvas_offset(&self, scene: &SceneGraph) -> Result<Bounds, CanvasError> {
        if let Some(bounds) = self.offsets.canvas() {
            return Ok(bounds);
        }
        let bounds = scene
            .client_rect(self.element)
            .ok_or(CanvasError::ElementNotFound(self.element))?;
        self.offsets.set_canvas(bounds);
        Ok(bounds)
    }

    /// Screen origin and scale of a document's viewport.
    pub fn document_offset(
        &self,
        scene: &SceneGraph,
        document: DocumentId,
    ) -> Result<DocumentOffset, CanvasError> {
        if let Some(offset) = self.offsets.document(document) {
            return Ok(offset);
        }

        let offset = if document == self.document {
            DocumentOffset::IDENTITY
        } else if let Some(frame) = self.frame_of_document(document).and_then(|id| self.frame(id)) {
            let canvas = self.canvas_offset(scene)?;
            let local = self.viewport.world_to_canvas(frame.position).as_vec2();
            DocumentOffset {
                origin: canvas.origin() + local - self.scroll,
                scale: self.zoom_decimal(),
            }
        } else {
            let host = scene
                .document(document)
                .and_then(|doc| doc.host)
                .ok_or(CanvasError::DocumentNotInCanvas(document))?;
            let host_doc = scene
                .document_of(host)
                .ok_or(CanvasError::ElementNotFound(host))?;
            let parent = self.document_offset(scene, host_doc)?;
            let host_el = scene.get(host).ok_or(CanvasError::ElementNotFound(host))?;
            let host_rect = scene
                .client_rect(host)
                .ok_or(CanvasError::ElementNotFound(host))?;
            let content = host_rect.origin()
                + Vec2::new(
                    host_el.offsets.border.left + host_el.offsets.padding.left,
                    host_el.offsets.border.top + host_el.offsets.padding.top,
                );
            DocumentOffset {
                origin: parent.to_screen(content),
                scale: parent.scale,
            }
        };

        self.offsets.set_document(document, offset);
        Ok(offset)
    }

    /// Screen bounds of the frame (or nested frame) viewport containing `el`
    pub fn frame_offset(&self, scene: &SceneGraph, el: ElementId) -> Result<Bounds, CanvasError> {
        let document = scene
            .document_of(el)
            .ok_or(CanvasError::ElementNotFound(el))?;
        let offset = self.document_offset(scene, document)?;
        let viewport = scene
            .document(document)
            .map(|doc| doc.viewport)
            .unwrap_or(Vec2::ZERO);
        Ok(Bounds::from_origin_size(offset.origin, viewport * offset.scale))
    }

    /// Rect of `el` in canvas space.
    ///
    /// The element's client rect is scaled by the zoom of its document and
    /// moved by the frame offset minus the canvas offset, plus the canvas
    /// scroll.
    pub fn element_pos(
        &self,
        scene: &SceneGraph,
        el: ElementId,
        options: ElementPosOptions,
    ) -> Result<Bounds, CanvasError> {
        let rect = scene
            .client_rect(el)
            .ok_or(CanvasError::ElementNotFound(el))?;
        let document = scene
            .document_of(el)
            .ok_or(CanvasError::ElementNotFound(el))?;
        let offset = self.document_offset(scene, document)?;

        let scale = if options.avoid_frame_zoom {
            1.0
        } else {
            offset.scale
        };
        let scaled = rect.scale(scale);
        if options.avoid_frame_offset {
            return Ok(scaled);
        }

        let canvas = self.canvas_offset(scene)?;
        let scroll = if options.no_scroll {
            Vec2::ZERO
        } else {
            self.scroll
        };
        Ok(scaled.translate(offset.origin - canvas.origin() + scroll))
    }

    pub fn element_offsets(
        &self,
        scene: &SceneGraph,
        el: ElementId,
    ) -> Result<BoxOffsets, CanvasError> {
        scene
            .get(el)
            .map(|el| el.offsets)
            .ok_or(CanvasError::ElementNotFound(el))
    }

    /// Pointer position in canvas space for an event dispatched on
    /// `document` at client position `client`.
    pub fn mouse_relative_canvas(
        &self,
        scene: &SceneGraph,
        document: DocumentId,
        client: Vec2,
    ) -> Result<CanvasPoint, CanvasError> {
        let offset = self.document_offset(scene, document)?;
        let canvas = self.canvas_offset(scene)?;
        Ok(CanvasPoint(
            offset.to_screen(client) - canvas.origin() + self.scroll,
        ))
    }

    pub fn screen_to_world(
        &self,
        scene: &SceneGraph,
        point: ScreenPoint,
    ) -> Result<WorldPoint, CanvasError> {
        let canvas = self.to_canvas(scene, Coord::Screen(point))?;
        Ok(self.viewport.canvas_to_world(canvas))
    }

    pub fn world_to_screen(
        &self,
        scene: &SceneGraph,
        point: WorldPoint,
    ) -> Result<ScreenPoint, CanvasError> {
        self.to_screen(scene, Coord::World(point))
    }

    /// Converts a frame client point to its frame document's viewport space
    pub fn frame_point(
        &self,
        scene: &SceneGraph,
        document: DocumentId,
        point: ScreenPoint,
    ) -> Result<FramePoint, CanvasError> {
        let offset = self.document_offset(scene, document)?;
        Ok(FramePoint((point.as_vec2() - offset.origin) / offset.scale))
    }

    // Spots

    /// Adds a spot, or updates the one with the same id. Returns its id.
    pub fn add_spot(&mut self, scene: &SceneGraph, props: SpotProps) -> String {
        let existing = props.id.as_deref().and_then(|id| self.spots.get(id)).cloned();
        let id = props
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let spot_type = props
            .spot_type
            .or_else(|| existing.as_ref().map(|s| s.spot_type.clone()))
            .unwrap_or(SpotType::Select);
        let component = props
            .component
            .or_else(|| existing.as_ref().and_then(|s| s.component));
        let element = props
            .element
            .or_else(|| component.and_then(|c| scene.element_of(c)))
            .or_else(|| existing.as_ref().and_then(|s| s.element));
        let frame = props
            .frame
            .or_else(|| element.and_then(|el| self.frame_of_element(scene, el)));
        let bounds = props
            .bounds
            .or_else(|| element.and_then(|el| self.spot_bounds(scene, el)))
            .unwrap_or_default();
        let custom = spot_type.is_builtin() && self.config.custom_spots.is_custom(spot_type.as_str());

        self.spots.upsert(Spot {
            id: id.clone(),
            spot_type,
            bounds,
            component,
            element,
            frame,
            custom,
        });
        id
    }

    pub fn remove_spots(&mut self, filter: &SpotFilter) -> Vec<Spot> {
        self.spots.remove(filter)
    }

    pub fn spots(&self, filter: &SpotFilter) -> Vec<&Spot> {
        self.spots.filter(filter)
    }

    /// Recomputes the geometry of every element-bound spot
    pub fn refresh_spots(&mut self, scene: &SceneGraph) {
        let updates: Vec<(String, Bounds)> = self
            .spots
            .all()
            .iter()
            .filter_map(|spot| {
                let el = spot.element?;
                self.spot_bounds(scene, el).map(|b| (spot.id.clone(), b))
            })
            .collect();
        for (id, bounds) in updates {
            self.spots.set_bounds(&id, bounds);
        }
    }

    pub fn take_spot_events(&mut self) -> Vec<SpotEvent> {
        self.spots.take_events()
    }

    fn spot_bounds(&self, scene: &SceneGraph, el: ElementId) -> Option<Bounds> {
        match self.element_pos(scene, el, ElementPosOptions::default()) {
            Ok(bounds) => Some(bounds),
            Err(err) => {
                log::debug!("no geometry for spot element {el}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_graph::Element;
    use trowel_core::Edges;

    /// Editor document with a canvas element at (100, 50) sized 1000x800 and
    /// one frame at world (20, 30).
    fn setup() -> (SceneGraph, Canvas, FrameId) {
        let mut scene = SceneGraph::new();
        let editor = scene.create_document(Vec2::new(1400.0, 1000.0), None);
        let root = scene.document(editor).unwrap().root;
        let canvas_el = scene
            .create_element(
                root,
                Element::new("div").with_rect(Bounds::from_rect(50.0, 100.0, 1000.0, 800.0)),
                None,
            )
            .unwrap();
        let mut canvas = Canvas::new(&scene, canvas_el, CanvasConfig::default()).unwrap();
        let frame = canvas.add_frame(
            &mut scene,
            WorldPoint::new(20.0, 30.0),
            Vec2::new(600.0, 400.0),
            Some("main".into()),
        );
        (scene, canvas, frame)
    }

    fn frame_root(scene: &SceneGraph, canvas: &Canvas, frame: FrameId) -> ElementId {
        let doc = canvas.frame(frame).unwrap().document;
        scene.document(doc).unwrap().root
    }

    #[test]
    fn test_element_pos_at_full_zoom() {
        let (mut scene, canvas, frame) = setup();
        let root = frame_root(&scene, &canvas, frame);
        let el = scene
            .create_element(
                root,
                Element::new("div").with_rect(Bounds::from_rect(10.0, 5.0, 50.0, 20.0)),
                None,
            )
            .unwrap();

        let pos = canvas.element_pos(&scene, el, ElementPosOptions::default()).unwrap();
        assert_eq!(pos, Bounds::from_rect(40.0, 25.0, 50.0, 20.0));

        let own = canvas
            .element_pos(
                &scene,
                el,
                ElementPosOptions {
                    avoid_frame_offset: true,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(own, Bounds::from_rect(10.0, 5.0, 50.0, 20.0));
    }

    #[test]
    fn test_zoom_scales_elements_and_pointer_alike() {
        let (mut scene, mut canvas, frame) = setup();
        let root = frame_root(&scene, &canvas, frame);
        let el = scene
            .create_element(
                root,
                Element::new("div").with_rect(Bounds::from_rect(100.0, 100.0, 40.0, 40.0)),
                None,
            )
            .unwrap();
        canvas.set_zoom(50.0);
        assert!(canvas.offsets().is_empty());

        let pos = canvas.element_pos(&scene, el, ElementPosOptions::default()).unwrap();
        assert_eq!(pos.width(), 20.0);

        // The pointer over the element's top-left corner lands on the same spot
        let doc = canvas.frame(frame).unwrap().document;
        let pointer = canvas
            .mouse_relative_canvas(&scene, doc, Vec2::new(100.0, 100.0))
            .unwrap();
        assert_eq!(pointer.as_vec2(), pos.origin());
    }

    #[test]
    fn test_scroll_invalidates_offsets() {
        let (mut scene, mut canvas, frame) = setup();
        let root = frame_root(&scene, &canvas, frame);
        let doc = canvas.frame(frame).unwrap().document;
        let el = scene
            .create_element(
                root,
                Element::new("div").with_rect(Bounds::from_rect(300.0, 0.0, 40.0, 40.0)),
                None,
            )
            .unwrap();

        let before = canvas.element_pos(&scene, el, ElementPosOptions::default()).unwrap();
        assert!(!canvas.offsets().is_empty());
        canvas
            .scroll_document(&mut scene, doc, Vec2::new(0.0, 100.0))
            .unwrap();
        assert!(canvas.offsets().is_empty());
        let after = canvas.element_pos(&scene, el, ElementPosOptions::default()).unwrap();
        assert_eq!(before.top() - after.top(), 100.0);
    }

    #[test]
    fn test_nested_frame_offsets() {
        let (mut scene, canvas, frame) = setup();
        let root = frame_root(&scene, &canvas, frame);
        let mut iframe = Element::new("iframe").with_rect(Bounds::from_rect(50.0, 40.0, 200.0, 100.0));
        iframe.offsets.border = Edges::uniform(2.0);
        let host = scene.create_element(root, iframe, None).unwrap();
        let nested = scene.create_document(Vec2::new(196.0, 96.0), Some(host));
        let nested_root = scene.document(nested).unwrap().root;
        let el = scene
            .create_element(
                nested_root,
                Element::new("p").with_rect(Bounds::from_rect(10.0, 10.0, 30.0, 10.0)),
                None,
            )
            .unwrap();

        // frame origin in canvas space is (20, 30); the iframe content box
        // starts at (40 + 2, 50 + 2) inside it
        let pos = canvas.element_pos(&scene, el, ElementPosOptions::default()).unwrap();
        assert_eq!(pos.origin(), Vec2::new(20.0 + 42.0 + 10.0, 30.0 + 52.0 + 10.0));
        assert_eq!(canvas.frame_of_element(&scene, el), Some(frame));
    }

    #[test]
    fn test_screen_world_round_trip() {
        let (scene, mut canvas, _) = setup();
        for zoom in [1.0, 25.0, 100.0, 240.0, 500.0] {
            canvas.set_zoom(zoom);
            canvas.set_coords(Vec2::new(-37.0, 12.5));
            let screen = ScreenPoint::new(321.5, 654.25);
            let world = canvas.screen_to_world(&scene, screen).unwrap();
            let back = canvas.world_to_screen(&scene, world).unwrap();
            assert!((back.as_vec2() - screen.as_vec2()).abs().max_element() < 0.05);
        }
    }

    #[test]
    fn test_frame_at_prefers_last_frame() {
        let (mut scene, mut canvas, first) = setup();
        let second = canvas.add_frame(
            &mut scene,
            WorldPoint::new(300.0, 30.0),
            Vec2::new(400.0, 400.0),
            None,
        );
        // Canvas origin (100, 50): first frame spans x 120..720, second 400..800
        assert_eq!(canvas.frame_at(&scene, ScreenPoint::new(200.0, 100.0)), Some(first));
        assert_eq!(canvas.frame_at(&scene, ScreenPoint::new(500.0, 100.0)), Some(second));
        assert_eq!(canvas.frame_at(&scene, ScreenPoint::new(50.0, 10.0)), None);
        assert_eq!(canvas.frame_by_name("main"), Some(first));
    }

    #[test]
    fn test_spots_follow_geometry_and_custom_config() {
        let (mut scene, mut canvas, frame) = setup();
        let root = frame_root(&scene, &canvas, frame);
        let el = scene
            .create_element(
                root,
                Element::new("div").with_rect(Bounds::from_rect(0.0, 0.0, 10.0, 10.0)),
                None,
            )
            .unwrap();

        let id = canvas.add_spot(&scene, SpotProps::new(SpotType::Hover).with_element(el));
        let spot = canvas.spots(&SpotFilter::default())[0].clone();
        assert_eq!(spot.id, id);
        assert_eq!(spot.bounds.origin(), Vec2::new(20.0, 30.0));
        assert_eq!(spot.frame, Some(frame));
        assert!(!spot.custom);

        canvas.set_coords(Vec2::new(5.0, 5.0));
        canvas.refresh_spots(&scene);
        let spot = canvas.spots(&SpotFilter::default())[0].clone();
        assert_eq!(spot.bounds.origin(), Vec2::new(25.0, 35.0));

        let removed = canvas.remove_spots(&SpotFilter::of_type(SpotType::Hover));
        assert_eq!(removed.len(), 1);
        let events = canvas.take_spot_events();
        assert!(matches!(events[0], SpotEvent::Added { .. }));
        assert!(matches!(events[1], SpotEvent::Updated { .. }));
        assert!(matches!(events[2], SpotEvent::Removed { .. }));

        let mut config = CanvasConfig::default();
        config.custom_spots = CustomSpots::All(true);
        let mut custom = Canvas::new(&scene, canvas.element(), config).unwrap();
        custom.add_spot(&scene, SpotProps::new(SpotType::Select).with_bounds(Bounds::zero()));
        custom.add_spot(&scene, SpotProps::new(SpotType::sorter_target()));
        let spots = custom.spots(&SpotFilter::default());
        assert!(spots[0].custom);
        assert!(!spots[1].custom);
    }
}
