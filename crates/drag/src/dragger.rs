//! # Dragger
//!
//! Moves one thing (a frame, an absolutely positioned component) by the
//! pointer delta, with optional axis locking and snapping guides.
//!
//! What is dragged is abstracted by a [`DragHandler`]: it reports the start
//! position and pointer in its own space, applies new positions and supplies
//! guides. The dragger only deals in deltas.
//!
//! ## Snapping
//!
//! Static guides are lines of other objects; target guides are lines of the
//! dragged object at the start of the drag. When a target guide moved by the
//! current delta comes within `snap_offset` of a static guide the delta is
//! locked so both lines coincide. The lock holds until the raw delta moves
//! more than `snap_offset` away from it.

use crate::context::DragContext;
use crate::events::DragEvent;
use crate::input::{Key, KeyEvent, PointerEvent};
use canvas::{Coord, FrameId};
use glam::Vec2;
use node::ComponentId;
use serde::{Deserialize, Serialize};
use trowel_core::{FramePoint, Length, WorldPoint};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DraggerConfig {
    pub snap_offset: f32,
}

impl Default for DraggerConfig {
    fn default() -> Self {
        Self { snap_offset: 5.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }
}

/// A vertical (`X`) or horizontal (`Y`) line used for snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Guide {
    pub axis: Axis,
    pub value: f32,
    /// Currently aligned with a static guide
    pub active: bool,
    #[serde(skip)]
    lock: Option<f32>,
}

impl Guide {
    pub fn x(value: f32) -> Self {
        Self {
            axis: Axis::X,
            value,
            active: false,
            lock: None,
        }
    }

    pub fn y(value: f32) -> Self {
        Self {
            axis: Axis::Y,
            value,
            active: false,
            lock: None,
        }
    }
}

/// The object moved by a [`Dragger`].
pub trait DragHandler {
    /// Position the drag starts from
    fn position(&self, cx: &DragContext<'_>) -> Vec2;

    /// Pointer position for `ev`; deltas between two of these drive the drag
    fn pointer(&self, _cx: &DragContext<'_>, ev: &PointerEvent) -> Vec2 {
        ev.client
    }

    /// Factor turning pointer deltas into position deltas
    fn scale(&self, _cx: &DragContext<'_>) -> f32 {
        1.0
    }

    /// Applies a new position; `end` is set for the final one
    fn set_position(&mut self, cx: &mut DragContext<'_>, position: Vec2, end: bool);

    fn guides_static(&self, _cx: &DragContext<'_>) -> Vec<Guide> {
        Vec::new()
    }

    fn guides_target(&self, _cx: &DragContext<'_>) -> Vec<Guide> {
        Vec::new()
    }

    /// Scroll of whatever the drag happens in; scrolling mid-drag moves the
    /// object along
    fn scroll(&self, _cx: &DragContext<'_>) -> Vec2 {
        Vec2::ZERO
    }

    fn on_end(&mut self, _cx: &mut DragContext<'_>, _cancelled: bool) {}
}

#[derive(Debug, Clone)]
struct DragSession {
    start_pointer: Vec2,
    start_position: Vec2,
    delta: Vec2,
    position: Vec2,
    last_scroll: Vec2,
    last_scroll_diff: Vec2,
    glob_scroll_diff: Vec2,
    locked_axis: Option<Axis>,
    guides_static: Vec<Guide>,
    guides_target: Vec<Guide>,
    last_event: PointerEvent,
}

pub struct Dragger {
    config: DraggerConfig,
    handler: Box<dyn DragHandler>,
    session: Option<DragSession>,
}

impl Dragger {
    pub fn new(config: DraggerConfig, handler: impl DragHandler + 'static) -> Self {
        Self {
            config,
            handler: Box::new(handler),
            session: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Delta applied by the last move
    pub fn delta(&self) -> Option<Vec2> {
        self.session.as_ref().map(|s| s.delta)
    }

    pub fn position(&self) -> Option<Vec2> {
        self.session.as_ref().map(|s| s.position)
    }

    /// Active target guides of the current drag
    pub fn active_guides(&self) -> Vec<Guide> {
        self.session
            .as_ref()
            .map(|s| s.guides_target.iter().filter(|g| g.active).copied().collect())
            .unwrap_or_default()
    }

    pub fn start(&mut self, cx: &mut DragContext<'_>, ev: &PointerEvent) {
        let start_position = self.handler.position(cx);
        self.session = Some(DragSession {
            start_pointer: self.handler.pointer(cx, ev),
            start_position,
            delta: Vec2::ZERO,
            position: start_position,
            last_scroll: self.handler.scroll(cx),
            last_scroll_diff: Vec2::ZERO,
            glob_scroll_diff: Vec2::ZERO,
            locked_axis: None,
            guides_static: self.handler.guides_static(cx),
            guides_target: self.handler.guides_target(cx),
            last_event: ev.clone(),
        });
        cx.emit(DragEvent::DraggerStart {
            position: start_position,
        });
        self.drag(cx, ev);
    }

    pub fn drag(&mut self, cx: &mut DragContext<'_>, ev: &PointerEvent) {
        let current = self.handler.pointer(cx, ev);
        let scale = self.handler.scale(cx);
        let snap_offset = self.config.snap_offset;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.glob_scroll_diff += session.last_scroll_diff;
        session.last_scroll_diff = Vec2::ZERO;
        session.last_event = ev.clone();
        let mut delta = current - session.start_pointer + session.glob_scroll_diff;

        if ev.modifiers.shift {
            if session.locked_axis.is_none() {
                session.locked_axis = detect_axis_lock(delta);
            }
        } else {
            session.locked_axis = None;
        }
        match session.locked_axis {
            Some(Axis::X) => delta.x = 0.0,
            Some(Axis::Y) => delta.y = 0.0,
            None => {}
        }

        let delta = delta * scale;
        let snapped = snap_guides(session, delta, snap_offset);
        self.move_by(cx, snapped.unwrap_or(delta), false);

        if let Some(session) = &self.session {
            cx.emit(DragEvent::DraggerMove {
                position: session.position,
                delta: session.delta,
            });
        }
    }

    /// Re-applies the last pointer event after the drag container scrolled
    pub fn on_scroll(&mut self, cx: &mut DragContext<'_>) {
        let scroll = self.handler.scroll(cx);
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.last_scroll_diff = scroll - session.last_scroll;
        session.last_scroll = scroll;
        let ev = session.last_event.clone();
        self.drag(cx, &ev);
    }

    pub fn on_key(&mut self, cx: &mut DragContext<'_>, ev: &KeyEvent) -> bool {
        if ev.key == Key::Escape && self.is_dragging() {
            self.stop(cx, true);
            return true;
        }
        false
    }

    /// Ends the drag; a cancelled drag returns to the start position.
    pub fn stop(&mut self, cx: &mut DragContext<'_>, cancel: bool) -> Option<Vec2> {
        let delta = match &self.session {
            Some(session) if !cancel => session.delta,
            Some(_) => Vec2::ZERO,
            None => return None,
        };
        self.move_by(cx, delta, true);
        self.handler.on_end(cx, cancel);

        let position = self.session.take().map(|s| s.position)?;
        cx.emit(DragEvent::DraggerEnd {
            position,
            cancelled: cancel,
        });
        Some(position)
    }

    fn move_by(&mut self, cx: &mut DragContext<'_>, delta: Vec2, end: bool) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.delta = delta;
        session.position = session.start_position + delta;
        let position = session.position;
        self.handler.set_position(cx, position, end);
    }
}

/// Locks the axis the pointer moved less along
fn detect_axis_lock(delta: Vec2) -> Option<Axis> {
    if delta == Vec2::ZERO {
        return None;
    }
    let abs = delta.abs();
    if abs.y >= abs.x {
        Some(Axis::X)
    } else {
        Some(Axis::Y)
    }
}

fn is_point_in(point: f32, target: f32, offset: f32) -> bool {
    (point >= target && point <= target + offset) || (point <= target && point >= target - offset)
}

/// Snapped delta, when a target guide locks onto a static one
fn snap_guides(session: &mut DragSession, delta: Vec2, snap_offset: f32) -> Option<Vec2> {
    let mut snapped = delta;
    let mut any = false;

    for axis in [Axis::X, Axis::Y] {
        let value = axis.of(delta);

        let mut held = None;
        for guide in session.guides_target.iter_mut().filter(|g| g.axis == axis) {
            let Some(lock) = guide.lock else {
                continue;
            };
            if (value - lock).abs() > snap_offset {
                guide.lock = None;
                guide.active = false;
            } else if held.is_none() {
                held = Some(lock);
            }
        }
        if let Some(lock) = held {
            axis.set(&mut snapped, lock);
            any = true;
            continue;
        }

        let statics = &session.guides_static;
        for guide in session.guides_target.iter_mut().filter(|g| g.axis == axis) {
            let point = guide.value + value;
            let matched = statics
                .iter()
                .find(|stat| stat.axis == axis && is_point_in(point, stat.value, snap_offset));
            if let Some(stat) = matched {
                let lock = value - (point - stat.value);
                guide.lock = Some(lock);
                guide.active = true;
                axis.set(&mut snapped, lock);
                any = true;
                break;
            }
        }
    }

    any.then_some(snapped)
}

/// Drags a canvas frame in world space.
#[derive(Debug, Clone, Copy)]
pub struct FrameDragHandler {
    frame: FrameId,
}

impl FrameDragHandler {
    pub fn new(frame: FrameId) -> Self {
        Self { frame }
    }

    fn edges(cx: &DragContext<'_>, frame: FrameId) -> Vec<Guide> {
        let Some(frame) = cx.canvas.frame(frame) else {
            return Vec::new();
        };
        let origin = frame.position.as_vec2();
        vec![
            Guide::x(origin.x),
            Guide::x(origin.x + frame.width),
            Guide::y(origin.y),
            Guide::y(origin.y + frame.height),
        ]
    }
}

impl DragHandler for FrameDragHandler {
    fn position(&self, cx: &DragContext<'_>) -> Vec2 {
        cx.canvas
            .frame(self.frame)
            .map(|frame| frame.position.as_vec2())
            .unwrap_or(Vec2::ZERO)
    }

    fn pointer(&self, cx: &DragContext<'_>, ev: &PointerEvent) -> Vec2 {
        let coord = Coord::Frame {
            document: ev.document,
            point: FramePoint(ev.client),
        };
        match cx.canvas.to_screen(cx.scene, coord) {
            Ok(point) => point.as_vec2(),
            Err(err) => {
                log::debug!("pointer outside the canvas: {err}");
                ev.client
            }
        }
    }

    fn scale(&self, cx: &DragContext<'_>) -> f32 {
        cx.canvas.zoom_multiplier()
    }

    fn set_position(&mut self, cx: &mut DragContext<'_>, position: Vec2, _end: bool) {
        if let Err(err) = cx.canvas.move_frame(self.frame, WorldPoint(position)) {
            log::warn!("cannot move frame: {err}");
            return;
        }
        cx.canvas.refresh_spots(cx.scene);
        cx.flush_spot_events();
    }

    fn guides_static(&self, cx: &DragContext<'_>) -> Vec<Guide> {
        let others: Vec<FrameId> = cx
            .canvas
            .frames()
            .map(|(id, _)| id)
            .filter(|id| *id != self.frame)
            .collect();
        others
            .into_iter()
            .flat_map(|id| Self::edges(cx, id))
            .collect()
    }

    fn guides_target(&self, cx: &DragContext<'_>) -> Vec<Guide> {
        Self::edges(cx, self.frame)
    }
}

/// Drags an absolutely positioned component by rewriting its `left` and
/// `top` styles.
#[derive(Debug, Clone, Copy)]
pub struct ComponentDragHandler {
    component: ComponentId,
    parent: Option<ComponentId>,
}

impl ComponentDragHandler {
    pub fn new(component: ComponentId) -> Self {
        Self {
            component,
            parent: None,
        }
    }

    /// Snaps against the children of `parent`, for components that are not
    /// attached yet
    pub fn within(mut self, parent: ComponentId) -> Self {
        self.parent = Some(parent);
        self
    }

    fn style_px(cx: &DragContext<'_>, component: ComponentId, key: &str) -> Option<f32> {
        cx.tree
            .get(component)?
            .style_value(key)?
            .parse::<Length>()
            .ok()?
            .to_px(0.0)
    }

    fn size(cx: &DragContext<'_>, component: ComponentId) -> Vec2 {
        if let Some(el) = cx.scene.element_of(component).and_then(|el| cx.scene.get(el)) {
            return el.size();
        }
        Vec2::new(
            Self::style_px(cx, component, "width").unwrap_or(0.0),
            Self::style_px(cx, component, "height").unwrap_or(0.0),
        )
    }

    fn edges(position: Vec2, size: Vec2) -> [Guide; 4] {
        [
            Guide::x(position.x),
            Guide::x(position.x + size.x),
            Guide::y(position.y),
            Guide::y(position.y + size.y),
        ]
    }
}

impl DragHandler for ComponentDragHandler {
    fn position(&self, cx: &DragContext<'_>) -> Vec2 {
        Vec2::new(
            Self::style_px(cx, self.component, "left").unwrap_or(0.0),
            Self::style_px(cx, self.component, "top").unwrap_or(0.0),
        )
    }

    fn pointer(&self, cx: &DragContext<'_>, ev: &PointerEvent) -> Vec2 {
        match cx.canvas.mouse_relative_canvas(cx.scene, ev.document, ev.client) {
            Ok(point) => point.as_vec2(),
            Err(err) => {
                log::debug!("pointer outside the canvas: {err}");
                ev.client
            }
        }
    }

    fn scale(&self, cx: &DragContext<'_>) -> f32 {
        cx.canvas.zoom_multiplier()
    }

    fn set_position(&mut self, cx: &mut DragContext<'_>, position: Vec2, _end: bool) {
        let Some(component) = cx.tree.get_mut(self.component) else {
            return;
        };
        component.set_style("position", "absolute");
        component.set_style("left", Length::px(position.x).to_string());
        component.set_style("top", Length::px(position.y).to_string());

        let Some(el) = cx.scene.element_of(self.component) else {
            return;
        };
        let origin = cx
            .scene
            .parent(el)
            .and_then(|parent| cx.scene.get(parent))
            .map(|parent| parent.rect.origin())
            .unwrap_or(Vec2::ZERO);
        if let Some(element) = cx.scene.get_mut(el) {
            let size = element.size();
            element.rect = trowel_core::Bounds::from_origin_size(origin + position, size);
        }
        cx.canvas.clear_offsets();
        cx.canvas.refresh_spots(cx.scene);
        cx.flush_spot_events();
    }

    fn guides_static(&self, cx: &DragContext<'_>) -> Vec<Guide> {
        let Some(parent) = self.parent.or_else(|| cx.tree.parent(self.component)) else {
            return Vec::new();
        };
        cx.tree
            .children(parent)
            .iter()
            .filter(|id| **id != self.component)
            .flat_map(|id| {
                let position = Vec2::new(
                    Self::style_px(cx, *id, "left").unwrap_or(0.0),
                    Self::style_px(cx, *id, "top").unwrap_or(0.0),
                );
                Self::edges(position, Self::size(cx, *id))
            })
            .collect()
    }

    fn guides_target(&self, cx: &DragContext<'_>) -> Vec<Guide> {
        Self::edges(self.position(cx), Self::size(cx, self.component)).to_vec()
    }

    fn scroll(&self, cx: &DragContext<'_>) -> Vec2 {
        cx.scene
            .element_of(self.component)
            .and_then(|el| cx.scene.document_of(el))
            .map(|doc| cx.scene.scroll(doc))
            .unwrap_or(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DragEvent;
    use crate::sorter::RecordedWarnings;
    use canvas::{Canvas, CanvasConfig};
    use node::ComponentTree;
    use scene_graph::{DocumentId, SceneGraph};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Moves a point; static guide at x = 100, target guide at the left edge.
    struct Probe {
        start: Vec2,
        width: f32,
        applied: Rc<RefCell<Vec<Vec2>>>,
    }

    impl DragHandler for Probe {
        fn position(&self, _cx: &DragContext<'_>) -> Vec2 {
            self.start
        }

        fn set_position(&mut self, _cx: &mut DragContext<'_>, position: Vec2, _end: bool) {
            self.applied.borrow_mut().push(position);
        }

        fn guides_static(&self, _cx: &DragContext<'_>) -> Vec<Guide> {
            vec![Guide::x(100.0)]
        }

        fn guides_target(&self, _cx: &DragContext<'_>) -> Vec<Guide> {
            vec![Guide::x(self.start.x), Guide::x(self.start.x + self.width)]
        }
    }

    struct Fixture {
        tree: ComponentTree,
        scene: SceneGraph,
        canvas: Canvas,
        warnings: RecordedWarnings,
        events: Vec<DragEvent>,
        document: DocumentId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut scene = SceneGraph::new();
            let document = scene.create_document(Vec2::new(800.0, 600.0), None);
            let root = scene.document(document).unwrap().root;
            let canvas = Canvas::new(&scene, root, CanvasConfig::default()).unwrap();
            Self {
                tree: ComponentTree::new(),
                scene,
                canvas,
                warnings: RecordedWarnings::default(),
                events: Vec::new(),
                document,
            }
        }

        fn cx(&mut self) -> DragContext<'_> {
            DragContext::new(
                &mut self.tree,
                &mut self.scene,
                &mut self.canvas,
                &mut self.warnings,
                &mut self.events,
            )
        }

        fn pointer(&self, x: f32, y: f32) -> PointerEvent {
            PointerEvent::new(self.document, Vec2::new(x, y))
        }
    }

    fn probe(applied: &Rc<RefCell<Vec<Vec2>>>) -> Probe {
        Probe {
            start: Vec2::new(50.0, 0.0),
            width: 20.0,
            applied: applied.clone(),
        }
    }

    #[test]
    fn test_snap_locks_and_releases() {
        let mut fx = Fixture::new();
        let applied = Rc::new(RefCell::new(Vec::new()));
        let mut dragger = Dragger::new(DraggerConfig::default(), probe(&applied));

        let start = fx.pointer(0.0, 0.0);
        dragger.start(&mut fx.cx(), &start);

        // Left edge would land at 97: snapped onto the guide at 100
        let ev = fx.pointer(47.0, 0.0);
        dragger.drag(&mut fx.cx(), &ev);
        assert_eq!(dragger.position(), Some(Vec2::new(100.0, 0.0)));
        assert_eq!(dragger.active_guides().len(), 1);

        // Still within the snap offset of the lock
        let ev = fx.pointer(55.0, 0.0);
        dragger.drag(&mut fx.cx(), &ev);
        assert_eq!(dragger.position(), Some(Vec2::new(100.0, 0.0)));

        // Far enough to release
        let ev = fx.pointer(62.0, 0.0);
        dragger.drag(&mut fx.cx(), &ev);
        assert_eq!(dragger.position(), Some(Vec2::new(112.0, 0.0)));
        assert!(dragger.active_guides().is_empty());

        assert_eq!(dragger.stop(&mut fx.cx(), false), Some(Vec2::new(112.0, 0.0)));
        assert!(!dragger.is_dragging());
    }

    #[test]
    fn test_cancel_returns_to_start() {
        let mut fx = Fixture::new();
        let applied = Rc::new(RefCell::new(Vec::new()));
        let mut dragger = Dragger::new(DraggerConfig::default(), probe(&applied));

        let start = fx.pointer(0.0, 0.0);
        dragger.start(&mut fx.cx(), &start);
        let ev = fx.pointer(200.0, 30.0);
        dragger.drag(&mut fx.cx(), &ev);

        let escape = KeyEvent::new(fx.document, Key::Escape);
        assert!(dragger.on_key(&mut fx.cx(), &escape));
        assert_eq!(applied.borrow().last(), Some(&Vec2::new(50.0, 0.0)));
        assert!(matches!(
            fx.events.last(),
            Some(DragEvent::DraggerEnd { cancelled: true, .. })
        ));
    }

    #[test]
    fn test_shift_locks_minor_axis() {
        let mut fx = Fixture::new();
        let applied = Rc::new(RefCell::new(Vec::new()));
        let mut dragger = Dragger::new(DraggerConfig::default(), probe(&applied));

        let start = fx.pointer(0.0, 0.0);
        dragger.start(&mut fx.cx(), &start);
        let ev = fx
            .pointer(10.0, 300.0)
            .with_modifiers(crate::input::Modifiers::shift());
        dragger.drag(&mut fx.cx(), &ev);
        assert_eq!(dragger.position(), Some(Vec2::new(50.0, 300.0)));
    }

    #[test]
    fn test_component_handler_writes_styles() {
        let mut fx = Fixture::new();
        let id = fx
            .tree
            .insert(
                fx.tree.root(),
                node::Component::default()
                    .with_style("left", "10px")
                    .with_style("top", "20px"),
                None,
            )
            .unwrap();
        let mut dragger = Dragger::new(DraggerConfig::default(), ComponentDragHandler::new(id));

        let start = fx.pointer(0.0, 0.0);
        dragger.start(&mut fx.cx(), &start);
        let ev = fx.pointer(30.0, 40.0);
        dragger.drag(&mut fx.cx(), &ev);
        dragger.stop(&mut fx.cx(), false);

        let component = fx.tree.get(id).unwrap();
        assert_eq!(component.style_value("left"), Some("40px"));
        assert_eq!(component.style_value("top"), Some("60px"));
        assert_eq!(component.style_value("position"), Some("absolute"));
    }
}
