//! # Resizer
//!
//! Eight-handle box resizing. The resizer lays its handles out around a
//! focused rect, turns pointer deltas into a new box and hands that box to a
//! [`ResizeTarget`], which decides how the size is stored.
//!
//! ## Key Concepts
//!
//! - **Handles**: `tl tc tr cl cr bl bc br`. Handles containing `l` or `r`
//!   change the width, `t` or `b` the height. Left and top handles also move
//!   the box so the opposite edge stays put.
//! - **Ratio**: corner handles keep the start aspect ratio when
//!   `ratio_default` and Shift disagree.
//! - **Frame space**: pointer deltas are divided by the canvas zoom so sizes
//!   are written in the element's own coordinates.

use crate::context::DragContext;
use crate::events::DragEvent;
use crate::input::{Key, KeyEvent, PointerEvent};
use glam::Vec2;
use node::ComponentId;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use trowel_core::{normalize_float, Bounds, Length, Unit};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Handle {
    Tl,
    Tc,
    Tr,
    Cl,
    Cr,
    Bl,
    Bc,
    Br,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::Tl,
        Handle::Tc,
        Handle::Tr,
        Handle::Cl,
        Handle::Cr,
        Handle::Bl,
        Handle::Bc,
        Handle::Br,
    ];

    pub fn is_top(self) -> bool {
        matches!(self, Handle::Tl | Handle::Tc | Handle::Tr)
    }

    pub fn is_bottom(self) -> bool {
        matches!(self, Handle::Bl | Handle::Bc | Handle::Br)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Handle::Tl | Handle::Cl | Handle::Bl)
    }

    pub fn is_right(self) -> bool {
        matches!(self, Handle::Tr | Handle::Cr | Handle::Br)
    }

    /// Edge handles, which only resize along one axis
    pub fn is_center(self) -> bool {
        matches!(self, Handle::Tc | Handle::Cl | Handle::Cr | Handle::Bc)
    }

    /// Where the handle sits on `rect`
    fn anchor(self, rect: &Bounds) -> Vec2 {
        let x = if self.is_left() {
            rect.left()
        } else if self.is_right() {
            rect.right()
        } else {
            rect.center().x
        };
        let y = if self.is_top() {
            rect.top()
        } else if self.is_bottom() {
            rect.bottom()
        } else {
            rect.center().y
        };
        Vec2::new(x, y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizerConfig {
    /// Keep the aspect ratio without holding Shift
    pub ratio_default: bool,
    pub min_dim: f32,
    pub max_dim: Option<f32>,
    pub step: f32,
    pub unit_width: Unit,
    pub unit_height: Unit,
    /// Style keys the size is written to
    pub key_width: String,
    pub key_height: String,
    /// Keep the unit the value already has instead of the configured one
    pub current_unit: bool,
    pub keep_auto_width: bool,
    pub keep_auto_height: bool,
    /// Always write `auto`
    pub auto_width: bool,
    pub auto_height: bool,
    pub handles: SmallVec<[Handle; 8]>,
    pub handle_size: f32,
}

impl Default for ResizerConfig {
    fn default() -> Self {
        Self {
            ratio_default: false,
            min_dim: 10.0,
            max_dim: None,
            step: 1.0,
            unit_width: Unit::Px,
            unit_height: Unit::Px,
            key_width: "width".to_string(),
            key_height: "height".to_string(),
            current_unit: true,
            keep_auto_width: false,
            keep_auto_height: false,
            auto_width: false,
            auto_height: false,
            handles: SmallVec::from_slice(&Handle::ALL),
            handle_size: 8.0,
        }
    }
}

/// A box being resized, in the target's own space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResizeBox {
    pub t: f32,
    pub l: f32,
    pub w: f32,
    pub h: f32,
}

impl ResizeBox {
    pub fn new(t: f32, l: f32, w: f32, h: f32) -> Self {
        Self { t, l, w, h }
    }

    pub fn from_bounds(bounds: &Bounds) -> Self {
        Self::new(bounds.top(), bounds.left(), bounds.width(), bounds.height())
    }

    pub fn to_bounds(&self) -> Bounds {
        Bounds::from_rect(self.t, self.l, self.w, self.h)
    }
}

/// Computes the box for `handle` dragged by `delta` from `start`.
pub fn calc(
    start: &ResizeBox,
    handle: Handle,
    delta: Vec2,
    config: &ResizerConfig,
    shift: bool,
) -> ResizeBox {
    let step = config.step;
    let mut w = start.w;
    let mut h = start.h;

    if handle.is_right() {
        w = normalize_float(start.w + delta.x * step, step, start.w);
    } else if handle.is_left() {
        w = normalize_float(start.w - delta.x * step, step, start.w);
    }
    if handle.is_bottom() {
        h = normalize_float(start.h + delta.y * step, step, start.h);
    } else if handle.is_top() {
        h = normalize_float(start.h - delta.y * step, step, start.h);
    }

    w = w.max(config.min_dim);
    h = h.max(config.min_dim);
    if let Some(max) = config.max_dim {
        w = w.min(max);
        h = h.min(max);
    }

    if !handle.is_center() && (config.ratio_default ^ shift) && start.h > 0.0 {
        let ratio = start.w / start.h;
        if w / h > ratio {
            h = (w / ratio).round();
        } else {
            w = (h * ratio).round();
        }
    }

    let mut result = ResizeBox::new(start.t, start.l, w, h);
    if handle.is_left() {
        result.l = start.l + start.w - w;
    }
    if handle.is_top() {
        result.t = start.t + start.h - h;
    }
    result
}

/// Passed to [`ResizeTarget::update`].
#[derive(Debug, Clone, Copy)]
pub struct UpdateOptions<'a> {
    /// Final update of the session
    pub store: bool,
    pub handle: Handle,
    pub config: &'a ResizerConfig,
}

/// What a [`Resizer`] resizes.
pub trait ResizeTarget {
    /// Current box of the target
    fn rect(&self, cx: &DragContext<'_>) -> Option<ResizeBox>;

    /// Size percentages resolve against
    fn parent_size(&self, _cx: &DragContext<'_>) -> Vec2 {
        Vec2::ZERO
    }

    /// Called once when a handle is pressed, with the session's own copy of
    /// the config
    fn on_start(&mut self, _cx: &mut DragContext<'_>, _config: &mut ResizerConfig) {}

    fn update(&mut self, cx: &mut DragContext<'_>, rect: &ResizeBox, options: &UpdateOptions<'_>);
}

/// A handle laid out around the focused rect
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandleBox {
    pub handle: Handle,
    pub bounds: Bounds,
}

struct ResizeSession {
    handle: Handle,
    config: ResizerConfig,
    target: Box<dyn ResizeTarget>,
    start_pointer: Vec2,
    start_box: ResizeBox,
    current: ResizeBox,
    parent_size: Vec2,
}

pub struct Resizer {
    config: ResizerConfig,
    focused: Option<Bounds>,
    handles: SmallVec<[HandleBox; 8]>,
    session: Option<ResizeSession>,
}

impl Resizer {
    pub fn new(config: ResizerConfig) -> Self {
        Self {
            config,
            focused: None,
            handles: smallvec![],
            session: None,
        }
    }

    pub fn config(&self) -> &ResizerConfig {
        &self.config
    }

    pub fn is_resizing(&self) -> bool {
        self.session.is_some()
    }

    pub fn current(&self) -> Option<ResizeBox> {
        self.session.as_ref().map(|s| s.current)
    }

    pub fn parent_size(&self) -> Option<Vec2> {
        self.session.as_ref().map(|s| s.parent_size)
    }

    /// Lays the enabled handles out around `rect`.
    pub fn focus(&mut self, rect: Bounds) {
        let size = Vec2::splat(self.config.handle_size);
        self.handles = self
            .config
            .handles
            .iter()
            .map(|handle| HandleBox {
                handle: *handle,
                bounds: Bounds::from_center_size(handle.anchor(&rect), size),
            })
            .collect();
        self.focused = Some(rect);
    }

    pub fn blur(&mut self) {
        self.focused = None;
        self.handles.clear();
    }

    pub fn focused(&self) -> Option<Bounds> {
        self.focused
    }

    pub fn handles(&self) -> &[HandleBox] {
        &self.handles
    }

    pub fn handle_at(&self, point: Vec2) -> Option<Handle> {
        self.handles
            .iter()
            .find(|handle| handle.bounds.contains_point(point))
            .map(|handle| handle.handle)
    }

    /// Starts resizing `target` from `handle`; returns false when the target
    /// has no box to start from.
    pub fn start(
        &mut self,
        cx: &mut DragContext<'_>,
        handle: Handle,
        target: impl ResizeTarget + 'static,
        ev: &PointerEvent,
    ) -> bool {
        if self.is_resizing() {
            self.stop(cx, true);
        }
        let mut target: Box<dyn ResizeTarget> = Box::new(target);
        let Some(start_box) = target.rect(cx) else {
            log::debug!("resize target has no box");
            return false;
        };
        let mut config = self.config.clone();
        target.on_start(cx, &mut config);

        self.session = Some(ResizeSession {
            handle,
            config,
            parent_size: target.parent_size(cx),
            target,
            start_pointer: pointer(cx, ev),
            start_box,
            current: start_box,
        });
        log::debug!("resize started from {handle}");
        cx.emit(DragEvent::ResizeStart { handle });
        true
    }

    pub fn on_move(&mut self, cx: &mut DragContext<'_>, ev: &PointerEvent) {
        let current = pointer(cx, ev);
        let zoom = cx.canvas.zoom_decimal();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let delta = (current - session.start_pointer) / zoom;
        session.current = calc(
            &session.start_box,
            session.handle,
            delta,
            &session.config,
            ev.modifiers.shift,
        );
        log::trace!("resize {} by {delta}", session.handle);
        update_target(cx, session, false);
        cx.emit(DragEvent::ResizeMove {
            rect: session.current,
        });
    }

    pub fn on_pointer_up(&mut self, cx: &mut DragContext<'_>, ev: &PointerEvent) -> Option<ResizeBox> {
        if !self.is_resizing() {
            return None;
        }
        self.on_move(cx, ev);
        self.stop(cx, false)
    }

    pub fn on_key(&mut self, cx: &mut DragContext<'_>, ev: &KeyEvent) -> bool {
        if ev.key == Key::Escape && self.is_resizing() {
            self.stop(cx, true);
            return true;
        }
        false
    }

    /// Ends the session; a cancelled one writes the start box back.
    pub fn stop(&mut self, cx: &mut DragContext<'_>, cancel: bool) -> Option<ResizeBox> {
        let mut session = self.session.take()?;
        if cancel {
            session.current = session.start_box;
        }
        update_target(cx, &mut session, true);
        if let Some(focused) = self.focused {
            let rect = session.current.to_bounds();
            if rect != focused {
                self.focus(rect);
            }
        }
        cx.emit(DragEvent::ResizeEnd {
            rect: session.current,
            cancelled: cancel,
        });
        Some(session.current)
    }
}

fn update_target(cx: &mut DragContext<'_>, session: &mut ResizeSession, store: bool) {
    let options = UpdateOptions {
        store,
        handle: session.handle,
        config: &session.config,
    };
    session.target.update(cx, &session.current, &options);
}

fn pointer(cx: &DragContext<'_>, ev: &PointerEvent) -> Vec2 {
    match cx.canvas.mouse_relative_canvas(cx.scene, ev.document, ev.client) {
        Ok(point) => point.as_vec2(),
        Err(err) => {
            log::debug!("pointer outside the canvas: {err}");
            ev.client
        }
    }
}

/// Resizes a component by writing its size into its style.
#[derive(Debug, Clone, Copy)]
pub struct ComponentResizeTarget {
    component: ComponentId,
}

impl ComponentResizeTarget {
    pub fn new(component: ComponentId) -> Self {
        Self { component }
    }

    fn is_absolute(cx: &DragContext<'_>, component: ComponentId) -> bool {
        cx.tree
            .get(component)
            .and_then(|c| c.style_value("position"))
            .map(|position| position.trim() == "absolute")
            .unwrap_or(false)
    }

    fn style_length(cx: &DragContext<'_>, component: ComponentId, key: &str) -> Option<Length> {
        cx.tree.get(component)?.style_value(key)?.parse().ok()
    }

    /// The value written for one dimension, or `None` to leave it alone
    fn dimension(
        current: Option<Length>,
        size: f32,
        parent: f32,
        unit: Unit,
        config: &ResizerConfig,
        keep_auto: bool,
        auto: bool,
    ) -> Option<Length> {
        if auto {
            return Some(Length::Auto);
        }
        if keep_auto && current.map_or(false, |length| length.is_auto()) {
            return None;
        }
        let unit = match current {
            Some(Length::Value(_, unit)) if config.current_unit => unit,
            _ => unit,
        };
        Some(match unit {
            Unit::Px => Length::px(size),
            Unit::Percent if parent > 0.0 => {
                Length::percent(normalize_float(size / parent * 100.0, 0.01, 0.0))
            }
            Unit::Percent => Length::px(size),
        })
    }
}

impl ResizeTarget for ComponentResizeTarget {
    fn rect(&self, cx: &DragContext<'_>) -> Option<ResizeBox> {
        let el = cx.scene.element_of(self.component)?;
        let rect = cx.scene.get(el)?.rect;
        let mut result = ResizeBox::from_bounds(&rect);
        if Self::is_absolute(cx, self.component) {
            if let Some(left) = Self::style_length(cx, self.component, "left").and_then(|l| l.to_px(0.0)) {
                result.l = left;
            }
            if let Some(top) = Self::style_length(cx, self.component, "top").and_then(|l| l.to_px(0.0)) {
                result.t = top;
            }
        }
        Some(result)
    }

    fn parent_size(&self, cx: &DragContext<'_>) -> Vec2 {
        cx.scene
            .element_of(self.component)
            .and_then(|el| cx.scene.parent(el))
            .and_then(|parent| cx.scene.get(parent))
            .map(|parent| parent.size())
            .unwrap_or(Vec2::ZERO)
    }

    fn update(&mut self, cx: &mut DragContext<'_>, rect: &ResizeBox, options: &UpdateOptions<'_>) {
        let config = options.config;
        let handle = options.handle;
        let parent = self.parent_size(cx);
        let absolute = Self::is_absolute(cx, self.component);

        let width = if matches!(handle, Handle::Tc | Handle::Bc) {
            None
        } else {
            Self::dimension(
                Self::style_length(cx, self.component, &config.key_width),
                rect.w,
                parent.x,
                config.unit_width,
                config,
                config.keep_auto_width,
                config.auto_width,
            )
        };
        let height = if matches!(handle, Handle::Cl | Handle::Cr) {
            None
        } else {
            Self::dimension(
                Self::style_length(cx, self.component, &config.key_height),
                rect.h,
                parent.y,
                config.unit_height,
                config,
                config.keep_auto_height,
                config.auto_height,
            )
        };

        let Some(component) = cx.tree.get_mut(self.component) else {
            return;
        };
        if let Some(width) = width {
            component.set_style(config.key_width.as_str(), width.to_string());
        }
        if let Some(height) = height {
            component.set_style(config.key_height.as_str(), height.to_string());
        }
        if absolute {
            component.set_style("left", Length::px(rect.l).to_string());
            component.set_style("top", Length::px(rect.t).to_string());
        }

        if let Some(el) = cx.scene.element_of(self.component) {
            let parent_origin = cx
                .scene
                .parent(el)
                .and_then(|parent| cx.scene.get(parent))
                .map(|parent| parent.rect.origin())
                .unwrap_or(Vec2::ZERO);
            if let Some(element) = cx.scene.get_mut(el) {
                let origin = if absolute {
                    parent_origin + Vec2::new(rect.l, rect.t)
                } else {
                    element.rect.origin()
                };
                element.rect = Bounds::from_origin_size(origin, Vec2::new(rect.w, rect.h));
            }
        }
        if options.store {
            log::debug!(
                "resized component {} to {}x{}",
                self.component,
                rect.w,
                rect.h
            );
        }
        cx.canvas.clear_offsets();
        cx.canvas.refresh_spots(cx.scene);
        cx.flush_spot_events();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorter::RecordedWarnings;
    use canvas::{Canvas, CanvasConfig};
    use node::{Component, ComponentTree};
    use scene_graph::{DocumentId, Element, SceneGraph};

    fn config() -> ResizerConfig {
        ResizerConfig::default()
    }

    #[test]
    fn test_corner_keeps_ratio() {
        let config = ResizerConfig {
            ratio_default: true,
            ..config()
        };
        let start = ResizeBox::new(0.0, 0.0, 120.0, 40.0);
        let result = calc(&start, Handle::Br, Vec2::new(120.0, 0.0), &config, false);
        assert_eq!(result.w, 240.0);
        assert!((result.h - 80.0).abs() <= 1.0);

        // Shift flips the default
        let result = calc(&start, Handle::Br, Vec2::new(120.0, 0.0), &config, true);
        assert_eq!(result.h, 40.0);
    }

    #[test]
    fn test_edge_handles_ignore_ratio() {
        let config = ResizerConfig {
            ratio_default: true,
            ..config()
        };
        let start = ResizeBox::new(0.0, 0.0, 100.0, 50.0);
        let result = calc(&start, Handle::Cr, Vec2::new(50.0, 30.0), &config, false);
        assert_eq!(result, ResizeBox::new(0.0, 0.0, 150.0, 50.0));
    }

    #[test]
    fn test_clamps_to_min_and_max() {
        let config = ResizerConfig {
            min_dim: 10.0,
            max_dim: Some(200.0),
            ..config()
        };
        let start = ResizeBox::new(0.0, 0.0, 100.0, 100.0);
        let shrunk = calc(&start, Handle::Br, Vec2::new(-95.0, -500.0), &config, false);
        assert_eq!(shrunk.w, 10.0);
        assert_eq!(shrunk.h, 10.0);
        let grown = calc(&start, Handle::Br, Vec2::new(150.0, 0.0), &config, false);
        assert_eq!(grown.w, 200.0);
    }

    #[test]
    fn test_top_left_keeps_opposite_edge() {
        let start = ResizeBox::new(20.0, 30.0, 100.0, 80.0);
        let result = calc(&start, Handle::Tl, Vec2::new(10.0, -20.0), &config(), false);
        assert_eq!(result, ResizeBox::new(0.0, 40.0, 90.0, 100.0));
        assert_eq!(result.l + result.w, start.l + start.w);
        assert_eq!(result.t + result.h, start.t + start.h);
    }

    #[test]
    fn test_step_scales_delta() {
        let config = ResizerConfig {
            step: 0.5,
            ..config()
        };
        let start = ResizeBox::new(0.0, 0.0, 100.0, 100.0);
        let result = calc(&start, Handle::Cr, Vec2::new(15.0, 0.0), &config, false);
        assert_eq!(result.w, 107.5);
    }

    #[test]
    fn test_handle_layout() {
        let mut resizer = Resizer::new(config());
        resizer.focus(Bounds::from_rect(100.0, 100.0, 200.0, 100.0));
        assert_eq!(resizer.handles().len(), 8);
        assert_eq!(resizer.handle_at(Vec2::new(301.0, 199.0)), Some(Handle::Br));
        assert_eq!(resizer.handle_at(Vec2::new(200.0, 98.0)), Some(Handle::Tc));
        assert_eq!(resizer.handle_at(Vec2::new(200.0, 150.0)), None);

        let mut only_corner = Resizer::new(ResizerConfig {
            handles: SmallVec::from_slice(&[Handle::Br]),
            ..config()
        });
        only_corner.focus(Bounds::from_rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(only_corner.handles().len(), 1);
        assert_eq!(only_corner.handle_at(Vec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_handle_strings() {
        assert_eq!(Handle::Br.to_string(), "br");
        assert_eq!("tc".parse::<Handle>().unwrap(), Handle::Tc);
        let config: ResizerConfig =
            serde_json::from_str(r#"{ "handles": ["tl", "br"], "maxDim": 300 }"#).unwrap();
        assert_eq!(config.handles.as_slice(), &[Handle::Tl, Handle::Br]);
        assert_eq!(config.max_dim, Some(300.0));
        assert_eq!(config.min_dim, 10.0);
    }

    struct Fixture {
        tree: ComponentTree,
        scene: SceneGraph,
        canvas: Canvas,
        warnings: RecordedWarnings,
        events: Vec<DragEvent>,
        document: DocumentId,
        component: ComponentId,
    }

    impl Fixture {
        fn new(component: Component) -> Self {
            let mut scene = SceneGraph::new();
            let document = scene.create_document(Vec2::new(800.0, 600.0), None);
            let root = scene.document(document).unwrap().root;
            let canvas = Canvas::new(&scene, root, CanvasConfig::default()).unwrap();

            let mut tree = ComponentTree::new();
            let id = tree.insert(tree.root(), component, None).unwrap();
            scene.bind(root, tree.root());
            let el = scene
                .create_element(
                    root,
                    Element::new("div").with_rect(Bounds::from_rect(0.0, 0.0, 200.0, 100.0)),
                    None,
                )
                .unwrap();
            scene.bind(el, id);

            Self {
                tree,
                scene,
                canvas,
                warnings: RecordedWarnings::default(),
                events: Vec::new(),
                document,
                component: id,
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

        fn style(&self, key: &str) -> Option<&str> {
            self.tree.get(self.component).unwrap().style_value(key)
        }
    }

    #[test]
    fn test_component_resize_writes_px() {
        let mut fx = Fixture::new(Component::default());
        let mut resizer = Resizer::new(config());
        let target = ComponentResizeTarget::new(fx.component);

        let start = fx.pointer(200.0, 100.0);
        assert!(resizer.start(&mut fx.cx(), Handle::Br, target, &start));
        let end = fx.pointer(250.0, 130.0);
        assert_eq!(
            resizer.on_pointer_up(&mut fx.cx(), &end),
            Some(ResizeBox::new(0.0, 0.0, 250.0, 130.0))
        );

        assert_eq!(fx.style("width"), Some("250px"));
        assert_eq!(fx.style("height"), Some("130px"));
        assert!(matches!(
            fx.events.last(),
            Some(DragEvent::ResizeEnd { cancelled: false, .. })
        ));
    }

    #[test]
    fn test_component_resize_keeps_units() {
        let component = Component::default()
            .with_style("width", "25%")
            .with_style("height", "auto");
        let mut fx = Fixture::new(component);
        let mut resizer = Resizer::new(ResizerConfig {
            keep_auto_height: true,
            ..config()
        });
        let target = ComponentResizeTarget::new(fx.component);

        let start = fx.pointer(200.0, 100.0);
        resizer.start(&mut fx.cx(), Handle::Br, target, &start);
        let end = fx.pointer(400.0, 160.0);
        resizer.on_pointer_up(&mut fx.cx(), &end);

        // 400px of an 800px wide parent
        assert_eq!(fx.style("width"), Some("50%"));
        assert_eq!(fx.style("height"), Some("auto"));
    }

    #[test]
    fn test_edge_handle_writes_one_dimension() {
        let mut fx = Fixture::new(Component::default());
        let mut resizer = Resizer::new(config());
        let target = ComponentResizeTarget::new(fx.component);

        let start = fx.pointer(100.0, 100.0);
        resizer.start(&mut fx.cx(), Handle::Bc, target, &start);
        let end = fx.pointer(140.0, 120.0);
        resizer.on_pointer_up(&mut fx.cx(), &end);

        assert_eq!(fx.style("width"), None);
        assert_eq!(fx.style("height"), Some("120px"));
    }

    #[test]
    fn test_escape_restores_start_box() {
        let mut fx = Fixture::new(Component::default());
        let mut resizer = Resizer::new(config());
        let target = ComponentResizeTarget::new(fx.component);

        let start = fx.pointer(200.0, 100.0);
        resizer.start(&mut fx.cx(), Handle::Br, target, &start);
        let moved = fx.pointer(300.0, 300.0);
        resizer.on_move(&mut fx.cx(), &moved);
        assert_eq!(fx.style("width"), Some("300px"));

        let escape = KeyEvent::new(fx.document, Key::Escape);
        assert!(resizer.on_key(&mut fx.cx(), &escape));
        assert!(!resizer.is_resizing());
        assert_eq!(fx.style("width"), Some("200px"));
        assert_eq!(fx.style("height"), Some("100px"));
        let el = fx.scene.element_of(fx.component).unwrap();
        assert_eq!(fx.scene.get(el).unwrap().size(), Vec2::new(200.0, 100.0));
    }
}
