//! # Sorter
//!
//! Reorders components by dragging them between siblings, into containers
//! and across frames, and drops external content into the canvas.
//!
//! ## Key Concepts
//!
//! - **Target resolution**: the element under the pointer is walked up to
//!   the nearest item or container; invalid targets defer to their parent,
//!   and the parent also takes over when the pointer is near the target's
//!   borders (or the target has no children and nesting is off)
//! - **Dims**: the candidate children of the resolved target, measured once
//!   per target and reused while the pointer stays over it
//! - **Position**: a [`Pos`] names the reference child and whether the drop
//!   goes before or after it; the placeholder follows it
//! - **Commit**: on release the source is taken out of its collection as a
//!   temporary removal and added at the insertion index, so the pair undoes
//!   as one step
//!
//! A sort session starts with [`Sorter::start_sort`], follows the pointer
//! with [`Sorter::on_move`] and ends with [`Sorter::end_move`] or, on
//! Escape, [`Sorter::cancel`].

mod dims;
mod placeholder;
mod position;
mod validate;

pub use dims::{children_dims, measure, near_borders, style_in_flow, Dim, DimSpace};
pub use placeholder::{Orientation, Placeholder};
pub use position::{find_position, Method, Pos};
pub use validate::{
    component_matches, is_textable_active, rejection_reasons, validate, LogWarnings,
    MoveWarning, RecordedWarnings, ValidationResult, WarningLog,
};

use crate::content::DropContent;
use crate::context::DragContext;
use crate::events::DragEvent;
use crate::input::{Key, KeyEvent, PointerEvent};
use canvas::{SpotFilter, SpotProps, SpotType};
use glam::Vec2;
use node::{AddOptions, ComponentId, MoveAction, Predicate, RemoveOptions, Status};
use scene_graph::{DocumentId, ElementId, SceneGraph};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

const TARGET_SPOT_ID: &str = "sorter-target";

/// How siblings are assumed to flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Decided per child from its computed style
    #[default]
    #[serde(alias = "a")]
    Auto,
    #[serde(alias = "v")]
    Vertical,
    #[serde(alias = "h")]
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SorterConfig {
    /// Elements that can receive drops
    pub container_sel: String,
    /// Elements that can be sorted
    pub item_sel: String,
    /// Allow dropping inside children of the hovered container
    pub nested: bool,
    /// Distance from a target's edge at which its parent takes over
    pub border_offset: f32,
    /// Measure dims and the pointer in canvas space
    pub canvas_relative: bool,
    /// Add the container offset to dims instead of subtracting it
    pub wmargin: bool,
    pub direction: Direction,
    /// Padding assumed for an empty container without its own padding
    pub placeholder_padding: f32,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            container_sel: "*".to_string(),
            item_sel: "*".to_string(),
            nested: false,
            border_offset: 10.0,
            canvas_relative: false,
            wmargin: false,
            direction: Direction::Auto,
            placeholder_padding: 5.0,
        }
    }
}

/// What a sort session drags.
#[derive(Debug, Clone, PartialEq)]
pub enum SortSource {
    /// The element the drag started on
    Element(ElementId),
    /// Components selected in the host, moved together
    Components(Vec<ComponentId>),
    /// Content that doesn't exist in the tree yet
    Content(DropContent),
}

/// One component handed to [`Sorter::move_component`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Component(ComponentId),
    /// The session's drop content
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved(ComponentId),
    /// The source already sits at the requested slot
    Unchanged(ComponentId),
    Rejected,
}

impl MoveResult {
    pub fn moved(&self) -> Option<ComponentId> {
        match self {
            MoveResult::Moved(id) => Some(*id),
            _ => None,
        }
    }

    fn component(&self) -> Option<ComponentId> {
        match self {
            MoveResult::Moved(id) | MoveResult::Unchanged(id) => Some(*id),
            MoveResult::Rejected => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortOutcome {
    pub moved: Vec<ComponentId>,
    pub cancelled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SorterState {
    Idle,
    Dragging,
}

/// Finds the insertion index inside a text component for caret drops.
pub trait CaretLocator {
    fn caret_index(&self, cx: &DragContext<'_>, target: ComponentId, point: Vec2) -> Option<usize>;
}

/// Always inserts at the end of the text component.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppendCaret;

impl CaretLocator for AppendCaret {
    fn caret_index(&self, _cx: &DragContext<'_>, _target: ComponentId, _point: Vec2) -> Option<usize> {
        None
    }
}

/// Replaces the host-reported element under the pointer.
pub type TargetResolver = dyn Fn(&DragContext<'_>, &PointerEvent) -> Option<ElementId>;

pub struct Sorter {
    config: SorterConfig,
    container: Option<ElementId>,
    caret: Box<dyn CaretLocator>,
    custom_target: Option<Box<TargetResolver>>,
    state: SorterState,
    placeholder: Placeholder,

    source_el: Option<ElementId>,
    sources: Vec<ComponentId>,
    drop_content: Option<DropContent>,
    probe: Option<ComponentId>,
    frozen: Vec<(ComponentId, Status)>,
    documents: SmallVec<[DocumentId; 4]>,
    moved: bool,

    target: Option<ElementId>,
    target_dim: Option<Dim>,
    target_parent: Option<ElementId>,
    prev_target: Option<ElementId>,
    prev_target_dim: Option<Dim>,
    cache_dims: Vec<Dim>,
    cache_dims_parent: Vec<Dim>,
    last_dims: Vec<Dim>,
    last_pos: Option<Pos>,
    last_placement: Option<(ElementId, Pos)>,
    selected_parent: Option<(ComponentId, Status)>,
    spot_target: Option<ElementId>,
    caret_index: Option<usize>,
}

impl Sorter {
    pub fn new(config: SorterConfig) -> Self {
        Self {
            config,
            container: None,
            caret: Box::new(AppendCaret),
            custom_target: None,
            state: SorterState::Idle,
            placeholder: Placeholder::default(),
            source_el: None,
            sources: Vec::new(),
            drop_content: None,
            probe: None,
            frozen: Vec::new(),
            documents: SmallVec::new(),
            moved: false,
            target: None,
            target_dim: None,
            target_parent: None,
            prev_target: None,
            prev_target_dim: None,
            cache_dims: Vec::new(),
            cache_dims_parent: Vec::new(),
            last_dims: Vec::new(),
            last_pos: None,
            last_placement: None,
            selected_parent: None,
            spot_target: None,
            caret_index: None,
        }
    }

    /// Element whose page offset dims are measured from when the sorter is
    /// not canvas relative
    pub fn with_container(mut self, container: ElementId) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_caret_locator(mut self, caret: impl CaretLocator + 'static) -> Self {
        self.caret = Box::new(caret);
        self
    }

    pub fn with_custom_target<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&DragContext<'_>, &PointerEvent) -> Option<ElementId> + 'static,
    {
        self.custom_target = Some(Box::new(resolve));
        self
    }

    pub fn config(&self) -> &SorterConfig {
        &self.config
    }

    pub fn state(&self) -> SorterState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == SorterState::Dragging
    }

    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    /// Resolved drop target element
    pub fn target(&self) -> Option<ElementId> {
        self.target
    }

    pub fn last_pos(&self) -> Option<Pos> {
        self.last_pos
    }

    pub fn last_dims(&self) -> &[Dim] {
        &self.last_dims
    }

    pub fn sources(&self) -> &[ComponentId] {
        &self.sources
    }

    pub fn source_element(&self) -> Option<ElementId> {
        self.source_el
    }

    /// Detached component built from the drop content for validation
    pub fn probe(&self) -> Option<ComponentId> {
        self.probe
    }

    /// Documents whose release and key events end the session
    pub fn documents(&self) -> &[DocumentId] {
        &self.documents
    }

    /// Replaces the content dropped by this session
    pub fn set_drop_content(&mut self, cx: &mut DragContext<'_>, content: Option<DropContent>) {
        self.discard_probe(cx);
        self.drop_content = content;
        self.prev_target = None;
    }

    pub fn start_sort(&mut self, cx: &mut DragContext<'_>, source: SortSource) {
        if self.is_dragging() {
            log::debug!("sort started while another is running; cancelling the previous one");
            self.cancel(cx);
        }

        self.state = SorterState::Dragging;
        self.documents = smallvec![cx.canvas.document()];

        match source {
            SortSource::Element(el) => {
                let selectors = format!("{}, {}", self.config.item_sel, self.config.container_sel);
                let el = if cx.scene.matches(el, &selectors) {
                    Some(el)
                } else {
                    closest_from_parent(cx.scene, el, &self.config.item_sel)
                };
                self.source_el = el;
                if let Some(el) = el {
                    self.track_document(cx.scene.document_of(el));
                    self.sources.extend(cx.scene.component_of(el));
                }
            }
            SortSource::Components(components) => {
                for id in components {
                    if !cx.tree.contains(id) {
                        log::warn!("ignoring unknown component {id} in sort source");
                        continue;
                    }
                    let document = cx.scene.element_of(id).and_then(|el| cx.scene.document_of(el));
                    self.track_document(document);
                    self.sources.push(id);
                }
                self.source_el = self.sources.first().and_then(|id| cx.scene.element_of(*id));
            }
            SortSource::Content(content) => {
                self.drop_content = Some(content);
            }
        }

        for &id in &self.sources {
            if let Some(component) = cx.tree.get_mut(id) {
                self.frozen.push((id, component.status));
                component.status = Status::Freezed;
            }
        }

        log::debug!("sort started with {} source(s)", self.sources.len());
        cx.emit(DragEvent::SortStart {
            sources: self.sources.clone(),
        });
    }

    pub fn on_move(&mut self, cx: &mut DragContext<'_>, ev: &PointerEvent) {
        if !self.is_dragging() {
            return;
        }
        self.moved = true;
        self.track_document(Some(ev.document));
        self.placeholder.show();

        let Some(point) = self.pointer(cx, ev) else {
            return;
        };
        if ev.document != cx.canvas.document() {
            if !cx.canvas.is_autoscrolling() {
                cx.canvas.start_autoscroll(ev.document);
            }
            cx.canvas.update_autoscroll_pointer(ev.client.y);
        }

        let source = self.source_component(cx);
        let hit = match &self.custom_target {
            Some(resolve) => resolve(cx, ev),
            None => ev.target,
        };
        let dims = self.dims_from_target(cx, hit, point, source);
        let target_model = self.target.and_then(|el| cx.scene.component_of(el));
        self.select_target_model(cx, target_model);
        if target_model.is_none() {
            self.placeholder.hide();
        }
        let Some(target) = self.target else {
            return;
        };

        let pos = find_position(&dims, point);
        let textable = match (source, target_model) {
            (Some(source), Some(target)) => is_textable_active(cx.tree, source, target),
            _ => false,
        };
        if textable {
            self.placeholder.hide();
            if let Some(target) = target_model {
                self.caret_index = self.caret.caret_index(cx, target, point);
            }
        } else if self.last_placement != Some((target, pos)) {
            self.placeholder.move_to(
                &dims,
                &pos,
                self.target_dim.as_ref(),
                self.config.nested,
                self.config.placeholder_padding,
            );
            self.last_placement = Some((target, pos));
        }
        self.last_dims = dims;
        self.last_pos = Some(pos);

        if self.spot_target != Some(target) {
            let mut props = SpotProps::new(SpotType::sorter_target()).with_element(target);
            props.id = Some(TARGET_SPOT_ID.to_string());
            props.component = target_model;
            cx.canvas.add_spot(cx.scene, props);
            self.spot_target = Some(target);
            cx.flush_spot_events();
        }

        cx.emit(DragEvent::SortMove {
            target: target_model,
            pos,
            pointer: point,
        });
    }

    /// Pointer release; ignored when it comes from a document the session
    /// doesn't listen to
    pub fn on_pointer_up(
        &mut self,
        cx: &mut DragContext<'_>,
        ev: &PointerEvent,
    ) -> Option<SortOutcome> {
        (self.is_dragging() && self.documents.contains(&ev.document)).then(|| self.end_move(cx))
    }

    /// Escape rolls the session back without moving anything
    pub fn on_key(&mut self, cx: &mut DragContext<'_>, ev: &KeyEvent) -> Option<SortOutcome> {
        let listening = self.is_dragging() && self.documents.contains(&ev.document);
        (listening && ev.key == Key::Escape).then(|| self.cancel(cx))
    }

    pub fn cancel(&mut self, cx: &mut DragContext<'_>) -> SortOutcome {
        self.moved = false;
        self.end_move(cx)
    }

    /// Commits the drop at the last position and ends the session.
    pub fn end_move(&mut self, cx: &mut DragContext<'_>) -> SortOutcome {
        if !self.is_dragging() {
            return SortOutcome {
                moved: Vec::new(),
                cancelled: true,
            };
        }
        self.placeholder.hide();

        let mut moved = Vec::new();
        if let (true, Some(target), Some(pos)) = (self.moved, self.target, self.last_pos) {
            if self.drop_content.is_some() {
                moved.extend(self.move_component(cx, target, MoveSource::Content, pos).moved());
            } else if self.sources.len() == 1 {
                let source = MoveSource::Component(self.sources[0]);
                moved.extend(self.move_component(cx, target, source, pos).moved());
            } else if !self.sources.is_empty() {
                moved = self.move_batch(cx, target, pos);
            }
        }

        self.finish(cx);
        let outcome = SortOutcome {
            cancelled: moved.is_empty(),
            moved,
        };
        log::debug!("sort ended, {} component(s) moved", outcome.moved.len());
        cx.emit(DragEvent::SortEnd {
            moved: outcome.moved.clone(),
            cancelled: outcome.cancelled,
        });
        outcome
    }

    /// Moves `source` into the component rendered by `target_el` at `pos`.
    ///
    /// Invalid moves leave the tree untouched and log an "Invalid target
    /// position" warning listing the reasons.
    pub fn move_component(
        &mut self,
        cx: &mut DragContext<'_>,
        target_el: ElementId,
        source: MoveSource,
        pos: Pos,
    ) -> MoveResult {
        let index = pos.insertion_index();
        let target = cx.scene.component_of(target_el);
        let source_id = match source {
            MoveSource::Component(id) => Some(id),
            MoveSource::Content => self.source_component(cx),
        };
        let validation = validate(cx.tree, source_id, target, Some(index));

        let result = match target {
            Some(target) if validation.valid => {
                self.apply_move(cx, target_el, target, source, source_id, index)
            }
            _ => {
                let warning = MoveWarning {
                    errors: rejection_reasons(&validation, cx.tree),
                    source: source_id,
                    target,
                    context: "sorter",
                };
                cx.warn("Invalid target position", warning);
                MoveResult::Rejected
            }
        };

        self.prev_target = None;
        cx.emit(DragEvent::Drop {
            target,
            index,
            component: result.component(),
        });
        result
    }

    /// Moves several sources to one gap, keeping their tree order.
    ///
    /// Each source goes right after the one placed before it, so sources
    /// taken out of the target collection ahead of the gap don't shift the
    /// following insertions.
    fn move_batch(&mut self, cx: &mut DragContext<'_>, target: ElementId, pos: Pos) -> Vec<ComponentId> {
        let mut sources = self.sources.clone();
        cx.tree.sort_by_tree_order(&mut sources);
        let target_model = cx.scene.component_of(target);

        let mut moved = Vec::new();
        let mut gap = pos.insertion_index();
        for source in sources {
            let step = Pos {
                index: pos.index,
                index_el: gap,
                method: Method::Before,
            };
            let result = self.move_component(cx, target, MoveSource::Component(source), step);
            if let Some(id) = result.component() {
                if cx.tree.parent(id) == target_model {
                    if let Some(index) = cx.tree.index(id) {
                        gap = index + 1;
                    }
                }
            }
            moved.extend(result.moved());
        }
        moved
    }

    fn apply_move(
        &mut self,
        cx: &mut DragContext<'_>,
        target_el: ElementId,
        target: ComponentId,
        source: MoveSource,
        source_id: Option<ComponentId>,
        index: usize,
    ) -> MoveResult {
        let textable = source_id
            .map(|id| is_textable_active(cx.tree, id, target))
            .unwrap_or(false);

        let (id, mut at, action, origin) = match source {
            MoveSource::Component(id) => {
                let src_index = cx.tree.index(id);
                let same_collection = cx.tree.parent(id) == Some(target);
                let same_index =
                    src_index == Some(index) || (index > 0 && src_index == Some(index - 1));
                if same_collection && same_index && !textable {
                    return MoveResult::Unchanged(id);
                }
                let (parent, old_index) = match cx.tree.remove(id, RemoveOptions::temporary()) {
                    Ok(removed) => removed,
                    Err(err) => {
                        log::error!("cannot take component {id} out of its collection: {err}");
                        return MoveResult::Rejected;
                    }
                };
                let at = if same_collection && index > old_index {
                    index - 1
                } else {
                    index
                };
                (id, at, MoveAction::MoveComponent, Some((parent, old_index)))
            }
            MoveSource::Content => {
                let Some(def) = self.drop_content.as_ref().and_then(DropContent::first_def) else {
                    log::debug!("nothing to drop");
                    return MoveResult::Rejected;
                };
                let id = cx.tree.build(&def);
                (id, index, MoveAction::AddComponent, None)
            }
        };

        let len = cx.tree.children(target).len();
        if textable {
            at = self.caret_index.map(|caret| caret.min(len)).unwrap_or(len);
        }
        at = at.min(len);

        match cx.tree.add(target, id, AddOptions::at(at).with_action(action)) {
            Ok(landed) => {
                log::debug!("dropped component {id} into {target} at {landed}");
                if matches!(source, MoveSource::Content) {
                    self.drop_content = None;
                }
                self.sync_scene(cx, id, target_el, target);
                MoveResult::Moved(id)
            }
            Err(err) => {
                log::error!("cannot add component {id} to {target}: {err}");
                match origin {
                    Some((parent, old_index)) => {
                        if let Err(err) = cx.tree.add(parent, id, AddOptions::at(old_index)) {
                            log::error!("cannot restore component {id}: {err}");
                        }
                    }
                    None => {
                        let _ = cx.tree.destroy(id);
                    }
                }
                MoveResult::Rejected
            }
        }
    }

    /// Mirrors a committed move on the rendered elements
    fn sync_scene(
        &mut self,
        cx: &mut DragContext<'_>,
        moved: ComponentId,
        target_el: ElementId,
        target: ComponentId,
    ) {
        let Some(el) = cx.scene.element_of(moved) else {
            return;
        };
        if cx.scene.document_of(el) != cx.scene.document_of(target_el) {
            // The host renders the component again in the target document
            if let Err(err) = cx.scene.remove(el) {
                log::debug!("cannot drop stale element {el}: {err}");
            }
        } else {
            let end = cx.scene.children(target_el).len();
            if let Err(err) = cx.scene.move_element(el, target_el, end) {
                log::debug!("cannot move element {el}: {err}");
                return;
            }
            cx.scene.sync_children(target_el, cx.tree.children(target));
        }
        cx.canvas.clear_offsets();
    }

    fn dims_from_target(
        &mut self,
        cx: &mut DragContext<'_>,
        hit: Option<ElementId>,
        point: Vec2,
        source: Option<ComponentId>,
    ) -> Vec<Dim> {
        let Some(mut target) = hit else {
            return self.last_dims.clone();
        };

        let selectors = format!("{}, {}", self.config.item_sel, self.config.container_sel);
        if !cx.scene.matches(target, &selectors) {
            match closest_from_parent(cx.scene, target, &self.config.item_sel) {
                Some(item) => target = item,
                None => return Vec::new(),
            }
        }
        if let Some(Predicate::Selectors(allowed)) = source
            .and_then(|id| cx.tree.get(id))
            .map(|component| &component.draggable)
        {
            match cx.scene.closest(target, &allowed.join(", ")) {
                Some(allowed) => target = allowed,
                None => return Vec::new(),
            }
        }

        if self.prev_target != Some(target) {
            self.prev_target = None;
        }

        if self.prev_target.is_none() {
            self.target_parent = closest_from_parent(cx.scene, target, &self.config.container_sel);
            let validation = self.validate_element(cx, target, source);
            let valid = validation.valid;
            cx.emit(DragEvent::Validation(validation));
            if !valid {
                if let Some(parent) = self.target_parent {
                    return self.dims_from_target(cx, Some(parent), point, source);
                }
            }

            let space = self.dim_space(cx);
            self.prev_target = Some(target);
            self.prev_target_dim = measure(cx.scene, cx.canvas, target, space);
            self.cache_dims_parent = self
                .target_parent
                .map(|parent| children_dims(cx.scene, cx.canvas, cx.tree, parent, &self.config, space))
                .unwrap_or_default();
            self.cache_dims = children_dims(cx.scene, cx.canvas, cx.tree, target, &self.config, space);
        }

        let mut dims = self.cache_dims.clone();
        self.target = self.prev_target;
        self.target_dim = self.prev_target_dim;

        let near = self
            .prev_target_dim
            .map(|dim| near_borders(&dim, point, self.config.border_offset))
            .unwrap_or(false);
        if near || (!self.config.nested && self.cache_dims.is_empty()) {
            if let Some(parent) = self.target_parent {
                if self.validate_element(cx, parent, source).valid {
                    dims = self.cache_dims_parent.clone();
                    self.target = Some(parent);
                    self.target_dim = measure(cx.scene, cx.canvas, parent, self.dim_space(cx));
                }
            }
        }

        dims
    }

    fn validate_element(
        &self,
        cx: &DragContext<'_>,
        el: ElementId,
        source: Option<ComponentId>,
    ) -> ValidationResult {
        validate(cx.tree, source, cx.scene.component_of(el), None)
    }

    fn dim_space(&self, cx: &DragContext<'_>) -> DimSpace {
        if self.config.canvas_relative {
            return DimSpace::Canvas;
        }
        let origin = self
            .container
            .and_then(|el| cx.scene.get(el))
            .map(|el| el.rect.origin())
            .unwrap_or(Vec2::ZERO);
        DimSpace::Container {
            origin,
            wmargin: self.config.wmargin,
        }
    }

    /// Pointer position in the space dims are measured in
    fn pointer(&self, cx: &DragContext<'_>, ev: &PointerEvent) -> Option<Vec2> {
        match self.dim_space(cx) {
            DimSpace::Canvas => {
                match cx.canvas.mouse_relative_canvas(cx.scene, ev.document, ev.client) {
                    Ok(point) => Some(point.as_vec2()),
                    Err(err) => {
                        log::debug!("pointer outside the canvas: {err}");
                        None
                    }
                }
            }
            DimSpace::Container { origin, .. } => {
                Some(ev.client + cx.scene.scroll(ev.document) - origin)
            }
        }
    }

    /// The component being dragged: the drop content probe or the first source
    fn source_component(&mut self, cx: &mut DragContext<'_>) -> Option<ComponentId> {
        if let Some(content) = &self.drop_content {
            if self.probe.is_none() {
                self.probe = content.first_def().map(|def| cx.tree.build(&def));
            }
            return self.probe;
        }
        self.sources.first().copied()
    }

    fn select_target_model(&mut self, cx: &mut DragContext<'_>, model: Option<ComponentId>) {
        if self.selected_parent.map(|(id, _)| id) == model {
            return;
        }
        if let Some((id, status)) = self.selected_parent.take() {
            if let Some(component) = cx.tree.get_mut(id) {
                if component.status == Status::SelectedParent {
                    component.status = status;
                }
            }
        }
        if let Some(id) = model {
            if let Some(component) = cx.tree.get_mut(id) {
                self.selected_parent = Some((id, component.status));
                component.status = Status::SelectedParent;
            }
        }
    }

    fn track_document(&mut self, document: Option<DocumentId>) {
        if let Some(document) = document {
            if !self.documents.contains(&document) {
                self.documents.push(document);
            }
        }
    }

    fn discard_probe(&mut self, cx: &mut DragContext<'_>) {
        if let Some(probe) = self.probe.take() {
            if let Err(err) = cx.tree.destroy(probe) {
                log::debug!("probe {probe} already gone: {err}");
            }
        }
    }

    fn finish(&mut self, cx: &mut DragContext<'_>) {
        for (id, status) in self.frozen.drain(..) {
            if let Some(component) = cx.tree.get_mut(id) {
                if component.status == Status::Freezed {
                    component.status = status;
                }
            }
        }
        self.select_target_model(cx, None);
        self.discard_probe(cx);

        cx.canvas.remove_spots(&SpotFilter {
            id: Some(TARGET_SPOT_ID.to_string()),
            ..Default::default()
        });
        cx.canvas.stop_autoscroll();
        cx.flush_spot_events();

        self.state = SorterState::Idle;
        self.placeholder.hide();
        self.source_el = None;
        self.sources.clear();
        self.drop_content = None;
        self.documents.clear();
        self.moved = false;
        self.target = None;
        self.target_dim = None;
        self.target_parent = None;
        self.prev_target = None;
        self.prev_target_dim = None;
        self.cache_dims.clear();
        self.cache_dims_parent.clear();
        self.last_dims.clear();
        self.last_pos = None;
        self.last_placement = None;
        self.spot_target = None;
        self.caret_index = None;
    }
}

/// Nearest strict ancestor of `el` matching `selectors`
fn closest_from_parent(scene: &SceneGraph, el: ElementId, selectors: &str) -> Option<ElementId> {
    scene
        .parent(el)
        .and_then(|parent| scene.closest(parent, selectors))
}
