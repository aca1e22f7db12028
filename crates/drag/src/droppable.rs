//! # Droppable
//!
//! Bridges external drags (blocks, files, text from other applications)
//! into the canvas. While content hovers the canvas a provider follows the
//! pointer: a [`Sorter`] that shows where the content would be inserted, or,
//! in absolute mode, a [`Dragger`] moving a free-floating probe.
//!
//! Enter and leave notifications are counted, since they fire for every
//! nested element the pointer crosses; the session ends when the count goes
//! back to zero or the content is dropped.

use crate::content::{content_by_data, DataTransfer, DragDataResult, DropContent};
use crate::context::DragContext;
use crate::dragger::{ComponentDragHandler, Dragger, DraggerConfig};
use crate::events::DragEvent;
use crate::input::PointerEvent;
use crate::sorter::{
    rejection_reasons, validate, MoveWarning, SortOutcome, SortSource, Sorter, SorterConfig,
};
use canvas::Coord;
use node::{AddOptions, Component, ComponentId, MoveAction};
use serde::{Deserialize, Serialize};
use trowel_core::FramePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DroppableConfig {
    /// Accept drags that don't come with preset content
    pub allow_external_drop: bool,
    /// Drop content at the pointer position instead of sorting it in
    pub absolute_mode: bool,
}

impl Default for DroppableConfig {
    fn default() -> Self {
        Self {
            allow_external_drop: true,
            absolute_mode: false,
        }
    }
}

/// Rewrites the content computed for a drop.
pub type DataHook = dyn FnMut(&DataTransfer, &mut DragDataResult);

const PROBE_SIZE: &str = "50px";

enum Provider {
    Sorter(Box<Sorter>),
    Dragger {
        dragger: Dragger,
        probe: ComponentId,
    },
}

pub struct Droppable {
    config: DroppableConfig,
    sorter_config: SorterConfig,
    dragger_config: DraggerConfig,
    drag_content: Option<DropContent>,
    data_hook: Option<Box<DataHook>>,
    counter: u32,
    over: bool,
    provider: Option<Provider>,
}

impl Droppable {
    pub fn new(config: DroppableConfig) -> Self {
        Self {
            config,
            sorter_config: SorterConfig::default(),
            dragger_config: DraggerConfig::default(),
            drag_content: None,
            data_hook: None,
            counter: 0,
            over: false,
            provider: None,
        }
    }

    /// Base config of the sorter used for drops
    pub fn with_sorter_config(mut self, config: SorterConfig) -> Self {
        self.sorter_config = config;
        self
    }

    pub fn with_dragger_config(mut self, config: DraggerConfig) -> Self {
        self.dragger_config = config;
        self
    }

    pub fn with_data_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&DataTransfer, &mut DragDataResult) + 'static,
    {
        self.data_hook = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &DroppableConfig {
        &self.config
    }

    /// Content of the drag started by the host, e.g. a block
    pub fn set_drag_content(&mut self, content: Option<DropContent>) {
        self.drag_content = content;
    }

    pub fn drag_content(&self) -> Option<&DropContent> {
        self.drag_content.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// The sorter following the pointer, when not in absolute mode
    pub fn sorter(&self) -> Option<&Sorter> {
        match &self.provider {
            Some(Provider::Sorter(sorter)) => Some(sorter.as_ref()),
            _ => None,
        }
    }

    /// The floating probe of an absolute mode drag
    pub fn probe(&self) -> Option<ComponentId> {
        match &self.provider {
            Some(Provider::Dragger { probe, .. }) => Some(*probe),
            _ => None,
        }
    }

    pub fn drag_enter(&mut self, cx: &mut DragContext<'_>, ev: &PointerEvent) {
        if self.drag_content.is_none() && !self.config.allow_external_drop {
            return;
        }
        self.counter += 1;
        if self.over {
            return;
        }
        self.over = true;

        let provider = if self.config.absolute_mode {
            self.start_absolute(cx, ev)
        } else {
            self.start_sorter(cx)
        };
        self.provider = Some(provider);
        log::debug!("external drag entered the canvas");
        cx.emit(DragEvent::CanvasDragEnter);
    }

    pub fn drag_over(&mut self, cx: &mut DragContext<'_>, ev: &PointerEvent) {
        if !self.over {
            return;
        }
        match &mut self.provider {
            Some(Provider::Sorter(sorter)) => sorter.on_move(cx, ev),
            Some(Provider::Dragger { dragger, .. }) => dragger.drag(cx, ev),
            None => {}
        }
        cx.emit(DragEvent::CanvasDragOver);
    }

    pub fn drag_leave(&mut self, cx: &mut DragContext<'_>) -> Option<SortOutcome> {
        if !self.over {
            return None;
        }
        self.counter = self.counter.saturating_sub(1);
        (self.counter == 0).then(|| self.end_drop(cx, None))
    }

    /// Drops the content described by `transfer`, or the preset drag content.
    pub fn drop(
        &mut self,
        cx: &mut DragContext<'_>,
        transfer: Option<&DataTransfer>,
    ) -> Option<SortOutcome> {
        if !self.over {
            return None;
        }
        let mut result = content_by_data(transfer, self.drag_content.as_ref());
        if let (Some(hook), Some(transfer)) = (self.data_hook.as_mut(), transfer) {
            hook(transfer, &mut result);
        }
        let content = result.content.filter(|content| !content.is_empty());
        Some(self.end_drop(cx, content))
    }

    /// Pointer-driven fallback for canvases that don't receive native drag
    /// events
    pub fn pointer_enter(&mut self, cx: &mut DragContext<'_>, ev: &PointerEvent) {
        self.drag_enter(cx, ev);
    }

    pub fn pointer_move(&mut self, cx: &mut DragContext<'_>, ev: &PointerEvent) {
        if !self.over {
            self.drag_enter(cx, ev);
        }
        self.drag_over(cx, ev);
    }

    pub fn pointer_up(&mut self, cx: &mut DragContext<'_>) -> Option<SortOutcome> {
        self.drop(cx, None)
    }

    /// Ends the session, inserting `content` unless it is `None`.
    pub fn end_drop(
        &mut self,
        cx: &mut DragContext<'_>,
        content: Option<DropContent>,
    ) -> SortOutcome {
        let cancelled = content.is_none();
        let moved = match self.provider.take() {
            Some(Provider::Sorter(mut sorter)) => {
                let outcome = match content {
                    Some(content) => {
                        sorter.set_drop_content(cx, Some(content));
                        sorter.end_move(cx)
                    }
                    None => sorter.cancel(cx),
                };
                outcome.moved
            }
            Some(Provider::Dragger { mut dragger, probe }) => {
                dragger.stop(cx, cancelled);
                let placed = content.and_then(|content| place_absolute(cx, probe, &content));
                if let Err(err) = cx.tree.destroy(probe) {
                    log::debug!("drop probe already gone: {err}");
                }
                placed.into_iter().collect()
            }
            None => Vec::new(),
        };

        self.counter = 0;
        self.over = false;
        for component in &moved {
            cx.emit(DragEvent::CanvasDrop {
                component: *component,
            });
        }
        let outcome = SortOutcome {
            cancelled: moved.is_empty(),
            moved,
        };
        log::debug!("external drag ended, cancelled: {}", outcome.cancelled);
        cx.emit(DragEvent::CanvasDragEnd {
            cancelled: outcome.cancelled,
        });
        outcome
    }

    fn start_sorter(&self, cx: &mut DragContext<'_>) -> Provider {
        let config = SorterConfig {
            canvas_relative: true,
            nested: true,
            wmargin: true,
            ..self.sorter_config.clone()
        };
        let mut sorter = Sorter::new(config).with_custom_target(element_under_pointer);
        let content = self
            .drag_content
            .clone()
            .unwrap_or_else(|| DropContent::Html("<br>".to_string()));
        sorter.start_sort(cx, SortSource::Content(content));
        Provider::Sorter(Box::new(sorter))
    }

    fn start_absolute(&self, cx: &mut DragContext<'_>, ev: &PointerEvent) -> Provider {
        let wrapper = cx.tree.root();
        let probe = cx.tree.create(
            Component::default()
                .with_style("position", "absolute")
                .with_style("width", PROBE_SIZE)
                .with_style("height", PROBE_SIZE),
        );
        let start = match cx.canvas.mouse_relative_canvas(cx.scene, ev.document, ev.client) {
            Ok(point) => point.as_vec2() / cx.canvas.zoom_decimal(),
            Err(err) => {
                log::debug!("pointer outside the canvas: {err}");
                ev.client
            }
        };
        if let Some(component) = cx.tree.get_mut(probe) {
            component.set_style("left", format!("{}px", start.x));
            component.set_style("top", format!("{}px", start.y));
        }

        let handler = ComponentDragHandler::new(probe).within(wrapper);
        let mut dragger = Dragger::new(self.dragger_config, handler);
        dragger.start(cx, ev);
        Provider::Dragger { dragger, probe }
    }
}

/// Element under the pointer in whichever document is below it
fn element_under_pointer(
    cx: &DragContext<'_>,
    ev: &PointerEvent,
) -> Option<scene_graph::ElementId> {
    let coord = Coord::Frame {
        document: ev.document,
        point: FramePoint(ev.client),
    };
    let document = cx.canvas.document_at(cx.scene, coord).ok()?;
    let point = cx.canvas.to_frame(cx.scene, coord, document).ok()?;
    cx.scene.element_from_point(document, point.as_vec2())
}

/// Realizes `content` at the probe's position inside the wrapper
fn place_absolute(
    cx: &mut DragContext<'_>,
    probe: ComponentId,
    content: &DropContent,
) -> Option<ComponentId> {
    let def = content.first_def()?;
    let wrapper = cx.tree.root();
    let id = cx.tree.build(&def);

    let validation = validate(cx.tree, Some(id), Some(wrapper), None);
    if !validation.valid {
        let warning = MoveWarning {
            errors: rejection_reasons(&validation, cx.tree),
            source: Some(id),
            target: Some(wrapper),
            context: "droppable",
        };
        cx.warn("Invalid target position", warning);
        let _ = cx.tree.destroy(id);
        return None;
    }

    let position: Vec<(String, String)> = cx
        .tree
        .get(probe)
        .map(|probe| {
            ["position", "left", "top"]
                .iter()
                .filter_map(|key| Some((key.to_string(), probe.style_value(key)?.to_string())))
                .collect()
        })
        .unwrap_or_default();
    if let Some(component) = cx.tree.get_mut(id) {
        component.style.extend(position);
    }

    let options = AddOptions::default().with_action(MoveAction::AddComponent);
    match cx.tree.add(wrapper, id, options) {
        Ok(index) => {
            log::debug!("dropped component {id} at index {index} of the wrapper");
            Some(id)
        }
        Err(err) => {
            log::error!("cannot add dropped component: {err}");
            let _ = cx.tree.destroy(id);
            None
        }
    }
}
