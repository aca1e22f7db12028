//! Command and query execution against an [`Editor`].
//!
//! Commands are routed to the running session the way host event listeners
//! would route them: the resizer first, then the free dragger, the sorter
//! and finally an external drop.

use crate::{
    ApiError, Command, CommandResult, DragSubject, Editor, Pointer, Query, QueryResult, TreeNode,
    WarningInfo,
};
use canvas::{ElementPosOptions, SpotFilter, SpotType};
use drag::{
    ComponentDragHandler, ComponentResizeTarget, Dragger, FrameDragHandler, Key, KeyEvent,
    PointerEvent, SortOutcome, SortSource,
};
use node::{ComponentId, TreeChange, UndoGroup};

impl Editor {
    /// Executes one command.
    pub fn execute(&mut self, command: Command) -> CommandResult {
        log::trace!("executing {command:?}");
        match self.execute_inner(command) {
            Ok(result) => result,
            Err(err) => {
                log::warn!("command failed: {err}");
                CommandResult::error(err.to_string())
            }
        }
    }

    /// Executes commands in order, collecting their results.
    pub fn execute_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Vec<CommandResult> {
        commands
            .into_iter()
            .map(|command| self.execute(command))
            .collect()
    }

    fn execute_inner(&mut self, command: Command) -> Result<CommandResult, ApiError> {
        let outcome = match command {
            Command::StartSort { target } => {
                let components = self.components(&target)?;
                let source = match components.as_slice() {
                    [single] => match self.state.scene.element_of(*single) {
                        Some(el) => SortSource::Element(el),
                        None => SortSource::Components(components),
                    },
                    _ => SortSource::Components(components),
                };
                self.sorter.start_sort(&mut self.state.cx(), source);
                None
            }

            Command::StartSortContent { content } => {
                self.sorter
                    .start_sort(&mut self.state.cx(), SortSource::Content(content));
                None
            }

            Command::PointerMove(pointer) => {
                let ev = self.pointer_event(&pointer)?;
                let infinite = self.config().canvas.infinite_canvas;
                let mut cx = self.state.cx();
                if self.resizer.is_resizing() {
                    self.resizer.on_move(&mut cx, &ev);
                } else if let Some(dragger) = self.dragger.as_mut().filter(|d| d.is_dragging()) {
                    dragger.drag(&mut cx, &ev);
                } else if self.sorter.is_dragging() {
                    self.sorter.on_move(&mut cx, &ev);
                } else if self.droppable.is_over() {
                    if infinite {
                        self.droppable.pointer_move(&mut cx, &ev);
                    } else {
                        self.droppable.drag_over(&mut cx, &ev);
                    }
                }
                None
            }

            Command::PointerUp(pointer) => {
                let ev = self.pointer_event(&pointer)?;
                let mut cx = self.state.cx();
                if self.resizer.is_resizing() {
                    self.resizer.on_pointer_up(&mut cx, &ev);
                    None
                } else if self.dragger.as_ref().is_some_and(Dragger::is_dragging) {
                    if let Some(mut dragger) = self.dragger.take() {
                        dragger.drag(&mut cx, &ev);
                        dragger.stop(&mut cx, false);
                    }
                    None
                } else if self.sorter.is_dragging() {
                    self.sorter.on_pointer_up(&mut cx, &ev)
                } else if self.droppable.is_over() {
                    self.droppable.pointer_up(&mut cx)
                } else {
                    None
                }
            }

            Command::KeyDown { key, modifiers } => {
                let ev = KeyEvent {
                    document: self.state.canvas.document(),
                    key,
                    modifiers,
                };
                let mut cx = self.state.cx();
                if self.resizer.on_key(&mut cx, &ev) {
                    return Ok(CommandResult::ended(vec![], true));
                }
                if let Some(dragger) = self.dragger.as_mut() {
                    if dragger.on_key(&mut cx, &ev) {
                        self.dragger = None;
                        return Ok(CommandResult::ended(vec![], true));
                    }
                }
                if self.sorter.is_dragging() {
                    self.sorter.on_key(&mut cx, &ev)
                } else if self.droppable.is_over() && key == Key::Escape {
                    Some(self.droppable.end_drop(&mut cx, None))
                } else {
                    None
                }
            }

            Command::Scroll { frame, scroll } => {
                let document = self.frame_document(frame.as_deref())?;
                let state = &mut self.state;
                state
                    .canvas
                    .scroll_document(&mut state.scene, document, scroll)?;
                self.after_viewport_change();
                None
            }

            Command::ScrollCanvas { scroll } => {
                self.state.canvas.set_scroll(scroll);
                self.after_viewport_change();
                None
            }

            Command::SetZoom { zoom } => {
                self.state.canvas.set_zoom(zoom);
                self.after_viewport_change();
                None
            }

            Command::SetCoords { coords } => {
                self.state.canvas.set_coords(coords);
                self.after_viewport_change();
                None
            }

            Command::Tick => {
                let state = &mut self.state;
                let tick = state.canvas.autoscroll_frame(&mut state.scene)?;
                if tick.scrolled_by != 0.0 {
                    log::trace!("autoscrolled by {}", tick.scrolled_by);
                    state.cx().flush_spot_events();
                }
                None
            }

            Command::StartResize {
                target,
                handle,
                pointer,
            } => {
                let component = self.component(&target)?;
                let resizable = self
                    .state
                    .tree
                    .get(component)
                    .is_some_and(|c| c.flags.resizable);
                if !resizable {
                    return Err(ApiError::NotResizable(target));
                }
                let el = self.element(&target)?;
                let rect = self.state.canvas.element_pos(
                    &self.state.scene,
                    el,
                    ElementPosOptions::default(),
                )?;
                let ev = self.pointer_event(&pointer)?;
                self.resizer.focus(rect);
                let started = self.resizer.start(
                    &mut self.state.cx(),
                    handle,
                    ComponentResizeTarget::new(component),
                    &ev,
                );
                if !started {
                    return Err(ApiError::NotResizable(target));
                }
                None
            }

            Command::StartDrag { subject, pointer } => {
                let ev = self.pointer_event(&pointer)?;
                let config = self.config().dragger;
                let mut dragger = match subject {
                    DragSubject::Frame(name) => {
                        Dragger::new(config, FrameDragHandler::new(self.frame(&name)?))
                    }
                    DragSubject::Component(name) => {
                        Dragger::new(config, ComponentDragHandler::new(self.component(&name)?))
                    }
                };
                let mut cx = self.state.cx();
                if let Some(mut previous) = self.dragger.take() {
                    if previous.is_dragging() {
                        previous.stop(&mut cx, true);
                    }
                }
                dragger.start(&mut cx, &ev);
                self.dragger = Some(dragger);
                None
            }

            Command::SetDragContent { content } => {
                self.droppable.set_drag_content(content);
                None
            }

            Command::DragEnter(pointer) => {
                let ev = self.pointer_event(&pointer)?;
                let infinite = self.config().canvas.infinite_canvas;
                let mut cx = self.state.cx();
                if infinite {
                    self.droppable.pointer_enter(&mut cx, &ev);
                } else {
                    self.droppable.drag_enter(&mut cx, &ev);
                }
                None
            }

            Command::DragOver(pointer) => {
                let ev = self.pointer_event(&pointer)?;
                self.droppable.drag_over(&mut self.state.cx(), &ev);
                None
            }

            Command::DragLeave => self.droppable.drag_leave(&mut self.state.cx()),

            Command::Drop { pointer, data } => {
                let ev = self.pointer_event(&pointer)?;
                let mut cx = self.state.cx();
                self.droppable.drag_over(&mut cx, &ev);
                self.droppable.drop(&mut cx, data.as_ref())
            }

            Command::Undo => {
                match self.state.tree.undo() {
                    Some(group) => self.sync_undo(&group),
                    None => log::debug!("nothing to undo"),
                }
                None
            }
        };

        Ok(match outcome {
            Some(outcome) => self.outcome_result(outcome),
            None => CommandResult::success(),
        })
    }

    fn pointer_event(&self, pointer: &Pointer) -> Result<PointerEvent, ApiError> {
        let document = if pointer.canvas {
            self.state.canvas.document()
        } else {
            self.frame_document(pointer.frame.as_deref())?
        };
        let target = match &pointer.over {
            Some(name) => Some(self.element(name)?),
            None => self.state.scene.element_from_point(document, pointer.at),
        };
        let mut ev = PointerEvent::new(document, pointer.at).with_modifiers(pointer.modifiers);
        ev.target = target;
        Ok(ev)
    }

    fn outcome_result(&self, outcome: SortOutcome) -> CommandResult {
        let moved = outcome.moved.iter().map(|id| self.label(*id)).collect();
        CommandResult::ended(moved, outcome.cancelled)
    }

    fn after_viewport_change(&mut self) {
        let mut cx = self.state.cx();
        if let Some(dragger) = self.dragger.as_mut().filter(|d| d.is_dragging()) {
            dragger.on_scroll(&mut cx);
        }
        cx.canvas.refresh_spots(cx.scene);
        cx.flush_spot_events();
    }

    /// Puts rendered elements back where an undone group left their
    /// components.
    fn sync_undo(&mut self, group: &UndoGroup) {
        let state = &mut self.state;
        for change in &group.changes {
            match *change {
                TreeChange::Removed { id, parent, .. } => {
                    let (Some(el), Some(parent_el)) =
                        (state.scene.element_of(id), state.scene.element_of(parent))
                    else {
                        continue;
                    };
                    if state.scene.parent(el) != Some(parent_el) {
                        let end = state.scene.children(parent_el).len();
                        if let Err(err) = state.scene.move_element(el, parent_el, end) {
                            log::debug!("cannot restore element {el}: {err}");
                            continue;
                        }
                    }
                    state
                        .scene
                        .sync_children(parent_el, state.tree.children(parent));
                }
                TreeChange::Added { id, .. } => {
                    if state.tree.is_attached(id) {
                        continue;
                    }
                    if let Some(el) = state.scene.element_of(id) {
                        if let Err(err) = state.scene.remove(el) {
                            log::debug!("cannot drop element {el}: {err}");
                        }
                    }
                }
            }
        }
        state.canvas.clear_offsets();
    }

    /// Answers a query.
    pub fn query(&self, query: Query) -> QueryResult {
        match self.query_inner(query) {
            Ok(result) => result,
            Err(err) => QueryResult::error(err.to_string()),
        }
    }

    fn query_inner(&self, query: Query) -> Result<QueryResult, ApiError> {
        Ok(match query {
            Query::Children { target } => {
                let mut names = Vec::new();
                for parent in self.components(&target)? {
                    names.extend(
                        self.state
                            .tree
                            .children(parent)
                            .iter()
                            .map(|id| self.label(*id)),
                    );
                }
                QueryResult::Names { names }
            }

            Query::Tree => QueryResult::Tree {
                root: self.tree_node(self.state.tree.root()),
            },

            Query::Placeholder => {
                let sorter = if self.sorter.is_dragging() {
                    &self.sorter
                } else {
                    self.droppable.sorter().unwrap_or(&self.sorter)
                };
                QueryResult::Placeholder {
                    placeholder: *sorter.placeholder(),
                    target: sorter
                        .target()
                        .and_then(|el| self.state.scene.component_of(el))
                        .map(|id| self.label(id)),
                    pos: sorter.last_pos(),
                }
            }

            Query::Spots { spot_type } => {
                let filter = spot_type
                    .map(|spot_type| SpotFilter::of_type(SpotType::from(spot_type)))
                    .unwrap_or_default();
                QueryResult::Spots {
                    spots: self
                        .state
                        .canvas
                        .spots(&filter)
                        .into_iter()
                        .cloned()
                        .collect(),
                }
            }

            Query::Events => QueryResult::Events {
                events: self.state.events.clone(),
            },

            Query::Warnings => QueryResult::Warnings {
                warnings: self
                    .state
                    .warnings
                    .entries
                    .iter()
                    .map(|(message, warning)| WarningInfo {
                        message: message.clone(),
                        errors: warning.errors.clone(),
                        context: warning.context,
                    })
                    .collect(),
            },

            Query::Style { target } => {
                let id = self.component(&target)?;
                QueryResult::Style {
                    style: self
                        .state
                        .tree
                        .get(id)
                        .map(|component| component.style.clone())
                        .unwrap_or_default(),
                }
            }

            Query::Frame { name } => {
                let id = self.frame(&name)?;
                let frame = self
                    .state
                    .canvas
                    .frame(id)
                    .ok_or(ApiError::UnknownFrame(name))?;
                QueryResult::Frame {
                    position: frame.position.as_vec2(),
                    size: frame.size(),
                }
            }

            Query::Viewport => QueryResult::Viewport {
                zoom: self.state.canvas.zoom(),
                coords: self.state.canvas.coords(),
            },
        })
    }

    /// Serializable outline of the subtree at `id`
    pub fn tree_node(&self, id: ComponentId) -> TreeNode {
        let tree = &self.state.tree;
        TreeNode {
            name: self.label(id),
            kind: tree
                .get(id)
                .map(|component| component.kind.clone())
                .unwrap_or_default(),
            children: tree
                .children(id)
                .iter()
                .map(|child| self.tree_node(*child))
                .collect(),
        }
    }
}
