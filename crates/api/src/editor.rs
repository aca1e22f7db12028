//! The editor facade: one tree, its rendered scene, the canvas and the
//! drag engines wired together the way a host page builder wires them.

use crate::{ApiError, EditorConfig, Target};
use canvas::{Canvas, FrameId};
use drag::{
    DragContext, DragEvent, Dragger, Droppable, RecordedWarnings, Resizer, Sorter,
};
use node::{ComponentId, ComponentTree};
use scene_graph::{DocumentId, ElementId, SceneGraph};

/// Model and view state every engine operates on.
pub struct EditorState {
    pub tree: ComponentTree,
    pub scene: SceneGraph,
    pub canvas: Canvas,
    pub warnings: RecordedWarnings,
    pub events: Vec<DragEvent>,
}

impl EditorState {
    pub fn cx(&mut self) -> DragContext<'_> {
        DragContext::new(
            &mut self.tree,
            &mut self.scene,
            &mut self.canvas,
            &mut self.warnings,
            &mut self.events,
        )
    }
}

pub struct Editor {
    config: EditorConfig,
    /// Document the component tree is rendered in
    document: DocumentId,
    pub(crate) state: EditorState,
    pub(crate) sorter: Sorter,
    pub(crate) resizer: Resizer,
    pub(crate) dragger: Option<Dragger>,
    pub(crate) droppable: Droppable,
}

impl Editor {
    pub fn new(
        tree: ComponentTree,
        scene: SceneGraph,
        canvas: Canvas,
        document: DocumentId,
        config: EditorConfig,
    ) -> Self {
        let sorter = Sorter::new(config.sorter.clone());
        let resizer = Resizer::new(config.resizer.clone());
        let droppable = Droppable::new(config.droppable)
            .with_sorter_config(config.sorter.clone())
            .with_dragger_config(config.dragger);

        Self {
            config,
            document,
            state: EditorState {
                tree,
                scene,
                canvas,
                warnings: RecordedWarnings::default(),
                events: Vec::new(),
            },
            sorter,
            resizer,
            dragger: None,
            droppable,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.state.tree
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.state.scene
    }

    pub fn canvas(&self) -> &Canvas {
        &self.state.canvas
    }

    pub fn sorter(&self) -> &Sorter {
        &self.sorter
    }

    pub fn resizer(&self) -> &Resizer {
        &self.resizer
    }

    pub fn dragger(&self) -> Option<&Dragger> {
        self.dragger.as_ref()
    }

    pub fn droppable(&self) -> &Droppable {
        &self.droppable
    }

    pub fn droppable_mut(&mut self) -> &mut Droppable {
        &mut self.droppable
    }

    pub fn warnings(&self) -> &RecordedWarnings {
        &self.state.warnings
    }

    pub fn events(&self) -> &[DragEvent] {
        &self.state.events
    }

    pub fn take_events(&mut self) -> Vec<DragEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    /// Whether any engine has a session running
    pub fn is_busy(&self) -> bool {
        self.sorter.is_dragging()
            || self.resizer.is_resizing()
            || self.dragger.as_ref().is_some_and(Dragger::is_dragging)
            || self.droppable.is_over()
    }

    // Lookups

    pub fn component(&self, name: &str) -> Result<ComponentId, ApiError> {
        self.state
            .tree
            .find_by_name(name)
            .ok_or_else(|| ApiError::UnknownComponent(name.to_string()))
    }

    pub fn components(&self, target: &Target) -> Result<Vec<ComponentId>, ApiError> {
        match target {
            Target::Root => Ok(vec![self.state.tree.root()]),
            Target::Component(name) => Ok(vec![self.component(name)?]),
            Target::Components(names) => names.iter().map(|name| self.component(name)).collect(),
        }
    }

    pub fn element(&self, name: &str) -> Result<ElementId, ApiError> {
        let component = self.component(name)?;
        self.state
            .scene
            .element_of(component)
            .ok_or_else(|| ApiError::NotRendered(name.to_string()))
    }

    pub fn frame(&self, name: &str) -> Result<FrameId, ApiError> {
        self.state
            .canvas
            .frame_by_name(name)
            .ok_or_else(|| ApiError::UnknownFrame(name.to_string()))
    }

    /// Document of `frame`, or the content document
    pub fn frame_document(&self, frame: Option<&str>) -> Result<DocumentId, ApiError> {
        let Some(name) = frame else {
            return Ok(self.document);
        };
        let id = self.frame(name)?;
        self.state
            .canvas
            .frame(id)
            .map(|frame| frame.document)
            .ok_or_else(|| ApiError::UnknownFrame(name.to_string()))
    }

    /// Name of a component for reports, falling back to its kind
    pub fn label(&self, id: ComponentId) -> String {
        self.state
            .tree
            .get(id)
            .map(|component| component.label().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}
