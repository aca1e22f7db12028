use crate::events::{DragEvent, EventSink};
use crate::sorter::{MoveWarning, WarningLog};
use canvas::Canvas;
use node::ComponentTree;
use scene_graph::SceneGraph;

/// Everything a drag session reads or mutates, borrowed for one step.
pub struct DragContext<'a> {
    pub tree: &'a mut ComponentTree,
    pub scene: &'a mut SceneGraph,
    pub canvas: &'a mut Canvas,
    pub warnings: &'a mut dyn WarningLog,
    pub events: &'a mut dyn EventSink,
}

impl<'a> DragContext<'a> {
    pub fn new(
        tree: &'a mut ComponentTree,
        scene: &'a mut SceneGraph,
        canvas: &'a mut Canvas,
        warnings: &'a mut dyn WarningLog,
        events: &'a mut dyn EventSink,
    ) -> Self {
        Self {
            tree,
            scene,
            canvas,
            warnings,
            events,
        }
    }

    pub fn emit(&mut self, event: DragEvent) {
        self.events.emit(event);
    }

    pub fn warn(&mut self, message: &str, warning: MoveWarning) {
        self.warnings.log_warning(message, &warning);
    }

    /// Forwards pending spot notifications of the canvas as drag events
    pub fn flush_spot_events(&mut self) {
        for event in self.canvas.take_spot_events() {
            self.events.emit(event.into());
        }
    }
}
