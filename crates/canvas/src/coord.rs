//! Tagged coordinates.
//!
//! Call sites hand the canvas a [`Coord`] saying which space a point is in,
//! and ask for the space they need.

use crate::{Canvas, CanvasError};
use scene_graph::{DocumentId, SceneGraph};
use serde::{Deserialize, Serialize};
use trowel_core::{CanvasPoint, FramePoint, ScreenPoint, WorldPoint};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "space", content = "at", rename_all = "snake_case")]
pub enum Coord {
    Screen(ScreenPoint),
    Canvas(CanvasPoint),
    /// Client position inside the viewport of a rendered document
    Frame {
        document: DocumentId,
        point: FramePoint,
    },
    World(WorldPoint),
}

impl Canvas {
    pub fn to_canvas(&self, scene: &SceneGraph, coord: Coord) -> Result<CanvasPoint, CanvasError> {
        Ok(match coord {
            Coord::Canvas(point) => point,
            Coord::Screen(point) => {
                let canvas = self.canvas_offset(scene)?;
                CanvasPoint(point.as_vec2() - canvas.origin() + self.scroll())
            }
            Coord::Frame { document, point } => {
                self.mouse_relative_canvas(scene, document, point.as_vec2())?
            }
            Coord::World(point) => self.viewport().world_to_canvas(point),
        })
    }

    pub fn to_screen(&self, scene: &SceneGraph, coord: Coord) -> Result<ScreenPoint, CanvasError> {
        if let Coord::Screen(point) = coord {
            return Ok(point);
        }
        let point = self.to_canvas(scene, coord)?;
        let canvas = self.canvas_offset(scene)?;
        Ok(ScreenPoint(point.as_vec2() + canvas.origin() - self.scroll()))
    }

    pub fn to_world(&self, scene: &SceneGraph, coord: Coord) -> Result<WorldPoint, CanvasError> {
        if let Coord::World(point) = coord {
            return Ok(point);
        }
        let point = self.to_canvas(scene, coord)?;
        Ok(self.viewport().canvas_to_world(point))
    }

    /// Client position inside `document`'s viewport
    pub fn to_frame(
        &self,
        scene: &SceneGraph,
        coord: Coord,
        document: DocumentId,
    ) -> Result<FramePoint, CanvasError> {
        if let Coord::Frame {
            document: source,
            point,
        } = coord
        {
            if source == document {
                return Ok(point);
            }
        }
        let screen = self.to_screen(scene, coord)?;
        self.frame_point(scene, document, screen)
    }

    /// Which document viewport contains `coord`: the topmost frame under the
    /// point, or the editor document.
    pub fn document_at(&self, scene: &SceneGraph, coord: Coord) -> Result<DocumentId, CanvasError> {
        let screen = self.to_screen(scene, coord)?;
        Ok(self
            .frame_at(scene, screen)
            .and_then(|frame| self.frame(frame))
            .map(|frame| frame.document)
            .unwrap_or(self.document()))
    }
}
