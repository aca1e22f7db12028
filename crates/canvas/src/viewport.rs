use glam::Vec2;
use serde::{Deserialize, Serialize};
use trowel_core::{CanvasPoint, WorldPoint};

/// Lowest zoom accepted, in percent
pub const MIN_ZOOM: f32 = 1.0;

/// Zoom and pan state of the canvas.
///
/// `zoom` is a percentage. `coords` is the pan offset of the world origin
/// relative to the canvas element, and `size` is the size of the canvas
/// element itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub zoom: f32,
    pub coords: Vec2,
    pub size: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 100.0,
            coords: Vec2::ZERO,
            size: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Sets the zoom percentage, clamped to [`MIN_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = if zoom.is_nan() || zoom < MIN_ZOOM {
            MIN_ZOOM
        } else {
            zoom
        };
    }

    /// Zoom as a factor, `1.0` being 100%
    pub fn zoom_decimal(&self) -> f32 {
        self.zoom / 100.0
    }

    /// Inverse of [`Viewport::zoom_decimal`]
    pub fn zoom_multiplier(&self) -> f32 {
        1.0 / self.zoom_decimal()
    }

    /// Half of the space the canvas area gains or loses visually when
    /// zoomed, relative to its fixed element box.
    pub fn viewport_delta(&self) -> Vec2 {
        self.size * (1.0 - self.zoom_decimal()) / 2.0
    }

    /// Pans by `delta` canvas pixels
    pub fn pan(&mut self, delta: Vec2) {
        self.coords += delta;
    }

    pub fn canvas_to_world(&self, point: CanvasPoint) -> WorldPoint {
        WorldPoint(
            (point.as_vec2() - self.coords - self.viewport_delta()) * self.zoom_multiplier(),
        )
    }

    pub fn world_to_canvas(&self, point: WorldPoint) -> CanvasPoint {
        CanvasPoint(point.as_vec2() * self.zoom_decimal() + self.coords + self.viewport_delta())
    }

    pub fn reset(&mut self) {
        self.zoom = 100.0;
        self.coords = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::new(Vec2::new(1000.0, 800.0));
        viewport.set_zoom(0.2);
        assert_eq!(viewport.zoom, MIN_ZOOM);
        viewport.set_zoom(-50.0);
        assert_eq!(viewport.zoom, MIN_ZOOM);
        viewport.set_zoom(250.0);
        assert_eq!(viewport.zoom_decimal(), 2.5);
        assert_eq!(viewport.zoom_multiplier(), 0.4);
    }

    #[test]
    fn test_viewport_delta() {
        let mut viewport = Viewport::new(Vec2::new(1000.0, 800.0));
        viewport.set_zoom(50.0);
        assert_eq!(viewport.viewport_delta(), Vec2::new(250.0, 200.0));
        viewport.set_zoom(200.0);
        assert_eq!(viewport.viewport_delta(), Vec2::new(-500.0, -400.0));
    }

    #[test]
    fn test_world_round_trip() {
        let mut viewport = Viewport::new(Vec2::new(1280.0, 720.0));
        let points = [
            CanvasPoint::new(0.0, 0.0),
            CanvasPoint::new(640.0, 360.0),
            CanvasPoint::new(-35.5, 1999.25),
        ];
        for zoom in [1.0, 3.0, 33.0, 100.0, 150.0, 377.0, 500.0] {
            for pan in [Vec2::ZERO, Vec2::new(120.0, -80.0), Vec2::new(-4000.0, 2500.5)] {
                viewport.set_zoom(zoom);
                viewport.coords = pan;
                for point in points {
                    let back = viewport.world_to_canvas(viewport.canvas_to_world(point));
                    let tolerance = 1e-3 * (1.0 + point.as_vec2().abs().max_element() + pan.abs().max_element());
                    assert!(
                        (back.as_vec2() - point.as_vec2()).abs().max_element() <= tolerance,
                        "zoom {zoom} pan {pan:?}: {point:?} came back as {back:?}"
                    );
                }
            }
        }
    }
}
