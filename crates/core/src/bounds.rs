//! Axis-aligned boxes.
//!
//! Every rect the engine reasons about (element boxes, dims, placeholder,
//! spots, resize handles) is an axis-aligned box. Browsers report boxes as
//! `top/left/width/height`, so the constructors and accessors speak both
//! languages.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A box between its top-left (`min`) and bottom-right (`max`) corners
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Creates bounds from a DOM-style rect
    pub fn from_rect(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self::from_origin_size(Vec2::new(left, top), Vec2::new(width, height))
    }

    /// A box of `size` centered on `center`, as resize handles are laid out
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn zero() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::ZERO,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.min
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// No area: collapsed elements and unmeasured boxes
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Edges are inclusive.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Scales origin and size by a factor, as a CSS `scale()` anchored at (0,0) would
    pub fn scale(&self, factor: f32) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    /// Returns a copy with a different size, keeping the origin
    pub fn with_size(&self, size: Vec2) -> Self {
        Self::from_origin_size(self.min, size)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_creation() {
        let bounds = Bounds::from_origin_size(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));
        assert_eq!(bounds.min, Vec2::new(10.0, 20.0));
        assert_eq!(bounds.max, Vec2::new(110.0, 70.0));
        assert_eq!(bounds.size(), Vec2::new(100.0, 50.0));
        assert_eq!(bounds.center(), Vec2::new(60.0, 45.0));
    }

    #[test]
    fn test_bounds_from_rect() {
        let bounds = Bounds::from_rect(20.0, 10.0, 100.0, 50.0);
        assert_eq!(bounds.top(), 20.0);
        assert_eq!(bounds.left(), 10.0);
        assert_eq!(bounds.right(), 110.0);
        assert_eq!(bounds.bottom(), 70.0);
        assert_eq!(bounds.width(), 100.0);
        assert_eq!(bounds.height(), 50.0);
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::from_origin_size(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));

        assert!(bounds.contains_point(Vec2::new(50.0, 40.0)));
        assert!(bounds.contains_point(Vec2::new(10.0, 20.0)));
        assert!(bounds.contains_point(Vec2::new(110.0, 70.0)));
        assert!(!bounds.contains_point(Vec2::new(5.0, 40.0)));
        assert!(!bounds.contains_point(Vec2::new(120.0, 40.0)));
    }

    #[test]
    fn test_bounds_scale_and_translate() {
        let bounds = Bounds::from_rect(10.0, 20.0, 100.0, 50.0);

        let scaled = bounds.scale(2.0);
        assert_eq!(scaled.origin(), Vec2::new(40.0, 20.0));
        assert_eq!(scaled.size(), Vec2::new(200.0, 100.0));

        let moved = bounds.translate(Vec2::new(5.0, -5.0));
        assert_eq!(moved.origin(), Vec2::new(25.0, 5.0));
        assert_eq!(moved.size(), bounds.size());
    }
}
