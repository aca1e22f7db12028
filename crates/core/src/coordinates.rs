//! # Coordinate System Types
//!
//! Type-safe coordinate representations for the coordinate spaces the
//! drag engine moves between. Using a distinct type per space prevents a
//! frame-local value from being compared against a canvas-relative one.
//!
//! ## Coordinate Spaces
//!
//! - **Screen**: page coordinates of the editor document (what pointer
//!   events carry when they originate outside any frame)
//! - **Canvas**: relative to the canvas element's top-left, after zoom and
//!   pan; all Sorter dims and placeholder positions live here
//! - **Frame**: inside one frame's document viewport, before zoom
//! - **World**: zoom-independent logical space where frames are positioned

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Position in screen (editor page) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint(pub Vec2);

/// Position relative to the canvas element, after zoom and pan.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint(pub Vec2);

/// Position inside a frame document viewport, before zoom.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FramePoint(pub Vec2);

/// Position in the zoom-independent world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint(pub Vec2);

/// Movement/offset (not a position). Subtracting two points of the same
/// space gives a delta.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Delta(pub Vec2);

macro_rules! impl_point {
    ($name:ident) => {
        impl $name {
            pub fn new(x: f32, y: f32) -> Self {
                Self(Vec2::new(x, y))
            }

            pub fn x(&self) -> f32 {
                self.0.x
            }

            pub fn y(&self) -> f32 {
                self.0.y
            }

            pub fn as_vec2(&self) -> Vec2 {
                self.0
            }
        }

        impl From<Vec2> for $name {
            fn from(v: Vec2) -> Self {
                Self(v)
            }
        }

        impl From<$name> for Vec2 {
            fn from(p: $name) -> Self {
                p.0
            }
        }

        impl Add<Delta> for $name {
            type Output = $name;

            fn add(self, delta: Delta) -> Self::Output {
                $name(self.0 + delta.0)
            }
        }

        impl Sub for $name {
            type Output = Delta;

            fn sub(self, other: $name) -> Self::Output {
                Delta(self.0 - other.0)
            }
        }
    };
}

impl_point!(ScreenPoint);
impl_point!(CanvasPoint);
impl_point!(FramePoint);
impl_point!(WorldPoint);

impl Delta {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn zero() -> Self {
        Self(Vec2::ZERO)
    }
}

impl Add for Delta {
    type Output = Delta;

    fn add(self, other: Delta) -> Self::Output {
        Delta(self.0 + other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_minus_point_is_delta() {
        let a = CanvasPoint::new(10.0, 20.0);
        let b = CanvasPoint::new(4.0, 5.0);
        assert_eq!(a - b, Delta::new(6.0, 15.0));
        assert_eq!(b + (a - b), a);
    }

    #[test]
    fn test_points_serialize_as_vec2() {
        let json = serde_json::to_string(&WorldPoint::new(1.0, 2.0)).unwrap();
        assert_eq!(json, "[1.0,2.0]");
    }
}
