//! Choosing the insertion slot among candidate dims.

use super::dims::Dim;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Method {
    #[default]
    Before,
    After,
}

/// Where a drop would land relative to the candidate children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pos {
    /// Index into the dims list
    pub index: usize,
    /// Index of the reference child inside its collection
    pub index_el: usize,
    pub method: Method,
}

impl Pos {
    pub fn new(index_el: usize, method: Method) -> Self {
        Self {
            index: index_el,
            index_el,
            method,
        }
    }

    /// Insertion gap in the collection before the source is taken out of it
    pub fn insertion_index(&self) -> usize {
        match self.method {
            Method::Before => self.index_el,
            Method::After => self.index_el + 1,
        }
    }
}

/// Finds the slot for `point` among `dims`.
///
/// In-flow dims are scanned top to bottom and the first one whose vertical
/// center lies below the pointer wins. Out-of-flow dims (rows of floats or
/// inline boxes) narrow the candidates to the row under the pointer and pick
/// a side by comparing against the horizontal center.
pub fn find_position(dims: &[Dim], point: Vec2) -> Pos {
    let mut result = Pos::default();
    let mut x_limit: Option<f32> = None;
    let mut y_limit: Option<f32> = None;
    let mut left_limit: Option<f32> = None;

    for (i, dim) in dims.iter().enumerate() {
        let right = dim.left + dim.width;
        let bottom = dim.top + dim.height;
        let x_center = dim.left + dim.width / 2.0;
        let y_center = dim.top + dim.height / 2.0;

        // `>=` keeps clearfix elements of the current row from matching
        if x_limit.is_some_and(|limit| dim.left > limit)
            || y_limit.is_some_and(|limit| y_center >= limit)
            || left_limit.is_some_and(|limit| right < limit)
        {
            continue;
        }

        result.index = i;
        result.index_el = dim.index_el;

        if !dim.in_flow {
            if point.y < bottom {
                y_limit = Some(bottom);
            }
            if point.x < x_center {
                x_limit = Some(x_center);
                result.method = Method::Before;
            } else {
                left_limit = Some(x_center);
                result.method = Method::After;
            }
        } else if point.y < y_center {
            result.method = Method::Before;
            break;
        } else {
            result.method = Method::After;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_graph::ElementId;
    use trowel_core::BoxOffsets;

    fn dim(top: f32, left: f32, width: f32, height: f32, in_flow: bool, index: usize) -> Dim {
        Dim {
            top,
            left,
            width,
            height,
            offsets: BoxOffsets::default(),
            in_flow,
            el: ElementId::default(),
            index_el: index,
        }
    }

    fn stack() -> Vec<Dim> {
        (0..3)
            .map(|i| dim(i as f32 * 50.0, 0.0, 100.0, 50.0, true, i))
            .collect()
    }

    #[test]
    fn test_vertical_stack() {
        let dims = stack();
        assert_eq!(find_position(&dims, Vec2::new(10.0, 10.0)), Pos::new(0, Method::Before));
        assert_eq!(find_position(&dims, Vec2::new(10.0, 60.0)), Pos::new(1, Method::Before));
        assert_eq!(find_position(&dims, Vec2::new(10.0, 80.0)), Pos::new(2, Method::Before));
        assert_eq!(find_position(&dims, Vec2::new(10.0, 140.0)), Pos::new(2, Method::After));
        assert_eq!(find_position(&dims, Vec2::new(10.0, 400.0)), Pos::new(2, Method::After));
    }

    #[test]
    fn test_horizontal_row() {
        let dims: Vec<Dim> = (0..3)
            .map(|i| dim(0.0, i as f32 * 100.0, 100.0, 40.0, false, i))
            .collect();

        assert_eq!(find_position(&dims, Vec2::new(30.0, 20.0)), Pos::new(0, Method::Before));
        // Past the center of the second box the slot is reported against the third
        assert_eq!(find_position(&dims, Vec2::new(160.0, 20.0)), Pos::new(2, Method::Before));
        assert_eq!(find_position(&dims, Vec2::new(240.0, 20.0)), Pos::new(2, Method::Before));
        assert_eq!(find_position(&dims, Vec2::new(290.0, 20.0)), Pos::new(2, Method::After));
    }

    #[test]
    fn test_wrapped_rows_stay_on_pointer_row() {
        // Two rows of two floats each
        let dims = vec![
            dim(0.0, 0.0, 100.0, 40.0, false, 0),
            dim(0.0, 100.0, 100.0, 40.0, false, 1),
            dim(40.0, 0.0, 100.0, 40.0, false, 2),
            dim(40.0, 100.0, 100.0, 40.0, false, 3),
        ];
        assert_eq!(find_position(&dims, Vec2::new(160.0, 10.0)), Pos::new(1, Method::After));
        assert_eq!(find_position(&dims, Vec2::new(20.0, 60.0)), Pos::new(2, Method::Before));
    }

    #[test]
    fn test_empty_dims_default_to_before_first() {
        assert_eq!(find_position(&[], Vec2::new(5.0, 5.0)), Pos::default());
    }

    #[test]
    fn test_insertion_index() {
        assert_eq!(Pos::new(3, Method::Before).insertion_index(), 3);
        assert_eq!(Pos::new(3, Method::After).insertion_index(), 4);
    }
}
