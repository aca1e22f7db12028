//! Measuring drop candidates.
//!
//! A [`Dim`] is the margin box of one candidate child in the sorter's
//! measurement space, tagged with whether it flows vertically (block-like
//! siblings stacked top to bottom) or horizontally (floats, inline boxes,
//! flex rows).

use super::{Direction, SorterConfig};
use canvas::{Canvas, ElementPosOptions};
use glam::Vec2;
use node::ComponentTree;
use scene_graph::{
    CssDisplay, CssFloat, CssOverflow, CssPosition, ElementId, SceneGraph,
};
use serde::Serialize;
use trowel_core::{Bounds, BoxOffsets};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dim {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub offsets: BoxOffsets,
    /// Stacks vertically with its siblings
    pub in_flow: bool,
    pub el: ElementId,
    /// Index of the element's component in its collection
    pub index_el: usize,
}

impl Dim {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_rect(self.top, self.left, self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Where dims and the pointer are measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimSpace {
    /// Canvas space, for sorting across frames
    Canvas,
    /// Page coordinates of one document relative to a container origin
    Container { origin: Vec2, wmargin: bool },
}

/// Margin box of `el` in `space`
pub fn measure(
    scene: &SceneGraph,
    canvas: &Canvas,
    el: ElementId,
    space: DimSpace,
) -> Option<Dim> {
    let element = scene.get(el)?;
    let offsets = element.offsets;
    let bounds = match space {
        DimSpace::Canvas => {
            let pos = match canvas.element_pos(scene, el, ElementPosOptions::default()) {
                Ok(pos) => pos,
                Err(err) => {
                    log::debug!("cannot measure element {el}: {err}");
                    return None;
                }
            };
            let scale = scene
                .document_of(el)
                .and_then(|doc| canvas.document_offset(scene, doc).ok())
                .map(|offset| offset.scale)
                .unwrap_or(1.0);
            let margin = offsets.margin;
            Bounds::from_rect(
                pos.top() - margin.top * scale,
                pos.left() - margin.left * scale,
                pos.width() + (margin.left + margin.right) * scale,
                pos.height() + (margin.top + margin.bottom) * scale,
            )
        }
        DimSpace::Container { origin, wmargin } => {
            let sign = if wmargin { -1.0 } else { 1.0 };
            element.rect.translate(-origin * sign)
        }
    };

    Some(Dim {
        top: bounds.top(),
        left: bounds.left(),
        width: bounds.width(),
        height: bounds.height(),
        offsets,
        in_flow: true,
        el,
        index_el: 0,
    })
}

/// Whether `el` stacks vertically inside `parent`, judged from computed style.
pub fn style_in_flow(scene: &SceneGraph, el: ElementId, parent: Option<ElementId>) -> bool {
    let Some(element) = scene.get(el) else {
        return false;
    };
    if element.text {
        return false;
    }
    let style = &element.style;
    if style.overflow != CssOverflow::Visible || style.float != CssFloat::None {
        return false;
    }
    if let Some(parent) = parent.and_then(|p| scene.get(p)) {
        if parent.style.display == CssDisplay::Flex && !parent.style.flex_direction.is_column() {
            return false;
        }
    }
    if !matches!(style.position, CssPosition::Static | CssPosition::Relative) {
        return false;
    }
    if matches!(
        element.tag.to_ascii_lowercase().as_str(),
        "tr" | "tbody" | "thead" | "tfoot"
    ) {
        return true;
    }
    matches!(
        style.display,
        CssDisplay::Block
            | CssDisplay::ListItem
            | CssDisplay::Table
            | CssDisplay::TableRow
            | CssDisplay::Flex
            | CssDisplay::Grid
    )
}

/// Whether `point` lies within `offset` of any edge of `dim`, or outside it
pub fn near_borders(dim: &Dim, point: Vec2, offset: f32) -> bool {
    let Vec2 { x, y } = point;
    dim.top + offset > y
        || y > dim.top + dim.height - offset
        || dim.left + offset > x
        || x > dim.left + dim.width - offset
}

/// Dims of the sortable children of `target`.
///
/// Children must match the item selector (bound text nodes are always
/// candidates) and be visible.
pub fn children_dims(
    scene: &SceneGraph,
    canvas: &Canvas,
    tree: &ComponentTree,
    target: ElementId,
    config: &SorterConfig,
    space: DimSpace,
) -> Vec<Dim> {
    let mut dims = Vec::new();
    for (i, &child) in scene.children(target).iter().enumerate() {
        let Some(element) = scene.get(child) else {
            continue;
        };
        let component = scene.component_of(child);
        let text_candidate = element.text && component.is_some();
        if !text_candidate && !scene.matches(child, &config.item_sel) {
            continue;
        }
        let hidden_model = component
            .and_then(|c| tree.get(c))
            .map(|c| !c.is_visible())
            .unwrap_or(false);
        if !element.visible || element.style.display == CssDisplay::None || hidden_model {
            continue;
        }
        let Some(mut dim) = measure(scene, canvas, child, space) else {
            continue;
        };

        dim.index_el = component.and_then(|c| tree.index(c)).unwrap_or(i);
        dim.in_flow = match config.direction {
            Direction::Vertical => true,
            Direction::Horizontal => false,
            Direction::Auto => style_in_flow(scene, child, Some(target)),
        };
        dims.push(dim);
    }
    dims
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas::CanvasConfig;
    use scene_graph::{ComputedStyle, Element, FlexDirection};

    fn setup() -> (SceneGraph, Canvas, ElementId) {
        let mut scene = SceneGraph::new();
        let doc = scene.create_document(Vec2::new(800.0, 600.0), None);
        let root = scene.document(doc).unwrap().root;
        let canvas = Canvas::new(&scene, root, CanvasConfig::default()).unwrap();
        (scene, canvas, root)
    }

    fn styled(display: CssDisplay) -> Element {
        Element::new("div").with_style(ComputedStyle {
            display,
            ..Default::default()
        })
    }

    #[test]
    fn test_style_in_flow() {
        let (mut scene, _, root) = setup();
        let block = scene.create_element(root, styled(CssDisplay::Block), None).unwrap();
        let inline = scene
            .create_element(root, styled(CssDisplay::InlineBlock), None)
            .unwrap();
        let mut floated = styled(CssDisplay::Block);
        floated.style.float = CssFloat::Left;
        let floated = scene.create_element(root, floated, None).unwrap();
        let mut absolute = styled(CssDisplay::Block);
        absolute.style.position = CssPosition::Absolute;
        let absolute = scene.create_element(root, absolute, None).unwrap();
        let row = scene
            .create_element(root, Element::new("tr").with_style(ComputedStyle {
                display: CssDisplay::Inline,
                ..Default::default()
            }), None)
            .unwrap();

        assert!(style_in_flow(&scene, block, Some(root)));
        assert!(!style_in_flow(&scene, inline, Some(root)));
        assert!(!style_in_flow(&scene, floated, Some(root)));
        assert!(!style_in_flow(&scene, absolute, Some(root)));
        assert!(style_in_flow(&scene, row, Some(root)));
    }

    #[test]
    fn test_flex_rows_are_out_of_flow() {
        let (mut scene, _, root) = setup();
        let flex = scene.create_element(root, styled(CssDisplay::Flex), None).unwrap();
        let item = scene.create_element(flex, styled(CssDisplay::Block), None).unwrap();
        assert!(!style_in_flow(&scene, item, Some(flex)));

        scene.get_mut(flex).unwrap().style.flex_direction = FlexDirection::Column;
        assert!(style_in_flow(&scene, item, Some(flex)));
    }

    #[test]
    fn test_near_borders() {
        let (mut scene, _, root) = setup();
        let el = scene.create_element(root, styled(CssDisplay::Block), None).unwrap();
        let dim = Dim {
            top: 100.0,
            left: 100.0,
            width: 200.0,
            height: 100.0,
            offsets: BoxOffsets::default(),
            in_flow: true,
            el,
            index_el: 0,
        };
        assert!(near_borders(&dim, Vec2::new(150.0, 105.0), 10.0));
        assert!(near_borders(&dim, Vec2::new(295.0, 150.0), 10.0));
        assert!(!near_borders(&dim, Vec2::new(200.0, 150.0), 10.0));
    }

    #[test]
    fn test_children_dims_skip_hidden_and_unmatched() {
        let (mut scene, canvas, root) = setup();
        let tree = ComponentTree::new();
        let first = scene
            .create_element(
                root,
                styled(CssDisplay::Block).with_rect(Bounds::from_rect(0.0, 0.0, 100.0, 50.0)),
                None,
            )
            .unwrap();
        let mut hidden = styled(CssDisplay::Block);
        hidden.visible = false;
        scene.create_element(root, hidden, None).unwrap();
        scene.create_element(root, Element::new("span"), None).unwrap();
        let last = scene
            .create_element(
                root,
                styled(CssDisplay::InlineBlock)
                    .with_rect(Bounds::from_rect(50.0, 0.0, 100.0, 50.0)),
                None,
            )
            .unwrap();

        let config = SorterConfig {
            item_sel: "div".into(),
            ..Default::default()
        };
        let dims = children_dims(&scene, &canvas, &tree, root, &config, DimSpace::Canvas);
        assert_eq!(dims.len(), 2);
        assert_eq!((dims[0].el, dims[0].index_el, dims[0].in_flow), (first, 0, true));
        assert_eq!((dims[1].el, dims[1].index_el, dims[1].in_flow), (last, 3, false));
        assert_eq!(dims[1].top, 50.0);
    }
}
