use canvas::{Canvas, CanvasConfig, SpotFilter, SpotType};
use drag::{
    DragContext, DragEvent, DropContent, Key, KeyEvent, Method, MoveResult, MoveSource,
    PointerEvent, Pos, RecordedWarnings, SortSource, Sorter, SorterConfig,
};
use glam::Vec2;
use node::{Component, ComponentDef, ComponentId, ComponentTree, Predicate, Status};
use scene_graph::{ComputedStyle, CssDisplay, DocumentId, Element, ElementId, SceneGraph};
use trowel_core::Bounds;

const ROW: f32 = 50.0;

/// A container of `n` stacked 50px rows rendered in the editor document.
struct Page {
    tree: ComponentTree,
    scene: SceneGraph,
    canvas: Canvas,
    warnings: RecordedWarnings,
    events: Vec<DragEvent>,
    document: DocumentId,
    container: ComponentId,
    container_el: ElementId,
    rows: Vec<ComponentId>,
    row_els: Vec<ElementId>,
}

fn block(rect: Bounds) -> Element {
    Element::new("div")
        .with_rect(rect)
        .with_style(ComputedStyle {
            display: CssDisplay::Block,
            ..Default::default()
        })
}

impl Page {
    fn new(n: usize) -> Self {
        Self::with_container(n, Component::default().with_name("container"))
    }

    fn with_container(n: usize, container: Component) -> Self {
        let mut scene = SceneGraph::new();
        let document = scene.create_document(Vec2::new(800.0, 600.0), None);
        let root = scene.document(document).unwrap().root;
        let canvas = Canvas::new(&scene, root, CanvasConfig::default()).unwrap();

        let mut tree = ComponentTree::new();
        scene.bind(root, tree.root());

        let height = (n.max(2) as f32) * ROW;
        let container = tree.insert(tree.root(), container, None).unwrap();
        let container_el = scene
            .create_element(root, block(Bounds::from_rect(0.0, 0.0, 300.0, height)), None)
            .unwrap();
        scene.bind(container_el, container);

        let mut rows = Vec::new();
        let mut row_els = Vec::new();
        for i in 0..n {
            let id = tree
                .insert(
                    container,
                    Component::default().with_name(format!("div{i}")),
                    None,
                )
                .unwrap();
            let rect = Bounds::from_rect(i as f32 * ROW, 0.0, 300.0, ROW);
            let el = scene.create_element(container_el, block(rect), None).unwrap();
            scene.bind(el, id);
            rows.push(id);
            row_els.push(el);
        }

        Self {
            tree,
            scene,
            canvas,
            warnings: RecordedWarnings::default(),
            events: Vec::new(),
            document,
            container,
            container_el,
            rows,
            row_els,
        }
    }

    fn cx(&mut self) -> DragContext<'_> {
        DragContext::new(
            &mut self.tree,
            &mut self.scene,
            &mut self.canvas,
            &mut self.warnings,
            &mut self.events,
        )
    }

    fn over(&self, el: ElementId, x: f32, y: f32) -> PointerEvent {
        PointerEvent::new(self.document, Vec2::new(x, y)).with_target(el)
    }

    fn names(&self) -> Vec<String> {
        self.tree
            .children(self.container)
            .iter()
            .map(|id| self.tree.get(*id).unwrap().label().to_string())
            .collect()
    }
}

#[test]
fn test_upper_half_of_row_goes_before_it() {
    let mut page = Page::new(3);
    let mut sorter = Sorter::new(SorterConfig::default());
    let source = SortSource::Element(page.row_els[0]);
    sorter.start_sort(&mut page.cx(), source);

    let ev = page.over(page.row_els[1], 150.0, 60.0);
    sorter.on_move(&mut page.cx(), &ev);

    assert_eq!(sorter.target(), Some(page.container_el));
    assert_eq!(sorter.last_pos(), Some(Pos::new(1, Method::Before)));
    let placeholder = sorter.placeholder();
    assert!(placeholder.visible);
    assert_eq!(placeholder.top, ROW);
}

#[test]
fn test_lower_half_of_row_goes_after_it() {
    let mut page = Page::new(3);
    let mut sorter = Sorter::new(SorterConfig::default());
    let source = SortSource::Element(page.row_els[0]);
    sorter.start_sort(&mut page.cx(), source);

    let ev = page.over(page.row_els[1], 150.0, 90.0);
    sorter.on_move(&mut page.cx(), &ev);

    // Reported against the next row; the gap is the one right after div1
    let pos = sorter.last_pos().unwrap();
    assert_eq!(pos, Pos::new(2, Method::Before));
    assert_eq!(pos.insertion_index(), 2);
}

#[test]
fn test_drag_first_row_after_last() {
    let mut page = Page::new(3);
    let mut sorter = Sorter::new(SorterConfig::default());
    let source = SortSource::Element(page.row_els[0]);
    sorter.start_sort(&mut page.cx(), source);
    assert_eq!(
        page.tree.get(page.rows[0]).unwrap().status,
        Status::Freezed
    );

    let ev = page.over(page.row_els[2], 150.0, 140.0);
    sorter.on_move(&mut page.cx(), &ev);
    assert_eq!(sorter.last_pos(), Some(Pos::new(2, Method::After)));

    let outcome = sorter.on_pointer_up(&mut page.cx(), &ev).unwrap();
    assert!(!outcome.cancelled);
    assert_eq!(outcome.moved, vec![page.rows[0]]);
    assert_eq!(page.names(), ["div1", "div2", "div0"]);
    assert_eq!(page.tree.get(page.rows[0]).unwrap().status, Status::None);
    assert!(!sorter.is_dragging());

    // Rendered order follows the model
    assert_eq!(
        page.scene.children(page.container_el),
        [page.row_els[1], page.row_els[2], page.row_els[0]]
    );
    // The removal and the insertion undo together
    page.tree.undo();
    assert_eq!(page.names(), ["div0", "div1", "div2"]);
}

#[test]
fn test_drop_content_into_empty_container() {
    let mut page = Page::new(0);
    let before = page.tree.len();
    let mut sorter = Sorter::new(SorterConfig {
        nested: true,
        ..Default::default()
    });
    let def = ComponentDef {
        name: Some("block".to_string()),
        ..ComponentDef::of_kind("default")
    };
    sorter.start_sort(&mut page.cx(), SortSource::Content(DropContent::component(def)));

    let ev = page.over(page.container_el, 150.0, 50.0);
    sorter.on_move(&mut page.cx(), &ev);
    assert_eq!(sorter.target(), Some(page.container_el));
    let probe = sorter.probe().unwrap();
    assert!(!page.tree.is_attached(probe));
    assert!(page.tree.children(page.container).is_empty());

    let outcome = sorter.on_pointer_up(&mut page.cx(), &ev).unwrap();
    assert_eq!(outcome.moved.len(), 1);
    assert_eq!(page.names(), ["block"]);
    assert!(!page.tree.contains(probe));
    assert_eq!(page.tree.len(), before + 1);
}

#[test]
fn test_move_there_and_back_restores_order() {
    let mut page = Page::new(5);
    let mut sorter = Sorter::new(SorterConfig::default());
    let a = page.rows[1];
    let original = page.names();

    let target = page.container_el;

    let source = MoveSource::Component(a);

    let result = sorter.move_component(
        &mut page.cx(),
        target,
        source,
        Pos::new(3, Method::After),
    );
    assert_eq!(result, MoveResult::Moved(a));
    assert_eq!(page.tree.index(a), Some(3));

    let target = page.container_el;

    let source = MoveSource::Component(a);

    sorter.move_component(
        &mut page.cx(),
        target,
        source,
        Pos::new(1, Method::Before),
    );
    assert_eq!(page.names(), original);
}

#[test]
fn test_same_parent_move_accounts_for_removal() {
    let mut page = Page::new(5);
    let mut sorter = Sorter::new(SorterConfig::default());
    let a = page.rows[2];

    // The gap after the fourth child
    let target = page.container_el;
    let source = MoveSource::Component(a);
    sorter.move_component(
        &mut page.cx(),
        target,
        source,
        Pos::new(3, Method::After),
    );
    assert_eq!(page.tree.index(a), Some(3));
    assert_eq!(page.names(), ["div0", "div1", "div3", "div2", "div4"]);

    // The last slot
    let target = page.container_el;
    let source = MoveSource::Component(a);
    sorter.move_component(
        &mut page.cx(),
        target,
        source,
        Pos::new(4, Method::After),
    );
    assert_eq!(page.tree.index(a), Some(4));
}

#[test]
fn test_dropping_on_own_slot_changes_nothing() {
    let mut page = Page::new(3);
    let mut sorter = Sorter::new(SorterConfig::default());
    let history = page.tree.history().len();

    let target = page.container_el;

    let source = MoveSource::Component(page.rows[1]);

    let result = sorter.move_component(
        &mut page.cx(),
        target,
        source,
        Pos::new(1, Method::Before),
    );
    assert_eq!(result, MoveResult::Unchanged(page.rows[1]));
    assert_eq!(page.tree.history().len(), history);
}

#[test]
fn test_rejected_move_logs_once() {
    let mut page = Page::new(3);
    let mut sorter = Sorter::new(SorterConfig::default());
    let picky = page
        .tree
        .insert(
            page.tree.root(),
            Component::default()
                .with_name("picky")
                .with_draggable(Predicate::selector(".allowed")),
            None,
        )
        .unwrap();
    let history = page.tree.history().len();

    let target = page.container_el;

    let source = MoveSource::Component(picky);

    let result = sorter.move_component(
        &mut page.cx(),
        target,
        source,
        Pos::new(0, Method::Before),
    );

    assert_eq!(result, MoveResult::Rejected);
    assert_eq!(page.names(), ["div0", "div1", "div2"]);
    assert_eq!(page.tree.history().len(), history);
    assert_eq!(page.warnings.len(), 1);
    let (message, warning) = &page.warnings.entries[0];
    assert_eq!(message, "Invalid target position");
    assert_eq!(warning.context, "sorter");
    assert_eq!(
        warning.errors,
        ["Component not draggable, acceptable by [.allowed]"]
    );
}

#[test]
fn test_container_cannot_move_into_itself() {
    let mut page = Page::new(3);
    let mut sorter = Sorter::new(SorterConfig::default());

    let target = page.row_els[0];

    let source = MoveSource::Component(page.container);

    let result = sorter.move_component(
        &mut page.cx(),
        target,
        source,
        Pos::new(0, Method::Before),
    );
    assert_eq!(result, MoveResult::Rejected);
    assert!(page.warnings.entries[0]
        .1
        .errors
        .contains(&"Target is inside the dragged component".to_string()));
}

#[test]
fn test_selection_moves_together_in_tree_order() {
    let mut page = Page::new(5);
    let mut sorter = Sorter::new(SorterConfig::default());
    let selection = vec![page.rows[2], page.rows[0]];
    sorter.start_sort(&mut page.cx(), SortSource::Components(selection));

    let ev = page.over(page.row_els[3], 150.0, 185.0);
    sorter.on_move(&mut page.cx(), &ev);
    assert_eq!(sorter.last_pos().map(|pos| pos.insertion_index()), Some(4));

    let outcome = sorter.on_pointer_up(&mut page.cx(), &ev).unwrap();
    assert_eq!(outcome.moved, vec![page.rows[0], page.rows[2]]);
    assert_eq!(page.names(), ["div1", "div3", "div0", "div2", "div4"]);
}

#[test]
fn test_escape_rolls_back() {
    let mut page = Page::new(3);
    let mut sorter = Sorter::new(SorterConfig::default());
    let source = SortSource::Element(page.row_els[0]);
    sorter.start_sort(&mut page.cx(), source);
    let ev = page.over(page.row_els[2], 150.0, 140.0);
    sorter.on_move(&mut page.cx(), &ev);
    assert_eq!(
        page.canvas
            .spots(&SpotFilter::of_type(SpotType::sorter_target()))
            .len(),
        1
    );

    let escape = KeyEvent::new(page.document, Key::Escape);
    let outcome = sorter.on_key(&mut page.cx(), &escape).unwrap();
    assert!(outcome.cancelled);
    assert_eq!(page.names(), ["div0", "div1", "div2"]);
    assert!(!sorter.placeholder().visible);
    assert!(page
        .canvas
        .spots(&SpotFilter::of_type(SpotType::sorter_target()))
        .is_empty());
    assert!(matches!(
        page.events.last(),
        Some(DragEvent::SortEnd { cancelled: true, .. })
    ));
}

#[test]
fn test_second_start_cancels_first() {
    let mut page = Page::new(3);
    let mut sorter = Sorter::new(SorterConfig::default());
    let source = SortSource::Element(page.row_els[0]);
    sorter.start_sort(&mut page.cx(), source);
    let ev = page.over(page.row_els[2], 150.0, 140.0);
    sorter.on_move(&mut page.cx(), &ev);

    let source = SortSource::Element(page.row_els[1]);

    sorter.start_sort(&mut page.cx(), source);
    assert!(sorter.is_dragging());
    assert_eq!(sorter.sources(), [page.rows[1]]);
    assert_eq!(page.tree.get(page.rows[0]).unwrap().status, Status::None);
    assert_eq!(page.names(), ["div0", "div1", "div2"]);
}
