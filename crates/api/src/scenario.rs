//! Scenario documents.
//!
//! A scenario describes a page the way the host would have rendered it: the
//! canvas size, the frames, a component tree where every node carries the
//! layout of its element, and optionally a list of recorded steps.
//!
//! ```json
//! {
//!   "canvas": { "width": 800, "height": 600 },
//!   "root": {
//!     "components": [
//!       { "name": "hero", "layout": { "x": 0, "y": 0, "width": 300, "height": 50 } }
//!     ]
//!   },
//!   "steps": [{ "type": "start_sort", "target": { "component": "hero" } }]
//! }
//! ```
//!
//! Layout coordinates are in the space of the document the tree is rendered
//! in: the first frame's document, or the editor document when there are no
//! frames.

use crate::{Command, Editor, EditorConfig, ScenarioError};
use canvas::Canvas;
use glam::Vec2;
use node::{Component, ComponentDef, ComponentId, ComponentTree};
use scene_graph::{ComputedStyle, Element, ElementId, SceneGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use trowel_core::{Bounds, BoxOffsets, WorldPoint};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasDef {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasDef {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDef {
    pub name: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Rendered box of a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Layout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(flatten)]
    pub style: ComputedStyle,
    pub offsets: BoxOffsets,
    pub hidden: bool,
}

impl Layout {
    pub fn rect(&self) -> Bounds {
        Bounds::from_rect(self.y, self.x, self.width, self.height)
    }

    fn has_size(&self) -> bool {
        self.width > 0.0 || self.height > 0.0
    }
}

/// A component and the layout of the element rendering it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioNode {
    #[serde(flatten)]
    pub component: ComponentDef,
    pub layout: Layout,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ScenarioNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub config: EditorConfig,
    pub canvas: CanvasDef,
    pub frames: Vec<FrameDef>,
    pub root: ScenarioNode,
    pub steps: Vec<Command>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json(&json)?;
        log::debug!(
            "loaded scenario {} with {} step(s)",
            path.display(),
            scenario.steps.len()
        );
        Ok(scenario)
    }

    /// Builds an editor with the scenario's own configuration.
    pub fn build(&self) -> Result<Editor, ScenarioError> {
        self.build_with(self.config.clone())
    }

    /// Renders the scenario and wires an editor around it.
    ///
    /// Fails on duplicate component names and on steps naming components or
    /// frames that don't exist.
    pub fn build_with(&self, config: EditorConfig) -> Result<Editor, ScenarioError> {
        let mut scene = SceneGraph::new();
        let editor_doc =
            scene.create_document(Vec2::new(self.canvas.width, self.canvas.height), None);
        let canvas_el = scene
            .document(editor_doc)
            .map(|doc| doc.root)
            .ok_or(scene_graph::SceneError::DocumentNotFound(editor_doc))?;
        let mut canvas = Canvas::new(&scene, canvas_el, config.canvas.clone())?;

        let mut content_doc = None;
        for frame in &self.frames {
            let id = canvas.add_frame(
                &mut scene,
                WorldPoint(Vec2::new(frame.x, frame.y)),
                Vec2::new(frame.width, frame.height),
                Some(frame.name.clone()),
            );
            content_doc = content_doc.or_else(|| canvas.frame(id).map(|frame| frame.document));
        }
        let document = content_doc.unwrap_or(editor_doc);
        let root_el = scene
            .document(document)
            .map(|doc| doc.root)
            .ok_or(scene_graph::SceneError::DocumentNotFound(document))?;

        let mut root_def = self.root.component.clone();
        root_def
            .kind
            .get_or_insert_with(|| Component::WRAPPER_KIND.to_string());
        let mut tree = ComponentTree::with_root(root_def.to_component());
        scene.bind(root_el, tree.root());
        if let Some(el) = scene.get_mut(root_el) {
            apply_layout(el, &self.root.layout, &root_def);
        }

        let mut names = HashSet::new();
        if let Some(name) = &root_def.name {
            names.insert(name.clone());
        }
        let root = tree.root();
        for child in &self.root.components {
            render(&mut tree, &mut scene, &mut names, root, root_el, child)?;
        }

        for step in &self.steps {
            if let Some(name) = step
                .component_names()
                .into_iter()
                .find(|name| !names.contains(*name))
            {
                return Err(ScenarioError::UnknownComponent(name.to_string()));
            }
            if let Some(name) = step
                .frame_names()
                .into_iter()
                .find(|name| canvas.frame_by_name(name).is_none())
            {
                return Err(ScenarioError::UnknownFrame(name.to_string()));
            }
        }

        log::debug!(
            "built scenario with {} component(s) and {} frame(s)",
            tree.len(),
            self.frames.len()
        );
        Ok(Editor::new(tree, scene, canvas, document, config))
    }
}

fn render(
    tree: &mut ComponentTree,
    scene: &mut SceneGraph,
    names: &mut HashSet<String>,
    parent: ComponentId,
    parent_el: ElementId,
    node: &ScenarioNode,
) -> Result<(), ScenarioError> {
    if let Some(name) = &node.component.name {
        if !names.insert(name.clone()) {
            return Err(ScenarioError::DuplicateName(name.clone()));
        }
    }
    let component = node.component.to_component();
    let mut element = Element::new(component.tag_name.clone());
    apply_layout(&mut element, &node.layout, &node.component);
    element.classes = component.classes.clone();
    element.attributes = component.attributes.clone();

    let id = tree.insert(parent, component, None)?;
    let el = scene.create_element(parent_el, element, None)?;
    scene.bind(el, id);

    for child in &node.components {
        render(tree, scene, names, id, el, child)?;
    }
    Ok(())
}

fn apply_layout(element: &mut Element, layout: &Layout, def: &ComponentDef) {
    if layout.has_size() {
        element.rect = layout.rect();
    }
    element.style = layout.style;
    element.offsets = layout.offsets;
    element.visible = !layout.hidden && def.style.get("display").map(String::as_str) != Some("none");
}
