//! Serializable component definitions.
//!
//! Definitions describe components as data: dropped JSON payloads, block
//! content and scenario files all use this shape. Realizing a definition
//! creates detached components in a [`ComponentTree`].

use crate::component::{Component, ComponentFlags};
use crate::predicate::Predicate;
use crate::tree::{ComponentId, ComponentTree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentDef {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draggable: Option<Predicate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub droppable: Option<Predicate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<ComponentFlags>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentDef>,
}

impl ComponentDef {
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    /// Builds the component itself, without children
    pub fn to_component(&self) -> Component {
        let mut component = Component::new(
            self.kind
                .clone()
                .unwrap_or_else(|| Component::DEFAULT_KIND.to_string()),
        );
        if let Some(tag_name) = &self.tag_name {
            component.tag_name = tag_name.clone();
        }
        component.name = self.name.clone();
        component.classes = self.classes.clone();
        component.attributes.extend(self.attributes.clone());
        component.style = self.style.clone();
        component.content = self.content.clone();
        if let Some(draggable) = &self.draggable {
            component.draggable = draggable.clone();
        }
        if let Some(droppable) = &self.droppable {
            component.droppable = droppable.clone();
        }
        if let Some(flags) = self.flags {
            component.flags = flags;
        }
        component
    }
}

impl ComponentTree {
    /// Realizes `def` and its nested components as a detached subtree.
    pub fn build(&mut self, def: &ComponentDef) -> ComponentId {
        let id = self.create(def.to_component());
        for child in &def.components {
            let child_id = self.build(child);
            // Both sides are fresh, detached and distinct; attaching cannot fail
            if let Err(err) = self.add(id, child_id, Default::default()) {
                log::error!("failed to attach built component: {err}");
            }
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_definition() {
        let def: ComponentDef = serde_json::from_str(
            r#"{
                "type": "link",
                "attributes": { "href": "https://example.com" },
                "droppable": ".inline",
                "components": [{ "type": "text", "content": "Example" }]
            }"#,
        )
        .unwrap();

        let mut tree = ComponentTree::new();
        let id = tree.build(&def);
        let link = tree.get(id).unwrap();
        assert_eq!(link.tag_name, "a");
        assert_eq!(link.droppable, Predicate::selector(".inline"));
        assert_eq!(tree.children(id).len(), 1);

        let text = tree.get(tree.children(id)[0]).unwrap();
        assert!(text.is_text());
        assert_eq!(text.content, "Example");
        assert!(!tree.is_attached(id));
    }
}
