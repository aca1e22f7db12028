//! Simple selector matching over rendered elements, backed by `simplecss`.

use crate::{ElementId, SceneGraph};
use simplecss::{AttributeOperator, PseudoClass, Selector};

/// Borrowed view of an element that `simplecss` can walk.
#[derive(Clone, Copy)]
pub(crate) struct ElementRef<'a> {
    graph: &'a SceneGraph,
    id: ElementId,
}

impl<'a> ElementRef<'a> {
    pub(crate) fn new(graph: &'a SceneGraph, id: ElementId) -> Self {
        Self { graph, id }
    }

    fn sibling_elements(&self) -> Vec<ElementId> {
        let Some(parent) = self.graph.parent(self.id) else {
            return Vec::new();
        };
        self.graph
            .children(parent)
            .iter()
            .copied()
            .filter(|id| !self.graph.is_text(*id))
            .collect()
    }
}

impl simplecss::Element for ElementRef<'_> {
    fn parent_element(&self) -> Option<Self> {
        self.graph
            .parent(self.id)
            .map(|parent| ElementRef::new(self.graph, parent))
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let siblings = self.sibling_elements();
        let index = siblings.iter().position(|id| *id == self.id)?;
        index
            .checked_sub(1)
            .map(|prev| ElementRef::new(self.graph, siblings[prev]))
    }

    fn has_local_name(&self, name: &str) -> bool {
        self.graph
            .get(self.id)
            .map(|el| el.tag.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    }

    fn attribute_matches(&self, local_name: &str, operator: AttributeOperator) -> bool {
        let Some(el) = self.graph.get(self.id) else {
            return false;
        };
        if local_name == "class" {
            return !el.classes.is_empty() && operator.matches(&el.classes.join(" "));
        }
        el.attributes
            .get(local_name)
            .map(|value| operator.matches(value))
            .unwrap_or(false)
    }

    fn pseudo_class_matches(&self, class: PseudoClass) -> bool {
        match class {
            PseudoClass::FirstChild => self.prev_sibling_element().is_none(),
            _ => false,
        }
    }
}

/// Whether `id` matches any selector of a comma separated list
pub(crate) fn matches_list(graph: &SceneGraph, id: ElementId, selectors: &str) -> bool {
    if graph.is_text(id) {
        return false;
    }
    let element = ElementRef::new(graph, id);
    selectors
        .split(',')
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .any(|text| match Selector::parse(text) {
            Some(selector) => selector.matches(&element),
            None => {
                log::warn!("ignoring unsupported selector {text:?}");
                false
            }
        })
}
