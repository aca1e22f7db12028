//! Drop validation and the warnings raised for rejected moves.
//!
//! Validation runs both rules of a candidate move: the source's `draggable`
//! (matched against the target) and the target's `droppable` (matched
//! against the source). Selector rules are matched on the component tree
//! rather than on rendered elements, so content that is being dropped and has
//! no element yet is validated the same way as an existing component.

use node::{ComponentId, ComponentTree, PredicateContext};
use serde::Serialize;
use simplecss::{AttributeOperator, PseudoClass, Selector};

/// Outcome of checking whether `source` may be dropped into `target`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub source: Option<ComponentId>,
    pub target: Option<ComponentId>,
    pub draggable: bool,
    pub droppable: bool,
    /// Selector list the source's `draggable` rule required
    pub drag_info: Option<String>,
    /// Selector list the target's `droppable` rule required
    pub drop_info: Option<String>,
    /// The target is the source itself or lives inside it
    pub nested_in_source: bool,
}

impl ValidationResult {
    fn missing(source: Option<ComponentId>, target: Option<ComponentId>) -> Self {
        Self {
            valid: false,
            source,
            target,
            draggable: false,
            droppable: false,
            drag_info: None,
            drop_info: None,
            nested_in_source: false,
        }
    }
}

/// Whether dropping `source` into `target` switches to caret insertion.
pub fn is_textable_active(tree: &ComponentTree, source: ComponentId, target: ComponentId) -> bool {
    let textable = tree.get(source).map(|c| c.is_textable()).unwrap_or(false);
    let text = tree.get(target).map(|c| c.is_text()).unwrap_or(false);
    textable && text
}

pub fn validate(
    tree: &ComponentTree,
    source: Option<ComponentId>,
    target: Option<ComponentId>,
    index: Option<usize>,
) -> ValidationResult {
    let (Some(src), Some(trg)) = (source, target) else {
        return ValidationResult::missing(source, target);
    };
    let (Some(src_component), Some(trg_component)) = (tree.get(src), tree.get(trg)) else {
        return ValidationResult::missing(source, target);
    };

    let ctx = PredicateContext {
        source: src_component,
        target: trg_component,
        index,
    };
    let drag = src_component
        .draggable
        .evaluate(&ctx, &|selectors| component_matches(tree, trg, selectors));
    let drop = trg_component
        .droppable
        .evaluate(&ctx, &|selectors| component_matches(tree, src, selectors));
    let droppable = drop.allowed || is_textable_active(tree, src, trg);
    let nested_in_source = src == trg || tree.is_ancestor(src, trg);

    ValidationResult {
        valid: drag.allowed && droppable && !nested_in_source,
        source,
        target,
        draggable: drag.allowed,
        droppable,
        drag_info: drag.info,
        drop_info: drop.info,
        nested_in_source,
    }
}

/// Reasons listed in the "Invalid target position" warning
pub fn rejection_reasons(result: &ValidationResult, tree: &ComponentTree) -> Vec<String> {
    let mut errors = Vec::new();
    let target_exists = result.target.map(|id| tree.contains(id)).unwrap_or(false);
    if !target_exists {
        errors.push("Target collection not found".to_string());
    }
    if !result.droppable {
        if let Some(info) = &result.drop_info {
            errors.push(format!("Target is not droppable, accepts [{info}]"));
        }
    }
    if !result.draggable {
        if let Some(info) = &result.drag_info {
            errors.push(format!("Component not draggable, acceptable by [{info}]"));
        }
    }
    if result.nested_in_source {
        errors.push("Target is inside the dragged component".to_string());
    }
    errors
}

/// Payload of a rejected move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveWarning {
    pub errors: Vec<String>,
    pub source: Option<ComponentId>,
    pub target: Option<ComponentId>,
    pub context: &'static str,
}

/// Receiver of user-facing warnings.
pub trait WarningLog {
    fn log_warning(&mut self, message: &str, warning: &MoveWarning);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWarnings;

impl WarningLog for LogWarnings {
    fn log_warning(&mut self, message: &str, warning: &MoveWarning) {
        log::warn!(
            "{message} ({}): {}",
            warning.context,
            warning.errors.join("; ")
        );
    }
}

/// Keeps every warning and forwards it to the `log` facade.
#[derive(Debug, Default, Clone)]
pub struct RecordedWarnings {
    pub entries: Vec<(String, MoveWarning)>,
}

impl RecordedWarnings {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WarningLog for RecordedWarnings {
    fn log_warning(&mut self, message: &str, warning: &MoveWarning) {
        LogWarnings.log_warning(message, warning);
        self.entries.push((message.to_string(), warning.clone()));
    }
}

#[derive(Clone, Copy)]
struct ComponentRef<'a> {
    tree: &'a ComponentTree,
    id: ComponentId,
}

impl simplecss::Element for ComponentRef<'_> {
    fn parent_element(&self) -> Option<Self> {
        self.tree.parent(self.id).map(|id| ComponentRef {
            tree: self.tree,
            id,
        })
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let index = self.tree.index(self.id)?;
        let parent = self.tree.parent(self.id)?;
        let prev = self.tree.children(parent).get(index.checked_sub(1)?)?;
        Some(ComponentRef {
            tree: self.tree,
            id: *prev,
        })
    }

    fn has_local_name(&self, name: &str) -> bool {
        self.tree
            .get(self.id)
            .map(|c| c.tag_name.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    }

    fn attribute_matches(&self, local_name: &str, operator: AttributeOperator) -> bool {
        let Some(component) = self.tree.get(self.id) else {
            return false;
        };
        if local_name == "class" {
            return !component.classes.is_empty() && operator.matches(&component.classes.join(" "));
        }
        component
            .attributes
            .get(local_name)
            .map(|value| operator.matches(value))
            .unwrap_or(false)
    }

    fn pseudo_class_matches(&self, class: PseudoClass) -> bool {
        match class {
            PseudoClass::FirstChild => self.tree.index(self.id) == Some(0),
            _ => false,
        }
    }
}

/// Whether the component matches any selector of a comma separated list
pub fn component_matches(tree: &ComponentTree, id: ComponentId, selectors: &str) -> bool {
    let component = ComponentRef { tree, id };
    selectors
        .split(',')
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .any(|text| match Selector::parse(text) {
            Some(selector) => selector.matches(&component),
            None => {
                log::warn!("ignoring unsupported selector {text:?}");
                false
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use node::{Component, Predicate};

    #[test]
    fn test_selector_rules_match_both_sides() {
        let mut tree = ComponentTree::new();
        let row = tree
            .insert(tree.root(), Component::default().with_class("row"), None)
            .unwrap();
        let other = tree.insert(tree.root(), Component::default(), None).unwrap();
        let cell = tree
            .insert(
                tree.root(),
                Component::default()
                    .with_class("cell")
                    .with_draggable(Predicate::selector(".row")),
                None,
            )
            .unwrap();

        assert!(validate(&tree, Some(cell), Some(row), None).valid);

        let rejected = validate(&tree, Some(cell), Some(other), None);
        assert!(!rejected.valid);
        assert!(rejected.droppable);
        assert_eq!(rejected.drag_info.as_deref(), Some(".row"));
        assert_eq!(
            rejection_reasons(&rejected, &tree),
            vec!["Component not draggable, acceptable by [.row]".to_string()]
        );
    }

    #[test]
    fn test_textable_forces_droppable() {
        let mut tree = ComponentTree::new();
        let text = tree.insert(tree.root(), Component::text("Hi"), None).unwrap();
        let plain = tree.insert(tree.root(), Component::default(), None).unwrap();
        let inline = tree
            .insert(tree.root(), Component::default().with_textable(true), None)
            .unwrap();

        assert!(!validate(&tree, Some(plain), Some(text), None).valid);
        assert!(validate(&tree, Some(inline), Some(text), None).valid);
    }

    #[test]
    fn test_missing_target_and_self_nesting() {
        let mut tree = ComponentTree::new();
        let outer = tree.insert(tree.root(), Component::default(), None).unwrap();
        let inner = tree.insert(outer, Component::default(), None).unwrap();

        let missing = validate(&tree, Some(outer), None, None);
        assert!(!missing.valid);
        assert_eq!(
            rejection_reasons(&missing, &tree),
            vec!["Target collection not found".to_string()]
        );

        let nested = validate(&tree, Some(outer), Some(inner), None);
        assert!(!nested.valid);
        assert!(nested.nested_in_source);
    }

    #[test]
    fn test_recorded_warnings_keep_entries() {
        let mut log = RecordedWarnings::default();
        log.log_warning(
            "Invalid target position",
            &MoveWarning {
                errors: vec!["Target collection not found".into()],
                source: None,
                target: None,
                context: "sorter",
            },
        );
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries[0].0, "Invalid target position");
    }
}
