//! Draggable / droppable rules.
//!
//! A component decides where it may be dragged (`draggable`, evaluated
//! against the candidate target) and what it accepts (`droppable`, evaluated
//! against the dragged source). Both rules share one shape:
//!
//! - `Always(bool)`: a constant answer
//! - `Selectors(list)`: the other side must match one of the selectors
//! - `Custom(fn)`: host code decides; it may answer with a boolean or with a
//!   selector string that is then matched like `Selectors`
//!
//! In JSON the rules are written as `true`, `".row"` or `[".row", ".col"]`.
//! Custom rules can only be installed from code.

use crate::component::Component;
use serde::de::Deserializer;
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// What a rule is evaluated against.
pub struct PredicateContext<'a> {
    /// The dragged component
    pub source: &'a Component,
    /// The candidate drop target
    pub target: &'a Component,
    /// Candidate insertion index inside the target, when already known
    pub index: Option<usize>,
}

/// Answer of a custom rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateValue {
    Bool(bool),
    /// A selector list the other side has to match
    Selector(String),
}

impl From<bool> for PredicateValue {
    fn from(value: bool) -> Self {
        PredicateValue::Bool(value)
    }
}

impl From<&str> for PredicateValue {
    fn from(value: &str) -> Self {
        PredicateValue::Selector(value.to_string())
    }
}

pub type PredicateFn = dyn Fn(&PredicateContext<'_>) -> PredicateValue + Send + Sync;

#[derive(Clone)]
pub enum Predicate {
    Always(bool),
    Selectors(Vec<String>),
    Custom(Arc<PredicateFn>),
}

/// Result of evaluating a [`Predicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub allowed: bool,
    /// The selector list that was required, reported in validation events
    /// and warnings
    pub info: Option<String>,
}

impl Verdict {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            info: None,
        }
    }
}

impl Predicate {
    pub fn selector(selector: impl Into<String>) -> Self {
        Predicate::Selectors(vec![selector.into()])
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&PredicateContext<'_>) -> PredicateValue + Send + Sync + 'static,
    {
        Predicate::Custom(Arc::new(f))
    }

    /// Evaluates the rule.
    ///
    /// `matches` answers whether the *other* side of the check matches a
    /// selector list: the target element for `draggable`, the source element
    /// for `droppable`.
    pub fn evaluate(
        &self,
        ctx: &PredicateContext<'_>,
        matches: &dyn Fn(&str) -> bool,
    ) -> Verdict {
        match self {
            Predicate::Always(allowed) => Verdict {
                allowed: *allowed,
                info: None,
            },
            Predicate::Selectors(selectors) => {
                let joined = selectors.join(", ");
                Verdict {
                    allowed: !joined.trim().is_empty() && matches(&joined),
                    info: Some(joined),
                }
            }
            Predicate::Custom(f) => match f(ctx) {
                PredicateValue::Bool(allowed) => Verdict {
                    allowed,
                    info: None,
                },
                PredicateValue::Selector(selector) => Verdict {
                    allowed: matches(&selector),
                    info: Some(selector),
                },
            },
        }
    }

    /// The selector list when the rule is a plain allow-list
    pub fn selectors(&self) -> Option<&[String]> {
        match self {
            Predicate::Selectors(selectors) => Some(selectors),
            _ => None,
        }
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::Always(true)
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Predicate::Always(a), Predicate::Always(b)) => a == b,
            (Predicate::Selectors(a), Predicate::Selectors(b)) => a == b,
            (Predicate::Custom(a), Predicate::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Always(value) => f.debug_tuple("Always").field(value).finish(),
            Predicate::Selectors(selectors) => {
                f.debug_tuple("Selectors").field(selectors).finish()
            }
            Predicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPredicate {
    Bool(bool),
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for Predicate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawPredicate::deserialize(deserializer)? {
            RawPredicate::Bool(value) => Predicate::Always(value),
            RawPredicate::One(selector) => Predicate::Selectors(vec![selector]),
            RawPredicate::Many(selectors) => Predicate::Selectors(selectors),
        })
    }
}

impl Serialize for Predicate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Predicate::Always(value) => serializer.serialize_bool(*value),
            Predicate::Selectors(selectors) if selectors.len() == 1 => {
                serializer.serialize_str(&selectors[0])
            }
            Predicate::Selectors(selectors) => selectors.serialize(serializer),
            Predicate::Custom(_) => Err(S::Error::custom(
                "custom predicates cannot be serialized",
            )),
        }
    }
}
