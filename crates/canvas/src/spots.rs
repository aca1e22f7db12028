//! Overlay spots: select and hover boxes, padding/margin indicators, resize
//! handles and any host-defined overlay, tracked independently from the
//! component tree.

use crate::FrameId;
use node::ComponentId;
use scene_graph::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use trowel_core::Bounds;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpotType {
    Select,
    Hover,
    Padding,
    Margin,
    Resize,
    Custom(String),
}

impl SpotType {
    pub const SORTER_TARGET: &'static str = "sorter-target";

    pub fn sorter_target() -> Self {
        SpotType::Custom(Self::SORTER_TARGET.to_string())
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, SpotType::Custom(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            SpotType::Select => "select",
            SpotType::Hover => "hover",
            SpotType::Padding => "padding",
            SpotType::Margin => "margin",
            SpotType::Resize => "resize",
            SpotType::Custom(name) => name,
        }
    }
}

impl fmt::Display for SpotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpotType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "select" => SpotType::Select,
            "hover" => SpotType::Hover,
            "padding" => SpotType::Padding,
            "margin" => SpotType::Margin,
            "resize" => SpotType::Resize,
            other => SpotType::Custom(other.to_string()),
        })
    }
}

impl From<String> for SpotType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(spot_type) => spot_type,
            Err(never) => match never {},
        }
    }
}

impl From<SpotType> for String {
    fn from(value: SpotType) -> Self {
        value.as_str().to_string()
    }
}

/// A tracked overlay region. Bounds are in canvas space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub id: String,
    #[serde(rename = "type")]
    pub spot_type: SpotType,
    pub bounds: Bounds,
    pub component: Option<ComponentId>,
    /// Element the geometry is read from when it isn't bound to a component
    pub element: Option<ElementId>,
    pub frame: Option<FrameId>,
    /// Built-in rendering is skipped for this spot
    pub custom: bool,
}

/// What to create or update with [`Canvas::add_spot`](crate::Canvas::add_spot).
#[derive(Debug, Clone, Default)]
pub struct SpotProps {
    /// Reuses an existing spot with this id
    pub id: Option<String>,
    pub spot_type: Option<SpotType>,
    pub component: Option<ComponentId>,
    pub element: Option<ElementId>,
    pub frame: Option<FrameId>,
    /// Explicit geometry; otherwise read from the component or element
    pub bounds: Option<Bounds>,
}

impl SpotProps {
    pub fn new(spot_type: SpotType) -> Self {
        Self {
            spot_type: Some(spot_type),
            ..Default::default()
        }
    }

    pub fn with_component(mut self, component: ComponentId) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Matches spots by any combination of fields; an empty filter matches all.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpotFilter {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub spot_type: Option<SpotType>,
    pub component: Option<ComponentId>,
    pub frame: Option<FrameId>,
}

impl SpotFilter {
    pub fn of_type(spot_type: SpotType) -> Self {
        Self {
            spot_type: Some(spot_type),
            ..Default::default()
        }
    }

    pub fn matches(&self, spot: &Spot) -> bool {
        self.id.as_ref().map_or(true, |id| *id == spot.id)
            && self
                .spot_type
                .as_ref()
                .map_or(true, |spot_type| *spot_type == spot.spot_type)
            && self
                .component
                .map_or(true, |component| spot.component == Some(component))
            && self.frame.map_or(true, |frame| spot.frame == Some(frame))
    }
}

/// Spot lifecycle notifications, drained by the host after each step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpotEvent {
    Added { spot: Spot },
    Updated { spot: Spot },
    Removed { spot: Spot },
}

#[derive(Debug, Default)]
pub struct SpotRegistry {
    spots: Vec<Spot>,
    events: Vec<SpotEvent>,
}

impl SpotRegistry {
    pub fn get(&self, id: &str) -> Option<&Spot> {
        self.spots.iter().find(|spot| spot.id == id)
    }

    pub(crate) fn upsert(&mut self, spot: Spot) {
        if let Some(existing) = self.spots.iter_mut().find(|s| s.id == spot.id) {
            *existing = spot.clone();
            self.events.push(SpotEvent::Updated { spot });
        } else {
            self.spots.push(spot.clone());
            self.events.push(SpotEvent::Added { spot });
        }
    }

    pub(crate) fn set_bounds(&mut self, id: &str, bounds: Bounds) {
        if let Some(spot) = self.spots.iter_mut().find(|s| s.id == id) {
            if spot.bounds != bounds {
                spot.bounds = bounds;
                self.events.push(SpotEvent::Updated { spot: spot.clone() });
            }
        }
    }

    pub fn remove(&mut self, filter: &SpotFilter) -> Vec<Spot> {
        let (removed, kept): (Vec<Spot>, Vec<Spot>) =
            self.spots.drain(..).partition(|spot| filter.matches(spot));
        self.spots = kept;
        for spot in &removed {
            self.events.push(SpotEvent::Removed { spot: spot.clone() });
        }
        removed
    }

    pub fn filter(&self, filter: &SpotFilter) -> Vec<&Spot> {
        self.spots.iter().filter(|spot| filter.matches(spot)).collect()
    }

    pub fn all(&self) -> &[Spot] {
        &self.spots
    }

    pub fn take_events(&mut self) -> Vec<SpotEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(id: &str, spot_type: SpotType) -> Spot {
        Spot {
            id: id.to_string(),
            spot_type,
            bounds: Bounds::zero(),
            component: None,
            element: None,
            frame: None,
            custom: false,
        }
    }

    #[test]
    fn test_spot_type_strings() {
        assert_eq!("hover".parse::<SpotType>().unwrap(), SpotType::Hover);
        assert_eq!(SpotType::sorter_target().to_string(), "sorter-target");
        assert!(!SpotType::sorter_target().is_builtin());
        assert_eq!(
            serde_json::to_string(&SpotType::Padding).unwrap(),
            "\"padding\""
        );
    }

    #[test]
    fn test_registry_filters() {
        let mut registry = SpotRegistry::default();
        registry.upsert(spot("a", SpotType::Hover));
        registry.upsert(spot("b", SpotType::Select));
        registry.upsert(spot("c", SpotType::Hover));

        assert_eq!(registry.filter(&SpotFilter::of_type(SpotType::Hover)).len(), 2);
        let removed = registry.remove(&SpotFilter::of_type(SpotType::Hover));
        assert_eq!(removed.len(), 2);
        assert_eq!(registry.all().len(), 1);

        let events = registry.take_events();
        assert_eq!(events.len(), 5);
        assert!(registry.take_events().is_empty());
    }
}
