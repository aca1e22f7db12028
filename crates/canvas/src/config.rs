use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which built-in spot types the host renders itself.
///
/// `true` takes over every built-in type; a map takes over the listed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomSpots {
    All(bool),
    Types(BTreeMap<String, bool>),
}

impl Default for CustomSpots {
    fn default() -> Self {
        CustomSpots::All(false)
    }
}

impl CustomSpots {
    pub fn is_custom(&self, spot_type: &str) -> bool {
        match self {
            CustomSpots::All(all) => *all,
            CustomSpots::Types(types) => types.get(spot_type).copied().unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Distance from the frame's top/bottom edge where autoscroll kicks in
    pub autoscroll_limit: f32,
    pub custom_spots: CustomSpots,
    /// Frames are positioned freely in world space and dropped content is
    /// tracked with pointer events instead of native drag events
    pub infinite_canvas: bool,
    /// Initial zoom, in percent
    pub zoom: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            autoscroll_limit: 50.0,
            custom_spots: CustomSpots::default(),
            infinite_canvas: false,
            zoom: 100.0,
        }
    }
}
