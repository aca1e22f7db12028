//! Editor configuration document.
//!
//! Every engine reads its own section; missing sections and fields fall back
//! to their defaults, so `{}` is a valid configuration.

use canvas::CanvasConfig;
use drag::{DraggerConfig, DroppableConfig, ResizerConfig, SorterConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub canvas: CanvasConfig,
    pub sorter: SorterConfig,
    pub dragger: DraggerConfig,
    pub resizer: ResizerConfig,
    pub droppable: DroppableConfig,
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, crate::ScenarioError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| crate::ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drag::Handle;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.sorter.border_offset, 10.0);
        assert_eq!(config.dragger.snap_offset, 5.0);
        assert!(config.droppable.allow_external_drop);
    }

    #[test]
    fn test_sections_override_fields() {
        let config = EditorConfig::from_json(
            r#"{
                "canvas": { "zoom": 50 },
                "sorter": { "nested": true, "containerSel": ".row" },
                "resizer": { "ratioDefault": true, "handles": ["br", "tl"] },
                "droppable": { "absoluteMode": true }
            }"#,
        )
        .unwrap();
        assert_eq!(config.canvas.zoom, 50.0);
        assert!(config.sorter.nested);
        assert_eq!(config.sorter.container_sel, ".row");
        assert_eq!(config.sorter.item_sel, "*");
        assert!(config.resizer.ratio_default);
        assert_eq!(config.resizer.handles.as_slice(), &[Handle::Br, Handle::Tl]);
        assert!(config.droppable.absolute_mode);
        assert!(config.droppable.allow_external_drop);
    }
}
