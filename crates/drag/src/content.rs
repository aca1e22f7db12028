//! Turning dropped data into component definitions.
//!
//! The host forwards the drag payload as a [`DataTransfer`]: the MIME types
//! offered by the drag source, their string data and any dropped files.
//! [`content_by_data`] picks the richest representation it understands.

use node::{Component, ComponentDef};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedFile {
    pub name: String,
    /// MIME type, e.g. `image/png`
    #[serde(rename = "type")]
    pub mime: String,
}

/// Payload of an external drag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataTransfer {
    pub types: Vec<String>,
    pub data: BTreeMap<String, String>,
    pub files: Vec<DroppedFile>,
}

impl DataTransfer {
    pub fn with_data(mut self, format: impl Into<String>, value: impl Into<String>) -> Self {
        let format = format.into();
        if !self.types.contains(&format) {
            self.types.push(format.clone());
        }
        self.data.insert(format, value.into());
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, mime: impl Into<String>) -> Self {
        if !self.types.iter().any(|t| t == "Files") {
            self.types.push("Files".to_string());
        }
        self.files.push(DroppedFile {
            name: name.into(),
            mime: mime.into(),
        });
        self
    }

    pub fn has_type(&self, format: &str) -> bool {
        self.types.iter().any(|t| t == format)
    }

    /// Data for `format`; `text` and `url` are aliases of `text/plain` and
    /// `text/uri-list`
    pub fn get_data(&self, format: &str) -> &str {
        let format = match format {
            "text" => "text/plain",
            "url" => "text/uri-list",
            other => other,
        };
        self.data.get(format).map(String::as_str).unwrap_or("")
    }
}

/// Content carried by a drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DropContent {
    /// Markup, kept as the content of a single component
    Html(String),
    Components(Vec<ComponentDef>),
    Component(Box<ComponentDef>),
}

impl DropContent {
    pub fn component(def: ComponentDef) -> Self {
        DropContent::Component(Box::new(def))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DropContent::Html(html) => html.trim().is_empty(),
            DropContent::Components(defs) => defs.is_empty(),
            DropContent::Component(_) => false,
        }
    }

    /// The definition realized by a drop. Only the first entry of a list is
    /// used.
    pub fn first_def(&self) -> Option<ComponentDef> {
        match self {
            DropContent::Html(html) if html.trim().is_empty() => None,
            DropContent::Html(html) => Some(ComponentDef {
                content: html.clone(),
                ..ComponentDef::of_kind(Component::DEFAULT_KIND)
            }),
            DropContent::Component(def) => Some(def.as_ref().clone()),
            DropContent::Components(defs) => {
                if defs.len() > 1 {
                    log::debug!("dropping the first of {} components", defs.len());
                }
                defs.first().cloned()
            }
        }
    }
}

/// Result of [`content_by_data`], handed to the data hook before use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragDataResult {
    pub content: Option<DropContent>,
}

/// Content for a drop, by priority: image files, the preset drag content,
/// `text/html` without `<meta>` tags, a link for `text/uri-list`, parsed
/// `text/json`, and plain text wrapped in a `<div>`.
pub fn content_by_data(
    transfer: Option<&DataTransfer>,
    preset: Option<&DropContent>,
) -> DragDataResult {
    let text = transfer.map(|dt| dt.get_data("text")).unwrap_or("");
    let mut content = (!text.is_empty()).then(|| DropContent::Html(text.to_string()));

    if let Some(dt) = transfer.filter(|dt| !dt.files.is_empty()) {
        let images: Vec<ComponentDef> = dt
            .files
            .iter()
            .filter(|file| file.mime.split('/').next() == Some("image"))
            .map(|file| {
                let mut def = ComponentDef::of_kind(Component::IMAGE_KIND);
                def.attributes.insert("alt".to_string(), file.name.clone());
                def
            })
            .collect();
        content = (!images.is_empty()).then_some(DropContent::Components(images));
    } else if let Some(preset) = preset {
        content = Some(preset.clone());
    } else if let Some(dt) = transfer {
        if dt.has_type("text/html") {
            content = Some(DropContent::Html(strip_meta(dt.get_data("text/html"))));
        } else if dt.has_type("text/uri-list") {
            let href = if text.is_empty() {
                dt.get_data("text/uri-list").lines().next().unwrap_or("")
            } else {
                text
            };
            let mut def = ComponentDef::of_kind(Component::LINK_KIND);
            def.attributes.insert("href".to_string(), href.to_string());
            def.content = href.to_string();
            content = Some(DropContent::component(def));
        } else if dt.has_type("text/json") {
            content = match serde_json::from_str::<DropContent>(dt.get_data("text/json")) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    log::warn!("ignoring dropped JSON: {err}");
                    None
                }
            };
        } else if dt.types.len() == 1 && dt.types[0] == "text/plain" {
            content = Some(DropContent::Html(format!("<div>{text}</div>")));
        }
    }

    DragDataResult { content }
}

fn strip_meta(html: &str) -> String {
    static META: OnceLock<Option<Regex>> = OnceLock::new();
    let meta = META.get_or_init(|| Regex::new(r"</?meta[^>]*>").ok());
    match meta {
        Some(re) => re.replace_all(html, "").into_owned(),
        None => html.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_files_win() {
        let dt = DataTransfer::default()
            .with_data("text/plain", "ignored")
            .with_file("cat.png", "image/png")
            .with_file("notes.txt", "text/plain");
        let content = content_by_data(Some(&dt), None).content.unwrap();

        let DropContent::Components(defs) = content else {
            panic!("expected components");
        };
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].kind.as_deref(), Some("image"));
        assert_eq!(defs[0].attributes.get("alt").map(String::as_str), Some("cat.png"));
    }

    #[test]
    fn test_preset_content_beats_transfer_data() {
        let preset = DropContent::Html("<b>block</b>".into());
        let dt = DataTransfer::default().with_data("text/html", "<i>x</i>");
        assert_eq!(content_by_data(Some(&dt), Some(&preset)).content, Some(preset));
    }

    #[test]
    fn test_html_strips_meta() {
        let dt = DataTransfer::default()
            .with_data("text/html", "<meta charset=\"utf-8\"><p>Hi</p></meta>");
        assert_eq!(
            content_by_data(Some(&dt), None).content,
            Some(DropContent::Html("<p>Hi</p>".into()))
        );
    }

    #[test]
    fn test_uri_list_becomes_link() {
        let dt = DataTransfer::default()
            .with_data("text/uri-list", "https://example.com")
            .with_data("text/plain", "https://example.com");
        let def = content_by_data(Some(&dt), None)
            .content
            .and_then(|c| c.first_def())
            .unwrap();
        assert_eq!(def.kind.as_deref(), Some("link"));
        assert_eq!(def.content, "https://example.com");
    }

    #[test]
    fn test_json_and_plain_text() {
        let dt = DataTransfer::default().with_data("text/json", r#"{"type": "text", "content": "Hi"}"#);
        let def = content_by_data(Some(&dt), None)
            .content
            .and_then(|c| c.first_def())
            .unwrap();
        assert_eq!(def.kind.as_deref(), Some("text"));

        let dt = DataTransfer::default().with_data("text/plain", "Hello");
        assert_eq!(
            content_by_data(Some(&dt), None).content,
            Some(DropContent::Html("<div>Hello</div>".into()))
        );
    }

    #[test]
    fn test_first_def_keeps_first_entry() {
        let content = DropContent::Components(vec![
            ComponentDef::of_kind("text"),
            ComponentDef::of_kind("image"),
        ]);
        assert_eq!(content.first_def().unwrap().kind.as_deref(), Some("text"));
        assert!(DropContent::Html("  ".into()).first_def().is_none());
    }
}
