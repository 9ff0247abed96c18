//! Page fixtures
//!
//! A page is described in JSON: the viewport, an optional hardware hint, and
//! the element tree with document-space layout rectangles.
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 800 },
//!   "body": [
//!     { "tag": "nav", "id": "navbar", "class": "navbar", "layout": { "top": 0, "height": 80 } },
//!     { "tag": "section", "id": "home", "class": "hero", "layout": { "top": 0, "height": 500 } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use folio_core::{Document, Element, NodeId, Rect};
use folio_platform::{Environment, Viewport};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A page description
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub hardware_concurrency: Option<u32>,
    #[serde(default)]
    pub body: Vec<NodeSpec>,
}

/// One element and its subtree
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Space-separated class list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub style: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

/// Layout rectangle in document coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    #[serde(default)]
    pub left: f32,
    pub top: f32,
    #[serde(default)]
    pub width: f32,
    pub height: f32,
}

impl From<LayoutSpec> for Rect {
    fn from(spec: LayoutSpec) -> Self {
        Rect::new(spec.left, spec.top, spec.width, spec.height)
    }
}

impl NodeSpec {
    fn element(&self) -> Element {
        let mut element = Element::new(self.tag.as_str());
        if let Some(id) = &self.id {
            element = element.with_id(id.as_str());
        }
        if let Some(class) = &self.class {
            element = element.with_classes(class);
        }
        for (name, value) in &self.attrs {
            element = element.with_attr(name.as_str(), value.as_str());
        }
        for (property, value) in &self.style {
            element = element.with_style(property.as_str(), value.as_str());
        }
        if !self.text.is_empty() {
            element = element.with_text(self.text.as_str());
        }
        if let Some(layout) = self.layout {
            element = element.with_layout(layout.into());
        }
        element
    }

    fn build(&self, doc: &mut Document, parent: NodeId) {
        let node = doc.append(parent, self.element());
        for child in &self.children {
            child.build(doc, node);
        }
    }
}

impl PageFixture {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Build a fresh document from the element tree
    pub fn build_document(&self) -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        for node in &self.body {
            node.build(&mut doc, body);
        }
        doc
    }

    /// Initial host environment for the page
    pub fn environment(&self) -> Environment {
        let env = Environment::new(self.viewport);
        match self.hardware_concurrency {
            Some(threads) => env.with_hardware_concurrency(threads),
            None => env,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"{
        "viewport": { "width": 390, "height": 844 },
        "hardware_concurrency": 2,
        "body": [
            {
                "tag": "section", "id": "skills", "class": "skills section",
                "layout": { "top": 1200, "height": 600 },
                "children": [
                    { "tag": "div", "class": "skill-progress", "attrs": { "data-level": "85" } }
                ]
            }
        ]
    }"##;

    #[test]
    fn test_build_document() {
        let fixture = PageFixture::from_json(PAGE).unwrap();
        let doc = fixture.build_document();

        let skills = doc.element_by_id("skills").unwrap();
        assert!(doc.has_class(skills, "section"));
        assert_eq!(doc.layout(skills), Some(Rect::new(0.0, 1200.0, 0.0, 600.0)));

        let bar = doc.query_selector("#skills .skill-progress").unwrap();
        assert_eq!(doc.attr(bar, "data-level").as_deref(), Some("85"));
    }

    #[test]
    fn test_environment() {
        let env = PageFixture::from_json(PAGE).unwrap().environment();
        assert_eq!(env.viewport, Viewport::new(390.0, 844.0));
        assert_eq!(env.hardware_concurrency, Some(2));
    }

    #[test]
    fn test_rejects_malformed_fixture() {
        assert!(matches!(
            PageFixture::from_json("{ \"body\": 3 }"),
            Err(AppError::Fixture(_))
        ));
    }
}
