//! Document model
//!
//! A slotmap arena of [`Element`]s rooted at `<body>`. Components read and
//! write the document exclusively through class, attribute, inline style and
//! text mutations; this is the same surface a stylesheet observes, so the
//! document doubles as the page's output.
//!
//! Every mutation helper on [`Document`] silently ignores stale handles.
//! A missing element is a normal condition for page markup, not an error.
//!
//! # Example
//!
//! ```rust
//! use folio_core::dom::{Document, Element};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let menu = doc.append(body, Element::new("ul").with_id("nav-menu"));
//! let link = doc.append(menu, Element::new("a").with_class("nav-link").with_attr("href", "#about"));
//!
//! assert_eq!(doc.element_by_id("nav-menu"), Some(menu));
//! assert!(doc.contains(menu, link));
//! assert_eq!(doc.closest(link, "#nav-menu"), Some(menu));
//! ```

use std::borrow::Cow;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::geometry::Rect;
use crate::selector::{ComplexSelector, CompoundSelector, SelectorList};

new_key_type! {
    /// Handle to an element in a [`Document`]
    pub struct NodeId;
}

/// A single element
#[derive(Clone, Debug, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 4]>,
    attributes: IndexMap<String, String>,
    style: IndexMap<String, String>,
    text: String,
    layout: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    /// Set the element id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class; whitespace separates several class names, as in `class="a b"`
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        for token in class.into().split_whitespace() {
            self.add_class(token);
        }
        self
    }

    /// Add several space-separated classes
    pub fn with_classes(self, classes: &str) -> Self {
        self.with_class(classes)
    }

    /// Set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set an inline style property
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    /// Set the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the layout rectangle (document coordinates)
    pub fn with_layout(mut self, layout: Rect) -> Self {
        self.layout = layout;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// The first class in source order (`className.split(' ')[0]`)
    pub fn first_class(&self) -> Option<&str> {
        self.classes.first().map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    /// Attribute lookup; `id` and `class` resolve to the element's id and class list
    pub fn attr(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => self.id.as_deref().map(Cow::Borrowed),
            "class" if !self.classes.is_empty() => Some(Cow::Owned(self.classes.join(" "))),
            "class" => None,
            _ => self.attributes.get(name).map(|v| Cow::Borrowed(v.as_str())),
        }
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn styles(&self) -> &IndexMap<String, String> {
        &self.style
    }

    /// Set an inline style property; an empty value removes it
    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.style.shift_remove(property);
        } else {
            self.style.insert(property.to_string(), value);
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn layout(&self) -> Rect {
        self.layout
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    fn matches_compound(&self, compound: &CompoundSelector) -> bool {
        if let Some(tag) = &compound.tag {
            if !self.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &compound.id {
            if self.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !compound.classes.iter().all(|class| self.has_class(class)) {
            return false;
        }
        compound
            .attrs
            .iter()
            .all(|attr| attr.matches(self.attr(&attr.name).as_deref()))
    }
}

/// Serializable view of a subtree, used for CLI output and assertions
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub style: IndexMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

/// The element tree
pub struct Document {
    nodes: SlotMap<NodeId, Element>,
    body: NodeId,
    ids: FxHashMap<String, NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("ids", &self.ids.len())
            .finish()
    }
}

impl Document {
    /// Create an empty document containing only `<body>`
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(Element::new("body"));
        Self {
            nodes,
            body,
            ids: FxHashMap::default(),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node)
    }

    pub fn exists(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    // =========================================================================
    // Tree mutation
    // =========================================================================

    /// Append `element` as the last child of `parent`
    ///
    /// If the element's id is already taken the newer element wins the id
    /// lookup (last-wins), matching `getElementById` on duplicate ids.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.insert_child(parent, element, None)
    }

    /// Insert `element` as the first child of `parent`
    pub fn prepend(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.insert_child(parent, element, Some(0))
    }

    fn insert_child(&mut self, parent: NodeId, mut element: Element, index: Option<usize>) -> NodeId {
        let parent = if self.nodes.contains_key(parent) {
            parent
        } else {
            tracing::debug!("insert into stale parent; attaching to body instead");
            self.body
        };
        element.parent = Some(parent);
        element.children.clear();
        let id = element.id.clone();
        let node = self.nodes.insert(element);

        if let Some(id) = id {
            if self.ids.insert(id.clone(), node).is_some() {
                tracing::debug!("duplicate element id {:?}", id);
            }
        }

        let children = &mut self.nodes[parent].children;
        match index {
            Some(i) => children.insert(i.min(children.len()), node),
            None => children.push(node),
        }
        node
    }

    /// Deep-copy the subtree rooted at `source` under `parent`
    ///
    /// Ids are not copied, so clones never shadow the original in id lookups.
    pub fn clone_subtree(&mut self, source: NodeId, parent: NodeId) -> Option<NodeId> {
        let mut element = self.nodes.get(source)?.clone();
        let children = std::mem::take(&mut element.children);
        element.id = None;
        let copy = self.append(parent, element);
        for child in children {
            self.clone_subtree(child, copy);
        }
        Some(copy)
    }

    /// Remove a node and its subtree; returns false if it was already gone
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.body || !self.nodes.contains_key(node) {
            return false;
        }
        if let Some(parent) = self.nodes[node].parent {
            if let Some(parent) = self.nodes.get_mut(parent) {
                parent.children.retain(|c| *c != node);
            }
        }

        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.nodes.remove(current) {
                if let Some(id) = element.id {
                    if self.ids.get(&id) == Some(&current) {
                        self.ids.remove(&id);
                    }
                }
                stack.extend(element.children);
            }
        }
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids
            .get(id)
            .copied()
            .filter(|node| self.nodes.contains_key(*node))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|e| e.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map(|e| e.children()).unwrap_or(&[])
    }

    /// All descendants of `root` in document (pre-)order, excluding `root`
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Whether `node` is `ancestor` or inside it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Test a node against a parsed selector
    pub fn matches(&self, node: NodeId, selector: &SelectorList) -> bool {
        selector
            .selectors
            .iter()
            .any(|complex| self.matches_complex(node, complex))
    }

    fn matches_complex(&self, node: NodeId, complex: &ComplexSelector) -> bool {
        let Some(element) = self.nodes.get(node) else {
            return false;
        };
        if !element.matches_compound(complex.subject()) {
            return false;
        }

        let mut current = element.parent;
        for compound in complex.ancestors() {
            loop {
                let Some(ancestor) = current.and_then(|n| self.nodes.get(n).map(|e| (n, e))) else {
                    return false;
                };
                current = ancestor.1.parent;
                if ancestor.1.matches_compound(compound) {
                    break;
                }
            }
        }
        true
    }

    /// Every element in the document matching `selector`, in document order
    ///
    /// An unparsable selector matches nothing.
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_within(self.body, selector)
    }

    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Descendants of `root` matching `selector`, in document order
    pub fn query_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        match SelectorList::parse(selector) {
            Ok(list) => self.select_within(root, &list),
            Err(err) => {
                tracing::warn!("{}", err);
                Vec::new()
            }
        }
    }

    pub fn select_within(&self, root: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|node| self.matches(*node, selector))
            .collect()
    }

    /// Nearest inclusive ancestor of `node` matching `selector`
    pub fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let list = SelectorList::parse(selector).ok()?;
        let mut current = Some(node);
        while let Some(n) = current {
            if self.matches(n, &list) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    // =========================================================================
    // Element state (no-ops on stale handles)
    // =========================================================================

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes.get(node).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get_mut(node)
            .is_some_and(|e| e.add_class(class))
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get_mut(node)
            .is_some_and(|e| e.remove_class(class))
    }

    /// Force a class on or off
    pub fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Flip a class; returns whether it is now present
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let on = !self.has_class(node, class);
        self.set_class(node, class, on);
        on && self.exists(node)
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes
            .get(node)
            .and_then(|e| e.attr(name).map(Cow::into_owned))
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.nodes.get_mut(node) {
            element.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.nodes.get_mut(node) {
            element.attributes.shift_remove(name);
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes.get(node).and_then(|e| e.style(property))
    }

    /// Set an inline style property; an empty value clears it
    pub fn set_style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        if let Some(element) = self.nodes.get_mut(node) {
            element.set_style(property, value);
        }
    }

    pub fn clear_style(&mut self, node: NodeId, property: &str) {
        self.set_style(node, property, String::new());
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|e| e.text())
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(element) = self.nodes.get_mut(node) {
            element.text = text.into();
        }
    }

    pub fn layout(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(node).map(|e| e.layout)
    }

    pub fn set_layout(&mut self, node: NodeId, layout: Rect) {
        if let Some(element) = self.nodes.get_mut(node) {
            element.layout = layout;
        }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub fn snapshot(&self) -> NodeSnapshot {
        self.snapshot_node(self.body)
            .unwrap_or_else(|| NodeSnapshot {
                tag: "body".into(),
                id: None,
                classes: Vec::new(),
                attributes: IndexMap::new(),
                style: IndexMap::new(),
                text: String::new(),
                children: Vec::new(),
            })
    }

    pub fn snapshot_node(&self, node: NodeId) -> Option<NodeSnapshot> {
        let element = self.nodes.get(node)?;
        Some(NodeSnapshot {
            tag: element.tag.clone(),
            id: element.id.clone(),
            classes: element.classes.iter().cloned().collect(),
            attributes: element.attributes.clone(),
            style: element.style.clone(),
            text: element.text.clone(),
            children: element
                .children
                .iter()
                .filter_map(|child| self.snapshot_node(*child))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let hero = doc.append(
            body,
            Element::new("section")
                .with_id("home")
                .with_classes("hero section")
                .with_layout(Rect::band(0.0, 500.0)),
        );
        let bg = doc.append(hero, Element::new("div").with_class("animated-bg"));
        let particle = doc.append(bg, Element::new("div").with_class("particle"));
        doc.append(
            body,
            Element::new("section")
                .with_id("about")
                .with_class("about")
                .with_layout(Rect::band(500.0, 500.0)),
        );
        (doc, hero, bg, particle)
    }

    #[test]
    fn test_query_in_document_order() {
        let (doc, hero, _, _) = sample();
        let sections = doc.query_selector_all("section[id]");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0], hero);
    }

    #[test]
    fn test_descendant_selector() {
        let (mut doc, _, _, particle) = sample();
        let body = doc.body();
        doc.append(body, Element::new("div").with_class("particle"));

        assert_eq!(doc.query_selector_all(".particle").len(), 2);
        assert_eq!(doc.query_selector_all(".hero .particle"), vec![particle]);
    }

    #[test]
    fn test_class_attribute_presence() {
        let (mut doc, _, _, _) = sample();
        let body = doc.body();
        doc.append(body, Element::new("section").with_id("bare"));
        assert_eq!(doc.query_selector_all("section[class]").len(), 2);
    }

    #[test]
    fn test_closest_and_contains() {
        let (doc, hero, bg, particle) = sample();
        assert_eq!(doc.closest(particle, "section[class]"), Some(hero));
        assert_eq!(doc.closest(bg, ".animated-bg"), Some(bg));
        assert!(doc.contains(hero, particle));
        assert!(!doc.contains(particle, hero));
    }

    #[test]
    fn test_remove_unregisters_ids() {
        let (mut doc, hero, _, particle) = sample();
        assert!(doc.remove(hero));
        assert!(doc.element_by_id("home").is_none());
        assert!(!doc.exists(particle));
        assert!(!doc.remove(hero));
        // Mutations on stale handles are ignored
        assert!(!doc.add_class(hero, "active"));
    }

    #[test]
    fn test_style_empty_value_clears() {
        let (mut doc, hero, _, _) = sample();
        doc.set_style(hero, "opacity", "0");
        assert_eq!(doc.style(hero, "opacity"), Some("0"));
        doc.set_style(hero, "opacity", "");
        assert_eq!(doc.style(hero, "opacity"), None);
    }

    #[test]
    fn test_clone_subtree_drops_ids() {
        let (mut doc, hero, bg, _) = sample();
        let about = doc.element_by_id("about").unwrap();
        let copy = doc.clone_subtree(bg, about).unwrap();
        assert_eq!(doc.children(copy).len(), 1);
        assert_eq!(doc.query_selector_all(".animated-bg").len(), 2);
        assert_eq!(doc.element_by_id("home"), Some(hero));
    }

    #[test]
    fn test_with_class_splits_on_whitespace() {
        let mut doc = Document::new();
        let body = doc.body();
        let button = doc.append(body, Element::new("button").with_class("btn  btn-submit"));

        assert!(doc.has_class(button, "btn"));
        assert!(doc.has_class(button, "btn-submit"));
        assert!(!doc.has_class(button, "btn  btn-submit"));
        assert_eq!(doc.query_selector(".btn-submit"), Some(button));
        assert_eq!(doc.attr(button, "class").as_deref(), Some("btn btn-submit"));

        let empty = Element::new("div").with_class("   ");
        assert_eq!(empty.classes().count(), 0);
    }

    #[test]
    fn test_prepend_is_first_child() {
        let (mut doc, hero, bg, _) = sample();
        let first = doc.prepend(hero, Element::new("div").with_class("form-message"));
        assert_eq!(doc.children(hero), &[first, bg]);
    }
}
