//! Arena-backed document tree.
//!
//! Elements live in a flat `Vec` owned by [`Document`] and refer to each
//! other through [`ElementId`] indices, so parent back-links never create
//! ownership cycles. The tree is append-only; interaction state can be
//! toggled by the host between resolutions.
//!
//! ```rust
//! use cascade::document::{Document, Element, ElementState};
//!
//! let mut doc = Document::new();
//! let ul = doc.create_root(Element::new("ul"));
//! let first = doc.append_child(ul, Element::new("li").with_text("One"));
//! let second = doc.append_child(ul, Element::new("li").with_class("active"));
//!
//! assert_eq!(doc.parent(second), Some(ul));
//! assert_eq!(doc.previous_sibling(second), Some(first));
//! doc.set_state(second, ElementState::FOCUS);
//! assert!(doc[second].state.contains(ElementState::FOCUS));
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::Index;

use bitflags::bitflags;

bitflags! {
    /// Interaction state flags read by pseudo-class matching.
    ///
    /// These are owned by the host's event layer; the engine only reads them.
    ///
    /// ```
    /// use cascade::document::ElementState;
    ///
    /// let mut states = ElementState::empty();
    /// states |= ElementState::FOCUS;
    /// states |= ElementState::HOVER;
    ///
    /// assert!(states.contains(ElementState::FOCUS));
    /// assert!(!states.contains(ElementState::ACTIVE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ElementState: u16 {
        /// Element has keyboard focus
        const FOCUS    = 0b0000_0001;
        /// Pointer is over the element
        const HOVER    = 0b0000_0010;
        /// Element is being pressed
        const ACTIVE   = 0b0000_0100;
        /// Element is not interactive
        const DISABLED = 0b0000_1000;
        /// Checkbox/radio/option is selected
        const CHECKED  = 0b0001_0000;
    }
}

/// Index of an element inside its [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(usize);

/// A node in the document tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name, e.g. `"p"` or `"li"`.
    pub tag: String,
    /// Class names in insertion order, without duplicates.
    pub classes: Vec<String>,
    pub id: Option<String>,
    /// Attributes other than `id` and `class`.
    pub attributes: BTreeMap<String, String>,
    /// Direct text content. Only its presence matters (`:empty`).
    pub text: String,
    pub state: ElementState,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    /// Position within the parent's child list.
    sibling_index: usize,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets an attribute. `id` and `class` are routed to their dedicated
    /// fields so selectors see a single source of truth.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if name == "id" {
            self.id = Some(value);
        } else if name == "class" {
            for class in value.split_whitespace() {
                self = self.with_class(class);
            }
        } else {
            self.attributes.insert(name, value);
        }
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_state(mut self, state: ElementState) -> Self {
        self.state = state;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Looks up an attribute as selectors see it, including `id` and `class`.
    pub fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => self.id.as_deref().map(Cow::Borrowed),
            "class" if self.classes.is_empty() => None,
            "class" => Some(Cow::Owned(self.classes.join(" "))),
            _ => self.attributes.get(name).map(|v| Cow::Borrowed(v.as_str())),
        }
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// No element children and no text.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_empty()
    }
}

/// Owns every element of a tree (or forest).
#[derive(Clone, Debug, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Adds a parentless element.
    pub fn create_root(&mut self, element: Element) -> ElementId {
        self.push(element, None)
    }

    /// Adds `element` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn append_child(&mut self, parent: ElementId, element: Element) -> ElementId {
        let id = self.push(element, Some(parent));
        self.elements[parent.0].children.push(id);
        id
    }

    fn push(&mut self, mut element: Element, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.elements.len());
        element.parent = parent;
        element.children.clear();
        element.sibling_index = parent.map_or(0, |p| self.elements[p.0].children.len());
        self.elements.push(element);
        id
    }

    /// Non-panicking lookup, for ids that may come from another document.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Replaces an element's interaction state.
    pub fn set_state(&mut self, id: ElementId, state: ElementState) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.state = state;
        }
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self[id].parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self[id].children
    }

    pub fn previous_sibling(&self, id: ElementId) -> Option<ElementId> {
        let parent = self[id].parent?;
        let index = self[id].sibling_index;
        index
            .checked_sub(1)
            .map(|i| self.elements[parent.0].children[i])
    }

    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let parent = self[id].parent?;
        self.elements[parent.0]
            .children
            .get(self[id].sibling_index + 1)
            .copied()
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self[id].parent, move |&p| self[p].parent)
    }

    /// Earlier siblings, nearest first.
    pub fn preceding_siblings(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.previous_sibling(id), move |&s| self.previous_sibling(s))
    }

    /// Later siblings, nearest first.
    pub fn following_siblings(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.next_sibling(id), move |&s| self.next_sibling(s))
    }

    /// `id` and all of its descendants in pre-order.
    pub fn subtree(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self[next].children.iter().rev().copied());
        }
        out
    }
}

impl Index<ElementId> for Document {
    type Output = Element;

    fn index(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> (Document, ElementId, Vec<ElementId>) {
        let mut doc = Document::new();
        let ul = doc.create_root(Element::new("ul"));
        let items = (0..3)
            .map(|i| doc.append_child(ul, Element::new("li").with_text(format!("{i}"))))
            .collect();
        (doc, ul, items)
    }

    #[test]
    fn test_sibling_navigation() {
        let (doc, _, items) = list();
        assert_eq!(doc.previous_sibling(items[0]), None);
        assert_eq!(doc.previous_sibling(items[2]), Some(items[1]));
        assert_eq!(doc.next_sibling(items[2]), None);
        assert_eq!(
            doc.preceding_siblings(items[2]).collect::<Vec<_>>(),
            vec![items[1], items[0]]
        );
        assert_eq!(doc.following_siblings(items[0]).count(), 2);
    }

    #[test]
    fn test_get_rejects_foreign_ids() {
        let (doc, ul, items) = list();
        assert_eq!(doc.get(ul).map(|e| e.tag.as_str()), Some("ul"));
        assert_eq!(doc.get(items[2]).map(|e| e.text.as_str()), Some("2"));

        let mut small = Document::new();
        small.create_root(Element::new("p"));
        assert!(small.get(items[2]).is_none());
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let (mut doc, ul, items) = list();
        let input = doc.append_child(items[1], Element::new("input"));
        assert_eq!(doc.ancestors(input).collect::<Vec<_>>(), vec![items[1], ul]);
        assert_eq!(doc.ancestors(ul).count(), 0);
    }

    #[test]
    fn test_subtree_is_preorder() {
        let (mut doc, ul, items) = list();
        let input = doc.append_child(items[0], Element::new("input"));
        assert_eq!(
            doc.subtree(ul),
            vec![ul, items[0], input, items[1], items[2]]
        );
    }

    #[test]
    fn test_id_and_class_are_attributes() {
        let el = Element::new("p")
            .with_attr("class", "fizz buzz fizz")
            .with_attr("id", "foobar")
            .with_attr("title", "HAMMERTIME");
        assert_eq!(el.classes, vec!["fizz", "buzz"]);
        assert_eq!(el.attribute("id").as_deref(), Some("foobar"));
        assert_eq!(el.attribute("class").as_deref(), Some("fizz buzz"));
        assert_eq!(el.attribute("title").as_deref(), Some("HAMMERTIME"));
        assert_eq!(el.attribute("lang"), None);
    }

    #[test]
    fn test_emptiness_considers_text_and_children() {
        let (mut doc, ul, items) = list();
        let blank = doc.append_child(ul, Element::new("li"));
        assert!(doc[blank].is_empty());
        assert!(!doc[items[0]].is_empty());
        assert!(!doc[ul].is_empty());
    }
}
