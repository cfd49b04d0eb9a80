use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Class marking an element as not displayed.
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,

    // Content
    pub content: Content,

    // Attributes
    pub classes: Vec<String>,
    /// `data-*` attributes, stored without the `data-` prefix.
    pub data: HashMap<String, String>,

    // Form state
    /// Checked state for checkbox inputs.
    pub checked: bool,
    /// Current value for text inputs and selects.
    pub value: String,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: "div".to_string(),
            content: Content::None,
            classes: Vec::new(),
            data: HashMap::new(),
            checked: false,
            value: String::new(),
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn label() -> Self {
        Self::new("label")
    }

    pub fn button(text: impl Into<String>) -> Self {
        Self::new("button").text(text)
    }

    pub fn table() -> Self {
        Self::new("table")
    }

    pub fn thead() -> Self {
        Self::new("thead")
    }

    pub fn tbody() -> Self {
        Self::new("tbody")
    }

    pub fn tr() -> Self {
        Self::new("tr")
    }

    pub fn th() -> Self {
        Self::new("th")
    }

    /// A bare text node, used when text and child elements share a parent.
    pub fn text_node(text: impl Into<String>) -> Self {
        Self::new("#text").text(text)
    }

    pub fn td(text: impl Into<String>) -> Self {
        Self::new("td").text(text)
    }

    /// Create a checkbox input.
    pub fn checkbox(checked: bool) -> Self {
        Self::new("input").checked(checked).data("type", "checkbox")
    }

    /// Create a text input.
    pub fn text_input(value: impl Into<String>) -> Self {
        Self::new("input").value(value).data("type", "text")
    }

    /// Create a select element holding the given value.
    pub fn select(value: impl Into<String>) -> Self {
        Self::new("select").value(value)
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        for child in new_children {
            self.push_child(child);
        }
        self
    }

    /// Append a child in place. Existing text is kept as a leading text node.
    pub fn push_child(&mut self, child: Element) {
        match std::mem::take(&mut self.content) {
            Content::Children(mut children) => {
                children.push(child);
                self.content = Content::Children(children);
            }
            Content::Text(text) => {
                self.content = Content::Children(vec![Element::text_node(text), child]);
            }
            Content::None => self.content = Content::Children(vec![child]),
        }
    }

    /// Direct children, empty for text and empty elements.
    pub fn child_nodes(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Direct children as a mutable vector, `None` unless the element holds children.
    pub fn child_nodes_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.content {
            Content::Children(children) => Some(children),
            _ => None,
        }
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        self.content.text()
    }

    // Classes
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggle a class, returning whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class(HIDDEN_CLASS)
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden {
            self.add_class(HIDDEN_CLASS);
        } else {
            self.remove_class(HIDDEN_CLASS);
        }
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn remove_data(&mut self, key: &str) -> Option<String> {
        self.data.remove(key)
    }

    // Form state
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}
