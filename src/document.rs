//! Applying the resolved mode to a document.
//!
//! The document is reached through the [`Document`] trait; hosts implement
//! it over their real DOM. [`MemoryDocument`] keeps the same state in memory
//! and can render it as HTML attributes for server-side output.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::theme::{palette, ColorMode};

/// Marker class set on the root and body while dark mode is active.
pub const DEFAULT_DARK_CLASS: &str = "dark";

/// The two nodes the theme is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentNode {
    /// The document element (`<html>`).
    Root,
    Body,
}

/// The mutation surface of a document.
pub trait Document {
    /// Adds (`enabled`) or removes a class on a node.
    fn set_class(&mut self, node: DocumentNode, class: &str, enabled: bool);

    /// Sets one inline style property on a node.
    fn set_style(&mut self, node: DocumentNode, property: &str, value: &str);
}

/// Applies a resolved mode using the default marker class.
pub fn apply(doc: &mut dyn Document, resolved: ColorMode) {
    apply_with(doc, resolved, DEFAULT_DARK_CLASS);
}

/// Applies a resolved mode: toggles `dark_class` on root and body and sets
/// the body's inline text color from the mode's palette.
///
/// Applying the same mode twice leaves the document as applying it once.
pub fn apply_with(doc: &mut dyn Document, resolved: ColorMode, dark_class: &str) {
    let dark = resolved.is_dark();
    doc.set_class(DocumentNode::Root, dark_class, dark);
    doc.set_class(DocumentNode::Body, dark_class, dark);
    doc.set_style(DocumentNode::Body, "color", palette(resolved).text.primary);
}

/// An in-memory [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    classes: HashMap<DocumentNode, BTreeSet<String>>,
    styles: HashMap<DocumentNode, BTreeMap<String, String>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, node: DocumentNode, class: &str) -> bool {
        self.classes
            .get(&node)
            .is_some_and(|classes| classes.contains(class))
    }

    pub fn style(&self, node: DocumentNode, property: &str) -> Option<&str> {
        self.styles
            .get(&node)
            .and_then(|styles| styles.get(property))
            .map(String::as_str)
    }

    /// The node's `class` attribute value, classes sorted.
    pub fn class_attr(&self, node: DocumentNode) -> String {
        self.classes
            .get(&node)
            .map(|classes| classes.iter().map(String::as_str).collect::<Vec<_>>().join(" "))
            .unwrap_or_default()
    }

    /// The node's `style` attribute value, properties sorted.
    pub fn style_attr(&self, node: DocumentNode) -> String {
        self.styles
            .get(&node)
            .map(|styles| {
                styles
                    .iter()
                    .map(|(k, v)| format!("{k}: {v};"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }
}

impl Document for MemoryDocument {
    fn set_class(&mut self, node: DocumentNode, class: &str, enabled: bool) {
        let classes = self.classes.entry(node).or_default();
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn set_style(&mut self, node: DocumentNode, property: &str, value: &str) {
        self.styles
            .entry(node)
            .or_default()
            .insert(property.to_string(), value.to_string());
    }
}
