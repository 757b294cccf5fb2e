//! The chainable element collection
//!
//! Every traversal follows one protocol: map each held element through a
//! per-element step, drop absent results, then replace the collection's
//! contents wholesale with what is left ([`Collection::update`]). Traversals
//! consume the collection and hand the same value back, so calls chain:
//!
//! ```text
//! query.select("li.active")?.next_all().filter(".enabled")?.set_css([("color", "red")])?
//! ```

use crate::capabilities::{Capabilities, Direction};
use crate::document::Document;
use crate::element::Element;
use ahash::AHashSet;
use dom::{DomArena, NodeId, Result, SelectorList, StyleDeclarations};
use std::ops::Deref;

/// Ordered set of element ids over a shared [`Document`]
#[derive(Debug, Clone)]
pub struct Collection {
    document: Document,
    capabilities: Capabilities,
    nodes: Vec<NodeId>,
}

impl Collection {
    pub(crate) fn empty(document: Document, capabilities: Capabilities) -> Self {
        Self {
            document,
            capabilities,
            nodes: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn into_vec(self) -> Vec<NodeId> {
        self.nodes
    }

    /// Replace the contents with `updates`, in order
    ///
    /// Absent candidates (`None`, or ids the document does not hold) are
    /// skipped, so the collection never holds a dangling entry.
    pub fn update<I, T>(&mut self, updates: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<NodeId>>,
    {
        self.nodes.clear();
        let arena = self.document.borrow();
        for candidate in updates {
            if let Some(node_id) = candidate.into() {
                if arena.contains(node_id) {
                    self.nodes.push(node_id);
                }
            }
        }
        drop(arena);
        tracing::trace!("collection updated: {} element(s)", self.nodes.len());
        self
    }

    /// A one-element collection over the same document
    fn wrap_one(&self, node_id: NodeId) -> Collection {
        let mut single = Collection::empty(self.document.clone(), self.capabilities);
        single.update([node_id]);
        single
    }

    /// Map every held element to zero or one replacement
    fn map_compact<F>(mut self, mut step: F) -> Self
    where
        F: FnMut(&DomArena, NodeId) -> Option<NodeId>,
    {
        let results: Vec<Option<NodeId>> = {
            let arena = self.document.borrow();
            self.nodes.iter().map(|&id| step(&*arena, id)).collect()
        };
        self.update(results);
        self
    }

    /// Descendants of each held element matching `selector`, flattened in
    /// order
    pub fn find(mut self, selector: &str) -> Result<Self> {
        let selector = SelectorList::parse(selector)?;
        let found = {
            let arena = self.document.borrow();
            let mut found = Vec::new();
            for &id in &self.nodes {
                found.extend(arena.select_all(id, &selector)?);
            }
            found
        };
        tracing::debug!("find '{}': {} -> {}", selector.as_str(), self.nodes.len(), found.len());
        self.update(found);
        Ok(self)
    }

    /// Keep the elements matching `selector`
    pub fn filter(mut self, selector: &str) -> Result<Self> {
        let selector = SelectorList::parse(selector)?;
        let matcher = self.capabilities.matcher;
        let kept: Vec<NodeId> = {
            let arena = self.document.borrow();
            self.nodes
                .iter()
                .copied()
                .filter(|&id| matcher.matches(&arena, id, &selector))
                .collect()
        };
        self.update(kept);
        Ok(self)
    }

    /// Keep the elements for which `predicate(element, index)` holds;
    /// `index` is the position inside this collection
    pub fn filter_by<F>(mut self, mut predicate: F) -> Self
    where
        F: FnMut(&Element<'_>, usize) -> bool,
    {
        let kept: Vec<NodeId> = {
            let arena = self.document.borrow();
            self.nodes
                .iter()
                .enumerate()
                .filter(|&(index, &id)| predicate(&Element::new(&arena, id), index))
                .map(|(_, &id)| id)
                .collect()
        };
        self.update(kept);
        self
    }

    /// Other element children of each element's parent, without duplicates
    pub fn siblings(mut self) -> Self {
        let results: Vec<NodeId> = {
            let arena = self.document.borrow();
            let mut seen = AHashSet::new();
            let mut results = Vec::new();
            for &id in &self.nodes {
                let parent_id = match arena.get(id).ok().and_then(|node| node.parent_id) {
                    Some(parent_id) => parent_id,
                    None => continue,
                };
                for child in arena.element_children(parent_id).unwrap_or_default() {
                    if child != id && seen.insert(child) {
                        results.push(child);
                    }
                }
            }
            results
        };
        self.update(results);
        self
    }

    fn step(self, direction: Direction) -> Self {
        let siblings = self.capabilities.siblings;
        self.map_compact(|arena, id| siblings.step(arena, id, direction))
    }

    /// Following element sibling of each element
    pub fn next(self) -> Self {
        self.step(Direction::Next)
    }

    /// Preceding element sibling of each element
    pub fn prev(self) -> Self {
        self.step(Direction::Previous)
    }

    fn step_all(mut self, direction: Direction) -> Self {
        let mut results = Vec::new();
        for &id in &self.nodes {
            let mut current = id;
            loop {
                let stepped = self.wrap_one(current).step(direction);
                match stepped.nodes.first() {
                    Some(&found) => {
                        results.push(found);
                        current = found;
                    }
                    None => break,
                }
            }
        }
        self.update(results);
        self
    }

    /// Every following element sibling, nearest first
    pub fn next_all(self) -> Self {
        self.step_all(Direction::Next)
    }

    /// Every preceding element sibling, nearest first
    pub fn prev_all(self) -> Self {
        self.step_all(Direction::Previous)
    }

    /// Nearest ancestor of each element matching `selector`; the element
    /// itself is not considered
    pub fn closest(self, selector: &str) -> Result<Self> {
        let selector = SelectorList::parse(selector)?;
        let matcher = self.capabilities.matcher;
        Ok(self.map_compact(|arena, id| {
            let mut current = id;
            while let Some(parent) = arena.get(current).ok().and_then(|node| node.parent_id) {
                if matcher.matches(arena, parent, &selector) {
                    return Some(parent);
                }
                current = parent;
            }
            None
        }))
    }

    /// True iff the collection is non-empty and every element matches
    pub fn is(&self, selector: &str) -> Result<bool> {
        let selector = SelectorList::parse(selector)?;
        if self.nodes.is_empty() {
            return Ok(false);
        }
        let arena = self.document.borrow();
        let matcher = self.capabilities.matcher;
        Ok(self
            .nodes
            .iter()
            .all(|&id| matcher.matches(&arena, id, &selector)))
    }

    /// Text of each element, in collection order
    pub fn text(&self) -> Result<Vec<String>> {
        let arena = self.document.borrow();
        let text = self.capabilities.text;
        self.nodes.iter().map(|&id| text.read(&arena, id)).collect()
    }

    /// Replace the contents of every element with `value`
    pub fn set_text(self, value: &str) -> Result<Self> {
        {
            let mut arena = self.document.borrow_mut();
            for &id in &self.nodes {
                self.capabilities.text.write(&mut arena, id, value)?;
            }
        }
        tracing::debug!("set text on {} element(s)", self.nodes.len());
        Ok(self)
    }

    /// Style value of the first element; `None` when empty or unset
    pub fn css(&self, property: &str) -> Result<Option<String>> {
        let first = match self.nodes.first() {
            Some(&first) => first,
            None => return Ok(None),
        };
        let mut arena = self.document.borrow_mut();
        self.capabilities.style.read(&mut arena, first, property)
    }

    /// Merge declarations into every element's inline style
    pub fn set_css<I, K, V>(self, rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let rules: StyleDeclarations = rules.into_iter().collect();
        {
            let mut arena = self.document.borrow_mut();
            for &id in &self.nodes {
                let mut style = arena.inline_style(id)?;
                style.merge(&rules);
                arena.set_inline_style(id, &style)?;
            }
        }
        tracing::debug!(
            "set css '{}' on {} element(s)",
            rules.to_css_text(),
            self.nodes.len()
        );
        Ok(self)
    }
}

impl Deref for Collection {
    type Target = [NodeId];

    fn deref(&self) -> &[NodeId] {
        &self.nodes
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl IntoIterator for Collection {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}
