//! Arena-based DOM tree storage
//!
//! "Bad programmers worry about the code. Good programmers worry about
//! data structures and their relationships."
//!
//! This arena eliminates:
//! - Rc/Arc overhead (16 bytes per pointer)
//! - Recursive function calls (stack overflow risk)
//! - Cache misses (nodes stored sequentially)
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<DomNode>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//! ```
//!
//! Nodes are never freed. Detached nodes stay in the arena with no parent,
//! so ids handed out earlier remain valid.

use crate::error::{DomError, Result};
use crate::features::RuntimeFeatures;
use crate::selector::SelectorList;
use crate::style::{self, StyleDeclarations};
use crate::types::{DomNode, NodeId, NodeType, NON_RENDERED_TEXT_ELEMENTS};

/// Arena allocator for DOM nodes
#[derive(Debug)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly)
    nodes: Vec<DomNode>,

    /// Root node ID (if set)
    root_id: Option<NodeId>,

    /// Capabilities this tree advertises to its consumers
    features: RuntimeFeatures,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self::with_capacity(1024) // Pre-allocate for typical page
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root_id: None,
            features: RuntimeFeatures::default(),
        }
    }

    pub fn with_features(features: RuntimeFeatures) -> Self {
        Self {
            features,
            ..Self::new()
        }
    }

    pub fn features(&self) -> &RuntimeFeatures {
        &self.features
    }

    /// Add a node to the arena, returns its ID
    pub fn add_node(&mut self, mut node: DomNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        node.node_id = node_id;
        self.nodes.push(node);
        node_id
    }

    pub fn create_document(&mut self) -> NodeId {
        self.add_node(DomNode::new(NodeType::Document, "#document".to_string()))
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.add_node(DomNode::new(NodeType::Element, tag.to_ascii_lowercase()))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        let mut node = DomNode::new(NodeType::Text, "#text".to_string());
        node.node_value = text.to_string();
        self.add_node(node)
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        let mut node = DomNode::new(NodeType::Comment, "#comment".to_string());
        node.node_value = text.to_string();
        self.add_node(node)
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        (node_id as usize) < self.nodes.len()
    }

    /// Set root node
    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        // Verify node exists
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    /// Get root node ID
    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    /// Total number of nodes, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all nodes
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        let parent = self.get(parent_id)?;
        if !parent.node_type.is_container() {
            return Err(DomError::InvalidNodeType {
                expected: "element, document or fragment".to_string(),
                actual: format!("{:?}", parent.node_type),
            });
        }
        self.get(child_id)?;

        // A node may not become its own ancestor
        let mut current = Some(parent_id);
        while let Some(id) = current {
            if id == child_id {
                return Err(DomError::InvalidNodeType {
                    expected: "node outside the parent's ancestor chain".to_string(),
                    actual: format!("ancestor {}", child_id),
                });
            }
            current = self.get(id)?.parent_id;
        }

        self.detach(child_id)?;
        self.get_mut(parent_id)?.children_ids.push(child_id);
        self.get_mut(child_id)?.parent_id = Some(parent_id);
        Ok(())
    }

    /// Remove a node from its parent; the node stays in the arena
    pub fn detach(&mut self, node_id: NodeId) -> Result<()> {
        let parent_id = match self.get(node_id)?.parent_id {
            Some(parent_id) => parent_id,
            None => return Ok(()),
        };
        self.get_mut(parent_id)?
            .children_ids
            .retain(|child| *child != node_id);
        self.get_mut(node_id)?.parent_id = None;
        Ok(())
    }

    /// Detach every child of a node
    pub fn remove_children(&mut self, node_id: NodeId) -> Result<()> {
        let children = std::mem::take(&mut self.get_mut(node_id)?.children_ids);
        for child_id in children {
            self.get_mut(child_id)?.parent_id = None;
        }
        Ok(())
    }

    /// Get children of a node
    pub fn children(&self, node_id: NodeId) -> Result<Vec<&DomNode>> {
        let node = self.get(node_id)?;
        node.children_ids
            .iter()
            .map(|&child_id| self.get(child_id))
            .collect()
    }

    /// Child elements only (the DOM `children` collection)
    pub fn element_children(&self, node_id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self
            .children(node_id)?
            .into_iter()
            .filter(|child| child.is_element())
            .map(|child| child.node_id)
            .collect())
    }

    /// Get parent of a node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&DomNode>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Siblings of a node and its position among them
    fn sibling_list(&self, node_id: NodeId) -> Result<Option<(&[NodeId], usize)>> {
        let parent = match self.parent(node_id)? {
            Some(parent) => parent,
            None => return Ok(None),
        };
        let siblings = parent.children_ids.as_slice();
        Ok(siblings
            .iter()
            .position(|&id| id == node_id)
            .map(|pos| (siblings, pos)))
    }

    /// Next node of any type (`nextSibling`)
    pub fn next_sibling(&self, node_id: NodeId) -> Result<Option<NodeId>> {
        Ok(self
            .sibling_list(node_id)?
            .and_then(|(siblings, pos)| siblings.get(pos + 1).copied()))
    }

    /// Previous node of any type (`previousSibling`)
    pub fn previous_sibling(&self, node_id: NodeId) -> Result<Option<NodeId>> {
        Ok(self
            .sibling_list(node_id)?
            .and_then(|(siblings, pos)| pos.checked_sub(1).map(|p| siblings[p])))
    }

    /// Next element sibling (`nextElementSibling`)
    pub fn next_element_sibling(&self, node_id: NodeId) -> Result<Option<NodeId>> {
        let (siblings, pos) = match self.sibling_list(node_id)? {
            Some(found) => found,
            None => return Ok(None),
        };
        for &id in &siblings[pos + 1..] {
            if self.get(id)?.is_element() {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Previous element sibling (`previousElementSibling`)
    pub fn previous_element_sibling(&self, node_id: NodeId) -> Result<Option<NodeId>> {
        let (siblings, pos) = match self.sibling_list(node_id)? {
            Some(found) => found,
            None => return Ok(None),
        };
        for &id in siblings[..pos].iter().rev() {
            if self.get(id)?.is_element() {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Traverse tree depth-first (iterative, no recursion)
    ///
    /// This is the "good taste" version - no special cases for leaf nodes
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// All descendants in document order, excluding the start node
    pub fn descendants(&self, node_id: NodeId) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();
        self.traverse_df(node_id, |node| {
            if node.node_id != node_id {
                out.push(node.node_id);
            }
            Ok(())
        })?;
        Ok(out)
    }

    /// Find nodes reachable from the root matching predicate
    pub fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        let mut found = Vec::new();
        if let Some(root_id) = self.root_id {
            let _ = self.traverse_df(root_id, |node| {
                if predicate(node) {
                    found.push(node.node_id);
                }
                Ok(())
            });
        }
        found
    }

    /// Find first node reachable from the root matching predicate
    pub fn find_one<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.find(predicate).into_iter().next()
    }

    /// Find all elements by tag name
    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.find(|node| node.is_element() && node.node_name.eq_ignore_ascii_case(tag))
    }

    /// Find element by ID attribute
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_one(|node| node.is_element() && node.attr("id") == Some(id))
    }

    /// `querySelectorAll`: matching descendant elements of `context` in
    /// document order
    pub fn query_selector_all(&self, context: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let selector = SelectorList::parse(selector)?;
        self.select_all(context, &selector)
    }

    /// `querySelectorAll` with an already parsed selector
    pub fn select_all(&self, context: NodeId, selector: &SelectorList) -> Result<Vec<NodeId>> {
        let mut matched = Vec::new();
        for id in self.descendants(context)? {
            if selector.matches(self, id) {
                matched.push(id);
            }
        }
        tracing::trace!(
            "query '{}' under node {} matched {} element(s)",
            selector.as_str(),
            context,
            matched.len()
        );
        Ok(matched)
    }

    /// `querySelector`: first match only
    pub fn query_selector(&self, context: NodeId, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(context, selector)?.into_iter().next())
    }

    /// `Element.matches`
    pub fn matches(&self, node_id: NodeId, selector: &SelectorList) -> Result<bool> {
        self.get(node_id)?;
        Ok(selector.matches(self, node_id))
    }

    pub fn attr(&self, node_id: NodeId, name: &str) -> Result<Option<&str>> {
        Ok(self.get(node_id)?.attr(name))
    }

    pub fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let node = self.element_mut(node_id)?;
        node.attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn element_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        let node = self.get_mut(node_id)?;
        if !node.is_element() {
            return Err(DomError::InvalidNodeType {
                expected: "Element".to_string(),
                actual: format!("{:?}", node.node_type),
            });
        }
        Ok(node)
    }

    /// `textContent`: character data of text nodes, or the concatenated
    /// text of all descendant text nodes
    pub fn text_content(&self, node_id: NodeId) -> Result<String> {
        self.collect_text(node_id, false)
    }

    /// `innerText`: like `text_content` but skipping non-rendered elements
    pub fn inner_text(&self, node_id: NodeId) -> Result<String> {
        self.collect_text(node_id, true)
    }

    fn collect_text(&self, node_id: NodeId, rendered_only: bool) -> Result<String> {
        let node = self.get(node_id)?;
        if matches!(
            node.node_type,
            NodeType::Text | NodeType::CdataSection | NodeType::Comment
        ) {
            return Ok(node.node_value.clone());
        }

        let mut text = String::new();
        let mut stack: Vec<NodeId> = node.children_ids.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.get(id)?;
            if node.is_text() {
                text.push_str(&node.node_value);
                continue;
            }
            if rendered_only
                && node.is_element()
                && NON_RENDERED_TEXT_ELEMENTS
                    .iter()
                    .any(|tag| node.node_name.eq_ignore_ascii_case(tag))
            {
                continue;
            }
            stack.extend(node.children_ids.iter().rev());
        }
        Ok(text)
    }

    /// Replace all children with a single text node (none for empty text)
    ///
    /// An existing text child is reused so repeated writes do not grow the
    /// arena.
    pub fn set_text_content(&mut self, node_id: NodeId, text: &str) -> Result<()> {
        let node = self.get_mut(node_id)?;
        if matches!(
            node.node_type,
            NodeType::Text | NodeType::CdataSection | NodeType::Comment
        ) {
            node.node_value = text.to_string();
            return Ok(());
        }

        let children = node.children_ids.clone();
        let reusable = children
            .iter()
            .copied()
            .find(|&child| matches!(self.get(child), Ok(c) if c.node_type == NodeType::Text));

        if let (Some(text_id), [_]) = (reusable, children.as_slice()) {
            if !text.is_empty() {
                self.get_mut(text_id)?.node_value = text.to_string();
                return Ok(());
            }
        }

        self.remove_children(node_id)?;
        if text.is_empty() {
            return Ok(());
        }
        let text_id = match reusable {
            Some(text_id) => {
                self.get_mut(text_id)?.node_value = text.to_string();
                text_id
            }
            None => self.create_text(text),
        };
        self.append_child(node_id, text_id)
    }

    /// Declarations parsed from the `style` attribute
    pub fn inline_style(&self, node_id: NodeId) -> Result<StyleDeclarations> {
        Ok(self
            .attr(node_id, "style")?
            .map(StyleDeclarations::parse)
            .unwrap_or_default())
    }

    /// Write declarations back to the `style` attribute
    pub fn set_inline_style(&mut self, node_id: NodeId, style: &StyleDeclarations) -> Result<()> {
        if style.is_empty() {
            self.element_mut(node_id)?.attributes.remove("style");
            return Ok(());
        }
        self.set_attr(node_id, "style", &style.to_css_text())
    }

    /// Set or clear one inline declaration
    pub fn set_inline_style_value(
        &mut self,
        node_id: NodeId,
        property: &str,
        value: Option<&str>,
    ) -> Result<()> {
        let mut style = self.inline_style(node_id)?;
        match value {
            Some(value) => style.set(property, value),
            None => {
                style.remove(property);
            }
        }
        self.set_inline_style(node_id, &style)
    }

    /// Computed value of a hyphenated property: inline declarations over
    /// the host's cascaded snapshot
    pub fn computed_style(&self, node_id: NodeId, property: &str) -> Result<Option<String>> {
        let node = self.get(node_id)?;
        if let Some(value) = self.inline_style(node_id)?.get(property) {
            return Ok(Some(value.to_string()));
        }
        Ok(node.snapshot_style(property).map(String::from))
    }

    /// Legacy current style: runtime layer over inline over snapshot
    pub fn current_style(&self, node_id: NodeId, property: &str) -> Result<Option<String>> {
        let node = self.get(node_id)?;
        if let Some(value) = node
            .runtime_style
            .as_ref()
            .and_then(|style| style.get(property))
        {
            return Ok(Some(value.to_string()));
        }
        self.computed_style(node_id, property)
    }

    pub fn runtime_style_value(&self, node_id: NodeId, property: &str) -> Result<Option<String>> {
        Ok(self
            .get(node_id)?
            .runtime_style
            .as_ref()
            .and_then(|style| style.get(property))
            .map(String::from))
    }

    pub fn set_runtime_style_value(
        &mut self,
        node_id: NodeId,
        property: &str,
        value: Option<&str>,
    ) -> Result<()> {
        let node = self.get_mut(node_id)?;
        match value {
            Some(value) => node
                .runtime_style
                .get_or_insert_with(Default::default)
                .set(property, value),
            None => {
                if let Some(style) = node.runtime_style.as_mut() {
                    style.remove(property);
                    if style.is_empty() {
                        node.runtime_style = None;
                    }
                }
            }
        }
        Ok(())
    }

    /// Pixel value of the inline `left` declaration (`style.pixelLeft`)
    pub fn pixel_left(&self, node_id: NodeId) -> Result<i64> {
        let left = match self.inline_style(node_id)?.get("left") {
            Some(left) => left.to_string(),
            None => return Ok(0),
        };

        let base = self.features.base_font_size_px;
        let font_size = self
            .current_style(node_id, "font-size")?
            .and_then(|size| style::to_pixels(&size, base, base))
            .unwrap_or(base);

        let reference = match self.get(node_id)?.parent_id {
            Some(parent_id) if self.get(parent_id)?.is_element() => self
                .current_style(parent_id, "width")?
                .and_then(|width| style::to_pixels(&width, font_size, 0.0)),
            _ => None,
        }
        .unwrap_or(self.features.viewport_width_px);

        Ok(style::to_pixels(&left, font_size, reference)
            .map(|px| px.round() as i64)
            .unwrap_or(0))
    }

    /// Clear arena (reuse allocation)
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root_id = None;
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// document > body > [#text, p, <!-- -->, p, span]
    fn fixture() -> (DomArena, NodeId, Vec<NodeId>) {
        let mut arena = DomArena::new();
        let doc = arena.create_document();
        arena.set_root(doc).unwrap();
        let body = arena.create_element("BODY");
        arena.append_child(doc, body).unwrap();

        let text = arena.create_text("lead ");
        let p1 = arena.create_element("p");
        let comment = arena.create_comment("note");
        let p2 = arena.create_element("p");
        let span = arena.create_element("span");
        for child in [text, p1, comment, p2, span] {
            arena.append_child(body, child).unwrap();
        }
        (arena, body, vec![text, p1, comment, p2, span])
    }

    #[test]
    fn test_arena_basic() {
        let mut arena = DomArena::new();
        let id = arena.create_element("div");
        assert_eq!(id, 0);

        let retrieved = arena.get(id).unwrap();
        assert_eq!(retrieved.node_name, "div");
        assert_eq!(retrieved.node_id, 0);
        assert!(matches!(arena.get(42), Err(DomError::NodeNotFound(42))));
    }

    #[test]
    fn test_append_moves_child() {
        let (mut arena, body, kids) = fixture();
        let div = arena.create_element("div");
        arena.append_child(body, div).unwrap();
        arena.append_child(div, kids[1]).unwrap();

        assert_eq!(arena.get(kids[1]).unwrap().parent_id, Some(div));
        assert!(!arena.get(body).unwrap().children_ids.contains(&kids[1]));
    }

    #[test]
    fn test_append_rejects_cycles_and_leaves() {
        let (mut arena, body, kids) = fixture();
        let doc = arena.root_id().unwrap();
        assert!(arena.append_child(body, doc).is_err());
        assert!(arena.append_child(body, body).is_err());
        assert!(arena.append_child(kids[0], kids[1]).is_err());
    }

    #[test]
    fn test_sibling_links() {
        let (arena, _body, kids) = fixture();
        let (text, p1, comment, p2, span) = (kids[0], kids[1], kids[2], kids[3], kids[4]);

        assert_eq!(arena.next_sibling(p1).unwrap(), Some(comment));
        assert_eq!(arena.previous_sibling(p1).unwrap(), Some(text));
        assert_eq!(arena.previous_sibling(text).unwrap(), None);
        assert_eq!(arena.next_element_sibling(p1).unwrap(), Some(p2));
        assert_eq!(arena.previous_element_sibling(p2).unwrap(), Some(p1));
        assert_eq!(arena.previous_element_sibling(p1).unwrap(), None);
        assert_eq!(arena.next_element_sibling(span).unwrap(), None);
    }

    #[test]
    fn test_traverse_df() {
        let (arena, body, _) = fixture();
        let mut visited = Vec::new();
        arena
            .traverse_df(body, |node| {
                visited.push(node.node_name.clone());
                Ok(())
            })
            .unwrap();

        assert_eq!(visited, vec!["body", "#text", "p", "#comment", "p", "span"]);
    }

    #[test]
    fn test_query_selector_all_in_document_order() {
        let (arena, body, kids) = fixture();
        let found = arena.query_selector_all(body, "p, span").unwrap();
        assert_eq!(found, vec![kids[1], kids[3], kids[4]]);
        assert_eq!(arena.query_selector(body, "span").unwrap(), Some(kids[4]));
        assert!(arena.query_selector_all(kids[1], "p").unwrap().is_empty());
        assert_eq!(arena.find_by_tag("P").len(), 2);
    }

    #[test]
    fn test_text_content_roundtrip() {
        let (mut arena, body, kids) = fixture();
        let script = arena.create_element("script");
        let code = arena.create_text("var x;");
        arena.append_child(script, code).unwrap();
        arena.append_child(body, script).unwrap();
        let inner = arena.create_text("hi");
        arena.append_child(kids[1], inner).unwrap();

        assert_eq!(arena.text_content(body).unwrap(), "lead hivar x;");
        assert_eq!(arena.inner_text(body).unwrap(), "lead hi");
        assert_eq!(arena.text_content(kids[2]).unwrap(), "note");

        arena.set_text_content(body, "replaced").unwrap();
        assert_eq!(arena.text_content(body).unwrap(), "replaced");
        assert_eq!(arena.get(body).unwrap().children_ids.len(), 1);
        assert_eq!(arena.get(kids[1]).unwrap().parent_id, None);

        arena.set_text_content(body, "").unwrap();
        assert!(arena.get(body).unwrap().children_ids.is_empty());
    }

    #[test]
    fn test_set_text_content_reuses_text_node() {
        let (mut arena, body, kids) = fixture();
        let nodes = arena.len();

        // Mixed children: the leading text node is kept, the rest detached
        arena.set_text_content(body, "one").unwrap();
        assert_eq!(arena.get(body).unwrap().children_ids.as_slice(), &[kids[0]]);
        assert_eq!(arena.get(kids[1]).unwrap().parent_id, None);

        for _ in 0..100 {
            arena.set_text_content(body, "again").unwrap();
        }
        assert_eq!(arena.len(), nodes);
        assert_eq!(arena.text_content(body).unwrap(), "again");

        // Without a text child a new node is created once, then reused
        let p = kids[1];
        arena.set_text_content(p, "fresh").unwrap();
        arena.set_text_content(p, "fresher").unwrap();
        assert_eq!(arena.len(), nodes + 1);
        assert_eq!(arena.text_content(p).unwrap(), "fresher");
    }

    #[test]
    fn test_styles_layering() {
        let (mut arena, _body, kids) = fixture();
        let p = kids[1];
        arena.get_mut(p).unwrap().snapshot_styles =
            Some(Box::new([("color".to_string(), "blue".to_string())].into()));

        assert_eq!(arena.computed_style(p, "color").unwrap().as_deref(), Some("blue"));
        arena.set_inline_style_value(p, "color", Some("red")).unwrap();
        assert_eq!(arena.attr(p, "style").unwrap(), Some("color:red"));
        assert_eq!(arena.computed_style(p, "color").unwrap().as_deref(), Some("red"));

        arena.set_runtime_style_value(p, "color", Some("green")).unwrap();
        assert_eq!(arena.current_style(p, "color").unwrap().as_deref(), Some("green"));
        arena.set_runtime_style_value(p, "color", None).unwrap();
        assert!(arena.get(p).unwrap().runtime_style.is_none());

        arena.set_inline_style_value(p, "color", None).unwrap();
        assert_eq!(arena.attr(p, "style").unwrap(), None);
    }

    #[test]
    fn test_pixel_left() {
        let (mut arena, body, kids) = fixture();
        let p = kids[1];
        assert_eq!(arena.pixel_left(p).unwrap(), 0);

        arena.set_inline_style_value(p, "left", Some("2em")).unwrap();
        assert_eq!(arena.pixel_left(p).unwrap(), 32);

        arena.set_inline_style_value(body, "width", Some("400px")).unwrap();
        arena.set_inline_style_value(p, "left", Some("25%")).unwrap();
        assert_eq!(arena.pixel_left(p).unwrap(), 100);
    }
}
