//! Read-only element view handed to filter predicates

use dom::{DomArena, DomNode, NodeId};

/// An element of a collection, borrowed from the tree for the duration of a
/// predicate call
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    arena: &'a DomArena,
    id: NodeId,
}

impl<'a> Element<'a> {
    pub fn new(arena: &'a DomArena, id: NodeId) -> Self {
        Self { arena, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn arena(&self) -> &'a DomArena {
        self.arena
    }

    pub fn node(&self) -> Option<&'a DomNode> {
        self.arena.get(self.id).ok()
    }

    pub fn tag_name(&self) -> Option<&'a str> {
        self.node().and_then(|node| node.tag_name())
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node().and_then(|node| node.attr(name))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.node().map(|node| node.has_class(class)).unwrap_or(false)
    }

    pub fn parent(&self) -> Option<Element<'a>> {
        self.node()
            .and_then(|node| node.parent_id)
            .map(|parent_id| Element::new(self.arena, parent_id))
    }

    /// Zero-based position among the parent's element children
    pub fn index_in_parent(&self) -> Option<usize> {
        let parent_id = self.node()?.parent_id?;
        self.arena
            .element_children(parent_id)
            .ok()?
            .iter()
            .position(|&id| id == self.id)
    }

    pub fn text_content(&self) -> String {
        self.arena.text_content(self.id).unwrap_or_default()
    }
}
