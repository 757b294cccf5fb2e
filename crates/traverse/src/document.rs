//! Shared handle to the live tree
//!
//! Collections hold node ids, never nodes. Every collection produced by one
//! [`Query`](crate::Query) shares the same `Document`, so a setter on one is
//! visible through all of them immediately.

use dom::{DomArena, DomService, NodeId};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
pub struct Document {
    arena: Rc<RefCell<DomArena>>,
}

impl Document {
    pub fn new(arena: DomArena) -> Self {
        Self {
            arena: Rc::new(RefCell::new(arena)),
        }
    }

    /// Borrow the tree for reading
    ///
    /// Panics if a mutable borrow is outstanding.
    pub fn borrow(&self) -> Ref<'_, DomArena> {
        self.arena.borrow()
    }

    /// Borrow the tree for mutation
    ///
    /// Panics if any other borrow is outstanding.
    pub fn borrow_mut(&self) -> RefMut<'_, DomArena> {
        self.arena.borrow_mut()
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.arena.borrow().root_id()
    }

    /// Both handles refer to the same tree
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena)
    }
}

impl From<DomArena> for Document {
    fn from(arena: DomArena) -> Self {
        Self::new(arena)
    }
}

impl From<DomService> for Document {
    fn from(service: DomService) -> Self {
        Self::new(service.into_arena())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arena.try_borrow() {
            Ok(arena) => f
                .debug_struct("Document")
                .field("nodes", &arena.len())
                .field("root_id", &arena.root_id())
                .finish(),
            Err(_) => f.write_str("Document { <borrowed> }"),
        }
    }
}
