//! Entry point: builds collections over one document

use crate::capabilities::Capabilities;
use crate::collection::Collection;
use crate::document::Document;
use dom::{DomArena, DomError, NodeId, Result, SelectorList};

/// Collection factory bound to one [`Document`]
///
/// Capabilities are detected once, here, and shared by every collection this
/// factory produces.
#[derive(Debug, Clone)]
pub struct Query {
    document: Document,
    capabilities: Capabilities,
}

impl Query {
    pub fn new(document: Document) -> Self {
        let capabilities = Capabilities::detect(document.borrow().features());
        tracing::debug!("Detected capabilities: {:?}", capabilities);
        Self {
            document,
            capabilities,
        }
    }

    pub fn from_arena(arena: DomArena) -> Self {
        Self::new(Document::new(arena))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// All elements matching `selector` in the document
    pub fn select(&self, selector: &str) -> Result<Collection> {
        match self.document.root_id() {
            Some(root_id) => self.select_in(selector, root_id),
            None => {
                SelectorList::parse(selector)?;
                Ok(Collection::empty(self.document.clone(), self.capabilities))
            }
        }
    }

    /// All elements matching `selector` below `context`
    pub fn select_in(&self, selector: &str, context: NodeId) -> Result<Collection> {
        let found = {
            let arena = self.document.borrow();
            if !arena.contains(context) {
                return Err(DomError::NodeNotFound(context));
            }
            arena.query_selector_all(context, selector)?
        };
        tracing::debug!("select '{}' under {}: {} element(s)", selector, context, found.len());

        let mut collection = Collection::empty(self.document.clone(), self.capabilities);
        collection.update(found);
        Ok(collection)
    }

    /// Wrap exactly one node, or nothing when `node` is absent
    pub fn wrap(&self, node: impl Into<Option<NodeId>>) -> Collection {
        let mut collection = Collection::empty(self.document.clone(), self.capabilities);
        collection.update([node.into()]);
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::RuntimeFeatures;

    #[test]
    fn test_capabilities_follow_features() {
        let query = Query::from_arena(DomArena::with_features(RuntimeFeatures::legacy()));
        assert_eq!(
            query.capabilities(),
            Capabilities::detect(&RuntimeFeatures::legacy())
        );
    }

    #[test]
    fn test_select_without_root() {
        let query = Query::from_arena(DomArena::new());
        assert!(query.select("div").unwrap().is_empty());
        assert!(query.select("div >").is_err());
    }

    #[test]
    fn test_select_in_unknown_context() {
        let query = Query::from_arena(DomArena::new());
        assert!(matches!(
            query.select_in("div", 7),
            Err(DomError::NodeNotFound(7))
        ));
    }

    #[test]
    fn test_wrap() {
        let mut arena = DomArena::new();
        let p = arena.create_element("p");
        let query = Query::from_arena(arena);
        assert_eq!(query.wrap(p).nodes(), &[p]);
        assert!(query.wrap(None::<NodeId>).is_empty());
        assert!(query.wrap(p + 1).is_empty());
    }
}
