//! Chained DOM traversal
//!
//! jQuery-style element collections over an arena DOM: select, walk
//! siblings and ancestors, filter, read and write text and inline CSS.
//!
//! ```
//! use dom::DomArena;
//! use traverse::{predicates, Query};
//!
//! let mut arena = DomArena::new();
//! let doc = arena.create_document();
//! arena.set_root(doc).unwrap();
//! let list = arena.create_element("ul");
//! arena.append_child(doc, list).unwrap();
//! for _ in 0..4 {
//!     let item = arena.create_element("li");
//!     arena.set_attr(item, "class", "item").unwrap();
//!     arena.append_child(list, item).unwrap();
//! }
//!
//! let query = Query::from_arena(arena);
//! let even = query.select(".item").unwrap().filter_by(predicates::even);
//! assert_eq!(even.len(), 2);
//!
//! let marked = even.set_css([("color", "red")]).unwrap();
//! assert_eq!(marked.css("color").unwrap().as_deref(), Some("red"));
//! ```
//!
//! ## Design
//!
//! - A [`Collection`] holds node ids into a shared [`Document`], never nodes
//! - Traversals replace the contents wholesale and return the collection
//! - Host differences are resolved once into [`Capabilities`]

pub mod capabilities;
pub mod collection;
pub mod document;
pub mod element;
pub mod predicates;
pub mod query;

pub use capabilities::Capabilities;
pub use collection::Collection;
pub use document::Document;
pub use element::Element;
pub use query::Query;
