//! Arena DOM
//!
//! A small, index-based DOM tree providing the native primitives a query
//! layer needs: selector queries scoped to a context node, element matching,
//! generic and element sibling links, text content, inline/computed style.
//!
//! ## Philosophy
//!
//! - **Good taste**: Data structures first, algorithms follow naturally
//! - **No special cases**: Type system eliminates branches
//! - **Cache friendly**: Arena allocation, sequential access patterns
//!
//! ## Core Design
//!
//! ```text
//! CDP JSON → DomService → DomArena (owned) → query / match / style
//!                             ↓
//!                       NodeId (u32)
//! ```

pub mod arena;
pub mod error;
pub mod features;
pub mod selector;
pub mod serializer;
pub mod service;
pub mod style;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use error::{DomError, Result};
pub use features::RuntimeFeatures;
pub use selector::SelectorList;
pub use serializer::{DomSerializer, SerializerConfig};
pub use service::{DomService, DomServiceConfig};
pub use style::StyleDeclarations;
pub use types::*;
