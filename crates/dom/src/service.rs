//! DOM Service - builds an arena from CDP-shaped JSON
//!
//! This handles:
//! - Parsing a `DOM.getDocument` style response into the arena
//! - Attaching host-computed styles to nodes
//! - Guarding against pathological nesting

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::features::RuntimeFeatures;
use crate::types::*;
use serde_json::Value;
use std::collections::HashMap;

/// Configuration for DOM service
#[derive(Debug, Clone)]
pub struct DomServiceConfig {
    /// Features advertised by the loaded document
    pub features: RuntimeFeatures,
    /// Deepest nesting accepted before loading fails
    pub max_depth: usize,
}

impl Default for DomServiceConfig {
    fn default() -> Self {
        Self {
            features: RuntimeFeatures::default(),
            max_depth: 512,
        }
    }
}

/// Main DOM service
pub struct DomService {
    config: DomServiceConfig,
    arena: DomArena,
}

impl DomService {
    /// Create new DOM service with default config
    pub fn new() -> Self {
        Self::with_config(DomServiceConfig::default())
    }

    /// Create DOM service with custom config
    pub fn with_config(config: DomServiceConfig) -> Self {
        let arena = DomArena::with_features(config.features.clone());
        Self { config, arena }
    }

    /// Get reference to internal arena
    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    /// Hand the loaded arena over to its consumer
    pub fn into_arena(self) -> DomArena {
        self.arena
    }

    /// Parse a JSON string, see [`DomService::parse_cdp_dom_tree`]
    pub fn load_str(&mut self, json: &str) -> Result<NodeId> {
        let value: Value = serde_json::from_str(json)?;
        self.parse_cdp_dom_tree(&value)
    }

    /// Parse CDP DOM tree response and build arena
    ///
    /// Input format matches CDP's DOM.getDocument response, with an optional
    /// `computedStyles` object per node:
    /// ```json
    /// {
    ///   "root": {
    ///     "nodeType": 9,
    ///     "nodeName": "#document",
    ///     "children": [{
    ///       "nodeType": 1,
    ///       "nodeName": "DIV",
    ///       "attributes": ["class", "item"],
    ///       "computedStyles": { "display": "block" }
    ///     }]
    ///   }
    /// }
    /// ```
    pub fn parse_cdp_dom_tree(&mut self, cdp_response: &Value) -> Result<NodeId> {
        let root = cdp_response
            .get("root")
            .ok_or_else(|| DomError::LoadError("Missing 'root' in CDP response".to_string()))?;

        self.arena.clear();
        let root_id = self.parse_node(root, None, 0)?;
        self.arena.set_root(root_id)?;

        tracing::debug!("Loaded DOM tree with {} nodes", self.arena.len());
        Ok(root_id)
    }

    /// Recursively parse a CDP node
    fn parse_node(
        &mut self,
        cdp_node: &Value,
        parent_id: Option<NodeId>,
        depth: usize,
    ) -> Result<NodeId> {
        if depth > self.config.max_depth {
            return Err(DomError::MaxDepthExceeded {
                current: depth,
                max: self.config.max_depth,
            });
        }

        let node_type_val = cdp_node["nodeType"]
            .as_u64()
            .ok_or_else(|| DomError::LoadError("Missing nodeType".to_string()))?;

        let node_type = u8::try_from(node_type_val)
            .ok()
            .and_then(NodeType::from_u8)
            .ok_or_else(|| DomError::InvalidNodeType {
                expected: "valid NodeType".to_string(),
                actual: format!("{}", node_type_val),
            })?;

        let mut node_name = cdp_node["nodeName"].as_str().unwrap_or("").to_string();
        if node_type == NodeType::Element {
            // CDP reports HTML tag names uppercased
            node_name = node_name.to_ascii_lowercase();
        }

        let mut node = DomNode::new(node_type, node_name);
        node.node_value = cdp_node["nodeValue"].as_str().unwrap_or("").to_string();
        node.attributes = parse_attributes(cdp_node);
        node.parent_id = parent_id;

        if let Some(styles) = cdp_node.get("computedStyles").and_then(|v| v.as_object()) {
            let styles: HashMap<String, String> = styles
                .iter()
                .filter_map(|(prop, value)| value.as_str().map(|v| (prop.clone(), v.to_string())))
                .collect();
            node.snapshot_styles = Some(Box::new(styles));
        }

        let current_node_id = self.arena.add_node(node);

        if let Some(children) = cdp_node["children"].as_array() {
            if !node_type.is_container() && !children.is_empty() {
                return Err(DomError::InvalidNodeType {
                    expected: "container node for children".to_string(),
                    actual: format!("{:?}", node_type),
                });
            }

            let mut child_ids = smallvec::SmallVec::new();
            for child in children {
                let child_id = self.parse_node(child, Some(current_node_id), depth + 1)?;
                child_ids.push(child_id);
            }

            // Update parent's children list
            self.arena.get_mut(current_node_id)?.children_ids = child_ids;
        }

        Ok(current_node_id)
    }
}

/// CDP flattens attributes into `[name, value, name, value, ...]`
fn parse_attributes(cdp_node: &Value) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    if let Some(attrs) = cdp_node["attributes"].as_array() {
        if attrs.len() % 2 != 0 {
            tracing::warn!(
                "Odd attribute list length {} on <{}>, dropping trailing name",
                attrs.len(),
                cdp_node["nodeName"].as_str().unwrap_or("?")
            );
        }
        for pair in attrs.chunks_exact(2) {
            if let (Some(key), Some(value)) = (pair[0].as_str(), pair[1].as_str()) {
                attributes.insert(key.to_string(), value.to_string());
            }
        }
    }
    attributes
}

impl Default for DomService {
    fn default() -> Self {
        Self::new()
    }
}
