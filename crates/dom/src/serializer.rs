//! DOM Serializer - render a subtree as compact HTML
//!
//! Used to inspect what chained mutations did to the tree. Attributes are
//! emitted in name order so output is stable across runs.

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::*;
use crate::utils;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Indent nested elements, one per line
    pub pretty: bool,
    pub include_comments: bool,
    pub max_text_length: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            include_comments: false,
            max_text_length: 200,
        }
    }
}

/// DOM Tree Serializer
pub struct DomSerializer {
    config: SerializerConfig,
}

impl DomSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Serialize the whole document
    pub fn serialize(&self, arena: &DomArena) -> Result<String> {
        match arena.root_id() {
            Some(root_id) => self.serialize_node(arena, root_id),
            None => Ok(String::new()),
        }
    }

    /// Serialize one node and its subtree (`outerHTML`)
    pub fn serialize_node(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        self.write_node(arena, node_id, 0, &mut output)?;
        Ok(output)
    }

    fn write_node(
        &self,
        arena: &DomArena,
        node_id: NodeId,
        depth: usize,
        output: &mut String,
    ) -> Result<()> {
        let node = arena.get(node_id)?;
        let indent = if self.config.pretty {
            "  ".repeat(depth)
        } else {
            String::new()
        };
        let newline = if self.config.pretty { "\n" } else { "" };

        match node.node_type {
            NodeType::Element => {
                output.push_str(&indent);
                output.push('<');
                output.push_str(&node.node_name);

                let mut names: Vec<&String> = node.attributes.keys().collect();
                names.sort();
                for name in names {
                    output.push_str(&format!(
                        " {}=\"{}\"",
                        name,
                        utils::escape_attr(&node.attributes[name])
                    ));
                }
                output.push('>');
                output.push_str(newline);

                if utils::is_void_element(&node.node_name) {
                    return Ok(());
                }

                for &child_id in &node.children_ids {
                    self.write_node(arena, child_id, depth + 1, output)?;
                }

                output.push_str(&indent);
                output.push_str("</");
                output.push_str(&node.node_name);
                output.push('>');
                output.push_str(newline);
            }
            NodeType::Text | NodeType::CdataSection => {
                let text = if self.config.pretty {
                    node.node_value.trim()
                } else {
                    node.node_value.as_str()
                };
                if !text.is_empty() {
                    output.push_str(&indent);
                    output.push_str(&utils::escape_text(&utils::cap_text_length(
                        text,
                        self.config.max_text_length,
                    )));
                    output.push_str(newline);
                }
            }
            NodeType::Comment if self.config.include_comments => {
                output.push_str(&indent);
                output.push_str(&format!("<!--{}-->", node.node_value));
                output.push_str(newline);
            }
            NodeType::Document | NodeType::DocumentFragment => {
                // For document nodes, just serialize children
                for &child_id in &node.children_ids {
                    self.write_node(arena, child_id, depth, output)?;
                }
            }
            _ => {}
        }

        Ok(())
    }
}

impl Default for DomSerializer {
    fn default() -> Self {
        Self::new()
    }
}
