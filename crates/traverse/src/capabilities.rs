//! Capability detection
//!
//! Hosts differ in which element APIs they expose. Rather than branching on
//! every call, the runtime's features are inspected once when a
//! [`Query`](crate::Query) is built and one strategy per concern is chosen.
//! Every strategy produces the same observable result; they differ only in
//! which primitives of the tree they lean on.

use dom::style;
use dom::{DomArena, NodeId, Result, RuntimeFeatures, SelectorList};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// How adjacent element siblings are found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingStrategy {
    /// `nextElementSibling` / `previousElementSibling`
    ElementSibling,
    /// Walk `nextSibling` / `previousSibling`, skipping non-elements
    GenericSibling,
}

impl SiblingStrategy {
    pub fn step(self, arena: &DomArena, node_id: NodeId, direction: Direction) -> Option<NodeId> {
        match self {
            SiblingStrategy::ElementSibling => match direction {
                Direction::Next => arena.next_element_sibling(node_id),
                Direction::Previous => arena.previous_element_sibling(node_id),
            }
            .ok()
            .flatten(),
            SiblingStrategy::GenericSibling => {
                let mut current = node_id;
                loop {
                    let sibling = match direction {
                        Direction::Next => arena.next_sibling(current),
                        Direction::Previous => arena.previous_sibling(current),
                    }
                    .ok()
                    .flatten()?;
                    if arena.get(sibling).map(|n| n.is_element()).unwrap_or(false) {
                        return Some(sibling);
                    }
                    current = sibling;
                }
            }
        }
    }
}

/// How an element is tested against a selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// `Element.matches`
    Native,
    /// Query the parent (or the root when detached) and look for the element
    ParentQuery,
}

impl MatchStrategy {
    pub fn matches(self, arena: &DomArena, node_id: NodeId, selector: &SelectorList) -> bool {
        match self {
            MatchStrategy::Native => arena.matches(node_id, selector).unwrap_or(false),
            MatchStrategy::ParentQuery => {
                let context = arena
                    .get(node_id)
                    .ok()
                    .and_then(|node| node.parent_id)
                    .or_else(|| arena.root_id());
                context
                    .and_then(|context| arena.select_all(context, selector).ok())
                    .map(|found| found.contains(&node_id))
                    .unwrap_or(false)
            }
        }
    }
}

/// How a single style property is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleStrategy {
    /// `getComputedStyle(el).getPropertyValue(hyphenated-name)`
    Computed,
    /// `el.currentStyle[camelName]`, relative lengths measured to pixels
    Current,
}

impl StyleStrategy {
    pub fn read(self, arena: &mut DomArena, node_id: NodeId, property: &str) -> Result<Option<String>> {
        match self {
            StyleStrategy::Computed => arena.computed_style(node_id, &style::hyphenate(property)),
            StyleStrategy::Current => read_current_style(arena, node_id, property),
        }
    }
}

/// Legacy lookup. The current style only knows camel-cased names, and it
/// reports relative lengths verbatim, so they are converted by letting the
/// element resolve them through its inline `left` and reading `pixelLeft`.
/// Both `left` layers are restored afterwards.
fn read_current_style(arena: &mut DomArena, node_id: NodeId, property: &str) -> Result<Option<String>> {
    let camel = style::camelize(property);
    let value = match arena.current_style(node_id, &style::hyphenate(&camel))? {
        Some(value) => value,
        None => return Ok(None),
    };
    if !style::is_unresolved_length(&value) {
        return Ok(Some(value));
    }

    let old_left = arena.inline_style(node_id)?.get("left").map(String::from);
    let old_runtime_left = arena.runtime_style_value(node_id, "left")?;
    let current_left = arena.current_style(node_id, "left")?;

    arena.set_runtime_style_value(node_id, "left", current_left.as_deref())?;
    arena.set_inline_style_value(node_id, "left", Some(&value))?;
    let measured = arena.pixel_left(node_id);
    arena.set_inline_style_value(node_id, "left", old_left.as_deref())?;
    arena.set_runtime_style_value(node_id, "left", old_runtime_left.as_deref())?;

    let px = measured?;
    tracing::trace!("measured {} = {} as {}px on node {}", camel, value, px, node_id);
    Ok(Some(format!("{}px", px)))
}

/// Which text property is read and written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextProperty {
    TextContent,
    /// Reading skips script/style contents
    InnerText,
}

impl TextProperty {
    pub fn read(self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        match self {
            TextProperty::TextContent => arena.text_content(node_id),
            TextProperty::InnerText => arena.inner_text(node_id),
        }
    }

    /// Both properties replace the children with one text node, so writes
    /// share the `textContent` setter
    pub fn write(self, arena: &mut DomArena, node_id: NodeId, text: &str) -> Result<()> {
        match self {
            TextProperty::TextContent | TextProperty::InnerText => {
                arena.set_text_content(node_id, text)
            }
        }
    }
}

/// The strategy set chosen for one runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub siblings: SiblingStrategy,
    pub matcher: MatchStrategy,
    pub style: StyleStrategy,
    pub text: TextProperty,
}

impl Capabilities {
    pub fn detect(features: &RuntimeFeatures) -> Self {
        Self {
            siblings: if features.element_sibling {
                SiblingStrategy::ElementSibling
            } else {
                SiblingStrategy::GenericSibling
            },
            matcher: if features.matches_selector {
                MatchStrategy::Native
            } else {
                MatchStrategy::ParentQuery
            },
            style: if features.computed_style {
                StyleStrategy::Computed
            } else {
                StyleStrategy::Current
            },
            text: if features.text_content {
                TextProperty::TextContent
            } else {
                TextProperty::InnerText
            },
        }
    }
}
