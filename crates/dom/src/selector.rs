//! CSS selector parsing and matching
//!
//! Supports the selector subset a query API needs in practice: type,
//! universal, id, class and attribute selectors, the tree-structural
//! pseudo-classes, `:not()`, a few form-state pseudo-classes, all four
//! combinators and comma-separated lists.
//!
//! Matching runs right-to-left against the arena, so ancestors outside a
//! query context still take part (same as `querySelectorAll`).

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType};

/// A parsed, comma-separated selector list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    source: String,
    selectors: Vec<ComplexSelector>,
}

/// Compound selectors joined by combinators, stored left-to-right
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
    /// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    components: Vec<SelectorComponent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// A component of a compound selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name, lowercased)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :first-child, :nth-child(), etc.
    PseudoClass(PseudoClass),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),
    Not(Box<SelectorList>),
    Checked,
    Disabled,
    Enabled,
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (matcher, value) = match (&self.matcher, value) {
            (None, found) => return found.is_some(),
            (Some(_), None) => return false,
            (Some(matcher), Some(value)) => (matcher, value),
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let value = fold(value);

        match matcher {
            AttributeMatcher::Exact(expected) => value == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                value.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                value == expected || value.starts_with(&format!("{}-", expected))
            }
            // Empty needles never match for the substring family
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && value.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && value.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && value.contains(&fold(expected))
            }
        }
    }
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, PartialEq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// Create "odd" expression (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// Create "even" expression (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// Create a simple index (0n+b)
    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from string like "2n+1", "odd", "even", "3"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        let s = s.replace(' ', "");
        let n_pos = s.find('n')?;

        let a_str = &s[..n_pos];
        let a = match a_str {
            "" | "+" => 1,
            "-" => -1,
            _ => a_str.parse().ok()?,
        };

        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() { 0 } else { rest.parse().ok()? };

        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        // Widened so extreme offsets cannot overflow
        let diff = n as i64 - self.b as i64;
        let a = self.a as i64;
        if a > 0 {
            diff >= 0 && diff % a == 0
        } else {
            diff <= 0 && diff % a == 0
        }
    }
}

impl SelectorList {
    pub fn parse(source: &str) -> Result<Self> {
        let mut parser = Parser::new(source);
        let selectors = parser.parse_list(false)?;
        if let Some(c) = parser.peek() {
            return Err(parser.unexpected(c));
        }
        Ok(Self {
            source: source.trim().to_string(),
            selectors,
        })
    }

    /// The selector text this list was parsed from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if any selector in the list matches the node
    pub fn matches(&self, arena: &DomArena, node_id: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(arena, node_id))
    }
}

impl ComplexSelector {
    pub fn matches(&self, arena: &DomArena, node_id: NodeId) -> bool {
        self.matches_at(arena, node_id, self.compounds.len() - 1)
    }

    fn matches_at(&self, arena: &DomArena, node_id: NodeId, idx: usize) -> bool {
        if !self.compounds[idx].matches(arena, node_id) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        match self.combinators[idx - 1] {
            Combinator::Child => parent_element(arena, node_id)
                .map(|p| self.matches_at(arena, p, idx - 1))
                .unwrap_or(false),
            Combinator::Descendant => {
                let mut current = parent_element(arena, node_id);
                while let Some(ancestor) = current {
                    if self.matches_at(arena, ancestor, idx - 1) {
                        return true;
                    }
                    current = parent_element(arena, ancestor);
                }
                false
            }
            Combinator::NextSibling => previous_element(arena, node_id)
                .map(|s| self.matches_at(arena, s, idx - 1))
                .unwrap_or(false),
            Combinator::SubsequentSibling => {
                let mut current = previous_element(arena, node_id);
                while let Some(sibling) = current {
                    if self.matches_at(arena, sibling, idx - 1) {
                        return true;
                    }
                    current = previous_element(arena, sibling);
                }
                false
            }
        }
    }
}

impl CompoundSelector {
    pub fn matches(&self, arena: &DomArena, node_id: NodeId) -> bool {
        let node = match arena.get(node_id) {
            Ok(node) if node.is_element() => node,
            _ => return false,
        };
        self.components
            .iter()
            .all(|c| match_component(c, arena, node))
    }
}

fn parent_element(arena: &DomArena, node_id: NodeId) -> Option<NodeId> {
    let parent = arena.get(node_id).ok()?.parent_id?;
    arena.get(parent).ok()?.is_element().then_some(parent)
}

fn previous_element(arena: &DomArena, node_id: NodeId) -> Option<NodeId> {
    arena.previous_element_sibling(node_id).ok().flatten()
}

/// 1-based position of an element among its element siblings
struct SiblingPosition {
    index: usize,
    count: usize,
    type_index: usize,
    type_count: usize,
}

fn sibling_position(arena: &DomArena, node: &DomNode) -> SiblingPosition {
    let siblings = match node.parent_id.and_then(|p| arena.element_children(p).ok()) {
        Some(siblings) => siblings,
        None => {
            return SiblingPosition {
                index: 1,
                count: 1,
                type_index: 1,
                type_count: 1,
            }
        }
    };

    let mut position = SiblingPosition {
        index: 0,
        count: siblings.len(),
        type_index: 0,
        type_count: 0,
    };
    for (i, &sibling_id) in siblings.iter().enumerate() {
        let same_type = arena
            .get(sibling_id)
            .map(|s| s.node_name.eq_ignore_ascii_case(&node.node_name))
            .unwrap_or(false);
        if same_type {
            position.type_count += 1;
        }
        if sibling_id == node.node_id {
            position.index = i + 1;
            position.type_index = position.type_count;
        }
    }
    position
}

const FORM_CONTROLS: &[&str] = &[
    "button", "input", "select", "textarea", "option", "optgroup", "fieldset",
];

fn match_component(component: &SelectorComponent, arena: &DomArena, node: &DomNode) -> bool {
    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => node.node_name.eq_ignore_ascii_case(tag),
        SelectorComponent::Id(id) => node.attr("id") == Some(id.as_str()),
        SelectorComponent::Class(class) => node.has_class(class),
        SelectorComponent::Attribute(attr) => attr.matches(node.attr(&attr.name)),
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(pseudo, arena, node),
    }
}

fn match_pseudo_class(pseudo: &PseudoClass, arena: &DomArena, node: &DomNode) -> bool {
    match pseudo {
        PseudoClass::Root => match node.parent_id {
            None => false,
            Some(p) => arena
                .get(p)
                .map(|parent| parent.node_type == NodeType::Document)
                .unwrap_or(false),
        },
        PseudoClass::Empty => node.children_ids.iter().all(|&child| {
            arena
                .get(child)
                .map(|c| !c.is_element() && !(c.is_text() && !c.node_value.is_empty()))
                .unwrap_or(true)
        }),
        PseudoClass::FirstChild => sibling_position(arena, node).index == 1,
        PseudoClass::LastChild => {
            let pos = sibling_position(arena, node);
            pos.index == pos.count
        }
        PseudoClass::OnlyChild => sibling_position(arena, node).count == 1,
        PseudoClass::FirstOfType => sibling_position(arena, node).type_index == 1,
        PseudoClass::LastOfType => {
            let pos = sibling_position(arena, node);
            pos.type_index == pos.type_count
        }
        PseudoClass::OnlyOfType => sibling_position(arena, node).type_count == 1,
        PseudoClass::NthChild(expr) => expr.matches(sibling_position(arena, node).index as i32),
        PseudoClass::NthLastChild(expr) => {
            let pos = sibling_position(arena, node);
            expr.matches((pos.count - pos.index + 1) as i32)
        }
        PseudoClass::NthOfType(expr) => {
            expr.matches(sibling_position(arena, node).type_index as i32)
        }
        PseudoClass::NthLastOfType(expr) => {
            let pos = sibling_position(arena, node);
            expr.matches((pos.type_count - pos.type_index + 1) as i32)
        }
        PseudoClass::Not(list) => !list.matches(arena, node.node_id),
        PseudoClass::Checked => node.attr("checked").is_some() || node.attr("selected").is_some(),
        PseudoClass::Disabled => node.attr("disabled").is_some(),
        PseudoClass::Enabled => {
            node.attr("disabled").is_none()
                && FORM_CONTROLS
                    .iter()
                    .any(|tag| node.node_name.eq_ignore_ascii_case(tag))
        }
    }
}

/// Recursive-descent parser over the selector text
struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.unexpected(c)),
            None => Err(self.error(format!("expected '{}' before end of input", expected))),
        }
    }

    /// Returns true if any whitespace was skipped
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn error(&self, reason: impl Into<String>) -> DomError {
        DomError::invalid_selector(self.source, reason)
    }

    fn unexpected(&self, c: char) -> DomError {
        self.error(format!("unexpected '{}' at position {}", c, self.pos))
    }

    fn parse_list(&mut self, nested: bool) -> Result<Vec<ComplexSelector>> {
        let mut list = Vec::new();
        loop {
            self.skip_whitespace();
            list.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some(')') if nested => break,
                None => break,
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(list)
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(',') | Some(')') | None => break,
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(c) => return Err(self.unexpected(c)),
            };
            if combinator != Combinator::Descendant {
                self.pos += 1;
                self.skip_whitespace();
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector> {
        let mut components = Vec::new();

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                components.push(SelectorComponent::Universal);
            }
            Some(c) if is_ident_start(c) => {
                let tag = self.parse_ident()?;
                components.push(SelectorComponent::Type(tag.to_ascii_lowercase()));
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    components.push(SelectorComponent::Id(self.parse_ident()?));
                }
                Some('.') => {
                    self.pos += 1;
                    components.push(SelectorComponent::Class(self.parse_ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    components.push(SelectorComponent::Attribute(self.parse_attribute()?));
                }
                Some(':') => {
                    self.pos += 1;
                    components.push(SelectorComponent::PseudoClass(self.parse_pseudo()?));
                }
                _ => break,
            }
        }

        if components.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => self.error("expected a selector"),
            });
        }
        Ok(CompoundSelector { components })
    }

    fn parse_ident(&mut self) -> Result<String> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                match self.bump() {
                    Some(escaped) => ident.push(escaped),
                    None => return Err(self.error("dangling escape")),
                }
            } else if is_ident_char(c) {
                ident.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if ident.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => self.error("expected an identifier"),
            });
        }
        Ok(ident)
    }

    fn parse_string(&mut self, quote: char) -> Result<String> {
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(self.error("dangling escape")),
                },
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector> {
        self.skip_whitespace();
        let name = self.parse_ident()?;
        self.skip_whitespace();

        if self.eat(']') {
            return Ok(AttributeSelector {
                name,
                matcher: None,
                case_insensitive: false,
            });
        }

        let operator = match self.bump() {
            Some('=') => '=',
            Some(op @ ('~' | '|' | '^' | '$' | '*')) => {
                self.expect('=')?;
                op
            }
            Some(c) => {
                self.pos -= 1;
                return Err(self.unexpected(c));
            }
            None => return Err(self.error("unterminated attribute selector")),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                self.parse_string(quote)?
            }
            _ => self.parse_ident()?,
        };
        self.skip_whitespace();

        let case_insensitive = match self.peek() {
            Some('i') | Some('I') => {
                self.pos += 1;
                true
            }
            Some('s') | Some('S') => {
                self.pos += 1;
                false
            }
            _ => false,
        };
        self.skip_whitespace();
        self.expect(']')?;

        let matcher = match operator {
            '=' => AttributeMatcher::Exact(value),
            '~' => AttributeMatcher::Contains(value),
            '|' => AttributeMatcher::DashMatch(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };

        Ok(AttributeSelector {
            name,
            matcher: Some(matcher),
            case_insensitive,
        })
    }

    fn parse_pseudo(&mut self) -> Result<PseudoClass> {
        if self.peek() == Some(':') {
            return Err(self.error("pseudo-elements never match elements"));
        }
        let name = self.parse_ident()?.to_ascii_lowercase();

        let pseudo = match name.as_str() {
            "root" => PseudoClass::Root,
            "empty" => PseudoClass::Empty,
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "only-child" => PseudoClass::OnlyChild,
            "first-of-type" => PseudoClass::FirstOfType,
            "last-of-type" => PseudoClass::LastOfType,
            "only-of-type" => PseudoClass::OnlyOfType,
            "checked" => PseudoClass::Checked,
            "disabled" => PseudoClass::Disabled,
            "enabled" => PseudoClass::Enabled,
            "nth-child" => PseudoClass::NthChild(self.parse_nth_argument()?),
            "nth-last-child" => PseudoClass::NthLastChild(self.parse_nth_argument()?),
            "nth-of-type" => PseudoClass::NthOfType(self.parse_nth_argument()?),
            "nth-last-of-type" => PseudoClass::NthLastOfType(self.parse_nth_argument()?),
            "not" => {
                self.expect('(')?;
                let start = self.pos;
                let selectors = self.parse_list(true)?;
                let source: String = self.chars[start..self.pos].iter().collect();
                self.expect(')')?;
                PseudoClass::Not(Box::new(SelectorList {
                    source: source.trim().to_string(),
                    selectors,
                }))
            }
            other => return Err(self.error(format!("unsupported pseudo-class ':{}'", other))),
        };
        Ok(pseudo)
    }

    fn parse_nth_argument(&mut self) -> Result<NthExpression> {
        self.expect('(')?;
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c != ')') {
            self.pos += 1;
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        self.expect(')')?;
        NthExpression::parse(&raw)
            .ok_or_else(|| self.error(format!("invalid An+B expression '{}'", raw.trim())))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || c == '\\' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}
