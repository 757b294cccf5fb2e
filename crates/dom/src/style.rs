//! Inline style declarations and property-name helpers
//!
//! A style attribute is an ordered list of `property:value` pairs. Order is
//! preserved on parse, merge and serialize so a round trip through an element
//! keeps the author's declaration order.

use serde::{Deserialize, Serialize};

/// Ordered `property -> value` declarations of a style attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDeclarations {
    declarations: Vec<(String, String)>,
}

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a style attribute string (`color: red; width:10px;`)
    ///
    /// Segments without a property name are dropped. A later declaration of
    /// the same property replaces the earlier value but keeps its position.
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        if css_text.trim().is_empty() {
            return style;
        }

        for rule in css_text.split(';') {
            let (prop, value) = match rule.split_once(':') {
                Some((prop, value)) => (prop.trim(), value.trim()),
                None => (rule.trim(), ""),
            };
            if prop.is_empty() {
                continue;
            }
            style.set(prop, value);
        }

        style
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(prop, _)| prop == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set a declaration, overriding in place or appending
    pub fn set(&mut self, property: &str, value: &str) {
        match self
            .declarations
            .iter_mut()
            .find(|(prop, _)| prop == property)
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .declarations
                .push((property.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let pos = self
            .declarations
            .iter()
            .position(|(prop, _)| prop == property)?;
        Some(self.declarations.remove(pos).1)
    }

    /// Overlay `other` on top of these declarations
    pub fn merge(&mut self, other: &StyleDeclarations) {
        for (prop, value) in other.iter() {
            self.set(prop, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(prop, value)| (prop.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize back to attribute form: `prop:value;prop:value`
    pub fn to_css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(prop, value)| format!("{}:{}", prop, value))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl<K, V> FromIterator<(K, V)> for StyleDeclarations
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Self::new();
        for (prop, value) in iter {
            style.set(prop.as_ref(), value.as_ref());
        }
        style
    }
}

/// `fontSize` -> `font-size`
pub fn hyphenate(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// `font-size` -> `fontSize`
pub fn camelize(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper_next = false;
    for c in property.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    if upper_next {
        out.push('-');
    }
    out
}

/// Relative lengths the legacy runtime can only resolve by measurement:
/// an unsigned integer, optionally suffixed with `em`, `pt`, `%` or `ex`.
pub fn is_unresolved_length(value: &str) -> bool {
    let digits = value.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    let unit = &value[digits..];
    unit.is_empty()
        || unit.eq_ignore_ascii_case("em")
        || unit.eq_ignore_ascii_case("pt")
        || unit.eq_ignore_ascii_case("ex")
        || unit == "%"
}

/// Resolve a length to pixels.
///
/// `font_size` resolves `em`/`ex`, `reference` resolves percentages.
/// Unitless numbers are taken as pixels.
pub fn to_pixels(value: &str, font_size: f64, reference: f64) -> Option<f64> {
    let value = value.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f64 = number.parse().ok()?;

    let px = match unit.to_ascii_lowercase().as_str() {
        "" | "px" => number,
        "em" | "rem" => number * font_size,
        "ex" => number * font_size / 2.0,
        "pt" => number * 4.0 / 3.0,
        "pc" => number * 16.0,
        "in" => number * 96.0,
        "cm" => number * 96.0 / 2.54,
        "mm" => number * 96.0 / 25.4,
        "%" => number * reference / 100.0,
        _ => return None,
    };
    Some(px)
}
