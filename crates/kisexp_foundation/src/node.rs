//! The s-expression node tree.
//!
//! [`Node`] is the intermediate representation shared by both directions of
//! the codec: the parser produces it, records decode from it and encode into
//! it, and the printer turns it back into text.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::atom::Atom;

/// A parsed s-expression.
///
/// Leaves are atoms, strings, integers and floats; a list is an ordered
/// sequence of nodes. The first element of a list, when it is an atom, is
/// conventionally the tag naming what the list represents.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// Bare symbol like `segment` or `F.Cu`
    Atom(Atom),
    /// Quoted string like `"GND"`
    String(String),
    /// Integer literal like `42`
    Int(i64),
    /// Float literal like `0.25`
    Float(f64),
    /// Parenthesized list like `(width 0.25)`
    List(Vec<Node>),
}

impl Node {
    /// Creates a list node.
    #[must_use]
    pub fn list(items: impl IntoIterator<Item = Node>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Creates an atom node.
    #[must_use]
    pub fn atom(text: &str) -> Self {
        Self::Atom(Atom::new(text))
    }

    /// Creates a string node.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::String(text.into())
    }

    /// Returns true if this is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns true if this is a leaf (anything but a list).
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !self.is_list()
    }

    /// Returns the atom if this is an atom.
    #[must_use]
    pub const fn as_atom(&self) -> Option<&Atom> {
        match self {
            Self::Atom(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the string if this is a quoted string.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float if this is a float.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the elements if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the tag of a list: its first element, if that is an atom.
    #[must_use]
    pub fn tag(&self) -> Option<&Atom> {
        self.as_list()?.first()?.as_atom()
    }

    /// Returns the atom this node is dispatched by inside a record.
    ///
    /// That is the node itself for a bare atom and the tag for a list.
    #[must_use]
    pub fn dispatch_key(&self) -> Option<&Atom> {
        match self {
            Self::Atom(a) => Some(a),
            Self::List(_) => self.tag(),
            _ => None,
        }
    }

    /// Returns a human-readable name for the kind of this node.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Atom(_) => "atom",
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::List(_) => "list",
        }
    }
}

impl From<Atom> for Node {
    fn from(atom: Atom) -> Self {
        Self::Atom(atom)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::List(items)
    }
}

/// Single-line rendering, used in error messages.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(a) => write!(f, "{a}"),
            Self::String(s) => f.write_str(&escape_string(s)),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => f.write_str(&format_float(*n)),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Formats a float with six decimals, trailing zeros stripped.
///
/// At least one digit always follows the decimal point: `1.0`, `1.25`.
#[must_use]
pub fn format_float(value: f64) -> String {
    let mut text = format!("{value:.6}");
    if !value.is_finite() {
        return text;
    }
    let trimmed = text.trim_end_matches('0').len();
    text.truncate(trimmed);
    if text.ends_with('.') {
        text.push('0');
    }
    text
}

/// Quotes a string, escaping contained `"` as `\"`.
#[must_use]
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
