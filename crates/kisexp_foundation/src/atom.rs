//! Bare symbols.
//!
//! An [`Atom`] is the unquoted word of the s-expression grammar, e.g. the
//! `segment` in `(segment (start 0 0))` or the `locked` flag at its end.
//! Atoms compare equal to plain strings with the same text and hash
//! identically, so a `HashMap<Atom, _>` can be queried with a `&str`.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A bare symbol.
///
/// Cloning is cheap: the text is shared behind an [`Arc`]. Atoms are
/// case-sensitive and never normalized.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Atom(Arc<str>);

impl Atom {
    /// Creates an atom from its text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self(Arc::from(text))
    }

    /// Returns the text of this atom.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if both atoms share the same allocation.
    ///
    /// Atoms handed out by one [`AtomTable`](crate::AtomTable) for the same
    /// text always do.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Shorthand for constructing an [`Atom`].
///
/// `atom!(locked)` is `Atom::new("locked")`; string literals are accepted for
/// text that is not a Rust identifier, e.g. `atom!("F.Cu")`.
#[macro_export]
macro_rules! atom {
    ($name:ident) => {
        $crate::Atom::new(stringify!($name))
    };
    ($text:literal) => {
        $crate::Atom::new($text)
    };
}

impl Default for Atom {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl Borrow<str> for Atom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Atom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Atom {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Atom {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}

impl From<&String> for Atom {
    fn from(text: &String) -> Self {
        Self::new(text)
    }
}

impl From<Atom> for String {
    fn from(atom: Atom) -> Self {
        atom.0.as_ref().to_owned()
    }
}

// =============================================================================
// Comparison against plain strings
// =============================================================================

impl PartialEq<str> for Atom {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Atom {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl PartialEq<String> for Atom {
    fn eq(&self, other: &String) -> bool {
        *self.0 == **other
    }
}

impl PartialEq<Atom> for str {
    fn eq(&self, other: &Atom) -> bool {
        self == &*other.0
    }
}

impl PartialEq<Atom> for &str {
    fn eq(&self, other: &Atom) -> bool {
        *self == &*other.0
    }
}

impl PartialEq<Atom> for String {
    fn eq(&self, other: &Atom) -> bool {
        **self == *other.0
    }
}

impl PartialOrd<str> for Atom {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        Some((*self.0).cmp(other))
    }
}

impl PartialOrd<&str> for Atom {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        Some((*self.0).cmp(*other))
    }
}

impl PartialOrd<Atom> for str {
    fn partial_cmp(&self, other: &Atom) -> Option<Ordering> {
        Some(self.cmp(&*other.0))
    }
}
