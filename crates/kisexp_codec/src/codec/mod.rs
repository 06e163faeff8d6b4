//! Field codecs.
//!
//! A [`FieldCodec`] knows how to turn the s-expression fragment that belongs
//! to one record field into a typed value, and how to turn that value back
//! into zero or more fragments. Codecs compose: [`Named`] puts a keyword in
//! front of whatever its inner codec produces, [`OmitDefault`] suppresses
//! output equal to the field default, and so on. Every layer only knows the
//! value type it passes through, so `OmitDefault<Named<LegacyCompatibleFlag>>`
//! needs no special casing.
//!
//! # Input convention
//!
//! `decode` receives a slice of nodes:
//!
//! - for a sub-list dispatched by its head, the list's elements *including*
//!   the head, e.g. `[width, 0.5]` for `(width 0.5)`;
//! - for a bare atom dispatched by itself, just that atom, e.g. `[locked]`;
//! - for a positional child, a one-element slice holding the child.

mod collections;
mod flags;
mod scalar;
mod wrappers;

use std::any::Any;

use kisexp_foundation::{Atom, Node, Result};

pub use collections::{Array, List, Untagged, Wrap};
pub use flags::{AtomChoice, Flag, LegacyCompatibleFlag, YesNoAtom};
pub use scalar::{Scalar, ScalarValue, atom, float, int, leaf, string};
pub use wrappers::{Maybe, Named, OmitDefault, Rename};

/// Metadata about the record field a codec is attached to.
#[derive(Debug)]
pub struct FieldInfo<'a, T> {
    /// Field name as declared.
    pub name: &'a str,
    /// The field's value in a default-constructed record.
    pub default: Option<&'a T>,
}

impl<'a, T> FieldInfo<'a, T> {
    /// Creates field metadata.
    #[must_use]
    pub const fn new(name: &'a str, default: Option<&'a T>) -> Self {
        Self { name, default }
    }

    /// The same field seen through a wrapper that changes the value type.
    #[must_use]
    pub const fn retyped<U>(&self, default: Option<&'a U>) -> FieldInfo<'a, U> {
        FieldInfo {
            name: self.name,
            default,
        }
    }
}

/// Bidirectional mapping between s-expression fragments and values of `T`.
pub trait FieldCodec<T>: Send + Sync {
    /// Called once when the owning schema is built.
    ///
    /// Wrappers forward to their inner codec before using `field`
    /// themselves.
    fn bind_field(&mut self, _field: &FieldInfo<'_, T>) {}

    /// Atoms that select this field when they head a sub-list or appear
    /// bare. Empty means the field is positional.
    fn tag_atoms(&self) -> Vec<Atom> {
        Vec::new()
    }

    /// Decodes one matched fragment.
    ///
    /// `parent` is the record under construction.
    ///
    /// # Errors
    /// Returns a mapping error if the fragment does not fit `T`.
    fn decode(&self, items: &[Node], parent: Option<&dyn Any>) -> Result<T>;

    /// Stores a decoded value in the field.
    ///
    /// Repeatable fields override this to append instead of replace.
    fn assign(&self, slot: &mut T, value: T) {
        *slot = value;
    }

    /// Encodes a value into fragments, possibly none.
    ///
    /// # Errors
    /// Returns a mapping error if the value cannot be represented.
    fn encode(&self, value: &T) -> Result<Vec<Node>>;
}

/// Expects exactly one node.
pub(crate) fn single<'a>(items: &'a [Node], what: &str) -> Result<&'a Node> {
    match items {
        [node] => Ok(node),
        _ => Err(kisexp_foundation::Error::arity(
            format!("exactly one {what}"),
            items.len(),
        )),
    }
}
