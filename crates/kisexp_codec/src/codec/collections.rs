//! Codecs for repeated and re-parenthesized values.

use std::any::Any;
use std::slice;

use kisexp_foundation::{Atom, Error, Node, Result};

use super::{FieldCodec, FieldInfo, single};

// =============================================================================
// Array
// =============================================================================

/// A run of values inside one list, e.g. the names in `(members "a" "b")`.
///
/// Every element is decoded on its own; encoding concatenates the
/// fragments of all elements.
#[derive(Debug)]
pub struct Array<C> {
    inner: C,
}

impl<C> Array<C> {
    /// Wraps the element codec.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<T, C: FieldCodec<T>> FieldCodec<Vec<T>> for Array<C> {
    fn bind_field(&mut self, field: &FieldInfo<'_, Vec<T>>) {
        self.inner.bind_field(&field.retyped(None));
    }

    fn tag_atoms(&self) -> Vec<Atom> {
        self.inner.tag_atoms()
    }

    fn decode(&self, items: &[Node], parent: Option<&dyn Any>) -> Result<Vec<T>> {
        items
            .iter()
            .map(|item| self.inner.decode(slice::from_ref(item), parent))
            .collect()
    }

    fn encode(&self, value: &Vec<T>) -> Result<Vec<Node>> {
        let mut out = Vec::with_capacity(value.len());
        for element in value {
            out.extend(self.inner.encode(element)?);
        }
        Ok(out)
    }
}

// =============================================================================
// List
// =============================================================================

/// A repeatable field: every occurrence among the record's children adds
/// one element.
///
/// Decoding yields a one-element vector which [`assign`](FieldCodec::assign)
/// appends to the field of the record under construction.
///
/// Inside [`Named`](super::Named) the elements arrive together, as in
/// `(pins (pin 1) (pin 2))`; a run of sub-lists decodes one element per
/// sub-list, and an empty run decodes to no elements.
#[derive(Debug)]
pub struct List<C> {
    inner: C,
}

impl<C> List<C> {
    /// Wraps the element codec.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<T, C: FieldCodec<T>> FieldCodec<Vec<T>> for List<C> {
    fn bind_field(&mut self, field: &FieldInfo<'_, Vec<T>>) {
        self.inner.bind_field(&field.retyped(None));
    }

    fn tag_atoms(&self) -> Vec<Atom> {
        self.inner.tag_atoms()
    }

    fn decode(&self, items: &[Node], parent: Option<&dyn Any>) -> Result<Vec<T>> {
        if items.iter().all(|item| matches!(item, Node::List(_))) {
            return items
                .iter()
                .map(|item| self.inner.decode(slice::from_ref(item), parent))
                .collect();
        }
        Ok(vec![self.inner.decode(items, parent)?])
    }

    fn assign(&self, slot: &mut Vec<T>, value: Vec<T>) {
        slot.extend(value);
    }

    fn encode(&self, value: &Vec<T>) -> Result<Vec<Node>> {
        let mut out = Vec::with_capacity(value.len());
        for element in value {
            out.extend(self.inner.encode(element)?);
        }
        Ok(out)
    }
}

// =============================================================================
// Wrap
// =============================================================================

/// Adds one pair of parentheses around every inner fragment.
///
/// `Wrap<Flag>` reads and writes `(free)` instead of `free`.
#[derive(Debug)]
pub struct Wrap<C> {
    inner: C,
}

impl<C> Wrap<C> {
    /// Wraps the inner codec.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<T, C: FieldCodec<T>> FieldCodec<T> for Wrap<C> {
    fn bind_field(&mut self, field: &FieldInfo<'_, T>) {
        self.inner.bind_field(field);
    }

    fn tag_atoms(&self) -> Vec<Atom> {
        self.inner.tag_atoms()
    }

    fn decode(&self, items: &[Node], parent: Option<&dyn Any>) -> Result<T> {
        match single(items, "wrapped value")? {
            Node::List(inner) => self.inner.decode(inner, parent),
            _ => self.inner.decode(items, parent),
        }
    }

    fn assign(&self, slot: &mut T, value: T) {
        self.inner.assign(slot, value);
    }

    fn encode(&self, value: &T) -> Result<Vec<Node>> {
        Ok(self
            .inner
            .encode(value)?
            .into_iter()
            .map(|fragment| Node::List(vec![fragment]))
            .collect())
    }
}

// =============================================================================
// Untagged
// =============================================================================

/// Drops the inner codec's own tag from its list.
///
/// Used where a container lists several records of one type without
/// repeating their keyword, e.g. `(layers (0 "F.Cu" signal) ...)`.
/// Decoding puts the tag back before handing the list to the inner codec.
#[derive(Debug)]
pub struct Untagged<C> {
    inner: C,
}

impl<C> Untagged<C> {
    /// Wraps a tagged codec.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<T, C: FieldCodec<T>> FieldCodec<T> for Untagged<C> {
    fn bind_field(&mut self, field: &FieldInfo<'_, T>) {
        self.inner.bind_field(field);
    }

    fn decode(&self, items: &[Node], parent: Option<&dyn Any>) -> Result<T> {
        let node = single(items, "untagged list")?;
        let Node::List(rest) = node else {
            return Err(Error::type_mismatch("list", node.type_name()));
        };
        let tag = self.inner.tag_atoms().into_iter().next().unwrap_or_default();
        let mut tagged = Vec::with_capacity(rest.len() + 1);
        tagged.push(Node::Atom(tag));
        tagged.extend(rest.iter().cloned());
        self.inner.decode(&tagged, parent)
    }

    fn assign(&self, slot: &mut T, value: T) {
        self.inner.assign(slot, value);
    }

    fn encode(&self, value: &T) -> Result<Vec<Node>> {
        self.inner
            .encode(value)?
            .into_iter()
            .map(|fragment| match fragment {
                Node::List(mut items) if !items.is_empty() => {
                    items.remove(0);
                    Ok(Node::List(items))
                }
                other => Err(Error::type_mismatch("tagged list", other.type_name())),
            })
            .collect()
    }
}
