//! Keyword and default-handling wrappers.

use std::any::Any;

use kisexp_foundation::{Atom, Error, Node, Result};

use super::{FieldCodec, FieldInfo, single};

// =============================================================================
// Named
// =============================================================================

/// Wraps the inner fragments in a keyword list: `(name inner...)`.
///
/// The keyword defaults to the field name. When the inner codec emits
/// nothing, `Named` emits nothing too.
#[derive(Debug)]
pub struct Named<C> {
    inner: C,
    name: Option<Atom>,
}

impl<C> Named<C> {
    /// Uses the field name as keyword.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner, name: None }
    }

    /// Uses an explicit keyword.
    #[must_use]
    pub fn with_name(name: &str, inner: C) -> Self {
        Self {
            inner,
            name: Some(Atom::new(name)),
        }
    }
}

impl<T, C: FieldCodec<T>> FieldCodec<T> for Named<C> {
    fn bind_field(&mut self, field: &FieldInfo<'_, T>) {
        self.inner.bind_field(field);
        if self.name.is_none() {
            self.name = Some(Atom::new(field.name));
        }
    }

    fn tag_atoms(&self) -> Vec<Atom> {
        self.name.iter().cloned().collect()
    }

    fn decode(&self, items: &[Node], parent: Option<&dyn Any>) -> Result<T> {
        self.inner.decode(items.get(1..).unwrap_or_default(), parent)
    }

    fn assign(&self, slot: &mut T, value: T) {
        self.inner.assign(slot, value);
    }

    fn encode(&self, value: &T) -> Result<Vec<Node>> {
        let inner = self.inner.encode(value)?;
        if inner.is_empty() {
            return Ok(Vec::new());
        }
        let head = self.name.clone().unwrap_or_default();
        let mut list = Vec::with_capacity(inner.len() + 1);
        list.push(Node::Atom(head));
        list.extend(inner);
        Ok(vec![Node::List(list)])
    }
}

// =============================================================================
// Rename
// =============================================================================

/// Replaces the head of the inner codec's list with another keyword.
///
/// Used when a record type appears under a field-specific keyword, e.g. an
/// `xy` point stored as `(start 0 0)`. Decoding hands the whole list,
/// head included, to the inner codec.
///
/// An inner codec without tag atoms writes bare values; those are written
/// after the keyword, `(angle 90.0)`, and read back without it.
#[derive(Debug)]
pub struct Rename<C> {
    inner: C,
    name: Option<Atom>,
}

impl<C> Rename<C> {
    /// Uses the field name as keyword.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner, name: None }
    }

    /// Uses an explicit keyword.
    #[must_use]
    pub fn with_name(name: &str, inner: C) -> Self {
        Self {
            inner,
            name: Some(Atom::new(name)),
        }
    }
}

impl<T, C: FieldCodec<T>> FieldCodec<T> for Rename<C> {
    fn bind_field(&mut self, field: &FieldInfo<'_, T>) {
        if self.name.is_none() {
            self.name = Some(Atom::new(field.name));
        }
        self.inner.bind_field(field);
    }

    fn tag_atoms(&self) -> Vec<Atom> {
        self.name.iter().cloned().collect()
    }

    fn decode(&self, items: &[Node], parent: Option<&dyn Any>) -> Result<T> {
        if self.inner.tag_atoms().is_empty() {
            return self.inner.decode(items.get(1..).unwrap_or_default(), parent);
        }
        self.inner.decode(items, parent)
    }

    fn assign(&self, slot: &mut T, value: T) {
        self.inner.assign(slot, value);
    }

    fn encode(&self, value: &T) -> Result<Vec<Node>> {
        let encoded = self.inner.encode(value)?;
        if encoded.is_empty() {
            return Ok(Vec::new());
        }
        let head = Node::Atom(self.name.clone().unwrap_or_default());

        if self.inner.tag_atoms().is_empty() {
            let mut list = Vec::with_capacity(encoded.len() + 1);
            list.push(head);
            list.extend(encoded);
            return Ok(vec![Node::List(list)]);
        }

        match single(&encoded, "fragment to rename")? {
            Node::List(items) => Ok(vec![Node::List(
                std::iter::once(head)
                    .chain(items.iter().skip(1).cloned())
                    .collect(),
            )]),
            leaf => Err(Error::type_mismatch("tagged list", leaf.type_name())),
        }
    }
}

// =============================================================================
// OmitDefault
// =============================================================================

/// Emits nothing while the value equals the field default.
///
/// The default is captured when the schema is built and compared with
/// `PartialEq`, so structured defaults compare by value.
#[derive(Debug)]
pub struct OmitDefault<C, T> {
    inner: C,
    default: Option<T>,
}

impl<C, T> OmitDefault<C, T> {
    /// Takes the default from the field declaration.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self {
            inner,
            default: None,
        }
    }

    /// Uses an explicit default instead of the field's.
    #[must_use]
    pub const fn with_default(default: T, inner: C) -> Self {
        Self {
            inner,
            default: Some(default),
        }
    }
}

impl<T, C> FieldCodec<T> for OmitDefault<C, T>
where
    T: Clone + PartialEq + Send + Sync,
    C: FieldCodec<T>,
{
    fn bind_field(&mut self, field: &FieldInfo<'_, T>) {
        self.inner.bind_field(field);
        if self.default.is_none() {
            self.default = field.default.cloned();
        }
    }

    fn tag_atoms(&self) -> Vec<Atom> {
        self.inner.tag_atoms()
    }

    fn decode(&self, items: &[Node], parent: Option<&dyn Any>) -> Result<T> {
        self.inner.decode(items, parent)
    }

    fn assign(&self, slot: &mut T, value: T) {
        self.inner.assign(slot, value);
    }

    fn encode(&self, value: &T) -> Result<Vec<Node>> {
        if self.default.as_ref() == Some(value) {
            return Ok(Vec::new());
        }
        self.inner.encode(value)
    }
}

// =============================================================================
// Maybe
// =============================================================================

/// Optional field: absent fragments decode to `None`, `None` encodes to
/// nothing.
#[derive(Debug)]
pub struct Maybe<C> {
    inner: C,
}

impl<C> Maybe<C> {
    /// Wraps a codec for the present case.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<T, C: FieldCodec<T>> FieldCodec<Option<T>> for Maybe<C> {
    fn bind_field(&mut self, field: &FieldInfo<'_, Option<T>>) {
        let default = field.default.and_then(Option::as_ref);
        self.inner.bind_field(&field.retyped(default));
    }

    fn tag_atoms(&self) -> Vec<Atom> {
        self.inner.tag_atoms()
    }

    fn decode(&self, items: &[Node], parent: Option<&dyn Any>) -> Result<Option<T>> {
        self.inner.decode(items, parent).map(Some)
    }

    fn assign(&self, slot: &mut Option<T>, value: Option<T>) {
        match (slot.as_mut(), value) {
            (Some(existing), Some(value)) => self.inner.assign(existing, value),
            (_, value) => *slot = value,
        }
    }

    fn encode(&self, value: &Option<T>) -> Result<Vec<Node>> {
        value
            .as_ref()
            .map_or_else(|| Ok(Vec::new()), |v| self.inner.encode(v))
    }
}
