//! Per-record schemas.
//!
//! A [`Schema`] is built once per record type from an ordered list of
//! fields. Building binds every codec to its field, collects the tag atoms
//! of all fields into a dispatch table and queues the untagged fields as
//! positional, in declaration order.
//!
//! # Example
//!
//! ```
//! use kisexp_codec::codec::{Flag, Named, OmitDefault, float};
//! use kisexp_codec::{Record, RecordHooks, Result, Schema, SchemaBuilder};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Pad {
//!     size: f64,
//!     locked: bool,
//! }
//!
//! impl RecordHooks for Pad {}
//!
//! impl Record for Pad {
//!     const TAG: &'static str = "pad";
//!
//!     fn schema() -> Result<&'static Schema<Self>> {
//!         static SCHEMA: std::sync::OnceLock<Result<Schema<Pad>>> = std::sync::OnceLock::new();
//!         Schema::cached(&SCHEMA, || {
//!             SchemaBuilder::<Pad>::new()
//!                 .field("size", |r| &r.size, |r| &mut r.size, OmitDefault::new(Named::new(float())))
//!                 .field("locked", |r| &r.locked, |r| &mut r.locked, Flag::new())
//!                 .build()
//!         })
//!     }
//! }
//!
//! let pad = Pad::parse("(pad (size 1.5) locked)").unwrap();
//! assert_eq!(pad, Pad { size: 1.5, locked: true });
//! assert_eq!(pad.serialize().unwrap(), "(pad\n  (size 1.5) locked)");
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::marker::PhantomData;
use std::slice;
use std::sync::OnceLock;

use kisexp_foundation::{Atom, Error, ErrorKind, Node, Result};

use crate::codec::{FieldCodec, FieldInfo};
use crate::record::Record;

/// Longest value rendering kept in mapping errors.
const MAX_RENDERED: usize = 120;

/// Shortens `text` to at most [`MAX_RENDERED`] characters.
pub(crate) fn shorten(text: String) -> String {
    if text.chars().count() <= MAX_RENDERED {
        return text;
    }
    let mut short: String = text.chars().take(MAX_RENDERED - 3).collect();
    short.push_str("...");
    short
}

fn render_items(items: &[Node]) -> String {
    match items {
        [single] => shorten(single.to_string()),
        _ => shorten(Node::List(items.to_vec()).to_string()),
    }
}

// =============================================================================
// Fields
// =============================================================================

/// A field with its value type erased, as stored in a [`Schema`].
trait ErasedField<R>: Send + Sync {
    fn name(&self) -> &'static str;
    fn tag_atoms(&self) -> Vec<Atom>;
    fn decode_into(&self, record: &mut R, items: &[Node]) -> Result<()>;
    fn encode_from(&self, record: &R, out: &mut Vec<Node>) -> Result<()>;
}

struct Field<R, T, C> {
    name: &'static str,
    /// `record.field`, used in error messages.
    target: String,
    get: fn(&R) -> &T,
    get_mut: fn(&mut R) -> &mut T,
    codec: C,
    _marker: PhantomData<fn() -> T>,
}

impl<R, T, C> ErasedField<R> for Field<R, T, C>
where
    R: Record,
    T: fmt::Debug + 'static,
    C: FieldCodec<T> + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn tag_atoms(&self) -> Vec<Atom> {
        self.codec.tag_atoms()
    }

    fn decode_into(&self, record: &mut R, items: &[Node]) -> Result<()> {
        let parent: &dyn Any = &*record;
        let value = self
            .codec
            .decode(items, Some(parent))
            .map_err(|err| err.within(&self.target, || render_items(items)))?;
        self.codec.assign((self.get_mut)(record), value);
        Ok(())
    }

    fn encode_from(&self, record: &R, out: &mut Vec<Node>) -> Result<()> {
        let value = (self.get)(record);
        let fragments = self
            .codec
            .encode(value)
            .map_err(|err| err.within(&self.target, || shorten(format!("{value:?}"))))?;
        out.extend(fragments);
        Ok(())
    }
}

// =============================================================================
// Schema
// =============================================================================

/// The derived layout of one record type.
pub struct Schema<R> {
    tag: Atom,
    fields: Vec<Box<dyn ErasedField<R>>>,
    /// Indices into `fields` of the untagged fields, in order.
    positional: Vec<usize>,
    /// Tag atom to index into `fields`.
    dispatch: HashMap<Atom, usize>,
    /// Fields that exist on the record but are never read or written.
    runtime: Vec<&'static str>,
}

impl<R: Record> Schema<R> {
    /// Returns the schema stored in `cell`, building it on first use.
    ///
    /// A failed build is cached too, so every later call reports the same
    /// error.
    ///
    /// # Errors
    /// Returns the error `build` failed with.
    pub fn cached(
        cell: &'static OnceLock<Result<Self>>,
        build: impl FnOnce() -> Result<Self>,
    ) -> Result<&'static Self> {
        cell.get_or_init(build).as_ref().map_err(Clone::clone)
    }

    /// The record's own tag.
    #[must_use]
    pub fn tag(&self) -> &Atom {
        &self.tag
    }

    /// Names of the mapped fields, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name())
    }

    /// Names of the positional fields, in the order they are filled.
    pub fn positional_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.positional.iter().map(|&i| self.fields[i].name())
    }

    /// Names of the fields after the end of the mapped section.
    #[must_use]
    pub fn runtime_fields(&self) -> &[&'static str] {
        &self.runtime
    }

    /// Returns the field a tag dispatches to.
    #[must_use]
    pub fn field_for_tag(&self, tag: &str) -> Option<&'static str> {
        self.dispatch.get(tag).map(|&i| self.fields[i].name())
    }

    /// Fills `record` from the elements of a list whose head is skipped.
    ///
    /// Children headed by a known tag (or bare known atoms) go to their
    /// field; everything else fills the next positional field.
    ///
    /// # Errors
    /// Returns a mapping error if a field cannot decode its fragment or a
    /// child is left over when all positional fields are taken.
    pub fn decode_into(&self, record: &mut R, items: &[Node]) -> Result<()> {
        let mut positional = self.positional.iter();

        for child in items.iter().skip(1) {
            let tagged = child
                .dispatch_key()
                .and_then(|key| self.dispatch.get(key).map(|&i| (key, i)));

            if let Some((key, index)) = tagged {
                let field = &self.fields[index];
                log::trace!("{}: dispatch {key} to {}", self.tag, field.name());
                let args = match child {
                    Node::List(elements) => elements.as_slice(),
                    other => slice::from_ref(other),
                };
                field.decode_into(record, args)?;
            } else if let Some(&index) = positional.next() {
                let field = &self.fields[index];
                log::trace!("{}: positional {child} to {}", self.tag, field.name());
                field.decode_into(record, slice::from_ref(child))?;
            } else {
                return Err(Error::unhandled_positional(
                    self.tag.as_str(),
                    shorten(child.to_string()),
                ));
            }
        }

        Ok(())
    }

    /// Appends the fragments of every mapped field to `out`, in declaration
    /// order.
    ///
    /// # Errors
    /// Returns a mapping error naming the first field that fails to encode.
    pub fn encode_into(&self, record: &R, out: &mut Vec<Node>) -> Result<()> {
        for field in &self.fields {
            field.encode_from(record, out)?;
        }
        Ok(())
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dispatch: Vec<_> = self.dispatch.keys().map(Atom::as_str).collect();
        dispatch.sort_unstable();
        f.debug_struct("Schema")
            .field("tag", &self.tag)
            .field("fields", &self.fields.len())
            .field("positional", &self.positional)
            .field("dispatch", &dispatch)
            .field("runtime", &self.runtime)
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds a [`Schema`] field by field.
///
/// Fields must be added in the order they appear in the file format.
/// After [`end`](Self::end), further fields are runtime-only: they are
/// skipped by decode and encode.
pub struct SchemaBuilder<R> {
    tag: Atom,
    fields: Vec<Box<dyn ErasedField<R>>>,
    runtime: Vec<&'static str>,
    ended: bool,
    /// Source of field defaults for binding.
    defaults: R,
}

impl<R: Record> SchemaBuilder<R> {
    /// Starts a schema for `R`, tagged with `R::TAG`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag: Atom::new(R::TAG),
            fields: Vec::new(),
            runtime: Vec::new(),
            ended: false,
            defaults: R::default(),
        }
    }

    /// Adds a mapped field.
    ///
    /// `get` and `get_mut` project the field out of the record; the codec is
    /// bound to the field's name and default here.
    #[must_use]
    pub fn field<T, C>(
        mut self,
        name: &'static str,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
        mut codec: C,
    ) -> Self
    where
        T: fmt::Debug + 'static,
        C: FieldCodec<T> + Send + Sync + 'static,
    {
        if self.ended {
            return self.runtime(name);
        }

        codec.bind_field(&FieldInfo::new(name, Some(get(&self.defaults))));
        self.fields.push(Box::new(Field {
            name,
            target: format!("{}.{name}", self.tag),
            get,
            get_mut,
            codec,
            _marker: PhantomData,
        }));
        self
    }

    /// Ends the mapped section of the record.
    #[must_use]
    pub const fn end(mut self) -> Self {
        self.ended = true;
        self
    }

    /// Declares a runtime-only field.
    #[must_use]
    pub fn runtime(mut self, name: &'static str) -> Self {
        log::debug!("{}: field {name} is runtime-only", self.tag);
        self.ended = true;
        self.runtime.push(name);
        self
    }

    /// Derives the dispatch table and positional queue.
    ///
    /// # Errors
    /// Returns [`ErrorKind::DuplicateTag`] if two fields claim the same tag.
    pub fn build(self) -> Result<Schema<R>> {
        let mut dispatch = HashMap::new();
        let mut positional = Vec::new();

        for (index, field) in self.fields.iter().enumerate() {
            let atoms = field.tag_atoms();
            if atoms.is_empty() {
                positional.push(index);
                continue;
            }
            for atom in atoms {
                match dispatch.entry(atom) {
                    Entry::Vacant(slot) => {
                        slot.insert(index);
                    }
                    Entry::Occupied(slot) => {
                        return Err(Error::new(ErrorKind::DuplicateTag {
                            record: self.tag.to_string(),
                            tag: slot.key().to_string(),
                            first: self.fields[*slot.get()].name().to_string(),
                            second: field.name().to_string(),
                        }));
                    }
                }
            }
        }

        log::debug!(
            "registered record {}: {} fields, {} positional, {} tags",
            self.tag,
            self.fields.len(),
            positional.len(),
            dispatch.len()
        );

        Ok(Schema {
            tag: self.tag,
            fields: self.fields,
            positional,
            dispatch,
            runtime: self.runtime,
        })
    }
}

impl<R: Record> Default for SchemaBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
