//! Records: typed values with a schema.
//!
//! A type becomes a record by implementing [`Record`] (usually through
//! [`sexp_record!`](crate::sexp_record)). That gives it the two entry
//! points format code needs, [`Record::parse`] and [`Record::serialize`],
//! plus the node-level [`Record::from_node`] and [`Record::to_node`].

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use kisexp_foundation::{Atom, Error, Node, Result};
use kisexp_syntax::{ParseConfig, PrintConfig, build_sexp_with, parse_with};

use crate::codec::FieldCodec;
use crate::schema::Schema;

/// Lifecycle hooks of a record.
///
/// Both hooks default to doing nothing.
pub trait RecordHooks: Clone {
    /// Called once after all fields of a decoded record are filled.
    ///
    /// `parent` is the enclosing record under construction, if any; use
    /// [`Any::downcast_ref`] to inspect it.
    ///
    /// # Errors
    /// An error aborts decoding of the whole document.
    fn after_decode(&mut self, _parent: Option<&dyn Any>) -> Result<()> {
        Ok(())
    }

    /// Called once before the fields of a record are encoded.
    ///
    /// Return [`Cow::Owned`] with an adjusted copy to change what gets
    /// written without touching `self`.
    fn before_encode(&self) -> Cow<'_, Self> {
        Cow::Borrowed(self)
    }
}

/// A value mapped onto a tagged s-expression list.
pub trait Record: RecordHooks + Default + fmt::Debug + Send + Sync + 'static {
    /// The atom heading this record's list.
    const TAG: &'static str;

    /// Returns the schema of this record type.
    ///
    /// # Errors
    /// Returns the error the schema failed to build with.
    fn schema() -> Result<&'static Schema<Self>>;

    /// Decodes into `seed`, which supplies values for fields the input
    /// does not mention.
    ///
    /// `items` are the elements of the record's list; the head is skipped
    /// without being checked, so a renamed record decodes the same way.
    ///
    /// # Errors
    /// Returns a mapping error if the input does not fit the schema, or
    /// whatever [`RecordHooks::after_decode`] fails with.
    fn decode_with(mut seed: Self, items: &[Node], parent: Option<&dyn Any>) -> Result<Self> {
        Self::schema()?.decode_into(&mut seed, items)?;
        seed.after_decode(parent)?;
        Ok(seed)
    }

    /// Decodes a record from its list node.
    ///
    /// # Errors
    /// Returns a mapping error if `node` is not a list or does not fit.
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::List(items) => Self::decode_with(Self::default(), items, None),
            other => Err(Error::type_mismatch("list", other.type_name())),
        }
    }

    /// Encodes this record as a tagged list.
    ///
    /// # Errors
    /// Returns a mapping error naming the field that failed to encode.
    fn to_node(&self) -> Result<Node> {
        let schema = Self::schema()?;
        let prepared = self.before_encode();
        let mut out = vec![Node::Atom(schema.tag().clone())];
        schema.encode_into(&prepared, &mut out)?;
        Ok(Node::List(out))
    }

    /// Parses text into a record.
    ///
    /// # Errors
    /// Returns a grammar error for malformed text and a mapping error for
    /// text that does not fit the record.
    fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &ParseConfig::default())
    }

    /// Parses text into a record with custom parser limits.
    ///
    /// # Errors
    /// See [`Record::parse`].
    fn parse_with(text: &str, config: &ParseConfig) -> Result<Self> {
        Self::from_node(&parse_with(text, config)?)
    }

    /// Serializes the record in KiCad's layout.
    ///
    /// # Errors
    /// Returns a mapping error if a field cannot be encoded.
    fn serialize(&self) -> Result<String> {
        self.serialize_with(&PrintConfig::default())
    }

    /// Serializes the record with a custom layout.
    ///
    /// # Errors
    /// Returns a mapping error if a field cannot be encoded.
    fn serialize_with(&self, config: &PrintConfig) -> Result<String> {
        Ok(build_sexp_with(&self.to_node()?, config))
    }
}

// =============================================================================
// Nested
// =============================================================================

/// Codec for a field holding another record.
///
/// The field is selected by the record's own tag. Besides the record's
/// list elements it also accepts a single sub-list, which is what
/// `Named<Nested<R>>` hands it for `(name (tag ...))`.
pub struct Nested<R> {
    _marker: PhantomData<fn() -> R>,
}

impl<R> Nested<R> {
    /// Creates the codec.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<R> Default for Nested<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Nested<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nested<{}>", std::any::type_name::<R>())
    }
}

impl<R: Record> FieldCodec<R> for Nested<R> {
    fn tag_atoms(&self) -> Vec<Atom> {
        vec![Atom::new(R::TAG)]
    }

    fn decode(&self, items: &[Node], parent: Option<&dyn Any>) -> Result<R> {
        match items {
            [Node::List(elements)] => R::decode_with(R::default(), elements, parent),
            [] => Err(Error::arity(format!("{} list", R::TAG), 0)),
            _ => R::decode_with(R::default(), items, parent),
        }
    }

    fn encode(&self, value: &R) -> Result<Vec<Node>> {
        Ok(vec![value.to_node()?])
    }
}
