//! Scalar leaf codecs.
//!
//! A scalar field holds exactly one leaf node. Conversions are lenient in
//! the two directions KiCad files need: integers and integral floats are
//! interchangeable, and so are quoted strings and bare atoms.

use std::any::Any;
use std::marker::PhantomData;

use kisexp_foundation::{Atom, Error, Node, Result};

use super::{FieldCodec, single};

/// A value that maps onto one leaf node.
pub trait ScalarValue: Sized + Send + Sync + 'static {
    /// Type name used in error messages.
    const NAME: &'static str;

    /// Converts a leaf node.
    ///
    /// # Errors
    /// Returns a type mismatch if the node cannot represent `Self`.
    fn from_node(node: &Node) -> Result<Self>;

    /// Converts back into a leaf node.
    fn to_node(&self) -> Node;
}

fn mismatch(expected: &'static str, node: &Node) -> Error {
    Error::type_mismatch(expected, format!("{} {node}", node.type_name()))
}

impl ScalarValue for i64 {
    const NAME: &'static str = "int";

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Int(n) => Ok(*n),
            Node::Float(f)
                if f.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(f) =>
            {
                Ok(*f as i64)
            }
            other => Err(mismatch(Self::NAME, other)),
        }
    }

    fn to_node(&self) -> Node {
        Node::Int(*self)
    }
}

macro_rules! narrow_int {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl ScalarValue for $ty {
            const NAME: &'static str = $name;

            fn from_node(node: &Node) -> Result<Self> {
                let wide = i64::from_node(node).map_err(|_| mismatch(Self::NAME, node))?;
                <$ty>::try_from(wide).map_err(|_| mismatch(Self::NAME, node))
            }

            fn to_node(&self) -> Node {
                Node::Int(i64::from(*self))
            }
        }
    )*};
}

narrow_int!(i32 => "i32", u32 => "u32", u8 => "u8");

impl ScalarValue for f64 {
    const NAME: &'static str = "float";

    #[allow(clippy::cast_precision_loss)]
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Float(f) => Ok(*f),
            Node::Int(n) => Ok(*n as f64),
            other => Err(mismatch(Self::NAME, other)),
        }
    }

    fn to_node(&self) -> Node {
        Node::Float(*self)
    }
}

impl ScalarValue for String {
    const NAME: &'static str = "string";

    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::String(s) => Ok(s.clone()),
            Node::Atom(a) => Ok(a.to_string()),
            other => Err(mismatch(Self::NAME, other)),
        }
    }

    fn to_node(&self) -> Node {
        Node::String(self.clone())
    }
}

impl ScalarValue for Atom {
    const NAME: &'static str = "atom";

    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Atom(a) => Ok(a.clone()),
            Node::String(s) => Ok(Atom::from(s.as_str())),
            other => Err(mismatch(Self::NAME, other)),
        }
    }

    fn to_node(&self) -> Node {
        Node::Atom(self.clone())
    }
}

/// Any leaf, kept as is. Used for values whose lexical class varies, such
/// as hex stamps that may lex as integers or symbols.
impl ScalarValue for Node {
    const NAME: &'static str = "leaf";

    fn from_node(node: &Node) -> Result<Self> {
        if node.is_leaf() {
            Ok(node.clone())
        } else {
            Err(mismatch(Self::NAME, node))
        }
    }

    fn to_node(&self) -> Node {
        self.clone()
    }
}

/// Codec for a single scalar leaf.
#[derive(Debug)]
pub struct Scalar<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Scalar<T> {
    /// Creates the codec.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Scalar<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ScalarValue> FieldCodec<T> for Scalar<T> {
    fn decode(&self, items: &[Node], _parent: Option<&dyn Any>) -> Result<T> {
        T::from_node(single(items, T::NAME)?)
    }

    fn encode(&self, value: &T) -> Result<Vec<Node>> {
        Ok(vec![value.to_node()])
    }
}

/// Integer field.
#[must_use]
pub const fn int() -> Scalar<i64> {
    Scalar::new()
}

/// Float field.
#[must_use]
pub const fn float() -> Scalar<f64> {
    Scalar::new()
}

/// Quoted string field.
#[must_use]
pub const fn string() -> Scalar<String> {
    Scalar::new()
}

/// Bare atom field.
#[must_use]
pub const fn atom() -> Scalar<Atom> {
    Scalar::new()
}

/// Raw leaf field.
#[must_use]
pub const fn leaf() -> Scalar<Node> {
    Scalar::new()
}
