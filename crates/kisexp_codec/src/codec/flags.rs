//! Boolean and enumerated-atom codecs.

use std::any::Any;

use kisexp_foundation::{Atom, Error, Node, Result};

use super::{FieldCodec, FieldInfo, single};

/// Text of an atom or string leaf.
fn leaf_text(node: &Node) -> Option<&str> {
    match node {
        Node::Atom(a) => Some(a.as_str()),
        Node::String(s) => Some(s),
        _ => None,
    }
}

// =============================================================================
// Flag
// =============================================================================

/// A boolean spelled as the presence of a bare atom, e.g. `locked`.
///
/// The atom defaults to the field name. If the field defaults to `true`
/// the flag is inverted: the atom's presence then means `false`.
#[derive(Debug, Default)]
pub struct Flag {
    atom: Option<Atom>,
    invert: Option<bool>,
}

impl Flag {
    /// Flag named after its field.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            atom: None,
            invert: None,
        }
    }

    /// Flag spelled with an explicit atom.
    #[must_use]
    pub fn with_atom(atom: &str) -> Self {
        Self {
            atom: Some(Atom::new(atom)),
            invert: None,
        }
    }

    /// Overrides whether presence means `false`.
    #[must_use]
    pub const fn inverted(mut self, invert: bool) -> Self {
        self.invert = Some(invert);
        self
    }

    fn present_value(&self) -> bool {
        !self.invert.unwrap_or(false)
    }
}

impl FieldCodec<bool> for Flag {
    fn bind_field(&mut self, field: &FieldInfo<'_, bool>) {
        if self.atom.is_none() {
            self.atom = Some(Atom::new(field.name));
        }
        if self.invert.is_none() {
            self.invert = Some(field.default.copied().unwrap_or(false));
        }
    }

    fn tag_atoms(&self) -> Vec<Atom> {
        self.atom.iter().cloned().collect()
    }

    fn decode(&self, _items: &[Node], _parent: Option<&dyn Any>) -> Result<bool> {
        Ok(self.present_value())
    }

    fn encode(&self, value: &bool) -> Result<Vec<Node>> {
        if *value != self.present_value() {
            return Ok(Vec::new());
        }
        Ok(self.atom.iter().cloned().map(Node::Atom).collect())
    }
}

// =============================================================================
// YesNoAtom / LegacyCompatibleFlag
// =============================================================================

/// A boolean spelled as one of two atoms, `yes`/`no` by default.
#[derive(Debug)]
pub struct YesNoAtom {
    yes: Atom,
    no: Atom,
}

impl YesNoAtom {
    /// `yes` / `no`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_atoms("yes", "no")
    }

    /// Custom spellings, e.g. `allowed` / `not_allowed`.
    #[must_use]
    pub fn with_atoms(yes: &str, no: &str) -> Self {
        Self {
            yes: Atom::new(yes),
            no: Atom::new(no),
        }
    }

    fn read(&self, node: &Node) -> Result<bool> {
        match leaf_text(node) {
            Some(text) if self.yes == text => Ok(true),
            Some(text) if self.no == text => Ok(false),
            _ => Err(Error::invalid_atom(
                node.to_string(),
                &[self.yes.as_str(), self.no.as_str()],
            )),
        }
    }

    fn write(&self, value: bool) -> Node {
        let atom = if value { &self.yes } else { &self.no };
        Node::Atom(atom.clone())
    }
}

impl Default for YesNoAtom {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldCodec<bool> for YesNoAtom {
    fn decode(&self, items: &[Node], _parent: Option<&dyn Any>) -> Result<bool> {
        self.read(single(items, "yes/no atom")?)
    }

    fn encode(&self, value: &bool) -> Result<Vec<Node>> {
        Ok(vec![self.write(*value)])
    }
}

/// [`YesNoAtom`] that also accepts the legacy bare form.
///
/// Newer files write `(bold yes)`, older ones just `bold` or `(bold)`; an
/// empty value decodes to `value_when_empty`.
#[derive(Debug)]
pub struct LegacyCompatibleFlag {
    atoms: YesNoAtom,
    value_when_empty: bool,
}

impl LegacyCompatibleFlag {
    /// `yes` / `no`, empty meaning `true`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            atoms: YesNoAtom::new(),
            value_when_empty: true,
        }
    }

    /// Custom spellings and empty value.
    #[must_use]
    pub fn with_atoms(yes: &str, no: &str, value_when_empty: bool) -> Self {
        Self {
            atoms: YesNoAtom::with_atoms(yes, no),
            value_when_empty,
        }
    }
}

impl Default for LegacyCompatibleFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldCodec<bool> for LegacyCompatibleFlag {
    fn decode(&self, items: &[Node], _parent: Option<&dyn Any>) -> Result<bool> {
        if items.is_empty() {
            return Ok(self.value_when_empty);
        }
        self.atoms.read(single(items, "yes/no atom")?)
    }

    fn encode(&self, value: &bool) -> Result<Vec<Node>> {
        Ok(vec![self.atoms.write(*value)])
    }
}

// =============================================================================
// AtomChoice
// =============================================================================

/// One atom out of a fixed set.
///
/// Each choice is also a tag atom, so a bare `left` among a record's
/// children selects this field.
#[derive(Debug)]
pub struct AtomChoice {
    choices: &'static [&'static str],
}

impl AtomChoice {
    /// Creates the codec.
    #[must_use]
    pub const fn new(choices: &'static [&'static str]) -> Self {
        Self { choices }
    }

    /// Returns true if `text` is one of the choices.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.choices.contains(&text)
    }

    fn check(&self, text: &str) -> Result<()> {
        if self.contains(text) {
            Ok(())
        } else {
            Err(Error::invalid_atom(text, self.choices))
        }
    }
}

impl FieldCodec<Atom> for AtomChoice {
    fn tag_atoms(&self) -> Vec<Atom> {
        self.choices.iter().copied().map(Atom::new).collect()
    }

    fn decode(&self, items: &[Node], _parent: Option<&dyn Any>) -> Result<Atom> {
        let node = single(items, "atom")?;
        let Some(text) = leaf_text(node) else {
            return Err(Error::type_mismatch("atom", node.type_name()));
        };
        self.check(text)?;
        Ok(match node {
            Node::Atom(a) => a.clone(),
            _ => Atom::new(text),
        })
    }

    fn encode(&self, value: &Atom) -> Result<Vec<Node>> {
        self.check(value.as_str())?;
        Ok(vec![Node::Atom(value.clone())])
    }
}
