//! Atom deduplication.
//!
//! KiCad documents repeat the same handful of keywords thousands of times
//! (`xy`, `layer`, `F.Cu`, ...). The parser owns one [`AtomTable`] per
//! document so that every occurrence of a keyword shares one allocation.
//! Tables are plain values; there is no process-wide interner.

use std::collections::HashSet;

use crate::atom::Atom;

/// Per-document table of atoms.
#[derive(Clone, Debug, Default)]
pub struct AtomTable {
    atoms: HashSet<Atom>,
    /// Number of lookups that returned an existing atom.
    hits: usize,
}

impl AtomTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared atom for `text`, inserting it on first use.
    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(atom) = self.atoms.get(text) {
            self.hits += 1;
            return atom.clone();
        }

        let atom = Atom::new(text);
        self.atoms.insert(atom.clone());
        atom
    }

    /// Returns the atom for `text` if it has been interned.
    #[must_use]
    pub fn get(&self, text: &str) -> Option<&Atom> {
        self.atoms.get(text)
    }

    /// Returns the number of distinct atoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns how many lookups were served from the table.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits
    }
}
