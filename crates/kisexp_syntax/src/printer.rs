//! Pretty-printer for node trees.
//!
//! The default layout is the one KiCad files are written in. A list starts
//! with its head; up to five further leaf children follow on the same line,
//! separated by single spaces, as long as the text built so far for that
//! list is shorter than 120 characters. Every other child goes on its own
//! line, indented two spaces deeper than the list it belongs to. The layout
//! only affects whitespace, never how the text parses.
//!
//! # Example
//!
//! ```
//! use kisexp_syntax::{build_sexp, parse};
//!
//! let node = parse("(net 1 \"GND\")").unwrap();
//! assert_eq!(build_sexp(&node), "(net 1 \"GND\")");
//! ```

use kisexp_foundation::{Node, escape_string, format_float};

/// Configuration for pretty-printing.
#[derive(Debug, Clone)]
pub struct PrintConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
    /// How many children after the head may stay on the list's first line.
    pub inline_children: usize,
    /// A child only stays inline while the list text is shorter than this.
    pub soft_width: usize,
    /// Whether nested lists may stay inline too.
    pub inline_lists: bool,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            inline_children: 5,
            soft_width: 120,
            inline_lists: false,
        }
    }
}

impl PrintConfig {
    /// Creates the default (KiCad) layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything on one line.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            indent_width: 0,
            inline_children: usize::MAX,
            soft_width: usize::MAX,
            inline_lists: true,
        }
    }

    /// Sets the indentation width.
    #[must_use]
    pub const fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Sets how many children may stay on the first line.
    #[must_use]
    pub const fn with_inline_children(mut self, count: usize) -> Self {
        self.inline_children = count;
        self
    }

    /// Sets the soft line width.
    #[must_use]
    pub const fn with_soft_width(mut self, width: usize) -> Self {
        self.soft_width = width;
        self
    }
}

/// Prints a node tree in the default layout.
#[must_use]
pub fn build_sexp(node: &Node) -> String {
    build_sexp_with(node, &PrintConfig::default())
}

/// Prints a node tree with a custom layout.
#[must_use]
pub fn build_sexp_with(node: &Node, config: &PrintConfig) -> String {
    Printer { config }.print(node, config.indent_width)
}

struct Printer<'a> {
    config: &'a PrintConfig,
}

impl Printer<'_> {
    /// Prints `node`; children of a list go `indent` spaces in.
    fn print(&self, node: &Node, indent: usize) -> String {
        match node {
            Node::List(items) => self.print_list(items, indent),
            Node::Atom(a) if a.as_str().is_empty() => "\"\"".to_string(),
            Node::Atom(a) => a.to_string(),
            Node::String(s) => escape_string(s),
            Node::Int(n) => n.to_string(),
            Node::Float(n) => format_float(*n),
        }
    }

    fn print_list(&self, items: &[Node], indent: usize) -> String {
        let mut joined = String::from("(");
        // Width is measured in characters, not bytes.
        let mut width = 1;
        let child_indent = indent + self.config.indent_width;

        for (i, item) in items.iter().enumerate() {
            let inline = (1..=self.config.inline_children).contains(&i)
                && width < self.config.soft_width
                && (self.config.inline_lists || item.is_leaf());

            if inline {
                joined.push(' ');
                width += 1;
            } else if i >= 1 {
                joined.push('\n');
                joined.extend(std::iter::repeat_n(' ', indent));
                width += 1 + indent;
            }

            let text = self.print(item, child_indent);
            width += text.chars().count();
            joined.push_str(&text);
        }

        joined.push(')');
        joined
    }
}
