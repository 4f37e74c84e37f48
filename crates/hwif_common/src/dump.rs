//! Indented, human-readable dumps of resolved models.
//!
//! Nesting depth is carried by the [`Dumper`] value itself and threaded
//! through every [`Dump`] implementation, so dumps of independent models never
//! share state.

use std::fmt::{self, Write};

/// Number of spaces per nesting level.
const INDENT_WIDTH: usize = 4;

/// A text writer that tracks the current nesting depth.
#[derive(Debug, Default)]
pub struct Dumper {
    out: String,
    depth: usize,
}

impl Dumper {
    /// Creates an empty writer at depth 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Writes one line, indented to the current depth.
    pub fn line(&mut self, text: impl fmt::Display) {
        let pad = self.depth * INDENT_WIDTH;
        // Writing into a String cannot fail.
        let _ = writeln!(self.out, "{:pad$}{text}", "");
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Runs `f` one level deeper, restoring the depth afterwards.
    pub fn nested(&mut self, f: impl FnOnce(&mut Dumper)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    /// Consumes the writer and returns the accumulated text.
    pub fn finish(self) -> String {
        self.out
    }
}

/// Types that can render themselves into a [`Dumper`].
pub trait Dump {
    /// Writes every attribute of `self` at the writer's current depth.
    fn dump(&self, out: &mut Dumper);

    /// Renders `self` into a fresh string.
    fn dump_to_string(&self) -> String {
        let mut out = Dumper::new();
        self.dump(&mut out);
        out.finish()
    }
}
