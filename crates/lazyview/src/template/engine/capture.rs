//! Output capture scopes
//!
//! Every evaluation writes into the innermost buffer of an [`OutputStack`].
//! Buffers are opened through [`CaptureScope`] guards: finishing a scope
//! returns its text, dropping an unfinished one discards it together with
//! anything opened above it, so the stack is back at its entry depth on every
//! exit path.

use std::ops::{Deref, DerefMut};

/// Stack of output buffers, innermost last
#[derive(Debug, Default)]
pub struct OutputStack {
    buffers: Vec<String>,
}

impl OutputStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open capture scopes
    pub fn depth(&self) -> usize {
        self.buffers.len()
    }

    /// Open a fresh capture scope on top of whatever is already open
    pub fn scope(&mut self) -> CaptureScope<'_> {
        let entry_depth = self.buffers.len();
        self.buffers.push(String::new());
        CaptureScope {
            stack: self,
            entry_depth,
            finished: false,
        }
    }

    /// Append to the innermost scope. Writes with no scope open are dropped.
    pub fn write(&mut self, text: &str) {
        match self.buffers.last_mut() {
            Some(buffer) => buffer.push_str(text),
            None => tracing::trace!(bytes = text.len(), "write outside capture scope dropped"),
        }
    }

    /// Bytes buffered in the innermost scope
    pub fn pending(&self) -> usize {
        self.buffers.last().map_or(0, String::len)
    }

    /// Discard every scope above `depth`, returning how many were dropped
    fn unwind_to(&mut self, depth: usize) -> usize {
        let dropped = self.buffers.len().saturating_sub(depth);
        self.buffers.truncate(depth);
        dropped
    }
}

/// An open capture scope; derefs to the underlying [`OutputStack`]
#[must_use = "dropping a capture scope discards its output"]
pub struct CaptureScope<'a> {
    stack: &'a mut OutputStack,
    entry_depth: usize,
    finished: bool,
}

impl CaptureScope<'_> {
    /// Close the scope and take its output
    pub fn finish(mut self) -> String {
        self.finished = true;
        // Scopes opened above this one are closed by their own guards
        self.stack.unwind_to(self.entry_depth + 1);
        self.stack.buffers.pop().unwrap_or_default()
    }
}

impl Deref for CaptureScope<'_> {
    type Target = OutputStack;

    fn deref(&self) -> &OutputStack {
        self.stack
    }
}

impl DerefMut for CaptureScope<'_> {
    fn deref_mut(&mut self) -> &mut OutputStack {
        self.stack
    }
}

impl Drop for CaptureScope<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let dropped = self.stack.unwind_to(self.entry_depth);
            tracing::trace!(
                dropped,
                depth = self.entry_depth,
                "capture scope unwound"
            );
        }
    }
}
