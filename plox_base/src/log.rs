//! Provides the types used for printing diagnostics and failures to the console.

use std::fmt::Display;

use derive_new::new;

/// Is a struct implementing [`Display`] that reports a diagnostic tied to a line of the source
/// code.
///
/// Renders as `[line {line}] Error{location}: {message}`. The `location` is printed verbatim,
/// so it either is empty or starts with a space (e.g. ` at end`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Report<T> {
    /// The line number the diagnostic originates from (starts at 1).
    pub line: usize,

    /// Describes where on the line the diagnostic occurred.
    pub location: String,

    /// The message to be displayed.
    pub message: T,
}

impl<T: Display> Display for Report<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[line {}] Error{}: {}",
            self.line, self.location, self.message
        )
    }
}

/// Is a struct implementing [`Display`] that represents a failure that isn't tied to any line of
/// the source code, such as an unreadable input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.display)
    }
}
