//! Contains all kinds of lexical errors that can occur while tokenizing the source code.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use plox_base::{log::Report, source_file::Span};

/// The source code contains a character that doesn't start any token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnexpectedCharacter {
    /// The span of the offending character.
    pub span: Span,

    /// The line the character is found on.
    pub line: usize,

    /// The offending character.
    pub character: char,
}

impl Display for UnexpectedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            Report::new(
                self.line,
                String::new(),
                format!("Unexpected character '{}'.", self.character)
            )
        )
    }
}

/// The source code ends before a string literal is closed by a `"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnterminatedString {
    /// The span from the opening `"` to the end of the source code.
    pub span: Span,

    /// The line the source code ends on.
    pub line: usize,
}

impl Display for UnterminatedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            Report::new(self.line, String::new(), "Unterminated string.")
        )
    }
}

/// Is an enumeration containing all kinds of lexical errors that can occur while tokenizing the
/// source code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    UnexpectedCharacter(UnexpectedCharacter),
    UnterminatedString(UnterminatedString),
}

impl Error {
    /// Gets the line the error is reported on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter(err) => err.line,
            Self::UnterminatedString(err) => err.line,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter(err) => write!(f, "{err}"),
            Self::UnterminatedString(err) => write!(f, "{err}"),
        }
    }
}
