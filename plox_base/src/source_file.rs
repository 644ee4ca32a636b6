#![allow(clippy::future_not_send)]

//! Contains the code related to the source code input and the [`Cursor`] that walks over it.

use std::{
    fmt::{Debug, Display},
    fs::File,
    path::PathBuf,
    sync::Arc,
};

use getset::{CopyGetters, Getters};
use memmap::MmapOptions;
use ouroboros::self_referencing;
use thiserror::Error;

/// Represents an error that occurs when loading/creating a source file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),
}

/// Represents a source code input for the lexer.
#[derive(Getters)]
pub struct SourceFile {
    source: Source,

    /// Gets the full path to the source file, or the name given to an in-memory source.
    #[get = "pub"]
    full_path: PathBuf,
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("full_path", &self.full_path)
            .field("length", &self.content().len())
            .finish()
    }
}

enum Source {
    Mapped(MappedSource),
    Memory(String),
}

impl Source {
    fn content(&self) -> &str {
        match self {
            Self::Mapped(mapped) => mapped.content(),
            Self::Memory(string) => string,
        }
    }
}

#[self_referencing]
struct MappedSource {
    file: File,
    mapped: Option<memmap::Mmap>,

    #[borrows(mapped)]
    mapped_str: &'this str,
}

impl MappedSource {
    fn create(file: File) -> Result<Self, Error> {
        // an empty file can't be mapped
        let mapped = if file.metadata()?.len() == 0 {
            None
        } else {
            Some(unsafe { MmapOptions::new().map(&file)? })
        };
        MappedSourceTryBuilder {
            file,
            mapped,
            mapped_str_builder: |mapped| {
                mapped.as_ref().map_or(Ok(""), |mapped| {
                    std::str::from_utf8(mapped).map_err(Error::from)
                })
            },
        }
        .try_build()
    }

    fn content(&self) -> &str { self.borrow_mapped_str() }
}

impl SourceFile {
    fn new(full_path: PathBuf, source: Source) -> Arc<Self> {
        Arc::new(Self { source, full_path })
    }

    /// Gets the content of the source file.
    #[must_use]
    pub fn content(&self) -> &str { self.source.content() }

    /// Gets a fresh [`Cursor`] positioned at the beginning of the source file.
    #[must_use]
    pub fn cursor<'a>(self: &'a Arc<Self>) -> Cursor<'a> {
        Cursor {
            source_file: self,
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Loads the source file from the given file path.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when mapping the file to memory.
    /// - [`Error::Utf8Error`]: Error occurred when converting the mapped bytes to a string.
    pub fn load(file: File, path: PathBuf) -> Result<Arc<Self>, Error> {
        let source = MappedSource::create(file)?;
        Ok(Self::new(path, Source::Mapped(source)))
    }

    /// Creates a source file that keeps the given content in memory.
    ///
    /// Used for the lines typed into the interactive prompt.
    #[must_use]
    pub fn from_string(name: impl Into<PathBuf>, content: impl Into<String>) -> Arc<Self> {
        Self::new(name.into(), Source::Memory(content.into()))
    }

    /// Creates a temporary source file and writes the given displayable object to it.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when creating the temporary file, writing to, and
    ///   mapping it to memory.
    /// - [`Error::Utf8Error`]: Error occurred when converting the mapped bytes to a string.
    pub fn temp(display: impl Display) -> Result<Arc<Self>, Error> {
        use std::io::Write;

        let mut tempfile = tempfile::Builder::new()
            .prefix("plox")
            .suffix(".lox")
            .tempfile()?;

        write!(tempfile.as_file_mut(), "{display}")?;
        let path = tempfile.path().to_owned();

        Self::load(tempfile.into_file(), path)
    }
}

/// Is an unsigned integer that represents a byte index in the source code.
pub type ByteIndex = usize;

/// Represents a range of characters in a source file.
#[derive(Clone, Getters, CopyGetters)]
pub struct Span {
    /// Gets the start byte index of the span.
    #[get_copy = "pub"]
    start: ByteIndex,

    /// Gets the end byte index of the span (exclusive).
    #[get_copy = "pub"]
    end: ByteIndex,

    /// Gets the source file that the span is located in.
    #[get = "pub"]
    source_file: Arc<SourceFile>,
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("content", &self.str())
            .finish()
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source_file, &other.source_file)
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Span {}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        Arc::as_ptr(&self.source_file).hash(state);
    }
}

impl Span {
    /// Creates a span from the given start and end byte indices in the source file.
    ///
    /// Returns [`None`] if the range is reversed, out of bounds, or splits a character.
    ///
    /// # Parameters
    /// - `start`: The start byte index of the span.
    /// - `end`: The end byte index of the span (exclusive).
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, start: ByteIndex, end: ByteIndex) -> Option<Self> {
        let content = source_file.content();
        if start > end
            || content.len() < end
            || !content.is_char_boundary(start)
            || !content.is_char_boundary(end)
        {
            return None;
        }

        Some(Self {
            start,
            end,
            source_file,
        })
    }

    /// Gets the string slice of the source code that the span represents.
    #[must_use]
    pub fn str(&self) -> &str { &self.source_file.content()[self.start..self.end] }

    /// Checks if the span covers no characters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.start == self.end }
}

/// Represents an element that is located within a source file.
pub trait SourceElement {
    /// Gets the span location of the element.
    fn span(&self) -> Span;
}

impl<T: SourceElement> SourceElement for Box<T> {
    fn span(&self) -> Span { self.as_ref().span() }
}

/// Is the scanning position over a single [`SourceFile`].
///
/// `start` marks the first byte of the token being scanned, `current` the next unread byte and
/// `line` the 1-based line number. `start <= current <= content.len()` always holds and both
/// offsets sit on character boundaries.
///
/// A cursor is created fresh by [`SourceFile::cursor`] and can't be rewound.
#[derive(Debug, Clone, CopyGetters)]
pub struct Cursor<'a> {
    /// Gets the source file that the cursor is walking over.
    #[get_copy = "pub"]
    source_file: &'a Arc<SourceFile>,

    /// Gets the byte index of the first character of the token being scanned.
    #[get_copy = "pub"]
    start: ByteIndex,

    /// Gets the byte index of the next unread character.
    #[get_copy = "pub"]
    current: ByteIndex,

    /// Gets the line number the cursor is at (starts at 1).
    #[get_copy = "pub"]
    line: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str { &self.source_file.content()[self.current..] }

    /// Checks if every character of the source file has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool { self.current >= self.source_file.content().len() }

    /// Marks the next unread character as the start of a new token.
    pub fn begin(&mut self) { self.start = self.current; }

    /// Consumes the next character, moving to the next line if it is a `\n`.
    pub fn advance(&mut self) -> Option<char> {
        let character = self.peek()?;
        self.current += character.len_utf8();

        if character == '\n' {
            self.line += 1;
        }

        Some(character)
    }

    /// Peeks at the next unread character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> { self.rest().chars().next() }

    /// Peeks at the character right after the next unread one without consuming anything.
    #[must_use]
    pub fn peek_next(&self) -> Option<char> { self.rest().chars().nth(1) }

    /// Consumes the next character only if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes characters as long as the predicate holds for the next one.
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().map_or(false, &predicate) {
            self.advance();
        }
    }

    /// Gets the span from the start of the current token up to the next unread character.
    #[must_use]
    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.current,
            source_file: self.source_file.clone(),
        }
    }

    /// Gets the source text of the current token.
    #[must_use]
    pub fn lexeme(&self) -> &'a str { &self.source_file.content()[self.start..self.current] }
}

#[cfg(test)]
mod tests;
