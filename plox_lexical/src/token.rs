//! Is a module containing the [`Token`] type and all of its related types.

use std::{collections::HashMap, fmt::Display, str::FromStr};

use enum_as_inner::EnumAsInner;
use lazy_static::lazy_static;
use plox_base::{
    diagnostic::Handler,
    source_file::{Cursor, SourceElement, Span},
};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};
use thiserror::Error;

use crate::error::{self, UnexpectedCharacter, UnterminatedString};

/// Is an enumeration representing the reserved words of the language.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, strum_macros::Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum KeywordKind {
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref KEYWORD_TABLE: HashMap<&'static str, KeywordKind> =
                KeywordKind::iter().map(|keyword| (keyword.as_str(), keyword)).collect();
        }
        KEYWORD_TABLE.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the string representation of the keyword as it is written in the source code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Class => "class",
            Self::Else => "else",
            Self::False => "false",
            Self::For => "for",
            Self::Fun => "fun",
            Self::If => "if",
            Self::Nil => "nil",
            Self::Or => "or",
            Self::Print => "print",
            Self::Return => "return",
            Self::Super => "super",
            Self::This => "this",
            Self::True => "true",
            Self::Var => "var",
            Self::While => "while",
        }
    }
}

/// Is an enumeration containing all kinds of tokens the lexer can produce.
///
/// Displays as the upper snake case name of the kind, e.g. `BANG_EQUAL` or `WHILE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum TokenKind {
    // single-character punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // one or two character operators
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // literals
    Identifier,
    String,
    Number,

    Keyword(KeywordKind),

    Eof,
}

impl From<KeywordKind> for TokenKind {
    fn from(keyword: KeywordKind) -> Self { Self::Keyword(keyword) }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword(keyword) => Display::fmt(keyword, f),
            kind => {
                let name: &'static str = kind.into();
                f.write_str(name)
            }
        }
    }
}

/// Is the value carried by a literal token.
#[derive(Debug, Clone, PartialEq, EnumAsInner)]
pub enum Literal {
    /// The value of a number literal.
    Number(f64),

    /// The raw text between the quotes of a string literal.
    String(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // always shows the fractional part, `1` is displayed as `1.0`
            Self::Number(number) if number.is_finite() && number.fract() == 0.0 => {
                write!(f, "{number:.1}")
            }
            Self::Number(number) => write!(f, "{number}"),
            Self::String(string) => f.write_str(string),
        }
    }
}

/// Represents a single classified unit of the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Is the kind of the token.
    pub kind: TokenKind,

    /// Is the span that makes up the token. Empty for the [`TokenKind::Eof`] token.
    pub span: Span,

    /// Is the value of the token. Only string and number literals carry one.
    pub literal: Option<Literal>,

    /// Is the line the cursor was at when the token was made.
    pub line: usize,
}

impl Token {
    /// Gets the exact source text that the token was made from.
    #[must_use]
    pub fn lexeme(&self) -> &str { self.span.str() }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ", self.kind, self.lexeme())?;

        match &self.literal {
            Some(literal) => write!(f, "{literal}"),
            None => f.write_str("null"),
        }
    }
}

impl SourceElement for Token {
    fn span(&self) -> Span { self.span.clone() }
}

/// Is an error that can occur when invoking the [`Token::lex`] method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("encountered a lexical error that has been reported to the handler.")]
    LexicalError,

    #[error("the cursor argument is at the end of the source code.")]
    EndOfSource,
}

impl Token {
    /// Creates a token spanning from the start of the cursor's current token to its position.
    fn create(cursor: &Cursor, kind: TokenKind, literal: Option<Literal>) -> Self {
        Self {
            kind,
            span: cursor.span(),
            literal,
            line: cursor.line(),
        }
    }

    /// Creates the [`TokenKind::Eof`] token at the position of the cursor.
    pub(crate) fn eof(cursor: &mut Cursor) -> Self {
        cursor.begin();
        Self::create(cursor, TokenKind::Eof, None)
    }

    /// Checks if the given character is a valid first character of an identifier.
    fn is_first_identifier_character(character: char) -> bool {
        character.is_ascii_alphabetic() || character == '_'
    }

    /// Checks if the given character is a valid character of an identifier.
    fn is_identifier_character(character: char) -> bool {
        character.is_ascii_alphanumeric() || character == '_'
    }

    fn handle_operator(cursor: &mut Cursor, single: TokenKind, double: TokenKind) -> Self {
        let kind = if cursor.eat('=') { double } else { single };
        Self::create(cursor, kind, None)
    }

    fn handle_comment(cursor: &mut Cursor) -> Option<Self> {
        // Line comment, the new line is left for the next lex
        if cursor.eat('/') {
            cursor.eat_while(|character| character != '\n');
            None
        }
        // Just a single slash punctuation
        else {
            Some(Self::create(cursor, TokenKind::Slash, None))
        }
    }

    fn handle_string_literal(
        cursor: &mut Cursor,
        handler: &dyn Handler<error::Error>,
    ) -> Result<Self, Error> {
        cursor.eat_while(|character| character != '"');

        if !cursor.eat('"') {
            handler.receive(
                UnterminatedString {
                    span: cursor.span(),
                    line: cursor.line(),
                }
                .into(),
            );
            return Err(Error::LexicalError);
        }

        // strips the quotes, both are one byte long
        let lexeme = cursor.lexeme();
        let value = lexeme[1..lexeme.len() - 1].to_owned();

        Ok(Self::create(
            cursor,
            TokenKind::String,
            Some(Literal::String(value)),
        ))
    }

    fn handle_numeric_literal(cursor: &mut Cursor) -> Self {
        // Tokenizes the whole number part
        cursor.eat_while(|character| character.is_ascii_digit());

        // Tokenizes the fractional part, a trailing dot is left for the next lex
        if cursor.peek() == Some('.')
            && cursor
                .peek_next()
                .map_or(false, |character| character.is_ascii_digit())
        {
            cursor.advance();
            cursor.eat_while(|character| character.is_ascii_digit());
        }

        let value = cursor
            .lexeme()
            .parse::<f64>()
            .expect("digits with an optional fractional part should always parse");

        Self::create(cursor, TokenKind::Number, Some(Literal::Number(value)))
    }

    fn handle_identifier_and_keyword(cursor: &mut Cursor) -> Self {
        cursor.eat_while(Self::is_identifier_character);

        // Checks if the word is a keyword
        let kind = KeywordKind::from_str(cursor.lexeme())
            .map_or(TokenKind::Identifier, TokenKind::Keyword);

        Self::create(cursor, kind, None)
    }

    /// Lexes the next token from the given cursor.
    ///
    /// The tokenization starts at the current position of the cursor. The function moves the
    /// cursor at least once and forwards it until it makes a token. After the token is made, the
    /// cursor is left at the next character that is not part of the token.
    ///
    /// Returns `Ok(None)` when the consumed characters don't make a token: white spaces and line
    /// comments.
    ///
    /// # Errors
    /// - [`Error::EndOfSource`] - The cursor argument is at the end of the source code.
    /// - [`Error::LexicalError`] - A lexical error occurred and was reported to the `handler`.
    pub fn lex(
        cursor: &mut Cursor,
        handler: &dyn Handler<error::Error>,
    ) -> Result<Option<Self>, Error> {
        cursor.begin();

        // Gets the first character
        let character = cursor.advance().ok_or(Error::EndOfSource)?;

        let kind = match character {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,

            '!' => {
                return Ok(Some(Self::handle_operator(
                    cursor,
                    TokenKind::Bang,
                    TokenKind::BangEqual,
                )))
            }
            '=' => {
                return Ok(Some(Self::handle_operator(
                    cursor,
                    TokenKind::Equal,
                    TokenKind::EqualEqual,
                )))
            }
            '<' => {
                return Ok(Some(Self::handle_operator(
                    cursor,
                    TokenKind::Less,
                    TokenKind::LessEqual,
                )))
            }
            '>' => {
                return Ok(Some(Self::handle_operator(
                    cursor,
                    TokenKind::Greater,
                    TokenKind::GreaterEqual,
                )))
            }

            // Found comment/single slash punctuation
            '/' => return Ok(Self::handle_comment(cursor)),

            // Found white spaces, the cursor already counted the new line
            ' ' | '\t' | '\r' | '\n' => return Ok(None),

            // Found string literal
            '"' => return Self::handle_string_literal(cursor, handler).map(Some),

            // Found numeric literal
            character if character.is_ascii_digit() => {
                return Ok(Some(Self::handle_numeric_literal(cursor)))
            }

            // Found identifier/keyword
            character if Self::is_first_identifier_character(character) => {
                return Ok(Some(Self::handle_identifier_and_keyword(cursor)))
            }

            character => {
                handler.receive(
                    UnexpectedCharacter {
                        span: cursor.span(),
                        line: cursor.line(),
                        character,
                    }
                    .into(),
                );
                return Err(Error::LexicalError);
            }
        };

        Ok(Some(Self::create(cursor, kind, None)))
    }
}
