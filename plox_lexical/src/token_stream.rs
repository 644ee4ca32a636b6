//! Contains the [`TokenStream`] struct, the output of the lexical analysis phase.

use std::{fmt::Display, ops::Index, sync::Arc};

use derive_more::Deref;
use plox_base::{diagnostic::Handler, source_file::SourceFile};

use crate::{
    error,
    token::{self, Token},
};

/// Is the ordered list of [`Token`]s of a source file, always terminated by exactly one
/// [`token::TokenKind::Eof`] token.
///
/// This struct is the final output of the lexical analysis phase and is meant to be used by the
/// next stage of the interpreter.
#[derive(Debug, Clone, PartialEq, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Tokenizes the given source code.
    ///
    /// This function walks the source file once by calling the [`Token::lex()`] repeatedly until
    /// the source code is exhausted, then appends the end of file token.
    ///
    /// Lexical errors never stop the tokenization; each of them is reported to the `handler` and
    /// the lexer moves on to the next character.
    #[must_use]
    pub fn tokenize(source_file: &Arc<SourceFile>, handler: &dyn Handler<error::Error>) -> Self {
        // list of tokens to return
        let mut tokens = Vec::new();
        let mut cursor = source_file.cursor();

        loop {
            // Tokenizes the next token
            match Token::lex(&mut cursor, handler) {
                Ok(Some(token)) => tokens.push(token),
                Ok(None) | Err(token::Error::LexicalError) => (),
                Err(token::Error::EndOfSource) => break,
            }
        }

        tokens.push(Token::eof(&mut cursor));

        Self { tokens }
    }

    /// Gets the end of file token that terminates the stream.
    #[must_use]
    pub fn eof(&self) -> &Token {
        self.tokens
            .last()
            .expect("the token stream always ends with the end of file token")
    }

    /// Dissolves this struct into its list of tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> { self.tokens }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output { &self.tokens[index] }
}

impl Display for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for token in &self.tokens {
            writeln!(f, "{token}")?;
        }

        Ok(())
    }
}
