// Author: Dustin Pilgrim
// License: MIT

//! Tokenizer for the multipath config format.
//!
//! The format has only three kinds of token: `{`, `}` and words. A word is
//! either a quoted literal (quotes stripped) or a maximal run of characters
//! that are neither whitespace nor braces. `#` starts a comment that runs to
//! the end of the line.
//!
//! Known limitation: comments are recognised before quotes, so a `#` inside a
//! quoted literal still starts a comment. Real multipath configs never rely on
//! a literal `#` in a value.

use std::str::Chars;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LBrace,
    RBrace,
    Word(String),
}

/// A token together with the 1-based line and column of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 0,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Next token, or `None` at end of input. Never fails.
    pub fn next_token(&mut self) -> Option<Token> {
        self.next_spanned().map(|s| s.token)
    }

    /// Next token with the position where it starts.
    pub fn next_spanned(&mut self) -> Option<Spanned> {
        tokenizer::next_token(self)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Spanned;

    fn next(&mut self) -> Option<Spanned> {
        self.next_spanned()
    }
}

/// Tokenize a whole document. Empty or comment-only input yields no tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).map(|s| s.token).collect()
}

/// Tokenize a whole document, keeping token positions.
pub fn tokenize_spanned(input: &str) -> Vec<Spanned> {
    Lexer::new(input).collect()
}
