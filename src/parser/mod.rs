// Author: Dustin Pilgrim
// License: MIT

use crate::ast::{Document, DocumentNode};
use crate::error::{MpathError, Result};
use crate::lexer::{tokenize_spanned, Token};

mod document;
mod promote;
mod value;

pub use document::{check_balance, parse_block, Imbalance};
pub use promote::insert_or_promote;
pub use value::coerce;

/// How to treat braces that do not pair up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Reject unbalanced input with [`MpathError::UnbalancedBraces`].
    #[default]
    Strict,
    /// Never fail: an unclosed block runs to the end of input and a stray
    /// `}` ends the document early. Suits partially written configs.
    Lenient,
}

pub struct Parser {
    tokens: Vec<Token>,
    positions: Vec<(usize, usize)>,
    mode: ParseMode,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Self::with_mode(input, ParseMode::default())
    }

    pub fn with_mode(input: &str, mode: ParseMode) -> Self {
        let (tokens, positions) = tokenize_spanned(input)
            .into_iter()
            .map(|s| (s.token, (s.line, s.column)))
            .unzip();
        Self { tokens, positions, mode }
    }

    /// Build a parser over tokens that did not come from text. Errors then
    /// report token indices instead of line/column.
    pub fn from_tokens(tokens: Vec<Token>, mode: ParseMode) -> Self {
        Self { tokens, positions: Vec::new(), mode }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    pub fn parse_document(&self) -> Result<Document> {
        if self.mode == ParseMode::Strict {
            if let Some(imbalance) = check_balance(&self.tokens) {
                return Err(self.imbalance_error(imbalance));
            }
        }
        let (doc, _) = parse_block(&self.tokens);
        Ok(doc)
    }

    fn position(&self, index: usize) -> (usize, usize) {
        self.positions.get(index).copied().unwrap_or((0, index))
    }

    fn imbalance_error(&self, imbalance: Imbalance) -> MpathError {
        match imbalance {
            Imbalance::Unclosed(index) => {
                let (line, column) = self.position(index);
                MpathError::UnbalancedBraces {
                    message: "block opened here is never closed".into(),
                    line,
                    column,
                    hint: Some("Add the missing '}' or parse in lenient mode".into()),
                    code: Some(101),
                }
            }
            Imbalance::UnmatchedClose(index) => {
                let (line, column) = self.position(index);
                MpathError::UnbalancedBraces {
                    message: "'}' without a matching '{'".into(),
                    line,
                    column,
                    hint: Some("Remove the extra '}'".into()),
                    code: Some(102),
                }
            }
        }
    }
}

/// Parse a config document, rejecting unbalanced braces.
pub fn parse_document(input: &str) -> Result<Document> {
    Parser::new(input).parse_document()
}

pub fn parse_document_with(input: &str, mode: ParseMode) -> Result<Document> {
    Parser::with_mode(input, mode).parse_document()
}

/// Best-effort parse that never fails; malformed input yields a partial or
/// empty document.
pub fn parse_document_lenient(input: &str) -> Document {
    let (doc, _) = parse_block(&crate::lexer::tokenize(input));
    doc
}
