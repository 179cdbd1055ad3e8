use tracing::debug;

use super::*;

/// Parse one block level starting at the beginning of `tokens`.
///
/// Returns the document and the index at which parsing stopped: the position
/// of a `}` that closes no block opened here, or `tokens.len()` when the input
/// ran out. Blocks still open at the end are closed there. Malformed entries
/// are skipped rather than reported.
///
/// Nesting is tracked on an explicit stack of open sections, so input depth
/// is bounded by memory and not by the call stack.
pub fn parse_block(tokens: &[Token]) -> (Document, usize) {
    let mut root = Document::new();
    let mut open: Vec<Frame> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match (&tokens[i], tokens.get(i + 1)) {
            (Token::RBrace, _) => {
                let Some(frame) = open.pop() else {
                    return (root, i);
                };
                frame.close_into(current(&mut root, &mut open));
                i += 1;
            }
            (Token::LBrace, _) => {
                // A block with no name has nowhere to go in the tree
                debug!(index = i, "skipping anonymous block");
                open.push(Frame { name: None, doc: Document::new() });
                i += 1;
            }
            (Token::Word(name), Some(Token::LBrace)) => {
                open.push(Frame { name: Some(name.clone()), doc: Document::new() });
                i += 2;
            }
            (Token::Word(key), Some(Token::Word(raw))) => {
                current(&mut root, &mut open).push_word(key.clone(), raw);
                i += 2;
            }
            (Token::Word(key), _) => {
                debug!(key = %key, "skipping key without a value");
                i += 1;
            }
        }
    }

    while let Some(frame) = open.pop() {
        frame.close_into(current(&mut root, &mut open));
    }

    (root, i)
}

/// A section whose `{` has been read but not its `}`.
struct Frame {
    name: Option<String>,
    doc: Document,
}

impl Frame {
    /// Attach the finished section to its parent. Anonymous blocks vanish.
    fn close_into(self, parent: &mut Document) {
        if let Some(name) = self.name {
            parent.push(name, DocumentNode::Section(self.doc));
        }
    }
}

fn current<'a>(root: &'a mut Document, open: &'a mut [Frame]) -> &'a mut Document {
    match open.last_mut() {
        Some(frame) => &mut frame.doc,
        None => root,
    }
}

/// Where braces fail to pair up, as a token index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imbalance {
    /// The `{` at this index is never closed.
    Unclosed(usize),
    /// The `}` at this index has no matching `{`.
    UnmatchedClose(usize),
}

/// Well-formedness check run before strict parsing.
pub fn check_balance(tokens: &[Token]) -> Option<Imbalance> {
    let mut open = Vec::new();

    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Token::LBrace => open.push(i),
            Token::RBrace => {
                if open.pop().is_none() {
                    return Some(Imbalance::UnmatchedClose(i));
                }
            }
            Token::Word(_) => {}
        }
    }

    open.last().map(|&i| Imbalance::Unclosed(i))
}
