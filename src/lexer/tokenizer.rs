use super::*;
use super::scanner::{bump, is_word_boundary, skip_comment, skip_whitespace_and_comments};

pub(super) fn next_token(lexer: &mut Lexer) -> Option<Spanned> {
    skip_whitespace_and_comments(lexer);

    let line = lexer.line;
    let column = lexer.column + 1;

    let token = match lexer.peek? {
        '{' => tokenize_symbol(lexer, Token::LBrace),
        '}' => tokenize_symbol(lexer, Token::RBrace),
        q @ ('"' | '\'') if has_closing_quote(lexer, q) => tokenize_quoted(lexer, q),
        _ => tokenize_word(lexer),
    };

    Some(Spanned { token, line, column })
}

fn tokenize_symbol(lexer: &mut Lexer, token: Token) -> Token {
    bump(lexer);
    token
}

/// Look ahead for the quote that closes the literal starting at `lexer.peek`.
/// Commented-out text does not count. Without a closing quote the opening
/// quote is just the first character of a bare word.
fn has_closing_quote(lexer: &Lexer, quote: char) -> bool {
    let mut in_comment = false;
    for ch in lexer.input.clone() {
        if in_comment {
            in_comment = ch != '\n';
            continue;
        }
        if ch == '#' {
            in_comment = true;
        } else if ch == quote {
            return true;
        }
    }
    false
}

fn tokenize_quoted(lexer: &mut Lexer, quote: char) -> Token {
    bump(lexer); // consume opening quote
    let mut content = String::new();

    while let Some(ch) = lexer.peek {
        if ch == quote {
            bump(lexer);
            break;
        }
        if ch == '#' {
            skip_comment(lexer);
            continue;
        }
        content.push(ch);
        bump(lexer);
    }

    Token::Word(content)
}

fn tokenize_word(lexer: &mut Lexer) -> Token {
    let mut word = String::new();

    while let Some(ch) = lexer.peek {
        if is_word_boundary(ch) {
            break;
        }
        word.push(ch);
        bump(lexer);
    }

    Token::Word(word)
}
