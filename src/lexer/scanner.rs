use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Skip whitespace (newlines included) and comments
pub(super) fn skip_whitespace_and_comments(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        match c {
            '#' => skip_comment(lexer),
            c if c.is_whitespace() => {
                bump(lexer);
            }
            _ => break,
        }
    }
}

/// Skip from `#` up to, but not including, the end of the line
pub(super) fn skip_comment(lexer: &mut Lexer) {
    while let Some(ch) = lexer.peek {
        if ch == '\n' {
            break;
        }
        bump(lexer);
    }
}

/// Characters that end a bare word
pub(super) fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || c == '{' || c == '}' || c == '#'
}
