use crate::error::MpathError;
use crate::lexer::{tokenize_spanned, Token};

/// Find the line where the value at `path` is written, plus the line's text.
///
/// Walks the token stream keeping a stack of open section names; only words
/// in key position match. Numeric path segments are ignored since repeated
/// blocks share a name. Returns
/// `(0, "<key not found>")` when nothing matches.
pub(super) fn find_config_line(path: &str, raw_content: &str) -> (usize, String) {
    let wanted: Vec<&str> = path
        .split('.')
        .filter(|s| !s.is_empty() && s.parse::<usize>().is_err())
        .collect();
    if wanted.is_empty() {
        return (0, "<key not found>".into());
    }

    let tokens = tokenize_spanned(raw_content);
    let mut scope: Vec<&str> = Vec::new();
    // After `{`, `}` or a complete `key value` pair the next word is a key
    let mut expecting_key = true;

    for (i, spanned) in tokens.iter().enumerate() {
        match &spanned.token {
            Token::RBrace => {
                scope.pop();
                expecting_key = true;
            }
            Token::LBrace => {
                let name = match i.checked_sub(1).map(|p| &tokens[p].token) {
                    Some(Token::Word(w)) if !expecting_key => w.as_str(),
                    _ => "",
                };
                scope.push(name);
                expecting_key = true;
            }
            Token::Word(_) if !expecting_key => expecting_key = true,
            Token::Word(word) => {
                expecting_key = false;
                let at_key = scope.len() + 1 == wanted.len()
                    && scope.iter().zip(&wanted).all(|(a, b)| a == b)
                    && wanted.last() == Some(&word.as_str());
                if at_key {
                    let text = raw_content
                        .lines()
                        .nth(spanned.line - 1)
                        .unwrap_or_default()
                        .trim()
                        .to_string();
                    return (spanned.line, text);
                }
            }
        }
    }

    (0, "<key not found>".into())
}

/// Attach the config line to a type error raised while reading `path`.
pub(super) fn with_line_info(e: MpathError, path: &str, raw_content: &str) -> MpathError {
    match e {
        MpathError::TypeError { message, hint, code, .. } => {
            let (line, snippet) = find_config_line(path, raw_content);
            if line > 0 {
                MpathError::TypeError {
                    message: format!("{}\n  → {}", message, snippet),
                    line,
                    hint,
                    code,
                }
            } else {
                MpathError::TypeError { message, line: 0, hint, code }
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_words_are_not_keys() {
        let raw = "multipaths {\n\tmultipath {\n\t\twwid alias\n\t\talias alias\n\t}\n}";
        let (line, text) = find_config_line("multipaths.multipath.0.alias", raw);
        assert_eq!(line, 4);
        assert_eq!(text, "alias alias");

        let (line, _) = find_config_line("defaults.wwid", "defaults {\n\tuid wwid\n}");
        assert_eq!(line, 0);
    }

    #[test]
    fn test_block_named_like_a_value() {
        let raw = "defaults {\n\tpolling_interval 10\n}\nblacklist {\n\twwid defaults\n\tpolling_interval x\n}";
        let (line, _) = find_config_line("blacklist.polling_interval", raw);
        assert_eq!(line, 6);
        let (line, _) = find_config_line("defaults.polling_interval", raw);
        assert_eq!(line, 2);
    }
}
