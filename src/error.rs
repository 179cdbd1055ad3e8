// Author: Dustin Pilgrim
// License: MIT

/// The main error type for multipath config parsing, access, and persistence.
///
/// Parsing in lenient mode and rendering never produce errors; only strict
/// parsing, typed access, and the file collaborators do.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MpathError {
    /// Raised by strict parsing when `{` and `}` do not pair up.
    #[error("[MPATH] Unbalanced braces at {line}:{column}: {message}{}", suffix(.hint, .code))]
    UnbalancedBraces {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[MPATH] File Error '{path}': {message}{}", suffix(.hint, .code))]
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// JSON (de)serialisation failures from the volume store or the exporter.
    #[error("[MPATH] Serialize Error{}: {message}{}", at_path(.path), suffix(.hint, .code))]
    SerializeError {
        message: String,
        path: Option<String>,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[MPATH] Path '{path}' not found{}", suffix(.hint, .code))]
    PathNotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[MPATH] Type Error at line {line}: {message}{}", suffix(.hint, .code))]
    TypeError {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
}

pub type Result<T> = std::result::Result<T, MpathError>;

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

fn at_path(path: &Option<String>) -> String {
    path.as_ref().map_or(String::new(), |p| format!(" '{}'", p))
}
