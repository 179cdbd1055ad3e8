// Author: Dustin Pilgrim
// License: MIT

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{MpathError, Result};

/// Where multipathd reads its configuration.
pub const DEFAULT_CONF_PATH: &str = "/etc/multipath.conf";

/// What [`backup_and_write`] did besides writing the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// The backup copy, if an existing file was backed up.
    pub backup: Option<PathBuf>,
}

/// `<path>.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

/// Copy an existing `path` to `<path>.bak`, then overwrite `path` with
/// `contents`.
///
/// The backup is best effort: a failed copy is logged and the write goes
/// ahead. A failed write is an error. Not safe against concurrent writers to
/// the same path.
pub fn backup_and_write<P: AsRef<Path>>(path: P, contents: &str) -> Result<WriteOutcome> {
    let path = path.as_ref();
    let mut outcome = WriteOutcome { backup: None };

    if path.exists() {
        let backup = backup_path(path);
        match fs::copy(path, &backup) {
            Ok(_) => {
                info!(backup = %backup.display(), "backup created");
                outcome.backup = Some(backup);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "backup failed; writing anyway"),
        }
    } else {
        info!(path = %path.display(), "no existing file; a new one will be created");
    }

    fs::write(path, contents).map_err(|e| MpathError::FileError {
        message: format!("Failed to write file: {}", e),
        path: path.display().to_string(),
        hint: Some("Check that the directory exists and is writable".into()),
        code: Some(302),
    })?;

    Ok(outcome)
}
