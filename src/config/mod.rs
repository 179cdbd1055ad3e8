// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::Path;

use crate::ast::Document;
use crate::error::{MpathError, Result};
use crate::layout::Layout;
use crate::parser::{ParseMode, Parser};
use crate::render::render_document;

mod access;
mod conversion;
mod helpers;

pub use access::Lookup;

/// A parsed multipath.conf with typed, dot-path access to its values.
pub struct MultipathConfig {
    document: Document,
    raw_content: String, // kept for line numbers in error messages
}

impl MultipathConfig {
    /// Load and strictly parse a multipath.conf.
    ///
    /// # Example
    /// ```no_run
    /// # use mpath_cfg::MultipathConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = MultipathConfig::from_file("/etc/multipath.conf")?;
    /// let interval: i64 = config.get("defaults.polling_interval")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with_mode(path, ParseMode::Strict)
    }

    pub fn from_file_with_mode<P: AsRef<Path>>(path: P, mode: ParseMode) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| MpathError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.as_ref().to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        Self::from_str_with_mode(&content, mode)
    }

    /// Parse config text (no file I/O).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Self::from_str_with_mode(content, ParseMode::Strict)
    }

    pub fn from_str_with_mode(content: &str, mode: ParseMode) -> Result<Self> {
        let document = Parser::with_mode(content, mode).parse_document()?;
        Ok(Self {
            document,
            raw_content: content.to_string(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// The domain view used to regenerate the file.
    pub fn layout(&self) -> Layout {
        Layout::from_document(&self.document)
    }

    /// Re-render the parsed document as it stands, in its original order.
    pub fn render(&self) -> String {
        render_document(&self.document)
    }
}

#[cfg(test)]
mod tests;
