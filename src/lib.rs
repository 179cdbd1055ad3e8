pub mod ast;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod lexer;
pub mod parser;
pub mod presets;
pub mod render;
pub mod sink;
pub mod store;
pub mod utils;
pub mod volume;

pub use ast::{Document, DocumentNode, ScalarValue};
pub use config::MultipathConfig;
pub use error::{MpathError, Result};
pub use layout::Layout;
pub use parser::{coerce, parse_document, parse_document_lenient, parse_document_with, ParseMode};
pub use render::{render, render_document, Directive};
pub use sink::{backup_and_write, DEFAULT_CONF_PATH};
pub use store::{ConfigStore, DEFAULT_STORE_PATH};
pub use volume::{BlacklistEntry, VolumeRecord, VolumeUsage};
