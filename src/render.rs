// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;

use crate::ast::{Document, DocumentNode, ScalarValue};
use crate::parser::coerce;
use crate::utils::{format_value, quote, should_quote};
use crate::volume::{BlacklistEntry, VolumeRecord};

/// Device node patterns that are always blacklisted, in output order.
pub const BUILTIN_DEVNODES: [&str; 2] = ["^sd[a-z]", "^hd[a-z]"];

/// Comment line closing the `multipaths` section.
pub const MULTIPATHS_END_MARKER: &str = "# # End of multipath devices";

/// A caller-supplied setting: the value plus whether it is written in quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub value: ScalarValue,
    pub quoted: bool,
}

impl Directive {
    pub fn bare(value: impl Into<ScalarValue>) -> Self {
        Self { value: value.into(), quoted: false }
    }

    pub fn quoted(value: impl Into<ScalarValue>) -> Self {
        Self { value: value.into(), quoted: true }
    }

    /// Coerce `raw` the way the parser would and keep the quoting hint.
    pub fn parse(raw: &str, quoted: bool) -> Self {
        Self { value: coerce(raw), quoted }
    }
}

/// Line buffer with one tab of indentation per open section.
struct Writer {
    lines: Vec<String>,
    depth: usize,
}

impl Writer {
    fn new() -> Self {
        Self { lines: Vec::new(), depth: 0 }
    }

    fn push(&mut self, text: impl AsRef<str>) {
        self.lines.push(format!("{}{}", "\t".repeat(self.depth), text.as_ref()));
    }

    fn open(&mut self, name: &str) {
        self.push(format!("{} {{", name));
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.push("}");
    }

    fn entry(&mut self, key: &str, value: &ScalarValue, quoted: bool) {
        self.push(format!("{} {}", key, format_value(value, quoted)));
    }

    fn directives(&mut self, entries: &IndexMap<String, Directive>) {
        for (key, directive) in entries {
            self.entry(key, &directive.value, directive.quoted);
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Render the canonical multipath.conf text.
///
/// Sections always come out as `defaults`, `blacklist`, `multipaths`,
/// `devices`, each entry in the order supplied. Pure text production.
pub fn render(
    defaults: &IndexMap<String, Directive>,
    device_rules: &IndexMap<String, Directive>,
    blacklist: &[BlacklistEntry],
    volumes: &[VolumeRecord],
) -> String {
    let mut out = Writer::new();

    out.open("defaults");
    out.directives(defaults);
    out.close();

    out.open("blacklist");
    for pattern in BUILTIN_DEVNODES {
        out.push(format!("devnode {}", quote(pattern)));
    }
    for entry in blacklist {
        out.push(format!("wwid {}", entry.wwid));
    }
    out.close();

    out.open("multipaths");
    for volume in volumes {
        out.open("multipath");
        out.push(format!("wwid {}", volume.wwid));
        out.push(format!("alias {}", volume.alias));
        out.close();
    }
    out.push(MULTIPATHS_END_MARKER);
    out.close();

    out.open("devices");
    out.open("device");
    out.directives(device_rules);
    out.close();
    out.close();

    out.finish()
}

/// Render any document in its stored order.
///
/// Repeated keys come out as repeated lines and repeated sections as repeated
/// blocks, so the result parses back to an equal document. Text is quoted
/// for the attributes multipath.conf quotes and wherever it could not be
/// written bare.
pub fn render_document(doc: &Document) -> String {
    let mut out = Writer::new();
    write_document(&mut out, doc);
    out.finish()
}

fn write_document(out: &mut Writer, doc: &Document) {
    for (key, node) in doc {
        match node {
            DocumentNode::Scalar(value) => out.entry(key, value, should_quote(key, value)),
            DocumentNode::ScalarList(values) => {
                for value in values {
                    out.entry(key, value, should_quote(key, value));
                }
            }
            DocumentNode::Section(section) => write_section(out, key, section),
            DocumentNode::SectionList(sections) => {
                for section in sections {
                    write_section(out, key, section);
                }
            }
        }
    }
}

fn write_section(out: &mut Writer, name: &str, section: &Document) {
    out.open(name);
    write_document(out, section);
    out.close();
}
