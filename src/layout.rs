// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::ast::{Document, DocumentNode};
use crate::presets::{default_settings, vendor_device_rules};
use crate::render::{render, Directive, BUILTIN_DEVNODES};
use crate::store::ConfigStore;
use crate::utils::should_quote;
use crate::volume::{BlacklistEntry, VolumeRecord, VolumeUsage};

/// Domain-level view of a multipath.conf: what the renderer needs to
/// regenerate the whole file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub defaults: IndexMap<String, Directive>,
    pub device: IndexMap<String, Directive>,
    pub blacklist: Vec<BlacklistEntry>,
    pub volumes: Vec<VolumeRecord>,
}

impl Layout {
    /// Preset defaults and vendor device rules, no volumes.
    pub fn with_presets() -> Self {
        Self {
            defaults: default_settings(),
            device: vendor_device_rules(),
            ..Self::default()
        }
    }

    /// Presets plus the volumes and blacklist recorded in the volume store.
    pub fn from_store(store: &ConfigStore) -> Self {
        Self {
            blacklist: store.blacklist().to_vec(),
            volumes: store.volumes().cloned().collect(),
            ..Self::with_presets()
        }
    }

    /// Recover a layout from a parsed multipath.conf.
    ///
    /// WWIDs and aliases are taken as written, so `007` stays `007`.
    /// The built-in `devnode` patterns are dropped (the renderer adds them
    /// back) and `multipath` entries without both `wwid` and `alias` are
    /// skipped. Usage is not part of the text format, so volumes come back as
    /// [`VolumeUsage::Unused`].
    pub fn from_document(doc: &Document) -> Self {
        let mut layout = Layout::default();

        if let Some(defaults) = doc.section("defaults") {
            layout.defaults = directives_of(defaults);
        }

        if let Some(blacklist) = doc.section("blacklist") {
            for pattern in blacklist.verbatim("devnode") {
                if !BUILTIN_DEVNODES.contains(&pattern.as_str()) {
                    debug!(pattern = %pattern, "dropping custom devnode blacklist entry");
                }
            }
            layout.blacklist = blacklist.verbatim("wwid").into_iter().map(BlacklistEntry::new).collect();
        }

        if let Some(multipaths) = doc.section("multipaths") {
            for entry in multipaths.sections("multipath") {
                match (entry.verbatim_scalar("wwid"), entry.verbatim_scalar("alias")) {
                    (Some(wwid), Some(alias)) => {
                        layout.volumes.push(VolumeRecord::new(wwid, alias, VolumeUsage::Unused))
                    }
                    _ => warn!("skipping multipath entry without a single wwid and alias"),
                }
            }
        }

        if let Some(device) = doc.section("devices").and_then(|d| d.sections("device").into_iter().next()) {
            layout.device = directives_of(device);
        }

        layout
    }

    /// Fold store records into the volume list. Known WWIDs keep their alias
    /// and take the record's usage; new WWIDs are appended in order.
    pub fn merge_volumes(&mut self, records: impl IntoIterator<Item = VolumeRecord>) {
        for record in records {
            match self.volumes.iter_mut().find(|v| v.wwid == record.wwid) {
                Some(existing) => existing.usage = record.usage,
                None => self.volumes.push(record),
            }
        }
    }

    pub fn render(&self) -> String {
        render(&self.defaults, &self.device, &self.blacklist, &self.volumes)
    }

    /// Build the document this layout renders to, without going through text.
    /// The end-of-multipaths comment has no place in a document and is left out.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();

        doc.insert("defaults", DocumentNode::Section(scalars_to_document(&self.defaults)));

        let mut blacklist = Document::new();
        for pattern in BUILTIN_DEVNODES {
            blacklist.push_word("devnode", pattern);
        }
        for entry in &self.blacklist {
            blacklist.push_word("wwid", &entry.wwid);
        }
        doc.insert("blacklist", DocumentNode::Section(blacklist));

        let mut multipaths = Document::new();
        for volume in &self.volumes {
            let mut entry = Document::new();
            entry.push_word("wwid", &volume.wwid);
            entry.push_word("alias", &volume.alias);
            multipaths.push("multipath", DocumentNode::Section(entry));
        }
        doc.insert("multipaths", DocumentNode::Section(multipaths));

        let mut devices = Document::new();
        devices.insert("device", DocumentNode::Section(scalars_to_document(&self.device)));
        doc.insert("devices", DocumentNode::Section(devices));

        doc
    }
}

fn directives_of(section: &Document) -> IndexMap<String, Directive> {
    let mut out = IndexMap::new();
    for (key, node) in section {
        match node {
            DocumentNode::Scalar(value) => {
                let quoted = should_quote(key, value);
                out.insert(key.clone(), Directive { value: value.clone(), quoted });
            }
            DocumentNode::ScalarList(values) => {
                // A setting can only hold one value; multipathd keeps the last.
                if let Some(value) = values.last() {
                    warn!(key = %key, count = values.len(), "setting repeated; keeping the last value");
                    let quoted = should_quote(key, value);
                    out.insert(key.clone(), Directive { value: value.clone(), quoted });
                }
            }
            DocumentNode::Section(_) | DocumentNode::SectionList(_) => {
                debug!(key = %key, "ignoring nested block in settings section");
            }
        }
    }
    out
}

fn scalars_to_document(entries: &IndexMap<String, Directive>) -> Document {
    let mut doc = Document::new();
    for (key, directive) in entries {
        doc.insert(key.clone(), DocumentNode::Scalar(directive.value.clone()));
    }
    doc
}
