// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a multipath volume is used for on the cluster node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUsage {
    Datastore,
    Rdm,
    #[default]
    Unused,
}

/// One SAN volume as recorded by the disk-selection workflow.
///
/// Field names on the wire match the JSON volume store
/// (`wwid`, `friendlyName`, `volumeType`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRecord {
    pub wwid: String,
    #[serde(rename = "friendlyName")]
    pub alias: String,
    #[serde(rename = "volumeType", default)]
    pub usage: VolumeUsage,
}

/// A volume hidden from multipathd.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    pub wwid: String,
}

impl VolumeRecord {
    pub fn new(wwid: impl Into<String>, alias: impl Into<String>, usage: VolumeUsage) -> Self {
        Self { wwid: wwid.into(), alias: alias.into(), usage }
    }
}

impl BlacklistEntry {
    pub fn new(wwid: impl Into<String>) -> Self {
        Self { wwid: wwid.into() }
    }
}

impl fmt::Display for VolumeUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VolumeUsage::Datastore => "datastore",
            VolumeUsage::Rdm => "rdm",
            VolumeUsage::Unused => "unused",
        })
    }
}
