// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{MpathError, Result};
use crate::volume::{BlacklistEntry, VolumeRecord, VolumeUsage};

/// Where the installation tooling keeps its volume records.
pub const DEFAULT_STORE_PATH: &str = "/opt/hitachi/etc/hitachi_config.json";

/// The JSON record of multipath volumes and blacklisted volumes.
///
/// Keys the store does not know about are carried through `save` untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigStore {
    #[serde(rename = "multipathData", default)]
    multipath_data: MultipathData,
    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MultipathData {
    #[serde(default)]
    multipath_volumes: IndexMap<String, VolumeRecord>,
    #[serde(default)]
    blacklisted_volumes: Vec<BlacklistEntry>,
    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| MpathError::SerializeError {
            message: format!("Invalid volume store: {}", e),
            path: None,
            hint: Some("Expected an object with a 'multipathData' key".into()),
            code: Some(311),
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| MpathError::FileError {
            message: format!("Failed to read volume store: {}", e),
            path: path.display().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        Self::from_json(&content).map_err(|e| match e {
            MpathError::SerializeError { message, hint, code, .. } => MpathError::SerializeError {
                message,
                path: Some(path.display().to_string()),
                hint,
                code,
            },
            other => other,
        })
    }

    /// Load the store, falling back to an empty one if it is missing or
    /// unreadable.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            warn!(error = %e, "using an empty volume store");
            Self::default()
        })
    }

    /// Pretty-printed JSON with four-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).map_err(|e| MpathError::SerializeError {
            message: format!("Failed to serialize volume store: {}", e),
            path: None,
            hint: None,
            code: Some(312),
        })?;

        String::from_utf8(buf).map_err(|e| MpathError::SerializeError {
            message: format!("Serialized volume store is not UTF-8: {}", e),
            path: None,
            hint: None,
            code: Some(312),
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| MpathError::FileError {
            message: format!("Failed to write volume store: {}", e),
            path: path.display().to_string(),
            hint: Some("Check permissions on the store directory".into()),
            code: Some(302),
        })
    }

    /// Record a new volume with usage `unused`. Returns `false` and leaves the
    /// store unchanged if the WWID is already known.
    pub fn add_volume(&mut self, wwid: &str, alias: &str) -> bool {
        if self.multipath_data.multipath_volumes.contains_key(wwid) {
            info!(wwid, "volume already recorded");
            return false;
        }
        self.multipath_data
            .multipath_volumes
            .insert(wwid.to_string(), VolumeRecord::new(wwid, alias, VolumeUsage::Unused));
        info!(wwid, alias, "volume recorded");
        true
    }

    /// Change the usage of a known volume. Returns `false` if the WWID is unknown.
    pub fn set_usage(&mut self, wwid: &str, usage: VolumeUsage) -> bool {
        match self.multipath_data.multipath_volumes.get_mut(wwid) {
            Some(record) => {
                record.usage = usage;
                true
            }
            None => false,
        }
    }

    /// Blacklist a volume. Returns `false` if it is already blacklisted.
    pub fn blacklist_volume(&mut self, wwid: &str) -> bool {
        if self.multipath_data.blacklisted_volumes.iter().any(|b| b.wwid == wwid) {
            return false;
        }
        self.multipath_data.blacklisted_volumes.push(BlacklistEntry::new(wwid));
        true
    }

    pub fn volume(&self, wwid: &str) -> Option<&VolumeRecord> {
        self.multipath_data.multipath_volumes.get(wwid)
    }

    /// Volumes in the order they were recorded.
    pub fn volumes(&self) -> impl Iterator<Item = &VolumeRecord> {
        self.multipath_data.multipath_volumes.values()
    }

    pub fn blacklist(&self) -> &[BlacklistEntry] {
        &self.multipath_data.blacklisted_volumes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
    "hostname": "node1",
    "multipathData": {
        "multipathVolumes": {
            "W1": { "wwid": "W1", "friendlyName": "vol1", "volumeType": "datastore" },
            "W2": { "wwid": "W2", "friendlyName": "vol2", "volumeType": "rdm" }
        },
        "blacklistedVolumes": [ { "wwid": "X1" } ]
    }
}"#;

    #[test]
    fn test_from_json_reads_volumes_in_order() {
        let store = ConfigStore::from_json(SAMPLE).unwrap();
        let aliases: Vec<&str> = store.volumes().map(|v| v.alias.as_str()).collect();
        assert_eq!(aliases, vec!["vol1", "vol2"]);
        assert_eq!(store.volume("W2").map(|v| v.usage), Some(VolumeUsage::Rdm));
        assert_eq!(store.blacklist(), &[BlacklistEntry::new("X1")]);
    }

    #[test]
    fn test_add_volume_skips_known_wwid() {
        let mut store = ConfigStore::from_json(SAMPLE).unwrap();
        assert!(!store.add_volume("W1", "other"));
        assert_eq!(store.volume("W1").map(|v| v.alias.as_str()), Some("vol1"));

        assert!(store.add_volume("W3", "vol3"));
        assert_eq!(store.volume("W3"), Some(&VolumeRecord::new("W3", "vol3", VolumeUsage::Unused)));
        assert_eq!(store.volumes().last().map(|v| v.wwid.as_str()), Some("W3"));
    }

    #[test]
    fn test_set_usage_and_blacklist() {
        let mut store = ConfigStore::new();
        assert!(!store.set_usage("W1", VolumeUsage::Rdm));
        store.add_volume("W1", "vol1");
        assert!(store.set_usage("W1", VolumeUsage::Rdm));
        assert_eq!(store.volume("W1").map(|v| v.usage), Some(VolumeUsage::Rdm));

        assert!(store.blacklist_volume("X9"));
        assert!(!store.blacklist_volume("X9"));
        assert_eq!(store.blacklist().len(), 1);
    }

    #[test]
    fn test_save_and_load_preserve_unknown_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = ConfigStore::from_json(SAMPLE).unwrap();
        store.add_volume("W3", "vol3");
        store.save(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n    \"hostname\": \"node1\""));
        assert!(written.contains("\"friendlyName\": \"vol3\""));

        let loaded = ConfigStore::load(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_load_errors_and_fallback() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(ConfigStore::load(&missing), Err(MpathError::FileError { .. })));
        assert_eq!(ConfigStore::load_or_default(&missing), ConfigStore::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        match ConfigStore::load(&broken) {
            Err(MpathError::SerializeError { path: Some(p), code: Some(311), .. }) => {
                assert!(p.ends_with("broken.json"))
            }
            other => panic!("Expected SerializeError, got {:?}", other),
        }
    }
}
