// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use crate::ast::ScalarValue;
use crate::volume::VolumeUsage;

const SAMPLE: &str = r#"
defaults {
	polling_interval 10
	path_selector "round-robin 0"
	uid_attribute ID_SERIAL
	user_friendly_names yes
	fast_io_fail_tmo 2.5
}
blacklist {
	devnode "^sd[a-z]"
	devnode "^hd[a-z]"
	wwid X1
	wwid X2
}
multipaths {
	multipath {
		wwid W1
		alias vol1
	}
	multipath {
		wwid W2
		alias 1234
	}
	# # End of multipath devices
}
devices {
	device {
		vendor "HITACHI"
		features "0"
	}
}
"#;

#[test]
fn test_config_from_string() {
    let config = MultipathConfig::from_str(SAMPLE).expect("Failed to parse config");

    let interval: u32 = config.get("defaults.polling_interval").expect("Failed to get polling_interval");
    assert_eq!(interval, 10);

    let selector: String = config.get("defaults.path_selector").expect("Failed to get path_selector");
    assert_eq!(selector, "round-robin 0");

    let friendly: bool = config.get("defaults.user_friendly_names").expect("Failed to get user_friendly_names");
    assert!(friendly);

    let tmo: f64 = config.get("defaults.fast_io_fail_tmo").unwrap();
    assert_eq!(tmo, 2.5);

    assert!(config.has("devices.device.vendor"));
    assert!(!config.has("devices.device.product"));
}

#[test]
fn test_indexing_repeated_sections_and_keys() {
    let config = MultipathConfig::from_str(SAMPLE).unwrap();

    let alias: String = config.get("multipaths.multipath.0.alias").unwrap();
    assert_eq!(alias, "vol1");

    // numeric-looking alias still reads back as a string
    let alias: String = config.get("multipaths.multipath.1.alias").unwrap();
    assert_eq!(alias, "1234");

    let second: String = config.get("blacklist.wwid.1").unwrap();
    assert_eq!(second, "X2");

    assert!(!config.has("multipaths.multipath.2"));
}

#[test]
fn test_get_list() {
    let config = MultipathConfig::from_str(SAMPLE).unwrap();

    let wwids: Vec<String> = config.get_list("blacklist.wwid").unwrap();
    assert_eq!(wwids, vec!["X1", "X2"]);

    let single: Vec<i64> = config.get_list("defaults.polling_interval").unwrap();
    assert_eq!(single, vec![10]);

    assert!(config.get_list::<String>("defaults").is_err());
}

#[test]
fn test_repeated_key_needs_get_list() {
    let config = MultipathConfig::from_str(SAMPLE).unwrap();
    match config.get::<String>("blacklist.wwid") {
        Err(MpathError::TypeError { code, line, .. }) => {
            assert_eq!(code, Some(305));
            assert_eq!(line, 12);
        }
        other => panic!("Expected TypeError, got {:?}", other),
    }
}

#[test]
fn test_get_sections_and_keys() {
    let config = MultipathConfig::from_str(SAMPLE).unwrap();

    let volumes = config.get_sections("multipaths.multipath").unwrap();
    assert_eq!(volumes.len(), 2);

    let devices = config.get_sections("devices.device").unwrap();
    assert_eq!(devices.len(), 1);

    let keys = config.get_keys("devices.device").unwrap();
    assert_eq!(keys, vec!["vendor", "features"]);

    let top = config.get_keys("").unwrap();
    assert_eq!(top, vec!["defaults", "blacklist", "multipaths", "devices"]);

    assert!(config.get_keys("multipaths.multipath").is_err());
}

#[test]
fn test_optional_and_default_values() {
    let config = MultipathConfig::from_str(SAMPLE).unwrap();

    let missing: Option<String> = config.get_optional("defaults.path_checker").unwrap();
    assert_eq!(missing, None);

    let present: Option<String> = config.get_optional("defaults.uid_attribute").unwrap();
    assert_eq!(present.as_deref(), Some("ID_SERIAL"));

    assert_eq!(config.get_or("defaults.max_fds", 1024u32), 1024);

    // wrong type is still an error, not None
    assert!(config.get_optional::<bool>("defaults.polling_interval").is_err());
}

#[test]
fn test_type_error_points_at_line() {
    let config = MultipathConfig::from_str(SAMPLE).unwrap();
    match config.get::<bool>("defaults.uid_attribute") {
        Err(MpathError::TypeError { line, message, code, .. }) => {
            assert_eq!(line, 5);
            assert!(message.contains("uid_attribute ID_SERIAL"));
            assert_eq!(code, Some(401));
        }
        other => panic!("Expected TypeError, got {:?}", other),
    }
}

#[test]
fn test_path_not_found() {
    let config = MultipathConfig::from_str(SAMPLE).unwrap();
    assert!(matches!(
        config.get::<String>("defaults.nope"),
        Err(MpathError::PathNotFound { code: Some(304), .. })
    ));
}

#[test]
fn test_lookup_variants() {
    let config = MultipathConfig::from_str(SAMPLE).unwrap();
    assert!(matches!(config.lookup("").unwrap(), Lookup::Document(_)));
    assert!(matches!(config.lookup("multipaths.multipath.0").unwrap(), Lookup::Document(_)));
    assert!(matches!(config.lookup("blacklist.wwid.0").unwrap(), Lookup::Scalar(ScalarValue::Text(_))));
}

#[test]
fn test_layout_from_config() {
    let config = MultipathConfig::from_str(SAMPLE).unwrap();
    let layout = config.layout();

    assert_eq!(layout.blacklist.len(), 2);
    assert_eq!(layout.volumes.len(), 2);
    assert_eq!(layout.volumes[1].alias, "1234");
    assert_eq!(layout.volumes[1].usage, VolumeUsage::Unused);
    assert!(layout.defaults["path_selector"].quoted);
    assert!(layout.device["features"].quoted);

    let regenerated = layout.render();
    assert!(regenerated.contains("\t\tfeatures \"0\""));
    assert!(regenerated.contains("\tpath_selector \"round-robin 0\""));
}

#[test]
fn test_render_reparses_to_same_document() {
    let config = MultipathConfig::from_str(SAMPLE).unwrap();
    let again = MultipathConfig::from_str(&config.render()).unwrap();
    assert_eq!(again.document(), config.document());
}

#[test]
fn test_strict_and_lenient_loading() {
    let broken = "defaults {\n\tpolling_interval 10\n";
    assert!(matches!(
        MultipathConfig::from_str(broken),
        Err(MpathError::UnbalancedBraces { .. })
    ));

    let config = MultipathConfig::from_str_with_mode(broken, ParseMode::Lenient).unwrap();
    let interval: i64 = config.get("defaults.polling_interval").unwrap();
    assert_eq!(interval, 10);
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("multipath.conf");
    std::fs::write(&path, SAMPLE).unwrap();

    let config = MultipathConfig::from_file(&path).unwrap();
    assert_eq!(config.raw_content(), SAMPLE);
    assert_eq!(config.into_document().len(), 4);

    let missing = MultipathConfig::from_file(dir.path().join("absent.conf"));
    assert!(matches!(missing, Err(MpathError::FileError { code: Some(301), .. })));
}
