// Author: Dustin Pilgrim
// License: MIT

//! Settings written into every generated multipath.conf.

use indexmap::IndexMap;

use crate::render::Directive;

// (key, raw value, quoted)
const DEFAULT_SETTINGS: &[(&str, &str, bool)] = &[
    ("polling_interval", "10", false),
    ("path_selector", "round-robin 0", true),
    ("path_grouping_policy", "multibus", false),
    ("uid_attribute", "ID_SERIAL", false),
    ("prio", "alua", false),
    ("path_checker", "readsector0", false),
    ("rr_min_io", "100", false),
    ("max_fds", "8192", false),
    ("rr_weight", "priorities", false),
    ("failback", "immediate", false),
    ("no_path_retry", "fail", false),
    ("user_friendly_names", "yes", false),
    ("find_multipaths", "yes", false),
];

const VENDOR_DEVICE_RULES: &[(&str, &str, bool)] = &[
    ("vendor", "HITACHI", true),
    ("product", "OPEN-.*", true),
    ("path_grouping_policy", "multibus", false),
    ("path_selector", "round-robin 0", true),
    ("path_checker", "tur", false),
    ("features", "0", true),
    ("hardware_handler", "0", true),
    ("prio", "const", false),
    ("rr_weight", "uniform", false),
    ("rr_min_io", "1000", false),
    ("rr_min_io_rq", "1", false),
    ("fast_io_fail_tmo", "5", false),
    ("dev_loss_tmo", "10", false),
    ("no_path_retry", "fail", false),
];

fn build(table: &[(&str, &str, bool)]) -> IndexMap<String, Directive> {
    table
        .iter()
        .map(|&(key, raw, quoted)| (key.to_string(), Directive::parse(raw, quoted)))
        .collect()
}

/// The `defaults` section, in output order.
pub fn default_settings() -> IndexMap<String, Directive> {
    build(DEFAULT_SETTINGS)
}

/// The `device` block matching the storage array's LUNs, in output order.
pub fn vendor_device_rules() -> IndexMap<String, Directive> {
    build(VENDOR_DEVICE_RULES)
}
