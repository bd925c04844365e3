//! Fuzz target: `OnboardingConfig::from_properties`
//!
//! Splits the input into `key=value` lines and overlays them on the
//! defaults.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Every accepted config passes `validate()`
//! - An accepted wait slice never exceeds either interval
//!
//! cargo fuzz run fuzz_config_properties

#![no_main]

use enrollee::bundle::PropertyMap;
use enrollee::config::OnboardingConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut props = PropertyMap::new();
    for line in text.lines() {
        if let Some((k, v)) = line.split_once('=') {
            props.insert(k.to_owned(), v.to_owned());
        }
    }

    if let Ok(cfg) = OnboardingConfig::from_properties(&props) {
        assert!(cfg.validate().is_ok());
        assert!(cfg.wait_slice_ms <= cfg.scan_interval_ms);
        assert!(cfg.wait_slice_ms <= cfg.connect_settle_ms);
        assert!(cfg.max_connect_attempts > 0);
    }
});
