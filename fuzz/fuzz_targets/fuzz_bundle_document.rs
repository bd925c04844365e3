//! Fuzz target: `ConfigurationSource::from_json`
//!
//! Feeds arbitrary bytes to the bundle document parser and walks every
//! accessor on whatever it accepts.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Every value handed out is trimmed at both ends
//! - `bundle_configuration` only ever returns `id`, `path` and `version`
//!
//! cargo fuzz run fuzz_bundle_document

#![no_main]

use enrollee::bundle::ConfigurationSource;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(source) = ConfigurationSource::from_json(doc) else {
        return;
    };

    for bundle in source.configured_bundles() {
        assert!(bundle.values().all(|v| is_trimmed(v)));

        let Some(id) = bundle.get("id") else {
            continue;
        };
        if let Some(props) = source.bundle_configuration(id) {
            assert!(
                props
                    .keys()
                    .all(|k| matches!(k.as_str(), "id" | "path" | "version"))
            );
        }
        for res in source.resource_configuration(id) {
            assert!(is_trimmed(&res.name) && is_trimmed(&res.uri));
        }
    }
});

fn is_trimmed(s: &str) -> bool {
    const WS: [char; 5] = [' ', '\t', '\x0b', '\n', '\r'];
    !s.starts_with(WS) && !s.ends_with(WS)
}
