//! Fuzz target for policy document loading.
//!
//! Parsing, validation, and resolution may reject any input but must never panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_yaml
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = tagguard_settings::load_policy(text);
    }
});
