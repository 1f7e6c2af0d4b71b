//! Fuzz target for resource assessment against the starter policy.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_tag_evaluation
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;
use tagguard_domain::model::InventoryResource;

#[derive(Arbitrary, Debug)]
struct ResourceInput {
    id: String,
    resource_type: String,
    region: Option<String>,
    tags: Vec<(String, String)>,
}

fuzz_target!(|input: ResourceInput| {
    if input.tags.len() > 64 {
        return;
    }
    let Ok(yaml) = tagguard_settings::render_default_policy_yaml() else {
        return;
    };
    let Ok(resolved) = tagguard_settings::load_policy(&yaml) else {
        return;
    };

    let resource = InventoryResource {
        id: input.id,
        resource_type: input.resource_type,
        region: input.region,
        tags: input.tags.into_iter().collect::<BTreeMap<_, _>>(),
    };
    let report = tagguard_domain::evaluate_inventory(&[resource], &resolved.effective);
    assert!(report.resources.len() <= 1);
});
