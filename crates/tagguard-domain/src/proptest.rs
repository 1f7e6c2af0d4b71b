//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - the compliant flag agreeing with the violation list
//! - summary totals adding up
//! - evaluation being deterministic

use crate::engine::{evaluate, evaluate_inventory};
use crate::model::InventoryResource;
use crate::policy::{CaseRule, CaseStyle, TagCriteria, TagValidation};
use crate::report::aggregate;
use crate::test_support::policy;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tagguard_types::{ComplianceResult, ViolationKind};

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Tag keys drawn from a small vocabulary so that criteria and tags actually overlap.
fn arb_tag_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Environment".to_string()),
        Just("Owner".to_string()),
        Just("Project".to_string()),
        Just("CostCenter".to_string()),
        Just("Temporary".to_string()),
        Just("Team".to_string()),
    ]
}

fn arb_tag_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("prod".to_string()),
        Just("dev".to_string()),
        Just("MyApp".to_string()),
        Just("cc-42".to_string()),
        prop::string::string_regex("[A-Za-z0-9-]{0,12}").unwrap(),
    ]
}

fn arb_tags() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(arb_tag_key(), arb_tag_value(), 0..6)
}

fn arb_key_set() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(arb_tag_key(), 0..4)
}

fn arb_criteria() -> impl Strategy<Value = TagCriteria> {
    (
        arb_key_set(),
        arb_key_set(),
        prop::collection::btree_map(arb_tag_key(), arb_tag_value(), 0..3),
        0u32..6,
    )
        .prop_map(|(required, forbidden, specific, minimum)| TagCriteria {
            minimum_required_tags: minimum,
            required_tags: required,
            forbidden_tags: forbidden,
            specific_tags: specific,
            compliance_level: None,
        })
}

fn arb_validation() -> impl Strategy<Value = TagValidation> {
    (
        prop::collection::btree_map(
            arb_tag_key(),
            prop::collection::vec(arb_tag_value(), 1..4),
            0..3,
        ),
        prop::collection::btree_map(
            arb_tag_key(),
            prop_oneof![Just(CaseStyle::Lowercase), Just(CaseStyle::Uppercase)],
            0..3,
        ),
    )
        .prop_map(|(allowed_values, cases)| TagValidation {
            allowed_values,
            case_rules: cases
                .into_iter()
                .map(|(k, style)| {
                    (
                        k,
                        CaseRule {
                            style,
                            message: String::new(),
                        },
                    )
                })
                .collect(),
            ..TagValidation::default()
        })
}

fn arb_result() -> impl Strategy<Value = ComplianceResult> {
    (arb_tags(), arb_criteria(), arb_validation())
        .prop_map(|(tags, criteria, validation)| {
            evaluate(&tags, &criteria, &BTreeMap::new(), &validation)
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn compliant_iff_no_violations(
        tags in arb_tags(),
        criteria in arb_criteria(),
        validation in arb_validation(),
    ) {
        let result = evaluate(&tags, &criteria, &BTreeMap::new(), &validation);
        prop_assert_eq!(result.is_compliant, result.violations.is_empty());
    }

    #[test]
    fn evaluation_is_deterministic(
        tags in arb_tags(),
        criteria in arb_criteria(),
        validation in arb_validation(),
    ) {
        let first = evaluate(&tags, &criteria, &BTreeMap::new(), &validation);
        let second = evaluate(&tags, &criteria, &BTreeMap::new(), &validation);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn result_echoes_input_tags(tags in arb_tags(), criteria in arb_criteria()) {
        let result = evaluate(&tags, &criteria, &BTreeMap::new(), &TagValidation::default());
        prop_assert_eq!(result.resource_tags, tags);
    }

    #[test]
    fn every_missing_required_key_is_reported(tags in arb_tags(), criteria in arb_criteria()) {
        let result = evaluate(&tags, &criteria, &BTreeMap::new(), &TagValidation::default());
        for key in &criteria.required_tags {
            let reported = result.violations.iter().any(|v| {
                v.kind == ViolationKind::MissingRequiredTag && v.tag.as_deref() == Some(key.as_str())
            });
            prop_assert_eq!(reported, !tags.contains_key(key));
        }
    }

    #[test]
    fn summary_totals_add_up(results in prop::collection::vec(arb_result(), 0..20)) {
        let summary = aggregate(&results);
        prop_assert_eq!(summary.total_resources as usize, results.len());
        prop_assert_eq!(
            summary.compliant_resources + summary.non_compliant_resources,
            summary.total_resources
        );

        let violation_total: usize = results.iter().map(|r| r.violations.len()).sum();
        let histogram_total: u32 = summary.global_violations.values().sum();
        prop_assert_eq!(histogram_total as usize, violation_total);

        for kind in summary.global_violations.keys() {
            prop_assert!(results.iter().any(|r| r.violations.iter().any(|v| v.kind == *kind)));
        }
    }

    #[test]
    fn inventory_order_does_not_change_report(
        entries in prop::collection::vec((arb_tag_value(), arb_tags()), 0..10),
        criteria in arb_criteria(),
    ) {
        let p = policy(criteria);
        let resources: Vec<InventoryResource> = entries
            .into_iter()
            .enumerate()
            .map(|(i, (suffix, tags))| InventoryResource {
                id: format!("r-{i:03}-{suffix}"),
                resource_type: "ec2".to_string(),
                region: None,
                tags,
            })
            .collect();
        let mut reversed = resources.clone();
        reversed.reverse();

        let forward = evaluate_inventory(&resources, &p);
        let backward = evaluate_inventory(&reversed, &p);
        prop_assert_eq!(forward.resources, backward.resources);
        prop_assert_eq!(forward.summary, backward.summary);
    }
}
