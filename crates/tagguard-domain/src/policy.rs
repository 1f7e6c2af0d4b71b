use crate::patterns::PatternTable;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseStyle {
    Lowercase,
    Uppercase,
    Mixed,
}

impl CaseStyle {
    pub fn parse(v: &str) -> Option<Self> {
        match v {
            "lowercase" => Some(CaseStyle::Lowercase),
            "uppercase" => Some(CaseStyle::Uppercase),
            "mixed" => Some(CaseStyle::Mixed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CaseStyle::Lowercase => "lowercase",
            CaseStyle::Uppercase => "uppercase",
            CaseStyle::Mixed => "mixed",
        }
    }

    /// Characters without case never count against a style.
    pub fn matches(self, value: &str) -> bool {
        match self {
            CaseStyle::Lowercase => !value.chars().any(char::is_uppercase),
            CaseStyle::Uppercase => !value.chars().any(char::is_lowercase),
            CaseStyle::Mixed => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseRule {
    pub style: CaseStyle,
    /// Message reported on mismatch; empty means a generated default.
    pub message: String,
}

/// Required/forbidden/specific-tag and minimum-count rules for one resource type (or global).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagCriteria {
    pub minimum_required_tags: u32,
    pub required_tags: BTreeSet<String>,
    pub forbidden_tags: BTreeSet<String>,
    pub specific_tags: BTreeMap<String, String>,
    pub compliance_level: Option<String>,
}

/// Named bundle of required and exact-value tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComplianceLevel {
    pub required_tags: BTreeSet<String>,
    pub specific_tags: BTreeMap<String, String>,
}

/// Value-level rules keyed by tag, shared by every resource type.
#[derive(Clone, Debug, Default)]
pub struct TagValidation {
    pub allowed_values: BTreeMap<String, Vec<String>>,
    pub patterns: PatternTable,
    pub case_rules: BTreeMap<String, CaseRule>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exclusion {
    pub pattern: String,
    pub reason: String,
}

/// Glob matcher over a resource type's `excluded_resources`.
#[derive(Clone, Debug, Default)]
pub struct ExclusionMatcher {
    set: Option<GlobSet>,
    entries: Vec<Exclusion>,
}

impl ExclusionMatcher {
    pub fn new(entries: Vec<Exclusion>) -> Result<Self, globset::Error> {
        if entries.is_empty() {
            return Ok(Self::default());
        }

        let mut builder = GlobSetBuilder::new();
        for entry in &entries {
            // Case-sensitive, `*` also crosses `/` in resource identifiers.
            builder.add(Glob::new(&entry.pattern)?);
        }
        Ok(Self {
            set: Some(builder.build()?),
            entries,
        })
    }

    /// First configured exclusion matching `resource_id`, in declaration order.
    pub fn find(&self, resource_id: &str) -> Option<&Exclusion> {
        let set = self.set.as_ref()?;
        let first = set.matches(resource_id).into_iter().min()?;
        self.entries.get(first)
    }

    pub fn entries(&self) -> &[Exclusion] {
        &self.entries
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResourcePolicy {
    pub enabled: bool,
    pub criteria: TagCriteria,
    pub exclusions: ExclusionMatcher,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionScope {
    All,
    Specific(BTreeSet<String>),
}

impl RegionScope {
    /// Resources without a region are always in scope.
    pub fn includes(&self, region: Option<&str>) -> bool {
        match (self, region) {
            (RegionScope::All, _) | (_, None) => true,
            (RegionScope::Specific(list), Some(r)) => list.contains(r),
        }
    }
}

/// Validated, compiled policy used by the engine. Immutable once built.
#[derive(Clone, Debug)]
pub struct EffectivePolicy {
    pub version: String,
    pub global_enabled: bool,
    pub global_criteria: TagCriteria,
    pub resources: BTreeMap<String, ResourcePolicy>,
    pub levels: BTreeMap<String, ComplianceLevel>,
    pub validation: TagValidation,
    pub regions: RegionScope,
    pub batch_size: usize,
}

impl EffectivePolicy {
    /// Criteria for a resource type.
    ///
    /// An enabled resource-specific config replaces the global criteria wholesale (no field
    /// merge). Otherwise the global criteria apply if global evaluation is enabled.
    pub fn criteria_for(&self, resource_type: &str) -> Option<&TagCriteria> {
        match self.resources.get(resource_type) {
            Some(rp) if rp.enabled => Some(&rp.criteria),
            _ if self.global_enabled => Some(&self.global_criteria),
            _ => None,
        }
    }

    pub fn exclusion_for(&self, resource_type: &str, resource_id: &str) -> Option<&Exclusion> {
        self.resources
            .get(resource_type)
            .filter(|rp| rp.enabled)
            .and_then(|rp| rp.exclusions.find(resource_id))
    }
}
