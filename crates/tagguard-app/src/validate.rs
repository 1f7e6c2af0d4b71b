//! The `validate` use case: parse and validate a policy without evaluating anything.

use anyhow::Context;
use tagguard_settings::ResolvedPolicy;

#[derive(Clone, Debug)]
pub struct ValidateOutput {
    pub resolved_policy: ResolvedPolicy,
}

impl ValidateOutput {
    /// One-line human summary of what the policy configures.
    pub fn summary_line(&self) -> String {
        let doc = &self.resolved_policy.document;
        let enabled = doc.resources.values().filter(|r| r.enabled).count();
        format!(
            "policy {} is valid: {} resource type(s) configured ({} enabled), {} compliance level(s), {} pattern rule(s)",
            doc.version,
            doc.resources.len(),
            enabled,
            doc.compliance_levels.len(),
            self.resolved_policy.effective.validation.patterns.len(),
        )
    }
}

pub fn run_validate(policy_text: &str) -> anyhow::Result<ValidateOutput> {
    let resolved_policy = tagguard_settings::load_policy(policy_text).context("load policy")?;
    Ok(ValidateOutput { resolved_policy })
}
