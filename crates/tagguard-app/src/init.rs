//! The `init` use case: write the starter policy document.

use anyhow::Context;
use camino::Utf8Path;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Overwritten,
}

/// Write the default policy to `out`. An existing file is only replaced with `force`.
pub fn run_init(out: &Utf8Path, force: bool) -> anyhow::Result<InitOutcome> {
    let existed = out.exists();
    if existed && !force {
        anyhow::bail!("{out} already exists (use --force to overwrite)");
    }

    let yaml = tagguard_settings::render_default_policy_yaml().context("render default policy")?;
    crate::render::write_text(out, &yaml)?;
    info!(path = %out, "wrote default policy");

    Ok(if existed {
        InitOutcome::Overwritten
    } else {
        InitOutcome::Created
    })
}
