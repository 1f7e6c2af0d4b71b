//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};
use tagguard_test_util::normalize_nondeterministic;
use tagguard_types::{ViolationKind, explain};

/// Workspace root (parent of the xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(tagguard_types::TagguardReportV1)
}

fn generate_policy_schema() -> schemars::Schema {
    schema_for!(tagguard_settings::PolicyDocumentV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "tagguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "tagguard.policy.v1.json",
            generate: generate_policy_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Run the built binary on every check fixture, validate the report against the generated
/// report schema, and compare it with the golden file.
///
/// A check fixture is a directory with `policy.yaml`, an `inventory.json` or `inventory.yaml`,
/// and `expected.report.json`.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema())?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {e}"))?;
    println!("✓ tagguard.report.v1 schema compiles");

    let bin = project_root().join("target").join("debug").join("tagguard");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");
    if !bin.exists() {
        bail!(
            "tagguard binary not found at {}.\nRun `cargo build -p tagguard-cli` first.",
            bin.display()
        );
    }

    let mut errors = Vec::new();
    let mut checked = 0;

    let mut entries: Vec<PathBuf> = fs::read_dir(fixtures_dir())
        .context("Failed to read tests/fixtures/")?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    for fixture_dir in entries {
        let golden_path = fixture_dir.join("expected.report.json");
        let Some(inventory) = ["inventory.json", "inventory.yaml"]
            .iter()
            .map(|f| fixture_dir.join(f))
            .find(|p| p.exists())
        else {
            continue;
        };
        if !golden_path.exists() {
            continue;
        }
        let name = fixture_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let tmp = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = tmp.path().join("report.json");
        let status = std::process::Command::new(&bin)
            .arg("check")
            .arg("--policy")
            .arg(fixture_dir.join("policy.yaml"))
            .arg("--inventory")
            .arg(&inventory)
            .arg("--out")
            .arg(&report_out)
            .status()
            .with_context(|| format!("Failed to run tagguard on fixture '{name}'"))?;
        if !matches!(status.code(), Some(0) | Some(2)) {
            errors.push(format!("fixture '{name}': tagguard exited with {status}"));
            continue;
        }

        let actual: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(&report_out)
                .with_context(|| format!("fixture '{name}': no report written"))?,
        )
        .with_context(|| format!("fixture '{name}': report is not JSON"))?;

        for err in validator.iter_errors(&actual) {
            errors.push(format!("fixture '{name}': schema validation: {err}"));
        }

        let expected: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(&golden_path)
                .with_context(|| format!("Failed to read {}", golden_path.display()))?,
        )?;
        if normalize_nondeterministic(actual) != expected {
            errors.push(format!(
                "fixture '{name}': output differs from expected.report.json"
            ));
        } else {
            println!("  ✓ fixture '{name}' matches golden report");
        }
        checked += 1;
    }

    if checked == 0 {
        bail!("No check fixtures found in {}", fixtures_dir().display());
    }
    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Conformance failed with {} errors", errors.len());
    }

    println!("\n✓ All {checked} fixtures pass conformance checks!");
    Ok(())
}

fn explain_coverage() -> anyhow::Result<()> {
    let mut errors = Vec::new();

    for kind in ViolationKind::ALL {
        match explain::lookup_explanation(kind.as_str()) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Kind '{kind}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Kind '{kind}' has empty description"));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Kind '{kind}' has empty remediation"));
                }
            }
            None => errors.push(format!("Kind '{kind}' has no explanation")),
        }
    }
    for code in explain::all_codes() {
        if ViolationKind::from_code(code).is_none() {
            errors.push(format!("Explained code '{code}' is not a violation kind"));
        }
    }

    if !errors.is_empty() {
        eprintln!("Explain coverage errors:");
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        );
    }

    println!("✓ {} violation kinds have explanations", ViolationKind::ALL.len());
    println!("\n✓ All explain coverage checks passed!");
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run tagguard on tests/fixtures and check schema + golden files");
    eprintln!("  explain-coverage  Validate every violation kind has an explanation");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
