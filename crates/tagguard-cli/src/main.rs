//! CLI entry point for tagguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All business logic lives in the `tagguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use tagguard_app::{
    CheckInput, ExplainOutput, InitOutcome, InventoryFormat, MarkdownInput, ReportFormat,
    render_markdown, render_table, run_check, run_explain, run_init, run_markdown, run_validate,
    serialize_report, verdict_exit_code, write_report, write_text,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "tagguard",
    version,
    about = "Tag compliance policy validation and evaluation for cloud resource inventories"
)]
struct Cli {
    /// Log filter directive (e.g. `info`, `tagguard_settings=debug`). Logs go to stderr.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for ReportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Yaml => ReportFormat::Yaml,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse and validate a policy document.
    Validate {
        #[arg(long, default_value = "tagguard.yaml")]
        policy: Utf8PathBuf,
    },

    /// Evaluate a resource inventory against a policy and emit a report.
    Check {
        #[arg(long, default_value = "tagguard.yaml")]
        policy: Utf8PathBuf,

        /// Inventory file (JSON, or YAML when the extension is .yaml/.yml).
        #[arg(long)]
        inventory: Utf8PathBuf,

        /// Report serialization format.
        #[arg(long, value_enum, default_value = "json")]
        format: FormatArg,

        /// Where to write the report (stdout if not specified).
        #[arg(long)]
        out: Option<Utf8PathBuf>,

        /// Also write a Markdown summary.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,

        /// Print a plain-text table to stdout instead of the report.
        #[arg(long)]
        table: bool,
    },

    /// Write a starter policy document.
    Init {
        #[arg(long, default_value = "tagguard.yaml")]
        out: Utf8PathBuf,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Explain a violation kind with remediation guidance.
    Explain {
        /// The violation kind (e.g. "missing_required_tag").
        kind: String,
    },

    /// Render Markdown from an existing JSON report.
    Md {
        #[arg(long)]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (stdout if not specified).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_json);

    match run(cli.cmd) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("tagguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn run(cmd: Commands) -> anyhow::Result<i32> {
    match cmd {
        Commands::Validate { policy } => cmd_validate(&policy),
        Commands::Check {
            policy,
            inventory,
            format,
            out,
            markdown_out,
            table,
        } => cmd_check(
            &policy,
            &inventory,
            format.into(),
            out.as_deref(),
            markdown_out.as_deref(),
            table,
        ),
        Commands::Init { out, force } => cmd_init(&out, force),
        Commands::Explain { kind } => Ok(cmd_explain(&kind)),
        Commands::Md { report, output } => cmd_md(&report, output.as_deref()),
    }
}

fn read_file(path: &Utf8Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what}: {path}"))
}

fn cmd_validate(policy: &Utf8Path) -> anyhow::Result<i32> {
    let text = read_file(policy, "policy")?;
    let output = run_validate(&text)?;
    println!("{}", output.summary_line());
    Ok(0)
}

fn cmd_check(
    policy: &Utf8Path,
    inventory: &Utf8Path,
    format: ReportFormat,
    out: Option<&Utf8Path>,
    markdown_out: Option<&Utf8Path>,
    table: bool,
) -> anyhow::Result<i32> {
    let policy_text = read_file(policy, "policy")?;
    let inventory_text = read_file(inventory, "inventory")?;

    let output = run_check(CheckInput {
        policy_text: &policy_text,
        inventory_text: &inventory_text,
        inventory_format: InventoryFormat::from_path(inventory),
    })?;
    let report = &output.report;

    if let Some(path) = out {
        write_report(path, report, format).context("write report")?;
        debug!(path = %path, "wrote report");
    }
    if let Some(path) = markdown_out {
        write_text(path, &render_markdown(report)).context("write markdown")?;
        debug!(path = %path, "wrote markdown summary");
    }

    if table {
        print!("{}", render_table(report));
    } else if out.is_none() {
        let bytes = serialize_report(report, format)?;
        print!("{}", String::from_utf8_lossy(&bytes));
    }

    Ok(verdict_exit_code(report.verdict))
}

fn cmd_init(out: &Utf8Path, force: bool) -> anyhow::Result<i32> {
    match run_init(out, force)? {
        InitOutcome::Created => eprintln!("tagguard: wrote {out}"),
        InitOutcome::Overwritten => eprintln!("tagguard: overwrote {out}"),
    }
    Ok(0)
}

fn cmd_explain(kind: &str) -> i32 {
    match run_explain(kind) {
        ExplainOutput::Found(exp) => {
            print!("{}", tagguard_app::format_explanation(&exp));
            0
        }
        ExplainOutput::NotFound {
            identifier,
            available_codes,
        } => {
            eprint!(
                "{}",
                tagguard_app::format_not_found(&identifier, available_codes)
            );
            1
        }
    }
}

fn cmd_md(report: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<i32> {
    let report_text = read_file(report, "report")?;
    let md = run_markdown(MarkdownInput {
        report_text: &report_text,
    })?;

    match output {
        Some(path) => write_text(path, &md).context("write markdown output")?,
        None => print!("{md}"),
    }
    Ok(0)
}
