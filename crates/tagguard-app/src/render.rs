//! Render use cases: Markdown and tables from reports, plus file output helpers.

use crate::report::{ReportFormat, parse_report_json, serialize_report, to_renderable};
use anyhow::Context;
use camino::Utf8Path;
use tagguard_types::TagguardReport;

/// Input for rendering Markdown from a saved JSON report.
#[derive(Clone, Debug)]
pub struct MarkdownInput<'a> {
    pub report_text: &'a str,
}

pub fn run_markdown(input: MarkdownInput<'_>) -> anyhow::Result<String> {
    let report = parse_report_json(input.report_text)?;
    Ok(render_markdown(&report))
}

pub fn render_markdown(report: &TagguardReport) -> String {
    tagguard_render::render_markdown(&to_renderable(report))
}

pub fn render_table(report: &TagguardReport) -> String {
    tagguard_render::render_table(&to_renderable(report))
}

pub fn write_report(
    path: &Utf8Path,
    report: &TagguardReport,
    format: ReportFormat,
) -> anyhow::Result<()> {
    let bytes = serialize_report(report, format)?;
    write_bytes(path, &bytes)
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes())
}

fn write_bytes(path: &Utf8Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create dir {parent}"))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {path}"))
}
