//! Rendering utilities for human-facing surfaces (Markdown summaries, terminal tables).
//!
//! Renderers take a flattened, render-only model so they do not depend on the report schema.

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod table;

pub use markdown::render_markdown;
pub use model::{
    RenderableExclusion, RenderableReport, RenderableResource, RenderableSummary,
    RenderableVerdict, RenderableViolation,
};
pub use table::render_table;
