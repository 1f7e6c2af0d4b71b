#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdict {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableViolation {
    pub kind: String,
    pub tag: Option<String>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableResource {
    pub resource_id: String,
    pub resource_type: String,
    pub region: Option<String>,
    pub compliant: bool,
    pub compliance_level: Option<String>,
    pub violations: Vec<RenderableViolation>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableExclusion {
    pub resource_id: String,
    pub resource_type: String,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableSummary {
    pub inventoried: u32,
    pub evaluated: u32,
    pub compliant: u32,
    pub non_compliant: u32,
    pub skipped: u32,
    /// `(kind, count)` in the order they should be listed.
    pub violations_by_kind: Vec<(String, u32)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdict,
    pub resources: Vec<RenderableResource>,
    pub exclusions: Vec<RenderableExclusion>,
    pub summary: RenderableSummary,
}
