//! Stable identifiers for violation kinds.
//!
//! Codes are short snake_case discriminators and appear verbatim in reports.

pub const CODE_MISSING_REQUIRED_TAG: &str = "missing_required_tag";
pub const CODE_FORBIDDEN_TAG_PRESENT: &str = "forbidden_tag_present";
pub const CODE_INVALID_VALUE: &str = "invalid_value";
pub const CODE_INVALID_FORMAT: &str = "invalid_format";
pub const CODE_CASE_MISMATCH: &str = "case_mismatch";
pub const CODE_SPECIFIC_TAG_MISMATCH: &str = "specific_tag_mismatch";
