//! Pure tag policy evaluation (no IO).
//!
//! Input: an effective policy resolved elsewhere plus resources with their tag maps.
//! Output: per-resource compliance results + summary data.

#![forbid(unsafe_code)]

pub mod model;
pub mod patterns;
pub mod policy;
pub mod report;

pub mod checks;
mod engine;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptest;

pub use engine::{assess, evaluate, evaluate_inventory};
pub use patterns::{compile_patterns, InvalidPatternError, PatternTable};
pub use report::aggregate;
