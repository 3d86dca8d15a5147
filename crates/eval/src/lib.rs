//! Evaluation utilities for deskrail.
//!
//! Pure scoring and aggregation. The CLI runs the synthetic suite
//! through a live registry and feeds the outcomes in here; nothing in
//! this crate touches the pipeline itself.

pub mod report;
pub mod shadow;
pub mod synthetic;

pub use report::{build_report, EvalReport};
pub use shadow::{compare, ShadowResult};
pub use synthetic::{cases, score_cases, SyntheticCase};
