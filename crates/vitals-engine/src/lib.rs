// Engine module - scoring and diagnosis over a finished check
// Pure logic: no commands are run here

pub mod diagnose;
pub mod score;

pub use diagnose::{diagnose, diagnose_report};
pub use score::{compute_score, weight};
