pub mod records;
pub mod report;
pub mod severity;
pub mod subsystem;

pub use records::*;
pub use report::{AggregateReport, CompositeScore, DiagnoseReport, Diagnosis};
pub use severity::Severity;
pub use subsystem::Subsystem;
