pub mod report;
pub mod test_session;

pub use report::{ReportDocument, StudentResult, Verdict};
pub use test_session::{Skill, StudentRecord, TestSession};
