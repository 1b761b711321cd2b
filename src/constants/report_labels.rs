pub const TITLE: &str = "End-of-Course Test Results Form";

pub const CLASS_INSTRUCTOR: &str = "Class Instructor";
pub const SPEAKING_EXAMINER: &str = "Speaking Examiner";
pub const INVIGILATOR: &str = "Invigilator";
pub const LEVEL: &str = "Level";
pub const TEST_DATE: &str = "Test Date";
pub const FINISH_DATE: &str = "Finish Date";

pub const RANK_COLUMN: &str = "№";
pub const NAMES_COLUMN: &str = "Names";
pub const OVERALL_COLUMN: &str = "Overall (%)";
pub const VERDICT_COLUMN: &str = "Pass/Fail";
pub const OVERALL_MAX: &str = "100%";

/// Minimum overall percentage that counts as a pass.
pub const PASS_THRESHOLD_PERCENT: f64 = 60.0;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
