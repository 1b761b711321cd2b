pub const GREETING: &str =
    "👋 Hello! Let's start by collecting test details.\n\nWho is the class instructor?";
pub const SPEAKING_EXAMINER: &str = "Who is the speaking examiner?";
pub const INVIGILATOR: &str = "Who is the invigilator?";
pub const LEVEL: &str = "What is the level?";
pub const TEST_DATE: &str = "What is the test date? (Format: YYYY-MM-DD)";
pub const FINISH_DATE: &str = "What is the finish date? (Format: YYYY-MM-DD)";
pub const STUDENT_COUNT: &str = "How many students do you want to enter?";
pub const SKILLS_COUNT: &str = "How many skills does the group have?";

pub const CANCELLED: &str = "Operation cancelled. You can restart with /start.";
pub const NO_ACTIVE_SESSION: &str = "There is no form in progress. Send /start to begin.";
pub const REPORT_DELIVERED: &str = "✅ Test results document created successfully.";
pub const REPORT_FAILED: &str =
    "❌ Sorry, the results document could not be created. Please try again with /start.";

pub fn skill_name(index: usize) -> String {
    format!("Enter the name of skill {index}:")
}

pub fn skill_max_score(skill_name: &str) -> String {
    format!("Enter the max score for '{skill_name}':")
}

pub fn student_name(index: usize) -> String {
    format!("Enter the full name of student {index}:")
}

pub fn score(skill_index: usize, skill_name: &str, student_name: &str) -> String {
    format!("Enter the score for skill {skill_index} '{skill_name}' for student {student_name}:")
}
