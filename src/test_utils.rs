#[cfg(test)]
pub mod fixtures {
    use chrono::NaiveDate;

    use crate::models::domain::{Skill, StudentRecord, TestSession};

    /// Header answers shared by most dialogue tests, in prompt order.
    pub const HEADER_ANSWERS: [&str; 6] = ["Ana", "Ben", "Cid", "B2", "2024-01-10", "2024-01-20"];

    /// Completed session with two skills and two students in non-ranked order.
    pub fn sample_session() -> TestSession {
        session_with(
            vec![Skill::new("Writing", 10.0), Skill::new("Speaking", 20.0)],
            vec![
                StudentRecord::new("Dan", vec![6.0, 9.0]),
                StudentRecord::new("Carla", vec![7.0, 14.0]),
            ],
        )
    }

    /// Session with the standard header and counts matching the given lists.
    pub fn session_with(skills: Vec<Skill>, students: Vec<StudentRecord>) -> TestSession {
        TestSession {
            class_instructor: "Ana".to_string(),
            speaking_examiner: "Ben".to_string(),
            invigilator: "Cid".to_string(),
            level: "B2".to_string(),
            test_date: NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"),
            finish_date: NaiveDate::from_ymd_opt(2024, 1, 20).expect("valid date"),
            student_count: students.len(),
            skills_count: skills.len(),
            skills,
            students,
        }
    }

    /// Every answer of the Ana/Ben/Cid scenario after `/start`.
    pub fn scenario_answers() -> Vec<&'static str> {
        let mut answers = HEADER_ANSWERS.to_vec();
        answers.extend(["2", "1", "Writing", "50", "Alice", "40", "Bob", "20"]);
        answers
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_session_counts_match() {
        let session = sample_session();
        assert_eq!(session.skills.len(), session.skills_count);
        assert_eq!(session.students.len(), session.student_count);
    }

    #[test]
    fn test_fixtures_scenario_answers() {
        let answers = scenario_answers();
        assert_eq!(answers.len(), 14);
        assert_eq!(answers[0], "Ana");
        assert_eq!(answers.last(), Some(&"20"));
    }
}
