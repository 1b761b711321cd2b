use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One finished run of the results form.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
pub struct TestSession {
    #[validate(length(min = 1))]
    pub class_instructor: String,
    #[validate(length(min = 1))]
    pub speaking_examiner: String,
    #[validate(length(min = 1))]
    pub invigilator: String,
    #[validate(length(min = 1))]
    pub level: String,
    pub test_date: NaiveDate,
    pub finish_date: NaiveDate,
    #[validate(range(min = 1))]
    pub student_count: usize,
    #[validate(range(min = 1))]
    pub skills_count: usize,
    #[validate(nested)]
    pub skills: Vec<Skill>,
    #[validate(nested)]
    pub students: Vec<StudentRecord>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
pub struct Skill {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    pub max_score: f64,
}

impl Skill {
    pub fn new(name: &str, max_score: f64) -> Self {
        Skill {
            name: name.to_string(),
            max_score,
        }
    }
}

/// Raw per-skill scores of one student, in skill order.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
pub struct StudentRecord {
    #[validate(length(min = 1))]
    pub name: String,
    pub scores: Vec<f64>,
}

impl StudentRecord {
    pub fn new(name: &str, scores: Vec<f64>) -> Self {
        StudentRecord {
            name: name.to_string(),
            scores,
        }
    }
}

impl TestSession {
    pub fn total_max_score(&self) -> f64 {
        self.skills.iter().map(|skill| skill.max_score).sum()
    }
}
