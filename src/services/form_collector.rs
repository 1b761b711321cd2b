use chrono::NaiveDate;

use crate::{
    constants::prompts,
    errors::{AppError, AppResult, InputError},
    models::domain::{Skill, StudentRecord, TestSession},
    services::validation,
};

/// Position in the fixed question sequence. Indexes are zero-based; prompts
/// show them one-based.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FormStep {
    #[default]
    ClassInstructor,
    SpeakingExaminer,
    Invigilator,
    Level,
    TestDate,
    FinishDate,
    StudentCount,
    SkillsCount,
    SkillName { index: usize },
    SkillMaxScore { index: usize, name: String },
    StudentDetails { index: usize },
    /// The skill being scored is `scores.len()`.
    Scores {
        student: usize,
        name: String,
        scores: Vec<f64>,
    },
    Complete,
}

/// Result of feeding one answer into the collector.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    /// Answer accepted; ask the next question.
    Prompt(String),
    /// Answer rejected; the step and collected data are unchanged.
    Retry(InputError),
    /// Last score accepted; the form is finished.
    Complete(TestSession),
}

#[derive(Clone, Debug, Default, PartialEq)]
struct SessionDraft {
    class_instructor: Option<String>,
    speaking_examiner: Option<String>,
    invigilator: Option<String>,
    level: Option<String>,
    test_date: Option<NaiveDate>,
    finish_date: Option<NaiveDate>,
    student_count: usize,
    skills_count: usize,
    skills: Vec<Skill>,
    students: Vec<StudentRecord>,
}

impl SessionDraft {
    fn finish(self) -> AppResult<TestSession> {
        fn missing(field: &str) -> AppError {
            AppError::MalformedSession(format!("{field} was never collected"))
        }

        Ok(TestSession {
            class_instructor: self.class_instructor.ok_or_else(|| missing("class instructor"))?,
            speaking_examiner: self
                .speaking_examiner
                .ok_or_else(|| missing("speaking examiner"))?,
            invigilator: self.invigilator.ok_or_else(|| missing("invigilator"))?,
            level: self.level.ok_or_else(|| missing("level"))?,
            test_date: self.test_date.ok_or_else(|| missing("test date"))?,
            finish_date: self.finish_date.ok_or_else(|| missing("finish date"))?,
            student_count: self.student_count,
            skills_count: self.skills_count,
            skills: self.skills,
            students: self.students,
        })
    }
}

/// Drives one chat through the results form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormCollector {
    step: FormStep,
    draft: SessionDraft,
}

impl FormCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> &FormStep {
        &self.step
    }

    pub fn skills(&self) -> &[Skill] {
        &self.draft.skills
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.draft.students
    }

    /// The question for the current step.
    pub fn prompt(&self) -> String {
        match &self.step {
            FormStep::ClassInstructor => prompts::GREETING.to_string(),
            FormStep::SpeakingExaminer => prompts::SPEAKING_EXAMINER.to_string(),
            FormStep::Invigilator => prompts::INVIGILATOR.to_string(),
            FormStep::Level => prompts::LEVEL.to_string(),
            FormStep::TestDate => prompts::TEST_DATE.to_string(),
            FormStep::FinishDate => prompts::FINISH_DATE.to_string(),
            FormStep::StudentCount => prompts::STUDENT_COUNT.to_string(),
            FormStep::SkillsCount => prompts::SKILLS_COUNT.to_string(),
            FormStep::SkillName { index } => prompts::skill_name(index + 1),
            FormStep::SkillMaxScore { name, .. } => prompts::skill_max_score(name),
            FormStep::StudentDetails { index } => prompts::student_name(index + 1),
            FormStep::Scores { name, scores, .. } => {
                let skill = scores.len();
                prompts::score(skill + 1, &self.draft.skills[skill].name, name)
            }
            FormStep::Complete => prompts::REPORT_DELIVERED.to_string(),
        }
    }

    /// Validates `raw` against the current step and advances on success.
    pub fn accept(&mut self, raw: &str) -> AppResult<Transition> {
        if self.step == FormStep::Complete {
            return Err(AppError::Internal(
                "answer received after the form was completed".to_string(),
            ));
        }

        match self.advance(raw) {
            Err(err) => {
                log::debug!("Rejected answer at {:?}: {}", self.step, err);
                Ok(Transition::Retry(err))
            }
            Ok(FormStep::Complete) => {
                self.step = FormStep::Complete;
                let session = std::mem::take(&mut self.draft).finish()?;
                Ok(Transition::Complete(session))
            }
            Ok(next) => {
                self.step = next;
                Ok(Transition::Prompt(self.prompt()))
            }
        }
    }

    // Draft fields are only written after the answer validated, so a rejected
    // answer leaves the collector exactly as it was.
    fn advance(&mut self, raw: &str) -> Result<FormStep, InputError> {
        let draft = &mut self.draft;

        let next = match &self.step {
            FormStep::ClassInstructor => {
                draft.class_instructor = Some(validation::non_empty(raw, "class instructor")?);
                FormStep::SpeakingExaminer
            }
            FormStep::SpeakingExaminer => {
                draft.speaking_examiner = Some(validation::non_empty(raw, "speaking examiner")?);
                FormStep::Invigilator
            }
            FormStep::Invigilator => {
                draft.invigilator = Some(validation::non_empty(raw, "invigilator")?);
                FormStep::Level
            }
            FormStep::Level => {
                draft.level = Some(validation::non_empty(raw, "level")?);
                FormStep::TestDate
            }
            FormStep::TestDate => {
                draft.test_date = Some(validation::date(raw, "test date")?);
                FormStep::FinishDate
            }
            FormStep::FinishDate => {
                draft.finish_date = Some(validation::date(raw, "finish date")?);
                FormStep::StudentCount
            }
            FormStep::StudentCount => {
                draft.student_count = validation::positive_integer(raw, "students count")?;
                draft.students.clear();
                FormStep::SkillsCount
            }
            FormStep::SkillsCount => {
                draft.skills_count = validation::positive_integer(raw, "number of skills")?;
                draft.skills.clear();
                FormStep::SkillName { index: 0 }
            }
            FormStep::SkillName { index } => FormStep::SkillMaxScore {
                index: *index,
                name: validation::non_empty(raw, "skill name")?,
            },
            FormStep::SkillMaxScore { index, name } => {
                let max_score = validation::positive_number(raw, "max score")?;
                draft.skills.push(Skill::new(name, max_score));

                if index + 1 < draft.skills_count {
                    FormStep::SkillName { index: index + 1 }
                } else {
                    FormStep::StudentDetails { index: 0 }
                }
            }
            FormStep::StudentDetails { index } => FormStep::Scores {
                student: *index,
                name: validation::non_empty(raw, "student name")?,
                scores: Vec::with_capacity(draft.skills.len()),
            },
            FormStep::Scores {
                student,
                name,
                scores,
            } => {
                let skill = &draft.skills[scores.len()];
                let score = validation::score(raw, skill.max_score)?;

                let mut scores = scores.clone();
                scores.push(score);

                if scores.len() < draft.skills.len() {
                    FormStep::Scores {
                        student: *student,
                        name: name.clone(),
                        scores,
                    }
                } else {
                    draft.students.push(StudentRecord::new(name, scores));
                    if student + 1 < draft.student_count {
                        FormStep::StudentDetails { index: student + 1 }
                    } else {
                        FormStep::Complete
                    }
                }
            }
            FormStep::Complete => FormStep::Complete,
        };

        Ok(next)
    }
}
