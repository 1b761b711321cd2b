use validator::Validate;

use crate::{
    constants::report_labels::{self as labels, DATE_FORMAT, PASS_THRESHOLD_PERCENT},
    errors::{AppError, AppResult},
    models::domain::{
        report::{Cell, MetadataField, ResultsTable},
        ReportDocument, StudentResult, TestSession, Verdict,
    },
};

pub struct ReportBuilder;

impl ReportBuilder {
    /// Scores every student, ranks them and lays out the results document.
    pub fn build_report(session: TestSession) -> AppResult<ReportDocument> {
        Self::check_session(&session)?;

        let results = Self::rank_students(&session);

        Ok(ReportDocument {
            title: labels::TITLE.to_string(),
            metadata_grid: Self::metadata_grid(&session),
            table: Self::results_table(&session, &results),
        })
    }

    /// Percent of the total achievable score, rounded to two decimals.
    pub fn percent(scores: &[f64], total_max: f64) -> f64 {
        if total_max <= 0.0 {
            return 0.0;
        }
        let total: f64 = scores.iter().sum();
        round_to_hundredths(total / total_max * 100.0)
    }

    pub fn verdict(percent: f64) -> Verdict {
        if percent >= PASS_THRESHOLD_PERCENT {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    /// Results ordered by percent, highest first. Equal percents keep input order.
    pub fn rank_students(session: &TestSession) -> Vec<StudentResult> {
        let total_max = session.total_max_score();

        let mut results: Vec<StudentResult> = session
            .students
            .iter()
            .map(|student| {
                let percent = Self::percent(&student.scores, total_max);
                StudentResult {
                    name: student.name.clone(),
                    scores: student.scores.clone(),
                    percent,
                    verdict: Self::verdict(percent),
                }
            })
            .collect();

        // `sort_by` is stable.
        results.sort_by(|a, b| b.percent.total_cmp(&a.percent));
        results
    }

    fn check_session(session: &TestSession) -> AppResult<()> {
        session.validate()?;

        if session.skills.len() != session.skills_count {
            return Err(AppError::MalformedSession(format!(
                "expected {} skills, found {}",
                session.skills_count,
                session.skills.len()
            )));
        }

        if session.students.len() != session.student_count {
            return Err(AppError::MalformedSession(format!(
                "expected {} students, found {}",
                session.student_count,
                session.students.len()
            )));
        }

        for student in &session.students {
            if student.scores.len() != session.skills.len() {
                return Err(AppError::MalformedSession(format!(
                    "student '{}' has {} scores for {} skills",
                    student.name,
                    student.scores.len(),
                    session.skills.len()
                )));
            }

            let out_of_range = student
                .scores
                .iter()
                .zip(&session.skills)
                .find(|(score, skill)| !(0.0..=skill.max_score).contains(*score));
            if let Some((score, skill)) = out_of_range {
                return Err(AppError::MalformedSession(format!(
                    "student '{}' scored {} in '{}' (max {})",
                    student.name, score, skill.name, skill.max_score
                )));
            }
        }

        Ok(())
    }

    // Finish date sits next to the instructor and test date next to the
    // invigilator. Existing forms are laid out this way.
    fn metadata_grid(session: &TestSession) -> Vec<Vec<MetadataField>> {
        vec![
            vec![
                MetadataField::new(labels::CLASS_INSTRUCTOR, &session.class_instructor),
                MetadataField::new(
                    labels::FINISH_DATE,
                    session.finish_date.format(DATE_FORMAT).to_string(),
                ),
                MetadataField::new(labels::LEVEL, &session.level),
            ],
            vec![
                MetadataField::new(
                    labels::TEST_DATE,
                    session.test_date.format(DATE_FORMAT).to_string(),
                ),
                MetadataField::new(labels::INVIGILATOR, &session.invigilator),
                MetadataField::new(labels::SPEAKING_EXAMINER, &session.speaking_examiner),
            ],
        ]
    }

    fn results_table(session: &TestSession, results: &[StudentResult]) -> ResultsTable {
        let mut header = vec![Cell::left(labels::RANK_COLUMN), Cell::left(labels::NAMES_COLUMN)];
        header.extend(session.skills.iter().map(|skill| Cell::left(&skill.name)));
        header.push(Cell::left(labels::OVERALL_COLUMN));
        header.push(Cell::left(labels::VERDICT_COLUMN));

        let mut sub_header = vec![Cell::left(""), Cell::left("")];
        sub_header.extend(
            session
                .skills
                .iter()
                .map(|skill| Cell::left(format_number(skill.max_score))),
        );
        sub_header.push(Cell::left(labels::OVERALL_MAX));
        sub_header.push(Cell::left(""));

        let rows = results
            .iter()
            .enumerate()
            .map(|(position, result)| {
                let mut row = vec![
                    Cell::centered((position + 1).to_string()),
                    Cell::left(&result.name),
                ];
                row.extend(result.scores.iter().map(|score| Cell::centered(format_number(*score))));
                row.push(Cell::centered(format_number(result.percent)));
                row.push(Cell::centered(result.verdict.label()).with_tone(result.verdict.tone()));
                row
            })
            .collect();

        ResultsTable {
            header,
            sub_header,
            rows,
        }
    }
}

/// Rounds the exact binary value to two decimals, ties to even.
///
/// A value lies exactly halfway between two hundredths only when it is an odd
/// multiple of 1/8 (`3.125`, `0.375`). Scaling those by 100 is exact, so they
/// take `round_ties_even`. Every other value has an unambiguous nearest
/// hundredth, which `{:.2}` formatting finds from the exact expansion without
/// the double rounding of `(value * 100.0).round()`.
fn round_to_hundredths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return (value * 100.0).round_ties_even() / 100.0;
    }

    format!("{value:.2}")
        .parse()
        .unwrap_or_else(|_| (value * 100.0).round() / 100.0)
}

/// Integral values keep one decimal (`50.0`); others use the shortest form (`7.25`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
