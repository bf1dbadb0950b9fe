//! Letter grades, grade points, and per-student / per-subject aggregates.
//!
//! A registration's grade is `Option<Grade>`: `None` means the subject has
//! been registered but not graded yet. Ungraded registrations never count
//! towards a GPA, a pass rate, or an average.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// The fixed set of letter grades, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    pub const ALL: [Grade; 8] = [
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::CPlus,
        Grade::C,
        Grade::DPlus,
        Grade::D,
        Grade::F,
    ];

    /// Stored / wire representation (`"B+"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Grade-point value on the 4.0 scale.
    pub fn points(&self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::BPlus => 3.5,
            Self::B => 3.0,
            Self::CPlus => 2.5,
            Self::C => 2.0,
            Self::DPlus => 1.5,
            Self::D => 1.0,
            Self::F => 0.0,
        }
    }

    /// Every grade except `F` passes.
    pub fn is_passing(&self) -> bool {
        !matches!(self, Self::F)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected grade text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid grade '{0}'. Valid grades: A, B+, B, C+, C, D+, D, F")]
pub struct GradeParseError(pub String);

impl FromStr for Grade {
    type Err = GradeParseError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Grade::ALL
            .into_iter()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| GradeParseError(s.to_string()))
    }
}

/// Parse grade input where an absent or blank value clears the grade.
pub fn parse_grade_input(raw: Option<&str>) -> Result<Option<Grade>, GradeParseError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some),
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Mean grade point over graded registrations; `0.0` when nothing is graded.
pub fn compute_gpa<I>(grades: I) -> f64
where
    I: IntoIterator<Item = Option<Grade>>,
{
    let (total, count) = grades
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(total, count), g| (total + g.points(), count + 1));

    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Round a GPA to two decimals for display.
pub fn round_gpa(gpa: f64) -> f64 {
    (gpa * 100.0).round() / 100.0
}

/// Grade distribution and derived rates for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeStatistics {
    /// Number of registrations that carry a grade.
    pub total_graded: usize,
    pub grade_distribution: BTreeMap<Grade, usize>,
    /// Percentage (0-100) of graded registrations with a passing grade.
    pub pass_rate: f64,
    pub average_gpa: f64,
}

pub fn compute_grade_statistics<I>(grades: I) -> GradeStatistics
where
    I: IntoIterator<Item = Option<Grade>>,
{
    let mut grade_distribution = BTreeMap::new();
    for grade in grades.into_iter().flatten() {
        *grade_distribution.entry(grade).or_insert(0) += 1;
    }

    let total_graded: usize = grade_distribution.values().sum();
    if total_graded == 0 {
        return GradeStatistics {
            total_graded,
            grade_distribution,
            pass_rate: 0.0,
            average_gpa: 0.0,
        };
    }

    let passed: usize = grade_distribution
        .iter()
        .filter(|(g, _)| g.is_passing())
        .map(|(_, n)| n)
        .sum();
    let total_points: f64 = grade_distribution
        .iter()
        .map(|(g, n)| g.points() * *n as f64)
        .sum();

    GradeStatistics {
        total_graded,
        grade_distribution,
        pass_rate: passed as f64 / total_graded as f64 * 100.0,
        average_gpa: total_points / total_graded as f64,
    }
}

/// Graded vs. ungraded head count for a subject's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradingSummary {
    pub total_registered: usize,
    pub graded_count: usize,
    pub ungraded_count: usize,
}

pub fn compute_grading_summary<I>(grades: I) -> GradingSummary
where
    I: IntoIterator<Item = Option<Grade>>,
{
    let (total_registered, graded_count) = grades
        .into_iter()
        .fold((0, 0), |(total, graded), g| (total + 1, graded + usize::from(g.is_some())));

    GradingSummary {
        total_registered,
        graded_count,
        ungraded_count: total_registered - graded_count,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
