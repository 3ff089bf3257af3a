//! Letter grades and rubric vocabulary shared by evaluation results,
//! challenge statistics and leaderboards.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Best to worst.
    pub const ALL: [Grade; 6] = [Grade::S, Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// Map a 0-10 score to its grade band.
    pub fn from_score(score: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|grade| score >= grade.min_score())
            .unwrap_or(Grade::F)
    }

    /// Lowest score that still earns this grade.
    pub fn min_score(&self) -> f64 {
        match self {
            Grade::S => 9.0,
            Grade::A => 8.0,
            Grade::B => 6.5,
            Grade::C => 5.0,
            Grade::D => 3.0,
            Grade::F => 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The five dimensions every prompt is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RubricDimension {
    Clarity,
    Specificity,
    Context,
    Structure,
    Completeness,
}

impl RubricDimension {
    pub const ALL: [RubricDimension; 5] = [
        RubricDimension::Clarity,
        RubricDimension::Specificity,
        RubricDimension::Context,
        RubricDimension::Structure,
        RubricDimension::Completeness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RubricDimension::Clarity => "Clarity",
            RubricDimension::Specificity => "Specificity",
            RubricDimension::Context => "Context",
            RubricDimension::Structure => "Structure",
            RubricDimension::Completeness => "Completeness",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RubricDimension::Clarity => "Free of vague terms, unambiguous",
            RubricDimension::Specificity => "Concrete technical details",
            RubricDimension::Context => "Background, persona, use-case",
            RubricDimension::Structure => "Numbered steps, sections, formatting",
            RubricDimension::Completeness => "Covers all challenge hint areas",
        }
    }
}

/// `value` as a whole-number share of `total`. Zero when `total` is zero.
pub fn percentage(value: f64, total: f64) -> i64 {
    if total == 0.0 {
        return 0;
    }
    ((value / total) * 100.0).round() as i64
}

/// Scores are always shown with one decimal.
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
