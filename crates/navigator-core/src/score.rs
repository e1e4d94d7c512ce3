use crate::answers::{StepAnswers, Verdict};
use crate::catalog::{StepDefinition, StepKind};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ScoreKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    /// Graded or multi-select checklist.
    Readiness,
    /// Planner: filled fields out of total, informational only.
    Progress,
}

impl ScoreKind {
    pub fn label(self) -> &'static str {
        match self {
            ScoreKind::Readiness => "Reuse Readiness Score",
            ScoreKind::Progress => "Progress",
        }
    }
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub kind: ScoreKind,
    pub score: usize,
    pub max: usize,
}

impl Score {
    pub fn is_full(&self) -> bool {
        self.score == self.max
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} out of {}", self.score, self.max)
    }
}

/// Score one step.
///
/// Graded checklists count `yes` answers, multi-select steps count selected
/// items, planners count non-empty fields. `max` is always the item or field
/// count. Missing answers, or a row whose kind does not match the step,
/// score zero.
pub fn compute_score(answers: Option<&StepAnswers>, step: &StepDefinition) -> Score {
    let (kind, max) = match &step.kind {
        StepKind::Checklist { items } | StepKind::MultiSelect { items } => {
            (ScoreKind::Readiness, items.len())
        }
        StepKind::Planner { fields } => (ScoreKind::Progress, fields.len()),
    };

    let score = match (&step.kind, answers) {
        (StepKind::Checklist { .. }, Some(StepAnswers::Checklist(values))) => values
            .iter()
            .filter(|v| matches!(v, Some(Verdict::Yes)))
            .count(),
        (StepKind::MultiSelect { .. }, Some(StepAnswers::MultiSelect(values))) => {
            values.iter().filter(|v| **v).count()
        }
        (StepKind::Planner { .. }, Some(StepAnswers::Planner(values))) => {
            values.iter().filter(|v| !v.is_empty()).count()
        }
        _ => 0,
    };

    Score { kind, score, max }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
