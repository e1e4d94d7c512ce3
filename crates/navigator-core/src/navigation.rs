use crate::answers::{AnswerState, StepAnswers};
use crate::catalog::{Catalog, StepDefinition, StepKind};
use crate::error::{NavigatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Gating
// ---------------------------------------------------------------------------

/// Why forward navigation from a step is refused, or `None` if it is allowed.
///
/// Planners never block. Multi-select steps need at least one selection.
/// Graded checklists need every item answered.
pub fn advance_blocker(answers: Option<&StepAnswers>, step: &StepDefinition) -> Option<String> {
    match (&step.kind, answers) {
        (StepKind::Planner { .. }, _) => None,
        (StepKind::MultiSelect { .. }, Some(StepAnswers::MultiSelect(values))) => {
            if values.iter().any(|v| *v) {
                None
            } else {
                Some("select at least one item".to_string())
            }
        }
        (StepKind::Checklist { .. }, Some(StepAnswers::Checklist(values))) => {
            let open = values.iter().filter(|v| v.is_none()).count();
            match open {
                0 => None,
                1 => Some("1 item unanswered".to_string()),
                n => Some(format!("{n} items unanswered")),
            }
        }
        (kind, _) => Some(format!("no answers recorded for {kind} step")),
    }
}

pub fn can_advance(answers: Option<&StepAnswers>, step: &StepDefinition) -> bool {
    advance_blocker(answers, step).is_none()
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Navigation {
    Active { step: usize },
    Summary,
}

impl Default for Navigation {
    fn default() -> Self {
        Navigation::Active { step: 0 }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigation::Active { step } => write!(f, "step {}", step + 1),
            Navigation::Summary => f.write_str("summary"),
        }
    }
}

impl Navigation {
    pub fn current_step(self) -> Option<usize> {
        match self {
            Navigation::Active { step } => Some(step),
            Navigation::Summary => None,
        }
    }

    pub fn is_summary(self) -> bool {
        matches!(self, Navigation::Summary)
    }

    fn active_step(self, action: &str) -> Result<usize> {
        self.current_step()
            .ok_or_else(|| NavigatorError::InvalidTransition {
                from: self.to_string(),
                reason: format!("'{action}' is disabled while the summary is shown"),
            })
    }

    /// Jump straight to a step. No gating applies; only the catalog bounds
    /// are checked.
    pub fn go_to(self, step: usize, catalog: &Catalog) -> Result<Navigation> {
        self.active_step("go to")?;
        catalog.step(step)?;
        Ok(Navigation::Active { step })
    }

    /// Step back one page. A no-op on the first step.
    pub fn previous(self) -> Result<Navigation> {
        let step = self.active_step("previous")?;
        Ok(Navigation::Active {
            step: step.saturating_sub(1),
        })
    }

    /// Move forward if the current step's answers allow it. The last step
    /// leads to the summary.
    pub fn next(self, catalog: &Catalog, answers: &AnswerState) -> Result<Navigation> {
        let step = self.active_step("next")?;
        let definition = catalog.step(step)?;
        if let Some(reason) = advance_blocker(answers.row(step), definition) {
            tracing::warn!(step = step + 1, %reason, "forward navigation blocked");
            return Err(NavigatorError::AdvanceBlocked { step, reason });
        }
        if step >= catalog.last_index() {
            Ok(Navigation::Summary)
        } else {
            Ok(Navigation::Active { step: step + 1 })
        }
    }

    /// Leave the summary and return to the first step.
    pub fn edit_answers(self) -> Result<Navigation> {
        match self {
            Navigation::Summary => Ok(Navigation::Active { step: 0 }),
            Navigation::Active { .. } => Err(NavigatorError::InvalidTransition {
                from: self.to_string(),
                reason: "answers can only be re-edited from the summary".to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
