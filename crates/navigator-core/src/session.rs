use crate::answers::{AnswerState, Verdict};
use crate::catalog::Catalog;
use crate::error::{NavigatorError, Result};
use crate::navigation::{can_advance, Navigation};
use crate::score::{compute_score, Score};
use crate::summary::{summarize, Summary};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A discrete user action. Answer actions address the active step; item,
/// field and step indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Answer { item: usize, verdict: Verdict },
    Toggle { item: usize },
    Fill { field: usize, text: String },
    GoTo { step: usize },
    Previous,
    Next,
    EditAnswers,
    Print,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Answer { item, verdict } => write!(f, "{verdict} {}", item + 1),
            Action::Toggle { item } => write!(f, "toggle {}", item + 1),
            Action::Fill { field, .. } => write!(f, "set {}", field + 1),
            Action::GoTo { step } => write!(f, "goto {}", step + 1),
            Action::Previous => f.write_str("prev"),
            Action::Next => f.write_str("next"),
            Action::EditAnswers => f.write_str("edit"),
            Action::Print => f.write_str("print"),
        }
    }
}

/// Parse a typed command. Numbers are 1-based as shown on screen.
///
/// `yes 2`, `no 3`, `toggle 1`, `set 4 some text`, `goto 5`, `next`,
/// `prev`, `edit`, `print`.
impl std::str::FromStr for Action {
    type Err = NavigatorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let line = s.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r),
            None => (line.trim_end(), ""),
        };
        match word.to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Action::Answer {
                item: parse_number(rest)?,
                verdict: Verdict::Yes,
            }),
            "no" | "n" => Ok(Action::Answer {
                item: parse_number(rest)?,
                verdict: Verdict::No,
            }),
            "toggle" | "t" => Ok(Action::Toggle {
                item: parse_number(rest)?,
            }),
            "set" | "s" => {
                let rest = rest.trim_start();
                let (num, text) = rest
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest, ""));
                Ok(Action::Fill {
                    field: parse_number(num)?,
                    text: text.to_string(),
                })
            }
            "goto" | "go" | "g" => Ok(Action::GoTo {
                step: parse_number(rest)?,
            }),
            "prev" | "previous" | "back" | "p" => Ok(Action::Previous),
            "next" | "finish" => Ok(Action::Next),
            "edit" => Ok(Action::EditAnswers),
            "print" | "export" => Ok(Action::Print),
            "" => Err(NavigatorError::InvalidAction("empty command".to_string())),
            other => Err(NavigatorError::InvalidAction(format!(
                "unknown command '{other}'"
            ))),
        }
    }
}

fn parse_number(s: &str) -> Result<usize> {
    let s = s.trim();
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(NavigatorError::InvalidAction(format!(
            "expected a number starting at 1, got '{s}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Everything that changes during one pass through the wizard. The catalog
/// is passed alongside and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub answers: AnswerState,
    pub navigation: Navigation,
}

impl Session {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            answers: AnswerState::new(catalog),
            navigation: Navigation::default(),
        }
    }

    /// Apply one action and return the resulting snapshot. `self` is left
    /// untouched, so a failed action never leaves a half-applied state.
    pub fn apply(&self, catalog: &Catalog, action: &Action) -> Result<Session> {
        let mut next = self.clone();
        match action {
            Action::Answer { item, verdict } => {
                let step = self.editable_step()?;
                next.answers.set_single_answer(step, *item, *verdict)?;
            }
            Action::Toggle { item } => {
                let step = self.editable_step()?;
                next.answers.toggle_multi_answer(step, *item)?;
            }
            Action::Fill { field, text } => {
                let step = self.editable_step()?;
                next.answers.set_field_answer(step, *field, text.as_str())?;
            }
            Action::GoTo { step } => {
                next.navigation = self.navigation.go_to(*step, catalog)?;
            }
            Action::Previous => {
                next.navigation = self.navigation.previous()?;
            }
            Action::Next => {
                next.navigation = self.navigation.next(catalog, &self.answers)?;
            }
            Action::EditAnswers => {
                next.navigation = self.navigation.edit_answers()?;
            }
            Action::Print => {
                if !self.navigation.is_summary() {
                    return Err(NavigatorError::InvalidTransition {
                        from: self.navigation.to_string(),
                        reason: "print is available from the summary".to_string(),
                    });
                }
            }
        }
        tracing::debug!(
            %action,
            from = %self.navigation,
            to = %next.navigation,
            "applied action"
        );
        Ok(next)
    }

    fn editable_step(&self) -> Result<usize> {
        self.navigation
            .current_step()
            .ok_or_else(|| NavigatorError::InvalidTransition {
                from: self.navigation.to_string(),
                reason: "answers are read-only while the summary is shown".to_string(),
            })
    }

    /// Score of the active step, or `None` on the summary.
    pub fn current_score(&self, catalog: &Catalog) -> Option<Score> {
        let step = self.navigation.current_step()?;
        let definition = catalog.steps.get(step)?;
        Some(compute_score(self.answers.row(step), definition))
    }

    pub fn can_advance(&self, catalog: &Catalog) -> bool {
        match self.navigation.current_step() {
            Some(step) => catalog
                .steps
                .get(step)
                .map(|d| can_advance(self.answers.row(step), d))
                .unwrap_or(false),
            None => false,
        }
    }

    pub fn summary(&self, catalog: &Catalog) -> Summary {
        summarize(catalog, &self.answers)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
