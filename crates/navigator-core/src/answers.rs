use crate::catalog::{Catalog, StepKind};
use crate::error::{NavigatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Yes,
    No,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Yes => "yes",
            Verdict::No => "no",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verdict {
    type Err = NavigatorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Verdict::Yes),
            "no" | "n" => Ok(Verdict::No),
            _ => Err(NavigatorError::InvalidAction(format!(
                "expected yes or no, got '{s}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// StepAnswers
// ---------------------------------------------------------------------------

/// One answer row. The variant always matches the kind of the step at the
/// same catalog index, and the length never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum StepAnswers {
    Checklist(Vec<Option<Verdict>>),
    MultiSelect(Vec<bool>),
    Planner(Vec<String>),
}

impl StepAnswers {
    /// Empty row shaped for a step: all unanswered, all unselected, or all blank.
    pub fn for_kind(kind: &StepKind) -> Self {
        match kind {
            StepKind::Checklist { items } => StepAnswers::Checklist(vec![None; items.len()]),
            StepKind::MultiSelect { items } => StepAnswers::MultiSelect(vec![false; items.len()]),
            StepKind::Planner { fields } => StepAnswers::Planner(vec![String::new(); fields.len()]),
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            StepAnswers::Checklist(_) => "checklist",
            StepAnswers::MultiSelect(_) => "multi_select",
            StepAnswers::Planner(_) => "planner",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            StepAnswers::Checklist(v) => v.len(),
            StepAnswers::MultiSelect(v) => v.len(),
            StepAnswers::Planner(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when this row has the shape the given step expects.
    pub fn matches(&self, kind: &StepKind) -> bool {
        let same_kind = self.kind_str() == kind.as_str();
        let expected_len = match kind {
            StepKind::Checklist { items } | StepKind::MultiSelect { items } => items.len(),
            StepKind::Planner { fields } => fields.len(),
        };
        same_kind && self.len() == expected_len
    }
}

// ---------------------------------------------------------------------------
// AnswerState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerState {
    rows: Vec<StepAnswers>,
}

impl AnswerState {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            rows: catalog
                .steps
                .iter()
                .map(|s| StepAnswers::for_kind(&s.kind))
                .collect(),
        }
    }

    pub fn rows(&self) -> &[StepAnswers] {
        &self.rows
    }

    pub fn row(&self, step: usize) -> Option<&StepAnswers> {
        self.rows.get(step)
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    /// Record a yes/no answer on a graded checklist step. Overwrites any
    /// previous answer.
    pub fn set_single_answer(&mut self, step: usize, item: usize, verdict: Verdict) -> Result<()> {
        let row = self.row_mut(step)?;
        match row {
            StepAnswers::Checklist(values) => {
                let slot = slot_mut(values, step, item)?;
                *slot = Some(verdict);
                Ok(())
            }
            other => Err(kind_mismatch(step, "checklist", other)),
        }
    }

    /// Flip one item on a multi-select step.
    pub fn toggle_multi_answer(&mut self, step: usize, item: usize) -> Result<()> {
        let row = self.row_mut(step)?;
        match row {
            StepAnswers::MultiSelect(values) => {
                let slot = slot_mut(values, step, item)?;
                *slot = !*slot;
                Ok(())
            }
            other => Err(kind_mismatch(step, "multi_select", other)),
        }
    }

    /// Replace a planner field with `text`, stored verbatim.
    pub fn set_field_answer(&mut self, step: usize, field: usize, text: impl Into<String>) -> Result<()> {
        let row = self.row_mut(step)?;
        match row {
            StepAnswers::Planner(values) => {
                let slot = slot_mut(values, step, field)?;
                *slot = text.into();
                Ok(())
            }
            other => Err(kind_mismatch(step, "planner", other)),
        }
    }

    fn row_mut(&mut self, step: usize) -> Result<&mut StepAnswers> {
        let count = self.rows.len();
        self.rows
            .get_mut(step)
            .ok_or(NavigatorError::StepOutOfRange { index: step, count })
    }
}

fn slot_mut<T>(values: &mut [T], step: usize, index: usize) -> Result<&mut T> {
    let count = values.len();
    values.get_mut(index).ok_or(NavigatorError::ItemOutOfRange {
        step,
        index,
        count,
    })
}

fn kind_mismatch(step: usize, expected: &'static str, row: &StepAnswers) -> NavigatorError {
    NavigatorError::StepKindMismatch {
        step,
        expected,
        actual: row.kind_str(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lens(state: &AnswerState) -> Vec<usize> {
        state.rows().iter().map(|r| r.len()).collect()
    }

    #[test]
    fn initial_rows_follow_catalog_shape() {
        let catalog = Catalog::builtin();
        let state = AnswerState::new(&catalog);
        assert_eq!(lens(&state), [5, 5, 5, 6, 8]);
        assert_eq!(state.row(0), Some(&StepAnswers::Checklist(vec![None; 5])));
        assert_eq!(state.row(3), Some(&StepAnswers::MultiSelect(vec![false; 6])));
        assert_eq!(
            state.row(4),
            Some(&StepAnswers::Planner(vec![String::new(); 8]))
        );
        for (row, step) in state.rows().iter().zip(&catalog.steps) {
            assert!(row.matches(&step.kind));
        }
    }

    #[test]
    fn single_answer_overwrites() {
        let mut state = AnswerState::new(&Catalog::builtin());
        state.set_single_answer(0, 2, Verdict::Yes).unwrap();
        state.set_single_answer(0, 2, Verdict::No).unwrap();
        match state.row(0).unwrap() {
            StepAnswers::Checklist(v) => {
                assert_eq!(v[2], Some(Verdict::No));
                assert_eq!(v.iter().filter(|a| a.is_some()).count(), 1);
            }
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let mut state = AnswerState::new(&Catalog::builtin());
        state.toggle_multi_answer(3, 1).unwrap();
        assert_eq!(
            state.row(3),
            Some(&StepAnswers::MultiSelect(vec![
                false, true, false, false, false, false
            ]))
        );
        state.toggle_multi_answer(3, 1).unwrap();
        assert_eq!(state.row(3), Some(&StepAnswers::MultiSelect(vec![false; 6])));
    }

    #[test]
    fn field_text_stored_verbatim() {
        let mut state = AnswerState::new(&Catalog::builtin());
        state.set_field_answer(4, 0, "  policy brief \n").unwrap();
        state.set_field_answer(4, 1, "").unwrap();
        match state.row(4).unwrap() {
            StepAnswers::Planner(v) => {
                assert_eq!(v[0], "  policy brief \n");
                assert_eq!(v[1], "");
            }
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[test]
    fn wrong_kind_is_rejected_without_change() {
        let mut state = AnswerState::new(&Catalog::builtin());
        let before = state.clone();
        assert!(matches!(
            state.toggle_multi_answer(0, 0),
            Err(NavigatorError::StepKindMismatch {
                step: 0,
                expected: "multi_select",
                actual: "checklist"
            })
        ));
        assert!(state.set_single_answer(4, 0, Verdict::Yes).is_err());
        assert!(state.set_field_answer(3, 0, "x").is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut state = AnswerState::new(&Catalog::builtin());
        assert!(matches!(
            state.set_single_answer(0, 5, Verdict::Yes),
            Err(NavigatorError::ItemOutOfRange {
                step: 0,
                index: 5,
                count: 5
            })
        ));
        assert!(matches!(
            state.toggle_multi_answer(9, 0),
            Err(NavigatorError::StepOutOfRange { index: 9, count: 5 })
        ));
        assert_eq!(lens(&state), [5, 5, 5, 6, 8]);
    }

    #[test]
    fn verdict_parsing() {
        use std::str::FromStr;
        assert_eq!(Verdict::from_str("Yes").unwrap(), Verdict::Yes);
        assert_eq!(Verdict::from_str("n").unwrap(), Verdict::No);
        assert!(Verdict::from_str("maybe").is_err());
    }

    #[test]
    fn row_json_is_tagged() {
        let row = StepAnswers::Checklist(vec![Some(Verdict::Yes), None]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"type":"checklist","values":["yes",null]}"#);
    }
}
