use crate::answers::{AnswerState, StepAnswers, Verdict};
use crate::catalog::{Catalog, StepKind};
use crate::score::{compute_score, Score};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const NOT_ANSWERED: &str = "Not answered";
pub const SELECTED: &str = "Selected";
pub const NOT_SELECTED: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub label: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSummary {
    /// 1-indexed position in the catalog.
    pub number: usize,
    pub name: String,
    pub kind: String,
    pub entries: Vec<SummaryEntry>,
    /// Absent for planner steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub steps: Vec<StepSummary>,
}

/// Read-only projection of every step's answers.
pub fn summarize(catalog: &Catalog, answers: &AnswerState) -> Summary {
    let steps = catalog
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let row = answers.row(i);
            let entries = match &step.kind {
                StepKind::Checklist { items } => items
                    .iter()
                    .enumerate()
                    .map(|(j, item)| {
                        let answer = match row {
                            Some(StepAnswers::Checklist(v)) => match v.get(j).copied().flatten() {
                                Some(Verdict::Yes) => "Yes",
                                Some(Verdict::No) => "No",
                                None => NOT_ANSWERED,
                            },
                            _ => NOT_ANSWERED,
                        };
                        SummaryEntry {
                            label: item.label.clone(),
                            answer: answer.to_string(),
                            description: Some(item.desc.clone()),
                        }
                    })
                    .collect(),
                StepKind::MultiSelect { items } => items
                    .iter()
                    .enumerate()
                    .map(|(j, item)| {
                        let selected = match row {
                            Some(StepAnswers::MultiSelect(v)) => v.get(j).copied().unwrap_or(false),
                            _ => false,
                        };
                        SummaryEntry {
                            label: item.label.clone(),
                            answer: (if selected { SELECTED } else { NOT_SELECTED }).to_string(),
                            description: Some(item.desc.clone()),
                        }
                    })
                    .collect(),
                StepKind::Planner { fields } => match row {
                    Some(StepAnswers::Planner(v)) => fields
                        .iter()
                        .zip(v)
                        .filter(|(_, text)| !text.is_empty())
                        .map(|(field, text)| SummaryEntry {
                            label: field.label.clone(),
                            answer: text.clone(),
                            description: None,
                        })
                        .collect(),
                    _ => Vec::new(),
                },
            };
            let score = if step.is_planner() {
                None
            } else {
                Some(compute_score(row, step))
            };
            StepSummary {
                number: i + 1,
                name: step.name.clone(),
                kind: step.kind.as_str().to_string(),
                entries,
                score,
            }
        })
        .collect();

    Summary { steps }
}

impl Summary {
    /// Markdown body, one section per step.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            let _ = write!(out, "## Step {}: {}", step.number, step.name);
            if let Some(score) = &step.score {
                let _ = write!(out, " ({score})");
            }
            out.push('\n');
            out.push('\n');
            if step.entries.is_empty() {
                out.push_str("_Nothing recorded._\n");
            }
            for entry in &step.entries {
                // Continuation lines stay inside the list item.
                let answer = entry.answer.replace('\n', "\n  ");
                let _ = write!(out, "- **{}:** {answer}", entry.label);
                if let Some(desc) = &entry.description {
                    let _ = write!(out, " ({desc})");
                }
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_summary() {
        let catalog = Catalog::builtin();
        let summary = summarize(&catalog, &AnswerState::new(&catalog));
        assert_eq!(summary.steps.len(), 5);
        assert!(summary.steps[0]
            .entries
            .iter()
            .all(|e| e.answer == NOT_ANSWERED));
        assert!(summary.steps[3]
            .entries
            .iter()
            .all(|e| e.answer == NOT_SELECTED));
        assert!(summary.steps[4].entries.is_empty());
        assert!(summary.steps[4].score.is_none());
        assert_eq!(summary.steps[0].score.map(|s| s.score), Some(0));
    }

    #[test]
    fn answers_are_displayed() {
        let catalog = Catalog::builtin();
        let mut answers = AnswerState::new(&catalog);
        answers.set_single_answer(0, 0, Verdict::Yes).unwrap();
        answers.set_single_answer(0, 1, Verdict::No).unwrap();
        answers.toggle_multi_answer(3, 4).unwrap();
        answers.set_field_answer(4, 2, "Data steward").unwrap();

        let summary = summarize(&catalog, &answers);
        let step0: Vec<&str> = summary.steps[0]
            .entries
            .iter()
            .map(|e| e.answer.as_str())
            .collect();
        assert_eq!(step0, ["Yes", "No", NOT_ANSWERED, NOT_ANSWERED, NOT_ANSWERED]);
        assert_eq!(
            summary.steps[0].entries[0].description.as_deref(),
            Some("Was the data collected within the last 5 years?")
        );
        assert_eq!(summary.steps[3].entries[4].answer, SELECTED);
        assert_eq!(summary.steps[3].score.map(|s| (s.score, s.max)), Some((1, 6)));

        let planner = &summary.steps[4].entries;
        assert_eq!(planner.len(), 1);
        assert_eq!(planner[0].label, "Responsible Person(s)");
        assert_eq!(planner[0].answer, "Data steward");
        assert!(planner[0].description.is_none());
    }

    #[test]
    fn whitespace_planner_text_is_kept() {
        let catalog = Catalog::builtin();
        let mut answers = AnswerState::new(&catalog);
        answers.set_field_answer(4, 0, " ").unwrap();
        let summary = summarize(&catalog, &answers);
        assert_eq!(summary.steps[4].entries.len(), 1);
        assert_eq!(summary.steps[4].entries[0].answer, " ");
    }

    #[test]
    fn markdown_layout() {
        let catalog = Catalog::builtin();
        let mut answers = AnswerState::new(&catalog);
        answers.set_single_answer(0, 0, Verdict::Yes).unwrap();
        answers.set_field_answer(4, 5, "Funding").unwrap();
        let md = summarize(&catalog, &answers).to_markdown();
        assert!(md.contains("## Step 1: Reuse Eligibility (1 out of 5)"));
        assert!(md.contains(
            "- **Age of Data:** Yes (Was the data collected within the last 5 years?)"
        ));
        assert!(md.contains("## Step 5: Action Planner\n"));
        assert!(md.contains("- **Risks / Barriers:** Funding\n"));
        assert!(md.contains("- **Internal Learning:** —"));
    }

    #[test]
    fn multiline_planner_text_stays_in_its_item() {
        let catalog = Catalog::builtin();
        let mut answers = AnswerState::new(&catalog);
        answers
            .set_field_answer(4, 0, "line one\n## Injected")
            .unwrap();
        let md = summarize(&catalog, &answers).to_markdown();
        assert!(md.contains("- **Selected Reuse Option(s):** line one\n  ## Injected\n"));
        assert!(!md.lines().any(|l| l.starts_with("## Injected")));
        assert_eq!(md.lines().filter(|l| l.starts_with("## ")).count(), 5);
    }
}
