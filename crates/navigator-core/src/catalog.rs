use crate::error::{NavigatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecklistItem {
    pub label: String,
    pub desc: String,
}

impl ChecklistItem {
    pub fn new(label: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            desc: desc.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    pub label: String,
    /// Input hint for the presentation layer, e.g. "text".
    #[serde(rename = "type", default = "default_input_type")]
    pub input_type: String,
}

fn default_input_type() -> String {
    "text".to_string()
}

impl FieldDefinition {
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            input_type: default_input_type(),
        }
    }
}

// ---------------------------------------------------------------------------
// StepKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    /// Each item answered yes or no; yes answers count toward readiness.
    Checklist { items: Vec<ChecklistItem> },
    /// Any subset of items may be selected.
    MultiSelect { items: Vec<ChecklistItem> },
    /// Optional free-text fields, never graded.
    Planner { fields: Vec<FieldDefinition> },
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Checklist { .. } => "checklist",
            StepKind::MultiSelect { .. } => "multi_select",
            StepKind::Planner { .. } => "planner",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StepDefinition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepDefinition {
    pub name: String,
    pub kind: StepKind,
}

impl StepDefinition {
    pub fn checklist(name: impl Into<String>, items: Vec<ChecklistItem>) -> Self {
        Self {
            name: name.into(),
            kind: StepKind::Checklist { items },
        }
    }

    pub fn multi_select(name: impl Into<String>, items: Vec<ChecklistItem>) -> Self {
        Self {
            name: name.into(),
            kind: StepKind::MultiSelect { items },
        }
    }

    pub fn planner(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            kind: StepKind::Planner { fields },
        }
    }

    /// Number of checklist items or planner fields.
    pub fn len(&self) -> usize {
        match &self.kind {
            StepKind::Checklist { items } | StepKind::MultiSelect { items } => items.len(),
            StepKind::Planner { fields } => fields.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn items(&self) -> &[ChecklistItem] {
        match &self.kind {
            StepKind::Checklist { items } | StepKind::MultiSelect { items } => items,
            StepKind::Planner { .. } => &[],
        }
    }

    pub fn is_planner(&self) -> bool {
        matches!(self.kind, StepKind::Planner { .. })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Ordered, immutable list of wizard steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub steps: Vec<StepDefinition>,
}

impl Catalog {
    /// Build a catalog, rejecting an empty or malformed step list.
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self> {
        let catalog = Self { steps };
        catalog.check()?;
        Ok(catalog)
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        let catalog: Catalog = serde_yaml::from_str(data)?;
        catalog.check()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_yaml(&data)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Result<&StepDefinition> {
        self.steps
            .get(index)
            .ok_or(NavigatorError::StepOutOfRange {
                index,
                count: self.steps.len(),
            })
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Every problem found in the step list, in step order.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.steps.is_empty() {
            problems.push("catalog has no steps".to_string());
        }
        for (i, step) in self.steps.iter().enumerate() {
            let n = i + 1;
            if step.name.trim().is_empty() {
                problems.push(format!("step {n} has an empty name"));
            }
            if step.is_empty() {
                problems.push(format!("step {n} ('{}') has no items", step.name));
            }
            let labels: Vec<&str> = match &step.kind {
                StepKind::Checklist { items } | StepKind::MultiSelect { items } => {
                    items.iter().map(|it| it.label.as_str()).collect()
                }
                StepKind::Planner { fields } => fields.iter().map(|f| f.label.as_str()).collect(),
            };
            for (j, label) in labels.iter().enumerate() {
                if label.trim().is_empty() {
                    problems.push(format!("step {n} item {} has an empty label", j + 1));
                }
            }
        }
        problems
    }

    fn check(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(NavigatorError::EmptyCatalog);
        }
        let problems = self.problems();
        if !problems.is_empty() {
            return Err(NavigatorError::InvalidCatalog(problems.join("; ")));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Built-in assessment
    // ---------------------------------------------------------------------------

    /// The five-step data reuse assessment.
    pub fn builtin() -> Self {
        Self {
            steps: vec![
                StepDefinition::checklist(
                    "Reuse Eligibility",
                    vec![
                        ChecklistItem::new(
                            "Age of Data",
                            "Was the data collected within the last 5 years?",
                        ),
                        ChecklistItem::new(
                            "Consent Scope",
                            "The original consent included permission for future analysis or sharing?",
                        ),
                        ChecklistItem::new(
                            "Data Ownership & Access",
                            "Do you have legal access and permission to use the data?",
                        ),
                        ChecklistItem::new(
                            "Data Integrity",
                            "Is the dataset complete and well-documented?",
                        ),
                        ChecklistItem::new(
                            "Ethical Fitness",
                            "Does the dataset avoid major ethical concerns?",
                        ),
                    ],
                ),
                StepDefinition::checklist(
                    "Strategic Fit",
                    vec![
                        ChecklistItem::new(
                            "Relevant Topic",
                            "Does the dataset relate to a current or emerging research area?",
                        ),
                        ChecklistItem::new(
                            "Research Value",
                            "Can this data help answer a new or complementary research question?",
                        ),
                        ChecklistItem::new(
                            "Richness",
                            "Is the dataset rich enough (sample size, variable diversity) for meaningful analysis?",
                        ),
                        ChecklistItem::new(
                            "Knowledge Gap",
                            "Could the data contribute to filling a knowledge gap or inform policy/practice?",
                        ),
                        ChecklistItem::new(
                            "Stakeholder Benefit",
                            "Would other stakeholders benefit from findings from this data?",
                        ),
                    ],
                ),
                StepDefinition::checklist(
                    "Readiness",
                    vec![
                        ChecklistItem::new(
                            "Documentation",
                            "Is there a complete codebook or variable guide?",
                        ),
                        ChecklistItem::new(
                            "De-identification",
                            "Are all identifiers removed? No re-identification risk?",
                        ),
                        ChecklistItem::new(
                            "Data Quality",
                            "Has the dataset been checked for missing values, outliers, or errors?",
                        ),
                        ChecklistItem::new(
                            "Ethics Approval",
                            "Is secondary use approved in the original or new ethics application?",
                        ),
                        ChecklistItem::new(
                            "FAIR/CARE",
                            "Does the dataset align with FAIR & CARE principles?",
                        ),
                    ],
                ),
                StepDefinition::multi_select(
                    "Reuse Pathway",
                    vec![
                        ChecklistItem::new(
                            "Secondary Analysis",
                            "Reanalyze data for new questions or extensions",
                        ),
                        ChecklistItem::new(
                            "Data Publication / Open Data",
                            "Publish in a repository or as open data",
                        ),
                        ChecklistItem::new(
                            "Knowledge Translation",
                            "Policy briefs, infographics, blogs, etc.",
                        ),
                        ChecklistItem::new(
                            "Teaching/Training",
                            "Use as a teaching or workshop dataset",
                        ),
                        ChecklistItem::new(
                            "Meta-analysis Contribution",
                            "Pooled analysis or systematic review",
                        ),
                        ChecklistItem::new("Internal Learning", "Team evaluation, QI, or planning"),
                    ],
                ),
                StepDefinition::planner(
                    "Action Planner",
                    vec![
                        FieldDefinition::text("Selected Reuse Option(s)"),
                        FieldDefinition::text("Specific Output(s) (e.g., policy brief, slide deck)"),
                        FieldDefinition::text("Responsible Person(s)"),
                        FieldDefinition::text(
                            "Required Resources (e.g., repository, ethics clearance)",
                        ),
                        FieldDefinition::text("Timeline (draft, review, publish)"),
                        FieldDefinition::text("Risks / Barriers"),
                        FieldDefinition::text(
                            "Success Indicators (product, citation, uptake, etc.)",
                        ),
                        FieldDefinition::text("Tracking Method (spreadsheet, meeting notes, etc.)"),
                    ],
                ),
            ],
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builtin_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);
        let kinds: Vec<&str> = catalog.steps.iter().map(|s| s.kind.as_str()).collect();
        assert_eq!(
            kinds,
            ["checklist", "checklist", "checklist", "multi_select", "planner"]
        );
        let lens: Vec<usize> = catalog.steps.iter().map(|s| s.len()).collect();
        assert_eq!(lens, [5, 5, 5, 6, 8]);
        assert!(catalog.problems().is_empty());
    }

    #[test]
    fn step_yaml_is_tagged() {
        let step = StepDefinition::multi_select(
            "Pathway",
            vec![ChecklistItem::new("Teaching", "Use in a workshop")],
        );
        let yaml = serde_yaml::to_string(&step).unwrap();
        assert!(yaml.contains("type: multi_select"));
        let parsed: StepDefinition = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, step);
    }

    #[test]
    fn field_type_defaults_to_text() {
        let yaml = "name: Plan\nkind:\n  type: planner\n  fields:\n    - label: Owner\n";
        let step: StepDefinition = serde_yaml::from_str(yaml).unwrap();
        match step.kind {
            StepKind::Planner { fields } => assert_eq!(fields[0].input_type, "text"),
            other => panic!("expected planner, got {other}"),
        }
    }

    #[test]
    fn rejects_unknown_fields() {
        let yaml = "name: Plan\nmulti: true\nkind:\n  type: planner\n  fields: []\n";
        assert!(serde_yaml::from_str::<StepDefinition>(yaml).is_err());
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(
            Catalog::new(vec![]),
            Err(NavigatorError::EmptyCatalog)
        ));
        assert!(matches!(
            Catalog::from_yaml("steps: []\n"),
            Err(NavigatorError::EmptyCatalog)
        ));
    }

    #[test]
    fn step_without_items_rejected() {
        let result = Catalog::new(vec![StepDefinition::checklist("Empty", vec![])]);
        match result {
            Err(NavigatorError::InvalidCatalog(msg)) => assert!(msg.contains("no items")),
            other => panic!("expected InvalidCatalog, got {other:?}"),
        }
    }

    #[test]
    fn blank_labels_reported() {
        let catalog = Catalog {
            steps: vec![StepDefinition::planner(" ", vec![FieldDefinition::text("")])],
        };
        let problems = catalog.problems();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("empty name"));
        assert!(problems[1].contains("empty label"));
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, Catalog::builtin().to_yaml().unwrap()).unwrap();
        let loaded = Catalog::load(&path).unwrap();
        assert_eq!(loaded, Catalog::builtin());
    }

    #[test]
    fn step_lookup_out_of_range() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.step(4).unwrap().name, "Action Planner");
        assert!(matches!(
            catalog.step(5),
            Err(NavigatorError::StepOutOfRange { index: 5, count: 5 })
        ));
    }
}
