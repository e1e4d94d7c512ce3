//! Plain-text rendering of the wizard for the terminal.

use navigator_core::answers::{StepAnswers, Verdict};
use navigator_core::catalog::{Catalog, StepKind};
use navigator_core::config::Config;
use navigator_core::export::SUMMARY_HEADING;
use navigator_core::navigation::{advance_blocker, Navigation};
use navigator_core::session::Session;
use std::fmt::Write as _;

pub const HELP: &str = "\
Commands:
  yes N / no N     answer checklist item N
  toggle N         select or clear pathway N
  set N TEXT       fill planner field N (empty TEXT clears it)
  next / prev      move between steps
  goto N           jump to step N
  edit             leave the summary and edit answers
  print            write the summary and open it
  help             show this list
  quit             leave the wizard";

pub fn render(catalog: &Catalog, config: &Config, session: &Session) -> String {
    let mut out = String::new();
    out.push_str(&tabs(catalog, session.navigation));
    out.push('\n');
    match session.navigation {
        Navigation::Active { step } => render_step(&mut out, catalog, session, step),
        Navigation::Summary => render_summary(&mut out, catalog, config, session),
    }
    out
}

fn tabs(catalog: &Catalog, nav: Navigation) -> String {
    let parts: Vec<String> = catalog
        .steps
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let label = format!("Step {}: {}", i + 1, s.name);
            if nav.current_step() == Some(i) {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect();
    let mut line = parts.join(" | ");
    if nav.is_summary() {
        line.push_str("  (locked)");
    }
    line.push('\n');
    line
}

fn render_step(out: &mut String, catalog: &Catalog, session: &Session, step: usize) {
    let Some(def) = catalog.steps.get(step) else {
        return;
    };
    let row = session.answers.row(step);
    let suffix = if def.is_planner() { "Planner" } else { "Checklist" };
    let _ = writeln!(out, "Step {}: {} {}\n", step + 1, def.name, suffix);

    match (&def.kind, row) {
        (StepKind::Checklist { items }, Some(StepAnswers::Checklist(values))) => {
            out.push_str("  Criteria / Notes / Actions\n");
            for (i, (item, value)) in items.iter().zip(values).enumerate() {
                let (yes, no) = match value {
                    Some(Verdict::Yes) => ("x", " "),
                    Some(Verdict::No) => (" ", "x"),
                    None => (" ", " "),
                };
                let _ = writeln!(out, "  {:>2}. ? {}   [{yes}] Yes  [{no}] No", i + 1, item.label);
                let _ = writeln!(out, "        {}", item.desc);
            }
        }
        (StepKind::MultiSelect { items }, Some(StepAnswers::MultiSelect(values))) => {
            out.push_str("  Criteria / Select All That Apply\n");
            for (i, (item, selected)) in items.iter().zip(values).enumerate() {
                let mark = if *selected { "x" } else { " " };
                let _ = writeln!(out, "  {:>2}. ? {}   [{mark}] Select", i + 1, item.label);
                let _ = writeln!(out, "        {}", item.desc);
            }
        }
        (StepKind::Planner { fields }, Some(StepAnswers::Planner(values))) => {
            out.push_str("  (Optional) Fill in what you want to track or leave blank.\n");
            for (i, (field, text)) in fields.iter().zip(values).enumerate() {
                let shown = if text.is_empty() { "(Optional)" } else { text.as_str() };
                let _ = writeln!(out, "  {:>2}. {}: {}", i + 1, field.label, shown);
            }
        }
        _ => out.push_str("  (no answers recorded)\n"),
    }

    if let Some(score) = session.current_score(catalog) {
        let full = if score.is_full() { " ●" } else { "" };
        let _ = writeln!(out, "\n{}: {}{full}", score.kind.label(), score);
    }

    let next_label = if step == catalog.last_index() {
        "Finish & Show Summary"
    } else {
        "Next"
    };
    let prev = if step == 0 { "" } else { "prev: Previous   " };
    let gate = match advance_blocker(row, def) {
        Some(reason) => format!("  ({reason})"),
        None => String::new(),
    };
    let _ = writeln!(out, "{prev}next: {next_label}{gate}");
}

fn render_summary(out: &mut String, catalog: &Catalog, config: &Config, session: &Session) {
    let _ = writeln!(out, "✅ {SUMMARY_HEADING}\n");
    out.push_str(&session.summary(catalog).to_markdown());
    let _ = writeln!(
        out,
        "print: Print / Save ({})   edit: Edit Answers",
        config.export.path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_core::session::Action;

    fn apply(catalog: &Catalog, session: Session, cmds: &[&str]) -> Session {
        cmds.iter().fold(session, |s, c| {
            s.apply(catalog, &c.parse::<Action>().unwrap()).unwrap()
        })
    }

    #[test]
    fn first_step_view() {
        let catalog = Catalog::builtin();
        let session = apply(&catalog, Session::new(&catalog), &["yes 1", "no 2"]);
        let view = render(&catalog, &Config::default(), &session);
        assert!(view.starts_with("[Step 1: Reuse Eligibility] | Step 2: Strategic Fit"));
        assert!(view.contains("Step 1: Reuse Eligibility Checklist"));
        assert!(view.contains(" 1. ? Age of Data   [x] Yes  [ ] No"));
        assert!(view.contains(" 2. ? Consent Scope   [ ] Yes  [x] No"));
        assert!(view.contains("Reuse Readiness Score: 1 out of 5\n"));
        assert!(view.contains("next: Next  (3 items unanswered)"));
        assert!(!view.contains("prev: Previous"));
    }

    #[test]
    fn pathway_view_marks_selection() {
        let catalog = Catalog::builtin();
        let session = apply(&catalog, Session::new(&catalog), &["goto 4", "toggle 2"]);
        let view = render(&catalog, &Config::default(), &session);
        assert!(view.contains("Select All That Apply"));
        assert!(view.contains(" 2. ? Data Publication / Open Data   [x] Select"));
        assert!(view.contains("prev: Previous   next: Next\n"));
    }

    #[test]
    fn planner_view_shows_progress_and_finish() {
        let catalog = Catalog::builtin();
        let session = apply(&catalog, Session::new(&catalog), &["goto 5", "set 3 Ana"]);
        let view = render(&catalog, &Config::default(), &session);
        assert!(view.contains("Step 5: Action Planner Planner"));
        assert!(view.contains(" 3. Responsible Person(s): Ana"));
        assert!(view.contains(" 1. Selected Reuse Option(s): (Optional)"));
        assert!(view.contains("Progress: 1 out of 8"));
        assert!(view.contains("next: Finish & Show Summary"));
    }

    #[test]
    fn summary_view_locks_tabs() {
        let catalog = Catalog::builtin();
        let session = apply(&catalog, Session::new(&catalog), &["goto 5", "next"]);
        let view = render(&catalog, &Config::default(), &session);
        assert!(view.lines().next().unwrap().ends_with("(locked)"));
        assert!(view.contains("✅ Summary: Your Data Reuse Assessment"));
        assert!(view.contains("- **Age of Data:** Not answered"));
        assert!(view.contains("print: Print / Save (reuse-summary.md)"));
    }
}
