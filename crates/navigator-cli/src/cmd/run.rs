use crate::output::print_json;
use crate::view;
use anyhow::Context;
use navigator_core::catalog::Catalog;
use navigator_core::config::Config;
use navigator_core::export;
use navigator_core::score::Score;
use navigator_core::session::{Action, Session};
use navigator_core::summary::Summary;
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

pub fn run(root: &Path, script: Option<&Path>, no_open: bool, json: bool) -> anyhow::Result<()> {
    let mut config = Config::load(root).context("failed to load config")?;
    if no_open {
        config.export.open = false;
    }
    let catalog = config
        .load_catalog(root)
        .context("failed to load step catalog")?;

    let session = match script {
        Some(path) => {
            let commands = load_script(path)?;
            let session = replay(&catalog, &commands, |s| {
                report_print(root, &config, &s.summary(&catalog), json)
            })
            .with_context(|| format!("script {} failed", path.display()))?;
            if !json {
                print!("{}", view::render(&catalog, &config, &session));
            }
            session
        }
        None => interactive(root, &config, &catalog, json)?,
    };

    if json {
        print_json(&Snapshot::new(&catalog, &session))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scripts
// ---------------------------------------------------------------------------

/// A script is a YAML list of typed commands, e.g. `- yes 1`.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<String>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let commands: Vec<String> = serde_yaml::from_str(&data)
        .with_context(|| format!("script {} is not a list of commands", path.display()))?;
    Ok(commands)
}

/// Apply every command in order, stopping at the first failure. `on_print`
/// runs after each successful `print`.
pub fn replay(
    catalog: &Catalog,
    commands: &[String],
    mut on_print: impl FnMut(&Session),
) -> anyhow::Result<Session> {
    let mut session = Session::new(catalog);
    for (i, line) in commands.iter().enumerate() {
        let action: Action = line
            .parse()
            .with_context(|| format!("entry {} ('{line}')", i + 1))?;
        session = session
            .apply(catalog, &action)
            .with_context(|| format!("entry {} ('{line}')", i + 1))?;
        if action == Action::Print {
            on_print(&session);
        }
    }
    Ok(session)
}

// ---------------------------------------------------------------------------
// Interactive loop
// ---------------------------------------------------------------------------

fn interactive(
    root: &Path,
    config: &Config,
    catalog: &Catalog,
    json: bool,
) -> anyhow::Result<Session> {
    let stdin = std::io::stdin();
    let prompt = stdin.is_terminal();
    let mut session = Session::new(catalog);

    if !json {
        println!("{}", config.title);
        if let Some(subtitle) = &config.subtitle {
            println!("{subtitle}");
        }
        println!("Type 'help' for commands.\n");
        print!("{}", view::render(catalog, config, &session));
    }

    let mut lines = stdin.lock().lines();
    loop {
        if prompt {
            print!("> ");
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;
        let trimmed = line.trim();
        match trimmed {
            "" => continue,
            "quit" | "q" | "exit" => break,
            "help" | "?" => {
                println!("{}", view::HELP);
                continue;
            }
            _ => {}
        }

        let action = match line.parse::<Action>() {
            Ok(a) => a,
            Err(e) => {
                println!("error: {e}");
                continue;
            }
        };
        match session.apply(catalog, &action) {
            Ok(next) => session = next,
            Err(e) => {
                println!("error: {e}");
                continue;
            }
        }
        if action == Action::Print {
            report_print(root, config, &session.summary(catalog), json);
        }
        if !json {
            println!();
            print!("{}", view::render(catalog, config, &session));
        }
    }
    Ok(session)
}

fn report_print(root: &Path, config: &Config, summary: &Summary, json: bool) {
    let written = export::print_summary(root, config, summary);
    if json {
        return;
    }
    match written {
        Some(path) => println!("Summary written to {}", path.display()),
        None => println!("Summary could not be written; see log output"),
    }
}

// ---------------------------------------------------------------------------
// JSON snapshot
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct Snapshot<'a> {
    session: &'a Session,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<Score>,
    can_advance: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

impl<'a> Snapshot<'a> {
    fn new(catalog: &Catalog, session: &'a Session) -> Self {
        Self {
            session,
            score: session.current_score(catalog),
            can_advance: session.can_advance(catalog),
            summary: session
                .navigation
                .is_summary()
                .then(|| session.summary(catalog)),
        }
    }
}
