mod cmd;
mod output;
mod root;
mod view;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "navigator",
    about = "Guided readiness assessment for reusing an existing dataset",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: nearest directory holding navigator.yaml)
    #[arg(long, global = true, env = "NAVIGATOR_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default navigator.yaml
    Init,

    /// List the assessment steps
    Catalog,

    /// Validate navigator.yaml and the step catalog
    Validate,

    /// Walk through the assessment
    Run {
        /// YAML list of commands to apply instead of reading stdin
        #[arg(long)]
        script: Option<PathBuf>,

        /// Write the summary on print without opening it
        #[arg(long)]
        no_open: bool,
    },

    /// Print the summary for a scripted set of answers
    Summary {
        /// YAML list of commands to apply before summarizing
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Catalog => cmd::catalog::run(&root, cli.json),
        Commands::Validate => cmd::validate::run(&root, cli.json),
        Commands::Run { script, no_open } => {
            cmd::run::run(&root, script.as_deref(), no_open, cli.json)
        }
        Commands::Summary { script } => cmd::summary::run(&root, script.as_deref(), cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
