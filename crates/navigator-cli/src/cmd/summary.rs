use super::run::{load_script, replay};
use crate::output::print_json;
use anyhow::Context;
use navigator_core::config::Config;
use navigator_core::export::SUMMARY_HEADING;
use std::path::Path;

/// Print the summary projection for the answers a script produces, without
/// requiring the script to reach the summary page.
pub fn run(root: &Path, script: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let catalog = config
        .load_catalog(root)
        .context("failed to load step catalog")?;
    let commands = match script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };
    let session = replay(&catalog, &commands, |_| {}).context("script failed")?;
    let summary = session.summary(&catalog);

    if json {
        return print_json(&summary);
    }
    println!("{SUMMARY_HEADING}\n");
    print!("{}", summary.to_markdown());
    Ok(())
}
