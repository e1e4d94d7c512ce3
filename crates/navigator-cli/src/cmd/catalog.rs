use crate::output::{print_json, print_table};
use anyhow::Context;
use navigator_core::config::Config;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let catalog = config
        .load_catalog(root)
        .context("failed to load step catalog")?;

    if json {
        return print_json(&catalog);
    }

    println!("{}", config.title);
    if let Some(subtitle) = &config.subtitle {
        println!("{subtitle}");
    }
    println!();

    let rows: Vec<Vec<String>> = catalog
        .steps
        .iter()
        .enumerate()
        .map(|(i, s)| {
            vec![
                (i + 1).to_string(),
                s.name.clone(),
                s.kind.to_string(),
                s.len().to_string(),
            ]
        })
        .collect();
    print_table(&["STEP", "NAME", "KIND", "ITEMS"], rows);
    Ok(())
}
