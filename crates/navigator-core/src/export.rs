use crate::config::Config;
use crate::summary::Summary;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub const SUMMARY_HEADING: &str = "Summary: Your Data Reuse Assessment";

/// Full printable document: heading, per-step sections and footer.
pub fn render_document(config: &Config, summary: &Summary, generated_at: DateTime<Utc>) -> String {
    let mut out = format!("# {}\n\n", config.title);
    if let Some(subtitle) = &config.subtitle {
        out.push_str(subtitle);
        out.push_str("\n\n");
    }
    out.push_str(&format!("## {SUMMARY_HEADING}\n\n"));
    out.push_str(&summary.to_markdown());
    out.push_str(&format!(
        "---\n\n© {} {} | generated {}\n",
        generated_at.format("%Y"),
        config.title,
        generated_at.format("%Y-%m-%d %H:%M UTC"),
    ));
    out
}

/// Write the summary to the configured export path and, if enabled, hand it
/// to the platform's default viewer.
///
/// Best effort: failures are logged and reported as `None`, never raised.
pub fn print_summary(root: &Path, config: &Config, summary: &Summary) -> Option<PathBuf> {
    let path = config.export_path(root);
    let doc = render_document(config, summary, Utc::now());
    if let Err(e) = crate::io::atomic_write(&path, doc.as_bytes()) {
        tracing::warn!(path = %path.display(), error = %e, "failed to write summary");
        return None;
    }
    tracing::info!(path = %path.display(), "summary written");

    if config.export.open {
        if let Err(e) = open::that_detached(&path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to open summary");
        }
    }
    Some(path)
}
