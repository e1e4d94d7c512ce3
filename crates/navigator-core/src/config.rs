use crate::catalog::Catalog;
use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where `print` writes the summary, relative to the project root.
    #[serde(default = "default_export_path")]
    pub path: PathBuf,
    /// Hand the written file to the platform's default viewer.
    #[serde(default = "default_open")]
    pub open: bool,
}

fn default_export_path() -> PathBuf {
    PathBuf::from(paths::DEFAULT_EXPORT_FILE)
}

fn default_open() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: default_export_path(),
            open: default_open(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Custom step catalog; the built-in assessment is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_version() -> u32 {
    1
}

fn default_title() -> String {
    "Data Reuse Navigator".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            title: default_title(),
            subtitle: Some(
                "Help researchers evaluate existing datasets and take concrete steps to reuse or responsibly archive them."
                    .to_string(),
            ),
            catalog: None,
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Load `navigator.yaml` from `root`, falling back to defaults when the
    /// file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn load_catalog(&self, root: &Path) -> Result<Catalog> {
        match &self.catalog {
            Some(rel) => Catalog::load(&paths::resolve(root, rel)),
            None => Ok(Catalog::builtin()),
        }
    }

    pub fn export_path(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.export.path)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self, root: &Path) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.title.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "title is empty".to_string(),
            });
        }

        if self.export.path.as_os_str().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "export.path is empty".to_string(),
            });
        } else if self.export.path.is_absolute() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "export.path '{}' is absolute; summaries will be written outside the project",
                    self.export.path.display()
                ),
            });
        }

        if let Some(rel) = &self.catalog {
            let path = paths::resolve(root, rel);
            if !path.exists() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("catalog file '{}' not found", path.display()),
                });
                return warnings;
            }
            let data = match std::fs::read_to_string(&path) {
                Ok(d) => d,
                Err(e) => {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Error,
                        message: format!("cannot read catalog '{}': {e}", path.display()),
                    });
                    return warnings;
                }
            };
            match serde_yaml::from_str::<Catalog>(&data) {
                Ok(catalog) => {
                    for problem in catalog.problems() {
                        warnings.push(ConfigWarning {
                            level: WarnLevel::Error,
                            message: format!("catalog: {problem}"),
                        });
                    }
                }
                Err(e) => warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("catalog '{}' does not parse: {e}", path.display()),
                }),
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ChecklistItem, StepDefinition};
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.load_catalog(dir.path()).unwrap(), Catalog::builtin());
        assert_eq!(
            cfg.export_path(dir.path()),
            dir.path().join("reuse-summary.md")
        );
    }

    #[test]
    fn config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.export.open = false;
        cfg.catalog = Some(PathBuf::from("steps.yaml"));
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("navigator.yaml"), "title: Audit\n").unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.title, "Audit");
        assert_eq!(cfg.version, 1);
        assert!(cfg.export.open);
        assert_eq!(cfg.export.path, PathBuf::from("reuse-summary.md"));
    }

    #[test]
    fn custom_catalog_is_loaded() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::new(vec![StepDefinition::checklist(
            "Only",
            vec![ChecklistItem::new("A", "first")],
        )])
        .unwrap();
        std::fs::write(dir.path().join("steps.yaml"), catalog.to_yaml().unwrap()).unwrap();
        let cfg = Config {
            catalog: Some(PathBuf::from("steps.yaml")),
            ..Config::default()
        };
        assert_eq!(cfg.load_catalog(dir.path()).unwrap(), catalog);
        assert!(cfg.validate(dir.path()).is_empty());
    }

    #[test]
    fn validate_default_is_clean() {
        let dir = TempDir::new().unwrap();
        assert!(Config::default().validate(dir.path()).is_empty());
    }

    #[test]
    fn validate_reports_missing_catalog() {
        let dir = TempDir::new().unwrap();
        let cfg = Config {
            catalog: Some(PathBuf::from("nope.yaml")),
            ..Config::default()
        };
        let warnings = cfg.validate(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
        assert!(warnings[0].message.contains("not found"));
    }

    #[test]
    fn validate_reports_catalog_problems() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("steps.yaml"),
            "steps:\n  - name: Empty\n    kind:\n      type: checklist\n      items: []\n",
        )
        .unwrap();
        let cfg = Config {
            catalog: Some(PathBuf::from("steps.yaml")),
            title: String::new(),
            ..Config::default()
        };
        let warnings = cfg.validate(dir.path());
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
        assert_eq!(warnings[1].level, WarnLevel::Error);
        assert!(warnings[1].message.contains("no items"));
    }
}
