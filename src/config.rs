use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cohort::PeriodSelection;
use crate::scoring::SumRangePolicy;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tables: TablesConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TablesConfig {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub out_of_range: SumRangePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_period")]
    pub default_period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub tables_path: Option<String>,
    pub out_of_range: Option<SumRangePolicy>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/eccd-scoring/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(tables_path) = overrides.tables_path {
            self.tables.path = Some(tables_path);
        }
        if let Some(policy) = overrides.out_of_range {
            self.scoring.out_of_range = policy;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn resolved_tables_path(&self) -> Option<PathBuf> {
        self.tables
            .path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(expand_tilde)
    }

    pub fn default_selection(&self) -> Result<PeriodSelection> {
        self.report
            .default_period
            .parse::<PeriodSelection>()
            .with_context(|| {
                format!(
                    "invalid report.default_period in config: {}",
                    self.report.default_period
                )
            })
    }

    pub fn default_template() -> String {
        let template = r#"[tables]
# path = "~/.config/eccd-scoring/tables.json"

[scoring]
# "clamp" pins sums outside the standard table to its end entries;
# "unavailable" reports no standard score for them.
out_of_range = "clamp"

[report]
# first, mid, third or all
default_period = "first"

[logging]
filter = "warn"
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_period() -> String {
    "first".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}
