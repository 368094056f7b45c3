pub mod builtin;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{DomainId, DomainMap};

pub type DomainRows = DomainMap<Vec<Option<u8>>>;

pub const MIN_SCALED_SCORE: u8 = 1;
pub const MAX_SCALED_SCORE: u8 = 19;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBand {
    #[serde(rename = "3.1-4.0")]
    Young,
    #[serde(rename = "4.1-5.0")]
    Mid,
    #[serde(rename = "5.1-above")]
    Old,
}

impl AgeBand {
    pub const ALL: [AgeBand; 3] = [AgeBand::Young, AgeBand::Mid, AgeBand::Old];

    pub fn label(self) -> &'static str {
        match self {
            Self::Young => "3.1-4.0",
            Self::Mid => "4.1-5.0",
            Self::Old => "5.1-above",
        }
    }
}

impl Display for AgeBand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScaledScoreTable {
    #[serde(rename = "3.1-4.0")]
    pub young: DomainRows,
    #[serde(rename = "4.1-5.0")]
    pub mid: DomainRows,
    #[serde(rename = "5.1-above")]
    pub old: DomainRows,
}

impl ScaledScoreTable {
    pub fn rows(&self, band: AgeBand) -> &DomainRows {
        match band {
            AgeBand::Young => &self.young,
            AgeBand::Mid => &self.mid,
            AgeBand::Old => &self.old,
        }
    }

    pub fn lookup(&self, band: AgeBand, domain: DomainId, raw: u8) -> Option<u8> {
        self.rows(band)
            .get(domain)
            .get(usize::from(raw))
            .copied()
            .flatten()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StandardScoreTable {
    pub entries: BTreeMap<u16, u16>,
}

impl StandardScoreTable {
    pub fn get(&self, sum: u16) -> Option<u16> {
        self.entries.get(&sum).copied()
    }

    pub fn floor(&self) -> Option<(u16, u16)> {
        self.entries.first_key_value().map(|(k, v)| (*k, *v))
    }

    pub fn ceiling(&self) -> Option<(u16, u16)> {
        self.entries.last_key_value().map(|(k, v)| (*k, *v))
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed reading lookup tables from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed parsing lookup tables: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{band} {domain} row has {len} entries but the domain allows raw scores 0..={max}")]
    RowTooLong {
        band: AgeBand,
        domain: DomainId,
        len: usize,
        max: u8,
    },
    #[error("{band} {domain} raw {raw} maps to scaled score {scaled}, outside 1..=19")]
    ScaledOutOfRange {
        band: AgeBand,
        domain: DomainId,
        raw: usize,
        scaled: u8,
    },
    #[error("standard score table is empty")]
    EmptyStandardTable,
}

pub const PLACEHOLDER_TABLES_WARNING: &str =
    "no lookup tables configured; scoring with bundled placeholder tables, not the published norms (set [tables] path or --tables)";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoringTables {
    pub scaled: ScaledScoreTable,
    pub standard: StandardScoreTable,
}

impl ScoringTables {
    pub fn builtin() -> Self {
        Self {
            scaled: builtin::scaled_scores(),
            standard: builtin::standard_scores(),
        }
    }

    pub fn from_json(data: &str) -> Result<Self, TableError> {
        let tables: Self = serde_json::from_str(data)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let data = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tables = Self::from_json(&data)?;
        debug!(
            "loaded lookup tables from {} ({} standard entries)",
            path.display(),
            tables.standard.entries.len()
        );
        Ok(tables)
    }

    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, TableError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                warn!("{PLACEHOLDER_TABLES_WARNING}");
                Ok(Self::builtin())
            }
        }
    }

    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        for band in AgeBand::ALL {
            for (domain, row) in self.scaled.rows(band).iter() {
                let max = domain.max_score();
                if row.len() > usize::from(max) + 1 {
                    return Err(TableError::RowTooLong {
                        band,
                        domain,
                        len: row.len(),
                        max,
                    });
                }
                for (raw, scaled) in row.iter().enumerate() {
                    if let Some(scaled) = *scaled {
                        if !(MIN_SCALED_SCORE..=MAX_SCALED_SCORE).contains(&scaled) {
                            return Err(TableError::ScaledOutOfRange {
                                band,
                                domain,
                                raw,
                                scaled,
                            });
                        }
                    }
                }
            }
        }
        if self.standard.entries.is_empty() {
            return Err(TableError::EmptyStandardTable);
        }
        Ok(())
    }
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self::builtin()
    }
}
