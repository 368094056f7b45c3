pub mod aggregate;
pub mod jurisdiction;
pub mod stats;

use std::fmt::{Display, Formatter};
use std::ops::AddAssign;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Period, PeriodParseError};
use crate::scoring::Interpretation;
use crate::types::{Gender, School};

pub use aggregate::summarize_cohort;
pub use jurisdiction::{JurisdictionFilter, JurisdictionScope, ScopeParseError};
pub use stats::{population_stats, PopulationStats};

pub trait SchoolDirectory {
    fn display_name(&self, school_id: &str) -> Option<String>;
}

impl SchoolDirectory for [School] {
    fn display_name(&self, school_id: &str) -> Option<String> {
        self.iter()
            .find(|s| s.id == school_id)
            .map(|s| s.name.clone())
    }
}

impl SchoolDirectory for Vec<School> {
    fn display_name(&self, school_id: &str) -> Option<String> {
        self.as_slice().display_name(school_id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PeriodSelection {
    Single(Period),
    All,
}

impl PeriodSelection {
    pub fn periods(self) -> Vec<Period> {
        match self {
            Self::Single(period) => vec![period],
            Self::All => Period::ALL.to_vec(),
        }
    }
}

impl Default for PeriodSelection {
    fn default() -> Self {
        Self::Single(Period::First)
    }
}

impl Display for PeriodSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(period) => write!(f, "{}", period.as_slug()),
            Self::All => write!(f, "all"),
        }
    }
}

impl FromStr for PeriodSelection {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Period>().map(Self::Single)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenderCount {
    pub male: u32,
    pub female: u32,
}

impl GenderCount {
    pub fn total(&self) -> u32 {
        self.male + self.female
    }

    pub fn increment(&mut self, gender: Gender) {
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
        }
    }
}

impl AddAssign for GenderCount {
    fn add_assign(&mut self, rhs: Self) {
        self.male += rhs.male;
        self.female += rhs.female;
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BandCounts(pub [GenderCount; 5]);

impl BandCounts {
    pub fn get(&self, band: Interpretation) -> GenderCount {
        self.0[band.index()]
    }

    pub fn increment(&mut self, band: Interpretation, gender: Gender) {
        self.0[band.index()].increment(gender);
    }

    pub fn classified(&self) -> GenderCount {
        let mut total = GenderCount::default();
        for count in self.0 {
            total += count;
        }
        total
    }
}

impl AddAssign for BandCounts {
    fn add_assign(&mut self, rhs: Self) {
        for (mine, theirs) in self.0.iter_mut().zip(rhs.0) {
            *mine += theirs;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryCounts {
    pub enrolled: GenderCount,
    pub tested: GenderCount,
    pub bands: BandCounts,
}

impl AddAssign for SummaryCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.enrolled += rhs.enrolled;
        self.tested += rhs.tested;
        self.bands += rhs.bands;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryRow {
    pub school_id: String,
    pub school_name: String,
    pub period: Period,
    pub counts: SummaryCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CohortSummary {
    pub selection: PeriodSelection,
    pub rows: Vec<SummaryRow>,
    pub totals: SummaryCounts,
}

impl CohortSummary {
    pub fn band_distribution(&self) -> [(Interpretation, u32); 5] {
        Interpretation::ALL.map(|band| (band, self.totals.bands.get(band).total()))
    }
}
