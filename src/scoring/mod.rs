pub mod engine;
pub mod interpretation;
pub mod progress;
pub mod raw;
pub mod scaled;
pub mod standard;

pub use engine::ScoringEngine;
pub use interpretation::{Interpretation, NOT_COMPUTED, NO_DATA};
pub use progress::{LearnerProgress, PeriodProgress};
pub use standard::{SumPlacement, SumRangePolicy};

use serde::{Deserialize, Serialize};

use crate::age::Age;
use crate::domain::{DomainId, Period};
use crate::tables::AgeBand;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainResult {
    pub domain: DomainId,
    pub label: String,
    pub raw_score: u8,
    pub max_score: u8,
    pub scaled_score: Option<u8>,
    pub interpretation: Option<Interpretation>,
}

impl DomainResult {
    pub fn interpretation_label(&self) -> &'static str {
        interpretation::domain_label_or_dash(self.interpretation)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentResult {
    pub learner_id: String,
    pub assessment_id: String,
    pub period: Period,
    pub evaluated_on: Option<String>,
    pub age: Option<Age>,
    pub age_band: Option<AgeBand>,
    pub domains: Vec<DomainResult>,
    pub scaled_sum: Option<u16>,
    pub sum_placement: Option<SumPlacement>,
    pub standard_score: Option<u16>,
    pub interpretation: Option<Interpretation>,
    pub remarks: String,
}

impl AssessmentResult {
    pub fn interpretation_label(&self) -> &'static str {
        interpretation::overall_label_or_no_data(self.interpretation)
    }

    pub fn age_label(&self) -> String {
        self.age
            .map(|age| age.to_string())
            .unwrap_or_else(|| NOT_COMPUTED.to_string())
    }

    pub fn domain(&self, id: DomainId) -> Option<&DomainResult> {
        self.domains.iter().find(|d| d.domain == id)
    }

    pub fn raw_total(&self) -> u32 {
        self.domains.iter().map(|d| u32::from(d.raw_score)).sum()
    }

    pub fn was_clamped(&self) -> bool {
        self.standard_score.is_some()
            && matches!(
                self.sum_placement,
                Some(SumPlacement::BelowTable | SumPlacement::AboveTable)
            )
    }
}
