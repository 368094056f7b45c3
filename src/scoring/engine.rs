use tracing::debug;

use crate::age::{age_at, Age};
use crate::domain::{DomainId, DomainMap};
use crate::scoring::interpretation::Interpretation;
use crate::scoring::raw::assessment_raw_scores;
use crate::scoring::scaled::{resolve_scaled, select_band};
use crate::scoring::standard::{place_sum, resolve_standard, sum_scaled, SumRangePolicy};
use crate::scoring::{AssessmentResult, DomainResult};
use crate::tables::ScoringTables;
use crate::types::{Assessment, Learner};

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    tables: ScoringTables,
    policy: SumRangePolicy,
}

impl ScoringEngine {
    pub fn new(tables: ScoringTables, policy: SumRangePolicy) -> Self {
        Self { tables, policy }
    }

    pub fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    pub fn policy(&self) -> SumRangePolicy {
        self.policy
    }

    pub fn scaled_score(&self, domain: DomainId, raw: u8, age: Option<Age>) -> Option<u8> {
        resolve_scaled(&self.tables.scaled, domain, raw, age)
    }

    pub fn domain_result(&self, domain: DomainId, raw: u8, age: Option<Age>) -> DomainResult {
        let scaled_score = self.scaled_score(domain, raw, age);
        DomainResult {
            domain,
            label: domain.label().to_string(),
            raw_score: raw,
            max_score: domain.max_score(),
            scaled_score,
            interpretation: scaled_score.map(Interpretation::from_scaled),
        }
    }

    pub fn standard_score(&self, raw: &DomainMap<u8>, age: Option<Age>) -> Option<u16> {
        let scaled = raw.map(|domain, score| self.scaled_score(domain, *score, age));
        let sum = sum_scaled(&scaled)?;
        resolve_standard(&self.tables.standard, sum, self.policy)
    }

    pub fn evaluate(&self, learner: &Learner, assessment: &Assessment) -> AssessmentResult {
        let age = age_at(learner.birthday.as_deref(), assessment.date.as_deref());
        let raw = assessment_raw_scores(assessment);
        let domains: Vec<DomainResult> = raw
            .iter()
            .map(|(domain, score)| self.domain_result(domain, *score, age))
            .collect();

        let scaled = DomainMap::from_fn(|domain| domains[domain.index()].scaled_score);
        let scaled_sum = sum_scaled(&scaled);
        let sum_placement = scaled_sum.map(|sum| place_sum(&self.tables.standard, sum));
        let standard_score =
            scaled_sum.and_then(|sum| resolve_standard(&self.tables.standard, sum, self.policy));

        debug!(
            "scored assessment {} for learner {} ({}): age={:?} sum={:?} standard={:?}",
            assessment.id, learner.id, assessment.period, age, scaled_sum, standard_score
        );

        AssessmentResult {
            learner_id: learner.id.clone(),
            assessment_id: assessment.id.clone(),
            period: assessment.period,
            evaluated_on: assessment.date.clone(),
            age,
            age_band: age.and_then(select_band),
            domains,
            scaled_sum,
            sum_placement,
            standard_score,
            interpretation: standard_score.map(Interpretation::from_standard),
            remarks: assessment.remarks.clone(),
        }
    }

    pub fn classify(&self, learner: &Learner, assessment: &Assessment) -> Option<Interpretation> {
        let age = age_at(learner.birthday.as_deref(), assessment.date.as_deref());
        let raw = assessment_raw_scores(assessment);
        self.standard_score(&raw, age)
            .map(Interpretation::from_standard)
    }
}
