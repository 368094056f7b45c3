use serde::Serialize;
use tracing::warn;

use crate::domain::{DomainId, Period};
use crate::scoring::{AssessmentResult, ScoringEngine};
use crate::types::{Assessment, Learner};

#[derive(Debug, Clone, Serialize)]
pub struct PeriodProgress {
    pub period: Period,
    pub age: Option<String>,
    pub result: Option<AssessmentResult>,
}

impl PeriodProgress {
    pub fn is_assessed(&self) -> bool {
        self.result.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LearnerProgress {
    pub learner_id: String,
    pub name: String,
    pub periods: Vec<PeriodProgress>,
}

impl LearnerProgress {
    pub fn build<'a>(
        engine: &ScoringEngine,
        learner: &Learner,
        assessments: impl IntoIterator<Item = &'a Assessment>,
    ) -> Self {
        let own: Vec<&Assessment> = assessments
            .into_iter()
            .filter(|a| a.learner_id == learner.id)
            .collect();

        let periods = Period::ALL
            .iter()
            .map(|&period| {
                let mut matching = own.iter().filter(|a| a.period == period);
                let first = matching.next();
                let extra = matching.count();
                if extra > 0 {
                    warn!(
                        "learner {} has {} extra {} assessment(s); using the first",
                        learner.id, extra, period
                    );
                }
                let result = first.map(|assessment| engine.evaluate(learner, assessment));
                PeriodProgress {
                    period,
                    age: result
                        .as_ref()
                        .and_then(|r| r.age)
                        .map(|age| age.to_string()),
                    result,
                }
            })
            .collect();

        Self {
            learner_id: learner.id.clone(),
            name: learner.name.clone(),
            periods,
        }
    }

    pub fn period(&self, period: Period) -> &PeriodProgress {
        &self.periods[period.index()]
    }

    pub fn assessed_periods(&self) -> impl Iterator<Item = &PeriodProgress> {
        self.periods.iter().filter(|p| p.is_assessed())
    }

    pub fn raw_trend(&self, domain: DomainId) -> [Option<u8>; 3] {
        let mut trend = [None; 3];
        for progress in &self.periods {
            trend[progress.period.index()] = progress
                .result
                .as_ref()
                .and_then(|r| r.domain(domain))
                .map(|d| d.raw_score);
        }
        trend
    }
}
