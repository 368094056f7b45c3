use tracing::warn;

use crate::domain::{DomainId, DomainMap, Period};
use crate::types::{Assessment, Checklist, TaskMarks};

pub fn count_passed(marks: impl IntoIterator<Item = bool>, max: u8) -> u8 {
    let passed = marks.into_iter().filter(|passed| *passed).count();
    u8::try_from(passed).unwrap_or(u8::MAX).min(max)
}

pub fn domain_raw_score(checklist: &Checklist, domain: DomainId, period: Period) -> u8 {
    let column = period.index();
    count_passed(
        checklist
            .get(domain)
            .iter()
            .map(|marks: &TaskMarks| marks[column]),
        domain.max_score(),
    )
}

pub fn checklist_raw_scores(checklist: &Checklist, period: Period) -> DomainMap<u8> {
    DomainMap::from_fn(|domain| domain_raw_score(checklist, domain, period))
}

/// Checklist detail wins over tallies; both are capped at the domain max.
pub fn assessment_raw_scores(assessment: &Assessment) -> DomainMap<u8> {
    let period = assessment.period;
    match (&assessment.checklist, &assessment.scores) {
        (Some(record), _) => checklist_raw_scores(&record.to_grid(period), period),
        (None, Some(scores)) => scores.map(|domain, score| {
            let max = domain.max_score();
            if *score > max {
                warn!(
                    "assessment {} tallies {} {} of max {}; capping",
                    assessment.id, score, domain, max
                );
            }
            (*score).min(max)
        }),
        (None, None) => DomainMap::default(),
    }
}
