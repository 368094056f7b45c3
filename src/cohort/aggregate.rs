use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::cohort::{CohortSummary, PeriodSelection, SchoolDirectory, SummaryCounts, SummaryRow};
use crate::domain::Period;
use crate::scoring::ScoringEngine;
use crate::types::{Assessment, Learner, Population};

fn index_assessments(population: &Population) -> HashMap<(&str, Period), &Assessment> {
    let known: HashSet<&str> = population.learners.iter().map(|l| l.id.as_str()).collect();
    let mut index = HashMap::new();
    for assessment in &population.assessments {
        if !known.contains(assessment.learner_id.as_str()) {
            warn!(
                "assessment {} references unknown learner {}",
                assessment.id, assessment.learner_id
            );
            continue;
        }
        let key = (assessment.learner_id.as_str(), assessment.period);
        if index.contains_key(&key) {
            warn!(
                "ignoring duplicate {} assessment {} for learner {}",
                assessment.period, assessment.id, assessment.learner_id
            );
            continue;
        }
        index.insert(key, assessment);
    }
    index
}

fn summarize_school(
    engine: &ScoringEngine,
    learners: &[&Learner],
    period: Period,
    assessments: &HashMap<(&str, Period), &Assessment>,
) -> SummaryCounts {
    let mut counts = SummaryCounts::default();
    for learner in learners {
        counts.enrolled.increment(learner.gender);
        let Some(assessment) = assessments.get(&(learner.id.as_str(), period)) else {
            continue;
        };
        counts.tested.increment(learner.gender);
        if let Some(band) = engine.classify(learner, assessment) {
            counts.bands.increment(band, learner.gender);
        }
    }
    counts
}

pub fn summarize_cohort<D>(
    engine: &ScoringEngine,
    population: &Population,
    directory: &D,
    selection: PeriodSelection,
) -> CohortSummary
where
    D: SchoolDirectory + ?Sized,
{
    let assessments = index_assessments(population);

    let mut by_school: BTreeMap<&str, Vec<&Learner>> = BTreeMap::new();
    for learner in &population.learners {
        by_school
            .entry(learner.school_id.as_str())
            .or_default()
            .push(learner);
    }

    let periods = selection.periods();
    let mut rows = Vec::with_capacity(by_school.len() * periods.len());
    for (school_id, learners) in &by_school {
        let school_name = directory.display_name(school_id).unwrap_or_else(|| {
            debug!("no directory entry for school {school_id}; using id as name");
            school_id.to_string()
        });
        for &period in &periods {
            rows.push(SummaryRow {
                school_id: school_id.to_string(),
                school_name: school_name.clone(),
                period,
                counts: summarize_school(engine, learners, period, &assessments),
            });
        }
    }

    rows.sort_by(|a, b| {
        a.school_name
            .to_lowercase()
            .cmp(&b.school_name.to_lowercase())
            .then_with(|| a.school_id.cmp(&b.school_id))
            .then_with(|| a.period.cmp(&b.period))
    });

    let mut totals = SummaryCounts::default();
    for row in &rows {
        totals += row.counts;
    }

    CohortSummary {
        selection,
        rows,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::GenderCount;
    use crate::domain::DomainMap;
    use crate::scoring::Interpretation;
    use crate::types::{Gender, School};

    fn school(id: &str, name: &str) -> School {
        School {
            id: id.to_string(),
            name: name.to_string(),
            district: "Central".to_string(),
            legislative_district: "LD 2".to_string(),
        }
    }

    fn learner(id: &str, school_id: &str, gender: Gender) -> Learner {
        Learner {
            id: id.to_string(),
            lrn: String::new(),
            school_id: school_id.to_string(),
            name: format!("Learner {id}"),
            gender,
            birthday: Some("2019-03-01".to_string()),
            status: Default::default(),
        }
    }

    fn assessment(learner_id: &str, period: Period, fill: u8) -> Assessment {
        Assessment {
            id: format!("{learner_id}-{}", period.as_slug()),
            learner_id: learner_id.to_string(),
            date: Some("2024-08-15".to_string()),
            period,
            checklist: None,
            scores: Some(DomainMap::from_fn(|domain| fill.min(domain.max_score()))),
            remarks: String::new(),
        }
    }

    fn population() -> Population {
        Population {
            schools: vec![school("s1", "zinnia es"), school("s2", "Acacia ES")],
            learners: vec![
                learner("l1", "s1", Gender::Male),
                learner("l2", "s1", Gender::Female),
                learner("l3", "s1", Gender::Female),
                learner("l4", "s2", Gender::Male),
                learner("l5", "s3", Gender::Female),
            ],
            assessments: vec![
                assessment("l1", Period::First, 4),
                assessment("l2", Period::First, 27),
                assessment("l4", Period::First, 0),
                assessment("l4", Period::Third, 8),
                assessment("ghost", Period::First, 5),
            ],
        }
    }

    #[test]
    fn enrollment_matches_learner_count_per_school() {
        let population = population();
        let summary = summarize_cohort(
            &ScoringEngine::default(),
            &population,
            &population.schools,
            PeriodSelection::Single(Period::First),
        );
        for row in &summary.rows {
            let expected = population
                .learners
                .iter()
                .filter(|l| l.school_id == row.school_id)
                .count() as u32;
            assert_eq!(row.counts.enrolled.total(), expected);
        }
    }

    #[test]
    fn rows_sorted_by_display_name_with_id_fallback() {
        let population = population();
        let summary = summarize_cohort(
            &ScoringEngine::default(),
            &population,
            &population.schools,
            PeriodSelection::Single(Period::First),
        );
        let names: Vec<&str> = summary.rows.iter().map(|r| r.school_name.as_str()).collect();
        assert_eq!(names, vec!["Acacia ES", "s3", "zinnia es"]);
    }

    #[test]
    fn totals_equal_column_sums() {
        let population = population();
        let summary = summarize_cohort(
            &ScoringEngine::default(),
            &population,
            &population.schools,
            PeriodSelection::All,
        );
        let mut enrolled = GenderCount::default();
        let mut tested = GenderCount::default();
        for row in &summary.rows {
            enrolled += row.counts.enrolled;
            tested += row.counts.tested;
        }
        assert_eq!(summary.totals.enrolled, enrolled);
        assert_eq!(summary.totals.tested, tested);
        for band in Interpretation::ALL {
            let column: u32 = summary
                .rows
                .iter()
                .map(|r| r.counts.bands.get(band).total())
                .sum();
            assert_eq!(summary.totals.bands.get(band).total(), column);
        }
    }

    #[test]
    fn all_periods_repeats_enrollment_and_counts_tested_per_period() {
        let population = population();
        let summary = summarize_cohort(
            &ScoringEngine::default(),
            &population,
            &population.schools,
            PeriodSelection::All,
        );
        assert_eq!(summary.rows.len(), 9);
        let acacia: Vec<&SummaryRow> = summary.rows.iter().filter(|r| r.school_id == "s2").collect();
        assert_eq!(
            acacia.iter().map(|r| r.period).collect::<Vec<_>>(),
            Period::ALL.to_vec()
        );
        assert!(acacia.iter().all(|r| r.counts.enrolled.male == 1));
        assert_eq!(acacia[0].counts.tested.male, 1);
        assert_eq!(acacia[1].counts.tested.total(), 0);
        assert_eq!(acacia[2].counts.tested.male, 1);
    }

    #[test]
    fn untested_mid_period_counts_no_one() {
        let population = population();
        let summary = summarize_cohort(
            &ScoringEngine::default(),
            &population,
            &population.schools,
            PeriodSelection::Single(Period::Mid),
        );
        assert_eq!(summary.totals.tested.total(), 0);
        assert_eq!(summary.totals.bands.classified().total(), 0);
        assert_eq!(summary.totals.enrolled.total(), 5);
    }

    #[test]
    fn unscorable_learners_are_tested_but_unbanded() {
        let mut population = population();
        population.learners[0].birthday = None;
        let summary = summarize_cohort(
            &ScoringEngine::default(),
            &population,
            &population.schools,
            PeriodSelection::Single(Period::First),
        );
        let zinnia = summary
            .rows
            .iter()
            .find(|r| r.school_id == "s1")
            .expect("zinnia row");
        assert_eq!(zinnia.counts.tested, GenderCount { male: 1, female: 1 });
        assert_eq!(zinnia.counts.bands.classified(), GenderCount { male: 0, female: 1 });
    }

    #[test]
    fn band_distribution_sums_to_classified_total() {
        let population = population();
        let summary = summarize_cohort(
            &ScoringEngine::default(),
            &population,
            &population.schools,
            PeriodSelection::All,
        );
        let distributed: u32 = summary.band_distribution().iter().map(|(_, n)| n).sum();
        assert_eq!(distributed, summary.totals.bands.classified().total());
        assert_eq!(distributed, 4);
    }
}
