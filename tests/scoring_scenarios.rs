use eccd_scoring::age::age_at;
use eccd_scoring::cohort::{
    population_stats, summarize_cohort, JurisdictionFilter, JurisdictionScope, PeriodSelection,
};
use eccd_scoring::domain::{DomainId, DomainMap, Period};
use eccd_scoring::scoring::raw::assessment_raw_scores;
use eccd_scoring::scoring::{Interpretation, LearnerProgress, ScoringEngine, SumRangePolicy};
use eccd_scoring::tables::{AgeBand, ScoringTables};
use eccd_scoring::types::{Assessment, Learner, Population};

const POPULATION: &str = r#"{
  "schools": [
    {"id": "sch-1", "name": "Malaya Elementary", "district": "East", "legislativeDistrict": "LD 1"},
    {"id": "sch-2", "name": "bayanihan elementary", "district": "West", "legislativeDistrict": "LD 1"}
  ],
  "learners": [
    {"id": "ana", "lrn": "1001", "schoolId": "sch-1", "name": "Ana", "gender": "Female", "birthday": "2019-01-10"},
    {"id": "ben", "lrn": "1002", "schoolId": "sch-1", "name": "Ben", "gender": "Male", "birthday": "2019-06-15"},
    {"id": "cris", "lrn": "1003", "schoolId": "sch-2", "name": "Cris", "gender": "Male", "birthday": "not a date"},
    {"id": "dana", "lrn": "1004", "schoolId": "sch-2", "name": "Dana", "gender": "Female", "birthday": "2020-02-01", "status": "Transferred-In"}
  ],
  "assessments": [
    {"id": "a-ana-1", "learnerId": "ana", "date": "2024-03-15", "period": "FIRST ASSESSMENT", "scores": {}},
    {"id": "a-ben-1", "learnerId": "ben", "date": "2024-06-14", "period": "FIRST ASSESSMENT",
     "checklist": {"grossMotor": [true, true, true, false], "receptiveLanguage": [true, true]}},
    {"id": "a-ben-3", "learnerId": "ben", "date": "2025-03-01T08:30:00Z", "period": "THIRD ASSESSMENT",
     "checklist": {"grossMotor": [[true, false, true], [false, false, true]]}},
    {"id": "a-cris-1", "learnerId": "cris", "date": "2024-07-01", "period": "first",
     "scores": {"grossMotor": 5, "fineMotor": 5, "selfHelp": 5, "receptiveLanguage": 5,
                "expressiveLanguage": 5, "cognitive": 5, "socioEmotional": 5}},
    {"id": "a-dana-1", "learnerId": "dana", "date": "2024-07-01", "period": "first",
     "scores": {"grossMotor": 13, "fineMotor": 11, "selfHelp": 27, "receptiveLanguage": 5,
                "expressiveLanguage": 8, "cognitive": 21, "socioEmotional": 24}}
  ]
}"#;

fn population() -> Population {
    serde_json::from_str(POPULATION).expect("population fixture parses")
}

fn learner<'a>(population: &'a Population, id: &str) -> &'a Learner {
    population.learner(id).expect("learner in fixture")
}

#[test]
fn all_minimum_scores_at_five_years_two_months() {
    let population = population();
    let ana = learner(&population, "ana");
    let assessment = population
        .assessment_for("ana", Period::First)
        .expect("ana first assessment");

    let engine = ScoringEngine::default();
    let result = engine.evaluate(ana, assessment);

    let age = result.age.expect("age computed");
    assert_eq!((age.years, age.months), (5, 2));
    assert_eq!(result.age_band, Some(AgeBand::Old));

    let tables = ScoringTables::builtin();
    for domain in &result.domains {
        assert_eq!(domain.raw_score, 0);
        assert_eq!(
            domain.scaled_score,
            tables.scaled.lookup(AgeBand::Old, domain.domain, 0)
        );
        assert_eq!(domain.scaled_score, Some(1));
    }
    let floor = tables.standard.floor().expect("standard floor");
    assert!(result.scaled_sum.expect("sum") <= floor.0);
    assert_eq!(result.standard_score, Some(floor.1));
    assert_eq!(result.interpretation_label(), "Suggests Significant Delay");
}

#[test]
fn missing_mid_assessment_scores_zero_and_is_not_tested() {
    let population = population();
    let ben = learner(&population, "ben");
    assert!(population.assessment_for("ben", Period::Mid).is_none());

    let empty = Assessment {
        id: "placeholder".to_string(),
        learner_id: "ben".to_string(),
        date: None,
        period: Period::Mid,
        checklist: None,
        scores: None,
        remarks: String::new(),
    };
    assert_eq!(assessment_raw_scores(&empty), DomainMap::default());

    let engine = ScoringEngine::default();
    let progress = LearnerProgress::build(&engine, ben, population.assessments_for("ben"));
    assert!(progress.period(Period::Mid).result.is_none());

    let summary = summarize_cohort(
        &engine,
        &population,
        &population.schools,
        PeriodSelection::Single(Period::Mid),
    );
    assert_eq!(summary.totals.tested.total(), 0);
    assert_eq!(summary.totals.enrolled.total(), 4);
}

#[test]
fn checklist_shapes_score_their_period() {
    let population = population();
    let ben = learner(&population, "ben");
    let engine = ScoringEngine::default();

    let first = engine.evaluate(
        ben,
        population
            .assessment_for("ben", Period::First)
            .expect("first"),
    );
    assert_eq!(
        first.domain(DomainId::GrossMotor).map(|d| d.raw_score),
        Some(3)
    );
    assert_eq!(
        first.domain(DomainId::ReceptiveLanguage).map(|d| d.raw_score),
        Some(2)
    );
    assert_eq!(first.age_label(), "4 years and 11 months");

    let third = engine.evaluate(
        ben,
        population
            .assessment_for("ben", Period::Third)
            .expect("third"),
    );
    assert_eq!(
        third.domain(DomainId::GrossMotor).map(|d| d.raw_score),
        Some(2)
    );
    assert_eq!(third.age_label(), "5 years and 8 months");
}

#[test]
fn unparseable_birthday_leaves_learner_unbanded() {
    let population = population();
    let cris = learner(&population, "cris");
    assert_eq!(age_at(cris.birthday.as_deref(), Some("2024-07-01")), None);

    let engine = ScoringEngine::default();
    let result = engine.evaluate(
        cris,
        population
            .assessment_for("cris", Period::First)
            .expect("cris first"),
    );
    assert!(result.domains.iter().all(|d| d.raw_score == 5));
    assert_eq!(result.standard_score, None);
    assert_eq!(result.interpretation_label(), "No Data");
}

#[test]
fn cohort_report_orders_schools_and_counts_bands() {
    let population = population();
    let engine = ScoringEngine::default();
    let summary = summarize_cohort(
        &engine,
        &population,
        &population.schools,
        PeriodSelection::Single(Period::First),
    );

    let names: Vec<&str> = summary
        .rows
        .iter()
        .map(|r| r.school_name.as_str())
        .collect();
    assert_eq!(names, vec!["bayanihan elementary", "Malaya Elementary"]);

    for row in &summary.rows {
        let enrolled = population
            .learners
            .iter()
            .filter(|l| l.school_id == row.school_id)
            .count() as u32;
        assert_eq!(row.counts.enrolled.male + row.counts.enrolled.female, enrolled);
    }

    assert_eq!(summary.totals.tested.total(), 4);
    assert_eq!(summary.totals.bands.classified().total(), 3);
    assert_eq!(
        summary
            .totals
            .bands
            .get(Interpretation::SignificantDelay)
            .female,
        1
    );
    assert_eq!(
        summary.totals.bands.get(Interpretation::HighlyAdvanced).female,
        1
    );
}

#[test]
fn unavailable_policy_drops_clamped_learners_from_bands() {
    let population = population();
    let engine = ScoringEngine::new(ScoringTables::builtin(), SumRangePolicy::Unavailable);
    let summary = summarize_cohort(
        &engine,
        &population,
        &population.schools,
        PeriodSelection::Single(Period::First),
    );
    assert_eq!(summary.totals.tested.total(), 4);
    assert!(summary.totals.bands.classified().total() < 3);
}

#[test]
fn district_scope_feeds_report_and_stats() {
    let population = population();
    let east = JurisdictionScope::District("East".to_string()).apply(&population);
    let engine = ScoringEngine::default();
    let summary = summarize_cohort(&engine, &east, &east.schools, PeriodSelection::All);
    assert_eq!(summary.rows.len(), 3);
    assert!(summary.rows.iter().all(|r| r.school_id == "sch-1"));

    let stats = population_stats(&east);
    assert_eq!(stats.learners, 2);
    assert_eq!(stats.assessments, 3);
    assert_eq!(stats.assessed_learners, 2);
    assert_eq!(stats.schools_with_assessments, 1);
}
