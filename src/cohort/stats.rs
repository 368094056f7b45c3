use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{DomainId, DomainMap};
use crate::scoring::raw::assessment_raw_scores;
use crate::types::{Gender, Population};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PopulationStats {
    pub learners: usize,
    pub males: usize,
    pub females: usize,
    pub assessed_learners: usize,
    pub assessments: usize,
    pub schools_with_assessments: usize,
    pub mean_raw_score: f64,
    pub domain_means: DomainMap<f64>,
}

pub fn population_stats(population: &Population) -> PopulationStats {
    let males = population
        .learners
        .iter()
        .filter(|l| l.gender == Gender::Male)
        .count();

    let assessed: HashSet<&str> = population
        .assessments
        .iter()
        .map(|a| a.learner_id.as_str())
        .collect();
    let schools_with_assessments: HashSet<&str> = population
        .learners
        .iter()
        .filter(|l| assessed.contains(l.id.as_str()))
        .map(|l| l.school_id.as_str())
        .collect();

    let raw_scores: Vec<DomainMap<u8>> = population
        .assessments
        .iter()
        .map(assessment_raw_scores)
        .collect();
    let count = raw_scores.len();
    let mean = |total: f64| if count == 0 { 0.0 } else { total / count as f64 };

    let domain_means = DomainMap::from_fn(|domain: DomainId| {
        mean(raw_scores.iter().map(|r| f64::from(*r.get(domain))).sum())
    });
    let per_assessment_total: f64 = raw_scores
        .iter()
        .map(|r| {
            let sum: f64 = r.iter().map(|(_, v)| f64::from(*v)).sum();
            sum / DomainId::ALL.len() as f64
        })
        .sum();

    PopulationStats {
        learners: population.learners.len(),
        males,
        females: population.learners.len() - males,
        assessed_learners: assessed.len(),
        assessments: count,
        schools_with_assessments: schools_with_assessments.len(),
        mean_raw_score: mean(per_assessment_total),
        domain_means,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Period;
    use crate::types::{Assessment, Learner};

    #[test]
    fn empty_population_yields_zeros() {
        let stats = population_stats(&Population::default());
        assert_eq!(stats.learners, 0);
        assert_eq!(stats.assessments, 0);
        assert_eq!(stats.mean_raw_score, 0.0);
        assert!(stats.domain_means.iter().all(|(_, v)| *v == 0.0));
    }

    #[test]
    fn averages_raw_scores_across_assessments() {
        let learner = |id: &str, school: &str, gender: Gender| Learner {
            id: id.to_string(),
            lrn: String::new(),
            school_id: school.to_string(),
            name: id.to_string(),
            gender,
            birthday: None,
            status: Default::default(),
        };
        let tallied = |id: &str, learner_id: &str, period: Period, value: u8| Assessment {
            id: id.to_string(),
            learner_id: learner_id.to_string(),
            date: None,
            period,
            checklist: None,
            scores: Some(DomainMap::from_fn(|_| value)),
            remarks: String::new(),
        };
        let population = Population {
            schools: Vec::new(),
            learners: vec![
                learner("l1", "s1", Gender::Male),
                learner("l2", "s1", Gender::Female),
                learner("l3", "s2", Gender::Female),
            ],
            assessments: vec![
                tallied("a1", "l1", Period::First, 2),
                tallied("a2", "l1", Period::Mid, 4),
                tallied("a3", "l2", Period::First, 3),
            ],
        };

        let stats = population_stats(&population);
        assert_eq!(stats.males, 1);
        assert_eq!(stats.females, 2);
        assert_eq!(stats.assessed_learners, 2);
        assert_eq!(stats.assessments, 3);
        assert_eq!(stats.schools_with_assessments, 1);
        assert!((stats.mean_raw_score - 3.0).abs() < 1e-9);
        assert!((stats.domain_means.cognitive - 3.0).abs() < 1e-9);
    }
}
