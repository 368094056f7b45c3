use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Learner, Population, School};

pub trait JurisdictionFilter {
    fn admits(&self, learner: &Learner, school: Option<&School>) -> bool;

    fn apply(&self, population: &Population) -> Population {
        let learners: Vec<Learner> = population
            .learners
            .iter()
            .filter(|learner| self.admits(learner, population.school(&learner.school_id)))
            .cloned()
            .collect();
        let visible: HashSet<&str> = learners.iter().map(|l| l.id.as_str()).collect();
        let schools_seen: HashSet<&str> = learners.iter().map(|l| l.school_id.as_str()).collect();

        Population {
            schools: population
                .schools
                .iter()
                .filter(|s| schools_seen.contains(s.id.as_str()))
                .cloned()
                .collect(),
            assessments: population
                .assessments
                .iter()
                .filter(|a| visible.contains(a.learner_id.as_str()))
                .cloned()
                .collect(),
            learners,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum JurisdictionScope {
    #[default]
    Unrestricted,
    School(String),
    District(String),
    LegislativeDistrict(String),
}

impl JurisdictionFilter for JurisdictionScope {
    fn admits(&self, learner: &Learner, school: Option<&School>) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::School(id) => learner.school_id == *id,
            Self::District(name) => school.is_some_and(|s| s.district.eq_ignore_ascii_case(name)),
            Self::LegislativeDistrict(name) => {
                school.is_some_and(|s| s.legislative_district.eq_ignore_ascii_case(name))
            }
        }
    }
}

impl Display for JurisdictionScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unrestricted => write!(f, "all"),
            Self::School(id) => write!(f, "school:{id}"),
            Self::District(name) => write!(f, "district:{name}"),
            Self::LegislativeDistrict(name) => write!(f, "ld:{name}"),
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid scope: {0} (expected all, school:<id>, district:<name> or ld:<name>)")]
pub struct ScopeParseError(pub String);

impl FromStr for JurisdictionScope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::Unrestricted);
        }
        let (kind, value) = trimmed
            .split_once(':')
            .ok_or_else(|| ScopeParseError(s.to_string()))?;
        let value = value.trim();
        if value.is_empty() {
            return Err(ScopeParseError(s.to_string()));
        }
        match kind.trim().to_ascii_lowercase().as_str() {
            "school" => Ok(Self::School(value.to_string())),
            "district" => Ok(Self::District(value.to_string())),
            "ld" | "legislative" | "legislative-district" => {
                Ok(Self::LegislativeDistrict(value.to_string()))
            }
            _ => Err(ScopeParseError(s.to_string())),
        }
    }
}
