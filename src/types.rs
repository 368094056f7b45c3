use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DomainMap, Period};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Male,
    Female,
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown gender: {0}")]
pub struct GenderParseError(pub String);

impl FromStr for Gender {
    type Err = GenderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(GenderParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EnrollmentStatus {
    #[default]
    #[serde(rename = "New Student/Enrolled")]
    Enrolled,
    #[serde(rename = "Transferred-In")]
    TransferredIn,
    #[serde(rename = "Transferred-Out")]
    TransferredOut,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Learner {
    pub id: String,
    #[serde(default)]
    pub lrn: String,
    pub school_id: String,
    pub name: String,
    pub gender: Gender,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub status: EnrollmentStatus,
}

pub type TaskMarks = [bool; 3];

pub type Checklist = DomainMap<Vec<TaskMarks>>;

/// Checklist detail attached to an assessment record.
///
/// Older records persist only the slice for the assessment's own period, one
/// flag per task; newer ones carry the full three-period grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChecklistRecord {
    Grid(Checklist),
    Slice(DomainMap<Vec<bool>>),
}

impl ChecklistRecord {
    pub fn to_grid(&self, period: Period) -> Checklist {
        match self {
            Self::Grid(grid) => grid.clone(),
            Self::Slice(slice) => slice.map(|_, flags| {
                flags
                    .iter()
                    .map(|passed| {
                        let mut marks = TaskMarks::default();
                        marks[period.index()] = *passed;
                        marks
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub learner_id: String,
    #[serde(default)]
    pub date: Option<String>,
    pub period: Period,
    #[serde(default)]
    pub checklist: Option<ChecklistRecord>,
    #[serde(default)]
    pub scores: Option<DomainMap<u8>>,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub legislative_district: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Population {
    #[serde(default)]
    pub schools: Vec<School>,
    #[serde(default)]
    pub learners: Vec<Learner>,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

impl Population {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed reading population file: {}", path.display()))?;
        let parsed: Self = serde_json::from_str(&data)
            .with_context(|| format!("failed parsing population JSON: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn learner(&self, id: &str) -> Option<&Learner> {
        self.learners.iter().find(|l| l.id == id)
    }

    pub fn school(&self, id: &str) -> Option<&School> {
        self.schools.iter().find(|s| s.id == id)
    }

    pub fn assessments_for<'a>(
        &'a self,
        learner_id: &'a str,
    ) -> impl Iterator<Item = &'a Assessment> + 'a {
        self.assessments
            .iter()
            .filter(move |a| a.learner_id == learner_id)
    }

    pub fn assessment_for(&self, learner_id: &str, period: Period) -> Option<&Assessment> {
        self.assessments
            .iter()
            .find(|a| a.learner_id == learner_id && a.period == period)
    }
}
