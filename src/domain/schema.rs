use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum DomainId {
    GrossMotor,
    FineMotor,
    SelfHelp,
    ReceptiveLanguage,
    ExpressiveLanguage,
    Cognitive,
    SocioEmotional,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Domain {
    pub id: DomainId,
    pub label: &'static str,
    pub max: u8,
}

pub const DOMAINS: [Domain; 7] = [
    Domain {
        id: DomainId::GrossMotor,
        label: "Gross Motor",
        max: 13,
    },
    Domain {
        id: DomainId::FineMotor,
        label: "Fine Motor",
        max: 11,
    },
    Domain {
        id: DomainId::SelfHelp,
        label: "Self-Help",
        max: 27,
    },
    Domain {
        id: DomainId::ReceptiveLanguage,
        label: "Receptive Language",
        max: 5,
    },
    Domain {
        id: DomainId::ExpressiveLanguage,
        label: "Expressive Language",
        max: 8,
    },
    Domain {
        id: DomainId::Cognitive,
        label: "Cognitive",
        max: 21,
    },
    Domain {
        id: DomainId::SocioEmotional,
        label: "Socio-Emotional",
        max: 24,
    },
];

impl DomainId {
    pub const ALL: [DomainId; 7] = [
        DomainId::GrossMotor,
        DomainId::FineMotor,
        DomainId::SelfHelp,
        DomainId::ReceptiveLanguage,
        DomainId::ExpressiveLanguage,
        DomainId::Cognitive,
        DomainId::SocioEmotional,
    ];

    pub fn descriptor(self) -> &'static Domain {
        &DOMAINS[self.index()]
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn max_score(self) -> u8 {
        self.descriptor().max
    }

    pub fn index(self) -> usize {
        match self {
            Self::GrossMotor => 0,
            Self::FineMotor => 1,
            Self::SelfHelp => 2,
            Self::ReceptiveLanguage => 3,
            Self::ExpressiveLanguage => 4,
            Self::Cognitive => 5,
            Self::SocioEmotional => 6,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::GrossMotor => "grossMotor",
            Self::FineMotor => "fineMotor",
            Self::SelfHelp => "selfHelp",
            Self::ReceptiveLanguage => "receptiveLanguage",
            Self::ExpressiveLanguage => "expressiveLanguage",
            Self::Cognitive => "cognitive",
            Self::SocioEmotional => "socioEmotional",
        }
    }
}

impl Display for DomainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Error)]
#[error("unknown domain: {0}")]
pub struct DomainParseError(pub String);

impl FromStr for DomainId {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "grossmotor" | "gm" => Ok(Self::GrossMotor),
            "finemotor" | "fm" => Ok(Self::FineMotor),
            "selfhelp" | "sh" => Ok(Self::SelfHelp),
            "receptivelanguage" | "receptive" | "rl" => Ok(Self::ReceptiveLanguage),
            "expressivelanguage" | "expressive" | "el" => Ok(Self::ExpressiveLanguage),
            "cognitive" | "cog" => Ok(Self::Cognitive),
            "socioemotional" | "se" => Ok(Self::SocioEmotional),
            _ => Err(DomainParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Period {
    #[serde(rename = "FIRST ASSESSMENT", alias = "first")]
    First,
    #[serde(rename = "MID-ASSESSMENT", alias = "mid")]
    Mid,
    #[serde(rename = "THIRD ASSESSMENT", alias = "third")]
    Third,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::First, Period::Mid, Period::Third];

    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Mid => 1,
            Self::Third => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::First => "FIRST ASSESSMENT",
            Self::Mid => "MID-ASSESSMENT",
            Self::Third => "THIRD ASSESSMENT",
        }
    }

    pub fn as_slug(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Mid => "mid",
            Self::Third => "third",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Error)]
#[error("unknown assessment period: {0}")]
pub struct PeriodParseError(pub String);

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "first" | "1" | "first-assessment" => Ok(Self::First),
            "mid" | "2" | "mid-assessment" | "middle" => Ok(Self::Mid),
            "third" | "3" | "third-assessment" | "final" => Ok(Self::Third),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_table_lines_up_with_ids() {
        for (idx, id) in DomainId::ALL.iter().enumerate() {
            assert_eq!(id.index(), idx);
            assert_eq!(DOMAINS[idx].id, *id);
        }
        assert_eq!(DomainId::SelfHelp.max_score(), 27);
        assert_eq!(DomainId::ReceptiveLanguage.label(), "Receptive Language");
    }

    #[test]
    fn parses_domain_spellings() {
        assert_eq!(
            "grossMotor".parse::<DomainId>().expect("camel case"),
            DomainId::GrossMotor
        );
        assert_eq!(
            "socio_emotional".parse::<DomainId>().expect("snake case"),
            DomainId::SocioEmotional
        );
        assert_eq!(
            "Self-Help".parse::<DomainId>().expect("label"),
            DomainId::SelfHelp
        );
        assert!("balance".parse::<DomainId>().is_err());
    }

    #[test]
    fn parses_period_labels_and_short_forms() {
        assert_eq!(
            "MID-ASSESSMENT".parse::<Period>().expect("label"),
            Period::Mid
        );
        assert_eq!("third".parse::<Period>().expect("slug"), Period::Third);
        assert_eq!("1".parse::<Period>().expect("ordinal"), Period::First);
        assert!("fourth".parse::<Period>().is_err());
    }

    #[test]
    fn period_serializes_with_record_labels() {
        let json = serde_json::to_string(&Period::First).expect("serialize");
        assert_eq!(json, "\"FIRST ASSESSMENT\"");
        let parsed: Period = serde_json::from_str("\"THIRD ASSESSMENT\"").expect("deserialize");
        assert_eq!(parsed, Period::Third);
    }
}
