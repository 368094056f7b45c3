use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub const NOT_COMPUTED: &str = "-";
pub const NO_DATA: &str = "No Data";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    SignificantDelay,
    SlightDelay,
    Average,
    SlightlyAdvanced,
    HighlyAdvanced,
}

impl Interpretation {
    pub const ALL: [Interpretation; 5] = [
        Interpretation::SignificantDelay,
        Interpretation::SlightDelay,
        Interpretation::Average,
        Interpretation::SlightlyAdvanced,
        Interpretation::HighlyAdvanced,
    ];

    pub fn from_scaled(scaled: u8) -> Self {
        match scaled {
            0..=6 => Self::SignificantDelay,
            7..=9 => Self::SlightDelay,
            10..=12 => Self::Average,
            13..=15 => Self::SlightlyAdvanced,
            _ => Self::HighlyAdvanced,
        }
    }

    pub fn from_standard(standard: u16) -> Self {
        match standard {
            0..=69 => Self::SignificantDelay,
            70..=79 => Self::SlightDelay,
            80..=119 => Self::Average,
            120..=129 => Self::SlightlyAdvanced,
            _ => Self::HighlyAdvanced,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::SignificantDelay => 0,
            Self::SlightDelay => 1,
            Self::Average => 2,
            Self::SlightlyAdvanced => 3,
            Self::HighlyAdvanced => 4,
        }
    }

    pub fn domain_label(self) -> &'static str {
        match self {
            Self::SignificantDelay => "Significant Delay",
            Self::SlightDelay => "Slight Delay",
            Self::Average => "Average",
            Self::SlightlyAdvanced => "Slightly Advanced",
            Self::HighlyAdvanced => "Highly Advanced",
        }
    }

    pub fn overall_label(self) -> &'static str {
        match self {
            Self::SignificantDelay => "Suggests Significant Delay",
            Self::SlightDelay => "Suggests Slight Delay",
            Self::Average => "Average Development",
            Self::SlightlyAdvanced => "Suggests Slight Advancement",
            Self::HighlyAdvanced => "Suggests High Advancement",
        }
    }
}

impl Display for Interpretation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.domain_label())
    }
}

pub fn domain_label_or_dash(interpretation: Option<Interpretation>) -> &'static str {
    interpretation
        .map(Interpretation::domain_label)
        .unwrap_or(NOT_COMPUTED)
}

pub fn overall_label_or_no_data(interpretation: Option<Interpretation>) -> &'static str {
    interpretation
        .map(Interpretation::overall_label)
        .unwrap_or(NO_DATA)
}
