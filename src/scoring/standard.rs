use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DomainMap;
use crate::tables::StandardScoreTable;

/// How a scaled-score sum outside the standard table's keys is resolved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SumRangePolicy {
    /// Below the lowest key takes the lowest entry; above the highest key takes the highest.
    #[default]
    Clamp,
    /// Out-of-range sums have no standard score.
    Unavailable,
}

impl Display for SumRangePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clamp => write!(f, "clamp"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown out-of-range policy: {0} (expected clamp or unavailable)")]
pub struct SumRangePolicyParseError(pub String);

impl FromStr for SumRangePolicy {
    type Err = SumRangePolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "unavailable" | "none" => Ok(Self::Unavailable),
            _ => Err(SumRangePolicyParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SumPlacement {
    BelowTable,
    InTable,
    AboveTable,
}

pub fn sum_scaled(scaled: &DomainMap<Option<u8>>) -> Option<u16> {
    scaled
        .iter()
        .try_fold(0u16, |sum, (_, score)| score.map(|s| sum + u16::from(s)))
}

pub fn place_sum(table: &StandardScoreTable, sum: u16) -> SumPlacement {
    match (table.floor(), table.ceiling()) {
        (Some((low, _)), _) if sum < low => SumPlacement::BelowTable,
        (_, Some((high, _))) if sum > high => SumPlacement::AboveTable,
        _ => SumPlacement::InTable,
    }
}

pub fn resolve_standard(
    table: &StandardScoreTable,
    sum: u16,
    policy: SumRangePolicy,
) -> Option<u16> {
    match (place_sum(table, sum), policy) {
        (SumPlacement::InTable, _) => table.get(sum),
        (_, SumRangePolicy::Unavailable) => None,
        (SumPlacement::BelowTable, SumRangePolicy::Clamp) => table.floor().map(|(_, v)| v),
        (SumPlacement::AboveTable, SumRangePolicy::Clamp) => table.ceiling().map(|(_, v)| v),
    }
}
