use std::fmt::{Display, Formatter};

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age {
    pub years: u32,
    pub months: u32,
}

impl Age {
    pub fn between(birth: NaiveDate, reference: NaiveDate) -> Option<Self> {
        if reference < birth {
            return None;
        }
        let mut years = reference.year() - birth.year();
        let mut months = reference.month() as i32 - birth.month() as i32;
        if reference.day() < birth.day() {
            months -= 1;
        }
        if months < 0 {
            years -= 1;
            months += 12;
        }
        Some(Self {
            years: u32::try_from(years).ok()?,
            months: u32::try_from(months).ok()?,
        })
    }

    pub fn composite_key(self) -> AgeKey {
        AgeKey::from_age(self)
    }
}

impl Display for Age {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let year_label = if self.years == 1 { "year" } else { "years" };
        let month_label = if self.months == 1 { "month" } else { "months" };
        write!(
            f,
            "{} {} and {} {}",
            self.years, year_label, self.months, month_label
        )
    }
}

/// Composite "years.months" age key, held in hundredths.
///
/// The key reads the text `"{years}.{months}"` as a decimal number, so month
/// 1 and month 10 both compare as `.1` and month 11 compares as `.11`. It is
/// only meaningful for ordering against band boundaries, never for arithmetic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgeKey(u32);

impl AgeKey {
    pub fn from_age(age: Age) -> Self {
        let fraction = if age.months < 10 {
            age.months * 10
        } else {
            age.months
        };
        Self(age.years * 100 + fraction)
    }

    pub const fn literal(whole: u32, tenths: u32) -> Self {
        Self(whole * 100 + tenths * 10)
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }
}

impl Display for AgeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        if fraction % 10 == 0 {
            write!(f, "{whole}.{}", fraction / 10)
        } else {
            write!(f, "{whole}.{fraction:02}")
        }
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

pub fn age_at(birthday: Option<&str>, evaluated_on: Option<&str>) -> Option<Age> {
    let birth_raw = birthday?;
    let reference_raw = evaluated_on?;
    let Some(birth) = parse_date(birth_raw) else {
        warn!("unparseable birth date: {birth_raw:?}");
        return None;
    };
    let Some(reference) = parse_date(reference_raw) else {
        warn!("unparseable evaluation date: {reference_raw:?}");
        return None;
    };
    let age = Age::between(birth, reference);
    if age.is_none() {
        warn!("evaluation date {reference} precedes birth date {birth}");
    }
    age
}
