use crate::age::{Age, AgeKey};
use crate::domain::DomainId;
use crate::tables::{AgeBand, ScaledScoreTable};

const YOUNG_FROM: AgeKey = AgeKey::literal(3, 1);
const YOUNG_TO: AgeKey = AgeKey::literal(4, 0);
const MID_FROM: AgeKey = AgeKey::literal(4, 1);
const MID_TO: AgeKey = AgeKey::literal(5, 0);
const OLD_FROM: AgeKey = AgeKey::literal(5, 1);

/// Table band for an age, compared on the composite "years.months" key.
///
/// Ages keyed below 3.1 have no band.
pub fn select_band(age: Age) -> Option<AgeBand> {
    let key = age.composite_key();
    if (YOUNG_FROM..=YOUNG_TO).contains(&key) {
        Some(AgeBand::Young)
    } else if (MID_FROM..=MID_TO).contains(&key) {
        Some(AgeBand::Mid)
    } else if key >= OLD_FROM {
        Some(AgeBand::Old)
    } else {
        None
    }
}

pub fn resolve_scaled(
    table: &ScaledScoreTable,
    domain: DomainId,
    raw: u8,
    age: Option<Age>,
) -> Option<u8> {
    let band = select_band(age?)?;
    table.lookup(band, domain, raw)
}
