//! Placeholder conversion data, NOT the published ECCD norms.
//!
//! The values are monotone stand-ins with the published shapes (raw
//! `0..=domain.max`, scaled 1..=19, standard sums from [`STANDARD_FIRST_SUM`]
//! to 98). Scores computed from them are for wiring and tests only; load the
//! published tables from JSON for real assessments.

use std::collections::BTreeMap;

use crate::domain::DomainMap;
use crate::tables::{DomainRows, ScaledScoreTable, StandardScoreTable};

const YOUNG_GROSS_MOTOR: [u8; 14] = [2, 4, 5, 6, 8, 9, 10, 11, 13, 14, 15, 17, 18, 19];
const YOUNG_FINE_MOTOR: [u8; 12] = [2, 4, 6, 7, 9, 10, 12, 13, 15, 16, 18, 19];
const YOUNG_SELF_HELP: [u8; 28] = [
    2, 3, 4, 4, 5, 6, 6, 7, 7, 8, 9, 9, 10, 11, 11, 12, 12, 13, 14, 14, 15, 15, 16, 17, 17, 18,
    19, 19,
];
const YOUNG_RECEPTIVE_LANGUAGE: [u8; 6] = [3, 6, 9, 12, 15, 18];
const YOUNG_EXPRESSIVE_LANGUAGE: [u8; 9] = [2, 5, 7, 9, 11, 13, 15, 17, 19];
const YOUNG_COGNITIVE: [u8; 22] = [
    2, 3, 4, 5, 6, 6, 7, 8, 9, 10, 10, 11, 12, 13, 14, 14, 15, 16, 17, 18, 18, 19,
];
const YOUNG_SOCIO_EMOTIONAL: [u8; 25] = [
    2, 3, 4, 5, 5, 6, 7, 7, 8, 9, 9, 10, 11, 12, 12, 13, 14, 14, 15, 16, 16, 17, 18, 18, 19,
];

const MID_GROSS_MOTOR: [u8; 14] = [1, 1, 2, 4, 5, 6, 7, 9, 10, 11, 12, 14, 15, 16];
const MID_FINE_MOTOR: [u8; 12] = [1, 1, 3, 4, 6, 7, 9, 10, 12, 13, 15, 16];
const MID_SELF_HELP: [u8; 28] = [
    1, 1, 1, 2, 2, 3, 3, 4, 5, 5, 6, 6, 7, 8, 8, 9, 10, 10, 11, 11, 12, 13, 13, 14, 14, 15, 16,
    16,
];
const MID_RECEPTIVE_LANGUAGE: [u8; 6] = [1, 4, 7, 10, 13, 16];
const MID_EXPRESSIVE_LANGUAGE: [u8; 9] = [1, 2, 4, 6, 8, 10, 12, 14, 16];
const MID_COGNITIVE: [u8; 22] = [
    1, 1, 1, 2, 3, 4, 4, 5, 6, 7, 8, 8, 9, 10, 11, 12, 12, 13, 14, 15, 16, 16,
];
const MID_SOCIO_EMOTIONAL: [u8; 25] = [
    1, 1, 1, 2, 2, 3, 4, 5, 5, 6, 7, 7, 8, 9, 9, 10, 11, 11, 12, 13, 14, 14, 15, 16, 16,
];

const OLD_GROSS_MOTOR: [u8; 14] = [1, 1, 1, 1, 2, 3, 5, 6, 7, 9, 10, 11, 12, 14];
const OLD_FINE_MOTOR: [u8; 12] = [1, 1, 1, 2, 3, 5, 6, 8, 9, 11, 12, 14];
const OLD_SELF_HELP: [u8; 28] = [
    1, 1, 1, 1, 1, 1, 1, 1, 2, 3, 3, 4, 4, 5, 6, 6, 7, 7, 8, 9, 9, 10, 11, 11, 12, 12, 13, 14,
];
const OLD_RECEPTIVE_LANGUAGE: [u8; 6] = [1, 1, 4, 7, 10, 13];
const OLD_EXPRESSIVE_LANGUAGE: [u8; 9] = [1, 1, 1, 3, 5, 7, 10, 12, 14];
const OLD_COGNITIVE: [u8; 22] = [
    1, 1, 1, 1, 1, 1, 2, 3, 3, 4, 5, 6, 7, 7, 8, 9, 10, 10, 11, 12, 13, 14,
];
const OLD_SOCIO_EMOTIONAL: [u8; 25] = [
    1, 1, 1, 1, 1, 1, 1, 2, 3, 3, 4, 5, 5, 6, 7, 7, 8, 9, 10, 10, 11, 12, 12, 13, 14,
];

pub const STANDARD_FIRST_SUM: u16 = 29;

const STANDARD_SCORES: [u16; 70] = [
    37, 39, 40, 42, 43, 45, 46, 48, 49, 51, 52, 54, 55, 57, 59, 60, 62, 63, 65, 66, 68, 69, 71, 72,
    74, 75, 77, 78, 80, 82, 83, 85, 86, 88, 89, 91, 92, 94, 95, 97, 98, 100, 101, 103, 104, 105,
    107, 108, 110, 111, 112, 114, 115, 116, 118, 119, 120, 122, 123, 124, 126, 127, 129, 130, 131,
    133, 134, 135, 137, 138,
];

fn row(values: &[u8]) -> Vec<Option<u8>> {
    values.iter().copied().map(Some).collect()
}

fn young() -> DomainRows {
    DomainMap {
        gross_motor: row(&YOUNG_GROSS_MOTOR),
        fine_motor: row(&YOUNG_FINE_MOTOR),
        self_help: row(&YOUNG_SELF_HELP),
        receptive_language: row(&YOUNG_RECEPTIVE_LANGUAGE),
        expressive_language: row(&YOUNG_EXPRESSIVE_LANGUAGE),
        cognitive: row(&YOUNG_COGNITIVE),
        socio_emotional: row(&YOUNG_SOCIO_EMOTIONAL),
    }
}

fn mid() -> DomainRows {
    DomainMap {
        gross_motor: row(&MID_GROSS_MOTOR),
        fine_motor: row(&MID_FINE_MOTOR),
        self_help: row(&MID_SELF_HELP),
        receptive_language: row(&MID_RECEPTIVE_LANGUAGE),
        expressive_language: row(&MID_EXPRESSIVE_LANGUAGE),
        cognitive: row(&MID_COGNITIVE),
        socio_emotional: row(&MID_SOCIO_EMOTIONAL),
    }
}

fn old() -> DomainRows {
    DomainMap {
        gross_motor: row(&OLD_GROSS_MOTOR),
        fine_motor: row(&OLD_FINE_MOTOR),
        self_help: row(&OLD_SELF_HELP),
        receptive_language: row(&OLD_RECEPTIVE_LANGUAGE),
        expressive_language: row(&OLD_EXPRESSIVE_LANGUAGE),
        cognitive: row(&OLD_COGNITIVE),
        socio_emotional: row(&OLD_SOCIO_EMOTIONAL),
    }
}

pub fn scaled_scores() -> ScaledScoreTable {
    ScaledScoreTable {
        young: young(),
        mid: mid(),
        old: old(),
    }
}

pub fn standard_scores() -> StandardScoreTable {
    let entries: BTreeMap<u16, u16> = STANDARD_SCORES
        .iter()
        .enumerate()
        .map(|(offset, score)| (STANDARD_FIRST_SUM + offset as u16, *score))
        .collect();
    StandardScoreTable { entries }
}
