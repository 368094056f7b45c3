pub mod map;
pub mod schema;

pub use map::DomainMap;
pub use schema::{Domain, DomainId, DomainParseError, Period, PeriodParseError, DOMAINS};
