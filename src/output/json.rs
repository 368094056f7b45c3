use anyhow::Result;
use serde::Serialize;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainMap;

    #[test]
    fn renders_domain_records_with_camel_case_keys() {
        let scores = DomainMap::from_fn(|domain| domain.max_score());
        let rendered = render_json(&scores).expect("json");
        assert!(rendered.contains("\"socioEmotional\": 24"));
        assert!(rendered.contains("\"grossMotor\": 13"));
    }
}
