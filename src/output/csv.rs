use anyhow::Result;

use crate::cohort::{CohortSummary, GenderCount, SummaryCounts};
use crate::scoring::{AssessmentResult, Interpretation};

pub fn assessments_to_csv(results: &[AssessmentResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "learner_id",
        "assessment_id",
        "period",
        "date",
        "age",
        "domain",
        "raw_score",
        "scaled_score",
        "interpretation",
        "standard_score",
        "overall",
    ])?;
    for result in results {
        let age = result
            .age
            .map(|a| a.composite_key().to_string())
            .unwrap_or_default();
        for d in &result.domains {
            writer.write_record([
                result.learner_id.clone(),
                result.assessment_id.clone(),
                result.period.as_slug().to_string(),
                result.evaluated_on.clone().unwrap_or_default(),
                age.clone(),
                d.domain.as_key().to_string(),
                d.raw_score.to_string(),
                d.scaled_score.map(|s| s.to_string()).unwrap_or_default(),
                d.interpretation_label().to_string(),
                result
                    .standard_score
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                result.interpretation_label().to_string(),
            ])?;
        }
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

fn push_gender(record: &mut Vec<String>, count: GenderCount) {
    record.push(count.male.to_string());
    record.push(count.female.to_string());
}

fn counts_record(mut record: Vec<String>, counts: &SummaryCounts) -> Vec<String> {
    push_gender(&mut record, counts.enrolled);
    push_gender(&mut record, counts.tested);
    for band in Interpretation::ALL {
        push_gender(&mut record, counts.bands.get(band));
    }
    record
}

pub fn cohort_to_csv(summary: &CohortSummary) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    let mut header = vec![
        "school_id".to_string(),
        "school".to_string(),
        "period".to_string(),
        "enrolled_male".to_string(),
        "enrolled_female".to_string(),
        "tested_male".to_string(),
        "tested_female".to_string(),
    ];
    for band in Interpretation::ALL {
        let key = serde_json::to_value(band)?;
        let key = key.as_str().unwrap_or_default().to_string();
        header.push(format!("{key}_male"));
        header.push(format!("{key}_female"));
    }
    writer.write_record(&header)?;

    for row in &summary.rows {
        writer.write_record(counts_record(
            vec![
                row.school_id.clone(),
                row.school_name.clone(),
                row.period.as_slug().to_string(),
            ],
            &row.counts,
        ))?;
    }
    writer.write_record(counts_record(
        vec![
            String::new(),
            "TOTAL".to_string(),
            summary.selection.to_string(),
        ],
        &summary.totals,
    ))?;
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
