use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::cohort::{CohortSummary, GenderCount, PopulationStats, SummaryCounts};
use crate::domain::{DomainId, Period};
use crate::scoring::{AssessmentResult, Interpretation, LearnerProgress, NOT_COMPUTED};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_COMPUTED.to_string())
}

fn band_color(band: Interpretation) -> Option<Color> {
    match band {
        Interpretation::SignificantDelay => Some(Color::Red),
        Interpretation::SlightDelay => Some(Color::Yellow),
        Interpretation::Average => None,
        Interpretation::SlightlyAdvanced | Interpretation::HighlyAdvanced => Some(Color::Green),
    }
}

fn band_cell(text: &str, band: Option<Interpretation>) -> Cell {
    match band.and_then(band_color) {
        Some(color) => Cell::new(text).fg(color),
        None => Cell::new(text),
    }
}

pub fn render_assessment_table(result: &AssessmentResult) -> String {
    let mut table = new_table();
    table.set_header(vec!["Domain", "Raw", "Max", "Scaled", "Interpretation"]);

    for d in &result.domains {
        table.add_row(Row::from(vec![
            Cell::new(&d.label),
            Cell::new(d.raw_score),
            Cell::new(d.max_score),
            Cell::new(or_dash(d.scaled_score)),
            band_cell(d.interpretation_label(), d.interpretation),
        ]));
    }

    let sum = match (result.scaled_sum, result.was_clamped()) {
        (Some(sum), true) => format!("{sum} (clamped)"),
        (sum, _) => or_dash(sum),
    };
    table.add_row(vec![
        "Sum of scaled scores".to_string(),
        result.raw_total().to_string(),
        String::new(),
        sum,
        String::new(),
    ]);
    table.add_row(Row::from(vec![
        Cell::new("Standard score"),
        Cell::new(""),
        Cell::new(""),
        Cell::new(or_dash(result.standard_score)),
        band_cell(result.interpretation_label(), result.interpretation),
    ]));

    let band = result
        .age_band
        .map(|b| format!(" ({b})"))
        .unwrap_or_default();
    format!(
        "{} | age {}{}\n{}",
        result.period,
        result.age_label(),
        band,
        table
    )
}

pub fn render_progress_table(progress: &LearnerProgress) -> String {
    let mut table = new_table();
    let mut header = vec!["Domain".to_string()];
    for period in Period::ALL {
        header.push(format!("{} Raw", period.as_slug()));
        header.push(format!("{} Scaled", period.as_slug()));
    }
    table.set_header(header);

    for domain in DomainId::ALL {
        let mut row = vec![domain.label().to_string()];
        let raw = progress.raw_trend(domain);
        for p in &progress.periods {
            let scaled = p
                .result
                .as_ref()
                .and_then(|r| r.domain(domain))
                .and_then(|d| d.scaled_score);
            row.push(or_dash(raw[p.period.index()]));
            row.push(or_dash(scaled));
        }
        table.add_row(row);
    }

    let mut standard = vec!["Standard score".to_string()];
    let mut overall = vec![Cell::new("Interpretation")];
    let mut ages = vec!["Age".to_string()];
    for p in &progress.periods {
        let result = p.result.as_ref();
        standard.push(String::new());
        standard.push(or_dash(result.and_then(|r| r.standard_score)));
        overall.push(Cell::new(""));
        overall.push(match result {
            Some(r) => band_cell(r.interpretation_label(), r.interpretation),
            None => Cell::new(NOT_COMPUTED),
        });
        ages.push(String::new());
        ages.push(p.age.clone().unwrap_or_else(|| NOT_COMPUTED.to_string()));
    }
    table.add_row(standard);
    table.add_row(Row::from(overall));
    table.add_row(ages);

    format!("{} ({})\n{}", progress.name, progress.learner_id, table)
}

fn push_gender(row: &mut Vec<String>, count: GenderCount) {
    row.push(count.male.to_string());
    row.push(count.female.to_string());
}

fn counts_row(mut row: Vec<String>, counts: &SummaryCounts) -> Vec<String> {
    push_gender(&mut row, counts.enrolled);
    push_gender(&mut row, counts.tested);
    for band in Interpretation::ALL {
        push_gender(&mut row, counts.bands.get(band));
    }
    row
}

pub fn render_cohort_table(summary: &CohortSummary) -> String {
    let mut table = new_table();
    let mut header = vec![
        "School".to_string(),
        "Period".to_string(),
        "Enrolled M".to_string(),
        "Enrolled F".to_string(),
        "Tested M".to_string(),
        "Tested F".to_string(),
    ];
    for band in Interpretation::ALL {
        header.push(format!("{} M", band.domain_label()));
        header.push(format!("{} F", band.domain_label()));
    }
    table.set_header(header);

    for row in &summary.rows {
        table.add_row(counts_row(
            vec![row.school_name.clone(), row.period.as_slug().to_string()],
            &row.counts,
        ));
    }
    table.add_row(counts_row(
        vec!["TOTAL".to_string(), summary.selection.to_string()],
        &summary.totals,
    ));

    let mut chart = new_table();
    chart.set_header(vec!["Interpretation", "Learners"]);
    for (band, count) in summary.band_distribution() {
        chart.add_row(Row::from(vec![
            band_cell(band.overall_label(), Some(band)),
            Cell::new(count),
        ]));
    }

    format!("{table}\n{chart}")
}

pub fn render_stats_table(stats: &PopulationStats) -> String {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Learners".to_string(), stats.learners.to_string()]);
    table.add_row(vec!["Male".to_string(), stats.males.to_string()]);
    table.add_row(vec!["Female".to_string(), stats.females.to_string()]);
    table.add_row(vec![
        "Assessed learners".to_string(),
        stats.assessed_learners.to_string(),
    ]);
    table.add_row(vec!["Assessments".to_string(), stats.assessments.to_string()]);
    table.add_row(vec![
        "Schools with assessments".to_string(),
        stats.schools_with_assessments.to_string(),
    ]);
    table.add_row(vec![
        "Mean raw score".to_string(),
        format!("{:.2}", stats.mean_raw_score),
    ]);
    for (domain, mean) in stats.domain_means.iter() {
        table.add_row(vec![format!("Mean {}", domain.label()), format!("{mean:.2}")]);
    }
    table.to_string()
}
