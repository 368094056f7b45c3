use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use eccd_scoring::age::{age_at, Age};
use eccd_scoring::cohort::{
    population_stats, summarize_cohort, CohortSummary, JurisdictionFilter, JurisdictionScope,
    PeriodSelection, PopulationStats,
};
use eccd_scoring::config::{Config, ConfigOverrides};
use eccd_scoring::output::csv::{assessments_to_csv, cohort_to_csv};
use eccd_scoring::output::json::render_json;
use eccd_scoring::output::table::{
    render_assessment_table, render_cohort_table, render_progress_table, render_stats_table,
};
use eccd_scoring::scoring::scaled::select_band;
use eccd_scoring::scoring::{AssessmentResult, LearnerProgress, ScoringEngine, SumRangePolicy};
use eccd_scoring::tables::ScoringTables;
use eccd_scoring::types::Population;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "eccd-scoring",
    about = "ECCD checklist scoring and cohort reporting"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Scaled/standard score tables JSON; bundled tables when omitted.
    #[arg(short, long)]
    tables: Option<String>,
    /// Population JSON with schools, learners and assessments.
    #[arg(short, long)]
    data: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(long = "out-of-range")]
    out_of_range: Option<SumRangePolicy>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Age between two dates and the table band it selects.
    Age {
        #[arg(long)]
        birthday: String,
        #[arg(long)]
        on: String,
    },
    Score {
        #[arg(long)]
        learner: String,
        /// first, mid, third or all
        #[arg(long)]
        period: Option<PeriodSelection>,
    },
    Progress {
        #[arg(long)]
        learner: String,
    },
    Report {
        #[arg(long)]
        period: Option<PeriodSelection>,
        /// all, school:<id>, district:<name> or ld:<name>
        #[arg(long, default_value = "all")]
        scope: JurisdictionScope,
    },
    Stats {
        #[arg(long, default_value = "all")]
        scope: JurisdictionScope,
    },
    /// Export the active tables as JSON.
    Tables {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, Serialize)]
struct AgeReport {
    birthday: String,
    evaluated_on: String,
    age: Option<Age>,
    description: Option<String>,
    key: Option<String>,
    band: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        tables_path: cli.tables.clone(),
        out_of_range: cli.out_of_range,
    });
    init_logging(&config);

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }
    if let Commands::Age { birthday, on } = &cli.command {
        return print_age(birthday, on, cli.output);
    }

    let tables = ScoringTables::load_or_builtin(config.resolved_tables_path().as_deref())?;
    let engine = ScoringEngine::new(tables, config.scoring.out_of_range);
    info!("out-of-range scaled sums resolved by {} policy", engine.policy());

    if let Commands::Tables { out } = &cli.command {
        return export_tables(engine.tables(), out.as_deref());
    }

    let data_path = cli
        .data
        .as_deref()
        .ok_or_else(|| anyhow!("--data <population.json> is required for this command"))?;
    let population = Population::load(data_path)?;
    info!(
        "loaded {} learners and {} assessments from {}",
        population.learners.len(),
        population.assessments.len(),
        data_path.display()
    );

    match &cli.command {
        Commands::Score { learner, period } => {
            let learner = population
                .learner(learner)
                .ok_or_else(|| anyhow!("unknown learner: {learner}"))?;
            let selection = match period {
                Some(selection) => *selection,
                None => PeriodSelection::All,
            };
            let results: Vec<AssessmentResult> = selection
                .periods()
                .into_iter()
                .filter_map(|p| population.assessment_for(&learner.id, p))
                .map(|assessment| engine.evaluate(learner, assessment))
                .collect();
            if results.is_empty() {
                warn!("learner {} has no assessment for {selection}", learner.id);
            }
            print_results(&results, cli.output)?;
        }
        Commands::Progress { learner } => {
            let learner = population
                .learner(learner)
                .ok_or_else(|| anyhow!("unknown learner: {learner}"))?;
            let progress =
                LearnerProgress::build(&engine, learner, population.assessments_for(&learner.id));
            print_progress(&progress, cli.output)?;
        }
        Commands::Report { period, scope } => {
            let selection = match period {
                Some(selection) => *selection,
                None => config.default_selection()?,
            };
            let visible = scope.apply(&population);
            let summary = summarize_cohort(&engine, &visible, &visible.schools, selection);
            print_cohort(&summary, cli.output)?;
        }
        Commands::Stats { scope } => {
            let stats = population_stats(&scope.apply(&population));
            print_stats(&stats, cli.output)?;
        }
        Commands::Age { .. } | Commands::Tables { .. } | Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &Path) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn export_tables(tables: &ScoringTables, out: Option<&Path>) -> Result<()> {
    let json = tables.to_json()?;
    match out {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed writing tables: {}", path.display()))?;
            println!("Wrote tables to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn print_age(birthday: &str, on: &str, format: OutputFormat) -> Result<()> {
    let age = age_at(Some(birthday), Some(on));
    let report = AgeReport {
        birthday: birthday.to_string(),
        evaluated_on: on.to_string(),
        age,
        description: age.map(|a| a.to_string()),
        key: age.map(|a| a.composite_key().to_string()),
        band: age.and_then(select_band).map(|b| b.to_string()),
    };
    match format {
        OutputFormat::Table => match report.age {
            Some(age) => println!(
                "{} (key {}, band {})",
                age,
                age.composite_key(),
                report.band.as_deref().unwrap_or("-")
            ),
            None => println!("-"),
        },
        OutputFormat::Json => println!("{}", render_json(&report)?),
        OutputFormat::Csv => {
            warn!("CSV output for age not implemented, using JSON");
            println!("{}", render_json(&report)?);
        }
    }
    Ok(())
}

fn print_results(results: &[AssessmentResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for result in results {
                println!("{}", render_assessment_table(result));
            }
        }
        OutputFormat::Json => println!("{}", render_json(results)?),
        OutputFormat::Csv => println!("{}", assessments_to_csv(results)?),
    }
    Ok(())
}

fn print_progress(progress: &LearnerProgress, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_progress_table(progress)),
        OutputFormat::Json => println!("{}", render_json(progress)?),
        OutputFormat::Csv => {
            let results: Vec<AssessmentResult> = progress
                .periods
                .iter()
                .filter_map(|p| p.result.clone())
                .collect();
            println!("{}", assessments_to_csv(&results)?);
        }
    }
    Ok(())
}

fn print_cohort(summary: &CohortSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_cohort_table(summary)),
        OutputFormat::Json => println!("{}", render_json(summary)?),
        OutputFormat::Csv => println!("{}", cohort_to_csv(summary)?),
    }
    Ok(())
}

fn print_stats(stats: &PopulationStats, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_stats_table(stats)),
        OutputFormat::Json => println!("{}", render_json(stats)?),
        OutputFormat::Csv => {
            warn!("CSV output for stats not implemented, using JSON");
            println!("{}", render_json(stats)?);
        }
    }
    Ok(())
}
