use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use chrono::{Days, Utc};
use clap::Parser;
use postdigest_core::{AppConfig, Summarizer, WeeklyReport};
use postdigest_db::PgPostStore;
use postdigest_llm::OpenAiSummarizer;
use postdigest_report::{narrative_file_name, report_file_name, save_narrative, save_report, Aggregator};
use tracing_subscriber::EnvFilter;

/// Allow-list to report on, resolved as `<accounts_dir>/<name>.txt`.
const ACCOUNTS_LIST: &str = "ai-og";
const DAY_COUNT: u32 = 7;

#[derive(Debug, Parser)]
#[command(name = "postdigest")]
#[command(version, about = "Generate the weekly post activity report")]
struct Cli {}

#[tokio::main]
async fn main() -> ExitCode {
    Cli::parse();

    match run().await {
        Ok(()) => {
            println!("Weekly report generation completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = postdigest_core::load_app_config()?;
    init_tracing(&config)?;

    tracing::debug!(?config, "configuration loaded");

    let allow_list = postdigest_core::load_allow_list(&config.accounts_dir, ACCOUNTS_LIST)?;
    tracing::info!(list = ACCOUNTS_LIST, accounts = allow_list.len(), "allow-list loaded");
    tracing::debug!(members = ?allow_list.iter().collect::<Vec<_>>(), "allow-list members");

    let pool_config = postdigest_db::PoolConfig::from_app_config(&config);
    let pool = postdigest_db::connect_pool(&config.database_url, pool_config)
        .await
        .context("failed to connect to database")?;
    postdigest_db::ping(&pool)
        .await
        .context("database is not reachable")?;
    let store = PgPostStore::new(pool, config.posts_table.clone());

    let summarizer = build_summarizer(&config)?;
    let summarizer_ref = summarizer.as_ref().map(|s| s as &dyn Summarizer);

    let today = Utc::now().date_naive();
    let start_date = today
        .checked_sub_days(Days::new(u64::from(DAY_COUNT)))
        .context("start date out of range")?;

    println!("Starting report generation for {ACCOUNTS_LIST} accounts...");

    let aggregator = Aggregator::new(&store, summarizer_ref, &allow_list);
    let run = aggregator.aggregate_week(start_date, DAY_COUNT).await?;
    let report = run.report;

    for skipped in &run.skipped {
        println!("Warning: no report for {}: {}", skipped.date, skipped.reason);
    }

    persist(&report, &config.reports_dir, ACCOUNTS_LIST)?;

    println!("\n{}", report.overall_summary);

    Ok(())
}

/// Write the JSON report and the narrative into `reports_dir`.
///
/// Only the JSON report is required; a narrative write failure is reported
/// and swallowed. Returns the JSON report path.
fn persist(report: &WeeklyReport, reports_dir: &Path, list_name: &str) -> anyhow::Result<PathBuf> {
    let report_path =
        reports_dir.join(report_file_name(list_name, report.start_date, report.end_date));
    save_report(report, &report_path).context("failed to save report")?;
    println!("Report saved to: {}", report_path.display());

    let narrative_path =
        reports_dir.join(narrative_file_name(list_name, report.start_date, report.end_date));
    match save_narrative(&report.overall_summary, &narrative_path) {
        Ok(()) => println!("Summary saved to: {}", narrative_path.display()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to save text summary");
            println!("Warning: Failed to save text summary: {e}");
        }
    }

    Ok(report_path)
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

fn build_summarizer(config: &AppConfig) -> anyhow::Result<Option<OpenAiSummarizer>> {
    let Some(api_key) = config.openai_api_key.as_deref() else {
        tracing::warn!("OPENAI_API_KEY not set; summaries will use fallback templates");
        return Ok(None);
    };

    let client = OpenAiSummarizer::with_base_url(
        api_key,
        &config.openai_model,
        config.llm_timeout_secs,
        &config.openai_base_url,
    )
    .context("failed to build summarizer client")?;
    tracing::info!(model = client.model(), "summarizer configured");

    Ok(Some(client))
}
