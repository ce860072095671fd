use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use customer_insights::config::{Config, LogFormat};
use customer_insights::models::TrendSeries;
use customer_insights::{dataset, forecast, report, sentiment, summarize, SentimentScorer};

#[derive(Parser)]
#[command(name = "customer-insights")]
#[command(about = "Sentiment, summaries and satisfaction forecast for customer feedback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format; overrides the config file
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the leading feedback entries of a CSV file
    Sentiment {
        #[arg(long)]
        csv: PathBuf,
        /// Emit rows and distribution as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Summarize inline text or one of the leading CSV entries
    #[command(group(
        ArgGroup::new("source")
            .args(["text", "csv"])
            .required(true)
            .multiple(false)
    ))]
    Summarize {
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Zero-based entry index when reading from CSV
        #[arg(long, default_value_t = 0)]
        index: usize,
        #[arg(long)]
        sentences: Option<usize>,
    },
    /// Predict the next period's satisfaction score
    Forecast {
        /// Comma-separated scores; defaults to the configured series
        #[arg(long, value_delimiter = ',')]
        scores: Option<Vec<f64>>,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Write a sample CSV with a feedback column
    Sample {
        #[arg(long, default_value = "sample_feedback.csv")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let log_format = cli.log_format.unwrap_or(config.logging.format);
    setup_tracing(log_format, &config.logging.level, cli.verbose);

    let scorer: SentimentScorer = SentimentScorer::default();

    match cli.command {
        Commands::Sentiment { csv, json } => {
            let records = dataset::load_feedback(&csv)
                .with_context(|| format!("failed to load {}", csv.display()))?;
            let analysis = &config.analysis;
            let sample = &records[..records.len().min(analysis.sample_size)];
            let rows =
                scorer.sentiment_rows(sample, analysis.preview_width, analysis.score_decimals);
            let distribution =
                sentiment::label_distribution(rows.iter().map(|row| row.sentiment));

            if json {
                let payload = serde_json::json!({
                    "rows": rows,
                    "distribution": distribution,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(());
            }

            if rows.is_empty() {
                println!("No feedback entries to analyze.");
                return Ok(());
            }

            println!("Loaded {} entries.", records.len());
            for row in &rows {
                println!("- [{}] {:.3} {}", row.sentiment, row.score, row.feedback);
            }
            println!();
            println!("Sentiment distribution:");
            for entry in &distribution {
                println!("- {}: {}", entry.label, entry.count);
            }
            println!("{}", report::positive_finding(&rows));
        }
        Commands::Summarize {
            text,
            csv,
            index,
            sentences,
        } => {
            let original = match (text, csv) {
                (Some(text), _) => text,
                (None, Some(csv)) => {
                    let records = dataset::load_feedback(&csv)
                        .with_context(|| format!("failed to load {}", csv.display()))?;
                    let chosen =
                        dataset::choose_for_summary(&records, index, config.analysis.summary_choices)?;
                    chosen.text.clone()
                }
                (None, None) => anyhow::bail!("either --text or --csv is required"),
            };

            let max_sentences = sentences.unwrap_or(config.analysis.summary_sentences);
            let summary = summarize::summarize(&original, max_sentences);
            println!("Original:\n{original}\n");
            println!("Summary:\n{}", summary.text);
        }
        Commands::Forecast { scores } => {
            let series = match scores {
                Some(scores) => TrendSeries::from_pairs(
                    scores
                        .into_iter()
                        .enumerate()
                        .map(|(offset, score)| (format!("P{}", offset + 1), score)),
                ),
                None => config.trend.series(),
            };
            let predicted = forecast::forecast_series(&series)?;
            tracing::info!(periods = series.len(), predicted, "forecast computed");
            println!("Predicted next period score: {predicted:.1}");
        }
        Commands::Report { csv, out } => {
            let records = dataset::load_feedback(&csv)
                .with_context(|| format!("failed to load {}", csv.display()))?;
            let preview = dataset::load_preview(&csv, dataset::PREVIEW_ROWS)
                .with_context(|| format!("failed to preview {}", csv.display()))?;
            let generated_on = chrono::Utc::now().date_naive();
            let report = report::build_report(
                &scorer,
                &config,
                generated_on,
                &records,
                &preview,
                &config.trend.series(),
            )?;
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Sample { out } => {
            let file = std::fs::File::create(&out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            dataset::write_sample(file)?;
            println!("Sample CSV written to {}.", out.display());
        }
    }

    Ok(())
}

fn setup_tracing(format: LogFormat, level: &str, verbose: bool) {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("customer_insights=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new(format!("customer_insights={level},warn"))
    };

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
