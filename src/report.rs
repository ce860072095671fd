use std::fmt::Write;

use chrono::NaiveDate;

use crate::config::Config;
use crate::dataset::DataPreview;
use crate::forecast::{self, ForecastError};
use crate::models::{FeedbackRecord, LabelCount, SentimentLabel, SentimentRow, TrendSeries};
use crate::sentiment::{self, PolarityAnalyzer, SentimentScorer};
use crate::summarize;

pub fn positive_finding(rows: &[SentimentRow]) -> String {
    let positive = rows
        .iter()
        .filter(|row| row.sentiment == SentimentLabel::Positive)
        .count();
    format!("{} out of {} feedbacks are positive", positive, rows.len())
}

pub const CONSTRUCTIVE_FINDING: &str = "Most feedback is constructive";

/// Folds line breaks into spaces so a cell stays on one markdown row.
pub fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

pub fn table_cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}

pub fn write_preview_table(output: &mut String, preview: &DataPreview) {
    let header: Vec<String> = preview.headers.iter().map(|cell| table_cell(cell)).collect();
    let _ = writeln!(output, "| {} |", header.join(" | "));
    let _ = writeln!(output, "|{}", " --- |".repeat(header.len()));
    for row in &preview.rows {
        let cells: Vec<String> = row.iter().map(|cell| table_cell(cell)).collect();
        let _ = writeln!(output, "| {} |", cells.join(" | "));
    }
}

pub fn write_sentiment_table(output: &mut String, rows: &[SentimentRow]) {
    let _ = writeln!(output, "| Feedback | Sentiment | Score |");
    let _ = writeln!(output, "| --- | --- | --- |");
    for row in rows {
        let _ = writeln!(
            output,
            "| {} | {} | {} |",
            table_cell(&row.feedback),
            row.sentiment,
            row.score
        );
    }
}

pub fn write_distribution(output: &mut String, distribution: &[LabelCount]) {
    for entry in distribution {
        let _ = writeln!(output, "- {}: {}", entry.label, entry.count);
    }
}

pub fn build_report<A: PolarityAnalyzer>(
    scorer: &SentimentScorer<A>,
    config: &Config,
    generated_on: NaiveDate,
    records: &[FeedbackRecord],
    preview: &DataPreview,
    series: &TrendSeries,
) -> Result<String, ForecastError> {
    let analysis = &config.analysis;
    let sample = &records[..records.len().min(analysis.sample_size)];
    let rows = scorer.sentiment_rows(sample, analysis.preview_width, analysis.score_decimals);
    let distribution = sentiment::label_distribution(rows.iter().map(|row| row.sentiment));

    let scores = series.scores();
    let predicted = forecast::forecast(&scores)?;
    let direction = forecast::trend_direction(&scores)?;

    let mut output = String::new();

    let _ = writeln!(output, "# Customer Insights Report");
    let _ = writeln!(
        output,
        "Generated on {} from {} feedback entries",
        generated_on,
        records.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Data Preview");

    if preview.headers.is_empty() {
        let _ = writeln!(output, "No columns found.");
    } else {
        write_preview_table(&mut output, preview);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Sentiment");

    if rows.is_empty() {
        let _ = writeln!(output, "No feedback entries to analyze.");
    } else {
        write_sentiment_table(&mut output, &rows);
        let _ = writeln!(output);
        let _ = writeln!(output, "### Sentiment Distribution");
        write_distribution(&mut output, &distribution);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Summaries");

    let choices = &records[..records.len().min(analysis.summary_choices)];
    if choices.is_empty() {
        let _ = writeln!(output, "No feedback entries to summarize.");
    } else {
        for (index, record) in choices.iter().enumerate() {
            let summary = summarize::summarize(&record.text, analysis.summary_sentences);
            let _ = writeln!(output, "{}. {}", index + 1, single_line(&record.text));
            let _ = writeln!(output, "   - Summary: {}", summary.text);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Insights");
    let _ = writeln!(output, "Predicted next period score: {predicted:.1}");
    let _ = writeln!(output);
    let _ = writeln!(output, "| Period | Score |");
    let _ = writeln!(output, "| --- | --- |");
    for point in &series.points {
        let _ = writeln!(output, "| {} | {} |", point.period, point.score);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "### Key Findings");
    let _ = writeln!(output, "- {}", positive_finding(&rows));
    let _ = writeln!(output, "- Satisfaction trend is {direction}");
    if let (Some(first), Some(last)) = (series.points.first(), series.points.last()) {
        let _ = writeln!(
            output,
            "- Score moved from {} in {} to {} in {}",
            first.score, first.period, last.score, last.period
        );
    }
    let _ = writeln!(output, "- {CONSTRUCTIVE_FINDING}");

    Ok(output)
}
