use std::collections::HashMap;
use std::fmt::Display;

use crate::lexicon::Lexicon;
use crate::models::{FeedbackRecord, LabelCount, SentimentLabel, SentimentResult, SentimentRow};

pub const POSITIVE_THRESHOLD: f64 = 0.1;
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Source of a polarity value in [-1, 1] for a piece of text.
pub trait PolarityAnalyzer {
    fn polarity(&self, text: &str) -> f64;
}

impl<F> PolarityAnalyzer for F
where
    F: Fn(&str) -> f64,
{
    fn polarity(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Thresholds are strict: exactly 0.1 and -0.1 stay neutral.
pub fn classify(score: f64) -> SentimentLabel {
    if score > POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score < NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub struct SentimentScorer<A = Lexicon> {
    analyzer: A,
}

impl Default for SentimentScorer<Lexicon> {
    fn default() -> Self {
        Self::new(Lexicon::new())
    }
}

impl<A: PolarityAnalyzer> SentimentScorer<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn score(&self, text: &str) -> SentimentResult {
        let raw = self.analyzer.polarity(text);
        // NaN from a custom analyzer degrades to neutral instead of propagating.
        let score = if raw.is_finite() {
            raw.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        SentimentResult {
            label: classify(score),
            score,
        }
    }

    pub fn score_display<T: Display + ?Sized>(&self, value: &T) -> SentimentResult {
        self.score(&value.to_string())
    }

    pub fn score_records(&self, records: &[FeedbackRecord]) -> Vec<SentimentResult> {
        records
            .iter()
            .map(|record| {
                let result = self.score(&record.text);
                tracing::debug!(label = %result.label, score = result.score, "scored feedback");
                result
            })
            .collect()
    }

    pub fn sentiment_rows(
        &self,
        records: &[FeedbackRecord],
        preview_width: usize,
        decimals: u32,
    ) -> Vec<SentimentRow> {
        records
            .iter()
            .zip(self.score_records(records))
            .map(|(record, result)| SentimentRow {
                feedback: preview(&record.text, preview_width),
                sentiment: result.label,
                score: round_to(result.score, decimals),
            })
            .collect()
    }
}

pub fn preview(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Half-to-even on the scaled value, so 0.0625 at three places gives 0.062.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(i32::MAX as u32) as i32);
    let rounded = (value * factor).round_ties_even() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Label counts, most frequent first; ties keep Positive/Neutral/Negative order.
pub fn label_distribution(labels: impl IntoIterator<Item = SentimentLabel>) -> Vec<LabelCount> {
    let mut counts: HashMap<SentimentLabel, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut values: Vec<LabelCount> = SentimentLabel::ALL
        .iter()
        .filter_map(|label| {
            counts.get(label).map(|count| LabelCount {
                label: *label,
                count: *count,
            })
        })
        .collect();
    values.sort_by(|a, b| b.count.cmp(&a.count));
    values
}
