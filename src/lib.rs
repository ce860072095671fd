//! customer-insights - lightweight analysis of free-text customer feedback
//!
//! Three independent, stateless components make up the pipeline:
//!
//! - [`sentiment`] - polarity scoring and Positive/Neutral/Negative labels
//! - [`summarize`] - extractive summaries built from the leading sentences
//! - [`forecast`] - mean-plus-bias estimate of the next period's score
//!
//! [`dataset`], [`config`] and [`report`] serve the command-line caller that
//! loads CSV feedback and renders the results.

pub mod config;
pub mod dataset;
pub mod forecast;
pub mod lexicon;
pub mod models;
pub mod report;
pub mod sentiment;
pub mod summarize;

pub use forecast::{forecast, ForecastError};
pub use lexicon::Lexicon;
pub use models::{FeedbackRecord, SentimentLabel, SentimentResult, SummaryResult, TrendSeries};
pub use sentiment::{classify, PolarityAnalyzer, SentimentScorer};
pub use summarize::summarize;
