//! Runtime settings for the insights CLI.
//!
//! Values start from defaults, are optionally replaced by a TOML file and are
//! finally overridden by `INSIGHTS_*` environment variables.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TrendSeries;
use crate::summarize::DEFAULT_MAX_SENTENCES;

/// Beyond this many decimals the rounding factor leaves f64's exact range.
pub const MAX_SCORE_DECIMALS: u32 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub trend: TrendConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Leading records scored for the sentiment table
    pub sample_size: usize,

    /// Leading records offered for summarization
    pub summary_choices: usize,

    pub summary_sentences: usize,

    /// Characters of feedback shown before truncating with "..."
    pub preview_width: usize,

    pub score_decimals: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_size: 10,
            summary_choices: 5,
            summary_sentences: DEFAULT_MAX_SENTENCES,
            preview_width: 80,
            score_decimals: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub periods: Vec<String>,
    pub scores: Vec<f64>,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            periods: ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]
                .iter()
                .map(|month| month.to_string())
                .collect(),
            scores: vec![72.0, 75.0, 78.0, 74.0, 79.0, 76.0],
        }
    }
}

impl TrendConfig {
    pub fn series(&self) -> TrendSeries {
        TrendSeries::from_pairs(
            self.periods
                .iter()
                .cloned()
                .zip(self.scores.iter().copied()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error)]
#[error("unknown log format {0:?} (expected text or json)")]
pub struct UnknownLogFormat(String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(UnknownLogFormat(value.to_string())),
        }
    }
}

impl Config {
    /// Defaults or the given TOML file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overrides from `INSIGHTS_*` variables; `lookup` abstracts the environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("INSIGHTS_SAMPLE_SIZE") {
            self.analysis.sample_size = parse_var("INSIGHTS_SAMPLE_SIZE", &value)?;
        }
        if let Some(value) = lookup("INSIGHTS_SUMMARY_CHOICES") {
            self.analysis.summary_choices = parse_var("INSIGHTS_SUMMARY_CHOICES", &value)?;
        }
        if let Some(value) = lookup("INSIGHTS_SUMMARY_SENTENCES") {
            self.analysis.summary_sentences = parse_var("INSIGHTS_SUMMARY_SENTENCES", &value)?;
        }
        if let Some(value) = lookup("INSIGHTS_PREVIEW_WIDTH") {
            self.analysis.preview_width = parse_var("INSIGHTS_PREVIEW_WIDTH", &value)?;
        }
        if let Some(value) = lookup("INSIGHTS_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = lookup("INSIGHTS_LOG_FORMAT") {
            self.logging.format = parse_var("INSIGHTS_LOG_FORMAT", &value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.analysis.sample_size == 0 {
            anyhow::bail!("sample_size must be greater than 0");
        }

        if self.analysis.summary_choices == 0 {
            anyhow::bail!("summary_choices must be greater than 0");
        }

        if self.analysis.preview_width == 0 {
            anyhow::bail!("preview_width must be greater than 0");
        }

        if self.analysis.score_decimals > MAX_SCORE_DECIMALS {
            anyhow::bail!(
                "score_decimals must be at most {MAX_SCORE_DECIMALS}, got {}",
                self.analysis.score_decimals
            );
        }

        if self.trend.scores.is_empty() {
            anyhow::bail!("trend series must contain at least one score");
        }

        if self.trend.periods.len() != self.trend.scores.len() {
            anyhow::bail!(
                "trend has {} periods but {} scores",
                self.trend.periods.len(),
                self.trend.scores.len()
            );
        }

        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("invalid value for {key}: {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_match_dashboard() {
        let config = Config::default();
        assert_eq!(config.analysis.sample_size, 10);
        assert_eq!(config.analysis.summary_choices, 5);
        assert_eq!(config.analysis.summary_sentences, 2);
        assert_eq!(config.analysis.preview_width, 80);
        assert_eq!(config.trend.series().len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_only_given_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[analysis]\nsample_size = 3\n\n[trend]\nperiods = [\"Q1\", \"Q2\"]\nscores = [60.0, 64.0]\n"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.analysis.sample_size, 3);
        assert_eq!(config.analysis.preview_width, 80);
        assert_eq!(config.trend.scores, vec![60.0, 64.0]);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("INSIGHTS_SAMPLE_SIZE", "4"),
            ("INSIGHTS_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env(|key| vars.get(key).map(|value| value.to_string()))
            .unwrap();
        assert_eq!(config.analysis.sample_size, 4);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn invalid_env_value_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(|key| (key == "INSIGHTS_PREVIEW_WIDTH").then(|| "wide".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("INSIGHTS_PREVIEW_WIDTH"));
    }

    #[test]
    fn validate_rejects_bad_trend() {
        let mut config = Config::default();
        config.trend.scores.pop();
        assert!(config.validate().is_err());

        config.trend.periods.clear();
        config.trend.scores.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analysis.sample_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_bounds_score_decimals() {
        let mut config = Config::default();
        config.analysis.score_decimals = MAX_SCORE_DECIMALS;
        assert!(config.validate().is_ok());

        config.analysis.score_decimals = 400;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("score_decimals"));

        config.analysis.score_decimals = u32::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_summary_choices() {
        let mut config = Config::default();
        config.analysis.summary_choices = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("summary_choices"));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(|key| (key == "INSIGHTS_LOG_FORMAT").then(|| "jsn".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("INSIGHTS_LOG_FORMAT"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nformat = \"jsn\"\n").unwrap();
        assert!(Config::from_file(file.path()).is_err());

        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
    }
}
