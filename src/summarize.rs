use crate::models::SummaryResult;

pub const DEFAULT_MAX_SENTENCES: usize = 2;
pub const MIN_SENTENCE_CHARS: usize = 10;

/// Extractive summary: the first `max_sentences` period-delimited fragments
/// longer than ten characters, rejoined with ". " and closed with a period.
pub fn summarize(text: &str, max_sentences: usize) -> SummaryResult {
    let sentences: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
        .take(max_sentences)
        .collect();

    SummaryResult {
        text: format!("{}.", sentences.join(". ")),
    }
}
