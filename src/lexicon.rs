//! Word-level polarity lexicon used as the default sentiment backend.
//!
//! Each known word carries a polarity in [-1, 1]. A text's polarity is the
//! mean over the words it matched, after applying modifiers from the tokens
//! directly in front of each match:
//!
//! - an intensifier ("very", "extremely", ...) scales the polarity
//! - a negation ("not", "never", ...) multiplies it by -0.5

use std::collections::HashMap;

use crate::sentiment::PolarityAnalyzer;

const NEGATION_FACTOR: f64 = -0.5;

const POLARITY_WORDS: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("clean", 0.37),
    ("convenient", 0.5),
    ("easy", 0.43),
    ("efficient", 0.5),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("friendly", 0.38),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("impressive", 1.0),
    ("love", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleased", 0.5),
    ("polite", 0.3),
    ("quick", 0.33),
    ("recommend", 0.3),
    ("reliable", 0.5),
    ("satisfied", 0.5),
    ("smooth", 0.4),
    ("superb", 1.0),
    ("wonderful", 1.0),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("broken", -0.4),
    ("cheap", -0.1),
    ("confusing", -0.3),
    ("damaged", -0.5),
    ("difficult", -0.5),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("dirty", -0.6),
    ("expensive", -0.5),
    ("frustrating", -0.4),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("late", -0.3),
    ("poor", -0.4),
    ("rude", -0.3),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("unhappy", -0.6),
    ("unhelpful", -0.5),
    ("useless", -0.5),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.3),
    ("super", 1.3),
    ("too", 1.2),
    ("very", 1.3),
    ("fairly", 0.8),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "cannot", "cant", "dont", "doesnt", "didnt",
    "isnt", "wasnt", "arent", "werent", "wont", "wouldnt", "hardly", "barely",
];

#[derive(Debug, Clone)]
pub struct Lexicon {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            words: POLARITY_WORDS
                .iter()
                .map(|(word, polarity)| (word.to_string(), *polarity))
                .collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(word, factor)| (word.to_string(), *factor))
                .collect(),
            negations: NEGATIONS.iter().map(|word| word.to_string()).collect(),
        }
    }

    pub fn polarity_of(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    pub fn insert(&mut self, word: &str, polarity: f64) {
        self.words.insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
    }

    fn intensity_of(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|negation| negation == word)
    }

    /// Mean polarity of the matched words, clamped to [-1, 1].
    pub fn analyze(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let mut matched: Vec<f64> = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            let Some(base) = self.polarity_of(token) else {
                continue;
            };

            let mut polarity = base;
            let mut cursor = index;

            // Walk back over modifiers: "not very good" negates the intensified word.
            while cursor > 0 {
                let previous = tokens[cursor - 1].as_str();
                if let Some(factor) = self.intensity_of(previous) {
                    polarity *= factor;
                } else if self.is_negation(previous) {
                    polarity *= NEGATION_FACTOR;
                } else {
                    break;
                }
                cursor -= 1;
            }

            matched.push(polarity.clamp(-1.0, 1.0));
        }

        if matched.is_empty() {
            return 0.0;
        }

        let mean = matched.iter().sum::<f64>() / matched.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl PolarityAnalyzer for Lexicon {
    fn polarity(&self, text: &str) -> f64 {
        self.analyze(text)
    }
}

/// Lowercase word tokens with apostrophes folded away ("don't" -> "dont").
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|token| {
            token
                .chars()
                .filter(|c| *c != '\'' && *c != '\u{2019}')
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .collect()
}
