//! Sentence-level sentiment scoring against a [`Lexicon`].
//!
//! Each whitespace-separated token is looked up for every configured
//! part-of-speech tag. Hits are averaged into a token score; the token
//! scores are then averaged over the sentence and scaled to a percentage.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::classifier::{classify, Classification};
use crate::error::{LexiconError, Result};
use crate::lexicon::Lexicon;

/// Tags looked up when none are configured: adjective, then noun
pub const DEFAULT_POS_TAGS: [&str; 2] = ["a", "n"];

/// Normalize, lowercase and split a sentence on whitespace
pub fn tokenize(sentence: &str) -> Vec<String> {
    let normalized: String = sentence.nfc().collect();
    normalized
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Result of scoring one sentence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentenceScore {
    /// Mean token score times 100
    pub positivity_percent: f64,
    /// `activity_count + passivity_count`
    pub emotion_number: f64,
    /// Every token, matched or not
    pub token_count: usize,
    /// Tokens with at least one lexicon hit
    pub matched_tokens: usize,
    /// Tokens with a score above zero
    pub activity_count: i64,
    /// Minus the number of tokens with a score of zero or below
    pub passivity_count: i64,
}

impl SentenceScore {
    /// Classify this score
    pub fn classify(&self) -> Classification {
        classify(self.positivity_percent, self.emotion_number)
    }
}

/// Per-sentence running totals
#[derive(Debug, Clone, Default)]
pub struct SentenceAccumulator {
    positivity_sum: f64,
    token_count: usize,
    matched_tokens: usize,
    activity_count: i64,
    passivity_count: i64,
}

impl SentenceAccumulator {
    pub fn new() -> Self {
        SentenceAccumulator::default()
    }

    /// Add one token. `None` means no tag resolved; it counts as a zero score
    pub fn push(&mut self, token_score: Option<f64>) {
        let score = match token_score {
            Some(score) => {
                self.matched_tokens += 1;
                score
            }
            None => 0.0,
        };

        self.positivity_sum += score;
        if score > 0.0 {
            self.activity_count += 1;
        } else {
            self.passivity_count -= 1;
        }
        self.token_count += 1;
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Turn the totals into a [`SentenceScore`]
    pub fn finish(self) -> Result<SentenceScore> {
        if self.token_count == 0 {
            return Err(LexiconError::EmptySentence);
        }

        Ok(SentenceScore {
            positivity_percent: self.positivity_sum / self.token_count as f64 * 100.0,
            emotion_number: (self.activity_count + self.passivity_count) as f64,
            token_count: self.token_count,
            matched_tokens: self.matched_tokens,
            activity_count: self.activity_count,
            passivity_count: self.passivity_count,
        })
    }
}

/// Scores sentences against a shared lexicon
#[derive(Debug, Clone)]
pub struct SentenceScorer {
    /// The lexicon (shared reference)
    lexicon: Arc<Lexicon>,
    /// Tags looked up for each token, in order
    pos_tags: Vec<String>,
}

impl SentenceScorer {
    /// Create a scorer probing the default `a`, `n` tags
    pub fn new(lexicon: Lexicon) -> Self {
        Self::with_arc(Arc::new(lexicon))
    }

    /// Create a scorer with a shared lexicon reference
    pub fn with_arc(lexicon: Arc<Lexicon>) -> Self {
        SentenceScorer {
            lexicon,
            pos_tags: DEFAULT_POS_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Replace the tags looked up
    pub fn with_pos_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pos_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Get the Arc reference to the lexicon (for sharing)
    pub fn lexicon_arc(&self) -> Arc<Lexicon> {
        Arc::clone(&self.lexicon)
    }

    pub fn pos_tags(&self) -> &[String] {
        &self.pos_tags
    }

    /// Score a raw sentence
    pub fn score(&self, sentence: &str) -> Result<SentenceScore> {
        self.score_tokens(&tokenize(sentence))
    }

    /// Score tokens that were already lowercased and split
    pub fn score_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<SentenceScore> {
        let mut acc = SentenceAccumulator::new();
        for token in tokens {
            acc.push(self.token_score(token.as_ref()));
        }
        acc.finish()
    }

    /// Average score of a token over the tags that resolve, `None` if none do
    pub fn token_score(&self, token: &str) -> Option<f64> {
        let mut sum = 0.0;
        let mut hits = 0usize;

        for tag in &self.pos_tags {
            match self.lexicon.lookup(token, tag) {
                Ok(score) => {
                    sum += score;
                    hits += 1;
                }
                Err(err) if err.is_not_found() => {}
                Err(err) => {
                    debug!(token, tag = %tag, error = %err, "unexpected lookup failure");
                }
            }
        }

        if hits == 0 {
            debug!(token, "no lexicon entry for token");
            return None;
        }

        let score = sum / hits as f64;
        debug!(token, hits, score, "token scored");
        Some(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_lexicon() -> Lexicon {
        let tsv = "a\t00000001\t0.5\t0.25\tgood#1\tdesc\n\
a\t00000002\t0\t0.75\tawful#1\tdesc\n\
n\t00000003\t0.5\t0\tday#1\tdesc\n\
a\t00000004\t0.25\t0\tday#1\tdesc\n";
        Lexicon::from_tsv(tsv).unwrap()
    }

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(tokenize("  Good   DAY\tto you "), vec!["good", "day", "to", "you"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_single_adjective() {
        let scorer = SentenceScorer::new(make_test_lexicon());
        let score = scorer.score("good").unwrap();

        assert_eq!(score.positivity_percent, 25.0);
        assert_eq!(score.activity_count, 1);
        assert_eq!(score.passivity_count, 0);
        assert_eq!(score.emotion_number, 1.0);
        assert_eq!(score.token_count, 1);
    }

    #[test]
    fn test_token_averages_over_hits() {
        let scorer = SentenceScorer::new(make_test_lexicon());
        // day#a = 0.25, day#n = 0.5
        assert_eq!(scorer.token_score("day"), Some(0.375));
        assert_eq!(scorer.token_score("nothing"), None);
    }

    #[test]
    fn test_out_of_vocabulary_tokens_still_counted() {
        let scorer = SentenceScorer::new(make_test_lexicon());
        let score = scorer.score("zzz qqq xxx").unwrap();

        assert_eq!(score.token_count, 3);
        assert_eq!(score.matched_tokens, 0);
        assert_eq!(score.positivity_percent, 0.0);
        assert_eq!(score.passivity_count, -3);
        assert_eq!(score.emotion_number, -3.0);
    }

    #[test]
    fn test_mixed_sentence() {
        let scorer = SentenceScorer::new(make_test_lexicon());
        let score = scorer.score("Good awful unknown").unwrap();

        // (0.25 - 0.75 + 0) / 3 * 100
        assert!((score.positivity_percent - (-50.0 / 3.0)).abs() < 1e-9);
        assert_eq!(score.activity_count, 1);
        assert_eq!(score.passivity_count, -2);
        assert_eq!(score.emotion_number, -1.0);
        assert_eq!(score.matched_tokens, 2);
    }

    #[test]
    fn test_empty_sentence() {
        let scorer = SentenceScorer::new(make_test_lexicon());
        assert!(matches!(scorer.score(""), Err(LexiconError::EmptySentence)));
        assert!(matches!(
            scorer.score(" \t "),
            Err(LexiconError::EmptySentence)
        ));
    }

    #[test]
    fn test_custom_pos_tags() {
        let scorer = SentenceScorer::new(make_test_lexicon()).with_pos_tags(["n"]);
        assert_eq!(scorer.token_score("day"), Some(0.5));
        assert_eq!(scorer.token_score("good"), None);
    }

    #[test]
    fn test_score_tokens_skips_normalization() {
        let scorer = SentenceScorer::new(make_test_lexicon());
        let score = scorer.score_tokens(&["GOOD"]).unwrap();
        assert_eq!(score.matched_tokens, 0);
    }

    #[test]
    fn test_arc_sharing() {
        let scorer1 = SentenceScorer::new(make_test_lexicon());
        let scorer2 = SentenceScorer::with_arc(scorer1.lexicon_arc());

        assert_eq!(
            scorer1.score("good day").unwrap(),
            scorer2.score("good day").unwrap()
        );
    }

    #[test]
    fn test_concurrent_scoring() {
        let scorer = SentenceScorer::new(make_test_lexicon());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let scorer = scorer.clone();
                std::thread::spawn(move || scorer.score("good day").unwrap())
            })
            .collect();

        let expected = scorer.score("good day").unwrap();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
