//! # sentiword-rs
//!
//! Sentence sentiment and emotion scoring backed by SentiWordNet.
//!
//! Every term of the lexicon appears in several synsets, one per sense, each
//! with its own positive and negative score. Loading collapses those into a
//! single score per `term#pos`, weighting the more common senses higher.
//! Sentences are then scored token by token and classified.
//!
//! ## Quick Start
//!
//! ```rust
//! use sentiword_rs::{Lexicon, SentenceScorer};
//!
//! // Build a lexicon from SentiWordNet TSV data
//! let tsv = "a\t00000001\t0.5\t0.25\tgood#1\tdesc\nn\t00000002\t0.125\t0\tday#1\tdesc";
//! let lexicon = Lexicon::from_tsv(tsv).unwrap();
//! assert_eq!(lexicon.lookup("good", "a").unwrap(), 0.25);
//!
//! // Score a sentence, looking up adjectives then nouns
//! let scorer = SentenceScorer::new(lexicon);
//! let score = scorer.score("Good day").unwrap();
//! let classification = score.classify();
//!
//! println!("{}% -> {}", score.positivity_percent, classification.label());
//! ```
//!
//! ## Loading Options
//!
//! By default the first malformed line aborts the load. [`LexiconBuilder`]
//! can be told to skip such lines instead:
//!
//! ```rust
//! use sentiword_rs::{LexiconBuilder, MalformedPolicy};
//!
//! let mut builder = LexiconBuilder::with_policy(MalformedPolicy::Skip);
//! builder.load_tsv("a\t1\t0.5\t0\tgood#1\tdesc\nnot a record").unwrap();
//! let lexicon = builder.build();
//! assert_eq!(lexicon.stats().skipped, 1);
//! ```
//!
//! ## Python Bindings
//!
//! This library can be compiled as a Python extension module with the
//! `python` feature.

pub mod classifier;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod record;
pub mod scorer;
pub mod session;
pub mod synset;

#[cfg(feature = "download")]
pub mod download;

// Python bindings (only compiled when the "python" feature is enabled)
#[cfg(feature = "python")]
pub mod python;

// Re-export main types for convenience
pub use classifier::{classify, Classification, Emotion, Sentiment};
pub use config::{LexiconLocation, ScorerConfig};
pub use error::{LexiconError, Result};
pub use lexicon::{Lexicon, LexiconBuilder, LoadStats, MalformedPolicy};
pub use record::{parse_line, LexiconRecord};
pub use scorer::{tokenize, SentenceAccumulator, SentenceScore, SentenceScorer};
pub use synset::{DuplicateRank, TermSenseTable};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
