//! The SentiWordNet lexicon and its builder.
//!
//! Loading is a two-stage pipeline: records are folded into a
//! [`TermSenseTable`], which [`LexiconBuilder::build`] then collapses into
//! one rank-weighted score per `term#pos`. The resulting [`Lexicon`] is
//! immutable and meant to be shared behind an `Arc`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{LexiconError, Result};
use crate::record::parse_line;
use crate::synset::{term_key, TermSenseTable};

/// What to do with a line that does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail the whole load on the first malformed line
    #[default]
    Abort,
    /// Log the line, count it, and keep going
    Skip,
}

/// Counters collected while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read, comments included
    pub lines: usize,
    /// Data lines parsed into records
    pub records: usize,
    /// Malformed lines skipped under [`MalformedPolicy::Skip`]
    pub skipped: usize,
    /// Sense ranks overwritten by a later record
    pub duplicate_ranks: usize,
}

/// Final `term#pos -> score` table
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, f64>,
    stats: LoadStats,
}

impl Lexicon {
    /// Build a lexicon from a line source, aborting on the first bad line
    pub fn build<I, S>(lines: I) -> Result<Lexicon>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        let mut builder = LexiconBuilder::new();
        builder.load_lines(lines)?;
        Ok(builder.build())
    }

    /// Build a lexicon from TSV content held in memory
    pub fn from_tsv(tsv_content: &str) -> Result<Lexicon> {
        let mut builder = LexiconBuilder::new();
        builder.load_tsv(tsv_content)?;
        Ok(builder.build())
    }

    /// Build a lexicon from a SentiWordNet file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Lexicon> {
        let mut builder = LexiconBuilder::new();
        builder.load_file(path)?;
        Ok(builder.build())
    }

    /// Exact lookup of `term#pos`.
    ///
    /// No case folding happens here; callers lowercase terms first.
    pub fn lookup(&self, term: &str, pos: &str) -> Result<f64> {
        self.get(term, pos).ok_or_else(|| LexiconError::NotFound {
            term: term.to_string(),
            pos: pos.to_string(),
        })
    }

    /// Like [`Lexicon::lookup`] but without building an error on a miss
    pub fn get(&self, term: &str, pos: &str) -> Option<f64> {
        self.entries.get(&term_key(term, pos)).copied()
    }

    pub fn contains(&self, term: &str, pos: &str) -> bool {
        self.entries.contains_key(&term_key(term, pos))
    }

    /// Number of `term#pos` entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(term#pos, score)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Counters from the load that produced this lexicon
    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

/// Builder for loading a [`Lexicon`] from SentiWordNet TSV sources
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    table: TermSenseTable,
    policy: MalformedPolicy,
    stats: LoadStats,
}

impl LexiconBuilder {
    /// Create a builder that aborts on malformed lines
    pub fn new() -> Self {
        LexiconBuilder::default()
    }

    /// Create a builder with an explicit malformed-line policy
    pub fn with_policy(policy: MalformedPolicy) -> Self {
        LexiconBuilder {
            policy,
            ..Default::default()
        }
    }

    /// Load records from a TSV string
    pub fn load_tsv(&mut self, tsv_content: &str) -> Result<()> {
        self.load_lines(tsv_content.lines().map(Ok::<_, io::Error>))
    }

    /// Load records from a buffered reader
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.load_lines(reader.lines())
    }

    /// Load records from a file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening lexicon file");
        let file = File::open(path)?;
        self.load_reader(BufReader::new(file))
    }

    /// Load records from a forward-only line source.
    ///
    /// Line numbers in errors are 1-based and local to this source.
    pub fn load_lines<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        for (idx, line) in lines.into_iter().enumerate() {
            let line_number = idx + 1;
            let line = line?;
            self.stats.lines += 1;

            let record = match parse_line(line.as_ref(), line_number) {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(err) => match self.policy {
                    MalformedPolicy::Abort => return Err(err),
                    MalformedPolicy::Skip => {
                        warn!(error = %err, "skipping malformed lexicon line");
                        self.stats.skipped += 1;
                        continue;
                    }
                },
            };

            self.stats.records += 1;
            for dup in self.table.insert_record(&record) {
                warn!(
                    key = %dup.key,
                    rank = dup.rank,
                    previous = dup.previous,
                    replacement = dup.replacement,
                    line = line_number,
                    "duplicate sense rank, keeping the later score"
                );
                self.stats.duplicate_ranks += 1;
            }
        }

        Ok(())
    }

    /// Counters collected so far
    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    /// Collapse the sense table and return the immutable lexicon
    pub fn build(self) -> Lexicon {
        let entries = self.table.into_weighted_scores();
        info!(
            entries = entries.len(),
            records = self.stats.records,
            skipped = self.stats.skipped,
            duplicate_ranks = self.stats.duplicate_ranks,
            "lexicon built"
        );

        Lexicon {
            entries,
            stats: self.stats,
        }
    }
}
