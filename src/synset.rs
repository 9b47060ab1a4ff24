//! Aggregation of synset scores per term and sense rank.
//!
//! Every `word#rank` entry of a record contributes the record's synset score
//! to the `word#pos` key under that rank. Ranks are kept in a `BTreeMap` so
//! the weighted average is always summed in rank order.

use std::collections::{BTreeMap, HashMap};

use crate::record::LexiconRecord;

/// Build the composite `term#pos` key used by the lexicon
pub fn term_key(term: &str, pos: &str) -> String {
    let mut key = String::with_capacity(term.len() + pos.len() + 1);
    key.push_str(term);
    key.push('#');
    key.push_str(pos);
    key
}

/// A sense rank that was seen twice for the same term; the later score wins
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateRank {
    pub key: String,
    pub rank: u32,
    pub previous: f64,
    pub replacement: f64,
}

/// `term#pos -> (sense rank -> synset score)`
#[derive(Debug, Default, Clone)]
pub struct TermSenseTable {
    entries: HashMap<String, BTreeMap<u32, f64>>,
}

impl TermSenseTable {
    pub fn new() -> Self {
        TermSenseTable::default()
    }

    /// Number of distinct `term#pos` keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold one record into the table.
    ///
    /// Returns the overwritten ranks, if any. Terms are visited in line order.
    pub fn insert_record(&mut self, record: &LexiconRecord) -> Vec<DuplicateRank> {
        let score = record.synset_score();
        let mut pos_buf = [0u8; 4];
        let pos: &str = record.pos.encode_utf8(&mut pos_buf);
        let mut duplicates = Vec::new();

        for (term, rank) in &record.terms {
            let key = term_key(term, pos);
            let senses = self.entries.entry(key).or_default();

            if let Some(previous) = senses.insert(*rank, score) {
                duplicates.push(DuplicateRank {
                    key: term_key(term, pos),
                    rank: *rank,
                    previous,
                    replacement: score,
                });
            }
        }

        duplicates
    }

    /// Sense scores recorded for a key, ordered by rank
    pub fn senses(&self, key: &str) -> Option<&BTreeMap<u32, f64>> {
        self.entries.get(key)
    }

    /// Collapse the table into one weighted score per key
    pub(crate) fn into_weighted_scores(self) -> HashMap<String, f64> {
        self.entries
            .into_iter()
            .map(|(key, senses)| {
                let score = weighted_score(&senses);
                (key, score)
            })
            .collect()
    }
}

/// Rank-weighted average of sense scores.
///
/// Sense `r` has weight `1/r`, so the most common senses dominate:
/// `(Σ s_r / r) / (Σ 1 / r)`. A single sense returns its score unchanged.
pub fn weighted_score(senses: &BTreeMap<u32, f64>) -> f64 {
    let mut score = 0.0;
    let mut weight = 0.0;

    for (&rank, &synset_score) in senses {
        let rank = f64::from(rank);
        score += synset_score / rank;
        weight += 1.0 / rank;
    }

    if weight == 0.0 {
        // only reachable with an empty map, which the table never stores
        return 0.0;
    }

    score / weight
}
