//! Parsing of single SentiWordNet resource lines.
//!
//! A data line has six tab-separated fields:
//!
//! ```text
//! POS  ID        PosScore  NegScore  SynsetTerms                        Gloss
//! a    00009618  0.5       0.25      spartan#4 austere#3 ascetical#2    practicing great self-denial
//! ```
//!
//! Lines starting with `#` are comments. Blank lines are not allowed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{LexiconError, Result};

/// Number of tab-separated fields in a data line
pub const FIELD_COUNT: usize = 6;

/// `word#rank`, where the rank follows the last `#`
static TERM_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<term>.+)#(?P<rank>\d+)$").expect("valid term entry regex"));

/// One synset line from the resource
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconRecord {
    /// Part-of-speech marker (`a`, `n`, `v`, `r`, ...)
    pub pos: char,
    /// Synset offset, only kept for diagnostics
    pub synset_id: String,
    /// Positive polarity, 0 to 1
    pub positive_score: f64,
    /// Negative polarity, 0 to 1
    pub negative_score: f64,
    /// Terms of the synset with their sense rank, in line order
    pub terms: Vec<(String, u32)>,
}

impl LexiconRecord {
    /// Polarity of the whole synset: positive minus negative
    pub fn synset_score(&self) -> f64 {
        self.positive_score - self.negative_score
    }
}

/// Parse one line of the resource.
///
/// Returns `Ok(None)` for comments. Every other line, blank ones included,
/// must hold exactly six fields. `line_number` is 1-based and only used for
/// error reporting.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<LexiconRecord>> {
    if line.trim_start().starts_with('#') {
        return Ok(None);
    }

    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(LexiconError::malformed(
            line_number,
            format!(
                "expected {} tab-separated fields, found {}",
                FIELD_COUNT,
                fields.len()
            ),
        ));
    }

    let pos = parse_pos(fields[0], line_number)?;
    let positive_score = parse_score(fields[2], "positive", line_number)?;
    let negative_score = parse_score(fields[3], "negative", line_number)?;
    let terms = parse_terms(fields[4], line_number)?;

    Ok(Some(LexiconRecord {
        pos,
        synset_id: fields[1].trim().to_string(),
        positive_score,
        negative_score,
        terms,
    }))
}

fn parse_pos(field: &str, line_number: usize) -> Result<char> {
    let mut chars = field.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(LexiconError::malformed(
            line_number,
            format!("POS marker must be a single character, got '{}'", field),
        )),
    }
}

/// Scores are finite and within `[0, 1]`, keeping synset scores in `[-1, 1]`
fn parse_score(field: &str, which: &str, line_number: usize) -> Result<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|score| (0.0..=1.0).contains(score))
        .ok_or_else(|| {
            LexiconError::malformed(
                line_number,
                format!("{} score '{}' is not a number between 0 and 1", which, field),
            )
        })
}

fn parse_terms(field: &str, line_number: usize) -> Result<Vec<(String, u32)>> {
    let mut terms = Vec::new();

    for entry in field.split(' ').filter(|e| !e.is_empty()) {
        let caps = TERM_ENTRY.captures(entry).ok_or_else(|| {
            LexiconError::malformed(
                line_number,
                format!("synset term '{}' is not of the form word#rank", entry),
            )
        })?;

        let rank = caps["rank"]
            .parse::<u32>()
            .ok()
            .filter(|r| *r > 0)
            .ok_or_else(|| {
                LexiconError::malformed(
                    line_number,
                    format!("sense rank in '{}' must be a positive integer", entry),
                )
            })?;

        terms.push((caps["term"].to_string(), rank));
    }

    if terms.is_empty() {
        return Err(LexiconError::malformed(line_number, "synset has no terms"));
    }

    Ok(terms)
}
