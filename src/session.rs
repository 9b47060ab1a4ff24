//! Interactive scoring session.
//!
//! Reads one sentence per line from any `BufRead`, scores it, and writes a
//! human-readable report. The loop ends at end of input or on `quit`/`exit`.

use std::io::{self, BufRead, Write};

use crate::classifier::Classification;
use crate::scorer::{SentenceScore, SentenceScorer};

pub const PROMPT: &str = "Enter your sentence: ";

const SEPARATOR: &str = "+++++++++++++++++++++++++++++++++++++++++++++";

/// Write the report for one scored sentence
pub fn write_report<W: Write>(
    out: &mut W,
    score: &SentenceScore,
    classification: &Classification,
) -> io::Result<()> {
    writeln!(out, "Positivity of sentence is: {}%", score.positivity_percent)?;
    writeln!(out, "Emotion number is: {}", score.emotion_number)?;
    writeln!(out, "{}", SEPARATOR)?;

    let sentiment = classification.sentiment.as_str();
    let mut chars = sentiment.chars();
    if let Some(first) = chars.next() {
        writeln!(out, "{}{} sentence", first.to_uppercase(), chars.as_str())?;
    }
    if let Some(emotion) = classification.emotion {
        writeln!(out, "I am {}", emotion.as_str())?;
    }
    Ok(())
}

/// Run the prompt/score/report loop until the input is exhausted.
///
/// Lines that are not valid UTF-8 are decoded lossily, so a stray byte
/// costs one sentence rather than the session. Returns the number of
/// sentences scored.
pub fn run<R: BufRead, W: Write>(
    scorer: &SentenceScorer,
    mut input: R,
    out: &mut W,
) -> io::Result<usize> {
    let mut scored = 0;
    let mut buf = Vec::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let sentence = line.trim();

        if sentence.eq_ignore_ascii_case("quit") || sentence.eq_ignore_ascii_case("exit") {
            break;
        }

        match scorer.score(sentence) {
            Ok(score) => {
                write_report(out, &score, &score.classify())?;
                scored += 1;
            }
            Err(err) => {
                tracing::debug!(error = %err, "sentence not scored");
                writeln!(out, "Nothing to score, please type a sentence.")?;
            }
        }
    }

    writeln!(out)?;
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;

    fn make_scorer() -> SentenceScorer {
        let tsv = "a\t1\t0.5\t0.25\tgood#1\tdesc\na\t2\t0\t0.5\tbad#1\tdesc\n";
        SentenceScorer::new(Lexicon::from_tsv(tsv).unwrap())
    }

    #[test]
    fn test_report_positive() {
        let scorer = make_scorer();
        let score = scorer.score("good").unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &score, &score.classify()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Positivity of sentence is: 25%"));
        assert!(text.contains("Emotion number is: 1"));
        assert!(text.contains("Positive sentence"));
        assert!(text.contains("I am surprised"));
    }

    #[test]
    fn test_run_until_eof() {
        let scorer = make_scorer();
        let input = "good\nbad bad\n\nunknown\n";
        let mut out = Vec::new();

        let scored = run(&scorer, input.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(scored, 3);
        assert!(text.contains("I am surprised"));
        assert!(text.contains("Negative sentence"));
        assert!(text.contains("I am sad"));
        assert!(text.contains("Neutral sentence"));
        assert!(text.contains("Nothing to score"));
        assert_eq!(text.matches(PROMPT).count(), 5);
    }

    #[test]
    fn test_invalid_utf8_line_keeps_session_alive() {
        let scorer = make_scorer();
        let mut out = Vec::new();

        let input: &[u8] = b"good\n\xff\xfe bad\ngood\n";
        let scored = run(&scorer, input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(scored, 3);
        assert!(text.contains("Negative sentence"));
        assert_eq!(text.matches("I am surprised").count(), 2);
        assert_eq!(text.matches(PROMPT).count(), 4);
    }

    #[test]
    fn test_quit_stops_loop() {
        let scorer = make_scorer();
        let mut out = Vec::new();

        let scored = run(&scorer, "good\nquit\nbad\n".as_bytes(), &mut out).unwrap();
        assert_eq!(scored, 1);
        assert!(!String::from_utf8(out).unwrap().contains("Negative"));
    }
}
