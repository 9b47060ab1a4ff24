//! Command-line interface for sentiword-rs
//!
//! Usage:
//!   sentiword [OPTIONS] <SENTENCE>
//!   sentiword [OPTIONS]            (interactive, one sentence per line)
//!
//! Options:
//!   -l, --lexicon <FILE>  Path to the SentiWordNet file
//!   -c, --config <FILE>   JSON configuration file
//!   -p, --pos <TAGS>      Comma-separated POS tags to look up (default: a,n)
//!   -j, --json            Output as JSON
//!   --skip-malformed      Skip malformed lexicon lines instead of failing
//!   -v, --verbose         Log loading progress
//!   -h, --help            Show help
//!   --                    End of options

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use sentiword_rs::{session, LexiconError, MalformedPolicy, ScorerConfig};
use tracing_subscriber::EnvFilter;

fn print_help() {
    eprintln!(
        r#"sentiword - SentiWordNet sentence sentiment and emotion

USAGE:
    sentiword [OPTIONS] [SENTENCE]
    echo "What a good day" | sentiword

OPTIONS:
    -l, --lexicon <FILE>  Path to the SentiWordNet file
                          (default: $SENTIWORD_LEXICON or the downloaded copy)
    -c, --config <FILE>   JSON configuration file
    -p, --pos <TAGS>      Comma-separated POS tags to look up (default: a,n)
    -j, --json            Output as JSON
        --skip-malformed  Skip malformed lexicon lines instead of failing
    -v, --verbose         Log loading progress
    -h, --help            Show this help message
    --                    Treat everything after it as the sentence

EXAMPLES:
    sentiword "What a good day"
    sentiword -l SentiWordNet_3.0.0.txt -p a,n,v "I hate waiting"
    sentiword -j "nice weather"
    sentiword -- -5 degrees and raining
"#
    );
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(err: LexiconError) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

/// Options collected from the command line
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    lexicon_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    pos_tags: Option<Vec<String>>,
    skip_malformed: bool,
    json_output: bool,
    verbose: bool,
    words: Vec<String>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Run(CliArgs),
}

/// Parse arguments (program name excluded). Everything after `--` is
/// sentence text, even when it starts with `-`.
fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut cli = CliArgs::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--" => {
                cli.words.extend(args[i + 1..].iter().cloned());
                break;
            }
            "-j" | "--json" => {
                cli.json_output = true;
            }
            "-v" | "--verbose" => {
                cli.verbose = true;
            }
            "--skip-malformed" => {
                cli.skip_malformed = true;
            }
            "-l" | "--lexicon" | "-c" | "--config" | "-p" | "--pos" => {
                let flag = args[i].as_str();
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| format!("{} requires a value", flag))?;
                match flag {
                    "-l" | "--lexicon" => cli.lexicon_path = Some(PathBuf::from(value)),
                    "-c" | "--config" => cli.config_path = Some(PathBuf::from(value)),
                    _ => {
                        cli.pos_tags = Some(
                            value
                                .split(',')
                                .map(|t| t.trim().to_string())
                                .filter(|t| !t.is_empty())
                                .collect(),
                        )
                    }
                }
            }
            arg if !arg.starts_with('-') => {
                cli.words.push(arg.to_string());
            }
            arg => return Err(format!("Unknown option: {}", arg)),
        }
        i += 1;
    }

    Ok(Command::Run(cli))
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let cli = match parse_args(&args) {
        Ok(Command::Run(cli)) => cli,
        Ok(Command::Help) => {
            print_help();
            return;
        }
        Err(msg) => {
            eprintln!("Error: {}", msg);
            print_help();
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose);

    // Config file first, then command-line overrides
    let mut config = match cli.config_path {
        Some(path) => ScorerConfig::from_file(&path).unwrap_or_else(|e| fail(e)),
        None => ScorerConfig::default(),
    };
    if let Some(path) = cli.lexicon_path {
        config.lexicon_path = Some(path);
    }
    if let Some(tags) = cli.pos_tags {
        if tags.is_empty() {
            fail(LexiconError::Config("--pos needs at least one tag".into()));
        }
        config.pos_tags = tags;
    }
    if cli.skip_malformed {
        config.malformed = MalformedPolicy::Skip;
    }

    // An explicit or $SENTIWORD_LEXICON path is loaded as given, never swapped
    #[cfg(feature = "download")]
    if config.needs_download() {
        match sentiword_rs::download::ensure_lexicon(None) {
            Ok(path) => config.lexicon_path = Some(path),
            Err(e) => fail(e),
        }
    }

    // No lexicon means no scoring at all
    let lexicon = config.load_lexicon().unwrap_or_else(|e| {
        eprintln!(
            "Error reading lexicon '{}': {}",
            config.resolved_lexicon_path().display(),
            e
        );
        std::process::exit(1);
    });
    let scorer = config.scorer(lexicon);

    if cli.words.is_empty() {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = session::run(&scorer, stdin.lock(), &mut out) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let sentence = cli.words.join(" ");
    let score = scorer.score(&sentence).unwrap_or_else(|e| fail(e));
    let classification = score.classify();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if cli.json_output {
        let report = serde_json::json!({
            "sentence": sentence,
            "score": score,
            "classification": classification,
            "label": classification.label(),
        });
        match serde_json::to_string_pretty(&report) {
            Ok(json) => writeln!(out, "{}", json),
            Err(e) => fail(e.into()),
        }
    } else {
        session::write_report(&mut out, &score, &classification)
    };

    if let Err(e) = written {
        eprintln!("Error writing output: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_args(list: &[&str]) -> CliArgs {
        match parse_args(&args(list)) {
            Ok(Command::Run(cli)) => cli,
            other => panic!("unexpected parse result: {:?}", other),
        }
    }

    #[test]
    fn test_options_and_words() {
        let cli = run_args(&["-l", "swn.txt", "-p", "a, n,v", "-j", "good", "day"]);
        assert_eq!(cli.lexicon_path, Some(PathBuf::from("swn.txt")));
        assert_eq!(
            cli.pos_tags,
            Some(vec!["a".to_string(), "n".to_string(), "v".to_string()])
        );
        assert!(cli.json_output);
        assert_eq!(cli.words, vec!["good", "day"]);
    }

    #[test]
    fn test_double_dash_ends_options() {
        let cli = run_args(&["-v", "--", "-5", "degrees", "--json"]);
        assert!(cli.verbose);
        assert!(!cli.json_output);
        assert_eq!(cli.words, vec!["-5", "degrees", "--json"]);
    }

    #[test]
    fn test_dash_word_without_terminator_is_rejected() {
        assert_eq!(
            parse_args(&args(&["-5", "degrees"])),
            Err("Unknown option: -5".to_string())
        );
    }

    #[test]
    fn test_missing_value() {
        assert!(parse_args(&args(&["--lexicon"])).is_err());
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(&args(&["good", "-h"])), Ok(Command::Help));
    }
}
