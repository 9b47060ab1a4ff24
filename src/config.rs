//! Scorer configuration and default resource locations.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};
use crate::lexicon::{Lexicon, LexiconBuilder, MalformedPolicy};
use crate::scorer::{SentenceScorer, DEFAULT_POS_TAGS};

/// File name of the SentiWordNet 3.0 release
pub const LEXICON_FILE_NAME: &str = "SentiWordNet_3.0.0.txt";

/// Environment variable overriding the lexicon location
pub const LEXICON_ENV_VAR: &str = "SENTIWORD_LEXICON";

/// Get the default directory for downloaded resources
/// Returns <data dir>/sentiword-rs/
pub fn default_base_path() -> PathBuf {
    #[cfg(feature = "download")]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sentiword-rs")
    }
    #[cfg(not(feature = "download"))]
    {
        PathBuf::from(".")
    }
}

/// Default lexicon path: `$SENTIWORD_LEXICON`, else the file under
/// [`default_base_path`]
pub fn default_lexicon_path() -> PathBuf {
    env_lexicon_path().unwrap_or_else(|| default_base_path().join(LEXICON_FILE_NAME))
}

fn env_lexicon_path() -> Option<PathBuf> {
    std::env::var_os(LEXICON_ENV_VAR)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

/// Where the lexicon file comes from, in priority order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconLocation {
    /// Set in the config file or on the command line
    Configured(PathBuf),
    /// Set through `$SENTIWORD_LEXICON`
    Environment(PathBuf),
    /// The managed copy under [`default_base_path`]
    Default(PathBuf),
}

impl LexiconLocation {
    pub fn path(&self) -> &Path {
        match self {
            LexiconLocation::Configured(path)
            | LexiconLocation::Environment(path)
            | LexiconLocation::Default(path) => path,
        }
    }

    /// Only the managed default copy may be fetched; a path the user named
    /// has to exist as given.
    pub fn is_default(&self) -> bool {
        matches!(self, LexiconLocation::Default(_))
    }
}

/// Settings for loading a lexicon and scoring sentences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Part-of-speech tags looked up for each token, in order
    pub pos_tags: Vec<String>,
    /// How malformed lexicon lines are handled
    pub malformed: MalformedPolicy,
    /// Lexicon file; falls back to [`default_lexicon_path`]
    pub lexicon_path: Option<PathBuf>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        ScorerConfig {
            pos_tags: DEFAULT_POS_TAGS.iter().map(|t| t.to_string()).collect(),
            malformed: MalformedPolicy::Abort,
            lexicon_path: None,
        }
    }
}

impl ScorerConfig {
    /// Parse a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ScorerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            LexiconError::Config(format!(
                "cannot read '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.pos_tags.is_empty() {
            return Err(LexiconError::Config("pos_tags must not be empty".into()));
        }
        if let Some(tag) = self.pos_tags.iter().find(|t| t.chars().count() != 1) {
            return Err(LexiconError::Config(format!(
                "POS tag '{}' must be a single character",
                tag
            )));
        }
        Ok(())
    }

    /// Resolve the lexicon location: config, then environment, then default
    pub fn lexicon_location(&self) -> LexiconLocation {
        if let Some(path) = &self.lexicon_path {
            return LexiconLocation::Configured(path.clone());
        }
        match env_lexicon_path() {
            Some(path) => LexiconLocation::Environment(path),
            None => LexiconLocation::Default(default_base_path().join(LEXICON_FILE_NAME)),
        }
    }

    /// The lexicon file this config points at
    pub fn resolved_lexicon_path(&self) -> PathBuf {
        self.lexicon_location().path().to_path_buf()
    }

    /// Whether the lexicon has to be downloaded before it can be loaded.
    ///
    /// Never true for a configured or environment path, even a missing one.
    pub fn needs_download(&self) -> bool {
        let location = self.lexicon_location();
        location.is_default() && !location.path().is_file()
    }

    /// Load the configured lexicon file with the configured policy
    pub fn load_lexicon(&self) -> Result<Lexicon> {
        let mut builder = LexiconBuilder::with_policy(self.malformed);
        builder.load_file(self.resolved_lexicon_path())?;
        Ok(builder.build())
    }

    /// Wrap a lexicon in a scorer probing the configured tags
    pub fn scorer(&self, lexicon: Lexicon) -> SentenceScorer {
        SentenceScorer::new(lexicon).with_pos_tags(self.pos_tags.iter().cloned())
    }
}
