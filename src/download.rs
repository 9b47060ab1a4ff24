//! Fetching the SentiWordNet resource.
//!
//! The lexicon is downloaded once into [`default_base_path`] and reused on
//! later runs.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{default_base_path, LEXICON_FILE_NAME};
use crate::error::{LexiconError, Result};

/// Where SentiWordNet 3.0 is published
pub const SENTIWORDNET_URL: &str =
    "https://raw.githubusercontent.com/aesuli/SentiWordNet/master/data/SentiWordNet_3.0.0.txt";

/// Get the path the lexicon is stored at under `base_path`
pub fn lexicon_path(base_path: Option<&Path>) -> PathBuf {
    let base = base_path
        .map(PathBuf::from)
        .unwrap_or_else(default_base_path);
    base.join(LEXICON_FILE_NAME)
}

/// Check if the lexicon exists locally
pub fn lexicon_exists(base_path: Option<&Path>) -> bool {
    lexicon_path(base_path).is_file()
}

/// Download the lexicon from `url` into `base_path`
pub fn download_lexicon(base_path: Option<&Path>, url: &str) -> Result<PathBuf> {
    let target = lexicon_path(base_path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    info!(url, target = %target.display(), "downloading SentiWordNet");

    let client = reqwest::blocking::Client::builder()
        .user_agent("sentiword-rs")
        .timeout(Duration::from_secs(120))
        .build()
        .map_err(|e| LexiconError::Network(e.to_string()))?;

    let mut response = client
        .get(url)
        .send()
        .map_err(|e| LexiconError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(LexiconError::Network(format!(
            "failed to download lexicon: HTTP {}",
            response.status()
        )));
    }

    write_complete(&mut response, &target)?;

    info!(target = %target.display(), "download completed");
    Ok(target)
}

/// Stream `reader` into `target` through a `.part` sibling that is renamed
/// into place only once complete. A failed transfer leaves neither file.
fn write_complete<R: io::Read>(reader: &mut R, target: &Path) -> Result<()> {
    let partial = target.with_extension("part");
    let copied = File::create(&partial).and_then(|mut file| {
        io::copy(reader, &mut file)?;
        file.sync_all()
    });

    if let Err(e) = copied.and_then(|()| fs::rename(&partial, target)) {
        if let Err(cleanup) = fs::remove_file(&partial) {
            if cleanup.kind() != io::ErrorKind::NotFound {
                warn!(
                    path = %partial.display(),
                    error = %cleanup,
                    "could not remove partial download"
                );
            }
        }
        return Err(e.into());
    }
    Ok(())
}

/// Return the local lexicon path, downloading it first if it is missing
pub fn ensure_lexicon(base_path: Option<&Path>) -> Result<PathBuf> {
    let path = lexicon_path(base_path);
    if path.is_file() {
        return Ok(path);
    }
    download_lexicon(base_path, SENTIWORDNET_URL)
}
