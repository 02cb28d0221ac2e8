//! JSON file store
//!
//! The file holds a versioned envelope. Writes go to `<path>.tmp` first and
//! are renamed over the real file so a crash never leaves a half-written save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{BEST_SCORE_KEY, BestScoreStore};

const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    key: String,
    best: u32,
}

/// Best score persisted as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> io::Result<u32> {
        let json = fs::read_to_string(&self.path)?;
        let envelope: Envelope = serde_json::from_str(&json)?;
        if envelope.version != ENVELOPE_VERSION || envelope.key != BEST_SCORE_KEY {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported save v{} key {:?}", envelope.version, envelope.key),
            ));
        }
        Ok(envelope.best)
    }

    fn write(&self, best: u32) -> io::Result<()> {
        let envelope = Envelope {
            version: ENVELOPE_VERSION,
            key: BEST_SCORE_KEY.to_string(),
            best,
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }
}

impl BestScoreStore for JsonFileStore {
    fn load_best(&self) -> u32 {
        match self.read() {
            Ok(best) => best,
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => {
                log::warn!("Ignoring unreadable save {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save_best(&mut self, best: u32) {
        match self.write(best) {
            Ok(()) => log::debug!("Best score {} saved to {}", best, self.path.display()),
            Err(e) => log::warn!("Failed to save best score: {}", e),
        }
    }
}
