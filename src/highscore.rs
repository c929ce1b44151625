//! High score persistence.
//!
//! The file holds the decimal text of a single non-negative integer, with no
//! trailing newline.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::consts::HIGH_SCORE_FILE;

/// Default location: `highscore.txt` in the working directory.
pub fn high_score_path() -> PathBuf {
    PathBuf::from(HIGH_SCORE_FILE)
}

/// Read the stored high score.  A missing or garbled file counts as 0.
pub fn load_high_score(path: &Path) -> u32 {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return 0,
        Err(e) => {
            log::warn!("Could not read high score from {}: {}", path.display(), e);
            return 0;
        }
    };
    match contents.trim().parse() {
        Ok(score) => score,
        Err(e) => {
            log::warn!("Ignoring unreadable high score in {}: {}", path.display(), e);
            0
        }
    }
}

/// Replace the file's contents with `score`.
pub fn save_high_score(path: &Path, score: u32) -> std::io::Result<()> {
    std::fs::write(path, score.to_string())?;
    log::info!("High score {} saved to {}", score, path.display());
    Ok(())
}
