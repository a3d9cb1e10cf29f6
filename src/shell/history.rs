//! Command history - in-memory list plus a persistent file
//!
//! One command per line in `~/.seash_history`, loaded at startup and
//! rewritten when the session ends. The list is capped; the oldest entries
//! fall off first.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

const HISTORY_FILE: &str = ".seash_history";
const HISTORY_MAX: usize = 4096;

pub struct History {
    entries: Vec<String>,
    path: Option<PathBuf>,
}

impl History {
    /// Load history from the user's home directory, or start empty when
    /// there is no home or no file yet.
    pub fn load() -> Self {
        let path = dirs::home_dir().map(|h| h.join(HISTORY_FILE));
        Self::load_from(path)
    }

    pub fn load_from(path: Option<PathBuf>) -> Self {
        let mut entries = Vec::new();
        if let Some(p) = &path {
            if let Ok(content) = fs::read_to_string(p) {
                entries = content.lines().map(String::from).collect();
            }
        }
        if entries.len() > HISTORY_MAX {
            entries = entries.split_off(entries.len() - HISTORY_MAX);
        }
        Self { entries, path }
    }

    pub fn append(&mut self, line: &str) {
        self.entries.push(line.to_string());
        if self.entries.len() > HISTORY_MAX {
            self.entries.remove(0);
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Rewrite the history file. A missing home directory is not an error;
    /// there is simply nowhere to persist.
    pub fn save(&self) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut file = fs::File::create(path)?;
        for entry in &self.entries {
            writeln!(file, "{}", entry)?;
        }
        Ok(())
    }
}
