//! Session-owned environment snapshot.
//!
//! The session copies the process environment once at startup and then only
//! mutates its own copy; `setenv`/`unsetenv` never write back to the OS-level
//! environment. Entries keep insertion order so `env` output and the
//! `NAME=VALUE` view handed to child processes are stable.

use std::env;

pub struct Environ {
    entries: Vec<(String, String)>,
}

impl Environ {
    /// Snapshot the process environment.
    pub fn from_process() -> Self {
        Self {
            entries: env::vars().collect(),
        }
    }

    /// An empty snapshot, mainly useful in tests.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a variable, replacing an existing entry in place so its position
    /// in the snapshot is preserved.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove a variable. Returns whether it existed.
    pub fn unset(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| n != name);
        self.entries.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Flattened `NAME=VALUE` view for spawning child processes.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(n, v)| format!("{}={}", n, v))
            .collect()
    }
}
