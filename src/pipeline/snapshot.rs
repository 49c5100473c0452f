//! Last-observed content snapshot.
//!
//! Exactly one instance lives in the application state for the lifetime of
//! the process, guarded by a mutex. It starts empty, so the first check after
//! a restart reports every record as new.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

/// The remembered id sets from the last check, per content type.
#[derive(Debug, Default)]
pub struct ContentSnapshot {
    pub posts: HashSet<String>,
    pub guides: HashSet<String>,
    pub last_checked: Option<DateTime<Utc>>,
}

impl ContentSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the remembered sets with the just-fetched ones.
    ///
    /// Runs before dispatch, so a delivery outage never causes the same
    /// records to be re-notified on the next run.
    pub fn replace(&mut self, posts: HashSet<String>, guides: HashSet<String>, at: DateTime<Utc>) {
        self.posts = posts;
        self.guides = guides;
        self.last_checked = Some(at);
    }
}
