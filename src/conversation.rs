use std::{collections::VecDeque, sync::Mutex};

use serde::Serialize;

/// Number of messages kept (three user/assistant exchanges).
pub const HISTORY_CAPACITY: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub text: String,
}

/// Bounded rolling buffer of recent messages. Oldest entries are evicted
/// first.
#[derive(Debug)]
pub struct ConversationLog {
    entries: Mutex<VecDeque<ConversationEntry>>,
    capacity: usize,
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity + 1)),
            capacity,
        }
    }

    pub fn append(&self, role: Role, text: impl Into<String>) {
        // The buffer holds plain data, so a poisoned lock is still usable.
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.push_back(ConversationEntry {
            role,
            text: text.into(),
        });
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// Snapshot of the current entries, oldest first.
    pub fn history(&self) -> Vec<ConversationEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
