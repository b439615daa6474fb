use serde::{Deserialize, Serialize};

/// A single immutable log line. `id` is the insertion sequence number, starting at 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub id: u64,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` and returns its sequence number.
    pub fn append(&mut self, message: impl Into<String>) -> u64 {
        let id = self.entries.len() as u64 + 1;
        let message = message.into();

        tracing::info!("[event {}] {}", id, message);

        self.entries.push(LogEntry { id, message });
        id
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries with an id strictly greater than `after` (all entries for `None`).
    pub fn after(&self, after: Option<u64>) -> &[LogEntry] {
        let skip = after
            .map(|id| (id as usize).min(self.entries.len()))
            .unwrap_or(0);
        &self.entries[skip..]
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut log = EventLog::new();

        assert_eq!(log.append("first"), 1);
        assert_eq!(log.append("second".to_string()), 2);

        let messages: Vec<_> = log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_after_returns_tail() {
        let mut log = EventLog::new();
        for i in 0..5 {
            log.append(format!("event {}", i));
        }

        assert_eq!(log.after(None).len(), 5);
        assert_eq!(log.after(Some(3)).len(), 2);
        assert_eq!(log.after(Some(3))[0].id, 4);
        assert!(log.after(Some(99)).is_empty());
    }

    #[test]
    fn test_empty_log() {
        let log = EventLog::new();

        assert!(log.is_empty());
        assert!(log.last().is_none());
        assert!(log.after(Some(0)).is_empty());
    }
}
