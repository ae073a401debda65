use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use chrono::{DateTime, Local};

/// A single history entry. `timestamp`/`frequency` are optional metadata
/// used by [`crate::history_search::SortMode`] - plain line-oriented
/// histories that never populate them still work, they just can't be
/// sorted by recency/frequency beyond insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub command: String,
    pub timestamp: Option<DateTime<Local>>,
    pub frequency: u32,
}

impl HistoryItem {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timestamp: Some(Local::now()),
            frequency: 1,
        }
    }
}

/// Query describing what the standard (non reverse-i-search) Up/Down
/// traversal is currently doing. `Normal` is bash-style "just walk the
/// list"; `PrefixSearch` is fish/zsh-style "only show entries starting with
/// what I'd already typed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryNavigationQuery {
    Normal(String),
    PrefixSearch(String),
}

/// Persistent, chronologically ordered list of previously entered lines.
///
/// This crate treats persistence *mechanics* - the file format, flush
/// cadence, durability guarantees - as out of spec (spec.md Non-goals:
/// "persistent history storage semantics"); [`FileBackedHistory`] is
/// carried anyway because the ambient stack for a line editor includes a
/// usable history backend, the same way `reedline` ships one alongside the
/// `History` trait.
pub trait History {
    fn append(&mut self, item: HistoryItem);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Oldest-first view of every entry.
    fn iter_chronologic(&self) -> std::slice::Iter<'_, HistoryItem>;

    /// 1-based index counting back from the most recent entry (`1` is the
    /// most recent). Used by `InsertLastArg` cycling.
    fn nth_most_recent(&self, n: usize) -> Option<&HistoryItem>;

    /// Convenience accessor for [`crate::core_editor::Editor::insert_last_arg`],
    /// which only needs the command text.
    fn nth_most_recent_command(&self, n: usize) -> Option<&str> {
        self.nth_most_recent(n).map(|item| item.command.as_str())
    }
}

/// In-memory, optionally file-synced history.
pub struct FileBackedHistory {
    items: Vec<HistoryItem>,
    capacity: usize,
    file: Option<PathBuf>,
}

impl Default for FileBackedHistory {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            capacity: 1000,
            file: None,
        }
    }
}

impl FileBackedHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
            file: None,
        }
    }

    /// Loads existing plain-text history (one command per line) from
    /// `file`, if it exists, and arranges for future appends to be synced
    /// back to it. A missing file is not an error - it's created lazily on
    /// the first successful save.
    pub fn with_file(capacity: usize, file: PathBuf) -> io::Result<Self> {
        let mut history = Self::new(capacity);
        if let Ok(contents) = fs::read_to_string(&file) {
            for line in contents.lines() {
                if !line.is_empty() {
                    history.items.push(HistoryItem::new(line.to_string()));
                }
            }
            history.truncate();
        }
        history.file = Some(file);
        Ok(history)
    }

    fn truncate(&mut self) {
        if self.items.len() > self.capacity {
            let excess = self.items.len() - self.capacity;
            self.items.drain(0..excess);
        }
    }

    fn save(&self) -> io::Result<()> {
        if let Some(path) = &self.file {
            let mut f = fs::File::create(path)?;
            for item in &self.items {
                writeln!(f, "{}", item.command)?;
            }
        }
        Ok(())
    }

    pub fn append_command(&mut self, command: impl Into<String>) {
        self.append(HistoryItem::new(command.into()));
    }
}

impl History for FileBackedHistory {
    fn append(&mut self, item: HistoryItem) {
        self.items.push(item);
        self.truncate();
        if let Err(e) = self.save() {
            log::warn!("failed to persist history: {e}");
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn iter_chronologic(&self) -> std::slice::Iter<'_, HistoryItem> {
        self.items.iter()
    }

    fn nth_most_recent(&self, n: usize) -> Option<&HistoryItem> {
        if n == 0 || n > self.items.len() {
            return None;
        }
        self.items.get(self.items.len() - n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nth_most_recent_is_one_indexed_from_the_end() {
        let mut h = FileBackedHistory::new(10);
        h.append_command("echo one");
        h.append_command("ls -la /tmp");
        assert_eq!(h.nth_most_recent(1).unwrap().command, "ls -la /tmp");
        assert_eq!(h.nth_most_recent(2).unwrap().command, "echo one");
        assert_eq!(h.nth_most_recent(3), None);
    }

    #[test]
    fn capacity_trims_oldest_entries() {
        let mut h = FileBackedHistory::new(2);
        h.append_command("a");
        h.append_command("b");
        h.append_command("c");
        assert_eq!(h.len(), 2);
        assert_eq!(h.nth_most_recent(2).unwrap().command, "b");
    }

    #[test]
    fn with_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");
        {
            let mut h = FileBackedHistory::with_file(10, path.clone()).unwrap();
            h.append_command("first");
            h.append_command("second");
        }
        let h = FileBackedHistory::with_file(10, path).unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(h.nth_most_recent(1).unwrap().command, "second");
    }
}
