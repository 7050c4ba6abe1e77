use crate::model::HighscoreEntry;

/// Ranked entries for a single difficulty, best (lowest) score first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighscoreList {
    entries: Vec<HighscoreEntry>,
}

impl HighscoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list in exactly the given order. Used when decoding, where the
    /// stored order is authoritative.
    pub fn from_entries(entries: Vec<HighscoreEntry>) -> Self {
        Self { entries }
    }

    /// Inserts behind every entry with a score less than or equal to the new one,
    /// so ties rank by arrival.
    pub fn add_entry(&mut self, entry: HighscoreEntry) {
        let position = self
            .entries
            .partition_point(|existing| existing.score() <= entry.score());
        self.entries.insert(position, entry);
    }

    pub fn entries(&self) -> &[HighscoreEntry] {
        &self.entries
    }

    pub fn top(&self, limit: usize) -> Vec<HighscoreEntry> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entry: &HighscoreEntry) -> bool {
        self.entries.contains(entry)
    }
}
