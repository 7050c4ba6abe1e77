/// One finished game: who played it and how long (or how many moves) it took.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HighscoreEntry {
    name: String,
    score: u64,
}

impl HighscoreEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u64 {
        self.score
    }
}
