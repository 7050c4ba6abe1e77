mod difficulty;
mod highscore_entry;
mod highscore_list;

pub use difficulty::Difficulty;
pub use highscore_entry::HighscoreEntry;
pub use highscore_list::HighscoreList;
