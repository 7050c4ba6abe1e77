mod local;
mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

use crate::error::Result;
use crate::model::{Difficulty, HighscoreEntry, HighscoreList};

/// Somewhere highscore lists live. Callers hold a `dyn HighscoreStore` and do not
/// care whether it is backed by files or by the highscore server.
pub trait HighscoreStore {
    fn get(&self, difficulty: Difficulty) -> Result<HighscoreList>;

    fn save(&self, entry: &HighscoreEntry, difficulty: Difficulty) -> Result<()>;
}
