pub mod error;
pub mod json;
pub mod model;
pub mod settings;
pub mod store;

pub use error::{DecodeError, Error, Result, SyncError};
pub use model::{Difficulty, HighscoreEntry, HighscoreList};
pub use settings::Settings;
pub use store::{HighscoreStore, LocalStore, RemoteStore};
