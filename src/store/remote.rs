use log::{debug, info};
use std::time::Duration;

use crate::error::{Result, SyncError};
use crate::json::{decode_list, encode_entry};
use crate::model::{Difficulty, HighscoreEntry, HighscoreList};
use crate::store::HighscoreStore;

/// Client for the highscore server.
///
/// The server owns the lists and their ranking; this side only fetches a list or
/// posts a single new entry.
pub struct RemoteStore {
    base_url: String,
    agent: ureq::Agent,
}

impl RemoteStore {
    /// `timeout` bounds each request as a whole, connect included.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.into(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_url(&self, difficulty: Difficulty) -> String {
        format!(
            "{}/highscorelist/{}",
            self.base_url.trim_end_matches('/'),
            difficulty.name()
        )
    }

    pub fn get_highscore_list(&self, difficulty: Difficulty) -> Result<HighscoreList> {
        let url = self.list_url(difficulty);
        debug!("GET {}", url);
        let response = self
            .agent
            .get(&url)
            .set("accept", "application/json")
            .call()
            .map_err(|e| sync_error(&url, e))?;
        let body = response.into_string().map_err(|source| SyncError::Body {
            url: url.clone(),
            source,
        })?;
        Ok(decode_list(&body)?)
    }

    /// Posts just the new entry; the response body is not looked at.
    pub fn save_score(&self, entry: &HighscoreEntry, difficulty: Difficulty) -> Result<()> {
        let url = format!("{}/save", self.list_url(difficulty));
        debug!("POST {}", url);
        self.agent
            .post(&url)
            .set("content-type", "application/json")
            .send_string(&encode_entry(entry))
            .map_err(|e| sync_error(&url, e))?;
        info!(
            "Sent {} ({}) to the {} highscores on {}",
            entry.name(),
            entry.score(),
            difficulty,
            self.base_url
        );
        Ok(())
    }
}

impl HighscoreStore for RemoteStore {
    fn get(&self, difficulty: Difficulty) -> Result<HighscoreList> {
        self.get_highscore_list(difficulty)
    }

    fn save(&self, entry: &HighscoreEntry, difficulty: Difficulty) -> Result<()> {
        self.save_score(entry, difficulty)
    }
}

fn sync_error(url: &str, error: ureq::Error) -> SyncError {
    match error {
        ureq::Error::Status(status, _) => SyncError::Status {
            url: url.to_string(),
            status,
        },
        ureq::Error::Transport(transport) => SyncError::Transport {
            url: url.to_string(),
            message: transport.to_string(),
        },
    }
}
