use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DecodeError, Error, Result};
use crate::store::{LocalStore, RemoteStore};

pub const DATA_DIR_ENV: &str = "MINESWEEPER_DATA_DIR";
pub const SERVER_ENV: &str = "MINESWEEPER_SERVER";
pub const TIMEOUT_ENV: &str = "MINESWEEPER_TIMEOUT_SECS";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    /// Directory holding the per-difficulty highscore files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name of the unscoped highscore file, if the single-file mode is wanted.
    #[serde(default)]
    pub default_file: Option<String>,

    #[serde(default)]
    pub server_url: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_version() -> u32 {
    1
}
fn default_timeout_secs() -> u64 {
    10
}

/// `<per-user data dir>/minesweeper`, falling back to a relative directory when the
/// platform has no notion of a home directory.
pub fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.data_dir().join("minesweeper"))
        .unwrap_or_else(|| PathBuf::from("minesweeper"))
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: 1,
            data_dir: default_data_dir(),
            default_file: None,
            server_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    pub fn settings_path() -> PathBuf {
        default_data_dir().join("settings.json")
    }

    /// Reads settings from `path`. A missing file means defaults; an unreadable or
    /// malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings at {:?}, using defaults", path);
                return Ok(Settings::default());
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        let mut settings = serde_json::from_str::<Settings>(&contents)
            .map_err(|e| DecodeError::new(contents.as_str(), e.to_string()))?;
        settings.migrate();
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::io(path, e.into()))?;
        fs::write(path, contents).map_err(|e| Error::io(path, e))
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(url) = std::env::var(SERVER_ENV) {
            self.server_url = if url.is_empty() { None } else { Some(url) };
        }
        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            match secs.parse::<u64>() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!("Ignoring {}={:?}, not a number of seconds", TIMEOUT_ENV, secs),
            }
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn local_store(&self) -> Result<LocalStore> {
        match &self.default_file {
            Some(file_name) => LocalStore::with_default_file(&self.data_dir, file_name),
            None => LocalStore::new(&self.data_dir),
        }
    }

    pub fn remote_store(&self) -> Option<RemoteStore> {
        self.server_url
            .as_deref()
            .map(|url| RemoteStore::new(url, self.timeout()))
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use test_context::test_context;

    use super::*;
    use crate::tests::UsingTempDir;

    fn clear_env() {
        std::env::remove_var(DATA_DIR_ENV);
        std::env::remove_var(SERVER_ENV);
        std::env::remove_var(TIMEOUT_ENV);
    }

    #[test_context(UsingTempDir)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut UsingTempDir) {
        let settings = Settings::load(&ctx.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.data_dir.ends_with("minesweeper"));
        assert_eq!(settings.timeout(), Duration::from_secs(10));
    }

    #[test_context(UsingTempDir)]
    #[test]
    fn test_partial_file_fills_defaults(ctx: &mut UsingTempDir) {
        let path = ctx.path().join("settings.json");
        fs::write(&path, r#"{"version":0,"server_url":"http://localhost:8080/"}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.server_url.as_deref(), Some("http://localhost:8080/"));
        assert_eq!(settings.timeout_secs, 10);
        assert!(settings.default_file.is_none());
    }

    #[test_context(UsingTempDir)]
    #[test]
    fn test_save_then_load(ctx: &mut UsingTempDir) {
        let path = ctx.path().join("nested").join("settings.json");
        let settings = Settings {
            data_dir: ctx.path().join("scores"),
            default_file: Some("highscoreList.json".to_string()),
            timeout_secs: 3,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test_context(UsingTempDir)]
    #[test]
    fn test_malformed_file_is_reported(ctx: &mut UsingTempDir) {
        let path = ctx.path().join("settings.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(Settings::load(&path), Err(Error::Decode(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var(DATA_DIR_ENV, "/tmp/elsewhere");
        std::env::set_var(SERVER_ENV, "http://scores.example");
        std::env::set_var(TIMEOUT_ENV, "2");

        let settings = Settings::default().with_env_overrides();
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/elsewhere"));
        assert_eq!(settings.server_url.as_deref(), Some("http://scores.example"));
        assert_eq!(settings.timeout(), Duration::from_secs(2));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_bad_timeout_override_is_ignored() {
        clear_env();
        std::env::set_var(TIMEOUT_ENV, "soon");
        let settings = Settings::default().with_env_overrides();
        assert_eq!(settings.timeout_secs, 10);
        clear_env();
    }

    #[test]
    fn test_remote_store_only_with_server() {
        let mut settings = Settings::default();
        assert!(settings.remote_store().is_none());
        settings.server_url = Some("http://localhost:1".to_string());
        assert!(settings.remote_store().is_some());
    }
}
