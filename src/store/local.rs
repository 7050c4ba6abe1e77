use log::{debug, info, trace};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::json::{decode_list, encode_list};
use crate::model::{Difficulty, HighscoreEntry, HighscoreList};
use crate::settings::default_data_dir;
use crate::store::HighscoreStore;

/// Highscore lists kept as JSON files, one per difficulty, plus an optional
/// unscoped file.
///
/// Nothing is cached: every read goes to disk. Two writers saving to the same
/// difficulty at once race on the read-modify-write, so callers that need
/// ordering have to serialize their saves.
#[derive(Debug)]
pub struct LocalStore {
    data_dir: PathBuf,
    files: HashMap<Difficulty, PathBuf>,
    default_file: Option<PathBuf>,
}

impl LocalStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open(data_dir.into(), None)
    }

    /// Also manages `data_dir/file_name` for callers that do not pick a difficulty.
    ///
    /// `file_name` must be a plain file name that is not one of the per-difficulty
    /// files.
    pub fn with_default_file(data_dir: impl Into<PathBuf>, file_name: &str) -> Result<Self> {
        check_default_file_name(file_name)?;
        let data_dir = data_dir.into();
        let default_file = data_dir.join(file_name);
        Self::open(data_dir, Some(default_file))
    }

    /// Store rooted at `<per-user data dir>/minesweeper`.
    pub fn in_user_data_dir() -> Result<Self> {
        Self::new(default_data_dir())
    }

    fn open(data_dir: PathBuf, default_file: Option<PathBuf>) -> Result<Self> {
        let files = Difficulty::all()
            .into_iter()
            .map(|difficulty| (difficulty, data_dir.join(difficulty.file_name())))
            .collect();
        debug!("Highscore directory: {:?}", data_dir);

        let store = Self {
            data_dir,
            files,
            default_file,
        };
        store.make_files()?;
        Ok(store)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, difficulty: Difficulty) -> &Path {
        &self.files[&difficulty]
    }

    pub fn default_file(&self) -> Option<&Path> {
        self.default_file.as_deref()
    }

    pub fn read_highscore_list(&self, difficulty: Difficulty) -> Result<HighscoreList> {
        self.make_files()?;
        read_list(self.path_for(difficulty))
    }

    pub fn read_default_list(&self) -> Result<HighscoreList> {
        let path = self.default_file.as_deref().ok_or(Error::NoDefaultFile)?;
        self.make_files()?;
        read_list(path)
    }

    pub fn save_score(&self, entry: &HighscoreEntry, difficulty: Difficulty) -> Result<()> {
        let mut list = self.read_highscore_list(difficulty)?;
        list.add_entry(entry.clone());
        write_list(self.path_for(difficulty), &list)?;
        info!(
            "Saved {} ({}) to the {} highscores",
            entry.name(),
            entry.score(),
            difficulty
        );
        Ok(())
    }

    pub fn save_default_score(&self, entry: &HighscoreEntry) -> Result<()> {
        let path = self.default_file.as_deref().ok_or(Error::NoDefaultFile)?;
        let mut list = self.read_default_list()?;
        list.add_entry(entry.clone());
        write_list(path, &list)?;
        info!("Saved {} ({}) to {:?}", entry.name(), entry.score(), path);
        Ok(())
    }

    /// Writes an empty list into every backing file that has no content yet.
    /// Files with content are left alone even if they no longer decode.
    pub fn set_empty_lists(&self) -> Result<()> {
        let empty = HighscoreList::new();
        for path in self.all_paths() {
            if is_empty_file(path)? {
                debug!("Bootstrapping empty highscore list in {:?}", path);
                write_list(path, &empty)?;
            }
        }
        Ok(())
    }

    fn all_paths(&self) -> impl Iterator<Item = &Path> {
        self.default_file
            .as_deref()
            .into_iter()
            .chain(self.files.values().map(PathBuf::as_path))
    }

    fn make_files(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| Error::io(&self.data_dir, e))?;
        for path in self.all_paths() {
            // Create-if-missing; never truncates.
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| Error::io(path, e))?;
        }
        self.set_empty_lists()
    }
}

impl HighscoreStore for LocalStore {
    fn get(&self, difficulty: Difficulty) -> Result<HighscoreList> {
        self.read_highscore_list(difficulty)
    }

    fn save(&self, entry: &HighscoreEntry, difficulty: Difficulty) -> Result<()> {
        self.save_score(entry, difficulty)
    }
}

fn check_default_file_name(file_name: &str) -> Result<()> {
    let plain = !file_name.trim().is_empty()
        && file_name != "."
        && file_name != ".."
        && !file_name.chars().any(|c| c == '/' || std::path::is_separator(c));
    let taken = Difficulty::all()
        .iter()
        .any(|difficulty| difficulty.file_name() == file_name);
    if plain && !taken {
        Ok(())
    } else {
        Err(Error::InvalidDefaultFile(file_name.to_string()))
    }
}

fn is_empty_file(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.len() == 0),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
        Err(e) => Err(Error::io(path, e)),
    }
}

fn read_list(path: &Path) -> Result<HighscoreList> {
    trace!("Reading highscores from {:?}", path);
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(decode_list(&contents)?)
}

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Opens a fresh temp file next to `path`. Every call gets its own file, so
/// concurrent saves never write into each other's temp file.
fn create_tmp_file(path: &Path) -> Result<(PathBuf, fs::File)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("highscores.json");
    loop {
        let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_path = path.with_file_name(format!(
            ".{}.tmp-{}-{}",
            file_name,
            std::process::id(),
            counter
        ));
        match OpenOptions::new().write(true).create_new(true).open(&tmp_path) {
            Ok(file) => return Ok((tmp_path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(Error::io(&tmp_path, e)),
        }
    }
}

/// Encodes the whole list first, then swaps it in with a rename so a reader never
/// sees a half-written file.
fn write_list(path: &Path, list: &HighscoreList) -> Result<()> {
    let contents = encode_list(list);
    let (tmp_path, mut tmp) = create_tmp_file(path)?;

    let written = tmp
        .write_all(contents.as_bytes())
        .and_then(|_| tmp.sync_all());
    drop(tmp);
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::io(&tmp_path, e));
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        Error::io(path, e)
    })
}
