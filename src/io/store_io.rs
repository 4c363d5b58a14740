use std::fs;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::backlog::BacklogItem;
use crate::model::board::Board;

/// Storage keys, one flat JSON file each
pub const TASKS_FILE: &str = "tasks.json";
pub const BACKLOG_FILE: &str = "backlog.json";

/// Error type for store I/O operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize {file}: {source}")]
    SerializeError {
        file: &'static str,
        source: serde_json::Error,
    },
}

/// Resolve the data directory: explicit override, then `XDG_DATA_HOME`,
/// then `~/.local/share`, always with an `eisen/` leaf.
pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"));
    base.join("eisen")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Read and parse the task collections. `Ok(None)` means no data yet; a
/// parse failure is an explicit error so callers can decide how to recover.
pub fn read_board(data_dir: &Path) -> Result<Option<Board>, StoreError> {
    read_key(data_dir, TASKS_FILE)
}

/// Read and parse the backlog.
pub fn read_backlog(data_dir: &Path) -> Result<Option<Vec<BacklogItem>>, StoreError> {
    read_key(data_dir, BACKLOG_FILE)
}

/// Load the board, falling back to an empty default when the file is
/// missing or corrupt. A corrupt file is backed up as `.bak` first so
/// nothing is lost, with a warning on stderr.
pub fn load_board_or_default(data_dir: &Path) -> Board {
    load_or_default(data_dir, TASKS_FILE, read_board)
}

/// Load the backlog with the same fallback behavior as the board.
pub fn load_backlog_or_default(data_dir: &Path) -> Vec<BacklogItem> {
    load_or_default(data_dir, BACKLOG_FILE, read_backlog)
}

fn read_key<T: serde::de::DeserializeOwned>(
    data_dir: &Path,
    file: &str,
) -> Result<Option<T>, StoreError> {
    let path = data_dir.join(file);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path).map_err(|e| StoreError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let value = serde_json::from_str(&content)
        .map_err(|e| StoreError::ParseError { path, source: e })?;
    Ok(Some(value))
}

fn load_or_default<T: Default>(
    data_dir: &Path,
    file: &str,
    read: impl Fn(&Path) -> Result<Option<T>, StoreError>,
) -> T {
    match read(data_dir) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            let path = data_dir.join(file);
            let bak = path.with_extension("json.bak");
            let _ = fs::copy(&path, &bak);
            eprintln!(
                "warning: {} (backed up as {}); starting from an empty {}",
                e,
                bak.display(),
                file
            );
            T::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Persist the task collections atomically. A failed write lands the
/// serialized payload in the recovery log before the error is returned.
pub fn save_board(data_dir: &Path, board: &Board) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(board).map_err(|e| StoreError::SerializeError {
        file: TASKS_FILE,
        source: e,
    })?;
    save_key(data_dir, TASKS_FILE, content)
}

/// Persist the backlog atomically, with the same recovery behavior.
pub fn save_backlog(data_dir: &Path, backlog: &[BacklogItem]) -> Result<(), StoreError> {
    let content =
        serde_json::to_string_pretty(backlog).map_err(|e| StoreError::SerializeError {
            file: BACKLOG_FILE,
            source: e,
        })?;
    save_key(data_dir, BACKLOG_FILE, content)
}

fn save_key(data_dir: &Path, file: &str, content: String) -> Result<(), StoreError> {
    if let Err(e) = fs::create_dir_all(data_dir) {
        return Err(StoreError::WriteError {
            path: data_dir.to_path_buf(),
            source: e,
        });
    }

    let path = data_dir.join(file);
    if let Err(e) = recovery::atomic_write(&path, content.as_bytes()) {
        recovery::log_recovery(
            data_dir,
            RecoveryEntry {
                timestamp: chrono::Utc::now(),
                category: RecoveryCategory::Write,
                description: "store write failed".to_string(),
                fields: vec![
                    ("Target".to_string(), file.to_string()),
                    ("Error".to_string(), e.to_string()),
                ],
                body: content,
            },
        );
        return Err(StoreError::WriteError { path, source: e });
    }
    Ok(())
}
