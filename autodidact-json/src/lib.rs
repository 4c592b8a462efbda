//! Flat-file [`ProjectStore`].
//!
//! ```text
//! <root>/projects/<project>/flashcards.json
//! <root>/projects/<project>/spaced_review_queue.json
//! <root>/projects/<project>/review_log.json
//! <root>/projects/<project>/backups/queue-<ts>-<seq>.json
//! <root>/focus_log.json
//! ```
//!
//! Files are replaced whole through a temp file in the same directory.
//! Read-modify-write cycles hold a process-wide lock; writers in other
//! processes still race (last writer wins).

use async_trait::async_trait;
use autodidact_core::{
    repo::ProjectStore, validate_project, CoreError, Flashcard, FocusSession, QueueEntry,
    ReviewRecord,
};
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::task;
use tracing::{debug, warn};

pub mod paths;

pub const DEFAULT_MAX_BACKUPS: usize = 10;

pub struct JsonStore {
    root: PathBuf,
    max_backups: usize,
    lock: Arc<Mutex<()>>,
}

impl JsonStore {
    pub async fn open_default() -> Result<Self, CoreError> {
        Self::open_with(paths::data_root(), DEFAULT_MAX_BACKUPS).await
    }

    pub async fn open_with(root: PathBuf, max_backups: usize) -> Result<Self, CoreError> {
        ensure_dir(&root.join(paths::PROJECTS_DIR))?;
        debug!(root = %root.display(), "json store opened");
        Ok(Self {
            root,
            max_backups: max_backups.max(1),
            lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn project_dir(&self, project: &str) -> Result<PathBuf, CoreError> {
        validate_project(project)?;
        Ok(self.root.join(paths::PROJECTS_DIR).join(project))
    }

    pub fn queue_path(&self, project: &str) -> Result<PathBuf, CoreError> {
        Ok(self.project_dir(project)?.join(paths::QUEUE_FILE))
    }

    pub fn flashcards_path(&self, project: &str) -> Result<PathBuf, CoreError> {
        Ok(self.project_dir(project)?.join(paths::FLASHCARDS_FILE))
    }

    pub fn review_log_path(&self, project: &str) -> Result<PathBuf, CoreError> {
        Ok(self.project_dir(project)?.join(paths::REVIEW_LOG_FILE))
    }

    pub fn backups_dir(&self, project: &str) -> Result<PathBuf, CoreError> {
        Ok(self.project_dir(project)?.join(paths::BACKUPS_DIR))
    }

    pub fn focus_log_path(&self) -> PathBuf {
        self.root.join(paths::FOCUS_LOG_FILE)
    }
}

async fn blocking<T, F>(f: F) -> Result<T, CoreError>
where
    F: FnOnce() -> Result<T, CoreError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|_| CoreError::Storage("io task"))?
}

fn io_err(e: io::Error) -> CoreError {
    warn!(error = %e, "json store io failure");
    CoreError::Storage("io")
}

fn ensure_dir(path: &Path) -> Result<(), CoreError> {
    fs::create_dir_all(path).map_err(io_err)
}

/// `Ok(None)` when the file does not exist; a parse failure is `Malformed`.
fn read_json<T: DeserializeOwned>(path: &Path, what: &'static str) -> Result<Option<T>, CoreError> {
    let buf = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_err(e)),
    };
    let v = serde_json::from_str::<T>(&buf).map_err(|e| CoreError::malformed(what, e))?;
    debug!(path = %path.display(), what, "read");
    Ok(Some(v))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), io::Error> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<Vec<u8>, CoreError> {
    let json = serde_json::to_vec_pretty(value).map_err(|_| CoreError::Storage("serialize"))?;
    write_atomic(path, &json).map_err(io_err)?;
    debug!(path = %path.display(), bytes = json.len(), "wrote");
    Ok(json)
}

fn write_backup(backups_dir: &Path, json: &[u8], keep: usize) -> Result<(), io::Error> {
    fs::create_dir_all(backups_dir)?;
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f").to_string();
    write_atomic(&backup_path(backups_dir, &ts), json)?;
    rotate_backups(backups_dir, keep)
}

/// `queue-<ts>-<seq>.json`; `seq` keeps writes within the same millisecond apart.
fn backup_path(dir: &Path, ts: &str) -> PathBuf {
    let mut seq = 0u32;
    loop {
        let path = dir.join(format!("queue-{ts}-{seq:03}.json"));
        if !path.exists() {
            return path;
        }
        seq += 1;
    }
}

/// Names sort in write order, so the oldest come first.
fn rotate_backups(dir: &Path, keep: usize) -> Result<(), io::Error> {
    let mut names: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    names.sort();
    if names.len() > keep {
        for p in &names[..names.len() - keep] {
            let _ = fs::remove_file(p);
        }
    }
    Ok(())
}

fn append_json<T>(lock: &Mutex<()>, path: &Path, what: &'static str, item: T) -> Result<(), CoreError>
where
    T: Serialize + DeserializeOwned,
{
    let _guard = lock.lock();
    let mut items: Vec<T> = read_json(path, what)?.unwrap_or_default();
    items.push(item);
    write_json(path, &items)?;
    Ok(())
}

#[async_trait]
impl ProjectStore for JsonStore {
    async fn list_projects(&self) -> Result<Vec<String>, CoreError> {
        let dir = self.root.join(paths::PROJECTS_DIR);
        blocking(move || {
            let rd = match fs::read_dir(&dir) {
                Ok(rd) => rd,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
                Err(e) => return Err(io_err(e)),
            };
            let mut v: Vec<String> = rd
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_dir())
                .filter_map(|e| e.file_name().into_string().ok())
                .filter(|name| validate_project(name).is_ok())
                .collect();
            v.sort();
            Ok(v)
        })
        .await
    }

    async fn load_flashcards(&self, project: &str) -> Result<Option<Vec<Flashcard>>, CoreError> {
        let path = self.flashcards_path(project)?;
        blocking(move || read_json(&path, "flashcards")).await
    }

    async fn save_flashcards(&self, project: &str, cards: &[Flashcard]) -> Result<(), CoreError> {
        let path = self.flashcards_path(project)?;
        let cards = cards.to_vec();
        let lock = self.lock.clone();
        blocking(move || {
            let _guard = lock.lock();
            write_json(&path, &cards).map(|_| ())
        })
        .await
    }

    async fn has_queue(&self, project: &str) -> Result<bool, CoreError> {
        let path = self.queue_path(project)?;
        blocking(move || Ok(path.is_file())).await
    }

    async fn read_queue(&self, project: &str) -> Result<Vec<QueueEntry>, CoreError> {
        let path = self.queue_path(project)?;
        blocking(move || Ok(read_json(&path, "queue")?.unwrap_or_default())).await
    }

    async fn write_queue(&self, project: &str, queue: &[QueueEntry]) -> Result<(), CoreError> {
        let path = self.queue_path(project)?;
        let backups = self.backups_dir(project)?;
        let keep = self.max_backups;
        let queue = queue.to_vec();
        let lock = self.lock.clone();
        blocking(move || {
            let _guard = lock.lock();
            let json = write_json(&path, &queue)?;
            write_backup(&backups, &json, keep).map_err(io_err)
        })
        .await
    }

    async fn append_review(&self, project: &str, record: &ReviewRecord) -> Result<(), CoreError> {
        let path = self.review_log_path(project)?;
        let record = record.clone();
        let lock = self.lock.clone();
        blocking(move || append_json(&lock, &path, "review log", record)).await
    }

    async fn list_reviews(&self, project: &str) -> Result<Vec<ReviewRecord>, CoreError> {
        let path = self.review_log_path(project)?;
        blocking(move || Ok(read_json(&path, "review log")?.unwrap_or_default())).await
    }

    async fn append_focus_session(&self, session: &FocusSession) -> Result<(), CoreError> {
        let path = self.focus_log_path();
        let session = session.clone();
        let lock = self.lock.clone();
        blocking(move || {
            let _guard = lock.lock();
            let mut sessions = read_focus_log(&path)?;
            sessions.push(session);
            write_json(&path, &sessions).map(|_| ())
        })
        .await
    }

    async fn list_focus_sessions(&self) -> Result<Vec<FocusSession>, CoreError> {
        let path = self.focus_log_path();
        blocking(move || read_focus_log(&path)).await
    }
}

/// The focus log starts over when it does not parse.
fn read_focus_log(path: &Path) -> Result<Vec<FocusSession>, CoreError> {
    match read_json(path, "focus log") {
        Ok(v) => Ok(v.unwrap_or_default()),
        Err(CoreError::Malformed { detail, .. }) => {
            warn!(path = %path.display(), %detail, "focus log unreadable, starting a new one");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
