use directories::ProjectDirs;
use std::path::PathBuf;

pub const PROJECTS_DIR: &str = "projects";
pub const FLASHCARDS_FILE: &str = "flashcards.json";
pub const QUEUE_FILE: &str = "spaced_review_queue.json";
pub const REVIEW_LOG_FILE: &str = "review_log.json";
pub const FOCUS_LOG_FILE: &str = "focus_log.json";
pub const BACKUPS_DIR: &str = "backups";
pub const CONFIG_FILE: &str = "config.toml";

pub fn data_root() -> PathBuf {
    // org = "autodidact", app = "Autodidact"
    if let Some(pd) = ProjectDirs::from("com", "autodidact", "Autodidact") {
        pd.data_dir().to_path_buf()
    } else {
        // Fallback: current dir
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

pub fn default_config_file() -> PathBuf {
    data_root().join(CONFIG_FILE)
}
