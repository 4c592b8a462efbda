use crate::{CoreError, Flashcard, FocusSession, QueueEntry, ReviewRecord};
use async_trait::async_trait;

pub mod memory;

/// Document store keyed by project. Every document is read and written whole.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<String>, CoreError>;

    // Flashcards
    /// `None` when the project has no flashcard set yet.
    async fn load_flashcards(&self, project: &str) -> Result<Option<Vec<Flashcard>>, CoreError>;
    async fn save_flashcards(&self, project: &str, cards: &[Flashcard]) -> Result<(), CoreError>;

    // Queue
    async fn has_queue(&self, project: &str) -> Result<bool, CoreError>;
    /// A missing queue reads as empty. A queue that does not parse is an error.
    async fn read_queue(&self, project: &str) -> Result<Vec<QueueEntry>, CoreError>;
    async fn write_queue(&self, project: &str, queue: &[QueueEntry]) -> Result<(), CoreError>;

    // Review log (append-only)
    async fn append_review(&self, project: &str, record: &ReviewRecord) -> Result<(), CoreError>;
    async fn list_reviews(&self, project: &str) -> Result<Vec<ReviewRecord>, CoreError>;

    // Focus log (global, append-only)
    async fn append_focus_session(&self, session: &FocusSession) -> Result<(), CoreError>;
    async fn list_focus_sessions(&self) -> Result<Vec<FocusSession>, CoreError>;
}
