use crate::{validate_project, CoreError, Flashcard, FocusSession, QueueEntry, ReviewRecord};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

#[derive(Default)]
pub struct MemoryStore {
    flashcards: RwLock<HashMap<String, Vec<Flashcard>>>,
    queues: RwLock<HashMap<String, Vec<QueueEntry>>>,
    reviews: RwLock<HashMap<String, Vec<ReviewRecord>>>,
    focus: RwLock<Vec<FocusSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl crate::repo::ProjectStore for MemoryStore {
    async fn list_projects(&self) -> Result<Vec<String>, CoreError> {
        let mut keys = BTreeSet::new();
        keys.extend(self.flashcards.read().keys().cloned());
        keys.extend(self.queues.read().keys().cloned());
        keys.extend(self.reviews.read().keys().cloned());
        Ok(keys.into_iter().collect())
    }

    async fn load_flashcards(&self, project: &str) -> Result<Option<Vec<Flashcard>>, CoreError> {
        validate_project(project)?;
        Ok(self.flashcards.read().get(project).cloned())
    }

    async fn save_flashcards(&self, project: &str, cards: &[Flashcard]) -> Result<(), CoreError> {
        validate_project(project)?;
        self.flashcards
            .write()
            .insert(project.to_string(), cards.to_vec());
        Ok(())
    }

    async fn has_queue(&self, project: &str) -> Result<bool, CoreError> {
        validate_project(project)?;
        Ok(self.queues.read().contains_key(project))
    }

    async fn read_queue(&self, project: &str) -> Result<Vec<QueueEntry>, CoreError> {
        validate_project(project)?;
        Ok(self.queues.read().get(project).cloned().unwrap_or_default())
    }

    async fn write_queue(&self, project: &str, queue: &[QueueEntry]) -> Result<(), CoreError> {
        validate_project(project)?;
        self.queues.write().insert(project.to_string(), queue.to_vec());
        Ok(())
    }

    async fn append_review(&self, project: &str, record: &ReviewRecord) -> Result<(), CoreError> {
        validate_project(project)?;
        self.reviews
            .write()
            .entry(project.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn list_reviews(&self, project: &str) -> Result<Vec<ReviewRecord>, CoreError> {
        validate_project(project)?;
        Ok(self.reviews.read().get(project).cloned().unwrap_or_default())
    }

    async fn append_focus_session(&self, session: &FocusSession) -> Result<(), CoreError> {
        self.focus.write().push(session.clone());
        Ok(())
    }

    async fn list_focus_sessions(&self) -> Result<Vec<FocusSession>, CoreError> {
        Ok(self.focus.read().clone())
    }
}
