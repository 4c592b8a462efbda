use crate::{
    due_on, generate_flashcards, generate_from_transcript, repo::ProjectStore,
    scheduler::ReviewScheduler, upcoming, CoreError, Flashcard, ProjectStats, QueueEntry,
    ReviewRecord, Transcript, MAX_OFFSET_DAYS,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Queue and review-log operations shared by the CLI and the HTTP API.
#[derive(Clone)]
pub struct Planner {
    store: Arc<dyn ProjectStore>,
    scheduler: Arc<dyn ReviewScheduler>,
}

impl Planner {
    pub fn new(store: Arc<dyn ProjectStore>, scheduler: Arc<dyn ReviewScheduler>) -> Self {
        Self { store, scheduler }
    }

    pub fn store(&self) -> &Arc<dyn ProjectStore> {
        &self.store
    }

    /// Reads the stored queue, or builds one from the project's flashcards
    /// starting at `today` when none exists yet.
    pub async fn ensure_queue(&self, project: &str, today: NaiveDate) -> Result<Vec<QueueEntry>, CoreError> {
        if self.store.has_queue(project).await? {
            debug!(project, "using stored queue");
            return self.store.read_queue(project).await;
        }
        self.build_and_write(project, today).await
    }

    /// Replaces the whole queue with a fresh build from `start`.
    pub async fn rebuild_queue(&self, project: &str, start: NaiveDate) -> Result<Vec<QueueEntry>, CoreError> {
        self.build_and_write(project, start).await
    }

    async fn build_and_write(&self, project: &str, start: NaiveDate) -> Result<Vec<QueueEntry>, CoreError> {
        let cards = self
            .store
            .load_flashcards(project)
            .await?
            .ok_or(CoreError::NotFound("flashcards"))?;
        let queue = self.scheduler.build_queue(&cards, start)?;
        self.store.write_queue(project, &queue).await?;
        info!(project, cards = cards.len(), entries = queue.len(), %start, "queue written");
        Ok(queue)
    }

    pub async fn queue(&self, project: &str) -> Result<Vec<QueueEntry>, CoreError> {
        self.store.read_queue(project).await
    }

    pub async fn due(&self, project: &str, day: NaiveDate) -> Result<Vec<QueueEntry>, CoreError> {
        let queue = self.store.read_queue(project).await?;
        Ok(due_on(&queue, day))
    }

    /// Windows longer than [`MAX_OFFSET_DAYS`] are rejected.
    pub async fn upcoming(&self, project: &str, from: NaiveDate, days: u32) -> Result<Vec<QueueEntry>, CoreError> {
        if days > MAX_OFFSET_DAYS {
            return Err(CoreError::Invalid("upcoming window too long"));
        }
        let queue = self.store.read_queue(project).await?;
        Ok(upcoming(&queue, from, days))
    }

    /// Appends to the review log. The queue is left untouched.
    pub async fn record_review(
        &self,
        project: &str,
        question: &str,
        correct: bool,
        at: DateTime<Utc>,
    ) -> Result<ReviewRecord, CoreError> {
        if question.trim().is_empty() {
            return Err(CoreError::Invalid("question"));
        }
        let record = ReviewRecord::new(question, correct, at);
        self.store.append_review(project, &record).await?;
        debug!(project, correct, "review logged");
        Ok(record)
    }

    pub async fn stats(&self, project: &str, today: NaiveDate) -> Result<ProjectStats, CoreError> {
        let reviews = self.store.list_reviews(project).await?;
        Ok(ProjectStats::from_reviews(project, &reviews, today))
    }

    pub async fn flashcards(&self, project: &str) -> Result<Vec<Flashcard>, CoreError> {
        Ok(self.store.load_flashcards(project).await?.unwrap_or_default())
    }

    pub async fn import_flashcards(&self, project: &str, cards: &[Flashcard]) -> Result<(), CoreError> {
        if cards.is_empty() {
            return Err(CoreError::Invalid("no flashcards to import"));
        }
        self.store.save_flashcards(project, cards).await?;
        info!(project, cards = cards.len(), "flashcards saved");
        Ok(())
    }

    /// Runs the placeholder generator over `text` and stores the result.
    pub async fn generate_flashcards(&self, project: &str, text: &str) -> Result<Vec<Flashcard>, CoreError> {
        let cards = generate_flashcards(text);
        self.import_flashcards(project, &cards).await?;
        Ok(cards)
    }

    /// Generates five cards per transcript chunk and stores them all. A
    /// transcript without content is invalid.
    pub async fn generate_from_transcript(&self, project: &str, transcript: &Transcript) -> Result<Vec<Flashcard>, CoreError> {
        let cards = generate_from_transcript(transcript);
        self.import_flashcards(project, &cards).await?;
        Ok(cards)
    }
}
