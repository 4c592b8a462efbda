use crate::{CoreError, Flashcard, QueueEntry, Schedule};
use chrono::{Days, NaiveDate};
use tracing::debug;

/// Turns a card set into a due-queue. Callers only see this trait, so an
/// adaptive algorithm can slot in behind it later.
pub trait ReviewScheduler: Send + Sync {
    fn build_queue(&self, cards: &[Flashcard], start: NaiveDate) -> Result<Vec<QueueEntry>, CoreError>;
}

/// Every card comes due once per schedule offset. Review outcomes are ignored.
#[derive(Clone, Debug, Default)]
pub struct FixedIntervalScheduler {
    schedule: Schedule,
}

impl FixedIntervalScheduler {
    pub fn new(schedule: Schedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}

impl ReviewScheduler for FixedIntervalScheduler {
    fn build_queue(&self, cards: &[Flashcard], start: NaiveDate) -> Result<Vec<QueueEntry>, CoreError> {
        build_queue(cards, start, &self.schedule)
    }
}

/// Entries are grouped by card, then by offset, in input order.
///
/// Fails only when `start` is so close to the end of the calendar that a due
/// date cannot be represented.
pub fn build_queue(cards: &[Flashcard], start: NaiveDate, schedule: &Schedule) -> Result<Vec<QueueEntry>, CoreError> {
    let due_dates = schedule
        .offsets()
        .iter()
        .map(|&days| start.checked_add_days(Days::new(u64::from(days))))
        .collect::<Option<Vec<_>>>()
        .ok_or(CoreError::Invalid("start date out of range"))?;

    let mut queue = Vec::with_capacity(cards.len() * due_dates.len());
    for card in cards {
        for &due in &due_dates {
            queue.push(QueueEntry::for_card(card, due));
        }
    }
    debug!(cards = cards.len(), entries = queue.len(), %start, "built review queue");
    Ok(queue)
}
