use crate::QueueEntry;
use chrono::{Days, NaiveDate};

/// Entries due exactly on `day`, in queue order.
pub fn due_on(queue: &[QueueEntry], day: NaiveDate) -> Vec<QueueEntry> {
    queue.iter().filter(|e| e.due_date == day).cloned().collect()
}

/// Entries due in `[from, from + days)`, ordered by date. Entries sharing a
/// date keep their queue order. A window running past the last representable
/// date is open-ended.
pub fn upcoming(queue: &[QueueEntry], from: NaiveDate, days: u32) -> Vec<QueueEntry> {
    let until = from.checked_add_days(Days::new(u64::from(days)));
    let mut v: Vec<QueueEntry> = queue
        .iter()
        .filter(|e| e.due_date >= from && until.map_or(true, |u| e.due_date < u))
        .cloned()
        .collect();
    v.sort_by_key(|e| e.due_date);
    v
}

pub fn filter_by_text(queue: &[QueueEntry], query: &str) -> Vec<QueueEntry> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return queue.to_vec();
    }
    queue
        .iter()
        .filter(|e| e.question.to_lowercase().contains(&q) || e.answer.to_lowercase().contains(&q))
        .cloned()
        .collect()
}
