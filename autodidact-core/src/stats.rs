use crate::ReviewRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Totals {
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
}

impl Totals {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn accuracy(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f32 / self.total as f32
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct StatsSummary {
    pub totals: Totals,
    pub per_day: BTreeMap<NaiveDate, Totals>,
}

pub fn summarize(reviews: &[ReviewRecord]) -> StatsSummary {
    let mut summary = StatsSummary::default();
    for r in reviews {
        summary.totals.record(r.correct);
        let d = r.timestamp.date_naive();
        summary.per_day.entry(d).or_default().record(r.correct);
    }
    summary
}

/// Consecutive days ending at `today` with at least one review.
pub fn daily_streak(reviews: &[ReviewRecord], today: NaiveDate) -> u32 {
    let per_day = summarize(reviews).per_day;
    let mut streak = 0u32;
    let mut day = today;
    while per_day.get(&day).map(|t| t.total > 0).unwrap_or(false) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Review statistics for one project as reported by the CLI and API.
#[derive(Clone, Debug, Serialize)]
pub struct ProjectStats {
    pub project: String,
    pub totals: Totals,
    pub accuracy: f32,
    pub streak: u32,
    pub per_day: BTreeMap<NaiveDate, Totals>,
}

impl ProjectStats {
    pub fn from_reviews(project: impl Into<String>, reviews: &[ReviewRecord], today: NaiveDate) -> Self {
        let summary = summarize(reviews);
        Self {
            project: project.into(),
            accuracy: summary.totals.accuracy(),
            totals: summary.totals,
            streak: daily_streak(reviews, today),
            per_day: summary.per_day,
        }
    }
}
