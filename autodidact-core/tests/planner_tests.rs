use autodidact_core::{
    memory::MemoryStore, CoreError, FixedIntervalScheduler, Flashcard, Planner, ProjectStore,
    Schedule, Transcript, TranscriptChunk,
};
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Arc;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn planner() -> (Planner, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let sched = Arc::new(FixedIntervalScheduler::new(Schedule::default()));
    (Planner::new(store.clone(), sched), store)
}

#[tokio::test]
async fn ensure_queue_without_flashcards_fails() {
    let (p, _) = planner();
    let err = p.ensure_queue("default", ymd(2024, 1, 1)).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound("flashcards")));
}

#[tokio::test]
async fn ensure_queue_builds_once_then_reuses() {
    let (p, store) = planner();
    let cards = vec![Flashcard::new("q1", "a1"), Flashcard::new("q2", "a2")];
    p.import_flashcards("typo", &cards).await.unwrap();

    let first = p.ensure_queue("typo", ymd(2024, 1, 1)).await.unwrap();
    assert_eq!(first.len(), 10);
    assert!(store.has_queue("typo").await.unwrap());

    // A later start date must not move an existing queue.
    let again = p.ensure_queue("typo", ymd(2024, 6, 1)).await.unwrap();
    assert_eq!(again, first);

    let rebuilt = p.rebuild_queue("typo", ymd(2024, 6, 1)).await.unwrap();
    assert_eq!(rebuilt[0].due_date, ymd(2024, 6, 2));
    assert_eq!(p.queue("typo").await.unwrap(), rebuilt);
}

#[tokio::test]
async fn due_reads_missing_queue_as_empty() {
    let (p, _) = planner();
    assert!(p.due("nothing", ymd(2024, 1, 2)).await.unwrap().is_empty());
}

#[tokio::test]
async fn reviews_never_touch_the_queue() {
    let (p, _) = planner();
    p.import_flashcards("default", &[Flashcard::new("q1", "a1")]).await.unwrap();
    let before = p.ensure_queue("default", ymd(2024, 1, 1)).await.unwrap();

    let at = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
    p.record_review("default", "q1", false, at).await.unwrap();
    p.record_review("default", "q1", true, at).await.unwrap();

    assert_eq!(p.queue("default").await.unwrap(), before);
    let st = p.stats("default", ymd(2024, 1, 2)).await.unwrap();
    assert_eq!(st.totals.total, 2);
    assert_eq!(st.streak, 1);
}

#[tokio::test]
async fn rejects_blank_review_and_bad_project() {
    let (p, _) = planner();
    let at = Utc::now();
    assert!(matches!(
        p.record_review("default", "  ", true, at).await,
        Err(CoreError::Invalid(_))
    ));
    assert!(matches!(
        p.record_review("../x", "q", true, at).await,
        Err(CoreError::Invalid(_))
    ));
}

#[tokio::test]
async fn generate_stores_five_cards() {
    let (p, store) = planner();
    let cards = p.generate_flashcards("default", "One. Two!").await.unwrap();
    assert_eq!(cards.len(), 5);
    assert_eq!(store.load_flashcards("default").await.unwrap().unwrap(), cards);
    assert_eq!(store.list_projects().await.unwrap(), vec!["default".to_string()]);
}

#[tokio::test]
async fn upcoming_rejects_oversized_window() {
    let (p, _) = planner();
    assert!(matches!(
        p.upcoming("default", ymd(2024, 1, 1), u32::MAX).await,
        Err(CoreError::Invalid(_))
    ));
    assert!(p.upcoming("default", ymd(2024, 1, 1), 36_500).await.unwrap().is_empty());
}

#[tokio::test]
async fn build_from_last_calendar_day_is_invalid_and_writes_nothing() {
    let (p, store) = planner();
    p.import_flashcards("default", &[Flashcard::new("q1", "a1")]).await.unwrap();
    let err = p.ensure_queue("default", NaiveDate::MAX).await.unwrap_err();
    assert!(matches!(err, CoreError::Invalid(_)));
    assert!(!store.has_queue("default").await.unwrap());
}

#[tokio::test]
async fn transcript_cards_are_stored() {
    let (p, store) = planner();
    let t = Transcript::Chunked {
        chunks: vec![
            TranscriptChunk { title: "Intro".into(), lines: vec!["Kerning adjusts pairs.".into()] },
            TranscriptChunk { title: "Body".into(), lines: vec!["Leading is line spacing.".into()] },
        ],
    };
    let cards = p.generate_from_transcript("video", &t).await.unwrap();
    assert_eq!(cards.len(), 10);
    assert_eq!(cards[5].answer, "Body");
    assert_eq!(store.load_flashcards("video").await.unwrap().unwrap(), cards);

    let empty = Transcript::Bare(vec![]);
    assert!(matches!(
        p.generate_from_transcript("video", &empty).await,
        Err(CoreError::Invalid(_))
    ));
}
