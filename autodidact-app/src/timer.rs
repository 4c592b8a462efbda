use autodidact_core::{CoreError, FocusSession, ProjectStore};
use chrono::Utc;
use std::future::Future;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    Completed,
    Cancelled,
}

/// Ticks once a second with the seconds still remaining; stops early when
/// `cancel` resolves.
pub async fn countdown<C>(minutes: u32, mut on_tick: impl FnMut(u64), cancel: C) -> TimerOutcome
where
    C: Future,
{
    let mut remaining = u64::from(minutes) * 60;
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;
    tokio::pin!(cancel);
    while remaining > 0 {
        on_tick(remaining);
        tokio::select! {
            _ = ticker.tick() => remaining -= 1,
            _ = &mut cancel => return TimerOutcome::Cancelled,
        }
    }
    on_tick(0);
    TimerOutcome::Completed
}

/// Runs one focus session and appends it to the focus log when it completes.
/// Cancelled sessions are not logged.
pub async fn run_focus_session<C>(
    store: &dyn ProjectStore,
    minutes: u32,
    session_type: &str,
    project: &str,
    on_tick: impl FnMut(u64),
    cancel: C,
) -> Result<Option<FocusSession>, CoreError>
where
    C: Future,
{
    let start = Utc::now();
    info!(minutes, session_type, project, "focus session started");
    if countdown(minutes, on_tick, cancel).await == TimerOutcome::Cancelled {
        info!(project, "focus session cancelled");
        return Ok(None);
    }
    let session = FocusSession::completed(start, Utc::now(), session_type, project);
    store.append_focus_session(&session).await?;
    info!(project, minutes = session.session_length, "focus session logged");
    Ok(Some(session))
}
