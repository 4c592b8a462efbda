use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Local, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use autodidact_core::{
    filter_by_text, validate_project, CoreError, Flashcard, FocusSession, Planner, ProjectStats,
    ProjectStore, QueueEntry,
};

use crate::api::dto::{BuildQueueIn, FocusIn, FocusStartedOut, GenerateIn, QueueBuiltOut, ReviewIn};
use crate::config::FocusConfig;
use crate::timer;

#[derive(Clone)]
pub struct AppState {
    pub planner: Planner,
    pub focus: FocusConfig,
    pub default_project: String,
}

#[derive(Deserialize)]
pub struct DueQuery {
    date: Option<NaiveDate>,
    q: Option<String>,
}

#[derive(Deserialize)]
pub struct UpcomingQuery {
    from: Option<NaiveDate>,
    days: Option<u32>,
}

type ApiResult<T> = Result<T, StatusCode>;

fn status_of(e: CoreError) -> StatusCode {
    match e {
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Invalid(_) => StatusCode::BAD_REQUEST,
        CoreError::Malformed { .. } | CoreError::Storage(_) => {
            warn!(error = %e, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn list_projects(State(st): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let v = st.planner.store().list_projects().await.map_err(status_of)?;
    Ok(Json(v))
}

pub async fn get_queue(State(st): State<Arc<AppState>>, Path(project): Path<String>) -> ApiResult<Json<Vec<QueueEntry>>> {
    Ok(Json(st.planner.queue(&project).await.map_err(status_of)?))
}

/// Builds the queue when the project has none; `rebuild` replaces an existing one.
pub async fn build_queue(
    State(st): State<Arc<AppState>>,
    Path(project): Path<String>,
    body: Option<Json<BuildQueueIn>>,
) -> ApiResult<(StatusCode, Json<QueueBuiltOut>)> {
    let Json(body) = body.unwrap_or_default();
    let start = body.start.unwrap_or_else(today);
    let queue = if body.rebuild {
        st.planner.rebuild_queue(&project, start).await
    } else {
        st.planner.ensure_queue(&project, start).await
    }
    .map_err(status_of)?;
    Ok((
        StatusCode::CREATED,
        Json(QueueBuiltOut { project, entries: queue.len(), rebuilt: body.rebuild }),
    ))
}

pub async fn due_cards(
    State(st): State<Arc<AppState>>,
    Path(project): Path<String>,
    Query(q): Query<DueQuery>,
) -> ApiResult<Json<Vec<QueueEntry>>> {
    let day = q.date.unwrap_or_else(today);
    let mut due = st.planner.due(&project, day).await.map_err(status_of)?;
    if let Some(text) = q.q.as_deref() {
        due = filter_by_text(&due, text);
    }
    Ok(Json(due))
}

pub async fn upcoming_cards(
    State(st): State<Arc<AppState>>,
    Path(project): Path<String>,
    Query(q): Query<UpcomingQuery>,
) -> ApiResult<Json<Vec<QueueEntry>>> {
    let from = q.from.unwrap_or_else(today);
    let v = st
        .planner
        .upcoming(&project, from, q.days.unwrap_or(7))
        .await
        .map_err(status_of)?;
    Ok(Json(v))
}

pub async fn list_flashcards(State(st): State<Arc<AppState>>, Path(project): Path<String>) -> ApiResult<Json<Vec<Flashcard>>> {
    Ok(Json(st.planner.flashcards(&project).await.map_err(status_of)?))
}

pub async fn generate_flashcards(
    State(st): State<Arc<AppState>>,
    Path(project): Path<String>,
    Json(body): Json<GenerateIn>,
) -> ApiResult<(StatusCode, Json<Vec<Flashcard>>)> {
    let cards = st
        .planner
        .generate_flashcards(&project, &body.text)
        .await
        .map_err(status_of)?;
    Ok((StatusCode::CREATED, Json(cards)))
}

pub async fn post_review(
    State(st): State<Arc<AppState>>,
    Path(project): Path<String>,
    Json(body): Json<ReviewIn>,
) -> ApiResult<StatusCode> {
    st.planner
        .record_review(&project, &body.question, body.correct, Utc::now())
        .await
        .map_err(status_of)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn project_stats(State(st): State<Arc<AppState>>, Path(project): Path<String>) -> ApiResult<Json<ProjectStats>> {
    Ok(Json(st.planner.stats(&project, today()).await.map_err(status_of)?))
}

pub async fn list_focus(State(st): State<Arc<AppState>>) -> ApiResult<Json<Vec<FocusSession>>> {
    Ok(Json(st.planner.store().list_focus_sessions().await.map_err(status_of)?))
}

/// Starts the timer in the background; the session is logged when it ends.
pub async fn start_focus(State(st): State<Arc<AppState>>, Json(body): Json<FocusIn>) -> ApiResult<(StatusCode, Json<FocusStartedOut>)> {
    let minutes = st.focus.lengths.check(body.minutes).map_err(status_of)?;
    let project = body.project.unwrap_or_else(|| st.default_project.clone());
    validate_project(&project).map_err(status_of)?;
    let session_type = body.session_type.unwrap_or_else(|| st.focus.session_type.clone());

    let store = st.planner.store().clone();
    let (kind, key) = (session_type.clone(), project.clone());
    tokio::spawn(async move {
        let out = timer::run_focus_session(&*store, minutes, &kind, &key, |_| {}, std::future::pending::<()>()).await;
        if let Err(e) = out {
            warn!(error = %e, "focus session not logged");
        }
    });
    info!(minutes, %project, "focus session scheduled");

    Ok((
        StatusCode::ACCEPTED,
        Json(FocusStartedOut {
            minutes,
            session_type,
            project,
            ends_at: Utc::now() + Duration::minutes(minutes as i64),
        }),
    ))
}
