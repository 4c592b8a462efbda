use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use autodidact_core::Planner;
use crate::api::routes::{
    build_queue, due_cards, generate_flashcards, get_queue, list_flashcards, list_focus,
    list_projects, post_review, project_stats, start_focus, upcoming_cards, AppState,
};
use crate::config::AppConfig;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/projects/:project/queue", get(get_queue).post(build_queue))
        .route("/projects/:project/due", get(due_cards))
        .route("/projects/:project/upcoming", get(upcoming_cards))
        .route("/projects/:project/flashcards", get(list_flashcards).post(generate_flashcards))
        .route("/projects/:project/reviews", axum::routing::post(post_review))
        .route("/projects/:project/stats", get(project_stats))
        .route("/focus", get(list_focus).post(start_focus))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(planner: Planner, config: AppConfig, addr: SocketAddr) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        planner,
        focus: config.focus,
        default_project: config.default_project,
    });
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
