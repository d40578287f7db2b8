pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cover_letter::handlers as cover_letter;
use crate::job_board::handlers as job_board;
use crate::matching::handlers as matching;
use crate::saved::handlers as saved;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job search
        .route("/api/v1/resume/upload", post(matching::handle_resume_upload))
        .route(
            "/api/v1/filters/job_search",
            post(matching::handle_filter_search),
        )
        // Resume scoring
        .route("/api/v1/resume_score/score", post(scoring::handle_score))
        // Cover letters
        .route("/api/v1/cover_letter/create", post(cover_letter::handle_create))
        .route(
            "/api/v1/cover_letter/save/:owner_id",
            post(saved::handle_save_cover_letter),
        )
        .route(
            "/api/v1/cover_letter/get_by_id/:id",
            get(saved::handle_get_cover_letter),
        )
        // GET lists by owner id, DELETE removes by cover letter id.
        .route(
            "/api/v1/cover_letter/:id",
            get(saved::handle_list_cover_letters).delete(saved::handle_delete_cover_letter),
        )
        // Public job board
        .route("/api/v1/job_board/fetch", post(job_board::handle_fetch))
        .route("/api/v1/job_board/search", post(job_board::handle_search))
        // Saved jobs
        .route("/api/v1/jobs/save/:owner_id", post(saved::handle_save_job))
        .route("/api/v1/jobs/get_by_id/:id", get(saved::handle_get_job))
        // GET lists by owner id, DELETE removes by job id.
        .route(
            "/api/v1/jobs/:id",
            get(saved::handle_list_jobs).delete(saved::handle_delete_job),
        )
        .with_state(state)
}
