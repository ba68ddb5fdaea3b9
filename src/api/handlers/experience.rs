use axum::{extract::{State, Path, Query}, response::IntoResponse};
use crate::state::AppState;
use crate::api::dtos::{
    requests::SearchQuery,
    responses::{ApiResponse, ExperienceDetail, SlotView},
};
use crate::error::AppError;
use std::sync::Arc;
use tracing::debug;

pub async fn list_experiences(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let term = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let experiences = state.experience_repo.search(term).await?;

    debug!("list_experiences: {} results for {:?}", experiences.len(), term);
    Ok(ApiResponse::ok(experiences))
}

pub async fn get_experience(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let experience = state.experience_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Experience not found".into()))?;

    let slots = state.slot_repo.list_by_experience(&experience.id).await?
        .into_iter()
        .map(SlotView::from)
        .collect();

    Ok(ApiResponse::ok(ExperienceDetail { experience, slots }))
}
