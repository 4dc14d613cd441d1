use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::services::{
    profile_service::ProfileService, recommendation_service::RecommendationService, AppState,
};

/// Returns the derived learning profile. Analysis never fails; a user with no
/// history (or an unreadable one) gets the default beginner profile.
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    tracing::info!("Analyzing learning profile for user: {}", user_id);

    let service = ProfileService::new(state.attempts.clone());
    let profile = service.analyze_user_profile(&user_id).await;

    (StatusCode::OK, Json(profile))
}

pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!("Getting recommendations for user: {}", user_id);

    let profile = ProfileService::new(state.attempts.clone())
        .analyze_user_profile(&user_id)
        .await;

    let service = RecommendationService::new(state.catalog.clone());

    match service.get_recommended_questions(&profile).await {
        Ok(recommendations) => Ok((StatusCode::OK, Json(recommendations))),
        Err(e) => {
            tracing::error!("Failed to get recommendations for user {}: {}", user_id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get recommendations".to_string(),
            ))
        }
    }
}
