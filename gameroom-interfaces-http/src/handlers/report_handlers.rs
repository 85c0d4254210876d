use axum::extract::{Query, State};
use axum::Json;

use gameroom_application::queries::report_queries;
use gameroom_application::AppState;
use gameroom_domain::{
    ClientProjection, CompetitionEngagement, Demographics, EventSummaryRow, EventTopUsersQuery,
    EventTopUsersReport, GameMonthPivot, GameTotal, GrowthReport, HeavyUserRow, HeavyUsersQuery,
    LevelShare, OrderSummaryRow, OrderValueRow, ProjectionQuery,
};

use crate::error::HttpError;

pub async fn growth(State(state): State<AppState>) -> Result<Json<GrowthReport>, HttpError> {
    Ok(Json(report_queries::growth_report(&state).await?))
}

pub async fn tickets_by_game(
    State(state): State<AppState>,
) -> Result<Json<Vec<GameTotal>>, HttpError> {
    Ok(Json(report_queries::tickets_by_game(&state).await?))
}

pub async fn tickets_by_game_month(
    State(state): State<AppState>,
) -> Result<Json<GameMonthPivot>, HttpError> {
    Ok(Json(report_queries::tickets_by_game_month(&state).await?))
}

pub async fn event_summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventSummaryRow>>, HttpError> {
    Ok(Json(report_queries::event_summary(&state).await?))
}

pub async fn orders_by_event(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderSummaryRow>>, HttpError> {
    Ok(Json(report_queries::orders_by_event(&state).await?))
}

pub async fn order_values_by_event(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderValueRow>>, HttpError> {
    Ok(Json(report_queries::order_values_by_event(&state).await?))
}

pub async fn heavy_users(
    State(state): State<AppState>,
    Query(query): Query<HeavyUsersQuery>,
) -> Result<Json<Vec<HeavyUserRow>>, HttpError> {
    Ok(Json(report_queries::heavy_users(&state, query).await?))
}

pub async fn event_top_users(
    State(state): State<AppState>,
    Query(query): Query<EventTopUsersQuery>,
) -> Result<Json<EventTopUsersReport>, HttpError> {
    Ok(Json(report_queries::event_top_users(&state, query).await?))
}

pub async fn tickets_by_level(
    State(state): State<AppState>,
) -> Result<Json<Vec<LevelShare>>, HttpError> {
    Ok(Json(report_queries::tickets_by_level(&state).await?))
}

pub async fn projection(
    State(state): State<AppState>,
    Query(query): Query<ProjectionQuery>,
) -> Result<Json<ClientProjection>, HttpError> {
    Ok(Json(report_queries::client_projection(&state, query).await?))
}

pub async fn competitions(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompetitionEngagement>>, HttpError> {
    Ok(Json(report_queries::competition_engagement(&state).await?))
}

pub async fn demographics(
    State(state): State<AppState>,
) -> Result<Json<Demographics>, HttpError> {
    Ok(Json(report_queries::demographics(&state).await?))
}
