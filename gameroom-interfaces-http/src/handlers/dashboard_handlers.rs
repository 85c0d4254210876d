use axum::extract::State;
use axum::response::Html;
use axum::Json;

use gameroom_application::queries::dashboard_queries;
use gameroom_application::AppState;
use gameroom_domain::Dashboard;

use crate::error::HttpError;

pub async fn dashboard_json(State(state): State<AppState>) -> Result<Json<Dashboard>, HttpError> {
    Ok(Json(dashboard_queries::load_dashboard(&state).await?))
}

pub async fn dashboard_html(State(state): State<AppState>) -> Result<Html<String>, HttpError> {
    Ok(Html(dashboard_queries::render_dashboard(&state).await?))
}
