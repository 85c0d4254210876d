// Dashboard assembly
// Every section is computed independently; a failed report becomes an error
// section and the remaining sections still render.

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use gameroom_domain::{
    Dashboard, DatasetSnapshot, EventTopUsersQuery, ProjectionQuery, ReportError, RuntimeConfig,
    Section,
};

use crate::queries::dataset::{load_snapshot, NormalizedDataset};
use crate::queries::report_queries::{event_window_params, projection_params};
use crate::{AppError, AppState};

pub async fn load_dashboard(state: &AppState) -> Result<Dashboard, AppError> {
    let snapshot = load_snapshot(state).await?;
    let dashboard = build_dashboard(&state.config, &snapshot)?;
    state.metrics.record_dashboard(dashboard.failed_sections());
    info!(
        session_id = %dashboard.session_id,
        failed_sections = dashboard.failed_sections(),
        "dashboard built"
    );
    Ok(dashboard)
}

pub async fn render_dashboard(state: &AppState) -> Result<String, AppError> {
    let dashboard = load_dashboard(state).await?;
    Ok(state.renderer.render(&dashboard))
}

pub fn build_dashboard(
    config: &RuntimeConfig,
    snapshot: &DatasetSnapshot,
) -> Result<Dashboard, AppError> {
    let event_window = event_window_params(config, EventTopUsersQuery::default())?;
    let projection = projection_params(config, ProjectionQuery::default())?;
    let dataset = NormalizedDataset::new(snapshot);

    let mut warnings: Vec<String> = snapshot
        .missing_stems()
        .into_iter()
        .map(|stem| format!("{stem}.json was not loaded; reports reading it see no records"))
        .collect();
    warnings.extend(
        snapshot
            .failures
            .iter()
            .map(|failure| format!("{}: {}", failure.file, failure.reason)),
    );

    Ok(Dashboard {
        session_id: Uuid::new_v4().to_string(),
        generated_at: Utc::now(),
        warnings,
        growth: section("growth", dataset.growth()),
        tickets_by_game: section("tickets_by_game", dataset.tickets_by_game()),
        tickets_by_game_month: section("tickets_by_game_month", dataset.tickets_by_game_month()),
        event_summary: section("event_summary", dataset.event_summary()),
        orders_by_event: section("orders_by_event", dataset.orders_by_event()),
        order_values_by_event: section("order_values_by_event", dataset.order_values_by_event()),
        heavy_users: section(
            "heavy_users",
            dataset.heavy_users(config.heavy_users_limit),
        ),
        event_top_users: section("event_top_users", dataset.event_top_users(&event_window)),
        tickets_by_level: section("tickets_by_level", dataset.tickets_by_level()),
        projection: section("projection", dataset.projection(&projection)),
        competitions: section("competitions", dataset.competitions()),
        demographics: section("demographics", dataset.demographics()),
    })
}

fn section<T>(name: &'static str, result: Result<T, ReportError>) -> Section<T> {
    if let Err(err) = &result {
        error!(report = name, "report failed: {}", err);
    }
    Section::from_result(result)
}
