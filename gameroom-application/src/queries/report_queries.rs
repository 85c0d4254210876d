use tracing::error;

use gameroom_domain::{
    parse_bound, ClientProjection, CompetitionEngagement, Demographics, EventSummaryRow,
    EventTopUsersQuery, EventTopUsersReport, EventWindowParams, Game, GameMonthPivot, GameTotal,
    GrowthReport, HeavyUserRow, HeavyUsersQuery, LevelShare, OrderSummaryRow, OrderValueRow,
    ProjectionParams, ProjectionQuery, ReportError, RuntimeConfig, PARTICIPATION_PERCENTAGE,
};

use crate::queries::dataset::{load_snapshot, NormalizedDataset};
use crate::{AppError, AppState};

pub const MAX_LIMIT: usize = 500;

pub fn clamp_limit(limit: Option<usize>, default: usize) -> usize {
    limit.unwrap_or(default).clamp(1, MAX_LIMIT)
}

/// Fills an event window from the query, falling back to the featured event.
pub fn event_window_params(
    config: &RuntimeConfig,
    query: EventTopUsersQuery,
) -> Result<EventWindowParams, AppError> {
    let featured = &config.featured_event;
    let title = query
        .title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| featured.title.clone());
    let start = query.start.unwrap_or_else(|| featured.start.clone());
    let end = query.end.unwrap_or_else(|| featured.end.clone());

    let start = parse_bound(&start, false)
        .map_err(|err| AppError::BadRequest(format!("invalid start '{}': {}", start, err)))?;
    let end = parse_bound(&end, true)
        .map_err(|err| AppError::BadRequest(format!("invalid end '{}': {}", end, err)))?;
    if end < start {
        return Err(AppError::BadRequest("end precedes start".to_string()));
    }

    Ok(EventWindowParams {
        title,
        start,
        end,
        limit: clamp_limit(query.limit, config.event_top_users_limit),
    })
}

/// Fills projection inputs from the query, falling back to configured defaults.
/// `games` is a comma-separated list of game names or ids.
pub fn projection_params(
    config: &RuntimeConfig,
    query: ProjectionQuery,
) -> Result<ProjectionParams, AppError> {
    let defaults = &config.projection;
    let percentage = query.percentage.unwrap_or(defaults.percentage);
    if !PARTICIPATION_PERCENTAGE.contains(&percentage) {
        return Err(AppError::BadRequest(format!(
            "percentage must be within 1..=100, got {}",
            percentage
        )));
    }

    let games = match query.games.as_deref() {
        None => Game::ALL.to_vec(),
        Some(list) => {
            let mut games = Vec::new();
            for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
                let game = Game::from_name(name)
                    .or_else(|| Game::from_id(name))
                    .ok_or_else(|| AppError::BadRequest(format!("unknown game '{}'", name)))?;
                if !games.contains(&game) {
                    games.push(game);
                }
            }
            games
        }
    };

    Ok(ProjectionParams {
        clients: query.clients.unwrap_or(defaults.clients),
        percentage,
        weeks: query.weeks.unwrap_or(defaults.weeks),
        games,
        cost_per_match: defaults.cost_per_match,
    })
}

async fn run_report<T, F>(state: &AppState, name: &'static str, report: F) -> Result<T, AppError>
where
    F: FnOnce(&NormalizedDataset<'_>) -> Result<T, ReportError>,
{
    let snapshot = load_snapshot(state).await?;
    let dataset = NormalizedDataset::new(&snapshot);
    let result = report(&dataset);
    state.metrics.record_report(result.is_ok());
    result.map_err(|err| {
        error!(report = name, "report failed: {}", err);
        AppError::from(err)
    })
}

pub async fn growth_report(state: &AppState) -> Result<GrowthReport, AppError> {
    run_report(state, "growth", |dataset| dataset.growth()).await
}

pub async fn tickets_by_game(state: &AppState) -> Result<Vec<GameTotal>, AppError> {
    run_report(state, "tickets_by_game", |dataset| dataset.tickets_by_game()).await
}

pub async fn tickets_by_game_month(state: &AppState) -> Result<GameMonthPivot, AppError> {
    run_report(state, "tickets_by_game_month", |dataset| {
        dataset.tickets_by_game_month()
    })
    .await
}

pub async fn event_summary(state: &AppState) -> Result<Vec<EventSummaryRow>, AppError> {
    run_report(state, "event_summary", |dataset| dataset.event_summary()).await
}

pub async fn orders_by_event(state: &AppState) -> Result<Vec<OrderSummaryRow>, AppError> {
    run_report(state, "orders_by_event", |dataset| dataset.orders_by_event()).await
}

pub async fn order_values_by_event(state: &AppState) -> Result<Vec<OrderValueRow>, AppError> {
    run_report(state, "order_values_by_event", |dataset| {
        dataset.order_values_by_event()
    })
    .await
}

pub async fn heavy_users(
    state: &AppState,
    query: HeavyUsersQuery,
) -> Result<Vec<HeavyUserRow>, AppError> {
    let limit = clamp_limit(query.limit, state.config.heavy_users_limit);
    run_report(state, "heavy_users", |dataset| dataset.heavy_users(limit)).await
}

pub async fn event_top_users(
    state: &AppState,
    query: EventTopUsersQuery,
) -> Result<EventTopUsersReport, AppError> {
    let params = event_window_params(&state.config, query)?;
    run_report(state, "event_top_users", |dataset| {
        dataset.event_top_users(&params)
    })
    .await
}

pub async fn tickets_by_level(state: &AppState) -> Result<Vec<LevelShare>, AppError> {
    run_report(state, "tickets_by_level", |dataset| dataset.tickets_by_level()).await
}

pub async fn client_projection(
    state: &AppState,
    query: ProjectionQuery,
) -> Result<ClientProjection, AppError> {
    let params = projection_params(&state.config, query)?;
    run_report(state, "projection", |dataset| dataset.projection(&params)).await
}

pub async fn competition_engagement(
    state: &AppState,
) -> Result<Vec<CompetitionEngagement>, AppError> {
    run_report(state, "competitions", |dataset| dataset.competitions()).await
}

pub async fn demographics(state: &AppState) -> Result<Demographics, AppError> {
    run_report(state, "demographics", |dataset| dataset.demographics()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameroom_domain::{FeaturedEvent, ProjectionDefaults};

    fn config() -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            data_dir: "data".to_string(),
            heavy_users_limit: 30,
            event_top_users_limit: 10,
            featured_event: FeaturedEvent::default(),
            projection: ProjectionDefaults::default(),
            request_timeout_seconds: 30,
        }
    }

    #[test]
    fn limits_are_clamped() {
        assert_eq!(clamp_limit(None, 30), 30);
        assert_eq!(clamp_limit(Some(0), 30), 1);
        assert_eq!(clamp_limit(Some(10_000), 30), MAX_LIMIT);
    }

    #[test]
    fn event_window_defaults_to_featured_event() {
        let params = event_window_params(&config(), EventTopUsersQuery::default())
            .expect("defaults");
        assert_eq!(params.title, "Campeonato Season 6 - Natal");
        assert_eq!(params.limit, 10);
        assert_eq!(params.start.to_rfc3339(), "2024-12-13T00:00:00+00:00");
        assert_eq!(params.end.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-12-24 23:59:59");
    }

    #[test]
    fn event_window_rejects_bad_bounds() {
        let query = EventTopUsersQuery {
            start: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            event_window_params(&config(), query),
            Err(AppError::BadRequest(_))
        ));

        let inverted = EventTopUsersQuery {
            start: Some("2024-12-20".to_string()),
            end: Some("2024-12-10".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            event_window_params(&config(), inverted),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn projection_games_accept_names_and_ids() {
        let query = ProjectionQuery {
            games: Some("lava rush, 1,Lava Rush".to_string()),
            ..Default::default()
        };
        let params = projection_params(&config(), query).expect("params");
        assert_eq!(params.games, vec![Game::LavaRush, Game::TheRunner]);
        assert_eq!(params.clients, 40_000);
        assert_eq!(params.cost_per_match, 0.177);

        let all = projection_params(&config(), ProjectionQuery::default()).expect("params");
        assert_eq!(all.games, Game::ALL.to_vec());
    }

    #[test]
    fn projection_rejects_unknown_game_and_bad_percentage() {
        let unknown = ProjectionQuery {
            games: Some("Tetris".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            projection_params(&config(), unknown),
            Err(AppError::BadRequest(_))
        ));
        for percentage in [0.0, 101.0] {
            let query = ProjectionQuery {
                percentage: Some(percentage),
                ..Default::default()
            };
            assert!(matches!(
                projection_params(&config(), query),
                Err(AppError::BadRequest(_))
            ));
        }
        let lowest = ProjectionQuery {
            percentage: Some(1.0),
            ..Default::default()
        };
        assert!(projection_params(&config(), lowest).is_ok());
    }
}
