// Snapshot loading and per-table normalization shared by every report query

use serde_json::Value;
use tracing::{error, info, warn};

use gameroom_domain::services;
use gameroom_domain::{
    ClientProjection, CompetitionEngagement, DatasetSnapshot, Demographics, EventRecord,
    EventSummaryRow, EventTopUsersReport, EventWindowParams, GameMonthPivot, GameTotal,
    GrowthReport, HeavyUserRow, LevelShare, MatchRecord, NormalizeError, OrderRecord,
    OrderSummaryRow, OrderValueRow, ProjectionParams, ReportError, TicketRecord, UserRecord,
    COMPETITIONS_STEM, DISTRIBUTION_STEM, EVENTS_STEM, MATCHES_STEM, ORDERS_STEM, TICKETS_STEM,
    USERS_STEM,
};

use crate::{AppError, AppState};

pub async fn load_snapshot(state: &AppState) -> Result<DatasetSnapshot, AppError> {
    let snapshot = state.dataset_repo.load_snapshot().await.map_err(|err| {
        error!("failed to load dataset snapshot: {}", err);
        AppError::Internal(err)
    })?;
    state.metrics.record_snapshot(snapshot.failures.len());
    info!(
        files = snapshot.files.len(),
        failures = snapshot.failures.len(),
        "dataset snapshot loaded"
    );
    Ok(snapshot)
}

/// Normalized tables of one snapshot. A table that failed to normalize only
/// fails the reports that read it.
pub struct NormalizedDataset<'a> {
    snapshot: &'a DatasetSnapshot,
    matches: Result<Vec<MatchRecord>, NormalizeError>,
    tickets: Result<Vec<TicketRecord>, NormalizeError>,
    users: Result<Vec<UserRecord>, NormalizeError>,
    events: Result<Vec<EventRecord>, NormalizeError>,
    orders: Result<Vec<OrderRecord>, NormalizeError>,
}

impl<'a> NormalizedDataset<'a> {
    pub fn new(snapshot: &'a DatasetSnapshot) -> Self {
        let dataset = Self {
            snapshot,
            matches: services::normalize_matches(snapshot.get(MATCHES_STEM)),
            tickets: services::normalize_tickets(snapshot.get(TICKETS_STEM)),
            users: services::normalize_users(snapshot.get(USERS_STEM)),
            events: services::normalize_events(snapshot.get(EVENTS_STEM)),
            orders: services::normalize_orders(snapshot.get(ORDERS_STEM)),
        };
        for err in dataset.normalize_errors() {
            warn!("dataset could not be normalized: {}", err);
        }
        dataset
    }

    pub fn normalize_errors(&self) -> Vec<&NormalizeError> {
        [
            self.matches.as_ref().err(),
            self.tickets.as_ref().err(),
            self.users.as_ref().err(),
            self.events.as_ref().err(),
            self.orders.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn matches(&self) -> Result<&[MatchRecord], ReportError> {
        table(&self.matches)
    }

    fn tickets(&self) -> Result<&[TicketRecord], ReportError> {
        table(&self.tickets)
    }

    fn users(&self) -> Result<&[UserRecord], ReportError> {
        table(&self.users)
    }

    fn events(&self) -> Result<&[EventRecord], ReportError> {
        table(&self.events)
    }

    fn orders(&self) -> Result<&[OrderRecord], ReportError> {
        table(&self.orders)
    }

    fn document(&self, stem: &str) -> Option<&Value> {
        self.snapshot.get(stem)
    }

    pub fn growth(&self) -> Result<GrowthReport, ReportError> {
        services::growth_report(self.matches()?, self.tickets()?, self.users()?)
    }

    pub fn tickets_by_game(&self) -> Result<Vec<GameTotal>, ReportError> {
        services::tickets_by_game(self.tickets()?)
    }

    pub fn tickets_by_game_month(&self) -> Result<GameMonthPivot, ReportError> {
        services::tickets_by_game_month(self.tickets()?)
    }

    pub fn event_summary(&self) -> Result<Vec<EventSummaryRow>, ReportError> {
        services::event_summary(self.matches()?, self.tickets()?, self.events()?)
    }

    pub fn orders_by_event(&self) -> Result<Vec<OrderSummaryRow>, ReportError> {
        services::orders_by_event(self.orders()?, self.events()?)
    }

    pub fn order_values_by_event(&self) -> Result<Vec<OrderValueRow>, ReportError> {
        services::order_values_by_event(self.orders()?, self.events()?)
    }

    pub fn heavy_users(&self, limit: usize) -> Result<Vec<HeavyUserRow>, ReportError> {
        services::heavy_users(self.matches()?, self.users()?, limit)
    }

    pub fn event_top_users(
        &self,
        params: &EventWindowParams,
    ) -> Result<EventTopUsersReport, ReportError> {
        services::event_top_users(self.matches()?, self.users()?, params)
    }

    pub fn tickets_by_level(&self) -> Result<Vec<LevelShare>, ReportError> {
        let total = services::ticket_total(self.tickets()?)?;
        Ok(services::tickets_by_level(total))
    }

    pub fn projection(&self, params: &ProjectionParams) -> Result<ClientProjection, ReportError> {
        services::project_clients(self.matches()?, self.tickets()?, params)
    }

    pub fn competitions(&self) -> Result<Vec<CompetitionEngagement>, ReportError> {
        services::competition_engagement(self.document(COMPETITIONS_STEM))
    }

    pub fn demographics(&self) -> Result<Demographics, ReportError> {
        services::demographics(self.document(DISTRIBUTION_STEM))
    }
}

fn table<T>(records: &Result<Vec<T>, NormalizeError>) -> Result<&[T], ReportError> {
    records
        .as_deref()
        .map_err(|err| ReportError::Dataset(err.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn broken_table_only_fails_reports_that_read_it() {
        let mut snapshot = DatasetSnapshot::default();
        snapshot.files.insert(
            MATCHES_STEM.to_string(),
            json!([{"createdAt": {"$date": {"$numberLong": "later"}}}]),
        );
        snapshot.files.insert(
            TICKETS_STEM.to_string(),
            json!([{"gameId": "1", "amount": 4, "createdAt": 0}]),
        );
        let dataset = NormalizedDataset::new(&snapshot);
        assert_eq!(dataset.normalize_errors().len(), 1);
        assert!(matches!(dataset.growth(), Err(ReportError::Dataset(_))));
        let totals = dataset.tickets_by_game().expect("tickets unaffected");
        assert_eq!(totals[0].amount, 4);
    }

    #[test]
    fn absent_documents_are_reported_per_section() {
        let snapshot = DatasetSnapshot::default();
        let dataset = NormalizedDataset::new(&snapshot);
        assert_eq!(
            dataset.demographics(),
            Err(ReportError::MissingDocument(DISTRIBUTION_STEM))
        );
        assert!(dataset.heavy_users(30).expect("empty tables").is_empty());
    }
}
