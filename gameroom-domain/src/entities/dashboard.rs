// Dashboard entity: every report section with its own outcome

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::reports::{
    ClientProjection, CompetitionEngagement, Demographics, EventSummaryRow, EventTopUsersReport,
    GameMonthPivot, GameTotal, GrowthReport, HeavyUserRow, LevelShare, OrderSummaryRow,
    OrderValueRow,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Ok { data: T },
    Error { error: String },
}

impl<T> Section<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Section::Ok { data },
            Err(err) => Section::Error {
                error: err.to_string(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Section::Ok { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Section::Ok { data } => Some(data),
            Section::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Section::Ok { .. } => None,
            Section::Error { error } => Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub session_id: String,
    pub generated_at: DateTime<Utc>,
    pub warnings: Vec<String>,
    pub growth: Section<GrowthReport>,
    pub tickets_by_game: Section<Vec<GameTotal>>,
    pub tickets_by_game_month: Section<GameMonthPivot>,
    pub event_summary: Section<Vec<EventSummaryRow>>,
    pub orders_by_event: Section<Vec<OrderSummaryRow>>,
    pub order_values_by_event: Section<Vec<OrderValueRow>>,
    pub heavy_users: Section<Vec<HeavyUserRow>>,
    pub event_top_users: Section<EventTopUsersReport>,
    pub tickets_by_level: Section<Vec<LevelShare>>,
    pub projection: Section<ClientProjection>,
    pub competitions: Section<Vec<CompetitionEngagement>>,
    pub demographics: Section<Demographics>,
}

impl Dashboard {
    pub fn failed_sections(&self) -> usize {
        [
            self.growth.is_ok(),
            self.tickets_by_game.is_ok(),
            self.tickets_by_game_month.is_ok(),
            self.event_summary.is_ok(),
            self.orders_by_event.is_ok(),
            self.order_values_by_event.is_ok(),
            self.heavy_users.is_ok(),
            self.event_top_users.is_ok(),
            self.tickets_by_level.is_ok(),
            self.projection.is_ok(),
            self.competitions.is_ok(),
            self.demographics.is_ok(),
        ]
        .into_iter()
        .filter(|ok| !ok)
        .count()
    }
}
