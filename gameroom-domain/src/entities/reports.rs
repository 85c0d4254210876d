// Report output entities

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{GameId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyValue<T> {
    pub month: String,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthReport {
    pub matches_per_month: Vec<MonthlyValue<u64>>,
    pub ticket_amount_per_month: Vec<MonthlyValue<i64>>,
    pub users_per_month: Vec<MonthlyValue<u64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTotal {
    pub game_id: GameId,
    pub game: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMonthRow {
    pub month: String,
    pub amounts: Vec<i64>,
}

/// Month x game pivot; `amounts` in each row align with `games`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMonthPivot {
    pub game_ids: Vec<GameId>,
    pub games: Vec<String>,
    pub rows: Vec<GameMonthRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    Event,
    Interval,
    GroupedIntervals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary<S> {
    pub label: String,
    pub kind: WindowKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_days: i64,
    pub count: u64,
    pub sum: S,
    pub avg_per_day: f64,
}

/// Matches counted, ticket amounts summed.
pub type EventSummaryRow = WindowSummary<i64>;

/// Paid orders counted, order totals summed.
pub type OrderSummaryRow = WindowSummary<f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderValueRow {
    pub window: String,
    pub kind: WindowKind,
    pub value: f64,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeavyUserRow {
    pub rank: usize,
    pub user_id: UserId,
    pub nickname: String,
    pub total_matches: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyGameCount {
    pub date: NaiveDate,
    pub game_id: GameId,
    pub game: String,
    pub matches: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTopUser {
    pub rank: usize,
    pub user_id: UserId,
    pub nickname: String,
    pub total_matches: u64,
    pub daily: Vec<DailyGameCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTopUsersReport {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub users: Vec<EventTopUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelShare {
    pub level: String,
    pub share: f64,
    pub tickets: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameShare {
    pub game: String,
    pub match_share_pct: f64,
    pub ticket_share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProjection {
    pub adjusted_clients: f64,
    pub weeks: u32,
    pub avg_matches_per_user: f64,
    pub avg_ticket_value_per_user: f64,
    pub projected_matches: f64,
    pub projected_tickets: f64,
    pub infra_cost: f64,
    pub per_game: Vec<GameShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementPoint {
    pub date: NaiveDate,
    pub total_average_time: String,
    pub seconds: u64,
    pub observations: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionEngagement {
    pub name: String,
    pub points: Vec<EngagementPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionShare {
    pub label: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub gender: Vec<DistributionShare>,
    pub age: Vec<DistributionShare>,
}
