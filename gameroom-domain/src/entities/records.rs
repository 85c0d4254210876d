// Normalized record entities
// Fields absent from the export stay `None`; reports decide what they require.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{GameId, PaymentStatus, RecordId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Option<RecordId>,
    pub user_id: Option<UserId>,
    pub game_id: Option<GameId>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub id: Option<RecordId>,
    pub user_id: Option<UserId>,
    pub game_id: Option<GameId>,
    pub amount: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Option<UserId>,
    pub nickname: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: Option<RecordId>,
    pub user_id: Option<UserId>,
    pub total_amount: Option<f64>,
    pub payment_status: Option<PaymentStatus>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEngagement {
    pub date: String,
    pub total_average_time: String,
    #[serde(default)]
    pub observations: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementData {
    #[serde(default)]
    pub daily: Vec<DailyEngagement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    #[serde(default, alias = "title")]
    pub name: Option<String>,
    pub engagement_data: EngagementData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionFile {
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionFile {
    #[serde(default)]
    pub gender_distribution: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub age_distribution: serde_json::Map<String, serde_json::Value>,
}
