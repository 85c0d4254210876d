// Query parameters accepted by report endpoints

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::value_objects::Game;

#[derive(Debug, Default, Deserialize)]
pub struct HeavyUsersQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventTopUsersQuery {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectionQuery {
    pub clients: Option<u64>,
    pub percentage: Option<f64>,
    pub weeks: Option<u32>,
    /// Comma-separated game names; all games when absent.
    pub games: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventWindowParams {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionParams {
    pub clients: u64,
    pub percentage: f64,
    pub weeks: u32,
    pub games: Vec<Game>,
    pub cost_per_match: f64,
}
