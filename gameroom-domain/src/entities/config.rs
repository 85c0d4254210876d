// Runtime configuration handed to the application layer

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HEAVY_USERS_LIMIT: usize = 30;
pub const DEFAULT_EVENT_TOP_USERS_LIMIT: usize = 10;

/// Accepted participation percentages, for config and queries alike.
pub const PARTICIPATION_PERCENTAGE: RangeInclusive<f64> = 1.0..=100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturedEvent {
    pub title: String,
    pub start: String,
    pub end: String,
}

impl Default for FeaturedEvent {
    fn default() -> Self {
        Self {
            title: "Campeonato Season 6 - Natal".to_string(),
            start: "2024-12-13".to_string(),
            end: "2024-12-24".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionDefaults {
    pub clients: u64,
    pub percentage: f64,
    pub weeks: u32,
    pub cost_per_match: f64,
}

impl Default for ProjectionDefaults {
    fn default() -> Self {
        Self {
            clients: 40_000,
            percentage: 30.0,
            weeks: 8,
            cost_per_match: 0.177,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub data_dir: String,
    pub heavy_users_limit: usize,
    pub event_top_users_limit: usize,
    pub featured_event: FeaturedEvent,
    pub projection: ProjectionDefaults,
    pub request_timeout_seconds: u64,
}
