// Raw dataset snapshot produced by the loader

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MATCHES_STEM: &str = "gamehistories";
pub const TICKETS_STEM: &str = "tickets";
pub const USERS_STEM: &str = "users";
pub const EVENTS_STEM: &str = "gameevents";
pub const ORDERS_STEM: &str = "orders";
pub const COMPETITIONS_STEM: &str = "competitions_gameroom";
pub const DISTRIBUTION_STEM: &str = "distribution_data";

pub const EXPECTED_STEMS: [&str; 7] = [
    MATCHES_STEM,
    TICKETS_STEM,
    USERS_STEM,
    EVENTS_STEM,
    ORDERS_STEM,
    COMPETITIONS_STEM,
    DISTRIBUTION_STEM,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadFailure {
    pub file: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct DatasetSnapshot {
    pub files: BTreeMap<String, Value>,
    pub failures: Vec<LoadFailure>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl DatasetSnapshot {
    pub fn get(&self, stem: &str) -> Option<&Value> {
        self.files.get(stem)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Expected stems with no loaded file.
    pub fn missing_stems(&self) -> Vec<&'static str> {
        EXPECTED_STEMS
            .into_iter()
            .filter(|stem| !self.files.contains_key(*stem))
            .collect()
    }
}
