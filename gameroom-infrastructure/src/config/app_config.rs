use std::env;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use gameroom_domain::{
    FeaturedEvent, ProjectionDefaults, RuntimeConfig, DEFAULT_EVENT_TOP_USERS_LIMIT,
    DEFAULT_HEAVY_USERS_LIMIT,
};

use crate::config::validation::{
    validate_bind_addr, validate_event_window, validate_limit, validate_percentage,
};
use crate::utils::resolve_path;

pub const CONFIG_ENV: &str = "GAMEROOM_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: String,
    pub log_dir: Option<String>,
    pub heavy_users_limit: usize,
    pub event_top_users_limit: usize,
    pub featured_event: FeaturedEvent,
    pub projection: ProjectionDefaults,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8501".to_string(),
            data_dir: "./data".to_string(),
            log_dir: None,
            heavy_users_limit: DEFAULT_HEAVY_USERS_LIMIT,
            event_top_users_limit: DEFAULT_EVENT_TOP_USERS_LIMIT,
            featured_event: FeaturedEvent::default(),
            projection: ProjectionDefaults::default(),
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    /// `path`, else `GAMEROOM_CONFIG`, else `./config.toml`.
    pub fn config_path(path: Option<&str>) -> String {
        match path {
            Some(path) => path.to_string(),
            None => env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        }
    }

    pub async fn load_from(path: Option<&str>) -> Result<Self> {
        let path = Self::config_path(path);
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::parse(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn normalize(&mut self) {
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
        self.featured_event.title = self.featured_event.title.trim().to_string();
        self.featured_event.start = self.featured_event.start.trim().to_string();
        self.featured_event.end = self.featured_event.end.trim().to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_dir = resolve_path(base, &self.data_dir);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_bind_addr(&self.bind_addr)?;
        if self.data_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("data_dir must not be empty"));
        }
        validate_limit("heavy_users_limit", self.heavy_users_limit)?;
        validate_limit("event_top_users_limit", self.event_top_users_limit)?;
        validate_percentage(self.projection.percentage)?;
        if self.projection.cost_per_match < 0.0 {
            return Err(anyhow::anyhow!("projection.cost_per_match must not be negative"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("request_timeout_seconds must be greater than 0"));
        }
        validate_event_window(&self.featured_event.start, &self.featured_event.end)?;
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            data_dir: self.data_dir.clone(),
            heavy_users_limit: self.heavy_users_limit,
            event_top_users_limit: self.event_top_users_limit,
            featured_event: self.featured_event.clone(),
            projection: self.projection.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("GAMEROOM_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("GAMEROOM_DATA_DIR") {
            self.data_dir = value;
        }
        if let Some(value) = lookup("GAMEROOM_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Some(value) = lookup("GAMEROOM_HEAVY_USERS_LIMIT") {
            self.heavy_users_limit = value.parse().unwrap_or(self.heavy_users_limit);
        }
        if let Some(value) = lookup("GAMEROOM_EVENT_TOP_USERS_LIMIT") {
            self.event_top_users_limit = value.parse().unwrap_or(self.event_top_users_limit);
        }
        if let Some(value) = lookup("GAMEROOM_FEATURED_EVENT_TITLE") {
            self.featured_event.title = value;
        }
        if let Some(value) = lookup("GAMEROOM_FEATURED_EVENT_START") {
            self.featured_event.start = value;
        }
        if let Some(value) = lookup("GAMEROOM_FEATURED_EVENT_END") {
            self.featured_event.end = value;
        }
        if let Some(value) = lookup("GAMEROOM_PROJECTION_CLIENTS") {
            self.projection.clients = value.parse().unwrap_or(self.projection.clients);
        }
        if let Some(value) = lookup("GAMEROOM_PROJECTION_PERCENTAGE") {
            self.projection.percentage = value.parse().unwrap_or(self.projection.percentage);
        }
        if let Some(value) = lookup("GAMEROOM_PROJECTION_WEEKS") {
            self.projection.weeks = value.parse().unwrap_or(self.projection.weeks);
        }
        if let Some(value) = lookup("GAMEROOM_PROJECTION_COST_PER_MATCH") {
            self.projection.cost_per_match =
                value.parse().unwrap_or(self.projection.cost_per_match);
        }
        if let Some(value) = lookup("GAMEROOM_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}
