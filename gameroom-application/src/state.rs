use std::sync::Arc;

use gameroom_domain::ports::{DashboardRenderer, DatasetRepository};
use gameroom_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub dataset_repo: Arc<dyn DatasetRepository>,
    pub renderer: Arc<dyn DashboardRenderer>,
    pub metrics: Arc<Metrics>,
}
