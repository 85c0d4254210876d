use std::sync::Arc;

use gameroom_application::{AppState, Metrics};
use gameroom_infrastructure::{AppConfig, HtmlDashboardRenderer, JsonDirectoryRepository};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub fn from_config(config: &AppConfig) -> Self {
        let runtime_config = config.to_runtime_config();
        let dataset_repo = Arc::new(JsonDirectoryRepository::new(&runtime_config.data_dir));

        let state = AppState {
            config: runtime_config,
            dataset_repo,
            renderer: Arc::new(HtmlDashboardRenderer),
            metrics: Arc::new(Metrics::default()),
        };

        Self { state }
    }
}
