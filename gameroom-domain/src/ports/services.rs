use crate::entities::Dashboard;

pub trait DashboardRenderer: Send + Sync {
    fn render(&self, dashboard: &Dashboard) -> String;
}
