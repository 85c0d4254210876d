pub mod dashboard_queries;
pub mod dataset;
pub mod report_queries;

pub use dashboard_queries::*;
pub use dataset::*;
pub use report_queries::*;
