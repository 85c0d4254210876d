// Domain entities
pub mod config;
pub mod dashboard;
pub mod queries;
pub mod records;
pub mod reports;
pub mod snapshot;

pub use config::*;
pub use dashboard::*;
pub use queries::*;
pub use records::*;
pub use reports::*;
pub use snapshot::*;
