pub mod context;
pub mod lifecycle;
pub mod logging;

pub use context::AppContext;
pub use lifecycle::{print_snapshot, render_to_file, run_standalone};
pub use logging::init_logging;
