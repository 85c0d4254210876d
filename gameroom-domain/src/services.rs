// Domain services
pub mod engagement;
pub mod normalizer;
pub mod projection;
pub mod reports;
pub mod timeline;

pub use engagement::*;
pub use normalizer::*;
pub use projection::*;
pub use reports::*;
pub use timeline::*;
