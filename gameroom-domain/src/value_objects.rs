// Domain value objects
pub mod game;
pub mod identifiers;
pub mod payment_status;
pub mod scalar;

pub use game::*;
pub use identifiers::*;
pub use payment_status::*;
pub use scalar::*;
