pub mod json_dataset;

pub use json_dataset::*;
