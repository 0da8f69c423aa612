pub mod errors;
pub mod filter;
pub mod indicator;
pub mod lookup;
pub mod render;
pub mod report;
pub mod shaping;
pub mod store;
pub mod types;

pub use errors::*;
