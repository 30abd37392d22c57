pub mod anomaly;
pub mod column;
pub mod constants;
pub mod events;
pub mod grid;
pub mod material;
pub mod reporting;
