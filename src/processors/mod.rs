pub mod station_processor;

pub use station_processor::{ProcessingSummary, StationProcessor};
