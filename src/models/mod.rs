pub mod report;

pub use report::{CloudLayer, Report, Temperatures, Visibility, WeatherGroup, Wind};
