use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Surface wind group. All values are optional: calm or variable winds omit
/// the direction, and most reports carry no gust figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Direction in degrees true. `None` for variable (VRB) winds.
    pub direction: Option<f64>,
    /// Speed in knots.
    pub speed: Option<f64>,
    /// Gust speed in knots.
    pub gust: Option<f64>,
}

/// Prevailing visibility group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    /// Distance in meters. CAVOK reports carry 10000.0.
    pub distance: Option<f64>,
    /// "Ceiling And Visibility OK" simplification flag.
    pub cavok: bool,
}

/// One present-weather group, decomposed into its categorical parts.
///
/// Values are the decoder's long-form vocabulary ("nearby", "thunderstorm",
/// "rain", "mist", ...); the CSV writer owns the abbreviation tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherGroup {
    pub intensity: Option<String>,
    pub description: Option<String>,
    pub precipitation: Option<String>,
    pub obscuration: Option<String>,
}

/// One cloud stratum: cover category, base height and convective type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudLayer {
    /// Cover category in long form: "a few", "scattered", "broken",
    /// "overcast", "indefinite ceiling" or "clear".
    pub cover: Option<String>,
    /// Layer base height in feet above aerodrome level.
    pub height: Option<f64>,
    /// Convective cloud type (CB or TCU) when reported.
    pub cloud_type: Option<String>,
}

/// Air temperature and dewpoint, degrees Celsius.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    pub temperature: Option<f64>,
    pub dewpoint: Option<f64>,
}

/// A decoded METAR report.
///
/// Reports may legitimately omit almost every section, so everything except
/// the station code and observation time is optional. Weather groups are
/// capped at 3 and cloud layers at 4 by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// ICAO station identifier, e.g. "MROC".
    pub station: String,
    /// Observation time, reconstructed from the record timestamp's year and
    /// month plus the report's day/hour/minute group.
    pub time: NaiveDateTime,
    pub wind: Wind,
    pub visibility: Visibility,
    pub weathers: Vec<WeatherGroup>,
    pub clouds: Vec<CloudLayer>,
    pub temperatures: Temperatures,
    /// Station pressure in inches of mercury.
    pub pressure: Option<f64>,
}

impl Report {
    pub fn new(station: String, time: NaiveDateTime) -> Self {
        Self {
            station,
            time,
            wind: Wind::default(),
            visibility: Visibility::default(),
            weathers: Vec::new(),
            clouds: Vec::new(),
            temperatures: Temperatures::default(),
            pressure: None,
        }
    }
}
