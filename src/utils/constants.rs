/// CSV schema: every output row carries exactly these columns, in this order
pub const CSV_HEADER: [&str; 30] = [
    "Year",
    "Month",
    "Day",
    "Hour",
    "Minute",
    "Station",
    "Wind_direction",
    "Wind_speed",
    "Wind_gust",
    "Visibility",
    "Cavok",
    "Weather_intensity",
    "Weather_description",
    "Weather_precipitation",
    "Weather_obscuration",
    "Sky_layer1_cover",
    "Sky_layer1_height",
    "Sky_layer1_cloud",
    "Sky_layer2_cover",
    "Sky_layer2_height",
    "Sky_layer2_cloud",
    "Sky_layer3_cover",
    "Sky_layer3_height",
    "Sky_layer3_cloud",
    "Sky_layer4_cover",
    "Sky_layer4_height",
    "Sky_layer4_cloud",
    "Temperature",
    "Dewpoint",
    "Pressure",
];

/// Rendered in place of any absent optional field
pub const NULL_FIELD: &str = "null";

/// Lines containing this marker are missing scheduled observations
pub const NIL_MARKER: &str = "NIL";

/// File names
pub const OUTPUT_FILE: &str = "metars.csv";
pub const DATA_FILE_EXTENSION: &str = "txt";

/// Raw record layout
pub const TIMESTAMP_LEN: usize = 12;
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// Flattening arities
pub const MAX_WEATHER_GROUPS: usize = 3;
pub const CLOUD_LAYER_SLOTS: usize = 4;

/// Processing defaults
pub const DEFAULT_STATION: &str = "mroc";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Unit conversions
pub const HPA_TO_INHG: f64 = 0.029529983071445;
pub const MPS_TO_KNOTS: f64 = 1.9438444924406;
pub const KMH_TO_KNOTS: f64 = 0.5399568034557;
pub const STATUTE_MILE_METERS: f64 = 1609.344;

/// Visibility reported when CAVOK or the 9999 group applies (10 km or more)
pub const MAX_VISIBILITY_METERS: f64 = 10000.0;
