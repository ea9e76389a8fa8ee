use crate::error::{ProcessingError, Result};
use crate::models::{CloudLayer, Report, Temperatures, Visibility, WeatherGroup, Wind};
use crate::utils::constants::{
    CLOUD_LAYER_SLOTS, HPA_TO_INHG, KMH_TO_KNOTS, MAX_VISIBILITY_METERS, MAX_WEATHER_GROUPS,
    MPS_TO_KNOTS, STATUTE_MILE_METERS,
};
use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};
use tracing::debug;

/// Decodes METAR report bodies into structured [`Report`]s.
///
/// The decoder walks the whitespace-separated groups of the body in report
/// order, matching each against the standard group grammars. Groups it does
/// not recognize are skipped, and everything after a `RMK` marker is ignored;
/// a report is only rejected when the station or day-time group is missing or
/// the day-time group names an impossible calendar date.
///
/// Categorical fields are decoded to long-form vocabulary ("nearby",
/// "thunderstorm", "a few", ...); abbreviation back to METAR codes is the CSV
/// writer's concern.
pub struct Decoder {
    station_re: Regex,
    time_re: Regex,
    wind_re: Regex,
    wind_variation_re: Regex,
    visibility_re: Regex,
    visibility_sm_re: Regex,
    weather_re: Regex,
    cloud_re: Regex,
    vertical_visibility_re: Regex,
    clear_sky_re: Regex,
    temperature_re: Regex,
    pressure_re: Regex,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            station_re: Regex::new(r"^[A-Z][A-Z0-9]{3}$").unwrap(),
            time_re: Regex::new(r"^(\d{2})(\d{2})(\d{2})Z$").unwrap(),
            wind_re: Regex::new(r"^(\d{3}|VRB)(\d{2,3})(?:G(\d{2,3}))?(KT|MPS|KMH)$").unwrap(),
            wind_variation_re: Regex::new(r"^\d{3}V\d{3}$").unwrap(),
            visibility_re: Regex::new(r"^(\d{4})(?:NDV)?$").unwrap(),
            visibility_sm_re: Regex::new(r"^M?(\d{1,2})(?:/(\d{1,2}))?SM$").unwrap(),
            weather_re: Regex::new(
                r"^([+-]|VC)?(MI|BC|PR|DR|BL|SH|TS|FZ)?(DZ|RA|SN|SG|IC|PL|GR|GS|UP)?(BR|FG|FU|VA|DU|SA|HZ|PY)?$",
            )
            .unwrap(),
            cloud_re: Regex::new(r"^(FEW|SCT|BKN|OVC)(\d{3})(CB|TCU)?$").unwrap(),
            vertical_visibility_re: Regex::new(r"^VV(\d{3})$").unwrap(),
            clear_sky_re: Regex::new(r"^(NSC|SKC|CLR|NCD)$").unwrap(),
            temperature_re: Regex::new(r"^(M?\d{2})/(M?\d{2})?$").unwrap(),
            pressure_re: Regex::new(r"^([QA])(\d{4})$").unwrap(),
        }
    }

    /// Decode a report body. `year` and `month` come from the raw record's
    /// issuance timestamp; the body itself only carries day, hour and minute.
    pub fn decode(&self, body: &str, year: i32, month: u32) -> Result<Report> {
        let mut station: Option<String> = None;
        let mut time: Option<NaiveDateTime> = None;
        let mut wind = Wind::default();
        let mut visibility = Visibility::default();
        let mut weathers: Vec<WeatherGroup> = Vec::new();
        let mut clouds: Vec<CloudLayer> = Vec::new();
        let mut temperatures = Temperatures::default();
        let mut pressure: Option<f64> = None;

        for token in body.split_whitespace() {
            // Remarks and trend forecasts describe conditions other than the
            // observation itself
            if matches!(token, "RMK" | "TEMPO" | "BECMG" | "NOSIG") {
                break;
            }
            if matches!(token, "METAR" | "SPECI" | "AUTO" | "COR") {
                continue;
            }

            // Station is the first ICAO-shaped group before the time group
            if station.is_none() && time.is_none() && self.station_re.is_match(token) {
                station = Some(token.to_string());
                continue;
            }

            if time.is_none() {
                if let Some(caps) = self.time_re.captures(token) {
                    time = Some(self.observation_time(&caps, year, month, token)?);
                    continue;
                }
            }

            if let Some(caps) = self.wind_re.captures(token) {
                wind = parse_wind(&caps);
                continue;
            }
            if self.wind_variation_re.is_match(token) {
                continue;
            }

            if token == "CAVOK" {
                visibility.cavok = true;
                visibility.distance = Some(MAX_VISIBILITY_METERS);
                continue;
            }
            if visibility.distance.is_none() {
                if let Some(caps) = self.visibility_re.captures(token) {
                    // 9999 means 10 km or more
                    visibility.distance = Some(if &caps[1] == "9999" {
                        MAX_VISIBILITY_METERS
                    } else {
                        caps[1].parse().unwrap_or(0.0)
                    });
                    continue;
                }
                if let Some(caps) = self.visibility_sm_re.captures(token) {
                    visibility.distance = Some(parse_miles(&caps));
                    continue;
                }
            }

            if let Some(caps) = self.cloud_re.captures(token) {
                let layer = CloudLayer {
                    cover: Some(long_cover(&caps[1]).to_string()),
                    height: Some(caps[2].parse::<f64>().unwrap_or(0.0) * 100.0),
                    cloud_type: caps.get(3).map(|m| m.as_str().to_string()),
                };
                push_cloud(&mut clouds, layer, token);
                continue;
            }
            if let Some(caps) = self.vertical_visibility_re.captures(token) {
                let layer = CloudLayer {
                    cover: Some("indefinite ceiling".to_string()),
                    height: Some(caps[1].parse::<f64>().unwrap_or(0.0) * 100.0),
                    cloud_type: None,
                };
                push_cloud(&mut clouds, layer, token);
                continue;
            }
            if self.clear_sky_re.is_match(token) {
                let layer = CloudLayer {
                    cover: Some("clear".to_string()),
                    height: None,
                    cloud_type: None,
                };
                push_cloud(&mut clouds, layer, token);
                continue;
            }

            if let Some(caps) = self.temperature_re.captures(token) {
                temperatures.temperature = parse_celsius(&caps[1]);
                temperatures.dewpoint = caps.get(2).and_then(|m| parse_celsius(m.as_str()));
                continue;
            }

            if let Some(caps) = self.pressure_re.captures(token) {
                let raw: f64 = caps[2].parse().unwrap_or(0.0);
                pressure = Some(match &caps[1] {
                    "Q" => raw * HPA_TO_INHG,
                    _ => raw / 100.0,
                });
                continue;
            }

            if let Some(group) = self.parse_weather(token) {
                if weathers.len() < MAX_WEATHER_GROUPS {
                    weathers.push(group);
                } else {
                    debug!("Discarding weather group beyond limit: {}", token);
                }
                continue;
            }

            debug!("Skipping unrecognized METAR group: {}", token);
        }

        let station =
            station.ok_or_else(|| ProcessingError::decode("missing station identifier"))?;
        let time = time.ok_or_else(|| {
            ProcessingError::decode(format!("missing day-time group for {}", station))
        })?;

        Ok(Report {
            station,
            time,
            wind,
            visibility,
            weathers,
            clouds,
            temperatures,
            pressure,
        })
    }

    fn observation_time(
        &self,
        caps: &Captures,
        year: i32,
        month: u32,
        token: &str,
    ) -> Result<NaiveDateTime> {
        let day: u32 = caps[1].parse().unwrap_or(0);
        let hour: u32 = caps[2].parse().unwrap_or(0);
        let minute: u32 = caps[3].parse().unwrap_or(0);

        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .ok_or_else(|| {
                ProcessingError::decode(format!(
                    "impossible observation time '{}' for {}-{:02}",
                    token, year, month
                ))
            })
    }

    fn parse_weather(&self, token: &str) -> Option<WeatherGroup> {
        let caps = self.weather_re.captures(token)?;

        let group = WeatherGroup {
            intensity: caps.get(1).map(|m| long_intensity(m.as_str()).to_string()),
            description: caps.get(2).map(|m| long_description(m.as_str()).to_string()),
            precipitation: caps
                .get(3)
                .map(|m| long_precipitation(m.as_str()).to_string()),
            obscuration: caps.get(4).map(|m| long_obscuration(m.as_str()).to_string()),
        };

        // The all-optional grammar matches an empty token; require substance
        if group == WeatherGroup::default() {
            return None;
        }
        Some(group)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_wind(caps: &Captures) -> Wind {
    let direction = if &caps[1] == "VRB" {
        None
    } else {
        caps[1].parse::<f64>().ok()
    };

    let to_knots = match &caps[4] {
        "MPS" => MPS_TO_KNOTS,
        "KMH" => KMH_TO_KNOTS,
        _ => 1.0,
    };

    Wind {
        direction,
        speed: caps[2].parse::<f64>().ok().map(|s| s * to_knots),
        gust: caps
            .get(3)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(|g| g * to_knots),
    }
}

fn parse_miles(caps: &Captures) -> f64 {
    let numerator: f64 = caps[1].parse().unwrap_or(0.0);
    let miles = match caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok()) {
        Some(denominator) if denominator > 0.0 => numerator / denominator,
        _ => numerator,
    };

    miles * STATUTE_MILE_METERS
}

fn parse_celsius(group: &str) -> Option<f64> {
    if let Some(stripped) = group.strip_prefix('M') {
        stripped.parse::<f64>().ok().map(|v| -v)
    } else {
        group.parse::<f64>().ok()
    }
}

fn push_cloud(clouds: &mut Vec<CloudLayer>, layer: CloudLayer, token: &str) {
    if clouds.len() < CLOUD_LAYER_SLOTS {
        clouds.push(layer);
    } else {
        debug!("Discarding cloud layer beyond limit: {}", token);
    }
}

fn long_intensity(code: &str) -> &str {
    match code {
        "-" => "light",
        "+" => "heavy",
        "VC" => "nearby",
        other => other,
    }
}

fn long_description(code: &str) -> &str {
    match code {
        "MI" => "shallow",
        "BC" => "patches",
        "PR" => "partial",
        "DR" => "low drifting",
        "BL" => "blowing",
        "SH" => "showers",
        "TS" => "thunderstorm",
        "FZ" => "freezing",
        other => other,
    }
}

fn long_precipitation(code: &str) -> &str {
    match code {
        "DZ" => "drizzle",
        "RA" => "rain",
        "SN" => "snow",
        "SG" => "snow grains",
        "IC" => "ice crystals",
        "PL" => "ice pellets",
        "GR" => "hail",
        "GS" => "snow pellets",
        "UP" => "unknown precipitation",
        other => other,
    }
}

fn long_obscuration(code: &str) -> &str {
    match code {
        "BR" => "mist",
        "FG" => "fog",
        "FU" => "smoke",
        "VA" => "volcanic ash",
        "DU" => "dust",
        "SA" => "sand",
        "HZ" => "haze",
        "PY" => "spray",
        other => other,
    }
}

fn long_cover(code: &str) -> &str {
    match code {
        "FEW" => "a few",
        "SCT" => "scattered",
        "BKN" => "broken",
        "OVC" => "overcast",
        other => other,
    }
}
