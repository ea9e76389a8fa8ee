use crate::error::{ProcessingError, Result};
use crate::models::Report;
use crate::utils::constants::{CLOUD_LAYER_SLOTS, CSV_HEADER, NULL_FIELD, OUTPUT_FILE};
use chrono::{Datelike, Timelike};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Abbreviation tables, long-form decoder vocabulary to METAR code.
///
/// Weather tables are permissive: values outside the table pass through
/// unchanged. The cover table is closed: a present cover outside it is a
/// data-quality defect and fails the run.
const INTENSITY_CODES: [(&str, &str); 1] = [("nearby", "VC")];

const DESCRIPTION_CODES: [(&str, &str); 2] = [("thunderstorm", "TS"), ("showers", "SH")];

const PRECIPITATION_CODES: [(&str, &str); 2] = [("rain", "RA"), ("drizzle", "DZ")];

const OBSCURATION_CODES: [(&str, &str); 2] = [("fog", "FG"), ("mist", "BR")];

const COVER_CODES: [(&str, &str); 6] = [
    ("a few", "FEW"),
    ("scattered", "SCT"),
    ("broken", "BKN"),
    ("overcast", "OVC"),
    ("indefinite ceiling", "VV"),
    ("clear", "NSC"),
];

/// Render an optional numeric field: absent values become the null sentinel,
/// present ones fixed-point with the given number of decimal digits.
fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.1$}", v, decimals),
        None => NULL_FIELD.to_string(),
    }
}

/// Map an optional categorical value through an abbreviation table; unmapped
/// present values pass through unchanged, absent ones become null.
fn abbreviate(table: &[(&str, &str)], value: Option<&str>) -> String {
    match value {
        Some(v) => table
            .iter()
            .find(|(long, _)| *long == v)
            .map(|(_, code)| code.to_string())
            .unwrap_or_else(|| v.to_string()),
        None => NULL_FIELD.to_string(),
    }
}

/// Map a present cloud cover through the closed cover table.
fn cover_code(value: &str) -> Result<&'static str> {
    COVER_CODES
        .iter()
        .find(|(long, _)| *long == value)
        .map(|(_, code)| *code)
        .ok_or_else(|| ProcessingError::UnmappedCategory {
            field: "cloud cover",
            value: value.to_string(),
        })
}

/// The fixed header line, including trailing newline.
pub fn header_line() -> String {
    format!("{}\n", CSV_HEADER.join(","))
}

/// Flatten a decoded report into one newline-terminated CSV row.
///
/// The row always carries exactly the 30 header columns: one weather group
/// (the first reported, if any) as four columns and exactly four cloud-layer
/// triples, padded with nulls past the report's actual layer count.
pub fn format_row(report: &Report) -> Result<String> {
    let mut fields: Vec<String> = Vec::with_capacity(CSV_HEADER.len());

    fields.push(report.time.year().to_string());
    fields.push(report.time.month().to_string());
    fields.push(report.time.day().to_string());
    fields.push(report.time.hour().to_string());
    fields.push(report.time.minute().to_string());
    fields.push(report.station.clone());

    fields.push(format_number(report.wind.direction, 1));
    fields.push(format_number(report.wind.speed, 1));
    fields.push(format_number(report.wind.gust, 1));

    fields.push(format_number(report.visibility.distance, 1));
    fields.push(if report.visibility.cavok { "1" } else { "0" }.to_string());

    let first_weather = report.weathers.first();
    fields.push(abbreviate(
        &INTENSITY_CODES,
        first_weather.and_then(|w| w.intensity.as_deref()),
    ));
    fields.push(abbreviate(
        &DESCRIPTION_CODES,
        first_weather.and_then(|w| w.description.as_deref()),
    ));
    fields.push(abbreviate(
        &PRECIPITATION_CODES,
        first_weather.and_then(|w| w.precipitation.as_deref()),
    ));
    fields.push(abbreviate(
        &OBSCURATION_CODES,
        first_weather.and_then(|w| w.obscuration.as_deref()),
    ));

    for slot in 0..CLOUD_LAYER_SLOTS {
        match report.clouds.get(slot) {
            Some(layer) => {
                let cover = match layer.cover.as_deref() {
                    Some(value) => cover_code(value)?.to_string(),
                    None => NULL_FIELD.to_string(),
                };
                fields.push(cover);
                fields.push(format_number(layer.height, 1));
                fields.push(
                    layer
                        .cloud_type
                        .clone()
                        .unwrap_or_else(|| NULL_FIELD.to_string()),
                );
            }
            None => {
                for _ in 0..3 {
                    fields.push(NULL_FIELD.to_string());
                }
            }
        }
    }

    fields.push(format_number(report.temperatures.temperature, 1));
    fields.push(format_number(report.temperatures.dewpoint, 1));
    fields.push(format_number(report.pressure, 2));

    debug_assert_eq!(fields.len(), CSV_HEADER.len());
    Ok(format!("{}\n", fields.join(",")))
}

/// Buffered writer for one station's `metars.csv`, exclusively owned by the
/// processing loop for its lifetime.
pub struct CsvWriter {
    writer: BufWriter<File>,
}

impl CsvWriter {
    /// Create `metars.csv` in the station directory and write the header.
    pub fn create(station_dir: &Path) -> Result<Self> {
        let file = File::create(station_dir.join(OUTPUT_FILE))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(header_line().as_bytes())?;

        Ok(Self { writer })
    }

    pub fn write_report(&mut self, report: &Report) -> Result<()> {
        let row = format_row(report)?;
        self.writer.write_all(row.as_bytes())?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
