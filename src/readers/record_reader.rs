use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DATA_FILE_EXTENSION, NIL_MARKER, TIMESTAMP_FORMAT, TIMESTAMP_LEN,
};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Split a raw record line into its issuance timestamp and report body.
///
/// Layout is `<12-char timestamp><separator><body><optional '='>`. Any `=`
/// terminator is stripped first; the single separator character at offset 12
/// is discarded. Pure: no validation happens here, a malformed timestamp only
/// surfaces when [`parse_timestamp`] is called on it.
pub fn split_record(line: &str) -> (String, String) {
    let cleaned: String = line.chars().filter(|&c| c != '=').collect();

    let timestamp: String = cleaned.chars().take(TIMESTAMP_LEN).collect();
    let body: String = cleaned.chars().skip(TIMESTAMP_LEN + 1).collect();

    (timestamp, body)
}

/// Parse a record timestamp slice as `YYYYMMDDHHmm`.
pub fn parse_timestamp(timestamp: &str) -> Result<NaiveDateTime> {
    if timestamp.len() != TIMESTAMP_LEN {
        return Err(ProcessingError::InvalidTimestamp {
            value: timestamp.to_string(),
        });
    }

    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|_| {
        ProcessingError::InvalidTimestamp {
            value: timestamp.to_string(),
        }
    })
}

/// True for missing scheduled observations, which are skipped without error.
pub fn is_nil(line: &str) -> bool {
    line.contains(NIL_MARKER)
}

pub struct RecordReader;

impl RecordReader {
    pub fn new() -> Self {
        Self
    }

    /// Discover a station's raw data files, in sorted-filename order so that
    /// output row order is reproducible across runs.
    pub fn data_files(&self, station_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(station_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(DATA_FILE_EXTENSION) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Read the newline-terminated records of one data file, skipping blank
    /// lines.
    pub fn read_records(&self, path: &Path) -> Result<Vec<String>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for line_result in reader.lines() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(line);
        }

        Ok(records)
    }
}

impl Default for RecordReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_split_record() {
        let line = "202401011200 METAR MROC 011200Z 10005KT CAVOK 25/18 A2992=";
        let (timestamp, body) = split_record(line);

        assert_eq!(timestamp, "202401011200");
        assert_eq!(body, "METAR MROC 011200Z 10005KT CAVOK 25/18 A2992");
    }

    #[test]
    fn test_split_record_glued_separator() {
        // Some archives glue a 'Z' to the timestamp; it is the discarded
        // separator character, leaving the body with a leading space
        let (timestamp, body) = split_record("202401011200Z MROC 011200Z 10005KT=");
        assert_eq!(timestamp, "202401011200");
        assert_eq!(body, " MROC 011200Z 10005KT");
        assert!(!body.contains('='));
    }

    #[test]
    fn test_split_record_is_pure() {
        let line = "202401011200Z MROC 011200Z 10005KT CAVOK 25/18 A2992=";
        assert_eq!(split_record(line), split_record(line));
    }

    #[test]
    fn test_parse_timestamp() {
        let time = parse_timestamp("202401011200").unwrap();

        assert_eq!(time.year(), 2024);
        assert_eq!(time.month(), 1);
        assert_eq!(time.day(), 1);
        assert_eq!(time.hour(), 12);
        assert_eq!(time.minute(), 0);
    }

    #[test]
    fn test_parse_timestamp_rejects_bad_input() {
        assert!(matches!(
            parse_timestamp("20240101"),
            Err(ProcessingError::InvalidTimestamp { .. })
        ));
        assert!(matches!(
            parse_timestamp("2024130x1200"),
            Err(ProcessingError::InvalidTimestamp { .. })
        ));
        // Month 13 is not a calendar date
        assert!(matches!(
            parse_timestamp("202413011200"),
            Err(ProcessingError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_is_nil() {
        assert!(is_nil("202401011200Z MROC 011200Z NIL="));
        assert!(!is_nil("202401011200Z MROC 011200Z 10005KT CAVOK 25/18 A2992="));
    }

    #[test]
    fn test_data_files_sorted() -> Result<()> {
        let temp_dir = TempDir::new()?;
        for name in ["2024-02.txt", "2024-01.txt", "notes.md", "2023-12.txt"] {
            std::fs::File::create(temp_dir.path().join(name))?;
        }

        let reader = RecordReader::new();
        let files = reader.data_files(temp_dir.path())?;

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["2023-12.txt", "2024-01.txt", "2024-02.txt"]);

        Ok(())
    }

    #[test]
    fn test_read_records_skips_blank_lines() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("2024-01.txt");
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "202401011200Z MROC 011200Z 10005KT CAVOK 25/18 A2992=")?;
        writeln!(file)?;
        writeln!(file, "202401011300Z MROC 011300Z NIL=")?;

        let reader = RecordReader::new();
        let records = reader.read_records(&path)?;

        assert_eq!(records.len(), 2);
        Ok(())
    }
}
