use crate::error::Result;
use crate::readers::record_reader::{is_nil, parse_timestamp, split_record};
use crate::readers::{Decoder, RecordReader};
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;
use chrono::Datelike;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Default, Clone)]
pub struct ProcessingSummary {
    pub files: usize,
    pub rows: usize,
    pub nil_skipped: usize,
}

impl ProcessingSummary {
    pub fn summary(&self) -> String {
        format!(
            "Processed {} rows from {} files ({} NIL reports skipped)",
            self.rows, self.files, self.nil_skipped
        )
    }
}

/// Sequential per-station processing loop.
///
/// Data files are processed strictly in sorted-filename order and rows are
/// appended in file-then-line order, so output is reproducible across runs.
/// Any error on a line aborts the whole station run; rows already written
/// remain in the file.
pub struct StationProcessor {
    reader: RecordReader,
    decoder: Decoder,
    silent: bool,
}

impl StationProcessor {
    pub fn new() -> Self {
        Self {
            reader: RecordReader::new(),
            decoder: Decoder::new(),
            silent: false,
        }
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Convert every raw record under `station_dir` into rows of a single
    /// `metars.csv` alongside the inputs.
    pub fn process(&self, station_dir: &Path) -> Result<ProcessingSummary> {
        let files = self.reader.data_files(station_dir)?;
        let mut writer = CsvWriter::create(station_dir)?;
        let mut summary = ProcessingSummary::default();

        for file in &files {
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let records = self.reader.read_records(file)?;

            let progress = ProgressReporter::new(
                records.len() as u64,
                &format!("Processing file {}", file_name),
                self.silent,
            );

            for line in &records {
                progress.increment(1);

                if is_nil(line) {
                    debug!("Skipping NIL report in {}", file_name);
                    summary.nil_skipped += 1;
                    continue;
                }

                let (timestamp, body) = split_record(line);
                let time = parse_timestamp(&timestamp)?;
                let report = self.decoder.decode(&body, time.year(), time.month())?;

                writer.write_report(&report)?;
                summary.rows += 1;
            }

            progress.finish_with_message(&format!("Processed file {}", file_name));
            info!("Processed {} records from {}", records.len(), file_name);
            summary.files += 1;
        }

        writer.finish()?;
        Ok(summary)
    }
}

impl Default for StationProcessor {
    fn default() -> Self {
        Self::new()
    }
}
