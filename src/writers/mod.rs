pub mod csv_writer;

pub use csv_writer::{format_row, header_line, CsvWriter};
