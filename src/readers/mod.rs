pub mod metar;
pub mod record_reader;

pub use metar::Decoder;
pub use record_reader::RecordReader;
