#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod error;
pub mod parser;
pub mod record;
pub mod report;
pub mod source;

pub use error::{Error, ParseError, RenderError, Result, SeriesError, SourceError};
pub use parser::{parse_line, parse_report};
pub use record::{MeasurementRecord, TimeUnit};
pub use report::{Series, SeriesReport};
pub use source::{Input, InputSource, Mode};

/// Acquire the input, parse it and shape it into a [`SeriesReport`].
pub fn run(source: &InputSource) -> Result<SeriesReport> {
    let input = source.acquire()?;
    report_from_input(&input)
}

/// Parse already-acquired text and shape it into a [`SeriesReport`].
pub fn report_from_input(input: &Input) -> Result<SeriesReport> {
    let records = parse_report(input)?;
    Ok(SeriesReport::from_records(&records)?)
}
