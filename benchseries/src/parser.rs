//! Parse benchstat text output into measurement records.
//!
//! The input looks like:
//!
//! ```text
//! name           time/op
//! Add/Map-8      120ns ± 3%
//! Add/SyncMap-8  300ns ± 2%
//!
//! name           alloc/op
//! Add/Map-8      0.00B
//! ```
//!
//! The first line is a header. Everything from the `alloc/op` section onward
//! is memory statistics and is ignored.

use crate::error::ParseError;
use crate::record::{MeasurementFault, MeasurementRecord, parse_measurement};
use crate::source::Input;
use miette::{NamedSource, SourceSpan};

/// Any line containing this ends the timing section.
pub const TERMINATOR: &str = "alloc/op";

/// Separates the measurement from its error margin.
const MARGIN_SEPARATOR: char = '±';

/// Why a single line could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum LineFault {
    /// No space, or the line starts with one, so there is no name prefix.
    MissingSeparator,
    /// The name prefix has no `/<variant>` segment.
    MissingVariant,
    /// The measurement token does not end in ns, µs or ms.
    UnknownUnit {
        /// The measurement token.
        token: String,
    },
    /// The measurement token's number could not be parsed.
    InvalidNumber {
        /// The measurement token.
        token: String,
        /// Float parsing failure.
        source: std::num::ParseFloatError,
    },
}

/// Parse one result line, e.g. `Add/Map-8 120ns ± 3%`.
pub fn parse_line(line: &str) -> Result<MeasurementRecord, LineFault> {
    let split_at = match line.find(' ') {
        Some(0) | None => return Err(LineFault::MissingSeparator),
        Some(idx) => idx,
    };
    let (prefix, suffix) = line.split_at(split_at);

    let mut segments = prefix.split('/');
    let benchmark = segments.next().unwrap_or_default();
    let variant_segment = segments.next().ok_or(LineFault::MissingVariant)?;

    let mut variant_parts = variant_segment.split('-');
    let variant = variant_parts.next().unwrap_or_default();
    let cores = variant_parts.next().and_then(|n| n.parse().ok());

    let compact: String = suffix.chars().filter(|c| *c != ' ').collect();
    let token = compact
        .split(MARGIN_SEPARATOR)
        .next()
        .unwrap_or_default();

    let value_ns = parse_measurement(token).map_err(|fault| match fault {
        MeasurementFault::UnknownUnit => LineFault::UnknownUnit {
            token: token.to_string(),
        },
        MeasurementFault::InvalidNumber(source) => LineFault::InvalidNumber {
            token: token.to_string(),
            source,
        },
    })?;

    Ok(MeasurementRecord {
        benchmark: benchmark.to_string(),
        variant: variant.to_string(),
        cores,
        value_ns,
    })
}

/// Parse every result line of `input` up to the terminator line.
pub fn parse_report(input: &Input) -> Result<Vec<MeasurementRecord>, ParseError> {
    let mut records = Vec::new();

    for (offset, raw) in result_lines(&input.text) {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() {
            continue;
        }
        if line.contains(TERMINATOR) {
            tracing::debug!(offset, "reached `{TERMINATOR}` section, stopping");
            break;
        }

        match parse_line(line) {
            Ok(record) => {
                tracing::trace!(
                    benchmark = %record.benchmark,
                    variant = %record.variant,
                    value_ns = record.value_ns,
                    "parsed measurement"
                );
                records.push(record);
            }
            Err(fault) => {
                let span = SourceSpan::new(offset.into(), line.len());
                return Err(lift_fault(fault, line, span, input));
            }
        }
    }

    tracing::debug!(count = records.len(), input = %input.name, "parsed records");
    Ok(records)
}

/// Lines after the header, paired with their byte offset in `text`.
fn result_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .scan(0usize, |offset, line| {
            let start = *offset;
            *offset += line.len() + 1;
            Some((start, line))
        })
        .skip(1)
}

fn lift_fault(fault: LineFault, line: &str, span: SourceSpan, input: &Input) -> ParseError {
    let src = NamedSource::new(&input.name, input.text.clone());
    let line = line.to_string();
    match fault {
        LineFault::MissingSeparator => ParseError::MissingSeparator { line, span, src },
        LineFault::MissingVariant => ParseError::MissingVariant { line, span, src },
        LineFault::UnknownUnit { token } => ParseError::UnknownUnit {
            token,
            line,
            span,
            src,
        },
        LineFault::InvalidNumber { token, source } => ParseError::InvalidNumber {
            token,
            line,
            source,
            span,
            src,
        },
    }
}
