//! Shape parsed records into an x axis and two aligned value series.

use crate::error::{RenderError, SeriesError};
use crate::record::MeasurementRecord;
use facet::Facet;
use indexmap::IndexSet;
use std::fmt;
use std::io::{self, Write};

/// Values of one variant, in the order its records appeared.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct Series {
    /// Variant label, e.g. `Map`.
    pub variant: String,
    /// One value per record of this variant, in nanoseconds.
    pub values_ns: Vec<f64>,
}

impl Series {
    fn collect(variant: &str, records: &[MeasurementRecord]) -> Self {
        Self {
            variant: variant.to_string(),
            values_ns: records
                .iter()
                .filter(|r| r.variant == variant)
                .map(|r| r.value_ns)
                .collect(),
        }
    }
}

/// Benchmark names on the x axis and one series per compared variant.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct SeriesReport {
    /// Distinct benchmark names, first-seen order.
    pub xaxis: Vec<String>,
    /// Series of the first variant to appear.
    pub first: Series,
    /// Series of the second variant to appear.
    pub second: Series,
}

impl SeriesReport {
    /// Build the report from records in input order.
    ///
    /// The compared variants are the first two distinct variant labels, in
    /// order of appearance. Any further variants are left out of the report.
    pub fn from_records(records: &[MeasurementRecord]) -> Result<Self, SeriesError> {
        let variants: IndexSet<&str> = records.iter().map(|r| r.variant.as_str()).collect();
        let (first, second) = match (variants.get_index(0), variants.get_index(1)) {
            (Some(first), Some(second)) => (*first, *second),
            _ => {
                return Err(SeriesError::NotEnoughVariants {
                    found: variants.iter().map(|v| v.to_string()).collect(),
                });
            }
        };

        if variants.len() > 2 {
            let ignored: Vec<&str> = variants.iter().skip(2).copied().collect();
            tracing::warn!(
                first,
                second,
                ?ignored,
                "more than two variants in input, only the first two are reported"
            );
        }

        let xaxis: IndexSet<&str> = records.iter().map(|r| r.benchmark.as_str()).collect();
        let first = Series::collect(first, records);
        let second = Series::collect(second, records);

        if first.values_ns.len() != second.values_ns.len() {
            tracing::warn!(
                first = %first.variant,
                first_len = first.values_ns.len(),
                second = %second.variant,
                second_len = second.values_ns.len(),
                "series have different lengths and will not line up"
            );
        }

        Ok(Self {
            xaxis: xaxis.into_iter().map(str::to_string).collect(),
            first,
            second,
        })
    }

    /// Write the three-line text form: x axis, first series, second series.
    pub fn write_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{self}")
    }

    /// Pretty-printed JSON form of the report.
    pub fn to_json(&self) -> Result<String, RenderError> {
        facet_json::to_string_pretty(self).map_err(|e| RenderError {
            message: e.to_string(),
        })
    }
}

impl fmt::Display for SeriesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.xaxis.join(" "))?;
        writeln!(f, "{}", SeriesLine(&self.first))?;
        writeln!(f, "{}", SeriesLine(&self.second))
    }
}

/// `<variant> <v1> <v2> ...`
struct SeriesLine<'a>(&'a Series);

impl fmt::Display for SeriesLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.0.variant)?;
        for (idx, value) in self.0.values_ns.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", format_value(*value))?;
        }
        Ok(())
    }
}

/// Shortest round-trip form that always keeps a decimal point: `120.0`, `95.2`.
///
/// Outside that range this switches to exponent notation without a sign or
/// zero padding (`1e16`, `1e-5`), unlike Python's `1e+16` / `1e-05`.
pub fn format_value(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(benchmark: &str, variant: &str, value_ns: f64) -> MeasurementRecord {
        MeasurementRecord {
            benchmark: benchmark.to_string(),
            variant: variant.to_string(),
            cores: Some(8),
            value_ns,
        }
    }

    #[test]
    fn test_two_variants() {
        let records = [record("Add", "Map", 120.0), record("Add", "SyncMap", 300.0)];
        let report = SeriesReport::from_records(&records).unwrap();
        assert_eq!(report.xaxis, vec!["Add"]);
        assert_eq!(report.to_string(), "Add\nMap 120.0\nSyncMap 300.0\n");
    }

    #[test]
    fn test_xaxis_is_distinct_in_first_seen_order() {
        let records = [
            record("Store", "Map", 1.0),
            record("Store", "SyncMap", 2.0),
            record("Load", "Map", 3.0),
            record("Load", "SyncMap", 4.0),
            record("Store", "Map", 5.0),
        ];
        let report = SeriesReport::from_records(&records).unwrap();
        assert_eq!(report.xaxis, vec!["Store", "Load"]);
        assert_eq!(report.first.values_ns, vec![1.0, 3.0, 5.0]);
        assert_eq!(report.second.values_ns, vec![2.0, 4.0]);
    }

    #[test]
    fn test_variants_need_not_alternate() {
        let records = [
            record("Add", "Map", 1.0),
            record("Load", "Map", 2.0),
            record("Add", "SyncMap", 3.0),
            record("Load", "SyncMap", 4.0),
        ];
        let report = SeriesReport::from_records(&records).unwrap();
        assert_eq!(report.first.variant, "Map");
        assert_eq!(report.second.variant, "SyncMap");
        assert_eq!(report.second.values_ns, vec![3.0, 4.0]);
    }

    #[test]
    fn test_extra_variants_are_ignored() {
        let records = [
            record("Add", "Map", 1.0),
            record("Add", "SyncMap", 2.0),
            record("Add", "SkipMap", 3.0),
        ];
        let report = SeriesReport::from_records(&records).unwrap();
        assert_eq!(report.first.variant, "Map");
        assert_eq!(report.second.variant, "SyncMap");
        assert_eq!(report.xaxis, vec!["Add"]);
    }

    #[test]
    fn test_not_enough_variants() {
        let err = SeriesReport::from_records(&[]).unwrap_err();
        let SeriesError::NotEnoughVariants { found } = err;
        assert!(found.is_empty());

        let records = [record("Add", "Map", 1.0), record("Load", "Map", 2.0)];
        let SeriesError::NotEnoughVariants { found } =
            SeriesReport::from_records(&records).unwrap_err();
        assert_eq!(found, vec!["Map"]);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(120.0), "120.0");
        assert_eq!(format_value(1500.0), "1500.0");
        assert_eq!(format_value(2_000_000.0), "2000000.0");
        assert_eq!(format_value(95.2), "95.2");
        assert_eq!(format_value(1e16), "1e16");
        assert_eq!(format_value(1e-5), "1e-5");
    }

    #[test]
    fn test_write_text() {
        let records = [record("Add", "Map", 120.0), record("Add", "SyncMap", 300.0)];
        let report = SeriesReport::from_records(&records).unwrap();
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), report.to_string());
    }
}
