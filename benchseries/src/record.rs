//! Measurement records and time-unit normalization.

use facet::Facet;

/// One benchmark result for one variant, normalized to nanoseconds.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    /// Benchmark function name, e.g. `Add` in `Add/Map-8`.
    pub benchmark: String,
    /// Implementation being measured, e.g. `Map` in `Add/Map-8`.
    pub variant: String,
    /// GOMAXPROCS suffix, e.g. `8` in `Add/Map-8`. Not used for series.
    pub cores: Option<u32>,
    /// Measured time per operation in nanoseconds.
    pub value_ns: f64,
}

/// Time unit of a measurement token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// `ns`
    Nanos,
    /// `µs`
    Micros,
    /// `ms`
    Millis,
}

impl TimeUnit {
    /// Multiplier that converts a value in this unit to nanoseconds.
    pub fn factor(self) -> f64 {
        match self {
            TimeUnit::Nanos => 1.0,
            TimeUnit::Micros => 1_000.0,
            TimeUnit::Millis => 1_000_000.0,
        }
    }

    /// Symbol as benchstat prints it.
    pub fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Nanos => "ns",
            TimeUnit::Micros => "µs",
            TimeUnit::Millis => "ms",
        }
    }

    /// Split a token like `1.5µs` into `("1.5", Micros)`.
    pub fn split_suffix(token: &str) -> Option<(&str, TimeUnit)> {
        // U+00B5 MICRO SIGN is what benchstat prints; U+03BC GREEK SMALL LETTER MU
        // shows up after copy-pasting through some editors.
        const SUFFIXES: [(&str, TimeUnit); 4] = [
            ("ns", TimeUnit::Nanos),
            ("\u{b5}s", TimeUnit::Micros),
            ("\u{3bc}s", TimeUnit::Micros),
            ("ms", TimeUnit::Millis),
        ];

        SUFFIXES
            .iter()
            .find_map(|(suffix, unit)| token.strip_suffix(suffix).map(|num| (num, *unit)))
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Why a single measurement token could not be read.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasurementFault {
    /// The token does not end in ns, µs or ms.
    UnknownUnit,
    /// The text before the unit is not a number.
    InvalidNumber(std::num::ParseFloatError),
}

/// Parse a measurement token such as `120ns` or `1.5µs` into nanoseconds.
pub fn parse_measurement(token: &str) -> Result<f64, MeasurementFault> {
    let (number, unit) = TimeUnit::split_suffix(token).ok_or(MeasurementFault::UnknownUnit)?;
    let value: f64 = number.parse().map_err(MeasurementFault::InvalidNumber)?;
    Ok(value * unit.factor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement("120ns"), Ok(120.0));
        assert_eq!(parse_measurement("1.5µs"), Ok(1500.0));
        assert_eq!(parse_measurement("2ms"), Ok(2_000_000.0));
        assert!((parse_measurement("57.94ms").unwrap() - 57_940_000.0).abs() < 0.1);
    }

    #[test]
    fn test_greek_mu_is_micros() {
        assert_eq!(parse_measurement("3\u{3bc}s"), Ok(3000.0));
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(parse_measurement("1.5s"), Err(MeasurementFault::UnknownUnit));
        assert_eq!(parse_measurement("42"), Err(MeasurementFault::UnknownUnit));
        assert_eq!(parse_measurement("12B"), Err(MeasurementFault::UnknownUnit));
    }

    #[test]
    fn test_invalid_number() {
        assert!(matches!(
            parse_measurement("abcns"),
            Err(MeasurementFault::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_measurement("ns"),
            Err(MeasurementFault::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_split_suffix() {
        assert_eq!(TimeUnit::split_suffix("7ms"), Some(("7", TimeUnit::Millis)));
        assert_eq!(TimeUnit::split_suffix("7"), None);
        assert_eq!(TimeUnit::Micros.to_string(), "µs");
    }
}
