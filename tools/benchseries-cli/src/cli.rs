//! Command-line arguments.

use benchseries::{InputSource, Mode};
use facet::Facet;
use facet_args as args;

/// benchseries: reshape benchstat comparisons into per-variant series.
#[derive(Facet, Debug, Default)]
pub struct Cli {
    /// Benchmark results file (raw mode) or benchstat output (any other mode)
    #[facet(args::positional)]
    pub target: String,

    /// `raw` (default) runs benchstat on the target; any other value reads it as-is
    #[facet(args::positional, default)]
    pub mode: Option<String>,

    /// Print the report as JSON instead of three text lines
    #[facet(args::named)]
    pub json: bool,

    /// benchstat executable to run in raw mode
    #[facet(args::named, default)]
    pub tool: Option<String>,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        Mode::from_flag(self.mode.as_deref())
    }

    pub fn input_source(&self) -> InputSource {
        let source = InputSource::new(&self.target, self.mode());
        match &self.tool {
            Some(tool) => source.with_tool(tool),
            None => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchseries::source::DEFAULT_TOOL;
    use facet_testhelpers::test;

    #[test]
    fn test_target_only_is_raw() {
        let cli: Cli = facet_args::from_slice(&["bench.txt"]).unwrap();
        assert_eq!(cli.target, "bench.txt");
        assert_eq!(cli.mode(), Mode::Raw);
        assert!(!cli.json);
        assert_eq!(cli.input_source().tool(), DEFAULT_TOOL);
    }

    #[test]
    fn test_other_mode_is_preprocessed() {
        let cli: Cli = facet_args::from_slice(&["report.txt", "txt"]).unwrap();
        assert_eq!(cli.mode(), Mode::Preprocessed);
        assert_eq!(cli.input_source().mode(), Mode::Preprocessed);
    }

    #[test]
    fn test_named_options() {
        let cli: Cli =
            facet_args::from_slice(&["--json", "--tool", "/opt/go/bin/benchstat", "bench.txt"])
                .unwrap();
        assert!(cli.json);
        assert_eq!(cli.mode(), Mode::Raw);
        assert_eq!(cli.input_source().tool(), "/opt/go/bin/benchstat");
    }

    #[test]
    fn test_unknown_flag_renders_an_error() {
        let err = facet_args::from_slice::<Cli>(&["--bogus", "bench.txt"]).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_missing_target_is_an_error() {
        assert!(facet_args::from_slice::<Cli>(&[]).is_err());
    }
}
