//! benchseries: print benchstat comparisons as plottable series.

mod cli;
mod logging;

use cli::Cli;
use miette::Report;
use owo_colors::OwoColorize;

fn main() {
    logging::init();

    let cli: Cli = match facet_args::from_std_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli) {
        eprintln!("{}", "❌ benchseries failed".red().bold());
        eprintln!("{:?}", Report::new(e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> benchseries::Result<()> {
    let source = cli.input_source();
    let report = benchseries::run(&source)?;

    tracing::info!(
        benchmarks = report.xaxis.len(),
        first = %report.first.variant,
        second = %report.second.variant,
        "built series"
    );

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(())
}
