//! Runs a directory of `.contract` fixtures and reports regressions.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use layered_risk::{ContractAnalyzer, ExecutionMode};
use layered_risk_specs::{
    format_failure, format_summary, run_harness, ExpectedFailures, FailureState, SpecResult,
};

#[derive(Parser, Debug)]
#[command(name = "risk-specs", version, about = "Contract risk fixture harness")]
struct Cli {
    /// Directory searched recursively for `.contract` files
    #[arg(default_value = "fixtures")]
    fixtures: PathBuf,
    /// Expected failures ledger
    #[arg(long, default_value = "expected-failures.toml")]
    failures: PathBuf,
    #[arg(long, help = "Run the risk layers on scoped threads")]
    parallel: bool,
    #[arg(long, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(long, help = "Also print known and pending failures")]
    verbose: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> SpecResult<ExitCode> {
    let expected = ExpectedFailures::load(&cli.failures)?;
    let mode = if cli.parallel {
        ExecutionMode::Parallel
    } else {
        ExecutionMode::Sequential
    };
    let analyzer = ContractAnalyzer::new(layered_risk::Taxonomy::standard(), mode);

    let (harness, reports) = run_harness(&cli.fixtures, &expected, &analyzer)?;

    if cli.json {
        let reports: Vec<_> = reports.iter().map(|(report, _, _)| report).collect();
        let output = serde_json::json!({ "summary": harness, "fixtures": reports });
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(error) => eprintln!("error: {}", error),
        }
    } else {
        for (report, _, analysis) in &reports {
            for failure in &report.failures {
                if cli.verbose || failure.state == FailureState::Regression {
                    print!("{}", format_failure(&report.name, failure, analysis));
                }
            }
            let failed = report.failures.len();
            let regressions = report.regressions();
            if cli.verbose || regressions > 0 {
                print!(
                    "{}",
                    format_summary(&report.name, report.passed, failed, failed - regressions, regressions)
                );
            }
        }
        println!(
            "\n{} fixtures, {} assertions: {} passed, {} expected failures, {} regressions",
            reports.len(),
            harness.total,
            harness.passed,
            harness.expected_failures,
            harness.regressions
        );
    }

    Ok(ExitCode::from(harness.exit_code() as u8))
}
