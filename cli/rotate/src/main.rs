//! rl-rotate CLI
//!
//! Lists archive items matching date and name criteria, and optionally
//! removes them.

use clap::Parser;
use rl_cli_common::{format_number, init_logging};
use rl_error::RlError;

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so stdout carries only the matched items
    init_logging(args.log_level)?;

    let summary = match run::execute(args).await {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_code(&err));
        }
    };

    let stats = &summary.stats;
    eprintln!();
    eprintln!("Rotation completed ({}):", summary.source);
    eprintln!("  Candidates:       {}", format_number(stats.candidates as u64));
    eprintln!("  Undated:          {}", format_number(stats.undated() as u64));
    eprintln!("  Rejected:         {}", format_number(stats.rejected() as u64));
    eprintln!("  Spared by filter: {}", format_number(stats.filtered_out as u64));
    eprintln!("  To rotate:        {}", format_number(stats.output as u64));

    if let Some(report) = &summary.report {
        let label = if report.dry_run { "Would remove:" } else { "Removed:" };
        eprintln!("  {label:<18}{}", format_number(report.removed.len() as u64));
        eprintln!("  Failures:         {}", report.failed.len());
    }

    if summary.has_failures() {
        for (name, reason) in summary.report.iter().flat_map(|r| &r.failed) {
            eprintln!("  Error: {name}: {reason}");
        }
        std::process::exit(4); // Partial failure
    }

    Ok(())
}

/// Map a failure to a process exit code.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<RlError>()
        .map(rl_error::exit_code)
        .unwrap_or(1)
}
