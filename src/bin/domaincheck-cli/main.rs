mod args;
mod output;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use domaincheck_lib::PublicSuffixTable;

use args::{Cli, Commands};
use output::OutputRow;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let checks = cli.checks()?;
    if cli.cmd.is_none() && !cli.stdin {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    }

    let table = PublicSuffixTable::from_path(&cli.psl)
        .with_context(|| format!("load public suffix list {}", cli.psl.display()))?;

    let mut rows: Vec<OutputRow> = Vec::new();
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            rows.push(output::validate_row(&table, line.trim(), &cli, checks));
        }
    } else {
        match &cli.cmd {
            Some(Commands::Validate { domain }) => {
                rows.push(output::validate_row(&table, domain, &cli, checks));
            }
            Some(Commands::Resolve { domain }) => {
                rows.push(output::resolve_row(&table, domain));
            }
            None => {}
        }
    }

    output::write_reports(&rows, &cli)?;

    // codes de sortie : 0 OK, 2 invalides, 1 fatal
    if output::any_invalid(&rows) {
        std::process::exit(2);
    }
    Ok(())
}

#[cfg(feature = "with-tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG=domaincheck_lib=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(not(feature = "with-tracing"))]
fn init_tracing() {}
