use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use pytidy_imports::{Config, Operation, print_all_tidy, print_changed, run};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "pytidy")]
#[command(about = "Tidy the import blocks of Python source files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Regroup and sort each file's import block
    Prettify(Config),
    /// Strip imports a linter report flags as unused
    RemoveUnused(Config),
    /// Remove unused imports, then regroup what remains
    Fix(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    let (cfg, op) = match cli.command {
        Commands::Prettify(cfg) => (cfg, Operation::Prettify),
        Commands::RemoveUnused(cfg) => (cfg, Operation::RemoveUnused),
        Commands::Fix(cfg) => (cfg, Operation::Fix),
    };

    let num_threads = rayon::current_num_threads();
    info!("Running {:?} (using {} threads)", op, num_threads);
    let check = cfg.check;

    let result = run(cfg, op)?;
    let elapsed_ms = start.elapsed().as_millis();

    if result.changed.is_empty() {
        print_all_tidy(&mut stdout, &result)?;
    } else {
        print_changed(&mut stdout, &result, check)?;
    }

    writeln!(
        stdout,
        "\n{} Finished in {}ms on {} files (using {} threads).",
        "●".bright_blue(),
        elapsed_ms.to_string().cyan(),
        result.files_seen.to_string().cyan(),
        num_threads.to_string().cyan()
    )?;
    stdout.flush()?;

    // Non-zero exit so CI fails when files still need tidying
    if check && !result.changed.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
