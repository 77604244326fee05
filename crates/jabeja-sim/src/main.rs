use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use commands::{
    partition::{self, PartitionArgs},
    stats::{self, StatsArgs},
};
use flexi_logger::{opt_format, FileSpec, Logger, LoggerHandle, WriteMode};

mod commands;
mod sim_config;

#[derive(Parser, Debug)]
#[command(name = "jabeja-sim", about = "Decentralized JA-BE-JA graph partitioner")]
struct Cli {
    /// Log specification, e.g. `info` or `jabeja_engine=debug`.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// Also write the log to this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Color a graph and run the swap protocol, writing the result table,
    /// final partition and manifest.
    Partition(PartitionArgs),
    /// Print node, edge and edge-cut statistics for a graph file.
    Stats(StatsArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level, cli.log_dir.as_deref())?;
    match cli.command {
        Command::Partition(args) => partition::run(&args),
        Command::Stats(args) => stats::run(&args),
    }
}

/// Logs to stderr, and additionally to `jabeja.log` under `log_dir` when given.
/// The returned handle must outlive the run so buffered file output is flushed.
fn setup_logging(spec: &str, log_dir: Option<&Path>) -> Result<LoggerHandle, Box<dyn Error>> {
    let logger = Logger::try_with_str(spec)?.format(opt_format);
    let handle = match log_dir {
        Some(dir) => logger
            .log_to_file(
                FileSpec::default()
                    .directory(dir)
                    .basename("jabeja")
                    .suppress_timestamp(),
            )
            .duplicate_to_stderr(flexi_logger::Duplicate::All)
            .write_mode(WriteMode::BufferAndFlush)
            .start()?,
        None => logger.log_to_stderr().start()?,
    };
    Ok(handle)
}

fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
