use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hdfs_writer_config::JobConfig;

#[derive(Parser)]
#[command(name = "hdfs-writer")]
#[command(about = "Validate HDFS write jobs before they run", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the writer section of a job description
    Validate {
        /// Path to job YAML file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the validated writer configuration as JSON
    Describe {
        /// Path to job YAML file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show version information
    Version,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate { config } => {
            let job = JobConfig::from_yaml_file(&config)?;
            let descriptor = job.descriptor()?;
            println!(
                "✓ {} writer for {} is valid",
                descriptor.format_kind(),
                descriptor.output_dir()
            );
        }
        Commands::Describe { config } => {
            let job = JobConfig::from_yaml_file(&config)?;
            let descriptor = job.descriptor()?;
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
        Commands::Version => {
            println!("hdfs-writer version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
