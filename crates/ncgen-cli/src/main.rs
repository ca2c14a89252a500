//! ncgen CLI - render job files into CNC program listings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ncgen::{Job, SeededNames};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ncgen")]
#[command(about = "Generate numbered CNC programs from job files", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a job file (.toml or .json) into a program listing
    Build {
        /// Input job file
        job: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Seed for the generated program name when the job has none
        #[arg(long, default_value_t = SeededNames::DEFAULT_SEED)]
        seed: u64,
        /// Reject unknown units and non-finite numbers
        #[arg(long)]
        strict: bool,
    },
    /// Validate a job file and summarize the program it produces
    Check {
        /// Input job file
        job: PathBuf,
        /// Reject unknown units and non-finite numbers
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            job,
            output,
            seed,
            strict,
        } => build(&job, output.as_deref(), seed, strict)?,
        Commands::Check { job, strict } => check(&job, strict)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_job(path: &Path, strict: bool) -> Result<Job> {
    let mut job = Job::load(path).with_context(|| format!("loading {}", path.display()))?;
    job.program.strict |= strict;
    Ok(job)
}

fn build(path: &Path, output: Option<&Path>, seed: u64, strict: bool) -> Result<()> {
    let job = load_job(path, strict)?;
    let listing = job
        .render(&mut SeededNames::new(seed))
        .with_context(|| format!("rendering {}", path.display()))?;

    match output {
        Some(out) => {
            std::fs::write(out, format!("{listing}\n"))
                .with_context(|| format!("writing {}", out.display()))?;
            tracing::info!(output = %out.display(), "program written");
        }
        None => println!("{listing}"),
    }
    Ok(())
}

fn check(path: &Path, strict: bool) -> Result<()> {
    let job = load_job(path, strict)?;
    let mut program = job
        .build(&mut SeededNames::default())
        .with_context(|| format!("rendering {}", path.display()))?;
    let name = program.name().to_string();
    let unit = program.unit();
    let positioning = program.positioning();
    let open = program.is_running();
    let lines = program.eval().lines().count();

    println!("Program:     O{name}");
    println!("Unit:        {unit}");
    println!("Positioning: {positioning}");
    println!("Directives:  {}", job.directives.len());
    println!("Lines:       {lines}");
    println!(
        "Terminated:  {}",
        if open { "no (closed on output)" } else { "yes" }
    );
    Ok(())
}
