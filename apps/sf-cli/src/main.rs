use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use thiserror::Error;

use sf_config::{BuildRequest, ControllerBuilder, GainArtifact};
use sf_smc::VariantKind;
use sf_tune::{tune, CostWeights, GainBounds, PsoConfig};

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(about = "Sigmaflow CLI - sliding-mode controller gain tuning tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tune gains for a controller variant with the swarm optimizer
    Tune {
        /// Variant name (classical_smc, sta_smc, adaptive_smc, hybrid_adaptive_sta_smc)
        variant: String,
        /// Number of swarm particles
        #[arg(long, default_value_t = 30)]
        particles: usize,
        /// Iteration budget
        #[arg(long, default_value_t = 100)]
        iters: usize,
        /// Random seed (the run is fully reproducible from it)
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Output JSON file for the tuned gain artifact (optional)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Validate a gain artifact by building its controller
    Check {
        /// Path to the gain artifact JSON file
        artifact_path: PathBuf,
    },
    /// Print the parameter migration guide for a variant
    MigrationGuide {
        /// Variant name
        variant: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Unknown controller variant: {name}")]
    UnknownVariant { name: String },

    #[error(transparent)]
    Config(#[from] sf_config::ConfigError),

    #[error(transparent)]
    Tune(#[from] sf_tune::TuneError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Artifact parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tune {
            variant,
            particles,
            iters,
            seed,
            out,
        } => cmd_tune(&variant, particles, iters, seed, out.as_deref()),
        Commands::Check { artifact_path } => cmd_check(&artifact_path),
        Commands::MigrationGuide { variant } => cmd_migration_guide(&variant),
    }
}

fn parse_variant(name: &str) -> CliResult<VariantKind> {
    VariantKind::parse(name).ok_or_else(|| CliError::UnknownVariant {
        name: name.to_string(),
    })
}

fn cmd_tune(
    variant: &str,
    particles: usize,
    iters: usize,
    seed: u64,
    out: Option<&Path>,
) -> CliResult<()> {
    let kind = parse_variant(variant)?;
    println!(
        "Tuning {} ({} particles, {} iterations, seed {})",
        kind, particles, iters, seed
    );

    let config = PsoConfig {
        n_particles: particles,
        n_iterations: iters,
        seed,
        ..PsoConfig::default()
    };
    let result = tune(
        kind,
        &GainBounds::for_variant(kind),
        &config,
        &CostWeights::default(),
    )?;

    println!("Best cost: {:.4}", result.best_cost);
    println!("Gains {}: {:?}", kind.describe_gains(), result.best_gains);

    let artifact = GainArtifact::new(kind, result.best_gains);
    let json = serde_json::to_string_pretty(&artifact)?;
    match out {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("✓ Wrote gain artifact to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_check(artifact_path: &Path) -> CliResult<()> {
    println!("Checking gain artifact: {}", artifact_path.display());

    let json = std::fs::read_to_string(artifact_path)?;
    let artifact: GainArtifact = serde_json::from_str(&json)?;
    let kind = artifact.validate()?;

    let builder = ControllerBuilder::new();
    let output = builder.build(&BuildRequest::new(kind.as_str(), artifact.gains))?;

    for event in &output.deprecations {
        tracing::warn!(key = %event.key, "{}", event.message);
    }
    for warning in &output.warnings {
        println!("  warning: {warning}");
    }
    println!("✓ Artifact builds a {} controller", kind);
    Ok(())
}

fn cmd_migration_guide(variant: &str) -> CliResult<()> {
    let kind = parse_variant(variant)?;
    let builder = ControllerBuilder::new();

    println!("Migration guide for {}:", kind);
    for line in builder.migration_guide(kind) {
        println!("  - {line}");
    }
    Ok(())
}
