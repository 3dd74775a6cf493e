use anyhow::Context;
use clap::{Parser, Subcommand};
use image_hashing_core::logging::{init_logger, log_hash_error};
use image_hashing_core::{AlgorithmKind, HasherConfig};
use log::{info, LevelFilter};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "image-hash")]
#[command(about = "Compute and compare perceptual image hashes")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Hashing algorithm (average or perceptual)
    #[arg(short, long, global = true)]
    algorithm: Option<AlgorithmKind>,

    /// Requested hash length in bits
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    bits: Option<i32>,

    /// Write logs to a rotating file in this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash one or more image files
    Hash {
        /// Images to hash
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Compare two images
    Compare {
        first: PathBuf,
        second: PathBuf,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "image-hashing.json")]
        path: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => HasherConfig::from_file(path)?,
        None => HasherConfig::default(),
    };

    // Override config with command line arguments
    if let Some(algorithm) = cli.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(bits) = cli.bits {
        config.bit_resolution = bits;
    }

    let level = match cli.verbose {
        0 => LevelFilter::from(config.log_level),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    match &cli.log_dir {
        Some(dir) => init_logger(dir, level)
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?,
        None => env_logger::Builder::new()
            .filter_level(level)
            .parse_env("IMAGE_HASH_LOG")
            .init(),
    }

    match cli.command {
        Commands::Hash { files } => hash_files(&config, &files),
        Commands::Compare { first, second } => compare(&config, &first, &second),
        Commands::GenerateConfig { path } => {
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}

fn hash_files(config: &HasherConfig, files: &[PathBuf]) -> anyhow::Result<()> {
    let algorithm = config.build()?;
    info!(
        "Hashing {} files with {} ({} bits)",
        files.len(),
        algorithm.name(),
        algorithm.bit_resolution().get()
    );

    let results: Vec<_> = files
        .par_iter()
        .map(|path| (path, algorithm.hash_file(path)))
        .collect();

    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(hash) => println!("{}  {}", hash, path.display()),
            Err(e) => {
                log_hash_error(path, &e);
                eprintln!("error: {}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} files could not be hashed", failed, files.len());
    }
    Ok(())
}

fn compare(config: &HasherConfig, first: &Path, second: &Path) -> anyhow::Result<()> {
    let algorithm = config.build()?;

    let a = algorithm
        .hash_file(first)
        .with_context(|| format!("hashing {}", first.display()))?;
    let b = algorithm
        .hash_file(second)
        .with_context(|| format!("hashing {}", second.display()))?;

    let distance = a.hamming_distance(&b)?;
    let normalized = a.normalized_hamming_distance(&b)?;
    let similar = normalized <= config.similarity_threshold;

    println!("algorithm:  {} ({} bits)", algorithm.name(), a.bit_len());
    println!("distance:   {}", distance);
    println!("normalized: {:.4}", normalized);
    println!(
        "similar:    {} (threshold {})",
        if similar { "yes" } else { "no" },
        config.similarity_threshold
    );
    Ok(())
}
