use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use powder_crystallites::crystallites::CrystalliteLoader;
use powder_crystallites::interfaces::Verbosity;
use powder_crystallites::mapping::NearestNeighborMapper;
use powder_crystallites::triangles::load_triangle_file;

#[derive(Parser)]
#[command(name = "powder-grid")]
#[command(about = "Inspect crystallite sets, triangulations and grid maps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (per-record diagnostics)
    #[arg(short, long)]
    verbose: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in crystallite sets
    Catalog,
    /// Load a crystallite set and summarise it
    Load {
        /// Built-in set name or crystallite file
        name: String,

        /// First crystallite (1-based)
        #[arg(long, default_value = "1")]
        from: i64,

        /// Last crystallite; negative means up to the end
        #[arg(long, default_value = "-1", allow_hyphen_values = true)]
        to: i64,

        /// Print every crystallite
        #[arg(long)]
        records: bool,
    },
    /// Load a triangle file and summarise it
    Triangles {
        /// Triangle file
        path: String,
    },
    /// Map every crystallite of TARGET to its nearest crystallite in SOURCE
    Map {
        source: String,
        target: String,

        /// Directory holding <target>_<source>.map cache files
        #[arg(long, default_value = ".")]
        cache_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            log::warn!("Thread count {} specified but parallel feature not enabled. Ignoring.", threads);
        }
    }

    info!("Starting powder-grid v{}", powder_crystallites::VERSION);
    let verbosity = Verbosity::from(cli.verbose);
    let loader = CrystalliteLoader::default();

    match cli.command {
        Commands::Catalog => {
            for name in loader.catalog().names() {
                println!("{}", name);
            }
        }
        Commands::Load {
            name,
            from,
            to,
            records,
        } => {
            let set = loader
                .load(&name, from, to, verbosity)
                .with_context(|| format!("loading crystallite set '{}'", name))?;
            println!("crystallites: {}", set.len());
            println!("weight sum:   {:.12}", set.sum_weights());
            if records {
                for (index, c) in set.iter().enumerate() {
                    println!(
                        "{:5} {:15.8} {:15.8} {:15.8} {:15.10}",
                        index + 1,
                        c.alpha,
                        c.beta,
                        c.gamma,
                        c.weight
                    );
                }
            }
        }
        Commands::Triangles { path } => {
            let mesh = load_triangle_file(&path, verbosity)
                .with_context(|| format!("loading triangle file '{}'", path))?;
            println!("triangles: {}", mesh.len());
            if let Some(max_index) = mesh.max_index() {
                println!("largest crystallite index: {}", max_index);
            }
        }
        Commands::Map {
            source,
            target,
            cache_dir,
        } => {
            let source_set = loader
                .load(&source, 1, -1, verbosity)
                .with_context(|| format!("loading source set '{}'", source))?;
            let target_set = loader
                .load(&target, 1, -1, verbosity)
                .with_context(|| format!("loading target set '{}'", target))?;
            let mapper = NearestNeighborMapper::new(cache_dir);
            let map = mapper
                .map(&source, &source_set, &target, &target_set, verbosity)
                .context("building nearest-neighbour map")?;
            for (i, j) in map.iter() {
                println!("{} {}", i, j);
            }
        }
    }

    Ok(())
}
