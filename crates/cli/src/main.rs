//! Cache hierarchy simulator CLI.
//!
//! This binary constructs a one- or two-level cache hierarchy, replays an
//! address trace through it, and prints the contents dumps and measurement
//! report. It performs:
//! 1. **Parameter run:** Build the hierarchy from numeric parameters in the
//!    reference order (blocksize, L1 size/assoc, L2 size/assoc, prefetch N/M).
//! 2. **Config run:** Build the hierarchy from a JSON configuration file.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cachesim_core::stats::write_report;
use cachesim_core::{HierarchyConfig, LevelConfig, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "sim_cache",
    version,
    about = "Trace-driven set-associative cache hierarchy simulator",
    long_about = "Replay a read/write address trace through a configurable cache \
hierarchy with LRU replacement, write-back + write-allocate policy, and optional \
stream-buffer prefetching on the lowest level.\n\nExamples:\n  \
sim_cache run 16 1024 2 8192 4 0 0 traces/gcc_trace.txt\n  \
sim_cache config hierarchy.json traces/gcc_trace.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the hierarchy from numeric parameters (reference argument order).
    Run {
        /// Block size in bytes for every level (power of two).
        blocksize: u32,
        /// L1 total size in bytes.
        l1_size: u32,
        /// L1 associativity (ways per set).
        l1_assoc: u32,
        /// L2 total size in bytes; 0 disables the L2.
        l2_size: u32,
        /// L2 associativity (ignored when L2_SIZE is 0).
        l2_assoc: u32,
        /// Stream buffer count on the lowest level; 0 disables prefetching.
        pref_n: u32,
        /// Blocks per stream buffer.
        pref_m: u32,
        /// Trace file: one `r <hex>` or `w <hex>` per line.
        trace: PathBuf,
    },

    /// Build the hierarchy from a JSON configuration file.
    Config {
        /// JSON file deserializing to a hierarchy configuration.
        file: PathBuf,
        /// Trace file: one `r <hex>` or `w <hex>` per line.
        trace: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            blocksize,
            l1_size,
            l1_assoc,
            l2_size,
            l2_assoc,
            pref_n,
            pref_m,
            trace,
        } => {
            let config =
                build_config(blocksize, l1_size, l1_assoc, l2_size, l2_assoc, pref_n, pref_m);
            print_parameters(&config, &trace);
            run(&config, &trace);
        }
        Commands::Config { file, trace } => {
            let config = load_config(&file);
            print_parameters(&config, &trace);
            run(&config, &trace);
        }
    }
}

/// Maps the reference argument order onto a hierarchy configuration.
///
/// `l2_size == 0` means no L2. Stream buffers attach to the lowest level of
/// the hierarchy — prefetch streams are born where misses leave the chain.
fn build_config(
    blocksize: u32,
    l1_size: u32,
    l1_assoc: u32,
    l2_size: u32,
    l2_assoc: u32,
    pref_n: u32,
    pref_m: u32,
) -> HierarchyConfig {
    let has_l2 = l2_size > 0;
    let l1 = LevelConfig {
        blocksize,
        size: l1_size,
        assoc: l1_assoc,
        pref_n: if has_l2 { 0 } else { pref_n },
        pref_m: if has_l2 { 0 } else { pref_m },
    };
    let l2 = has_l2.then(|| LevelConfig {
        blocksize,
        size: l2_size,
        assoc: l2_assoc,
        pref_n,
        pref_m,
    });
    HierarchyConfig { l1, l2 }
}

/// Reads and deserializes a JSON hierarchy configuration.
fn load_config(path: &Path) -> HierarchyConfig {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: cannot open config {}: {e}", path.display());
            process::exit(1);
        }
    };
    match serde_json::from_reader(BufReader::new(file)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: bad config {}: {e}", path.display());
            process::exit(1);
        }
    }
}

/// Echoes the effective parameters in the reference layout.
fn print_parameters(config: &HierarchyConfig, trace: &Path) {
    let lowest = config.l2.as_ref().unwrap_or(&config.l1);
    println!("===== Simulator configuration =====");
    println!(" BLOCKSIZE:                        {}", config.l1.blocksize);
    println!(" L1_SIZE:                          {}", config.l1.size);
    println!(" L1_ASSOC:                         {}", config.l1.assoc);
    println!(
        " L2_SIZE:                          {}",
        config.l2.as_ref().map_or(0, |l2| l2.size)
    );
    println!(
        " L2_ASSOC:                         {}",
        config.l2.as_ref().map_or(0, |l2| l2.assoc)
    );
    println!(" PREF_N:                           {}", lowest.pref_n);
    println!(" PREF_M:                           {}", lowest.pref_m);
    println!(" trace_file:                       {}", trace.display());
}

/// Builds the hierarchy, replays the trace, and prints contents and report.
fn run(config: &HierarchyConfig, trace: &Path) {
    let mut sim = match Simulator::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: invalid configuration: {e}");
            process::exit(1);
        }
    };

    let file = match File::open(trace) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: cannot open trace {}: {e}", trace.display());
            process::exit(1);
        }
    };
    if let Err(e) = sim.replay(BufReader::new(file)) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let mut out = String::new();
    let render = render_output(&mut out, &sim);
    if render.is_err() {
        eprintln!("Error: failed to render report");
        process::exit(1);
    }
    print!("{out}");
}

/// Renders contents dumps, stream buffers, and the measurement report.
fn render_output(out: &mut String, sim: &Simulator) -> std::fmt::Result {
    sim.l1().write_contents(out, "L1")?;
    if let Some(l2) = sim.l2() {
        l2.write_contents(out, "L2")?;
    }
    // Stream buffers live on the lowest level.
    sim.l2().unwrap_or_else(|| sim.l1()).write_stream_buffers(out)?;
    write_report(out, sim.l1(), sim.l2())
}
