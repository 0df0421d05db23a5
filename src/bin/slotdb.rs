//! SlotDB command-line tool
//!
//! Replays operation scripts, prints the free list, and compacts the
//! movie data file.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use slotdb::ops::{format_free_list, run_script};
use slotdb::{Config, Movie, Result, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// SlotDB
#[derive(Parser, Debug)]
#[command(name = "slotdb")]
#[command(about = "Single-file record store with free-list slot reuse")]
#[command(version)]
struct Args {
    /// Data file
    #[arg(short, long, default_value = "./records.dat")]
    data: PathBuf,

    /// fsync after every mutation
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay an operations script and write its log
    Exec {
        /// Operations script
        #[arg(short, long, default_value = "./operations.txt")]
        ops: PathBuf,

        /// Log output
        #[arg(short, long, default_value = "./operations.log")]
        log: PathBuf,
    },

    /// Print the free list
    FreeList,

    /// Rewrite the data file without deleted slots
    Compact,

    /// Create an empty data file
    Init,

    /// Look up one record
    Get {
        /// The key to look up
        key: i64,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,slotdb=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut builder = Config::builder()
        .data_path(&args.data)
        .sync_writes(args.sync);

    if let Commands::Exec { ops, log } = &args.command {
        builder = builder.operations_path(ops).log_path(log);
    }
    let config = builder.build();

    match args.command {
        Commands::Init => {
            let store = Store::<Movie>::create(&config.data_path)?;
            println!("Created {}", store.data_path().display());
            store.close()
        }
        Commands::Exec { .. } => {
            let script = BufReader::new(File::open(&config.operations_path)?);
            let log = BufWriter::new(File::create(&config.log_path)?);

            let mut store = Store::<Movie>::open(config.clone())?;
            let summary = run_script(&mut store, script, log)?;
            store.close()?;

            println!(
                "Executed {} operations ({} rejected), log written to {}",
                summary.total(),
                summary.rejected,
                config.log_path.display()
            );
            Ok(())
        }
        Commands::FreeList => {
            let mut store = Store::<Movie>::open(config)?;
            print!("{}", format_free_list(&store.free_list()?));
            Ok(())
        }
        Commands::Compact => {
            let mut store = Store::<Movie>::open(config)?;
            let stats = store.compact()?;
            println!(
                "Compacted: kept {} records, dropped {} slots, {} -> {} bytes",
                stats.records_kept, stats.slots_dropped, stats.bytes_before, stats.bytes_after
            );
            store.close()
        }
        Commands::Get { key } => {
            let mut store = Store::<Movie>::open(config)?;
            match store.lookup(key)? {
                Some(found) => println!(
                    "{:?} (offset {}, {} bytes)",
                    found.record, found.offset, found.capacity
                ),
                None => println!("Key {} not found", key),
            }
            Ok(())
        }
    }
}
