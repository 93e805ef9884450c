//! edgestore CLI
//!
//! Inspection and maintenance tool for an on-disk edgestore directory.
//! Items are treated as UTF-8 strings, which matches how the tool's
//! `append` writes them; stores holding other item types can still be
//! inspected with `stats`.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use edgestore::{Config, StoreProvider};

/// edgestore inspection CLI
#[derive(Parser, Debug)]
#[command(name = "edgestore")]
#[command(about = "Inspect and maintain an edgestore message log")]
#[command(version)]
struct Args {
    /// Data directory of the store
    #[arg(short, long, default_value = "./edgestore_data")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show head/next offsets and entry count of a log
    Stats {
        /// The log (entity store) name
        store: String,
    },

    /// Print entries of a log in offset order
    Dump {
        /// The log (entity store) name
        store: String,

        /// First offset to print
        #[arg(short, long, default_value = "0")]
        start: u64,

        /// Maximum number of entries to print
        #[arg(short, long, default_value = "100")]
        count: usize,
    },

    /// Append a string payload to a log
    Append {
        /// The log (entity store) name
        store: String,

        /// Payload to append
        payload: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,edgestore=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder().data_dir(&args.data_dir).build();
    let provider = match StoreProvider::open(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("failed to open store at {}: {}", args.data_dir, e);
            std::process::exit(1);
        }
    };

    let result = run(&provider, args.command);
    if let Err(e) = provider.dispose() {
        eprintln!("warning: failed to close engine cleanly: {}", e);
    }
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(provider: &StoreProvider, command: Commands) -> edgestore::Result<()> {
    match command {
        Commands::Stats { store } => {
            let log = provider.get_sequential_store::<String>(&store)?;
            let head = log.head_offset();
            let next = log.next_offset();
            let count = match head {
                Some(h) => next - h,
                None => 0,
            };
            println!("store:       {}", log.entity_name());
            match head {
                Some(h) => println!("head offset: {}", h),
                None => println!("head offset: <empty>"),
            }
            println!("next offset: {}", next);
            println!("entries:     {}", count);
        }

        Commands::Dump { store, start, count } => {
            let log = provider.get_sequential_store::<String>(&store)?;
            let batch = log.get_batch(start, count)?;
            if batch.is_empty() {
                println!("<no entries at or past offset {}>", start);
            }
            for (offset, item) in batch {
                println!("{:>12}  {}", offset, item);
            }
        }

        Commands::Append { store, payload } => {
            let log = provider.get_sequential_store::<String>(&store)?;
            let offset = log.append(&payload)?;
            println!("appended at offset {}", offset);
        }
    }
    Ok(())
}
