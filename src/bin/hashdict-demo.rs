//! Demo driver: fill a dictionary with random pairs, print it, tear it down.

use clap::Parser;
use hashdict::{report, DictConfig, Dictionary};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Parser, Debug)]
#[command(name = "hashdict-demo")]
#[command(about = "Insert random key/value pairs into a hashdict and print the result")]
struct Args {
    /// Number of random pairs to insert
    #[arg(short = 'n', long, default_value_t = 1000)]
    entries: usize,

    /// Seed for the random generator (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Build the dictionary without collision/byte counters
    #[arg(long, default_value_t = false)]
    no_stats: bool,
}

fn random_string(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut dict = Dictionary::with_config(DictConfig::new().instrumented(!args.no_stats));
    println!("Created new hashdict");
    println!("Inserting {} entries...", args.entries);

    let mut error_count = 0usize;
    for i in 0..args.entries {
        let key_len = rng.gen_range(4..15);
        let key = random_string(&mut rng, key_len);
        let value_len = rng.gen_range(9..80);
        let value = random_string(&mut rng, value_len);

        if let Err(e) = dict.insert(&key, &value) {
            warn!(index = i, key = %key, error = %e, "insert failed");
            error_count += 1;
        }
    }

    println!("\nInsertion complete. Errors: {error_count}\n");
    println!("\nPrinting dictionary contents...\n");
    report::print(Some(&dict));

    println!("\nFreeing dictionary...");
    dict.clear();
    info!(
        remaining = dict.len(),
        stats = ?dict.stats(),
        "dictionary freed"
    );
    println!("Dictionary freed.");
}
