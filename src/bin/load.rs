//! benchkv load driver
//!
//! Inserts records through an adapter from several worker threads, then reads
//! them back and reports throughput.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use benchkv::key::{ordinal_key, ORDINAL_KEY_LIMIT};
use benchkv::{BenchKvError, DbFactory, Field, Properties, Row};
use tracing_subscriber::{fmt, EnvFilter};

/// benchkv load driver
#[derive(Parser, Debug)]
#[command(name = "benchkv-load")]
#[command(about = "Load and read back records through a benchkv adapter")]
#[command(version)]
struct Args {
    /// Engine name (pagestore, logstore)
    #[arg(short, long, default_value = "pagestore")]
    db: String,

    /// Property file
    #[arg(short = 'P', long)]
    properties: Option<PathBuf>,

    /// Property override (key=value), repeatable
    #[arg(short = 'p', long = "prop")]
    props: Vec<String>,

    /// Number of worker threads
    #[arg(short, long, default_value = "4")]
    threads: usize,

    /// Records inserted per thread
    #[arg(short, long, default_value = "10000")]
    records: usize,

    /// Bytes per field value
    #[arg(long, default_value = "100")]
    field_length: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,benchkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("benchkv-load v{}", benchkv::VERSION);

    if let Err(e) = run(&args) {
        tracing::error!("Load failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> benchkv::Result<()> {
    let mut props = match &args.properties {
        Some(path) => Properties::load(path)?,
        None => Properties::new(),
    };
    for pair in &args.props {
        props.set_pair(pair)?;
    }
    let field_count = props.field_count()?;

    let total_records = (args.threads as u64)
        .checked_mul(args.records as u64)
        .filter(|total| *total <= ORDINAL_KEY_LIMIT)
        .ok_or_else(|| {
            BenchKvError::Config(format!(
                "threads * records must not exceed {} (got {} * {})",
                ORDINAL_KEY_LIMIT, args.threads, args.records
            ))
        })?;

    tracing::info!(
        db = %args.db,
        threads = args.threads,
        records = args.records,
        total_records,
        field_count,
        "starting load"
    );

    let factory = DbFactory::new();
    // Validate the name before spawning workers
    factory.create(&args.db)?;

    let started = Instant::now();
    let results: Vec<benchkv::Result<usize>> = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = (0..args.threads)
            .map(|worker| {
                let factory = &factory;
                let props = &props;
                scope.spawn(move |_| run_worker(factory, props, args, worker, field_count))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| {
                h.join().unwrap_or_else(|_| {
                    Err(BenchKvError::Backend("worker panicked".to_string()))
                })
            })
            .collect()
    })
    .map_err(|_| BenchKvError::Backend("worker scope panicked".to_string()))?;

    let mut total = 0;
    for result in results {
        total += result?;
    }
    let elapsed = started.elapsed();

    tracing::info!(
        operations = total,
        elapsed_ms = elapsed.as_millis() as u64,
        ops_per_sec = (total as f64 / elapsed.as_secs_f64()) as u64,
        "load complete"
    );
    Ok(())
}

/// Insert then read back this worker's key range; returns operations done
fn run_worker(
    factory: &DbFactory,
    props: &Properties,
    args: &Args,
    worker: usize,
    field_count: usize,
) -> benchkv::Result<usize> {
    let mut db = factory.create(&args.db)?;
    db.init(props)?;

    let first = (worker * args.records) as u64;
    let keys = (first..first + args.records as u64)
        .map(ordinal_key)
        .collect::<benchkv::Result<Vec<String>>>()?;

    for (i, key) in keys.iter().enumerate() {
        db.insert("usertable", key.as_bytes(), &build_row(field_count, args.field_length, i))?;
    }

    let mut missing = 0;
    for key in &keys {
        if db.read("usertable", key.as_bytes(), None)?.is_none() {
            missing += 1;
        }
    }
    if missing > 0 {
        tracing::warn!(worker, missing, "records missing on read-back");
    }

    db.cleanup()?;
    Ok(keys.len() * 2)
}

fn build_row(field_count: usize, field_length: usize, seed: usize) -> Row {
    (0..field_count)
        .map(|f| {
            let fill = b'a' + ((seed + f) % 26) as u8;
            Field::new(format!("field{}", f), vec![fill; field_length])
        })
        .collect()
}
