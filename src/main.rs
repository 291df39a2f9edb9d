mod chain;
mod config;
mod contract;
mod engine;
mod models;
mod network;
mod storage;
mod types;

use std::io::stderr;
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::chain::OperatorIdentity;
use crate::config::{Args, Settings};
use crate::contract::Arc200Contract;
use crate::engine::{Disburser, DisbursementContext};
use crate::network::{AlgodClient, IndexerClient};
use crate::storage::{load_records, AuditLog};

#[tokio::main]
async fn main() {
    //NOTE: A missing .env file is fine, the environment and flags still apply
    dotenvy::dotenv().ok();

    let args = Args::parse();
    setup_logging(parse_log_level(&args.log_level));

    if let Err(error) = run(args).await {
        error!("{error:#}");
        exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let settings = Settings::from_args(args)?;
    debug!("{settings:?}");

    let records = load_records(&settings.file)?;
    info!("Loaded {} record(s) from [{}]", records.len(), settings.file.display());

    let operator = Arc::new(OperatorIdentity::from_mnemonic(&settings.mnemonic)?);
    info!("Disbursing from [{}]", operator.address());

    let algod = Arc::new(AlgodClient::new(&settings.algod, settings.request_timeout)?);
    let indexer = Arc::new(IndexerClient::new(&settings.indexer, settings.request_timeout)?);
    let contract = Arc::new(Arc200Contract::new(algod.clone(), operator.address()));

    let disburser = Disburser::new(DisbursementContext {
        operator,
        accounts: indexer,
        contract,
        ledger: algod,
        audit: AuditLog::new(settings.log_file),
        policy: settings.policy
    });

    let timer = Instant::now();
    let summary = disburser.run(&records).await?;
    let duration = timer.elapsed();

    info!(
        "Processed {} record(s) in {duration:?}: {} completed, {} skipped",
        records.len(), summary.completed, summary.skipped
    );

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The audit log is the durable record, the console only carries progress
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
