mod errors;

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::engine::{DisbursementPolicy, DEFAULT_CONFIRMATION_ROUNDS, DEFAULT_RETRY_PAYMENT};

pub use errors::ConfigError;

const DEFAULT_ALGOD_SERVER: &str = "https://testnet-api.voi.nodly.io";
const DEFAULT_INDEXER_SERVER: &str = "https://testnet-idx.voi.nodly.io";

/// Disburse ARC-200 tokens to every recipient listed in a CSV file.
#[derive(Debug, Parser)]
#[command(name = "arc200-disburse", version)]
pub struct Args {
    /// CSV file to process (columns: tokenId, address, amount)
    #[arg(short = 'f', long = "file", default_value = "infile.csv")]
    pub file: PathBuf,
    /// Operator mnemonic (25 words)
    #[arg(short = 'm', long, env = "MN", hide_env_values = true)]
    pub mnemonic: Option<String>,
    /// Execution node API token
    #[arg(short = 't', long, env = "ALGOD_TOKEN", default_value = "", hide_env_values = true)]
    pub algod_token: String,
    /// Execution node server
    #[arg(short = 's', long, env = "ALGOD_SERVER", default_value = DEFAULT_ALGOD_SERVER)]
    pub algod_server: String,
    /// Execution node port, when not implied by the server URL
    #[arg(long, env = "ALGOD_PORT")]
    pub algod_port: Option<u16>,
    /// Indexer API token
    #[arg(short = 'i', long, env = "INDEXER_TOKEN", default_value = "", hide_env_values = true)]
    pub indexer_token: String,
    /// Indexer server
    #[arg(short = 'r', long, env = "INDEXER_SERVER", default_value = DEFAULT_INDEXER_SERVER)]
    pub indexer_server: String,
    /// Indexer port, when not implied by the server URL
    #[arg(long, env = "INDEXER_PORT")]
    pub indexer_port: Option<u16>,
    /// File to log results to
    #[arg(short = 'l', long, default_value = "logfile.txt")]
    pub log_file: PathBuf,
    /// Console log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    pub log_level: String,
    /// Rounds to wait for each transaction to confirm
    #[arg(long, default_value_t = DEFAULT_CONFIRMATION_ROUNDS)]
    pub confirmation_rounds: u64,
    /// Payment to the token application sent with the second transfer attempt
    #[arg(long, default_value_t = DEFAULT_RETRY_PAYMENT)]
    pub retry_payment: u64,
    /// Timeout for every network request, in seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiEndpoint {
    pub url: Url,
    pub token: String
}

/// Validated run configuration.
#[derive(Clone)]
pub struct Settings {
    pub file: PathBuf,
    pub mnemonic: String,
    pub algod: ApiEndpoint,
    pub indexer: ApiEndpoint,
    pub log_file: PathBuf,
    pub policy: DisbursementPolicy,
    pub request_timeout: Duration
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let mnemonic = args.mnemonic
            .filter(|mnemonic| !mnemonic.trim().is_empty())
            .ok_or(ConfigError::MissingMnemonic)?;

        if args.confirmation_rounds == 0 {
            return Err(ConfigError::ZeroConfirmationRounds);
        }

        Ok(Self {
            file: args.file,
            mnemonic,
            algod: endpoint(&args.algod_server, args.algod_port, args.algod_token)?,
            indexer: endpoint(&args.indexer_server, args.indexer_port, args.indexer_token)?,
            log_file: args.log_file,
            policy: DisbursementPolicy {
                retry_payment: args.retry_payment,
                confirmation_rounds: args.confirmation_rounds
            },
            request_timeout: Duration::from_secs(args.request_timeout_secs)
        })
    }
}

impl Debug for Settings {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Settings")
            .field("file", &self.file)
            .field("algod", &self.algod.url.as_str())
            .field("indexer", &self.indexer.url.as_str())
            .field("log_file", &self.log_file)
            .field("policy", &self.policy)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

fn endpoint(server: &str, port: Option<u16>, token: String) -> Result<ApiEndpoint, ConfigError> {
    let mut url = Url::parse(server).map_err(|source| ConfigError::InvalidUrl {
        value: server.to_string(),
        source
    })?;

    if let Some(port) = port {
        url.set_port(Some(port)).map_err(|_| ConfigError::InvalidPort {
            server: server.to_string(),
            port
        })?;
    }

    Ok(ApiEndpoint { url, token })
}
