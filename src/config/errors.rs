use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config error: an operator mnemonic is required (--mnemonic or MN)")]
    MissingMnemonic,
    #[error("Config error: [{value}] is not a valid server URL: {source}")]
    InvalidUrl {
        value: String,
        source: url::ParseError
    },
    #[error("Config error: port {port} cannot be applied to [{server}]")]
    InvalidPort {
        server: String,
        port: u16
    },
    #[error("Config error: confirmation rounds must be at least 1")]
    ZeroConfirmationRounds
}
