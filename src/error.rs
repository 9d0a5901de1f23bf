use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cannot resolve address {address:#x}: no replacement policy configured")]
    UnresolvableAddress { address: u64 },

    #[error("Malformed trace line {line}: {reason}")]
    MalformedTrace { line: usize, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
