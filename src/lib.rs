pub mod client;
pub mod commands;
pub mod config;
pub mod etch;
pub mod graphql;
pub mod output;
pub mod payload;
pub use client::AnvilClient;
pub use config::ClientConfig;
pub use graphql::GraphqlResponse;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnvilError {
    #[error("API key cannot be blank; set ANVIL_API_KEY")]
    MissingApiKey,
    #[error("Transport failure: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API responded with status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("JSON failure: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("Response is missing `{0}`")]
    MissingField(String),
    #[error("File is empty: {0}")]
    EmptyFile(String),
}
