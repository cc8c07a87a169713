//! Command-line and environment configuration.

use clap::Parser;
use snafu::prelude::*;
use std::path::PathBuf;
use url::Url;

/// Backend URL baked in at build time through `RAT_SPA_API_URL`, if set.
pub const DEFAULT_API_URL: &str = match option_env!("RAT_SPA_API_URL") {
    Some(url) => url,
    None => "http://localhost:8085",
};

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Invalid API URL '{url}': {source}"))]
    InvalidApiUrl { url: String, source: url::ParseError },

    #[snafu(display("Invalid API URL '{url}': unsupported scheme '{scheme}'"))]
    UnsupportedScheme { url: String, scheme: String },
}

#[derive(Debug, Clone, Parser)]
#[command(name = "rat-spa", version, about = "Terminal single-page app with a navbar, two views and one backend call")]
pub struct Config {
    /// Backend endpoint queried by the Home view.
    #[arg(long, env = "RAT_SPA_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Path to open on start. Unknown paths fall back to `/`.
    #[arg(long, default_value = "/")]
    pub path: String,

    #[arg(long, env = "RAT_SPA_LOG_FILE", default_value = "rat-spa.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_url).context(InvalidApiUrlSnafu { url: &self.api_url })?;
        ensure!(
            matches!(url.scheme(), "http" | "https"),
            UnsupportedSchemeSnafu {
                url: &self.api_url,
                scheme: url.scheme(),
            }
        );
        Ok(())
    }
}
