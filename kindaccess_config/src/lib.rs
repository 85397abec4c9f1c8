use std::{net::IpAddr, path::Path};

use anyhow::{ensure, Context};
use config::{Environment, File, FileFormat};
use kindaccess_models::email_address::EmailAddressWithName;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, later files override earlier ones.
pub const CONFIG_PATH_ENV: &str = "KINDACCESS_CONFIG";

/// Prefix of environment variables overriding single values, e.g.
/// `KINDACCESS__EMAIL__API_KEY`.
pub const ENV_PREFIX: &str = "KINDACCESS";

/// Load the config from the files listed in `KINDACCESS_CONFIG` (or the
/// bundled default config) and apply overrides from the environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|paths| !paths.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.into());
    let paths = paths.split(':').collect::<Vec<_>>();

    let config = load_from(&paths, Some(Environment::with_prefix(ENV_PREFIX)))?;
    ensure!(
        !config.email.api_key.is_empty(),
        "No email provider api key configured (set {ENV_PREFIX}__EMAIL__API_KEY)"
    );

    Ok(config)
}

/// Load the config from `paths` only, optionally layering `env` on top.
pub fn load_from(
    paths: &[impl AsRef<Path>],
    env: Option<Environment>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let builder = match env {
        Some(env) => builder.add_source(env.prefix_separator("__").separator("__")),
        None => builder,
    };

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct EmailConfig {
    /// Secret key of the Resend account.
    pub api_key: String,
    pub from: EmailAddressWithName,
    /// Send emails somewhere other than the Resend API, e.g. to the testing
    /// server.
    pub endpoint_override: Option<Url>,
    pub timeout: Duration,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &"[redacted]")
            .field("from", &self.from)
            .field("endpoint_override", &self.endpoint_override)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Receives a notification for every contact form submission.
    pub email: EmailAddressWithName,
}
