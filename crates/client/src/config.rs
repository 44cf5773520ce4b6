//! Environment-backed configuration loading
//!
//! Two variables are required; everything else has hosted-service
//! defaults.
//!
//! ## Environment Variables
//! - `HYPERPROOF_CLIENT_ID`: OAuth client ID (required)
//! - `HYPERPROOF_CLIENT_SECRET`: OAuth client secret (required)
//! - `HYPERPROOF_API_BASE_URL`: resource base URL override
//! - `HYPERPROOF_TOKEN_URL`: token endpoint override
//! - `HYPERPROOF_TIMEOUT_SECS`: HTTP timeout in seconds
//! - `HYPERPROOF_FAIL_FAST`: abort correlated queries on the first fan-out
//!   failure (`true`/`1`)
//!
//! A `.env` file in the working directory is honoured when present; real
//! environment variables win.

use std::time::Duration;

use hyperproof_domain::{ClientConfig, Credentials, HyperproofError, Result};

/// Required: OAuth client ID.
pub const ENV_CLIENT_ID: &str = "HYPERPROOF_CLIENT_ID";
/// Required: OAuth client secret.
pub const ENV_CLIENT_SECRET: &str = "HYPERPROOF_CLIENT_SECRET";
/// Optional: resource base URL override.
pub const ENV_API_BASE_URL: &str = "HYPERPROOF_API_BASE_URL";
/// Optional: token endpoint override.
pub const ENV_TOKEN_URL: &str = "HYPERPROOF_TOKEN_URL";
/// Optional: HTTP timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "HYPERPROOF_TIMEOUT_SECS";
/// Optional: fail-fast toggle for correlated queries.
pub const ENV_FAIL_FAST: &str = "HYPERPROOF_FAIL_FAST";

/// Load client configuration from the process environment.
///
/// # Errors
///
/// Returns `HyperproofError::Config` when a required variable is missing
/// or an optional one fails to parse.
pub fn load_from_env() -> Result<ClientConfig> {
    // Ignore a missing .env file; it is optional.
    dotenvy::dotenv().ok();
    from_vars(|name| std::env::var(name).ok())
}

/// Build a configuration from a variable lookup. Split out from
/// [`load_from_env`] so it can be tested without mutating the process
/// environment.
fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
    let client_id = require(&get, ENV_CLIENT_ID)?;
    let client_secret = require(&get, ENV_CLIENT_SECRET)?;

    let mut config = ClientConfig::new(Credentials::new(client_id, client_secret));

    if let Some(url) = get(ENV_API_BASE_URL) {
        config = config.with_api_base_url(url);
    }
    if let Some(url) = get(ENV_TOKEN_URL) {
        config = config.with_token_url(url);
    }
    if let Some(timeout) = get(ENV_TIMEOUT_SECS) {
        let seconds: u64 = timeout.parse().map_err(|err| {
            HyperproofError::Config(format!("invalid {ENV_TIMEOUT_SECS}: {err}"))
        })?;
        config = config.with_timeout(Duration::from_secs(seconds));
    }
    if let Some(fail_fast) = get(ENV_FAIL_FAST) {
        config = config.with_fail_fast(parse_bool(&fail_fast));
    }

    Ok(config)
}

fn require(get: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    get(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| HyperproofError::Config(format!("missing required variable: {name}")))
}

fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
