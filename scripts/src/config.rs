//! Configuration of the signing environment

use std::{env, fmt, str::FromStr, time::Duration};

use alloy::primitives::B256;
use reqwest::Url;

use crate::{
    constants::{
        ACCOUNT_KEY_ENV_VAR, CONFIRMATION_POLL_INTERVAL_ENV_VAR, CONFIRMATION_TIMEOUT_ENV_VAR,
        DEFAULT_GAS_PRICE_MULTIPLIER, DEFAULT_POLL_INTERVAL_MS, ETH_CHAIN_ID_ENV_VAR,
        ETH_URL_ENV_VAR, GAS_LIMIT_ENV_VAR, GAS_PRICE_MULTIPLIER_ENV_VAR,
    },
    errors::ScriptError,
};

/// How long, and how often, to wait for a transaction receipt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmationConfig {
    /// Delay between two receipt lookups
    pub poll_interval: Duration,
    /// Upper bound on the wait, `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            timeout: None,
        }
    }
}

/// Everything needed to build a signing environment
#[derive(Clone)]
pub struct EnvConfig {
    /// RPC endpoint of the node
    pub eth_url: Url,
    /// Chain the transactions are signed for
    pub chain_id: u64,
    /// Private key of the deployer
    pub account_key: B256,
    /// Gas limit of deployment transactions, estimated per transaction when unset
    pub gas_limit: Option<u64>,
    /// Factor applied to the suggested gas price
    pub gas_price_multiplier: u128,
    /// Receipt polling behaviour
    pub confirmation: ConfirmationConfig,
}

impl EnvConfig {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, ScriptError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through the given variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScriptError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| ScriptError::Config(format!("{name} is not set")))
        };

        let eth_url = required(ETH_URL_ENV_VAR)?
            .parse::<Url>()
            .map_err(|e| ScriptError::Config(format!("{ETH_URL_ENV_VAR}: {e}")))?;
        let chain_id = parse_var(ETH_CHAIN_ID_ENV_VAR, &required(ETH_CHAIN_ID_ENV_VAR)?)?;
        let account_key = required(ACCOUNT_KEY_ENV_VAR)?
            .trim()
            .parse::<B256>()
            .map_err(|e| ScriptError::Config(format!("{ACCOUNT_KEY_ENV_VAR}: {e}")))?;

        let gas_limit = lookup(GAS_LIMIT_ENV_VAR)
            .map(|v| parse_var(GAS_LIMIT_ENV_VAR, &v))
            .transpose()?;
        let gas_price_multiplier = lookup(GAS_PRICE_MULTIPLIER_ENV_VAR)
            .map(|v| parse_var(GAS_PRICE_MULTIPLIER_ENV_VAR, &v))
            .transpose()?
            .unwrap_or(DEFAULT_GAS_PRICE_MULTIPLIER);

        let mut confirmation = ConfirmationConfig::default();
        if let Some(secs) = lookup(CONFIRMATION_TIMEOUT_ENV_VAR) {
            confirmation.timeout = Some(Duration::from_secs(parse_var(
                CONFIRMATION_TIMEOUT_ENV_VAR,
                &secs,
            )?));
        }
        if let Some(millis) = lookup(CONFIRMATION_POLL_INTERVAL_ENV_VAR) {
            confirmation.poll_interval =
                Duration::from_millis(parse_var(CONFIRMATION_POLL_INTERVAL_ENV_VAR, &millis)?);
        }

        Ok(EnvConfig {
            eth_url,
            chain_id,
            account_key,
            gas_limit,
            gas_price_multiplier,
            confirmation,
        })
    }
}

// Keeps the private key out of logs
impl fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfig")
            .field("eth_url", &self.eth_url.as_str())
            .field("chain_id", &self.chain_id)
            .field("account_key", &"<redacted>")
            .field("gas_limit", &self.gas_limit)
            .field("gas_price_multiplier", &self.gas_price_multiplier)
            .field("confirmation", &self.confirmation)
            .finish()
    }
}

/// Parses a numeric variable, naming it in the error
fn parse_var<T>(name: &str, value: &str) -> Result<T, ScriptError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ScriptError::Config(format!("failure while parsing {name} ({value}): {e}")))
}
