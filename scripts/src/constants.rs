//! Constants used in the deploy scripts

/// Environment variable holding the RPC endpoint of the node
pub const ETH_URL_ENV_VAR: &str = "ETH_URL";

/// Environment variable holding the numeric chain id
pub const ETH_CHAIN_ID_ENV_VAR: &str = "ETH_CHAIN_ID";

/// Environment variable holding the hex encoded private key of the deployer
pub const ACCOUNT_KEY_ENV_VAR: &str = "ACCOUNT_KEY";

/// Environment variable overriding the gas limit of deployment transactions
pub const GAS_LIMIT_ENV_VAR: &str = "GAS_LIMIT";

/// Environment variable overriding the gas price multiplier
pub const GAS_PRICE_MULTIPLIER_ENV_VAR: &str = "GAS_PRICE_MULTIPLIER";

/// Environment variable bounding the time spent waiting for a receipt, in seconds
pub const CONFIRMATION_TIMEOUT_ENV_VAR: &str = "CONFIRMATION_TIMEOUT_SECS";

/// Environment variable setting the receipt polling interval, in milliseconds
pub const CONFIRMATION_POLL_INTERVAL_ENV_VAR: &str = "CONFIRMATION_POLL_INTERVAL_MS";

/// Factor applied to the node's suggested gas price when building the environment.
///
/// Overpaying keeps deployments from stalling when the fee market moves.
pub const DEFAULT_GAS_PRICE_MULTIPLIER: u128 = 2;

/// Default interval between two receipt lookups, in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Gas used by a plain value transfer
pub const SIMPLE_TRANSFER_GAS: u64 = 21_000;

/// Decimals of the LINK/ETH price feed
pub const LINK_ETH_FEED_DECIMALS: u8 = 18;

/// Label attached to deployment transactions while waiting for them
pub const CONTRACT_DEPLOYMENT_LABEL: &str = "Contract deployment";

/// Default directory holding the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Default file in which deployed addresses are recorded
pub const DEFAULT_OUTPUT_FILE: &str = "deployed.json";

/// File name of the LINK token creation bytecode
pub const LINK_TOKEN_ARTIFACT: &str = "LinkToken.bin";

/// File name of the mock aggregator creation bytecode
pub const MOCK_V3_AGGREGATOR_ARTIFACT: &str = "MockV3Aggregator.bin";

/// LINK token key in the output file
pub const LINK_TOKEN_KEY: &str = "link_token";

/// LINK/ETH feed key in the output file
pub const LINK_ETH_FEED_KEY: &str = "link_eth_feed";

/// Node funding key in the output file
pub const FUNDING_KEY: &str = "funding";
