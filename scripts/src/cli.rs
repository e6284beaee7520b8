//! Definitions of CLI arguments and commands for deploy scripts

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    commands::{deploy_link_eth_feed, deploy_link_token, fund_nodes},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_OUTPUT_FILE},
    errors::ScriptError,
    tx::env::Environment,
};

/// Scripts for deploying the contracts and funding the nodes of a VRF setup.
///
/// The node URL, chain id and deployer key are read from `ETH_URL`,
/// `ETH_CHAIN_ID` and `ACCOUNT_KEY` (a `.env` file is honoured).
#[derive(Parser)]
pub struct Cli {
    /// Pin the deployer nonce to the latest confirmed block
    /// instead of the pending nonce
    #[arg(long)]
    pub override_nonce: bool,

    /// Directory holding the contract creation bytecode
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// JSON file in which deployed addresses are recorded
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the LINK token
    DeployLinkToken,
    /// Deploy a mock LINK/ETH price feed
    DeployLinkEthFeed(DeployLinkEthFeedArgs),
    /// Send native currency to node addresses
    FundNodes(FundNodesArgs),
}

impl Command {
    /// Run the command
    pub async fn run(
        self,
        env: &Environment,
        artifacts_dir: &Path,
        output: &str,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeployLinkToken => {
                info!("Deploying LINK token...");
                deploy_link_token(env, artifacts_dir, output).await
            }
            Command::DeployLinkEthFeed(args) => {
                info!("Deploying LINK/ETH feed...");
                deploy_link_eth_feed(args, env, artifacts_dir, output).await
            }
            Command::FundNodes(args) => {
                info!("Funding nodes...");
                fund_nodes(args, env, output).await
            }
        }
    }
}

/// Deploy the LINK/ETH feed
#[derive(Args)]
pub struct DeployLinkEthFeedArgs {
    /// Initial answer of the feed: wei per unit of LINK
    #[arg(long)]
    pub wei_per_unit_link: String,
}

/// Fund node addresses
#[derive(Args)]
pub struct FundNodesArgs {
    /// Comma-separated node addresses
    #[arg(short, long)]
    pub addresses: String,
    /// Minimum balance each node should hold, in wei
    #[arg(short, long)]
    pub funding_amount: String,
}
