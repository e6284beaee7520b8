//! Implementations of the deploy scripts

use std::path::Path;

use tracing::{info, warn};

use crate::{
    cli::{DeployLinkEthFeedArgs, FundNodesArgs},
    constants::{
        FUNDING_KEY, LINK_ETH_FEED_KEY, LINK_TOKEN_ARTIFACT, LINK_TOKEN_KEY,
        MOCK_V3_AGGREGATOR_ARTIFACT,
    },
    deploy::{self, ContractArtifact},
    errors::ScriptError,
    output_writer::{read_output_file, write_output_file, OutputKeys},
    tx::{env::Environment, sender},
    utils::{parse_address_slice, parse_i256, parse_wei},
};

/// Deploy the LINK token and record its address
pub async fn deploy_link_token(
    env: &Environment,
    artifacts_dir: &Path,
    output: &str,
) -> Result<(), ScriptError> {
    let artifact = ContractArtifact::load(artifacts_dir, LINK_TOKEN_ARTIFACT)?;
    let address = deploy::deploy_link_token(env, &artifact).await?;

    write_output_file(output, OutputKeys::Deployment { key: LINK_TOKEN_KEY }, address)?;
    info!("LINK token address recorded in {}", output);

    Ok(())
}

/// Deploy the LINK/ETH feed and record its address
pub async fn deploy_link_eth_feed(
    args: DeployLinkEthFeedArgs,
    env: &Environment,
    artifacts_dir: &Path,
    output: &str,
) -> Result<(), ScriptError> {
    let wei_per_unit_link = parse_i256(&args.wei_per_unit_link)?;
    match read_output_file(output, OutputKeys::Deployment { key: LINK_TOKEN_KEY }) {
        Ok(link_token) => info!("Feed prices the LINK token at {}", link_token),
        Err(e) => warn!("No LINK token recorded in {}: {}", output, e),
    }

    let artifact = ContractArtifact::load(artifacts_dir, MOCK_V3_AGGREGATOR_ARTIFACT)?;
    let address = deploy::deploy_link_eth_feed(env, &artifact, wei_per_unit_link).await?;

    write_output_file(
        output,
        OutputKeys::Deployment {
            key: LINK_ETH_FEED_KEY,
        },
        address,
    )?;
    info!("LINK/ETH feed address recorded in {}", output);

    Ok(())
}

/// Fund the given nodes and record the transfers
pub async fn fund_nodes(
    args: FundNodesArgs,
    env: &Environment,
    output: &str,
) -> Result<(), ScriptError> {
    let addresses = parse_address_slice(&args.addresses)?;
    let funding_amount = parse_wei(&args.funding_amount)?;

    let funded = sender::fund_nodes(env, &addresses, funding_amount).await?;
    for (address, tx_hash) in &funded {
        write_output_file(
            output,
            OutputKeys::Tx {
                key: FUNDING_KEY,
                tx_key: format!("{address:#x}"),
            },
            tx_hash,
        )?;
    }
    info!(
        "Funded {} of {} nodes, transfers recorded in {}",
        funded.len(),
        addresses.len(),
        output
    );

    Ok(())
}
