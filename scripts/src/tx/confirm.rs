use std::time::Duration;

use alloy::{
    primitives::{Address, TxHash},
    rpc::types::eth::TransactionReceipt,
};
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::{
    constants::CONTRACT_DEPLOYMENT_LABEL,
    errors::ScriptError,
    tx::{client::ChainClient, env::Environment},
};

/// Waits for the transaction to be mined and returns its receipt.
///
/// Waits forever unless the environment carries a confirmation timeout.
pub async fn confirm_tx_mined<C: ChainClient>(
    env: &Environment<C>,
    tx_hash: TxHash,
    tx_info: &[&str],
) -> Result<TransactionReceipt, ScriptError> {
    if tx_info.is_empty() {
        info!("Waiting for transaction {} to be mined", tx_hash);
    } else {
        info!(
            "Waiting for transaction {} to be mined for {}",
            tx_hash,
            tx_info.join(",")
        );
    }

    let poll = poll_receipt(&env.client, tx_hash, env.confirmation.poll_interval);
    let receipt = match env.confirmation.timeout {
        Some(limit) => timeout(limit, poll).await.map_err(|_| {
            ScriptError::TransactionConfirmation(format!(
                "transaction {tx_hash} not mined after {limit:?}"
            ))
        })??,
        None => poll.await?,
    };

    let block = receipt.block_number.unwrap_or_default();
    if receipt.status() {
        info!("Transaction mined in block {}", block);
    } else {
        warn!("Transaction {} reverted in block {}", tx_hash, block);
    }

    Ok(receipt)
}

/// Waits for a deployment transaction and returns the address of the created contract
pub async fn confirm_contract_deployed<C: ChainClient>(
    env: &Environment<C>,
    tx_hash: TxHash,
) -> Result<Address, ScriptError> {
    let receipt = confirm_tx_mined(env, tx_hash, &[CONTRACT_DEPLOYMENT_LABEL]).await?;
    receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!("receipt of {tx_hash} has no contract address"))
    })
}

/// Looks the receipt up until the node returns one
async fn poll_receipt<C: ChainClient>(
    client: &C,
    tx_hash: TxHash,
    interval: Duration,
) -> Result<TransactionReceipt, ScriptError> {
    loop {
        if let Some(receipt) = client.transaction_receipt(tx_hash).await? {
            return Ok(receipt);
        }
        sleep(interval).await;
    }
}
