use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    rpc::types::eth::TransactionRequest,
};
use tracing::info;

use crate::{
    constants::SIMPLE_TRANSFER_GAS,
    errors::ScriptError,
    tx::{client::ChainClient, env::Environment},
};

/// Sends `funding_amount` wei to every address, one after the other
pub async fn fund_nodes<C: ChainClient>(
    env: &Environment<C>,
    transmitters: &[Address],
    funding_amount: U256,
) -> Result<Vec<(Address, TxHash)>, ScriptError> {
    let mut funded = Vec::new();
    for &transmitter in transmitters {
        if let Some(tx_hash) = fund_node(env, transmitter, funding_amount).await? {
            funded.push((transmitter, tx_hash));
        }
    }
    Ok(funded)
}

/// Tops up `address` with `funding_amount` wei unless it already holds that much.
///
/// Returns the hash of the transfer, or `None` when nothing was sent. The
/// transfer is not waited for. Transfers always take the pending nonce, a
/// pinned nonce only applies to deployments.
pub async fn fund_node<C: ChainClient>(
    env: &Environment<C>,
    address: Address,
    funding_amount: U256,
) -> Result<Option<TxHash>, ScriptError> {
    let balance = env.client.balance(address).await?;
    if balance >= funding_amount {
        info!("Address {} already has {} wei", address, balance);
        return Ok(None);
    }

    let nonce = env.client.nonce_at(env.owner.address(), None).await?;
    // Plain transfers go out at the current suggestion, not the environment's price
    let gas_price = env.client.gas_price().await?;

    let tx_request = TransactionRequest::default()
        .with_from(env.owner.address())
        .with_to(address)
        .with_value(funding_amount)
        .with_nonce(nonce)
        .with_gas_limit(SIMPLE_TRANSFER_GAS)
        .with_gas_price(gas_price)
        .with_chain_id(env.chain_id);

    let signed_tx = env.owner.sign(tx_request).await?;
    let tx_hash = env.client.send_transaction(signed_tx).await?;

    info!("Funded {} with {} wei ({})", address, funding_amount, tx_hash);
    Ok(Some(tx_hash))
}

/// Signs and submits a contract creation transaction, returning its hash.
///
/// Uses the environment's gas price and gas limit, asking the node for an
/// estimate when no limit is configured.
pub async fn send_deployment<C: ChainClient>(
    env: &Environment<C>,
    code: Bytes,
) -> Result<TxHash, ScriptError> {
    let nonce = env.next_nonce().await?;

    let mut tx_request = TransactionRequest::default()
        .with_from(env.owner.address())
        .with_deploy_code(code)
        .with_nonce(nonce)
        .with_gas_price(env.owner.gas_price)
        .with_chain_id(env.chain_id);

    let gas_limit = match env.owner.gas_limit {
        Some(gas_limit) => gas_limit,
        None => env.client.estimate_gas(&tx_request).await?,
    };
    tx_request.set_gas_limit(gas_limit);

    let signed_tx = env.owner.sign(tx_request).await?;
    let tx_hash = env
        .client
        .send_transaction(signed_tx)
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    info!("Pending deployment transaction... {}", tx_hash);
    Ok(tx_hash)
}
