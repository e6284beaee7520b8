use alloy::{
    consensus::TxEnvelope,
    eips::BlockId,
    network::Ethereum,
    primitives::{Address, TxHash, U256},
    providers::{Provider, RootProvider},
    rpc::{
        client::RpcClient,
        types::eth::{TransactionReceipt, TransactionRequest},
    },
};
use reqwest::Url;
use tracing::{info, warn};

use crate::errors::ScriptError;

/// The chain calls the deployment helpers rely on.
///
/// Every call is awaited to completion before the next one is issued, the
/// helpers never run two of them concurrently.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// Gas price suggested by the node, in wei
    async fn gas_price(&self) -> Result<u128, ScriptError>;

    /// Number of the latest block
    async fn block_number(&self) -> Result<u64, ScriptError>;

    /// Nonce of `address` at the given block, or the pending nonce when `block` is `None`
    async fn nonce_at(&self, address: Address, block: Option<u64>) -> Result<u64, ScriptError>;

    /// Balance of `address` at the latest block, in wei
    async fn balance(&self, address: Address) -> Result<U256, ScriptError>;

    /// Gas the node expects the transaction to use
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ScriptError>;

    /// Submit a signed transaction, returning its hash
    async fn send_transaction(&self, envelope: TxEnvelope) -> Result<TxHash, ScriptError>;

    /// Receipt of the transaction, `None` while it is not mined
    async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, ScriptError>;
}

/// A JSON-RPC backed [`ChainClient`].
///
/// Holds two connections to the same endpoint: a typed provider used for
/// everything above, and a raw RPC client for calls the provider does not cover.
#[derive(Clone)]
pub struct RpcChainClient {
    /// Typed provider
    provider: RootProvider<Ethereum>,
    /// Raw JSON-RPC handle
    raw: RpcClient,
}

impl RpcChainClient {
    /// Opens both connections to `url` and logs the node's client version
    pub async fn connect(url: &Url) -> Result<Self, ScriptError> {
        let provider = RootProvider::<Ethereum>::new_http(url.clone());
        let raw = RpcClient::new_http(url.clone());
        let client = RpcChainClient { provider, raw };

        match client.client_version().await {
            Ok(version) => info!("Connected to {} ({})", url, version),
            Err(e) => warn!("Connected to {}, client version unavailable: {}", url, e),
        }

        Ok(client)
    }

    /// The typed provider
    pub fn provider(&self) -> &RootProvider<Ethereum> {
        &self.provider
    }

    /// The raw JSON-RPC handle
    pub fn raw(&self) -> &RpcClient {
        &self.raw
    }

    /// Asks the node for its client version over the raw handle
    pub async fn client_version(&self) -> Result<String, ScriptError> {
        self.raw
            .request_noparams::<String>("web3_clientVersion")
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
    }
}

impl ChainClient for RpcChainClient {
    async fn gas_price(&self) -> Result<u128, ScriptError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| ScriptError::ChainQuery(e.to_string()))
    }

    async fn block_number(&self) -> Result<u64, ScriptError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| ScriptError::ChainQuery(e.to_string()))
    }

    async fn nonce_at(&self, address: Address, block: Option<u64>) -> Result<u64, ScriptError> {
        let request = self.provider.get_transaction_count(address);
        let nonce = match block {
            Some(number) => request.block_id(BlockId::number(number)).await,
            None => request.pending().await,
        };
        nonce.map_err(|e| ScriptError::NonceFetching(e.to_string()))
    }

    async fn balance(&self, address: Address) -> Result<U256, ScriptError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| ScriptError::ChainQuery(e.to_string()))
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ScriptError> {
        self.provider
            .estimate_gas(tx.clone())
            .await
            .map_err(|e| ScriptError::ChainQuery(e.to_string()))
    }

    async fn send_transaction(&self, envelope: TxEnvelope) -> Result<TxHash, ScriptError> {
        let pending_tx = self
            .provider
            .send_tx_envelope(envelope)
            .await
            .map_err(|e| ScriptError::TransactionSubmission(e.to_string()))?;
        Ok(*pending_tx.tx_hash())
    }

    async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, ScriptError> {
        self.provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| ScriptError::TransactionConfirmation(e.to_string()))
    }
}
