//! The signing environment shared by every deployment script

use alloy::{
    consensus::TxEnvelope,
    network::{EthereumWallet, TransactionBuilder},
    primitives::Address,
    rpc::types::eth::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use tracing::info;

use crate::{
    config::{ConfirmationConfig, EnvConfig},
    errors::ScriptError,
    tx::client::{ChainClient, RpcChainClient},
};

/// Where the nonce of deployment transactions comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NonceSource {
    /// Ask the node for the pending nonce before each transaction
    Pending,
    /// Fixed to the nonce confirmed at the latest block when the environment was built
    Pinned(u64),
}

/// The deployer: signing key plus the gas parameters applied to its transactions
#[derive(Clone, Debug)]
pub struct Owner {
    /// Signer derived from the private key
    signer: PrivateKeySigner,
    /// Gas price of deployment transactions, in wei
    pub gas_price: u128,
    /// Gas limit of deployment transactions, estimated when unset
    pub gas_limit: Option<u64>,
    /// Nonce source of deployment transactions
    pub nonce: NonceSource,
}

impl Owner {
    /// Address of the deployer
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signs a fully populated transaction request
    pub async fn sign(&self, tx: TransactionRequest) -> Result<TxEnvelope, ScriptError> {
        let wallet = EthereumWallet::from(self.signer.clone());
        tx.build(&wallet)
            .await
            .map_err(|e| ScriptError::TransactionSigning(e.to_string()))
    }
}

/// The execution environment of the scripts
#[derive(Clone, Debug)]
pub struct Environment<C = RpcChainClient> {
    /// Deployer account and gas parameters
    pub owner: Owner,
    /// Connection to the node
    pub client: C,
    /// Chain the transactions are signed for
    pub chain_id: u64,
    /// Receipt polling behaviour
    pub confirmation: ConfirmationConfig,
}

/// Connects to the configured node and builds the environment.
///
/// When `override_nonce` is set the nonce is pinned to the one confirmed at
/// the latest block instead of being looked up as pending for each transaction.
pub async fn setup_env(
    config: EnvConfig,
    override_nonce: bool,
) -> Result<Environment<RpcChainClient>, ScriptError> {
    let client = RpcChainClient::connect(&config.eth_url).await?;
    Environment::new(config, client, override_nonce).await
}

impl<C: ChainClient> Environment<C> {
    /// Builds the environment on top of an already connected client
    pub async fn new(
        config: EnvConfig,
        client: C,
        override_nonce: bool,
    ) -> Result<Self, ScriptError> {
        let signer = PrivateKeySigner::from_bytes(&config.account_key)
            .map_err(|e| ScriptError::Config(format!("invalid account key: {e}")))?;
        info!(
            address = %signer.address(),
            chain_id = config.chain_id,
            "Loaded deployer account"
        );

        // Legacy pricing is set explicitly so transactions are never EIP-1559
        let suggested = client.gas_price().await?;
        info!("Suggested gas price: {} wei", suggested);
        let gas_price = suggested
            .checked_mul(config.gas_price_multiplier)
            .ok_or_else(|| ScriptError::Config("gas price multiplier overflows".to_string()))?;

        let nonce = if override_nonce {
            let block = client.block_number().await?;
            let nonce = client.nonce_at(signer.address(), Some(block)).await?;
            info!("Nonce pinned to {} (block {})", nonce, block);
            NonceSource::Pinned(nonce)
        } else {
            NonceSource::Pending
        };

        info!("Modified gas price that will be set: {} wei", gas_price);

        Ok(Environment {
            owner: Owner {
                signer,
                gas_price,
                gas_limit: config.gas_limit,
                nonce,
            },
            client,
            chain_id: config.chain_id,
            confirmation: config.confirmation,
        })
    }

    /// Nonce of the next deployment sent by the owner
    pub async fn next_nonce(&self) -> Result<u64, ScriptError> {
        match self.owner.nonce {
            NonceSource::Pending => self.client.nonce_at(self.owner.address(), None).await,
            NonceSource::Pinned(nonce) => Ok(nonce),
        }
    }
}
