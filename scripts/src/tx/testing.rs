//! An in-memory chain used by the unit tests

use std::{collections::HashMap, sync::Mutex};

use alloy::{
    consensus::{Transaction, TxEnvelope},
    primitives::{address, Address, TxHash, U256},
    rpc::types::eth::{TransactionReceipt, TransactionRequest},
};
use serde_json::json;

use crate::{config::EnvConfig, errors::ScriptError, tx::client::ChainClient};

/// Anvil's first development key
pub const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address of [`TEST_KEY`]
pub const TEST_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Configuration pointing at a local node with [`TEST_KEY`]
pub fn test_config() -> EnvConfig {
    EnvConfig::from_lookup(|name| match name {
        "ETH_URL" => Some("http://localhost:8545".to_string()),
        "ETH_CHAIN_ID" => Some("1337".to_string()),
        "ACCOUNT_KEY" => Some(TEST_KEY.to_string()),
        "CONFIRMATION_POLL_INTERVAL_MS" => Some("1".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Everything the fake node knows about
#[derive(Debug, Default)]
struct ChainState {
    /// Suggested gas price, in wei
    gas_price: u128,
    /// Gas price queries fail
    fail_gas_price: bool,
    /// Balance queries fail
    fail_balance: bool,
    /// Latest block
    block_number: u64,
    /// Nonce reported for any block
    confirmed_nonce: u64,
    /// Nonce reported as pending, bumped by every submission
    pending_nonce: u64,
    /// Answer to gas estimates
    estimated_gas: u64,
    /// Balances of funded addresses
    balances: HashMap<Address, U256>,
    /// Submitted transactions, in order
    sent: Vec<TxEnvelope>,
    /// Receipts of mined transactions
    receipts: HashMap<TxHash, TransactionReceipt>,
    /// Lookups answered with `None` before a receipt shows up
    receipt_delay: usize,
    /// Receipt lookups so far
    receipt_lookups: usize,
    /// Whether submissions get mined
    mine: bool,
    /// Block argument of every nonce query
    nonce_queries: Vec<Option<u64>>,
}

/// A [`ChainClient`] that mines every submitted transaction into the next block
#[derive(Debug)]
pub struct FakeChain {
    /// Node state behind a lock so the trait can take `&self`
    state: Mutex<ChainState>,
}

impl FakeChain {
    /// A chain at block 100 suggesting `gas_price`
    pub fn new(gas_price: u128) -> Self {
        FakeChain {
            state: Mutex::new(ChainState {
                gas_price,
                block_number: 100,
                estimated_gas: 1_000_000,
                mine: true,
                ..Default::default()
            }),
        }
    }

    /// Moves the latest block
    pub fn set_block_number(&self, block_number: u64) {
        self.state.lock().unwrap().block_number = block_number;
    }

    /// Sets the confirmed and pending nonces of the deployer
    pub fn set_nonces(&self, confirmed: u64, pending: u64) {
        let mut state = self.state.lock().unwrap();
        state.confirmed_nonce = confirmed;
        state.pending_nonce = pending;
    }

    /// Sets the balance of `address`
    pub fn set_balance(&self, address: Address, balance: U256) {
        self.state.lock().unwrap().balances.insert(address, balance);
    }

    /// Sets the answer to gas estimates
    pub fn set_estimated_gas(&self, gas: u64) {
        self.state.lock().unwrap().estimated_gas = gas;
    }

    /// Gas price queries fail from now on
    pub fn fail_gas_price(&self) {
        self.state.lock().unwrap().fail_gas_price = true;
    }

    /// Balance queries fail from now on
    pub fn fail_balance(&self) {
        self.state.lock().unwrap().fail_balance = true;
    }

    /// Receipts only become visible after `lookups` unsuccessful lookups
    pub fn delay_receipts(&self, lookups: usize) {
        self.state.lock().unwrap().receipt_delay = lookups;
    }

    /// Submitted transactions are never mined
    pub fn stop_mining(&self) {
        self.state.lock().unwrap().mine = false;
    }

    /// Transactions submitted so far
    pub fn sent(&self) -> Vec<TxEnvelope> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Number of receipt lookups so far
    pub fn receipt_lookups(&self) -> usize {
        self.state.lock().unwrap().receipt_lookups
    }

    /// Block argument of every nonce query so far
    pub fn nonce_queries(&self) -> Vec<Option<u64>> {
        self.state.lock().unwrap().nonce_queries.clone()
    }
}

impl ChainClient for FakeChain {
    async fn gas_price(&self) -> Result<u128, ScriptError> {
        let state = self.state.lock().unwrap();
        if state.fail_gas_price {
            return Err(ScriptError::ChainQuery("connection refused".to_string()));
        }
        Ok(state.gas_price)
    }

    async fn block_number(&self) -> Result<u64, ScriptError> {
        Ok(self.state.lock().unwrap().block_number)
    }

    async fn nonce_at(&self, _address: Address, block: Option<u64>) -> Result<u64, ScriptError> {
        let mut state = self.state.lock().unwrap();
        state.nonce_queries.push(block);
        Ok(match block {
            Some(_) => state.confirmed_nonce,
            None => state.pending_nonce,
        })
    }

    async fn balance(&self, address: Address) -> Result<U256, ScriptError> {
        let state = self.state.lock().unwrap();
        if state.fail_balance {
            return Err(ScriptError::ChainQuery("connection refused".to_string()));
        }
        Ok(state.balances.get(&address).copied().unwrap_or_default())
    }

    async fn estimate_gas(&self, _tx: &TransactionRequest) -> Result<u64, ScriptError> {
        Ok(self.state.lock().unwrap().estimated_gas)
    }

    async fn send_transaction(&self, envelope: TxEnvelope) -> Result<TxHash, ScriptError> {
        let mut state = self.state.lock().unwrap();
        let tx_hash = *envelope.tx_hash();

        let contract_address = match envelope.to() {
            Some(to) => {
                *state.balances.entry(to).or_default() += envelope.value();
                None
            }
            None => Some(TEST_ADDRESS.create(envelope.nonce())),
        };
        state.pending_nonce += 1;

        if state.mine {
            state.block_number += 1;
            let receipt = receipt(tx_hash, state.block_number, envelope.to(), contract_address);
            state.receipts.insert(tx_hash, receipt);
        }
        state.sent.push(envelope);

        Ok(tx_hash)
    }

    async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, ScriptError> {
        let mut state = self.state.lock().unwrap();
        state.receipt_lookups += 1;
        if state.receipt_lookups <= state.receipt_delay {
            return Ok(None);
        }
        Ok(state.receipts.get(&tx_hash).cloned())
    }
}

/// A successful legacy receipt as a node would serve it
pub fn receipt(
    tx_hash: TxHash,
    block_number: u64,
    to: Option<Address>,
    contract_address: Option<Address>,
) -> TransactionReceipt {
    serde_json::from_value(json!({
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": TxHash::repeat_byte(0x11),
        "blockNumber": format!("{block_number:#x}"),
        "from": TEST_ADDRESS,
        "to": to,
        "contractAddress": contract_address,
        "gasUsed": "0x5208",
        "cumulativeGasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "status": "0x1",
        "type": "0x0",
    }))
    .unwrap()
}
