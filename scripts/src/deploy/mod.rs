//! Deployment of the auxiliary contracts the VRF setup depends on

use std::{fs, path::Path, str::FromStr};

use alloy::{
    primitives::{Address, Bytes, I256},
    sol_types::SolConstructor,
};
use tracing::info;

use crate::{
    constants::LINK_ETH_FEED_DECIMALS,
    errors::ScriptError,
    tx::{
        abi::MockV3Aggregator, client::ChainClient, confirm::confirm_contract_deployed,
        env::Environment, sender::send_deployment,
    },
};

/// Creation bytecode of a precompiled contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractArtifact {
    /// Name used in logs
    pub name: String,
    /// Creation bytecode, constructor arguments excluded
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Decodes hex encoded bytecode, with or without `0x` prefix
    pub fn from_hex(name: &str, hex: &str) -> Result<Self, ScriptError> {
        let bytecode = Bytes::from_str(hex.trim())
            .map_err(|e| ScriptError::ArtifactParsing(format!("{name}: {e}")))?;
        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!("{name}: empty bytecode")));
        }

        Ok(ContractArtifact {
            name: name.to_string(),
            bytecode,
        })
    }

    /// Reads `file_name` from the artifacts directory
    pub fn load(artifacts_dir: &Path, file_name: &str) -> Result<Self, ScriptError> {
        let path = artifacts_dir.join(file_name);
        let contents = fs::read_to_string(&path)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
        let name = file_name.split('.').next().unwrap_or(file_name);

        Self::from_hex(name, &contents)
    }
}

/// Deploys the LINK token and returns its address
pub async fn deploy_link_token<C: ChainClient>(
    env: &Environment<C>,
    artifact: &ContractArtifact,
) -> Result<Address, ScriptError> {
    info!("Deploying {}...", artifact.name);
    let tx_hash = send_deployment(env, artifact.bytecode.clone()).await?;
    let address = confirm_contract_deployed(env, tx_hash).await?;

    info!("{} deployed at {:#x}", artifact.name, address);
    Ok(address)
}

/// Deploys a mock LINK/ETH price feed answering `wei_per_unit_link` and returns its address
pub async fn deploy_link_eth_feed<C: ChainClient>(
    env: &Environment<C>,
    artifact: &ContractArtifact,
    wei_per_unit_link: I256,
) -> Result<Address, ScriptError> {
    info!(
        "Deploying {} with {} wei per unit LINK...",
        artifact.name, wei_per_unit_link
    );
    let code = feed_creation_code(artifact, wei_per_unit_link);
    let tx_hash = send_deployment(env, code).await?;
    let address = confirm_contract_deployed(env, tx_hash).await?;

    info!("{} deployed at {:#x}", artifact.name, address);
    Ok(address)
}

/// Appends the ABI encoded constructor arguments to the feed bytecode
fn feed_creation_code(artifact: &ContractArtifact, wei_per_unit_link: I256) -> Bytes {
    let constructor = MockV3Aggregator::constructorCall {
        _decimals: LINK_ETH_FEED_DECIMALS,
        _initialAnswer: wei_per_unit_link,
    };

    let mut code = artifact.bytecode.to_vec();
    code.extend(constructor.abi_encode());
    code.into()
}

#[cfg(test)]
mod tests {
    use std::env;

    use alloy::{consensus::Transaction, primitives::U256};

    use super::*;
    use crate::tx::testing::{test_config, FakeChain, TEST_ADDRESS};

    /// An environment whose next deployment uses `pending_nonce`
    async fn fake_env(pending_nonce: u64) -> Environment<FakeChain> {
        let chain = FakeChain::new(1_000_000_000);
        chain.set_nonces(0, pending_nonce);
        Environment::new(test_config(), chain, false).await.unwrap()
    }

    #[test]
    fn test_artifact_from_hex() {
        let artifact = ContractArtifact::from_hex("LinkToken", "0x6080604052\n").unwrap();
        assert_eq!(artifact.bytecode, Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52]));

        let unprefixed = ContractArtifact::from_hex("LinkToken", "6080604052").unwrap();
        assert_eq!(unprefixed, artifact);

        assert!(ContractArtifact::from_hex("LinkToken", "0xzz").is_err());
        assert!(ContractArtifact::from_hex("LinkToken", "  ").is_err());
    }

    #[test]
    fn test_artifact_load() {
        let dir = env::temp_dir().join(format!("ocr2vrf-artifacts-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("MockV3Aggregator.bin"), "0x60806040").unwrap();

        let artifact = ContractArtifact::load(&dir, "MockV3Aggregator.bin").unwrap();
        assert_eq!(artifact.name, "MockV3Aggregator");
        assert_eq!(artifact.bytecode.len(), 4);

        let missing = ContractArtifact::load(&dir, "LinkToken.bin").unwrap_err();
        assert!(matches!(missing, ScriptError::ArtifactParsing(_)));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_deploy_link_token() {
        let env = fake_env(4).await;
        let artifact = ContractArtifact::from_hex("LinkToken", "0x6080").unwrap();

        let address = deploy_link_token(&env, &artifact).await.unwrap();

        assert_eq!(address, TEST_ADDRESS.create(4));
        assert_eq!(env.client.sent()[0].input(), &artifact.bytecode);
    }

    #[tokio::test]
    async fn test_deploy_link_eth_feed_encodes_constructor() {
        let env = fake_env(0).await;
        let artifact = ContractArtifact::from_hex("MockV3Aggregator", "0x6080").unwrap();
        let answer = I256::from_dec_str("10000000000000000").unwrap();

        let address = deploy_link_eth_feed(&env, &artifact, answer).await.unwrap();
        assert_eq!(address, TEST_ADDRESS.create(0));

        let sent = env.client.sent();
        let input = sent[0].input();
        assert_eq!(input.len(), 2 + 64);
        assert_eq!(&input[..2], &[0x60, 0x80]);
        // uint8 decimals, then int256 answer, each in a 32 byte word
        assert_eq!(U256::from_be_slice(&input[2..34]), U256::from(18u8));
        assert_eq!(
            U256::from_be_slice(&input[34..66]),
            U256::from(10_000_000_000_000_000u64)
        );
    }
}
