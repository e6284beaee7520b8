//! Definitions of errors that can occur during the execution of the deployment scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deployment scripts.
///
/// None of them is recovered from: they bubble up to `main`, which ends the
/// process with a non-zero status.
#[derive(Debug)]
pub enum ScriptError {
    /// A required configuration value is missing or malformed
    Config(String),
    /// Error when creating the client
    ClientInitialization(String),
    /// Error querying chain state (gas price, block number, balance, gas estimate)
    ChainQuery(String),
    /// Error when fetching the nonce of the deployer
    NonceFetching(String),
    /// Error parsing a delimited command line argument
    ArgumentParsing(String),
    /// Error reading or decoding a contract artifact
    ArtifactParsing(String),
    /// Error building or signing a transaction
    TransactionSigning(String),
    /// Error submitting a signed transaction
    TransactionSubmission(String),
    /// Error waiting for a transaction to be mined
    TransactionConfirmation(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error when building output file
    JsonOutputError(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Config(s) => write!(f, "invalid configuration: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error during client init: {}", s),
            ScriptError::ChainQuery(s) => write!(f, "error querying chain state: {}", s),
            ScriptError::NonceFetching(s) => {
                write!(f, "error during nonce fetching for client signing: {}", s)
            }
            ScriptError::ArgumentParsing(s) => write!(f, "error parsing argument: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::TransactionSigning(s) => write!(f, "error signing transaction: {}", s),
            ScriptError::TransactionSubmission(s) => {
                write!(f, "error submitting transaction: {}", s)
            }
            ScriptError::TransactionConfirmation(s) => {
                write!(f, "error waiting for transaction: {}", s)
            }
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::JsonOutputError(s) => write!(f, "error writing json output: {}", s),
        }
    }
}

impl Error for ScriptError {}
