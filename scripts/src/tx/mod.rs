//! Talking to the chain: signing environment, submission and confirmation

pub mod abi;
pub mod client;
pub mod confirm;
pub mod env;
pub mod sender;

#[cfg(test)]
pub(crate) mod testing;
