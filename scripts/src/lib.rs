//! Helpers for the VRF deployment scripts: signing environment, contract
//! deployment, node funding and argument parsing.

#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod utils;

/// Our deploy utils
pub mod deploy;

// Our output utils
pub mod output_writer;

pub mod tx;
