//! Scripts for deploying the relay contracts, Permit2 and the swap router
//! to a zkSync chain.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![cfg_attr(test, allow(clippy::missing_docs_in_private_items))]

pub mod cli;
mod commands;
pub mod config;
pub mod constants;
pub mod deployer;
pub mod errors;
pub mod plan;
pub mod scripts;
#[cfg(test)]
mod test_helpers;
pub mod types;
pub mod utils;
