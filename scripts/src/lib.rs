//! Scripts for deploying and administering the DexPools smart contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

mod abi_export;
pub mod artifacts;
pub mod cli;
mod commands;
pub mod config;
pub mod constants;
pub mod deployer;
pub mod errors;
mod sizer;
mod solidity;
pub mod types;
pub mod utils;

pub use commands::run_plan;
