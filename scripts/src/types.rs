//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, B256},
};
use clap::ValueEnum;

use crate::{
    config::Network,
    constants::{
        COMMISSION_ADDRESS, DXP_OWNER_ADDRESS, ETHEREUM_TOKEN_CONTRACT, METIS_TOKEN_CONTRACT,
        METIS_TRUSTED_FORWARDER, TRADE_MANAGER_CONTRACT, TRANSACTION_MANAGER_CONTRACT,
        TRANSFER_OWNERSHIP_LABEL,
    },
};

/// The available deploy scripts
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeployScript {
    /// Deploy the DexPools token to Ethereum
    GeneralEthereum,
    /// Deploy the Dexpools token to Metis
    GeneralMetis,
    /// Deploy the OTC trade manager to Ethereum
    OtcEthereum,
    /// Deploy the OTC transaction manager to Metis
    OtcMetis,
}

impl DeployScript {
    /// The network the script targets when none is given
    pub fn home_network(self) -> Network {
        match self {
            DeployScript::GeneralEthereum | DeployScript::OtcEthereum => Network::Ethereum,
            DeployScript::GeneralMetis | DeployScript::OtcMetis => Network::MetisMain,
        }
    }

    /// The fixed sequence of steps the script performs
    pub fn plan(self) -> DeployPlan {
        match self {
            DeployScript::GeneralEthereum => DeployPlan {
                script: self,
                contract: ETHEREUM_TOKEN_CONTRACT,
                constructor_args: vec![],
                admin_actions: vec![],
            },
            DeployScript::GeneralMetis => DeployPlan {
                script: self,
                contract: METIS_TOKEN_CONTRACT,
                constructor_args: vec![DynSolValue::Address(METIS_TRUSTED_FORWARDER)],
                admin_actions: vec![],
            },
            DeployScript::OtcEthereum => DeployPlan {
                script: self,
                contract: TRADE_MANAGER_CONTRACT,
                constructor_args: vec![],
                admin_actions: vec![
                    AdminAction::SetCommissionAddress(COMMISSION_ADDRESS),
                    AdminAction::TransferOwnership {
                        new_owner: DXP_OWNER_ADDRESS,
                        label: None,
                    },
                ],
            },
            DeployScript::OtcMetis => DeployPlan {
                script: self,
                contract: TRANSACTION_MANAGER_CONTRACT,
                constructor_args: vec![],
                admin_actions: vec![
                    AdminAction::SetCommissionAddress(COMMISSION_ADDRESS),
                    AdminAction::TransferOwnership {
                        new_owner: DXP_OWNER_ADDRESS,
                        label: Some(TRANSFER_OWNERSHIP_LABEL),
                    },
                ],
            },
        }
    }
}

impl Display for DeployScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployScript::GeneralEthereum => write!(f, "general-ethereum"),
            DeployScript::GeneralMetis => write!(f, "general-metis"),
            DeployScript::OtcEthereum => write!(f, "otc-ethereum"),
            DeployScript::OtcMetis => write!(f, "otc-metis"),
        }
    }
}

/// An administrative transaction issued against a freshly deployed contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminAction {
    /// Set the address receiving commission payments
    SetCommissionAddress(Address),
    /// Hand the contract over to a new owner
    TransferOwnership {
        /// The new owner
        new_owner: Address,
        /// The label to log the transaction under
        label: Option<&'static str>,
    },
}

impl AdminAction {
    /// The label to log the transaction under, if any
    pub fn label(&self) -> Option<&'static str> {
        match self {
            AdminAction::SetCommissionAddress(_) => None,
            AdminAction::TransferOwnership { label, .. } => *label,
        }
    }
}

impl Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminAction::SetCommissionAddress(addr) => {
                write!(f, "setCommissionAddress({:#x})", addr)
            }
            AdminAction::TransferOwnership { new_owner, .. } => {
                write!(f, "transferOwnership({:#x})", new_owner)
            }
        }
    }
}

/// The steps of a single deploy script
#[derive(Clone, Debug)]
pub struct DeployPlan {
    /// The script the plan belongs to
    pub script: DeployScript,
    /// The name of the contract to deploy
    pub contract: &'static str,
    /// The constructor arguments, in order
    pub constructor_args: Vec<DynSolValue>,
    /// The administrative transactions to issue after deployment, in order
    pub admin_actions: Vec<AdminAction>,
}

/// A handle to a deployed contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    /// The name of the contract
    pub name: String,
    /// The address the contract was deployed at
    pub address: Address,
    /// The hash of the deployment transaction
    pub tx_hash: B256,
}
