//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::{Address, B256};
use clap::ValueEnum;
use itertools::Itertools;

/// The strategy with which a contract is deployed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentStrategy {
    /// A standard, nonce-based deployment
    Create,
    /// A deterministic deployment, addressed by the deployer, bytecode and salt
    Create2,
}

impl Display for DeploymentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentStrategy::Create => write!(f, "create"),
            DeploymentStrategy::Create2 => write!(f, "create2"),
        }
    }
}

/// A single constructor argument of a deployment unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorArg {
    /// A fixed address, e.g. an already-deployed external dependency
    Address(Address),
    /// The address of another unit in the same plan
    Deployed(&'static str),
}

/// A declarative description of one contract deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentUnit {
    /// The name of the contract, also the unit's key within a plan
    pub contract: &'static str,
    /// The deployment strategy
    pub strategy: DeploymentStrategy,
    /// The ordered constructor arguments
    pub args: Vec<ConstructorArg>,
    /// The create2 salt, unused for standard deployments
    pub salt: Option<B256>,
    /// Units that must be deployed first without feeding a constructor argument
    pub after: Vec<&'static str>,
}

impl DeploymentUnit {
    /// A deterministic deployment of `contract` under `salt`, without arguments
    pub fn create2(contract: &'static str, salt: B256) -> Self {
        Self {
            contract,
            strategy: DeploymentStrategy::Create2,
            args: Vec::new(),
            salt: Some(salt),
            after: Vec::new(),
        }
    }

    /// A standard deployment of `contract`, without arguments
    pub fn create(contract: &'static str) -> Self {
        Self {
            contract,
            strategy: DeploymentStrategy::Create,
            args: Vec::new(),
            salt: None,
            after: Vec::new(),
        }
    }

    /// Set the constructor arguments
    pub fn with_args(mut self, args: impl IntoIterator<Item = ConstructorArg>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// Order this unit after `contract`
    pub fn after(mut self, contract: &'static str) -> Self {
        self.after.push(contract);
        self
    }

    /// All units this one depends on, either through an argument or an explicit ordering
    pub fn dependencies(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.args
            .iter()
            .filter_map(|arg| match arg {
                ConstructorArg::Deployed(contract) => Some(*contract),
                ConstructorArg::Address(_) => None,
            })
            .chain(self.after.iter().copied())
            .unique()
    }
}

/// A deployment unit with all of its constructor arguments resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// The name of the contract
    pub contract: String,
    /// The deployment strategy
    pub strategy: DeploymentStrategy,
    /// The ordered constructor arguments
    pub constructor_args: Vec<Address>,
    /// The create2 salt
    pub salt: Option<B256>,
}

impl Display for DeploymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) [{}]",
            self.contract,
            self.strategy,
            self.constructor_args
                .iter()
                .map(|addr| format!("{addr:#x}"))
                .join(", ")
        )
    }
}

/// The addresses produced by one run of a plan, in deployment order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployedAddresses(
    /// `(contract, address)` pairs in deployment order
    Vec<(String, Address)>,
);

impl DeployedAddresses {
    /// Record the address of a deployed contract
    pub fn insert(&mut self, contract: &str, address: Address) {
        self.0.push((contract.to_string(), address));
    }

    /// The address of `contract`, if it has been deployed
    pub fn get(&self, contract: &str) -> Option<Address> {
        self.0
            .iter()
            .find(|(name, _)| name == contract)
            .map(|(_, addr)| *addr)
    }

    /// Iterate over `(contract, address)` pairs in deployment order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Address)> {
        self.0.iter().map(|(name, addr)| (name.as_str(), *addr))
    }

    /// The number of deployed contracts
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no contract has been deployed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The orchestration scripts that can be run
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeployScript {
    /// Deploy the Permit2 contract
    Permit2,
    /// Deploy the multicaller, ERC20 router, approval proxy and relay receiver
    RelayContracts,
    /// Deploy the swap router
    SwapRouter,
}

impl Display for DeployScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployScript::Permit2 => write!(f, "permit2"),
            DeployScript::RelayContracts => write!(f, "relay-contracts"),
            DeployScript::SwapRouter => write!(f, "swap-router"),
        }
    }
}
