//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error compiling a contract or resolving its artifact
    Compilation(String),
    /// Error submitting a deployment transaction (network, signing, funds)
    TransactionSubmission(String),
    /// The deployment transaction reverted on-chain
    DeploymentReverted(String),
    /// The constructor arguments did not match the contract's constructor
    ArgumentMismatch(String),
    /// Error initializing the deployer client
    ClientInitialization(String),
    /// Error in the network or compiler configuration
    Config(String),
    /// Error reading a file
    ReadFile(String),
    /// Error writing a file
    WriteFile(String),
    /// Error de/serializing JSON
    Serde(String),
    /// The deployment plan is malformed (duplicate unit, unknown reference, cycle)
    InvalidPlan(String),
    /// A unit referenced an address that has not been deployed yet
    UnresolvedDependency(String),
    /// The address of a unit cannot be derived ahead of deployment
    UnpredictableAddress(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Compilation(s) => write!(f, "error compiling contract: {}", s),
            ScriptError::TransactionSubmission(s) => {
                write!(f, "error submitting deployment transaction: {}", s)
            }
            ScriptError::DeploymentReverted(s) => write!(f, "deployment reverted: {}", s),
            ScriptError::ArgumentMismatch(s) => {
                write!(f, "constructor argument mismatch: {}", s)
            }
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::Config(s) => write!(f, "configuration error: {}", s),
            ScriptError::ReadFile(s) => write!(f, "error reading file: {}", s),
            ScriptError::WriteFile(s) => write!(f, "error writing file: {}", s),
            ScriptError::Serde(s) => write!(f, "error de/serializing JSON: {}", s),
            ScriptError::InvalidPlan(s) => write!(f, "invalid deployment plan: {}", s),
            ScriptError::UnresolvedDependency(s) => write!(f, "unresolved dependency: {}", s),
            ScriptError::UnpredictableAddress(s) => {
                write!(f, "cannot predict deployment address: {}", s)
            }
        }
    }
}

impl Error for ScriptError {}
