//! A deployer that submits deployments through `forge create --zksync`

use std::process::Stdio;

use alloy_primitives::{Address, B256};
use itertools::Itertools;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::{
    constants::{FORGE_CREATE_COMMAND, PRIVATE_KEY_ENV_VAR, ZKSYNC_VERIFIER},
    errors::ScriptError,
    types::{DeploymentRequest, DeploymentStrategy},
};

use super::Deployer;

/// The JSON document printed by `forge create --json`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForgeOutput {
    /// The account that sent the deployment
    pub deployer: Option<Address>,
    /// The address of the deployed contract
    pub deployed_to: Address,
    /// The hash of the deployment transaction
    pub transaction_hash: Option<B256>,
}

impl ForgeOutput {
    /// Find the output document in the stdout of a `forge create --json` run.
    ///
    /// Forge may print compilation progress before the document, so the last
    /// line that parses is taken.
    pub fn from_stdout(stdout: &str) -> Result<Self, ScriptError> {
        stdout
            .lines()
            .rev()
            .find_map(|line| serde_json::from_str(line.trim()).ok())
            .ok_or_else(|| {
                ScriptError::Serde(format!(
                    "no deployment output found in forge stdout: {}",
                    stdout.trim()
                ))
            })
    }
}

/// Submits deployments by running `forge create`
#[derive(Debug, Clone)]
pub struct ForgeDeployer {
    /// The `forge` binary to invoke
    forge_bin: String,
    /// The RPC URL of the target network
    rpc_url: String,
    /// The private key of the deployer, handed to `forge` through its environment
    priv_key: String,
    /// The contract verification endpoint, if contracts should be verified
    verifier_url: Option<String>,
}

impl ForgeDeployer {
    /// Construct a deployer sending transactions to `rpc_url`, signed by `priv_key`
    pub fn new(forge_bin: &str, rpc_url: &str, priv_key: &str) -> Self {
        Self {
            forge_bin: forge_bin.to_string(),
            rpc_url: rpc_url.to_string(),
            priv_key: priv_key.to_string(),
            verifier_url: None,
        }
    }

    /// Verify every deployed contract against the given endpoint
    pub fn with_verifier_url(mut self, verifier_url: Option<String>) -> Self {
        self.verifier_url = verifier_url;
        self
    }

    /// The arguments passed to `forge` for the given request.
    ///
    /// The private key is not among them, see [`PRIVATE_KEY_ENV_VAR`]
    pub fn command_args(&self, request: &DeploymentRequest) -> Vec<String> {
        let mut args = vec![
            FORGE_CREATE_COMMAND.to_string(),
            request.contract.clone(),
            "--zksync".to_string(),
            "--rpc-url".to_string(),
            self.rpc_url.clone(),
            "--broadcast".to_string(),
            "--json".to_string(),
        ];

        if let (DeploymentStrategy::Create2, Some(salt)) = (request.strategy, request.salt) {
            args.push("--salt".to_string());
            args.push(format!("{salt:#x}"));
        }

        if let Some(verifier_url) = &self.verifier_url {
            args.push("--verify".to_string());
            args.push("--verifier".to_string());
            args.push(ZKSYNC_VERIFIER.to_string());
            args.push("--verifier-url".to_string());
            args.push(verifier_url.clone());
        }

        // Variadic, must come last
        if !request.constructor_args.is_empty() {
            args.push("--constructor-args".to_string());
            args.extend(
                request
                    .constructor_args
                    .iter()
                    .map(|addr| format!("{addr:#x}")),
            );
        }

        args
    }
}

impl Deployer for ForgeDeployer {
    async fn deploy(&self, request: &DeploymentRequest) -> Result<Address, ScriptError> {
        let args = self.command_args(request);
        debug!("{} {}", self.forge_bin, args.iter().join(" "));

        let output = Command::new(&self.forge_bin)
            .args(&args)
            .env(PRIVATE_KEY_ENV_VAR, &self.priv_key)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&request.contract, &stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let ForgeOutput { deployed_to, .. } = ForgeOutput::from_stdout(&stdout)?;
        Ok(deployed_to)
    }
}

/// Map the stderr of a failed `forge create` run onto the error taxonomy
pub fn classify_failure(contract: &str, stderr: &str) -> ScriptError {
    let msg = format!("{contract}: {}", stderr.trim());
    let lower = stderr.to_lowercase();

    if lower.contains("revert") {
        ScriptError::DeploymentReverted(msg)
    } else if lower.contains("constructor") && lower.contains("argument") {
        ScriptError::ArgumentMismatch(msg)
    } else if lower.contains("compil") || lower.contains("could not find artifact") {
        ScriptError::Compilation(msg)
    } else {
        ScriptError::TransactionSubmission(msg)
    }
}
