//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{compiler_settings, deploy, predict},
    config::DeployConfig,
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_FORGE_BIN},
    errors::ScriptError,
    types::DeployScript,
};

/// Deploy the relay contracts, Permit2 and the swap router to a zkSync chain
#[derive(Parser)]
pub struct Cli {
    /// Arguments shared by every command
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Arguments shared by every command
#[derive(Args, Clone)]
pub struct GlobalArgs {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY")]
    pub priv_key: Option<String>,

    /// Network to deploy to, as named in the configuration
    #[arg(short, long)]
    pub network: Option<String>,

    /// Network RPC URL, overriding the URL of the selected network
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Path to a JSON network & compiler configuration, the built-in one is used if absent
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the file deployed addresses are recorded in. `predict` flags
    /// recorded addresses that differ from its prediction
    #[arg(short, long)]
    pub deployments_path: Option<PathBuf>,

    /// The `forge` binary used to submit deployments
    #[arg(long, default_value = DEFAULT_FORGE_BIN)]
    pub forge_bin: String,

    /// Verify deployed contracts against the network's verification endpoint,
    /// skipped with a warning on networks without one
    #[arg(long)]
    pub verify: bool,
}

impl GlobalArgs {
    /// The deployer's private key, which every deploying command needs
    pub fn priv_key(&self) -> Result<&str, ScriptError> {
        self.priv_key.as_deref().ok_or_else(|| {
            ScriptError::ClientInitialization("no private key given (--priv-key or PKEY)".into())
        })
    }
}

/// The commands of the deploy scripts
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the Permit2 contract
    DeployPermit2,
    /// Deploy the multicaller, ERC20 router, approval proxy and relay receiver
    DeployRelayContracts,
    /// Deploy the swap router
    DeploySwapRouter,
    /// Predict the create2 addresses of a script without deploying
    Predict(PredictArgs),
    /// Print the zksolc and solc configuration applying to a source file
    CompilerSettings(CompilerSettingsArgs),
}

impl Command {
    /// Run the command against the given configuration
    pub async fn run(self, global: &GlobalArgs, config: &DeployConfig) -> Result<(), ScriptError> {
        match self {
            Command::DeployPermit2 => deploy(DeployScript::Permit2, global, config).await,
            Command::DeployRelayContracts => {
                deploy(DeployScript::RelayContracts, global, config).await
            }
            Command::DeploySwapRouter => deploy(DeployScript::SwapRouter, global, config).await,
            Command::Predict(args) => predict(args, global).await,
            Command::CompilerSettings(args) => compiler_settings(args, config),
        }
    }
}

/// Print the create2 address each contract of a script would be deployed to,
/// without submitting anything.
///
/// The prediction only holds for the bytecode `forge create` deploys, so the
/// artifacts should come from `forge build --zksync` of the same project.
#[derive(Args)]
pub struct PredictArgs {
    /// The script to predict addresses for
    #[arg(short, long)]
    pub script: DeployScript,

    /// The directory containing zkSync compilation artifacts, in the layout of
    /// `forge build --zksync` or `hardhat-zksync`
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,
}

/// Print the zksolc and solc configuration applying to a source file
#[derive(Args)]
pub struct CompilerSettingsArgs {
    /// Path of the source file, relative to the project root
    #[arg(short, long)]
    pub source: String,
}
