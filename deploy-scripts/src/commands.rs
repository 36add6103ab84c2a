//! Implementations of the various deploy scripts

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    cli::{CompilerSettingsArgs, GlobalArgs, PredictArgs},
    config::{CompilerConfig, DeployConfig, ZksolcConfig},
    deployer::{Create2Predictor, ForgeDeployer},
    errors::ScriptError,
    scripts,
    types::{DeployScript, DeployedAddresses},
    utils::{deployer_address, parse_addr_from_deployments_file, write_deployed_addresses},
};

/// Deploy every contract of `script`, recording the addresses if a
/// deployments file was given
pub async fn deploy(
    script: DeployScript,
    global: &GlobalArgs,
    config: &DeployConfig,
) -> Result<(), ScriptError> {
    let plan = scripts::plan(script)?;

    let (network_name, network) = config.network(global.network.as_deref())?;
    if !network.zksync {
        warn!("Network `{network_name}` is not marked as a zkSync chain");
    }

    let rpc_url = config.rpc_url(global.network.as_deref(), global.rpc_url.as_deref())?;
    let verifier_url = match (global.verify, &network.verify_url) {
        (true, Some(url)) => Some(url.clone()),
        (true, None) => {
            warn!("Network `{network_name}` has no verification endpoint, skipping verification");
            None
        }
        (false, _) => None,
    };

    let deployer = ForgeDeployer::new(&global.forge_bin, &rpc_url, global.priv_key()?)
        .with_verifier_url(verifier_url);

    info!("Running `{script}` against {network_name} ({rpc_url})");
    let deployed = plan.execute(&deployer).await?;

    if let Some(path) = &global.deployments_path {
        write_deployed_addresses(path, &deployed)?;
        info!("Deployments written to {}", path.display());
    }

    Ok(())
}

/// Print the address every contract of a script would be deployed to,
/// flagging addresses that differ from the ones in the deployments file
pub async fn predict(args: PredictArgs, global: &GlobalArgs) -> Result<(), ScriptError> {
    let sender = deployer_address(global.priv_key()?)?;
    let predictor = Create2Predictor::new(sender, args.artifacts);

    let predicted = scripts::plan(args.script)?.execute(&predictor).await?;
    for line in prediction_report(&predicted, global.deployments_path.as_deref())? {
        println!("{line}");
    }

    Ok(())
}

/// One line per predicted contract, noting the recorded address when it
/// differs from the prediction
fn prediction_report(
    predicted: &DeployedAddresses,
    deployments_path: Option<&Path>,
) -> Result<Vec<String>, ScriptError> {
    let deployments_path = deployments_path.filter(|path| path.exists());

    predicted
        .iter()
        .map(|(contract, address)| -> Result<String, ScriptError> {
            let recorded = match deployments_path {
                Some(path) => parse_addr_from_deployments_file(path, contract)?,
                None => None,
            };

            Ok(match recorded {
                Some(recorded) if recorded != address => {
                    warn!("{contract} is recorded at {recorded:#x}, predicted {address:#x}");
                    format!("{contract}: {address:#x} (recorded: {recorded:#x})")
                }
                _ => format!("{contract}: {address:#x}"),
            })
        })
        .collect()
}

/// The compilers that apply to a source file
#[derive(Serialize)]
struct ResolvedCompilers<'a> {
    /// The source file the compilers were resolved for
    source: &'a str,
    /// The zkSync compiler, shared by every source
    zksolc: &'a ZksolcConfig,
    /// The solc configuration resolved from the overrides
    solc: &'a CompilerConfig,
}

/// Resolve the compilers applying to `source`
fn resolve_compilers<'a>(
    source: &'a str,
    config: &'a DeployConfig,
) -> Result<ResolvedCompilers<'a>, ScriptError> {
    let solc = config
        .solidity
        .compiler_for(source)
        .ok_or_else(|| ScriptError::Config("no solidity compilers configured".to_string()))?;

    Ok(ResolvedCompilers {
        source,
        zksolc: &config.zksolc,
        solc,
    })
}

/// Print the compiler configuration applying to a source file
pub fn compiler_settings(
    args: CompilerSettingsArgs,
    config: &DeployConfig,
) -> Result<(), ScriptError> {
    let resolved = resolve_compilers(&args.source, config)?;
    let json =
        serde_json::to_string_pretty(&resolved).map_err(|e| ScriptError::Serde(e.to_string()))?;
    println!("{json}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    use alloy_primitives::Address;

    use super::{deploy, prediction_report, resolve_compilers};
    use crate::{
        cli::GlobalArgs,
        config::DeployConfig,
        errors::ScriptError,
        test_helpers::{fake_forge, FORGE_DEPLOYED_TO},
        types::{DeployScript, DeployedAddresses},
        utils::parse_addr_from_deployments_file,
    };

    /// The first default anvil key
    const PRIV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn global_args(forge_bin: String, network: &str, deployments_path: PathBuf) -> GlobalArgs {
        GlobalArgs {
            priv_key: Some(PRIV_KEY.to_string()),
            network: Some(network.to_string()),
            rpc_url: None,
            config: None,
            deployments_path: Some(deployments_path),
            forge_bin,
            verify: false,
        }
    }

    fn forge_argv(dir: &Path) -> Vec<String> {
        fs::read_to_string(dir.join("argv.log"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    #[tokio::test]
    async fn test_deploy_records_addresses() {
        let dir = tempfile::tempdir().unwrap();
        let deployments = dir.path().join("deployments.json");
        let forge = fake_forge(dir.path(), None);
        let global = global_args(forge, "dockerizedNode", deployments.clone());

        deploy(DeployScript::RelayContracts, &global, &DeployConfig::default())
            .await
            .unwrap();

        for contract in ["Multicaller", "ERC20Router", "ApprovalProxy", "RelayReceiver"] {
            assert_eq!(
                parse_addr_from_deployments_file(&deployments, contract).unwrap(),
                Some(FORGE_DEPLOYED_TO)
            );
        }
        let argv = forge_argv(dir.path());
        assert_eq!(argv.iter().filter(|arg| *arg == "create").count(), 4);
        assert!(argv.contains(&"http://localhost:3050".to_string()));
    }

    #[tokio::test]
    async fn test_failed_deploy_records_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let deployments = dir.path().join("deployments.json");
        let forge = fake_forge(dir.path(), Some("ERC20Router"));
        let global = global_args(forge, "dockerizedNode", deployments.clone());

        let res =
            deploy(DeployScript::RelayContracts, &global, &DeployConfig::default()).await;
        assert!(matches!(res, Err(ScriptError::DeploymentReverted(_))));
        assert!(!deployments.exists());

        let argv = forge_argv(dir.path());
        assert!(argv.contains(&"Multicaller".to_string()));
        assert!(!argv.contains(&"ApprovalProxy".to_string()));
    }

    #[tokio::test]
    async fn test_verify_passes_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let mut global = global_args(
            fake_forge(dir.path(), None),
            "abstractTestnet",
            dir.path().join("deployments.json"),
        );
        global.verify = true;

        deploy(DeployScript::Permit2, &global, &DeployConfig::default())
            .await
            .unwrap();

        let argv = forge_argv(dir.path());
        let verifier_pos = argv.iter().position(|arg| arg == "--verifier-url").unwrap();
        assert!(argv.contains(&"--verify".to_string()));
        assert_eq!(
            argv[verifier_pos + 1],
            "https://api-explorer-verify.testnet.abs.xyz/contract_verification"
        );
    }

    #[tokio::test]
    async fn test_verify_skipped_without_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let deployments = dir.path().join("deployments.json");
        let forge = fake_forge(dir.path(), None);
        let mut global = global_args(forge, "dockerizedNode", deployments.clone());
        global.verify = true;

        deploy(DeployScript::Permit2, &global, &DeployConfig::default())
            .await
            .unwrap();

        assert!(!forge_argv(dir.path()).contains(&"--verify".to_string()));
        assert!(deployments.exists());
    }

    #[tokio::test]
    async fn test_deploy_unknown_network() {
        let dir = tempfile::tempdir().unwrap();
        let global = global_args(
            fake_forge(dir.path(), None),
            "mainnet",
            dir.path().join("deployments.json"),
        );

        let res = deploy(DeployScript::SwapRouter, &global, &DeployConfig::default()).await;
        assert!(matches!(res, Err(ScriptError::Config(_))));
        assert!(forge_argv(dir.path()).is_empty());
    }

    #[test]
    fn test_prediction_report_flags_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let deployments = dir.path().join("deployments.json");
        fs::write(
            &deployments,
            r#"{"deployments": {"Multicaller": "0x0000000000000000000000000000000000000001"}}"#,
        )
        .unwrap();

        let mut predicted = DeployedAddresses::default();
        predicted.insert("Multicaller", Address::with_last_byte(1));
        predicted.insert("ERC20Router", Address::with_last_byte(2));
        let report = prediction_report(&predicted, Some(&deployments)).unwrap();
        assert_eq!(
            report,
            vec![
                format!("Multicaller: {:#x}", Address::with_last_byte(1)),
                format!("ERC20Router: {:#x}", Address::with_last_byte(2)),
            ]
        );

        let mut moved = DeployedAddresses::default();
        moved.insert("Multicaller", Address::with_last_byte(3));
        let report = prediction_report(&moved, Some(&deployments)).unwrap();
        assert_eq!(
            report,
            vec![format!(
                "Multicaller: {:#x} (recorded: {:#x})",
                Address::with_last_byte(3),
                Address::with_last_byte(1)
            )]
        );

        // A missing deployments file is not an error
        let missing = dir.path().join("missing.json");
        assert_eq!(prediction_report(&moved, Some(&missing)).unwrap().len(), 1);
    }

    #[test]
    fn test_compiler_settings_include_zksolc() {
        let config = DeployConfig::default();
        let resolved = resolve_compilers("contracts/seaport-1.5/Seaport.sol", &config).unwrap();
        let json = serde_json::to_value(&resolved).unwrap();

        assert_eq!(json["zksolc"]["version"], "latest");
        assert_eq!(json["zksolc"]["settings"]["enableEraVMExtensions"], true);
        assert_eq!(json["solc"]["version"], "0.8.17");
        assert_eq!(json["source"], "contracts/seaport-1.5/Seaport.sol");
    }
}
