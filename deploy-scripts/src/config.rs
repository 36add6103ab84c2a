//! Network and compiler configuration consumed by the deployer

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::errors::ScriptError;

/// The network used when none is selected
pub const DEFAULT_NETWORK: &str = "abstractTestnet";

/// The configuration of a single target network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// The RPC endpoint of the network
    #[serde(default)]
    pub url: Option<String>,
    /// The underlying base-chain network, by name or URL
    #[serde(default)]
    pub eth_network: Option<String>,
    /// Whether the network is a zkSync chain
    #[serde(default)]
    pub zksync: bool,
    /// The contract verification endpoint
    #[serde(default, rename = "verifyURL")]
    pub verify_url: Option<String>,
}

/// Optimizer settings of a compiler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// Whether the optimizer runs
    #[serde(default)]
    pub enabled: bool,
    /// The number of optimizer runs, compiler default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs: Option<u64>,
}

/// Metadata settings of a compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSettings {
    /// The hash appended to the bytecode, e.g. `none` or `ipfs`
    pub bytecode_hash: String,
}

/// Code generation settings of a compiler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerSettings {
    /// Whether to compile through the IR pipeline
    #[serde(default, rename = "viaIR")]
    pub via_ir: bool,
    /// The targeted EVM version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evm_version: Option<String>,
    /// Optimizer settings
    #[serde(default)]
    pub optimizer: OptimizerSettings,
    /// Metadata settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataSettings>,
}

/// A compiler version together with its settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// The compiler version
    pub version: String,
    /// The compiler settings
    #[serde(default)]
    pub settings: CompilerSettings,
}

/// Settings of the zkSync compiler wrapping solc
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZksolcConfig {
    /// The zksolc version
    pub version: String,
    /// The zksolc settings
    #[serde(default)]
    pub settings: ZksolcSettings,
}

/// Settings of zksolc
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZksolcSettings {
    /// Whether EraVM extensions are available to the compiled contracts
    #[serde(default, rename = "enableEraVMExtensions")]
    pub enable_era_vm_extensions: bool,
}

/// Solidity compilers: a default list and overrides keyed by source path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidityConfig {
    /// The default compilers, the first of which applies to unmatched sources
    pub compilers: Vec<CompilerConfig>,
    /// Overrides keyed by file path, or by directory prefix ending in `/`
    #[serde(default)]
    pub overrides: BTreeMap<String, CompilerConfig>,
}

impl SolidityConfig {
    /// The compiler configuration applying to the source file at `path`.
    ///
    /// An exact file override wins over a directory prefix override, the
    /// longest matching prefix wins among prefixes, and the first default
    /// compiler applies otherwise.
    pub fn compiler_for(&self, path: &str) -> Option<&CompilerConfig> {
        if let Some(exact) = self.overrides.get(path) {
            return Some(exact);
        }

        self.overrides
            .iter()
            .filter(|(prefix, _)| prefix.ends_with('/') && path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, config)| config)
            .or_else(|| self.compilers.first())
    }
}

/// The full deployment configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployConfig {
    /// The network used when none is selected
    pub default_network: String,
    /// The known networks, by name
    pub networks: BTreeMap<String, NetworkConfig>,
    /// zksolc configuration
    pub zksolc: ZksolcConfig,
    /// solc configuration
    pub solidity: SolidityConfig,
}

impl DeployConfig {
    /// Load the configuration from a JSON file, or the built-in one if no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ScriptError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ReadFile(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&contents).map_err(|e| ScriptError::Config(e.to_string()))
    }

    /// Look up a network by name, falling back to the default network
    pub fn network(&self, name: Option<&str>) -> Result<(&str, &NetworkConfig), ScriptError> {
        let name = name.unwrap_or(&self.default_network);
        self.networks
            .get_key_value(name)
            .map(|(name, network)| (name.as_str(), network))
            .ok_or_else(|| ScriptError::Config(format!("unknown network `{name}`")))
    }

    /// The RPC URL to deploy to, preferring an explicit override
    pub fn rpc_url(
        &self,
        network: Option<&str>,
        rpc_url: Option<&str>,
    ) -> Result<String, ScriptError> {
        if let Some(url) = rpc_url {
            return Ok(url.to_string());
        }

        let (name, network) = self.network(network)?;
        network
            .url
            .clone()
            .ok_or_else(|| ScriptError::Config(format!("network `{name}` has no RPC url")))
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        let network = |url: Option<&str>, eth_network: Option<&str>, verify_url: Option<&str>| {
            NetworkConfig {
                url: url.map(String::from),
                eth_network: eth_network.map(String::from),
                zksync: true,
                verify_url: verify_url.map(String::from),
            }
        };

        let networks = BTreeMap::from([
            (
                DEFAULT_NETWORK.to_string(),
                network(
                    Some("https://api.testnet.abs.xyz"),
                    Some("sepolia"),
                    Some("https://api-explorer-verify.testnet.abs.xyz/contract_verification"),
                ),
            ),
            (
                "dockerizedNode".to_string(),
                network(
                    Some("http://localhost:3050"),
                    Some("http://localhost:8545"),
                    None,
                ),
            ),
            (
                "inMemoryNode".to_string(),
                network(Some("http://127.0.0.1:8011"), Some("localhost"), None),
            ),
            ("hardhat".to_string(), network(None, None, None)),
        ]);

        let seaport = |version: &str, runs: u64| CompilerConfig {
            version: version.to_string(),
            settings: CompilerSettings {
                via_ir: true,
                evm_version: None,
                optimizer: OptimizerSettings {
                    enabled: true,
                    runs: Some(runs),
                },
                metadata: None,
            },
        };

        let overrides = BTreeMap::from([
            (
                "contracts/seaport-1.5/Seaport.sol".to_string(),
                seaport("0.8.17", 4_294_967_295),
            ),
            (
                "contracts/seaport-1.5/helpers/".to_string(),
                seaport("0.8.17", 4_294_967_295),
            ),
            (
                "contracts/seaport-1.5/lib/".to_string(),
                seaport("0.8.17", 4_294_967_295),
            ),
            (
                "contracts/seaport-1.5/conduit/Conduit.sol".to_string(),
                seaport("0.8.14", 1_000_000),
            ),
            (
                "contracts/seaport-1.5/conduit/ConduitController.sol".to_string(),
                seaport("0.8.14", 1_000_000),
            ),
            (
                "contracts/helper/TransferHelper.sol".to_string(),
                seaport("0.8.14", 1_000_000),
            ),
        ]);

        Self {
            default_network: DEFAULT_NETWORK.to_string(),
            networks,
            zksolc: ZksolcConfig {
                version: "latest".to_string(),
                settings: ZksolcSettings {
                    enable_era_vm_extensions: true,
                },
            },
            solidity: SolidityConfig {
                compilers: vec![CompilerConfig {
                    version: "0.8.24".to_string(),
                    settings: CompilerSettings {
                        via_ir: true,
                        evm_version: Some("cancun".to_string()),
                        optimizer: OptimizerSettings {
                            enabled: true,
                            runs: None,
                        },
                        metadata: Some(MetadataSettings {
                            bytecode_hash: "none".to_string(),
                        }),
                    },
                }],
                overrides,
            },
        }
    }
}
