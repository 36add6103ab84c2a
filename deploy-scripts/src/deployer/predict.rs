//! A dry-run deployer that derives zkSync create2 addresses without
//! submitting any transaction

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::{hex, keccak256, Address, B256};
use itertools::Itertools;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{
    constants::{
        ARTIFACT_EXTENSION, BYTECODE_HASH_VERSION, BYTECODE_WORD_SIZE, ZKSYNC_CREATE2_PREFIX,
    },
    errors::ScriptError,
    types::{DeploymentRequest, DeploymentStrategy},
};

use super::Deployer;

/// The subset of a compilation artifact needed to derive an address
#[derive(Deserialize)]
struct Artifact {
    /// The deployment bytecode
    bytecode: ArtifactBytecode,
}

/// The bytecode field of an artifact, in either of the layouts zkSync
/// toolchains write
#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    /// `hardhat-zksync` writes the hex string directly
    Hex(String),
    /// `forge build --zksync` nests it under `object`
    Object {
        /// The hex-encoded bytecode
        object: String,
    },
}

impl ArtifactBytecode {
    /// The hex-encoded bytecode
    fn hex(&self) -> &str {
        match self {
            ArtifactBytecode::Hex(hex) | ArtifactBytecode::Object { object: hex } => hex,
        }
    }
}

/// Predicts the address each create2 deployment would receive
#[derive(Debug, Clone)]
pub struct Create2Predictor {
    /// The account that would send the deployments
    sender: Address,
    /// The root of the compilation artifacts directory
    artifacts_dir: PathBuf,
}

impl Create2Predictor {
    /// Construct a predictor for deployments sent by `sender`
    pub fn new(sender: Address, artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            sender,
            artifacts_dir: artifacts_dir.into(),
        }
    }

    /// Load the deployment bytecode of `contract` from the artifacts directory.
    ///
    /// Exactly one `<contract>.json` may exist under the directory. The
    /// prediction only holds if `forge create` compiles the contract to the
    /// same bytecode, i.e. the artifacts come from the build being deployed.
    pub fn load_bytecode(&self, contract: &str) -> Result<Vec<u8>, ScriptError> {
        let file_name = format!("{contract}.{ARTIFACT_EXTENSION}");
        let mut found = Vec::new();
        find_files(&self.artifacts_dir, &file_name, &mut found)?;
        found.sort();

        let path = match found.as_slice() {
            [path] => path,
            [] => {
                return Err(ScriptError::Compilation(format!(
                    "no artifact for `{contract}` under {}",
                    self.artifacts_dir.display()
                )))
            }
            paths => {
                return Err(ScriptError::Compilation(format!(
                    "ambiguous artifacts for `{contract}`: {}",
                    paths.iter().map(|path| path.display()).join(", ")
                )))
            }
        };

        let contents =
            fs::read_to_string(path).map_err(|e| ScriptError::ReadFile(e.to_string()))?;
        let artifact: Artifact =
            serde_json::from_str(&contents).map_err(|e| ScriptError::Serde(e.to_string()))?;

        hex::decode(artifact.bytecode.hex()).map_err(|e| ScriptError::Compilation(e.to_string()))
    }

    /// The address `request` would be deployed to
    pub fn predict(&self, request: &DeploymentRequest) -> Result<Address, ScriptError> {
        let salt = match (request.strategy, request.salt) {
            (DeploymentStrategy::Create2, Some(salt)) => salt,
            (DeploymentStrategy::Create2, None) => {
                return Err(ScriptError::UnpredictableAddress(format!(
                    "`{}` has no salt",
                    request.contract
                )))
            }
            (DeploymentStrategy::Create, _) => {
                return Err(ScriptError::UnpredictableAddress(format!(
                    "`{}` uses a nonce-based deployment",
                    request.contract
                )))
            }
        };

        let bytecode = self.load_bytecode(&request.contract)?;
        let hash = bytecode_hash(&bytecode)?;
        let input = encode_constructor_args(&request.constructor_args);

        Ok(create2_address(self.sender, salt, hash, &input))
    }
}

impl Deployer for Create2Predictor {
    async fn deploy(&self, request: &DeploymentRequest) -> Result<Address, ScriptError> {
        self.predict(request)
    }
}

/// ABI-encode constructor arguments as a parameter list
pub fn encode_constructor_args(args: &[Address]) -> Vec<u8> {
    DynSolValue::Tuple(args.iter().copied().map(DynSolValue::Address).collect())
        .abi_encode_params()
}

/// The versioned hash under which EraVM bytecode is published.
///
/// The bytecode must consist of an odd number of 32-byte words, fewer than 2^16.
pub fn bytecode_hash(bytecode: &[u8]) -> Result<B256, ScriptError> {
    if bytecode.is_empty() || bytecode.len() % BYTECODE_WORD_SIZE != 0 {
        return Err(ScriptError::Compilation(format!(
            "bytecode length {} is not a positive multiple of {BYTECODE_WORD_SIZE}",
            bytecode.len()
        )));
    }

    let words = bytecode.len() / BYTECODE_WORD_SIZE;
    let words = u16::try_from(words)
        .ok()
        .filter(|w| w % 2 == 1)
        .ok_or_else(|| {
            ScriptError::Compilation(format!(
                "bytecode word count {words} must be odd and below 2^16"
            ))
        })?;

    let mut hash: [u8; 32] = Sha256::digest(bytecode).into();
    hash[0] = BYTECODE_HASH_VERSION;
    hash[1] = 0;
    hash[2..4].copy_from_slice(&words.to_be_bytes());

    Ok(B256::from(hash))
}

/// The zkSync create2 address of a deployment
pub fn create2_address(
    sender: Address,
    salt: B256,
    bytecode_hash: B256,
    constructor_input: &[u8],
) -> Address {
    let mut preimage = Vec::with_capacity(5 * 32);
    preimage.extend_from_slice(keccak256(ZKSYNC_CREATE2_PREFIX).as_slice());
    preimage.extend_from_slice(B256::left_padding_from(sender.as_slice()).as_slice());
    preimage.extend_from_slice(salt.as_slice());
    preimage.extend_from_slice(bytecode_hash.as_slice());
    preimage.extend_from_slice(keccak256(constructor_input).as_slice());

    Address::from_word(keccak256(preimage))
}

/// Recursively collect every file named `file_name` under `dir`
fn find_files(dir: &Path, file_name: &str, found: &mut Vec<PathBuf>) -> Result<(), ScriptError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {e}", dir.display())))?;

    for entry in entries {
        let path = entry
            .map_err(|e| ScriptError::ReadFile(format!("{}: {e}", dir.display())))?
            .path();
        if path.is_dir() {
            find_files(&path, file_name, found)?;
        } else if path.file_name().is_some_and(|name| name == file_name) {
            found.push(path);
        }
    }

    Ok(())
}
