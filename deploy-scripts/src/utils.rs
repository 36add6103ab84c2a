//! Utilities for the deploy scripts.

use std::{fs, path::Path, str::FromStr};

use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::Address;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Serializer, Value};

use crate::{
    constants::{DEPLOYMENTS_INDENT, DEPLOYMENTS_KEY},
    errors::ScriptError,
    types::DeployedAddresses,
};

/// The address of the account controlled by `priv_key`
pub fn deployer_address(priv_key: &str) -> Result<Address, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    Ok(signer.address())
}

/// Read a JSON document from `file_path`
pub fn get_json_from_file(file_path: &Path) -> Result<Value, ScriptError> {
    let contents = fs::read_to_string(file_path)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {e}", file_path.display())))?;

    serde_json::from_str(&contents).map_err(|e| ScriptError::Serde(e.to_string()))
}

/// Parse the address stored under `contract_key` in the deployments file,
/// if one was recorded
pub fn parse_addr_from_deployments_file(
    file_path: &Path,
    contract_key: &str,
) -> Result<Option<Address>, ScriptError> {
    let parsed_json = get_json_from_file(file_path)?;

    let Some(addr) = parsed_json
        .get(DEPLOYMENTS_KEY)
        .and_then(|deployments| deployments.get(contract_key))
    else {
        return Ok(None);
    };

    let addr = addr.as_str().ok_or_else(|| {
        ScriptError::Serde(format!("address of `{contract_key}` is not a string"))
    })?;
    Address::from_str(addr)
        .map(Some)
        .map_err(|e| ScriptError::Serde(e.to_string()))
}

/// Merge the deployed addresses into the deployments file, creating it if needed
pub fn write_deployed_addresses(
    file_path: &Path,
    deployed: &DeployedAddresses,
) -> Result<(), ScriptError> {
    let mut parsed_json = if file_path.exists() {
        get_json_from_file(file_path)?
    } else {
        Value::Object(Map::new())
    };

    let root = parsed_json.as_object_mut().ok_or_else(|| {
        ScriptError::Serde("deployments file is not a JSON object".to_string())
    })?;
    let deployments = root
        .entry(DEPLOYMENTS_KEY)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| ScriptError::Serde(format!("`{DEPLOYMENTS_KEY}` is not a JSON object")))?;

    for (contract, address) in deployed.iter() {
        deployments.insert(contract.to_string(), Value::String(format!("{address:#x}")));
    }

    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(DEPLOYMENTS_INDENT));
    parsed_json
        .serialize(&mut serializer)
        .map_err(|e| ScriptError::Serde(e.to_string()))?;

    fs::write(file_path, buf).map_err(|e| ScriptError::WriteFile(e.to_string()))
}
