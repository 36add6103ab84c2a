//! Helpers shared by the unit tests

use std::{fs, os::unix::fs::PermissionsExt, path::Path};

use alloy_primitives::{address, Address};

/// The address every fake `forge` run reports
pub const FORGE_DEPLOYED_TO: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

/// Write an executable stand-in for `forge` into `dir`, returning its path.
///
/// Each run appends its arguments to `argv.log`, one per line, and its
/// `ETH_PRIVATE_KEY` to `key.log`. Deploying `fail_on` exits non-zero with a
/// revert on stderr, every other contract prints compilation progress
/// followed by the `--json` document.
pub fn fake_forge(dir: &Path, fail_on: Option<&str>) -> String {
    let dir_str = dir.display();
    let fail_on = fail_on.unwrap_or_default();
    let script = format!(
        r#"#!/bin/sh
printf '%s\n' "$@" >> "{dir_str}/argv.log"
printf '%s\n' "$ETH_PRIVATE_KEY" >> "{dir_str}/key.log"
if [ "$2" = "{fail_on}" ]; then
    echo "Error: execution reverted" >&2
    exit 1
fi
echo "Compiling 4 files with zksolc and solc 0.8.24"
echo "Compiler run successful!"
echo '{{"deployer":"0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266","deployedTo":"{FORGE_DEPLOYED_TO:#x}","transactionHash":"0x0000000000000000000000000000000000000000000000000000000000000001"}}'
"#
    );

    let path = dir.join("forge");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

    path.to_str().unwrap().to_string()
}
