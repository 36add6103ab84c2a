//! The deployer collaborator: submits a single resolved deployment and
//! returns the confirmed address.

use std::future::Future;

use alloy_primitives::Address;

use crate::{errors::ScriptError, types::DeploymentRequest};

mod forge;
mod predict;

pub use forge::{ForgeDeployer, ForgeOutput};
pub use predict::{bytecode_hash, create2_address, encode_constructor_args, Create2Predictor};

/// Deploys one contract per call
pub trait Deployer {
    /// Deploy the contract described by `request`, resolving once the
    /// deployment is confirmed
    fn deploy(
        &self,
        request: &DeploymentRequest,
    ) -> impl Future<Output = Result<Address, ScriptError>> + Send;
}
