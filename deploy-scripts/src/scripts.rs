//! Declarations of the deployment units making up each orchestration script

use crate::{
    constants::{
        APPROVAL_PROXY_CONTRACT, ERC20_ROUTER_CONTRACT, MULTICALLER_CONTRACT, PERMIT2_ADDRESS,
        PERMIT2_CONTRACT, PERMIT2_SALT, POSITION_MANAGER_ADDRESS, RELAY_CONTRACTS_SALT,
        RELAY_RECEIVER_CONTRACT, SOLVER_ADDRESS, SWAP_ROUTER_CONTRACT, SWAP_ROUTER_SALT,
        V2_FACTORY_ADDRESS, V3_FACTORY_ADDRESS, WETH_ADDRESS,
    },
    errors::ScriptError,
    plan::DeploymentPlan,
    types::{ConstructorArg, DeployScript, DeploymentUnit},
};

/// The units deployed by the given script
pub fn units(script: DeployScript) -> Vec<DeploymentUnit> {
    match script {
        DeployScript::Permit2 => permit2_units(),
        DeployScript::RelayContracts => relay_contracts_units(),
        DeployScript::SwapRouter => swap_router_units(),
    }
}

/// The validated plan of the given script
pub fn plan(script: DeployScript) -> Result<DeploymentPlan, ScriptError> {
    DeploymentPlan::new(units(script))
}

/// Permit2, on its own
fn permit2_units() -> Vec<DeploymentUnit> {
    vec![DeploymentUnit::create2(PERMIT2_CONTRACT, PERMIT2_SALT)]
}

/// The relay contracts: the ERC20 router is wired to the multicaller, and the
/// approval proxy must only exist once the router does
fn relay_contracts_units() -> Vec<DeploymentUnit> {
    vec![
        DeploymentUnit::create2(MULTICALLER_CONTRACT, RELAY_CONTRACTS_SALT),
        DeploymentUnit::create2(ERC20_ROUTER_CONTRACT, RELAY_CONTRACTS_SALT).with_args([
            ConstructorArg::Address(PERMIT2_ADDRESS),
            ConstructorArg::Deployed(MULTICALLER_CONTRACT),
        ]),
        DeploymentUnit::create2(APPROVAL_PROXY_CONTRACT, RELAY_CONTRACTS_SALT)
            .after(ERC20_ROUTER_CONTRACT),
        DeploymentUnit::create2(RELAY_RECEIVER_CONTRACT, RELAY_CONTRACTS_SALT)
            .with_args([ConstructorArg::Address(SOLVER_ADDRESS)]),
    ]
}

/// The Uniswap swap router
fn swap_router_units() -> Vec<DeploymentUnit> {
    vec![
        DeploymentUnit::create2(SWAP_ROUTER_CONTRACT, SWAP_ROUTER_SALT).with_args([
            ConstructorArg::Address(V2_FACTORY_ADDRESS),
            ConstructorArg::Address(V3_FACTORY_ADDRESS),
            ConstructorArg::Address(POSITION_MANAGER_ADDRESS),
            ConstructorArg::Address(WETH_ADDRESS),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::plan;
    use crate::types::{DeployScript, DeploymentStrategy};

    #[test]
    fn test_all_plans_valid() {
        for script in [
            DeployScript::Permit2,
            DeployScript::RelayContracts,
            DeployScript::SwapRouter,
        ] {
            let plan = plan(script).unwrap();
            assert!(!plan.units().is_empty());
            assert!(plan
                .units()
                .iter()
                .all(|u| u.strategy == DeploymentStrategy::Create2 && u.salt.is_some()));
        }
    }

    #[test]
    fn test_relay_contracts_order() {
        let plan = plan(DeployScript::RelayContracts).unwrap();
        let order: Vec<_> = plan.units().iter().map(|u| u.contract).collect();

        assert_eq!(
            order,
            vec!["Multicaller", "ERC20Router", "ApprovalProxy", "RelayReceiver"]
        );
    }
}
