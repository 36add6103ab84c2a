//! A deployment plan: a set of deployment units forming a dependency graph,
//! executed sequentially in topological order.

use std::collections::HashMap;

use tracing::info;

use crate::{
    deployer::Deployer,
    errors::ScriptError,
    types::{ConstructorArg, DeployedAddresses, DeploymentRequest, DeploymentUnit},
};

/// A validated, acyclic set of deployment units
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    /// The units in execution order
    units: Vec<DeploymentUnit>,
}

impl DeploymentPlan {
    /// Validate the given units and fix their execution order.
    ///
    /// Among the units whose dependencies are satisfied, the one declared
    /// first is always scheduled first, so a plan declared in dependency
    /// order executes in declaration order.
    pub fn new(units: Vec<DeploymentUnit>) -> Result<Self, ScriptError> {
        let mut index = HashMap::with_capacity(units.len());
        for (i, unit) in units.iter().enumerate() {
            if index.insert(unit.contract, i).is_some() {
                return Err(ScriptError::InvalidPlan(format!(
                    "duplicate unit `{}`",
                    unit.contract
                )));
            }
        }

        // Edges run from a dependency to its dependents
        let mut in_degree = vec![0usize; units.len()];
        let mut dependents = vec![Vec::new(); units.len()];
        for (i, unit) in units.iter().enumerate() {
            for dep in unit.dependencies() {
                let j = *index.get(dep).ok_or_else(|| {
                    ScriptError::InvalidPlan(format!(
                        "`{}` depends on unknown unit `{}`",
                        unit.contract, dep
                    ))
                })?;
                if i == j {
                    return Err(ScriptError::InvalidPlan(format!(
                        "`{}` depends on itself",
                        unit.contract
                    )));
                }

                in_degree[i] += 1;
                dependents[j].push(i);
            }
        }

        let mut order = Vec::with_capacity(units.len());
        let mut scheduled = vec![false; units.len()];
        while order.len() < units.len() {
            let next = (0..units.len())
                .find(|&i| !scheduled[i] && in_degree[i] == 0)
                .ok_or_else(|| {
                    let stuck = (0..units.len())
                        .filter(|&i| !scheduled[i])
                        .map(|i| units[i].contract)
                        .collect::<Vec<_>>()
                        .join(", ");
                    ScriptError::InvalidPlan(format!("dependency cycle among [{stuck}]"))
                })?;

            scheduled[next] = true;
            for &dependent in &dependents[next] {
                in_degree[dependent] -= 1;
            }
            order.push(next);
        }

        let mut slots: Vec<Option<DeploymentUnit>> = units.into_iter().map(Some).collect();
        let units = order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect();

        Ok(Self { units })
    }

    /// The units in the order they will be deployed
    pub fn units(&self) -> &[DeploymentUnit] {
        &self.units
    }

    /// Deploy every unit in order, threading deployed addresses into the
    /// constructor arguments of later units.
    ///
    /// The first deployer error aborts the run; no later unit is deployed.
    pub async fn execute<D: Deployer>(
        &self,
        deployer: &D,
    ) -> Result<DeployedAddresses, ScriptError> {
        let mut deployed = DeployedAddresses::default();
        for unit in &self.units {
            let request = resolve(unit, &deployed)?;
            info!("Deploying {request}");

            let address = deployer.deploy(&request).await?;
            info!("{} deployed at {:#x}", unit.contract, address);

            deployed.insert(unit.contract, address);
        }

        Ok(deployed)
    }
}

/// Resolve the constructor arguments of `unit` against the addresses deployed so far
pub fn resolve(
    unit: &DeploymentUnit,
    deployed: &DeployedAddresses,
) -> Result<DeploymentRequest, ScriptError> {
    let constructor_args = unit
        .args
        .iter()
        .map(|arg| match arg {
            ConstructorArg::Address(addr) => Ok(*addr),
            ConstructorArg::Deployed(contract) => deployed.get(contract).ok_or_else(|| {
                ScriptError::UnresolvedDependency(format!(
                    "`{}` requires the address of `{}`",
                    unit.contract, contract
                ))
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DeploymentRequest {
        contract: unit.contract.to_string(),
        strategy: unit.strategy,
        constructor_args,
        salt: unit.salt,
    })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, B256};

    use super::{resolve, DeploymentPlan};
    use crate::{
        errors::ScriptError,
        types::{ConstructorArg, DeployedAddresses, DeploymentUnit},
    };

    fn order(plan: &DeploymentPlan) -> Vec<&'static str> {
        plan.units().iter().map(|u| u.contract).collect()
    }

    #[test]
    fn test_declaration_order_preserved() {
        let plan = DeploymentPlan::new(vec![
            DeploymentUnit::create2("A", B256::ZERO),
            DeploymentUnit::create2("B", B256::ZERO),
            DeploymentUnit::create2("C", B256::ZERO),
        ])
        .unwrap();

        assert_eq!(order(&plan), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_dependencies_scheduled_first() {
        let plan = DeploymentPlan::new(vec![
            DeploymentUnit::create("Proxy").after("Router"),
            DeploymentUnit::create("Router").with_args([ConstructorArg::Deployed("Utility")]),
            DeploymentUnit::create("Utility"),
            DeploymentUnit::create("Standalone"),
        ])
        .unwrap();

        assert_eq!(order(&plan), vec!["Utility", "Router", "Proxy", "Standalone"]);
    }

    #[test]
    fn test_duplicate_unit_rejected() {
        let res = DeploymentPlan::new(vec![
            DeploymentUnit::create("A"),
            DeploymentUnit::create("A"),
        ]);

        assert!(matches!(res, Err(ScriptError::InvalidPlan(_))));
    }

    #[test]
    fn test_unknown_dependency_rejected() {
        let res = DeploymentPlan::new(vec![DeploymentUnit::create("A").after("Missing")]);

        assert!(matches!(res, Err(ScriptError::InvalidPlan(_))));
    }

    #[test]
    fn test_cycle_rejected() {
        let res = DeploymentPlan::new(vec![
            DeploymentUnit::create("A").with_args([ConstructorArg::Deployed("B")]),
            DeploymentUnit::create("B").after("A"),
            DeploymentUnit::create("C"),
        ]);

        match res {
            Err(ScriptError::InvalidPlan(msg)) => {
                assert!(msg.contains("cycle"));
                assert!(msg.contains('A') && msg.contains('B'));
            }
            other => panic!("expected a cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_self_dependency_rejected() {
        let res = DeploymentPlan::new(vec![DeploymentUnit::create("A").after("A")]);

        assert!(matches!(res, Err(ScriptError::InvalidPlan(_))));
    }

    #[test]
    fn test_resolve_threads_addresses() {
        let literal = Address::repeat_byte(0x11);
        let utility = Address::repeat_byte(0x22);
        let unit = DeploymentUnit::create2("Router", B256::ZERO).with_args([
            ConstructorArg::Address(literal),
            ConstructorArg::Deployed("Utility"),
        ]);

        let mut deployed = DeployedAddresses::default();
        assert!(matches!(
            resolve(&unit, &deployed),
            Err(ScriptError::UnresolvedDependency(_))
        ));

        deployed.insert("Utility", utility);
        let request = resolve(&unit, &deployed).unwrap();
        assert_eq!(request.constructor_args, vec![literal, utility]);
        assert_eq!(request.salt, Some(B256::ZERO));
    }
}
