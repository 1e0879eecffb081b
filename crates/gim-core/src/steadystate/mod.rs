//! Steady-state cases: operating points of a grid.
//!
//! A steady-state case carries one operating point per load, transformer and
//! external grid of a topology, referenced by name. Whether a case actually
//! belongs to a given topology is checked by
//! [`SteadystateCase::is_valid_topology`], a soft predicate that logs what
//! is wrong and returns `false`, in contrast to the hard-failing
//! constructors.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{check_unique, field, validate_each, Diagnostics, Validate};
use crate::meta::Meta;
use crate::topology::Topology;

pub mod characteristic;
pub mod controller;
pub mod external_grid;
pub mod load;
pub mod transformer;

pub use characteristic::Characteristic;
pub use controller::{
    ControlCosPhiConst, ControlCosPhiP, ControlCosPhiU, ControlPConst, ControlPF, ControlQConst,
    ControlQP, ControlQU, ControlStrategy, ControlTanPhiConst, ControlUConst,
    ControlledVoltageRef, PControlType, PController, QControlType, QController,
};

/// A steady-state case / an operating point of a grid.
///
/// Characterized by the operating points of all loads, transformers and
/// external grids in operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteadystateCase {
    pub meta: Meta,
    pub loads: Vec<load::Load>,
    pub transformers: Vec<transformer::Transformer>,
    pub external_grids: Vec<external_grid::ExternalGrid>,
}

impl SteadystateCase {
    /// Empty case for the given header.
    pub fn new(meta: Meta) -> Self {
        Self {
            meta,
            loads: Vec::new(),
            transformers: Vec::new(),
            external_grids: Vec::new(),
        }
    }

    /// Check that this case matches `topology`.
    ///
    /// The metadata must compare equal (including version, date and id), the
    /// per-category element counts must match exactly, and every element
    /// named in the topology must have a same-named operating point here.
    /// Mismatches are logged and reported as `false`; this never fails hard.
    pub fn is_valid_topology(&self, topology: &Topology) -> bool {
        tracing::info!("Verifying steadystate case ...");
        if topology.meta != self.meta {
            tracing::error!("Metadata does not match.");
            return false;
        }

        if !self.is_proper_element_number(topology) {
            return false;
        }

        if !self.is_proper_elements(topology) {
            return false;
        }

        tracing::info!("Verifying steadystate case was successful.");
        true
    }

    fn is_proper_element_number(&self, topology: &Topology) -> bool {
        if self.loads.len() != topology.loads.len() {
            tracing::error!(
                n_act = self.loads.len(),
                n_ref = topology.loads.len(),
                "Number of loads does not match."
            );
            return false;
        }

        if self.transformers.len() != topology.transformers.len() {
            tracing::error!(
                n_act = self.transformers.len(),
                n_ref = topology.transformers.len(),
                "Number of transformers does not match."
            );
            return false;
        }

        if self.external_grids.len() != topology.external_grids.len() {
            tracing::error!(
                n_act = self.external_grids.len(),
                n_ref = topology.external_grids.len(),
                "Number of external grids does not match."
            );
            return false;
        }

        true
    }

    fn is_proper_elements(&self, topology: &Topology) -> bool {
        if !self.is_proper_loads(topology) {
            return false;
        }

        if !self.is_proper_transformers(topology) {
            return false;
        }

        self.is_proper_external_grids(topology)
    }

    fn is_proper_loads(&self, topology: &Topology) -> bool {
        for load in &topology.loads {
            if !self.loads.iter().any(|e| e.name == load.name) {
                tracing::error!(load_name = %load.name, "Load is not in steadystate case.");
                return false;
            }
        }

        true
    }

    fn is_proper_transformers(&self, topology: &Topology) -> bool {
        for trafo in &topology.transformers {
            if !self.transformers.iter().any(|e| e.name == trafo.name) {
                tracing::error!(
                    trafo_name = %trafo.name,
                    "Transformer is not in steadystate case."
                );
                return false;
            }
        }

        true
    }

    fn is_proper_external_grids(&self, topology: &Topology) -> bool {
        for ext_grid in &topology.external_grids {
            if !self.external_grids.iter().any(|e| e.name == ext_grid.name) {
                tracing::error!(
                    ext_grid_name = %ext_grid.name,
                    "External grid is not in steadystate case."
                );
                return false;
            }
        }

        true
    }
}

impl Validate for SteadystateCase {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.meta.validate(&field(path, "meta"), diag);

        check_unique(&self.loads, &field(path, "loads"), diag);
        check_unique(&self.transformers, &field(path, "transformers"), diag);
        check_unique(&self.external_grids, &field(path, "external_grids"), diag);

        validate_each(&self.loads, &field(path, "loads"), diag);
        validate_each(&self.transformers, &field(path, "transformers"), diag);
        validate_each(&self.external_grids, &field(path, "external_grids"), diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantities::multi_phase::{
        ApparentPower, CosPhi, PhaseConnections, Voltage as MultiVoltage,
    };
    use crate::quantities::single_phase::{ApparentPower as ScPower, Voltage};
    use crate::quantities::Phase;
    use crate::topology::{
        GridType, Load as TopologyLoad, LoadModel, LoadSystemType, LoadType, Node, RatedPower,
    };
    use crate::VoltageSystemType;
    use chrono::NaiveDate;

    fn meta() -> Meta {
        Meta::new("test_grid", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    fn topology_with_load(meta: Meta) -> Topology {
        let mut topology = Topology::new(meta);
        topology.nodes = vec![Node::new("Bus 1", Voltage::new(400.0).unwrap())];
        let u_0 = MultiVoltage::new([400.0, 400.0, 400.0]).unwrap();
        topology.loads = vec![TopologyLoad {
            name: "Load 1".into(),
            node: "Bus 1".into(),
            rated_power: RatedPower::from_apparent_power(
                ApparentPower::new([1000.0, 1000.0, 1000.0]).unwrap(),
                CosPhi::new([0.9, 0.9, 0.9]).unwrap(),
            )
            .unwrap(),
            active_power_model: LoadModel::constant_power(u_0.clone()),
            reactive_power_model: LoadModel::constant_power(u_0),
            phase_connections: PhaseConnections::new([
                Some((Phase::A, Phase::N)),
                Some((Phase::B, Phase::N)),
                Some((Phase::C, Phase::N)),
            ])
            .unwrap(),
            phase_connection_type: None,
            type_: LoadType::Consumer,
            system_type: LoadSystemType::FixedConsumption,
            voltage_system_type: VoltageSystemType::Ac,
            description: None,
            optional_data: None,
        }];
        topology.external_grids = vec![crate::topology::ExternalGrid {
            name: "HV Grid".into(),
            node: "Bus 1".into(),
            phases: None,
            type_: GridType::Sl,
            short_circuit_power_max: ScPower::new(1e9).unwrap(),
            short_circuit_power_min: ScPower::new(5e8).unwrap(),
            description: None,
            optional_data: None,
        }];
        topology
    }

    fn matching_case(topology: &Topology) -> SteadystateCase {
        let mut case = SteadystateCase::new(topology.meta.clone());
        case.loads = vec![load::Load {
            name: "Load 1".into(),
            active_power: load::ActivePower { controller: None },
            reactive_power: load::ReactivePower { controller: None },
        }];
        case.external_grids = vec![external_grid::ExternalGrid::new("HV Grid")];
        case
    }

    #[test]
    fn test_matching_case_is_valid() {
        let topology = topology_with_load(meta());
        let case = matching_case(&topology);
        assert!(case.is_valid_topology(&topology));
    }

    #[test]
    fn test_count_mismatch_fails_softly() {
        let topology = topology_with_load(meta());
        let mut case = matching_case(&topology);
        case.loads.clear();
        assert!(!case.is_valid_topology(&topology));
    }

    #[test]
    fn test_missing_name_fails_softly() {
        let topology = topology_with_load(meta());
        let mut case = matching_case(&topology);
        case.loads[0].name = "Load 2".into();
        assert!(!case.is_valid_topology(&topology));
    }

    #[test]
    fn test_meta_mismatch_fails() {
        let topology = topology_with_load(meta());
        // same grid name, but different id and date
        let other = Meta::new("test_grid", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        let case = matching_case(&topology_with_load(other));
        assert!(!case.is_valid_topology(&topology));
    }

    #[test]
    fn test_empty_case_validates() {
        assert!(SteadystateCase::new(meta()).validated().is_ok());
    }
}
