//! Grid topology: the physical structure of a grid.
//!
//! The [`Topology`] aggregate owns its elements by value. Elements refer to
//! each other by name (a branch names its end nodes), never by pointer;
//! resolving such references is an explicit, separate step.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{check_unique, field, validate_each, Diagnostics, Validate};
use crate::meta::Meta;

pub mod branch;
pub mod external_grid;
pub mod load;
pub mod load_model;
pub mod node;
pub mod transformer;

pub use branch::{Branch, BranchType};
pub use external_grid::{ExternalGrid, GridType};
pub use load::{Load, LoadSystemType, LoadType, PhaseConnectionType, RatedPower};
pub use load_model::LoadModel;
pub use node::Node;
pub use transformer::{
    TapSide, Transformer, TransformerPhaseTechnologyType, VectorGroup, Winding,
    WindingVectorGroup,
};

/// The complete physical structure of a grid.
///
/// Every element list is unique by full equality, not just by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub meta: Meta,
    pub branches: Vec<Branch>,
    pub nodes: Vec<Node>,
    pub loads: Vec<Load>,
    pub transformers: Vec<Transformer>,
    pub external_grids: Vec<ExternalGrid>,
}

impl Topology {
    /// Empty topology for the given header.
    pub fn new(meta: Meta) -> Self {
        Self {
            meta,
            branches: Vec::new(),
            nodes: Vec::new(),
            loads: Vec::new(),
            transformers: Vec::new(),
            external_grids: Vec::new(),
        }
    }
}

impl Validate for Topology {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.meta.validate(&field(path, "meta"), diag);

        check_unique(&self.branches, &field(path, "branches"), diag);
        check_unique(&self.nodes, &field(path, "nodes"), diag);
        check_unique(&self.loads, &field(path, "loads"), diag);
        check_unique(&self.transformers, &field(path, "transformers"), diag);
        check_unique(&self.external_grids, &field(path, "external_grids"), diag);

        validate_each(&self.branches, &field(path, "branches"), diag);
        validate_each(&self.nodes, &field(path, "nodes"), diag);
        validate_each(&self.loads, &field(path, "loads"), diag);
        validate_each(&self.transformers, &field(path, "transformers"), diag);
        validate_each(&self.external_grids, &field(path, "external_grids"), diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantities::single_phase::Voltage;
    use chrono::NaiveDate;

    fn meta() -> Meta {
        Meta::new("test_grid", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    #[test]
    fn test_empty_topology_validates() {
        assert!(Topology::new(meta()).validated().is_ok());
    }

    #[test]
    fn test_duplicate_nodes_rejected() {
        let mut topology = Topology::new(meta());
        let node = Node::new("Bus 1", Voltage::new(400.0).unwrap());
        topology.nodes = vec![node.clone(), node];
        assert!(topology.validated().is_err());
    }

    #[test]
    fn test_same_name_different_voltage_is_unique() {
        // uniqueness is by full equality, not by name
        let mut topology = Topology::new(meta());
        topology.nodes = vec![
            Node::new("Bus 1", Voltage::new(400.0).unwrap()),
            Node::new("Bus 1", Voltage::new(20_000.0).unwrap()),
        ];
        assert!(topology.validated().is_ok());
    }

    #[test]
    fn test_nested_issues_carry_paths() {
        let mut topology = Topology::new(meta());
        topology.nodes = vec![Node::new(
            "Bus 1",
            Voltage {
                value: -1.0,
                unit: crate::quantities::Unit::Volt,
                system_type: crate::quantities::SystemType::Natural,
            },
        )];
        let err = topology.validated().unwrap_err();
        let text = err.to_string();
        assert!(text.contains("$.nodes[0].u_n.value"));
    }
}
