//! Topology cases: which elements are in or out of service.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeData;
use crate::diagnostics::{check_unique, field, validate_each, Diagnostics, Validate};
use crate::meta::Meta;
use crate::topology::Topology;

/// State of an element which is (partly) disconnected or out of service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementState {
    pub name: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub open_switches: Vec<String>,
    pub optional_data: Option<Vec<AttributeData>>,
}

impl ElementState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disabled: false,
            open_switches: Vec::new(),
            optional_data: None,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn with_open_switches(mut self, switches: impl Into<Vec<String>>) -> Self {
        self.open_switches = switches.into();
        self
    }
}

impl Validate for ElementState {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        if let Some(data) = &self.optional_data {
            crate::attribute::validate_optional_data(data, path, diag);
        }
    }
}

/// A unique topology case of the grid, characterized by the elements that
/// deviate from their nominal in-service state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyCase {
    pub meta: Meta,
    pub elements: Vec<ElementState>,
}

impl TopologyCase {
    pub fn new(meta: Meta) -> Self {
        Self {
            meta,
            elements: Vec::new(),
        }
    }

    /// Check that this case belongs to `topology`.
    ///
    /// The metadata must compare equal and every element named in the case
    /// must exist in the topology (among loads, transformers, nodes,
    /// branches and external grids by name). Mismatches are logged and
    /// reported as `false`; this never fails hard.
    pub fn matches_topology(&self, topology: &Topology) -> bool {
        tracing::info!("Verifying topology case ...");
        if topology.meta != self.meta {
            tracing::error!("Metadata does not match.");
            return false;
        }

        for element in &self.elements {
            if !Self::is_topology_element(&element.name, topology) {
                tracing::error!(
                    element_name = %element.name,
                    "Element is not in topology."
                );
                return false;
            }
        }

        tracing::info!("Verifying topology case was successful.");
        true
    }

    fn is_topology_element(name: &str, topology: &Topology) -> bool {
        topology.loads.iter().any(|e| e.name == name)
            || topology.transformers.iter().any(|e| e.name == name)
            || topology.nodes.iter().any(|e| e.name == name)
            || topology.branches.iter().any(|e| e.name == name)
            || topology.external_grids.iter().any(|e| e.name == name)
    }
}

impl Validate for TopologyCase {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.meta.validate(&field(path, "meta"), diag);
        check_unique(&self.elements, &field(path, "elements"), diag);
        validate_each(&self.elements, &field(path, "elements"), diag);
    }
}
