//! Grid terminals.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeData;
use crate::diagnostics::{check_unique, field, Diagnostics, Validate};
use crate::quantities::single_phase::Voltage;
use crate::quantities::Phase;

/// A terminal within the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    /// Nominal voltage
    pub u_n: Voltage,
    pub phases: Option<Vec<Phase>>,
    pub description: Option<String>,
    pub optional_data: Option<Vec<AttributeData>>,
}

impl Node {
    pub fn new(name: impl Into<String>, u_n: Voltage) -> Self {
        Self {
            name: name.into(),
            u_n,
            phases: None,
            description: None,
            optional_data: None,
        }
    }

    pub fn with_phases(mut self, phases: impl Into<Vec<Phase>>) -> Self {
        self.phases = Some(phases.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Validate for Node {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.u_n.validate(&field(path, "u_n"), diag);
        if let Some(phases) = &self.phases {
            check_unique(phases, &field(path, "phases"), diag);
        }
        if let Some(data) = &self.optional_data {
            crate::attribute::validate_optional_data(data, path, diag);
        }
    }
}
