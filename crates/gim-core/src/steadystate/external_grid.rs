//! External grid operating points.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{field, Diagnostics, Validate};
use crate::quantities::multi_phase::{ActivePower, Angle, ReactivePower, Voltage};

/// Operating point of an external grid or a grid substitute equivalent,
/// keyed by the grid's name in the topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalGrid {
    pub name: String,
    pub u_0: Option<Voltage>,
    pub phi_0: Option<Angle>,
    pub p_0: Option<ActivePower>,
    pub q_0: Option<ReactivePower>,
}

impl ExternalGrid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            u_0: None,
            phi_0: None,
            p_0: None,
            q_0: None,
        }
    }
}

impl Validate for ExternalGrid {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        if let Some(u_0) = &self.u_0 {
            u_0.validate(&field(path, "u_0"), diag);
        }
        if let Some(phi_0) = &self.phi_0 {
            phi_0.validate(&field(path, "phi_0"), diag);
        }
        if let Some(p_0) = &self.p_0 {
            p_0.validate(&field(path, "p_0"), diag);
        }
        if let Some(q_0) = &self.q_0 {
            q_0.validate(&field(path, "q_0"), diag);
        }
    }
}
