//! Load operating points.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{field, Diagnostics, Validate};
use crate::steadystate::controller::{PController, QController};

/// Active power operating point of a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePower {
    pub controller: Option<PController>,
}

impl Validate for ActivePower {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        if let Some(controller) = &self.controller {
            controller.validate(&field(path, "controller"), diag);
        }
    }
}

/// Reactive power operating point of a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactivePower {
    pub controller: Option<QController>,
}

impl Validate for ReactivePower {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        if let Some(controller) = &self.controller {
            controller.validate(&field(path, "controller"), diag);
        }
    }
}

/// Operating point of a load, keyed by the load's name in the topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub name: String,
    pub active_power: ActivePower,
    pub reactive_power: ReactivePower,
}

impl Validate for Load {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.active_power
            .validate(&field(path, "active_power"), diag);
        self.reactive_power
            .validate(&field(path, "reactive_power"), diag);
    }
}
