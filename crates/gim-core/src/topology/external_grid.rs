//! External grids and grid substitute equivalents.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeData;
use crate::diagnostics::{check_unique, field, Diagnostics, Validate};
use crate::quantities::single_phase::ApparentPower;
use crate::quantities::Phase;

/// Node behavior of the external grid in load-flow terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridType {
    /// Slack node: voltage amplitude and phase angle are fixed
    Sl,
    /// Active power and voltage amplitude are fixed
    Pv,
    /// Active power and reactive power are fixed
    Pq,
}

/// An external grid or a grid substitute equivalent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalGrid {
    pub name: String,
    pub node: String,
    pub phases: Option<Vec<Phase>>,
    #[serde(rename = "type")]
    pub type_: GridType,
    pub short_circuit_power_max: ApparentPower,
    pub short_circuit_power_min: ApparentPower,
    pub description: Option<String>,
    pub optional_data: Option<Vec<AttributeData>>,
}

impl Validate for ExternalGrid {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.short_circuit_power_max
            .validate(&field(path, "short_circuit_power_max"), diag);
        self.short_circuit_power_min
            .validate(&field(path, "short_circuit_power_min"), diag);
        if let Some(phases) = &self.phases {
            check_unique(phases, &field(path, "phases"), diag);
        }
        if let Some(data) = &self.optional_data {
            crate::attribute::validate_optional_data(data, path, diag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_grid_round_trip() {
        let grid = ExternalGrid {
            name: "HV Grid".into(),
            node: "Bus 1".into(),
            phases: Some(vec![Phase::A, Phase::B, Phase::C]),
            type_: GridType::Sl,
            short_circuit_power_max: ApparentPower::new(1e9).unwrap(),
            short_circuit_power_min: ApparentPower::new(5e8).unwrap(),
            description: None,
            optional_data: None,
        };
        assert!(grid.clone().validated().is_ok());

        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["type"], "SL");

        let back: ExternalGrid =
            serde_json::from_str(&serde_json::to_string(&grid).unwrap()).unwrap();
        assert_eq!(grid, back);
    }
}
