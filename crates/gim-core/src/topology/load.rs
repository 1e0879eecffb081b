//! Loads and generating assets connected to the grid.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeData;
use crate::diagnostics::{field, Diagnostics, Validate};
use crate::error::GimResult;
use crate::quantities::multi_phase::{
    ActivePower, ApparentPower, CosPhi, PhaseConnections, ReactivePower,
};
use crate::quantities::{precision, round_to};
use crate::topology::load_model::LoadModel;
use crate::VoltageSystemType;

/// Role of the asset in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadType {
    Consumer,
    Producer,
    Prosumer,
    Shunt,
    Storage,
}

/// Technology of the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadSystemType {
    BatteryStorage,
    Biogas,
    ChargingPoint,
    Coal,
    Diesel,
    ExternalGridEquivalent,
    FilterC,
    FilterHarmonic,
    FilterRl,
    FilterRlc,
    FilterRlccrp,
    FilterRlcrp,
    FixedConsumption,
    Fuelcell,
    Gas,
    HeatPump,
    Hvac,
    Hvdc,
    Hydro,
    NightStorage,
    Nuclear,
    Oil,
    Other,
    Peat,
    PumpStorage,
    Pv,
    ReactivePowerCompensator,
    RenewableEnergy,
    Solar,
    StatGen,
    StaticVarSystem,
    VariableConsumption,
    Wind,
}

/// How the asset's phases are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseConnectionType {
    OnePhPhE,
    OnePhPhN,
    OnePhPhPh,
    ThreePhD,
    ThreePhPhE,
    ThreePhYn,
    TwoPhPhE,
    TwoPhYn,
}

/// Rated power of a load, specified per phase by apparent power, active
/// power, reactive power and power factor.
///
/// Prefer [`RatedPower::from_apparent_power`], which derives the active and
/// reactive components from apparent power and power factor so the four
/// tuples cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedPower {
    pub apparent_power: ApparentPower,
    pub active_power: ActivePower,
    pub reactive_power: ReactivePower,
    pub cos_phi: CosPhi,
}

impl RatedPower {
    /// Derive the active and reactive components from apparent power and
    /// power factor.
    pub fn from_apparent_power(apparent_power: ApparentPower, cos_phi: CosPhi) -> GimResult<Self> {
        let active = apparent_power
            .value
            .iter()
            .zip(cos_phi.value.iter())
            .map(|(s, c)| round_to(s * c, precision::POWER))
            .collect::<Vec<_>>();
        let reactive = apparent_power
            .value
            .iter()
            .zip(cos_phi.value.iter())
            .map(|(s, c)| round_to(s * c.acos().sin(), precision::POWER))
            .collect::<Vec<_>>();

        Self {
            apparent_power,
            active_power: ActivePower::new(active)?,
            reactive_power: ReactivePower::new(reactive)?,
            cos_phi,
        }
        .validated()
    }

    pub fn n_phases(&self) -> usize {
        self.cos_phi.value.len()
    }

    /// True when both the apparent power and the power factor are equal on
    /// every phase.
    pub fn is_symmetrical(&self) -> bool {
        self.apparent_power.is_symmetrical() && self.cos_phi.is_symmetrical()
    }

    /// Overall power factor across all phases.
    pub fn cos_phi_total(&self) -> f64 {
        let active: f64 = self.active_power.value.iter().sum();
        let apparent: f64 = self.apparent_power.value.iter().sum();
        let total = active / apparent;
        if total.is_finite() {
            round_to(total, CosPhi::PRECISION)
        } else {
            f64::NAN
        }
    }
}

impl Validate for RatedPower {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.apparent_power
            .validate(&field(path, "apparent_power"), diag);
        self.active_power
            .validate(&field(path, "active_power"), diag);
        self.reactive_power
            .validate(&field(path, "reactive_power"), diag);
        self.cos_phi.validate(&field(path, "cos_phi"), diag);

        let n = self.apparent_power.value.len();
        if self.active_power.value.len() != n
            || self.reactive_power.value.len() != n
            || self.cos_phi.value.len() != n
        {
            diag.add_error(
                "invariant",
                path,
                "apparent power, active power, reactive power and cos phi must have the same phase count",
            );
        }
    }
}

/// A load or generating asset.
///
/// Characterized by the load models of active and reactive power, the
/// connected phases and the role of the asset itself (consumer, producer,
/// storage or passive shunt).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub name: String,
    pub node: String,
    pub rated_power: RatedPower,
    pub active_power_model: LoadModel,
    pub reactive_power_model: LoadModel,
    pub phase_connections: PhaseConnections,
    pub phase_connection_type: Option<PhaseConnectionType>,
    #[serde(rename = "type")]
    pub type_: LoadType,
    pub system_type: LoadSystemType,
    pub voltage_system_type: VoltageSystemType,
    pub description: Option<String>,
    pub optional_data: Option<Vec<AttributeData>>,
}

impl Validate for Load {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.rated_power.validate(&field(path, "rated_power"), diag);
        self.active_power_model
            .validate(&field(path, "active_power_model"), diag);
        self.reactive_power_model
            .validate(&field(path, "reactive_power_model"), diag);
        self.phase_connections
            .validate(&field(path, "phase_connections"), diag);

        if self.rated_power.n_phases() != self.phase_connections.n_phases() {
            diag.add_error(
                "invariant",
                path,
                format!(
                    "rated power has {} phases but {} phase connections are declared",
                    self.rated_power.n_phases(),
                    self.phase_connections.n_phases()
                ),
            );
        }
        if let Some(data) = &self.optional_data {
            crate::attribute::validate_optional_data(data, path, diag);
        }
    }
}
