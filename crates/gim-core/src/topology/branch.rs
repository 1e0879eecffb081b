//! Lines, cables, couplers and branch fuses.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeData;
use crate::diagnostics::{check_unique, field, Diagnostics, Validate};
use crate::quantities::single_phase::{
    Admittance, AdmittancePosSeq, AdmittanceZerSeq, AdmittanceNat, Current, Frequency, Impedance,
    ImpedanceNat, ImpedancePosSeq, ImpedanceZerSeq, Length, Voltage,
};
use crate::quantities::Phase;
use crate::VoltageSystemType;

/// Kind of branch element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BranchType {
    Line,
    Coupler,
    Fuse,
}

/// A branch between two nodes: a line, a cable, a coupler or a branch fuse.
///
/// Positive-sequence values describe the PI-representation; zero-sequence,
/// neutral and neutral-coupling values are optional refinements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub node_1: String,
    pub node_2: String,
    pub phases_1: Option<Vec<Phase>>,
    pub phases_2: Option<Vec<Phase>>,
    /// Nominal voltage of the connected nodes
    pub u_n: Voltage,
    /// Rated current (thermal limit in continuous operation)
    pub i_r: Option<Current>,
    /// Positive sequence resistance
    pub r1: ImpedancePosSeq,
    /// Positive sequence reactance
    pub x1: ImpedancePosSeq,
    /// Positive sequence conductance
    pub g1: AdmittancePosSeq,
    /// Positive sequence susceptance
    pub b1: AdmittancePosSeq,
    #[serde(rename = "type")]
    pub type_: BranchType,
    pub voltage_system_type: VoltageSystemType,
    /// Zero sequence resistance
    pub r0: Option<ImpedanceZerSeq>,
    /// Zero sequence reactance
    pub x0: Option<ImpedanceZerSeq>,
    /// Zero sequence conductance
    pub g0: Option<AdmittanceZerSeq>,
    /// Zero sequence susceptance
    pub b0: Option<AdmittanceZerSeq>,
    /// Neutral natural values
    pub rn: Option<ImpedanceNat>,
    pub xn: Option<ImpedanceNat>,
    pub gn: Option<AdmittanceNat>,
    pub bn: Option<AdmittanceNat>,
    /// Neutral-line coupling values
    pub rpn: Option<Impedance>,
    pub xpn: Option<Impedance>,
    pub gpn: Option<Admittance>,
    pub bpn: Option<Admittance>,
    /// Nominal frequency the reactance and susceptance values apply to
    pub f_n: Option<Frequency>,
    /// Length of the line the impedance and admittance values apply to
    pub length: Option<Length>,
    pub energized: Option<bool>,
    pub description: Option<String>,
    pub optional_data: Option<Vec<AttributeData>>,
}

impl Validate for Branch {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.u_n.validate(&field(path, "u_n"), diag);
        self.r1.validate(&field(path, "r1"), diag);
        self.x1.validate(&field(path, "x1"), diag);
        self.g1.validate(&field(path, "g1"), diag);
        self.b1.validate(&field(path, "b1"), diag);

        macro_rules! optional {
            ($($name:ident),*) => {
                $(
                    if let Some(q) = &self.$name {
                        q.validate(&field(path, stringify!($name)), diag);
                    }
                )*
            };
        }
        optional!(i_r, r0, x0, g0, b0, rn, xn, gn, bn, rpn, xpn, gpn, bpn, f_n, length);

        if let Some(phases) = &self.phases_1 {
            check_unique(phases, &field(path, "phases_1"), diag);
        }
        if let Some(phases) = &self.phases_2 {
            check_unique(phases, &field(path, "phases_2"), diag);
        }
        if let Some(data) = &self.optional_data {
            crate::attribute::validate_optional_data(data, path, diag);
        }
    }
}
