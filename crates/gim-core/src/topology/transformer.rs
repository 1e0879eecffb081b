//! Transformers and their windings.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeData;
use crate::diagnostics::{check_unique, field, Diagnostics, Validate};
use crate::quantities::single_phase::{
    Angle, ApparentPower, ImpedanceNat, ImpedancePosSeq, ImpedanceZerSeq, PhaseAngleClock, Voltage,
};
use crate::quantities::Phase;

/// Transformer side the tap changer is installed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TapSide {
    Hv,
    Mv,
    Lv,
}

/// Three- or single-phase transformer construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformerPhaseTechnologyType {
    SinglePhE,
    SinglePh,
    ThreePh,
}

/// Winding connection and phase-shift code of the whole transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VectorGroup {
    Dd0,
    Yy0,
    YNy0,
    Yyn0,
    YNyn0,
    Dz0,
    Dzn0,
    Zd0,
    ZNd0,
    Dyn1,
    Dy5,
    Dyn5,
    Yd5,
    YNd5,
    Yz5,
    YNz5,
    Yzn5,
    YNzn5,
    Dd6,
    Yy6,
    YNy6,
    Yyn6,
    YNyn6,
    Dz6,
    Dzn6,
    Zd6,
    ZNd6,
    Dyn7,
    Dy11,
    Dyn11,
    Yd11,
    YNd11,
    Yz11,
    YNz11,
    Yzn11,
    YNzn11,
}

/// Interconnection of the three phases of a single winding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindingVectorGroup {
    Y,
    YN,
    Z,
    ZN,
    D,
}

/// A winding of a transformer.
///
/// A 2-winding transformer has a high and a low voltage level winding, each
/// characterized by its own vector group and T-representation values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winding {
    pub node: String,
    /// Rated apparent power
    pub s_r: ApparentPower,
    /// Nominal voltage of the connected node
    pub u_n: Voltage,
    /// Rated voltage of the winding itself
    pub u_r: Voltage,
    /// Positive sequence resistance of the T-representation
    pub r1: ImpedancePosSeq,
    /// Positive sequence reactance of the T-representation
    pub x1: ImpedancePosSeq,
    /// Zero sequence resistance
    pub r0: Option<ImpedanceZerSeq>,
    /// Zero sequence reactance
    pub x0: Option<ImpedanceZerSeq>,
    /// Earthing resistance of the neutral point
    pub re: Option<ImpedanceNat>,
    /// Earthing reactance of the neutral point
    pub xe: Option<ImpedanceNat>,
    pub phase_angle_clock: Option<PhaseAngleClock>,
    pub vector_group: Option<WindingVectorGroup>,
    /// Whether the neutral line is connected to the winding
    #[serde(default)]
    pub neutral_connected: bool,
    pub optional_data: Option<Vec<AttributeData>>,
}

impl Validate for Winding {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.s_r.validate(&field(path, "s_r"), diag);
        self.u_n.validate(&field(path, "u_n"), diag);
        self.u_r.validate(&field(path, "u_r"), diag);
        self.r1.validate(&field(path, "r1"), diag);
        self.x1.validate(&field(path, "x1"), diag);
        macro_rules! optional {
            ($($name:ident),*) => {
                $(
                    if let Some(q) = &self.$name {
                        q.validate(&field(path, stringify!($name)), diag);
                    }
                )*
            };
        }
        optional!(r0, x0, re, xe, phase_angle_clock);
        if let Some(data) = &self.optional_data {
            crate::attribute::validate_optional_data(data, path, diag);
        }
    }
}

/// A transformer, consisting of winding elements (2w or 3w), the vector
/// group and the tap-changer control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformer {
    pub name: String,
    pub node_1: String,
    pub node_2: String,
    pub phases_1: Option<Vec<Phase>>,
    pub phases_2: Option<Vec<Phase>>,
    /// Number of parallel units
    #[serde(default = "default_number")]
    pub number: i64,
    /// Wiring connection specifier
    pub vector_group: VectorGroup,
    /// One winding per voltage level
    pub windings: Vec<Winding>,
    /// Positive sequence iron-loss resistance
    pub r_fe1: ImpedancePosSeq,
    /// Positive sequence magnetization reactance
    pub x_h1: ImpedancePosSeq,
    /// Zero sequence iron-loss resistance
    pub r_fe0: Option<ImpedanceZerSeq>,
    /// Zero sequence magnetization reactance
    pub x_h0: Option<ImpedanceZerSeq>,
    pub phase_technology_type: Option<TransformerPhaseTechnologyType>,
    /// Voltage magnitude deviation per tap position change
    pub tap_u_mag: Option<Voltage>,
    /// Voltage angle deviation per tap position change
    pub tap_u_phi: Option<Angle>,
    /// Upper tap position
    pub tap_max: Option<i64>,
    /// Lower tap position
    pub tap_min: Option<i64>,
    /// Tap position at rated transformation ratio
    pub tap_neutral: Option<i64>,
    pub tap_side: Option<TapSide>,
    pub description: Option<String>,
    pub optional_data: Option<Vec<AttributeData>>,
}

fn default_number() -> i64 {
    1
}

impl Validate for Transformer {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        check_unique(&self.windings, &field(path, "windings"), diag);
        for (i, winding) in self.windings.iter().enumerate() {
            winding.validate(&format!("{}[{i}]", field(path, "windings")), diag);
        }
        self.r_fe1.validate(&field(path, "r_fe1"), diag);
        self.x_h1.validate(&field(path, "x_h1"), diag);
        macro_rules! optional {
            ($($name:ident),*) => {
                $(
                    if let Some(q) = &self.$name {
                        q.validate(&field(path, stringify!($name)), diag);
                    }
                )*
            };
        }
        optional!(r_fe0, x_h0, tap_u_mag, tap_u_phi);
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
