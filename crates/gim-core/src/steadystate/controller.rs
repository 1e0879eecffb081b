//! P and Q controllers of steady-state operating points.
//!
//! A controller pairs a target node with exactly one control mode out of a
//! closed set. Modes are a tagged union discriminated by `control_strategy`
//! on the wire, so matching on them is exhaustive at compile time.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{field, Diagnostics, Validate};
use crate::quantities::multi_phase::{ActivePower, CosPhi, Droop, ReactivePower, TanPhi, Voltage};
use crate::quantities::single_phase::Frequency;
use crate::steadystate::characteristic::Characteristic;

/// Self-reported control strategy of a control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlStrategy {
    UConst,
    CosphiConst,
    QConst,
    #[serde(rename = "Q_U")]
    QU,
    #[serde(rename = "Q_P")]
    QP,
    CosphiP,
    CosphiU,
    TanphiConst,
    PConst,
    #[serde(rename = "P_F")]
    PF,
    Nd,
}

/// Voltage reference measured by a U-controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlledVoltageRef {
    PosSeq,
    Avg,
    A,
    B,
    C,
    #[serde(rename = "AB")]
    Ab,
    #[serde(rename = "BC")]
    Bc,
    #[serde(rename = "CA")]
    Ca,
}

/// Q-setpoint control mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlQConst {
    /// Reactive power setpoint, counted demand based
    pub q_set: ReactivePower,
}

impl Validate for ControlQConst {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.q_set.validate(&field(path, "q_set"), diag);
    }
}

/// U-setpoint control mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlUConst {
    /// Voltage setpoint
    pub u_set: Voltage,
    /// Voltage reference
    #[serde(default = "default_u_meas_ref")]
    pub u_meas_ref: ControlledVoltageRef,
}

fn default_u_meas_ref() -> ControlledVoltageRef {
    ControlledVoltageRef::PosSeq
}

impl Validate for ControlUConst {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.u_set.validate(&field(path, "u_set"), diag);
    }
}

/// tan(phi) control mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlTanPhiConst {
    /// tan(phi) for the calculation of Q in relation to P
    pub tan_phi_set: TanPhi,
}

impl Validate for ControlTanPhiConst {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.tan_phi_set.validate(&field(path, "tan_phi_set"), diag);
    }
}

/// cos(phi) control mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlCosPhiConst {
    /// cos(phi) for the calculation of Q in relation to P
    pub cos_phi_set: CosPhi,
}

impl Validate for ControlCosPhiConst {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.cos_phi_set.validate(&field(path, "cos_phi_set"), diag);
    }
}

/// cos(phi(P)) control mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlCosPhiP {
    /// cos(phi) at the under-excited limit
    pub cos_phi_ue: CosPhi,
    /// cos(phi) at the over-excited limit
    pub cos_phi_oe: CosPhi,
    /// Active power threshold for under-excited operation
    pub p_threshold_ue: ActivePower,
    /// Active power threshold for over-excited operation
    pub p_threshold_oe: ActivePower,
}

impl Validate for ControlCosPhiP {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.cos_phi_ue.validate(&field(path, "cos_phi_ue"), diag);
        self.cos_phi_oe.validate(&field(path, "cos_phi_oe"), diag);
        self.p_threshold_ue
            .validate(&field(path, "p_threshold_ue"), diag);
        self.p_threshold_oe
            .validate(&field(path, "p_threshold_oe"), diag);
    }
}

/// cos(phi(U)) control mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlCosPhiU {
    pub cos_phi_ue: CosPhi,
    pub cos_phi_oe: CosPhi,
    /// Voltage threshold for under-excited operation
    pub u_threshold_ue: Voltage,
    /// Voltage threshold for over-excited operation
    pub u_threshold_oe: Voltage,
    /// Node the voltage is measured at
    pub node_ref_u: String,
}

impl Validate for ControlCosPhiU {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.cos_phi_ue.validate(&field(path, "cos_phi_ue"), diag);
        self.cos_phi_oe.validate(&field(path, "cos_phi_oe"), diag);
        self.u_threshold_ue
            .validate(&field(path, "u_threshold_ue"), diag);
        self.u_threshold_oe
            .validate(&field(path, "u_threshold_oe"), diag);
    }
}

/// Q(U) characteristic control mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlQU {
    /// Droop above the deadband
    pub droop_up: Droop,
    /// Droop below the deadband
    pub droop_low: Droop,
    /// Voltage where Q is zero
    pub u_q0: Voltage,
    /// Width of the upper deadband
    pub u_deadband_up: Voltage,
    /// Width of the lower deadband
    pub u_deadband_low: Voltage,
    /// Under-excited limit of Q, absolute value
    pub q_max_ue: ReactivePower,
    /// Over-excited limit of Q, absolute value
    pub q_max_oe: ReactivePower,
}

impl Validate for ControlQU {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.droop_up.validate(&field(path, "droop_up"), diag);
        self.droop_low.validate(&field(path, "droop_low"), diag);
        self.u_q0.validate(&field(path, "u_q0"), diag);
        self.u_deadband_up
            .validate(&field(path, "u_deadband_up"), diag);
        self.u_deadband_low
            .validate(&field(path, "u_deadband_low"), diag);
        self.q_max_ue.validate(&field(path, "q_max_ue"), diag);
        self.q_max_oe.validate(&field(path, "q_max_oe"), diag);
        check_q_limit(&self.q_max_ue, &field(path, "q_max_ue"), diag);
        check_q_limit(&self.q_max_oe, &field(path, "q_max_oe"), diag);
    }
}

/// Q(P) characteristic control mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlQP {
    pub q_p_characteristic: Characteristic,
    /// Under-excited limit of Q, absolute value
    pub q_max_ue: Option<ReactivePower>,
    /// Over-excited limit of Q, absolute value
    pub q_max_oe: Option<ReactivePower>,
}

impl Validate for ControlQP {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.q_p_characteristic
            .validate(&field(path, "q_p_characteristic"), diag);
        if let Some(q) = &self.q_max_ue {
            q.validate(&field(path, "q_max_ue"), diag);
            check_q_limit(q, &field(path, "q_max_ue"), diag);
        }
        if let Some(q) = &self.q_max_oe {
            q.validate(&field(path, "q_max_oe"), diag);
            check_q_limit(q, &field(path, "q_max_oe"), diag);
        }
    }
}

/// Q limits are absolute values; a negative entry is meaningless.
fn check_q_limit(q: &ReactivePower, path: &str, diag: &mut Diagnostics) {
    for (i, v) in q.value.iter().enumerate() {
        if *v < 0.0 {
            diag.add_error("domain", &format!("{path}.value[{i}]"), "value must be >= 0");
        }
    }
}

/// P-setpoint control mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPConst {
    /// Active power setpoint, counted demand based
    pub p_set: ActivePower,
}

impl Validate for ControlPConst {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.p_set.validate(&field(path, "p_set"), diag);
    }
}

/// P(f) characteristic control mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPF {
    /// Droop above the deadband
    pub droop_up: Droop,
    /// Droop below the deadband
    pub droop_low: Droop,
    /// Frequency where P is unchanged
    pub f_p0: Frequency,
    /// Width of the upper deadband
    pub f_deadband_up: Frequency,
    /// Width of the lower deadband
    pub f_deadband_low: Frequency,
}

impl Validate for ControlPF {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.droop_up.validate(&field(path, "droop_up"), diag);
        self.droop_low.validate(&field(path, "droop_low"), diag);
        self.f_p0.validate(&field(path, "f_p0"), diag);
        self.f_deadband_up
            .validate(&field(path, "f_deadband_up"), diag);
        self.f_deadband_low
            .validate(&field(path, "f_deadband_low"), diag);
    }
}

/// Closed set of reactive power control modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "control_strategy")]
pub enum QControlType {
    #[serde(rename = "Q_CONST")]
    QConst(ControlQConst),
    #[serde(rename = "U_CONST")]
    UConst(ControlUConst),
    #[serde(rename = "TANPHI_CONST")]
    TanPhiConst(ControlTanPhiConst),
    #[serde(rename = "COSPHI_CONST")]
    CosPhiConst(ControlCosPhiConst),
    #[serde(rename = "COSPHI_P")]
    CosPhiP(ControlCosPhiP),
    #[serde(rename = "COSPHI_U")]
    CosPhiU(ControlCosPhiU),
    #[serde(rename = "Q_U")]
    QU(ControlQU),
    #[serde(rename = "Q_P")]
    QP(ControlQP),
}

impl QControlType {
    pub fn control_strategy(&self) -> ControlStrategy {
        match self {
            QControlType::QConst(_) => ControlStrategy::QConst,
            QControlType::UConst(_) => ControlStrategy::UConst,
            QControlType::TanPhiConst(_) => ControlStrategy::TanphiConst,
            QControlType::CosPhiConst(_) => ControlStrategy::CosphiConst,
            QControlType::CosPhiP(_) => ControlStrategy::CosphiP,
            QControlType::CosPhiU(_) => ControlStrategy::CosphiU,
            QControlType::QU(_) => ControlStrategy::QU,
            QControlType::QP(_) => ControlStrategy::QP,
        }
    }
}

impl Validate for QControlType {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        match self {
            QControlType::QConst(c) => c.validate(path, diag),
            QControlType::UConst(c) => c.validate(path, diag),
            QControlType::TanPhiConst(c) => c.validate(path, diag),
            QControlType::CosPhiConst(c) => c.validate(path, diag),
            QControlType::CosPhiP(c) => c.validate(path, diag),
            QControlType::CosPhiU(c) => c.validate(path, diag),
            QControlType::QU(c) => c.validate(path, diag),
            QControlType::QP(c) => c.validate(path, diag),
        }
    }
}

/// Closed set of active power control modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "control_strategy")]
pub enum PControlType {
    #[serde(rename = "P_CONST")]
    PConst(ControlPConst),
    #[serde(rename = "P_F")]
    PF(ControlPF),
}

impl PControlType {
    pub fn control_strategy(&self) -> ControlStrategy {
        match self {
            PControlType::PConst(_) => ControlStrategy::PConst,
            PControlType::PF(_) => ControlStrategy::PF,
        }
    }
}

impl Validate for PControlType {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        match self {
            PControlType::PConst(c) => c.validate(path, diag),
            PControlType::PF(c) => c.validate(path, diag),
        }
    }
}

/// Reactive power controller of a load operating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QController {
    /// The controlled node, which can differ from the node the load is
    /// connected to
    pub node_target: String,
    pub control_type: QControlType,
    /// Name of an external controller, if one is in charge
    pub external_controller_name: Option<String>,
}

impl QController {
    pub fn new(node_target: impl Into<String>, control_type: QControlType) -> Self {
        Self {
            node_target: node_target.into(),
            control_type,
            external_controller_name: None,
        }
    }
}

impl Validate for QController {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.control_type
            .validate(&field(path, "control_type"), diag);
    }
}

/// Active power controller of a load operating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PController {
    /// The controlled node, which can differ from the node the load is
    /// connected to
    pub node_target: String,
    pub control_type: PControlType,
    /// Name of an external controller, if one is in charge
    pub external_controller_name: Option<String>,
}

impl PController {
    pub fn new(node_target: impl Into<String>, control_type: PControlType) -> Self {
        Self {
            node_target: node_target.into(),
            control_type,
            external_controller_name: None,
        }
    }
}

impl Validate for PController {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        self.control_type
            .validate(&field(path, "control_type"), diag);
    }
}
