//! Multi-phase quantities.
//!
//! A multi-phase quantity holds one value per phase, ordered with phase A
//! first, and is always expressed in the natural frame. Symmetry, phase
//! count, averages and totals are derived from the stored tuple on demand;
//! they are never stored, so they cannot drift from the data.

use serde::ser::SerializeStruct;
use serde::Deserialize;

use crate::diagnostics::{field, Diagnostics, Validate};
use crate::error::{GimError, GimResult};
use crate::quantities::{
    precision, round_to, Domain, Phase, PowerFactorDirection, PowerType, RoundedSeq, SystemType,
    Unit,
};

/// Acceptable distance between a declared three-phase total and the sum of
/// per-phase values: 0.5 absorbs the worst-case rounding of the declared
/// value, plus a small epsilon for accumulated floating-point error. Tunable;
/// not precision math.
pub const TOTAL_THRESHOLD: f64 = 0.51;

/// Per-phase power values with a kind tag, as consumed by the weighted
/// power-factor averages and the polynomial load model.
pub trait PhasePower {
    fn power_type(&self) -> PowerType;
    fn unit(&self) -> Unit;
    /// Values per phase, phase A first.
    fn phase_values(&self) -> &[f64];

    fn n_phases(&self) -> usize {
        self.phase_values().len()
    }

    /// Sum over phases, rounded to the power precision.
    fn total(&self) -> f64 {
        round_to(self.phase_values().iter().sum(), precision::POWER)
    }

    /// Soft check of an externally declared total against the per-phase sum.
    fn matches_declared_total(&self, declared: f64) -> bool {
        (declared - self.phase_values().iter().sum::<f64>()).abs() <= TOTAL_THRESHOLD
    }
}

fn is_symmetrical(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Macro to define a multi-phase quantity with pinned unit and natural
/// system type, plus the derived accessors.
macro_rules! multi_phase_quantity {
    (
        $(#[$doc:meta])*
        $name:ident {
            unit: $unit:ident,
            precision: $prec:expr,
            domain: $domain:expr,
        }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            /// Value per phase, phase A first.
            pub value: Vec<f64>,
            pub unit: Unit,
            pub system_type: SystemType,
        }

        impl $name {
            pub const PRECISION: i32 = $prec;
            pub const UNIT: Unit = Unit::$unit;

            pub fn new(value: impl Into<Vec<f64>>) -> GimResult<Self> {
                Self {
                    value: value.into(),
                    unit: Unit::$unit,
                    system_type: SystemType::Natural,
                }
                .validated()
            }

            pub fn n_phases(&self) -> usize {
                self.value.len()
            }

            /// True when every per-phase value is equal (single-phase
            /// tuples are trivially symmetrical).
            pub fn is_symmetrical(&self) -> bool {
                is_symmetrical(&self.value)
            }

            /// Mean over phases, rounded to the serialization precision.
            pub fn average(&self) -> f64 {
                round_to(
                    self.value.iter().sum::<f64>() / self.value.len() as f64,
                    Self::PRECISION,
                )
            }
        }

        impl Validate for $name {
            fn validate(&self, path: &str, diag: &mut Diagnostics) {
                if self.value.is_empty() {
                    diag.add_error("domain", &field(path, "value"), "at least one phase value is required");
                }
                for (i, v) in self.value.iter().enumerate() {
                    if let Some(msg) = $domain.violation(*v) {
                        diag.add_error("domain", &format!("{}[{i}]", field(path, "value")), msg);
                    }
                }
                if self.unit != Unit::$unit {
                    diag.add_error(
                        "domain",
                        &field(path, "unit"),
                        format!("only {:?} is supported", Unit::$unit),
                    );
                }
                if self.system_type != SystemType::Natural {
                    diag.add_error(
                        "domain",
                        &field(path, "system_type"),
                        format!("only {:?} is supported", SystemType::Natural),
                    );
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut st = serializer.serialize_struct(stringify!($name), 3)?;
                st.serialize_field("value", &RoundedSeq(&self.value, Self::PRECISION))?;
                st.serialize_field("unit", &self.unit)?;
                st.serialize_field("system_type", &self.system_type)?;
                st.end()
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(serde::Deserialize)]
                struct Wire {
                    #[serde(deserialize_with = "crate::quantities::de_values")]
                    value: Vec<f64>,
                    #[serde(default)]
                    unit: Option<Unit>,
                    #[serde(default)]
                    system_type: Option<SystemType>,
                }

                let wire = Wire::deserialize(deserializer)?;
                Ok(Self {
                    value: wire.value,
                    unit: wire.unit.unwrap_or(Unit::$unit),
                    system_type: wire.system_type.unwrap_or(SystemType::Natural),
                })
            }
        }
    };
}

multi_phase_quantity! {
    /// Electrical voltages.
    Voltage {
        unit: Volt,
        precision: precision::VOLTAGE,
        domain: Domain::NonNegative,
    }
}

multi_phase_quantity! {
    /// Electrical currents.
    Current {
        unit: Ampere,
        precision: precision::CURRENT,
        domain: Domain::Any,
    }
}

multi_phase_quantity! {
    /// Angles of a complex quantity.
    Angle {
        unit: Degree,
        precision: precision::ANGLE,
        domain: Domain::Closed(0.0, 360.0),
    }
}

multi_phase_quantity! {
    /// Droops of characteristic curves.
    Droop {
        unit: Unitless,
        precision: precision::PU,
        domain: Domain::Any,
    }
}

multi_phase_quantity! {
    /// Natural impedances.
    Impedance {
        unit: Ohm,
        precision: precision::IMPEDANCE,
        domain: Domain::NonNegative,
    }
}

/// Base class for per-phase power quantities with a free power type.
///
/// Comes with the derived `total` over all phases, which is the value to use
/// for symmetrical calculations.
#[derive(Debug, Clone, PartialEq)]
pub struct Power {
    /// Value per phase, phase A first.
    pub value: Vec<f64>,
    pub power_type: PowerType,
    pub unit: Unit,
    pub system_type: SystemType,
}

impl Power {
    pub const PRECISION: i32 = precision::POWER;

    pub fn new(value: impl Into<Vec<f64>>, power_type: PowerType, unit: Unit) -> GimResult<Self> {
        Self {
            value: value.into(),
            power_type,
            unit,
            system_type: SystemType::Natural,
        }
        .validated()
    }

    pub fn n_phases(&self) -> usize {
        self.value.len()
    }

    pub fn is_symmetrical(&self) -> bool {
        is_symmetrical(&self.value)
    }

    pub fn average(&self) -> f64 {
        round_to(
            self.value.iter().sum::<f64>() / self.value.len() as f64,
            Self::PRECISION,
        )
    }

    /// Total power over all phases, rounded to the power precision.
    pub fn total(&self) -> f64 {
        round_to(self.value.iter().sum(), Self::PRECISION)
    }
}

impl PhasePower for Power {
    fn power_type(&self) -> PowerType {
        self.power_type
    }

    fn unit(&self) -> Unit {
        self.unit
    }

    fn phase_values(&self) -> &[f64] {
        &self.value
    }
}

impl Validate for Power {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        if self.value.is_empty() {
            diag.add_error(
                "domain",
                &field(path, "value"),
                "at least one phase value is required",
            );
        }
        if self.system_type != SystemType::Natural {
            diag.add_error(
                "domain",
                &field(path, "system_type"),
                format!("only {:?} is supported", SystemType::Natural),
            );
        }
    }
}

impl serde::Serialize for Power {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Power", 4)?;
        st.serialize_field("value", &RoundedSeq(&self.value, Self::PRECISION))?;
        st.serialize_field("power_type", &self.power_type)?;
        st.serialize_field("unit", &self.unit)?;
        st.serialize_field("system_type", &self.system_type)?;
        st.end()
    }
}

impl<'de> serde::Deserialize<'de> for Power {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Wire {
            #[serde(deserialize_with = "crate::quantities::de_values")]
            value: Vec<f64>,
            power_type: PowerType,
            unit: Unit,
            #[serde(default)]
            system_type: Option<SystemType>,
        }

        let wire = Wire::deserialize(deserializer)?;
        Ok(Self {
            value: wire.value,
            power_type: wire.power_type,
            unit: wire.unit,
            system_type: wire.system_type.unwrap_or(SystemType::Natural),
        })
    }
}

/// Macro for per-phase power subtypes that pin both power type and unit.
macro_rules! multi_phase_power {
    (
        $(#[$doc:meta])*
        $name:ident {
            power_type: $ptype:ident,
            unit: $unit:ident,
        }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            /// Value per phase, phase A first.
            pub value: Vec<f64>,
            pub power_type: PowerType,
            pub unit: Unit,
            pub system_type: SystemType,
        }

        impl $name {
            pub const PRECISION: i32 = precision::POWER;
            pub const POWER_TYPE: PowerType = PowerType::$ptype;
            pub const UNIT: Unit = Unit::$unit;

            pub fn new(value: impl Into<Vec<f64>>) -> GimResult<Self> {
                Self {
                    value: value.into(),
                    power_type: PowerType::$ptype,
                    unit: Unit::$unit,
                    system_type: SystemType::Natural,
                }
                .validated()
            }

            pub fn n_phases(&self) -> usize {
                self.value.len()
            }

            pub fn is_symmetrical(&self) -> bool {
                is_symmetrical(&self.value)
            }

            pub fn average(&self) -> f64 {
                round_to(
                    self.value.iter().sum::<f64>() / self.value.len() as f64,
                    Self::PRECISION,
                )
            }

            /// Total power over all phases, rounded to the power precision.
            pub fn total(&self) -> f64 {
                round_to(self.value.iter().sum(), Self::PRECISION)
            }
        }

        impl PhasePower for $name {
            fn power_type(&self) -> PowerType {
                self.power_type
            }

            fn unit(&self) -> Unit {
                self.unit
            }

            fn phase_values(&self) -> &[f64] {
                &self.value
            }
        }

        impl Validate for $name {
            fn validate(&self, path: &str, diag: &mut Diagnostics) {
                if self.value.is_empty() {
                    diag.add_error(
                        "domain",
                        &field(path, "value"),
                        "at least one phase value is required",
                    );
                }
                if self.power_type != PowerType::$ptype {
                    diag.add_error(
                        "domain",
                        &field(path, "power_type"),
                        format!("only {:?} is supported", PowerType::$ptype),
                    );
                }
                if self.unit != Unit::$unit {
                    diag.add_error(
                        "domain",
                        &field(path, "unit"),
                        format!("only {:?} is supported", Unit::$unit),
                    );
                }
                if self.system_type != SystemType::Natural {
                    diag.add_error(
                        "domain",
                        &field(path, "system_type"),
                        format!("only {:?} is supported", SystemType::Natural),
                    );
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut st = serializer.serialize_struct(stringify!($name), 4)?;
                st.serialize_field("value", &RoundedSeq(&self.value, Self::PRECISION))?;
                st.serialize_field("power_type", &self.power_type)?;
                st.serialize_field("unit", &self.unit)?;
                st.serialize_field("system_type", &self.system_type)?;
                st.end()
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(serde::Deserialize)]
                struct Wire {
                    #[serde(deserialize_with = "crate::quantities::de_values")]
                    value: Vec<f64>,
                    #[serde(default)]
                    power_type: Option<PowerType>,
                    #[serde(default)]
                    unit: Option<Unit>,
                    #[serde(default)]
                    system_type: Option<SystemType>,
                }

                let wire = Wire::deserialize(deserializer)?;
                Ok(Self {
                    value: wire.value,
                    power_type: wire.power_type.unwrap_or(PowerType::$ptype),
                    unit: wire.unit.unwrap_or(Unit::$unit),
                    system_type: wire.system_type.unwrap_or(SystemType::Natural),
                })
            }
        }
    };
}

multi_phase_power! {
    /// Electrical active powers.
    ActivePower {
        power_type: AcActive,
        unit: Watt,
    }
}

multi_phase_power! {
    /// Electrical apparent powers.
    ApparentPower {
        power_type: AcApparent,
        unit: VoltAmpere,
    }
}

multi_phase_power! {
    /// Electrical reactive powers.
    ReactivePower {
        power_type: AcReactive,
        unit: VoltampereReactive,
    }
}

/// Macro for per-phase power factors (unitless, with excitation direction).
macro_rules! multi_phase_factor {
    (
        $(#[$doc:meta])*
        $name:ident { domain: $domain:expr }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            /// Value per phase, phase A first.
            pub value: Vec<f64>,
            pub direction: PowerFactorDirection,
            pub unit: Unit,
            pub system_type: SystemType,
        }

        impl $name {
            pub const PRECISION: i32 = precision::POWERFACTOR;

            pub fn new(value: impl Into<Vec<f64>>) -> GimResult<Self> {
                Self {
                    value: value.into(),
                    direction: PowerFactorDirection::Nd,
                    unit: Unit::Unitless,
                    system_type: SystemType::Natural,
                }
                .validated()
            }

            /// Set the excitation direction.
            pub fn with_direction(mut self, direction: PowerFactorDirection) -> Self {
                self.direction = direction;
                self
            }

            pub fn n_phases(&self) -> usize {
                self.value.len()
            }

            pub fn is_symmetrical(&self) -> bool {
                is_symmetrical(&self.value)
            }

            pub fn average(&self) -> f64 {
                round_to(
                    self.value.iter().sum::<f64>() / self.value.len() as f64,
                    Self::PRECISION,
                )
            }
        }

        impl Validate for $name {
            fn validate(&self, path: &str, diag: &mut Diagnostics) {
                if self.value.is_empty() {
                    diag.add_error(
                        "domain",
                        &field(path, "value"),
                        "at least one phase value is required",
                    );
                }
                for (i, v) in self.value.iter().enumerate() {
                    if let Some(msg) = $domain.violation(*v) {
                        diag.add_error("domain", &format!("{}[{i}]", field(path, "value")), msg);
                    }
                }
                if self.unit != Unit::Unitless {
                    diag.add_error(
                        "domain",
                        &field(path, "unit"),
                        format!("only {:?} is supported", Unit::Unitless),
                    );
                }
                if self.system_type != SystemType::Natural {
                    diag.add_error(
                        "domain",
                        &field(path, "system_type"),
                        format!("only {:?} is supported", SystemType::Natural),
                    );
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut st = serializer.serialize_struct(stringify!($name), 4)?;
                st.serialize_field("value", &RoundedSeq(&self.value, Self::PRECISION))?;
                st.serialize_field("direction", &self.direction)?;
                st.serialize_field("unit", &self.unit)?;
                st.serialize_field("system_type", &self.system_type)?;
                st.end()
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(serde::Deserialize)]
                struct Wire {
                    #[serde(deserialize_with = "crate::quantities::de_values")]
                    value: Vec<f64>,
                    #[serde(default)]
                    direction: Option<PowerFactorDirection>,
                    #[serde(default)]
                    unit: Option<Unit>,
                    #[serde(default)]
                    system_type: Option<SystemType>,
                }

                let wire = Wire::deserialize(deserializer)?;
                Ok(Self {
                    value: wire.value,
                    direction: wire.direction.unwrap_or(PowerFactorDirection::Nd),
                    unit: wire.unit.unwrap_or(Unit::Unitless),
                    system_type: wire.system_type.unwrap_or(SystemType::Natural),
                })
            }
        }
    };
}

multi_phase_factor! {
    /// Power factors, e.g. cos(phi) or tan(phi).
    PowerFactor { domain: Domain::NonNegative }
}

multi_phase_factor! {
    /// Power factors as cos(phi).
    CosPhi { domain: Domain::Closed(0.0, 1.0) }
}

multi_phase_factor! {
    /// Power factors as tan(phi).
    TanPhi { domain: Domain::NonNegative }
}

impl CosPhi {
    /// Weighted average power factor over the phases of `power`.
    ///
    /// The closed form depends on the kind of power provided; power types
    /// without a phi relationship yield NaN (undefined, not invalid), as do
    /// NaN operands and would-be zero divisions.
    pub fn weighted_average<P: PhasePower>(&self, power: &P) -> GimResult<f64> {
        let values = power.phase_values();
        if values.len() != self.value.len() {
            return Err(GimError::LengthMismatch {
                expected: self.value.len(),
                actual: values.len(),
            });
        }

        let pairs = || values.iter().zip(self.value.iter());
        let result = match power.power_type() {
            PowerType::AcActive => {
                let apparent: f64 = pairs().map(|(p, c)| p / c).sum();
                power.total() / apparent
            }
            PowerType::AcApparent => {
                let active: f64 = pairs().map(|(p, c)| p * c).sum();
                active / power.total()
            }
            PowerType::AcReactive => {
                let active: f64 = pairs().map(|(p, c)| p / c.acos().tan()).sum();
                let apparent: f64 = pairs().map(|(p, c)| p / c.acos().sin()).sum();
                active / apparent
            }
            _ => f64::NAN,
        };

        Ok(if result.is_finite() {
            round_to(result, Self::PRECISION)
        } else {
            f64::NAN
        })
    }
}

impl TanPhi {
    /// Weighted average power factor over the phases of `power`.
    ///
    /// See [`CosPhi::weighted_average`] for the NaN policy.
    pub fn weighted_average<P: PhasePower>(&self, power: &P) -> GimResult<f64> {
        let values = power.phase_values();
        if values.len() != self.value.len() {
            return Err(GimError::LengthMismatch {
                expected: self.value.len(),
                actual: values.len(),
            });
        }

        let pairs = || values.iter().zip(self.value.iter());
        let result = match power.power_type() {
            PowerType::AcActive => {
                let reactive: f64 = pairs().map(|(p, t)| p * t).sum();
                reactive / power.total()
            }
            PowerType::AcApparent => {
                let reactive: f64 = pairs().map(|(p, t)| p * t.atan().sin()).sum();
                let active: f64 = pairs().map(|(p, t)| p * t.atan().cos()).sum();
                reactive / active
            }
            PowerType::AcReactive => {
                let active: f64 = pairs().map(|(p, t)| p / t).sum();
                power.total() / active
            }
            _ => f64::NAN,
        };

        Ok(if result.is_finite() {
            round_to(result, Self::PRECISION)
        } else {
            f64::NAN
        })
    }
}

/// Pair of phases an element is connected between, or `None` for an
/// unconnected slot.
pub type PhaseConnection = Option<(Phase, Phase)>;

/// Phases between which an element is connected,
/// e.g. `[(A,E), (B,E), (C,E)]` or `[(A,B), (B,C), (C,A)]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseConnections {
    pub value: Vec<PhaseConnection>,
}

impl PhaseConnections {
    pub fn new(value: impl Into<Vec<PhaseConnection>>) -> GimResult<Self> {
        Self {
            value: value.into(),
        }
        .validated()
    }

    pub fn n_phases(&self) -> usize {
        self.value.len()
    }
}

impl Validate for PhaseConnections {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        if self.value.is_empty() {
            diag.add_error(
                "domain",
                &field(path, "value"),
                "at least one phase connection is required",
            );
        }
        crate::diagnostics::check_unique(&self.value, &field(path, "value"), diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetry_and_phase_count() {
        let v = Voltage::new([230.0, 230.0, 230.0]).unwrap();
        assert!(v.is_symmetrical());
        assert_eq!(v.n_phases(), 3);

        let v = Voltage::new([230.0, 231.0, 230.0]).unwrap();
        assert!(!v.is_symmetrical());

        let v = Voltage::new([230.0]).unwrap();
        assert!(v.is_symmetrical());
        assert_eq!(v.n_phases(), 1);
    }

    #[test]
    fn test_empty_tuple_rejected() {
        assert!(Voltage::new([]).is_err());
        assert!(ActivePower::new([]).is_err());
    }

    #[test]
    fn test_total_rounds_to_power_precision() {
        let p = ActivePower::new([100.04, 200.04, 300.04]).unwrap();
        assert_eq!(p.total(), 600.1);
    }

    #[test]
    fn test_average() {
        let v = Voltage::new([230.0, 231.0, 233.0]).unwrap();
        assert_eq!(v.average(), 231.33);
    }

    #[test]
    fn test_declared_total_tolerance() {
        let p = ActivePower::new([100.0, 200.0, 300.0]).unwrap();
        assert!(p.matches_declared_total(600.0));
        assert!(p.matches_declared_total(600.5));
        assert!(!p.matches_declared_total(601.0));
    }

    #[test]
    fn test_weighted_average_ac_active() {
        let cp = CosPhi::new([0.9, 0.8, 0.7]).unwrap();
        let p = ActivePower::new([100.0, 200.0, 300.0]).unwrap();
        assert_eq!(cp.weighted_average(&p).unwrap(), 0.7597990);
    }

    #[test]
    fn test_weighted_average_ac_apparent() {
        let cp = CosPhi::new([0.9, 0.8, 0.7]).unwrap();
        let p = ApparentPower::new([100.0, 200.0, 300.0]).unwrap();
        assert_eq!(cp.weighted_average(&p).unwrap(), 0.7666667);
    }

    #[test]
    fn test_weighted_average_ac_reactive() {
        let cp = CosPhi::new([0.9, 0.8, 0.7]).unwrap();
        let p = ReactivePower::new([100.0, 200.0, 300.0]).unwrap();
        assert_eq!(cp.weighted_average(&p).unwrap(), 0.7806001);
    }

    #[test]
    fn test_weighted_average_undefined_power_type() {
        let cp = CosPhi::new([0.9, 0.8, 0.7]).unwrap();
        let p = Power::new([100.0, 200.0, 300.0], PowerType::Dc, Unit::Watt).unwrap();
        assert!(cp.weighted_average(&p).unwrap().is_nan());
    }

    #[test]
    fn test_weighted_average_length_mismatch() {
        let cp = CosPhi::new([0.9, 0.8, 0.7]).unwrap();
        let p = ActivePower::new([100.0, 200.0]).unwrap();
        assert!(matches!(
            cp.weighted_average(&p),
            Err(GimError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_weighted_average_zero_total_is_nan() {
        let cp = CosPhi::new([0.9, 0.8, 0.7]).unwrap();
        let p = ApparentPower::new([0.0, 0.0, 0.0]).unwrap();
        assert!(cp.weighted_average(&p).unwrap().is_nan());
    }

    #[test]
    fn test_weighted_average_nan_propagates() {
        let cp = CosPhi::new([0.9, f64::NAN, 0.7]).unwrap();
        let p = ActivePower::new([100.0, 200.0, 300.0]).unwrap();
        assert!(cp.weighted_average(&p).unwrap().is_nan());
    }

    #[test]
    fn test_tan_phi_weighted_average_ac_active() {
        let tp = TanPhi::new([0.5, 0.5, 0.5]).unwrap();
        let p = ActivePower::new([100.0, 200.0, 300.0]).unwrap();
        // sum(p_i * t_i) / total = 300 / 600
        assert_eq!(tp.weighted_average(&p).unwrap(), 0.5);
    }

    #[test]
    fn test_tan_phi_weighted_average_ac_reactive() {
        let tp = TanPhi::new([0.5, 0.5, 0.5]).unwrap();
        let q = ReactivePower::new([100.0, 100.0, 100.0]).unwrap();
        // total / sum(p_i / t_i) = 300 / 600
        assert_eq!(tp.weighted_average(&q).unwrap(), 0.5);
    }

    #[test]
    fn test_cos_phi_domain() {
        assert!(CosPhi::new([0.9, 1.01, 0.7]).is_err());
        assert!(CosPhi::new([f64::NAN, 0.8, 0.7]).is_ok());
    }

    #[test]
    fn test_phase_connections() {
        let pc = PhaseConnections::new([
            Some((Phase::A, Phase::E)),
            Some((Phase::B, Phase::E)),
            Some((Phase::C, Phase::E)),
        ])
        .unwrap();
        assert_eq!(pc.n_phases(), 3);

        assert!(PhaseConnections::new([]).is_err());
        assert!(PhaseConnections::new([
            Some((Phase::A, Phase::E)),
            Some((Phase::A, Phase::E)),
        ])
        .is_err());
    }

    #[test]
    fn test_serialization_rounds_per_phase() {
        let v = Voltage::new([230.004, 230.006, 230.0]).unwrap();
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["value"][0], 230.0);
        assert_eq!(json["value"][1], 230.01);
        assert_eq!(json["unit"], "VOLT");
        assert_eq!(json["system_type"], "NATURAL");
    }
}
