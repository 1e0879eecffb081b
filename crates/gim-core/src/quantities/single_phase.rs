//! Single-phase quantities.
//!
//! One numeric value plus unit and system-type tags. Concrete types pin the
//! unit (and the sequence-component types additionally pin the system type);
//! the pins are type-level constants set by [`new`](Frequency::new) and
//! enforced against whatever a document supplies.

use serde::ser::SerializeStruct;
use serde::Deserialize;

use crate::diagnostics::{field, Diagnostics, Validate};
use crate::error::GimResult;
use crate::quantities::{
    precision, Domain, PowerFactorDirection, PowerType, Rounded, SystemType, Unit,
};

/// Macro to define a single-phase quantity with pinned unit and a numeric
/// domain. `pin_system` controls whether the system-type tag is fixed to the
/// given frame or merely defaults to it.
macro_rules! single_phase_quantity {
    (
        $(#[$doc:meta])*
        $name:ident {
            unit: $unit:ident,
            precision: $prec:expr,
            domain: $domain:expr,
            system_type: $sys:ident,
            pin_system: $pin:literal,
        }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub value: f64,
            pub unit: Unit,
            pub system_type: SystemType,
        }

        impl $name {
            /// Decimal digits kept on the wire.
            pub const PRECISION: i32 = $prec;
            /// The only unit this type admits.
            pub const UNIT: Unit = Unit::$unit;

            /// Construct with the pinned tags, validating the value domain.
            pub fn new(value: f64) -> GimResult<Self> {
                Self {
                    value,
                    unit: Unit::$unit,
                    system_type: SystemType::$sys,
                }
                .validated()
            }
        }

        impl Validate for $name {
            fn validate(&self, path: &str, diag: &mut Diagnostics) {
                if let Some(msg) = $domain.violation(self.value) {
                    diag.add_error("domain", &field(path, "value"), msg);
                }
                if self.unit != Unit::$unit {
                    diag.add_error(
                        "domain",
                        &field(path, "unit"),
                        format!("only {:?} is supported", Unit::$unit),
                    );
                }
                if $pin && self.system_type != SystemType::$sys {
                    diag.add_error(
                        "domain",
                        &field(path, "system_type"),
                        format!("only {:?} is supported", SystemType::$sys),
                    );
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut st = serializer.serialize_struct(stringify!($name), 3)?;
                st.serialize_field("value", &Rounded(self.value, Self::PRECISION))?;
                st.serialize_field("unit", &self.unit)?;
                st.serialize_field("system_type", &self.system_type)?;
                st.end()
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(serde::Deserialize)]
                struct Wire {
                    #[serde(deserialize_with = "crate::quantities::de_value")]
                    value: f64,
                    #[serde(default)]
                    unit: Option<Unit>,
                    #[serde(default)]
                    system_type: Option<SystemType>,
                }

                let wire = Wire::deserialize(deserializer)?;
                Ok(Self {
                    value: wire.value,
                    unit: wire.unit.unwrap_or(Unit::$unit),
                    system_type: wire.system_type.unwrap_or(SystemType::$sys),
                })
            }
        }
    };
}

single_phase_quantity! {
    /// Frequency.
    Frequency {
        unit: Hertz,
        precision: precision::FREQUENCY,
        domain: Domain::NonNegative,
        system_type: Natural,
        pin_system: false,
    }
}

single_phase_quantity! {
    /// Impedance.
    Impedance {
        unit: Ohm,
        precision: precision::IMPEDANCE,
        domain: Domain::NonNegative,
        system_type: Natural,
        pin_system: false,
    }
}

single_phase_quantity! {
    /// Positive sequence impedance.
    ImpedancePosSeq {
        unit: Ohm,
        precision: precision::IMPEDANCE,
        domain: Domain::NonNegative,
        system_type: PositiveSequence,
        pin_system: true,
    }
}

single_phase_quantity! {
    /// Negative sequence impedance.
    ImpedanceNegSeq {
        unit: Ohm,
        precision: precision::IMPEDANCE,
        domain: Domain::NonNegative,
        system_type: NegativeSequence,
        pin_system: true,
    }
}

single_phase_quantity! {
    /// Zero sequence impedance.
    ImpedanceZerSeq {
        unit: Ohm,
        precision: precision::IMPEDANCE,
        domain: Domain::NonNegative,
        system_type: ZeroSequence,
        pin_system: true,
    }
}

single_phase_quantity! {
    /// Natural impedance.
    ImpedanceNat {
        unit: Ohm,
        precision: precision::IMPEDANCE,
        domain: Domain::NonNegative,
        system_type: Natural,
        pin_system: true,
    }
}

single_phase_quantity! {
    /// Admittance.
    Admittance {
        unit: Siemens,
        precision: precision::ADMITTANCE,
        domain: Domain::NonNegative,
        system_type: Natural,
        pin_system: false,
    }
}

single_phase_quantity! {
    /// Positive sequence admittance.
    AdmittancePosSeq {
        unit: Siemens,
        precision: precision::ADMITTANCE,
        domain: Domain::NonNegative,
        system_type: PositiveSequence,
        pin_system: true,
    }
}

single_phase_quantity! {
    /// Negative sequence admittance.
    AdmittanceNegSeq {
        unit: Siemens,
        precision: precision::ADMITTANCE,
        domain: Domain::NonNegative,
        system_type: NegativeSequence,
        pin_system: true,
    }
}

single_phase_quantity! {
    /// Zero sequence admittance.
    AdmittanceZerSeq {
        unit: Siemens,
        precision: precision::ADMITTANCE,
        domain: Domain::NonNegative,
        system_type: ZeroSequence,
        pin_system: true,
    }
}

single_phase_quantity! {
    /// Natural admittance.
    AdmittanceNat {
        unit: Siemens,
        precision: precision::ADMITTANCE,
        domain: Domain::NonNegative,
        system_type: Natural,
        pin_system: true,
    }
}

single_phase_quantity! {
    /// Length.
    Length {
        unit: Meter,
        precision: precision::LENGTH,
        domain: Domain::NonNegative,
        system_type: Natural,
        pin_system: false,
    }
}

single_phase_quantity! {
    /// Electrical voltage.
    Voltage {
        unit: Volt,
        precision: precision::VOLTAGE,
        domain: Domain::NonNegative,
        system_type: Natural,
        pin_system: false,
    }
}

single_phase_quantity! {
    /// Electrical current.
    Current {
        unit: Ampere,
        precision: precision::CURRENT,
        domain: Domain::Any,
        system_type: Natural,
        pin_system: false,
    }
}

single_phase_quantity! {
    /// Angle of a complex quantity.
    Angle {
        unit: Degree,
        precision: precision::ANGLE,
        domain: Domain::Closed(0.0, 360.0),
        system_type: Natural,
        pin_system: false,
    }
}

single_phase_quantity! {
    /// Droop of a characteristic curve.
    Droop {
        unit: Unitless,
        precision: precision::PU,
        domain: Domain::Any,
        system_type: Natural,
        pin_system: false,
    }
}

/// Base power quantity with a free power type and unit.
///
/// The pinned subtypes below are the usual citizens of a document; this
/// shape exists for the power kinds (DC, GAS, THERMAL, ...) that have no
/// dedicated type.
#[derive(Debug, Clone, PartialEq)]
pub struct Power {
    pub value: f64,
    pub power_type: PowerType,
    pub unit: Unit,
    pub system_type: SystemType,
}

impl Power {
    pub const PRECISION: i32 = precision::POWER;

    pub fn new(value: f64, power_type: PowerType, unit: Unit) -> GimResult<Self> {
        Self {
            value,
            power_type,
            unit,
            system_type: SystemType::Natural,
        }
        .validated()
    }
}

impl Validate for Power {
    fn validate(&self, _path: &str, _diag: &mut Diagnostics) {}
}

impl serde::Serialize for Power {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Power", 4)?;
        st.serialize_field("value", &Rounded(self.value, Self::PRECISION))?;
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
            #[serde(deserialize_with = "crate::quantities::de_value")]
            value: f64,
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

/// Macro for power subtypes that pin both power type and unit.
macro_rules! single_phase_power {
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
            pub value: f64,
            pub power_type: PowerType,
            pub unit: Unit,
            pub system_type: SystemType,
        }

        impl $name {
            pub const PRECISION: i32 = precision::POWER;
            pub const POWER_TYPE: PowerType = PowerType::$ptype;
            pub const UNIT: Unit = Unit::$unit;

            pub fn new(value: f64) -> GimResult<Self> {
                Self {
                    value,
                    power_type: PowerType::$ptype,
                    unit: Unit::$unit,
                    system_type: SystemType::Natural,
                }
                .validated()
            }
        }

        impl Validate for $name {
            fn validate(&self, path: &str, diag: &mut Diagnostics) {
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
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut st = serializer.serialize_struct(stringify!($name), 4)?;
                st.serialize_field("value", &Rounded(self.value, Self::PRECISION))?;
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
                    #[serde(deserialize_with = "crate::quantities::de_value")]
                    value: f64,
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

single_phase_power! {
    /// Electrical active power.
    ActivePower {
        power_type: AcActive,
        unit: Watt,
    }
}

single_phase_power! {
    /// Electrical apparent power.
    ApparentPower {
        power_type: AcApparent,
        unit: VoltAmpere,
    }
}

single_phase_power! {
    /// Electrical reactive power.
    ReactivePower {
        power_type: AcReactive,
        unit: VoltampereReactive,
    }
}

/// Macro for scalar power factors (unitless, with excitation direction).
macro_rules! single_phase_factor {
    (
        $(#[$doc:meta])*
        $name:ident { domain: $domain:expr }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub value: f64,
            pub direction: PowerFactorDirection,
            pub unit: Unit,
        }

        impl $name {
            pub const PRECISION: i32 = precision::POWERFACTOR;

            pub fn new(value: f64) -> GimResult<Self> {
                Self {
                    value,
                    direction: PowerFactorDirection::Nd,
                    unit: Unit::Unitless,
                }
                .validated()
            }

            /// Set the excitation direction.
            pub fn with_direction(mut self, direction: PowerFactorDirection) -> Self {
                self.direction = direction;
                self
            }
        }

        impl Validate for $name {
            fn validate(&self, path: &str, diag: &mut Diagnostics) {
                if let Some(msg) = $domain.violation(self.value) {
                    diag.add_error("domain", &field(path, "value"), msg);
                }
                if self.unit != Unit::Unitless {
                    diag.add_error(
                        "domain",
                        &field(path, "unit"),
                        format!("only {:?} is supported", Unit::Unitless),
                    );
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut st = serializer.serialize_struct(stringify!($name), 3)?;
                st.serialize_field("value", &Rounded(self.value, Self::PRECISION))?;
                st.serialize_field("direction", &self.direction)?;
                st.serialize_field("unit", &self.unit)?;
                st.end()
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(serde::Deserialize)]
                struct Wire {
                    #[serde(deserialize_with = "crate::quantities::de_value")]
                    value: f64,
                    #[serde(default)]
                    direction: Option<PowerFactorDirection>,
                    #[serde(default)]
                    unit: Option<Unit>,
                }

                let wire = Wire::deserialize(deserializer)?;
                Ok(Self {
                    value: wire.value,
                    direction: wire.direction.unwrap_or(PowerFactorDirection::Nd),
                    unit: wire.unit.unwrap_or(Unit::Unitless),
                })
            }
        }
    };
}

single_phase_factor! {
    /// Power factor, e.g. cos(phi) or tan(phi).
    PowerFactor { domain: Domain::NonNegative }
}

single_phase_factor! {
    /// Power factor as cos(phi).
    CosPhi { domain: Domain::Closed(0.0, 1.0) }
}

single_phase_factor! {
    /// Power factor as tan(phi).
    TanPhi { domain: Domain::NonNegative }
}

/// Phase shift between two windings in multiples of 30 degrees.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseAngleClock {
    pub value: f64,
}

impl PhaseAngleClock {
    pub fn new(value: f64) -> GimResult<Self> {
        Self { value }.validated()
    }

    /// Phase shift in degrees.
    pub fn angle(&self) -> f64 {
        self.value * 30.0
    }
}

impl Validate for PhaseAngleClock {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        if let Some(msg) = Domain::HalfOpen(0.0, 12.0).violation(self.value) {
            diag.add_error("domain", &field(path, "value"), msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GimError;

    #[test]
    fn test_frequency_unit_pinned() {
        let f = Frequency::new(50.0).unwrap();
        assert_eq!(f.unit, Unit::Hertz);

        let bad = Frequency {
            value: 50.0,
            unit: Unit::Watt,
            system_type: SystemType::Natural,
        }
        .validated();
        assert!(matches!(bad, Err(GimError::Validation(_))));
    }

    #[test]
    fn test_frequency_rejects_negative() {
        assert!(Frequency::new(-0.1).is_err());
    }

    #[test]
    fn test_sequence_pins() {
        let bad = ImpedancePosSeq {
            value: 1.0,
            unit: Unit::Ohm,
            system_type: SystemType::ZeroSequence,
        }
        .validated();
        assert!(bad.is_err());

        assert!(ImpedanceZerSeq::new(0.5).is_ok());
    }

    #[test]
    fn test_angle_domain() {
        assert!(Angle::new(360.0).is_ok());
        assert!(Angle::new(361.0).is_err());
        assert!(Angle::new(-1.0).is_err());
    }

    #[test]
    fn test_cos_phi_domain_and_nan() {
        assert!(CosPhi::new(1.01).is_err());
        assert!(CosPhi::new(f64::NAN).is_ok());
        assert!(CosPhi::new(0.95).is_ok());
    }

    #[test]
    fn test_voltage_negative_fails() {
        assert!(Voltage::new(-1.0).is_err());
    }

    #[test]
    fn test_phase_angle_clock() {
        let c = PhaseAngleClock::new(11.0).unwrap();
        assert_eq!(c.angle(), 330.0);
        assert!(PhaseAngleClock::new(12.0).is_err());
    }

    #[test]
    fn test_active_power_wire_shape() {
        let p = ActivePower::new(1000.04).unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["power_type"], "AC_ACTIVE");
        assert_eq!(json["unit"], "WATT");
        // rounded to POWER precision (1 digit)
        assert_eq!(json["value"], 1000.0);
    }

    #[test]
    fn test_deserialize_defaults_pins() {
        let p: ApparentPower = serde_json::from_str(r#"{"value": 3.0}"#).unwrap();
        assert_eq!(p.power_type, PowerType::AcApparent);
        assert_eq!(p.unit, Unit::VoltAmpere);
        assert!(p.clone().validated().is_ok());

        // a wrong pinned tag parses but does not validate
        let q: ApparentPower =
            serde_json::from_str(r#"{"value": 3.0, "power_type": "DC"}"#).unwrap();
        assert!(q.validated().is_err());
    }
}
