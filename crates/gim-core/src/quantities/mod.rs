//! Physical quantity types for grid interchange documents.
//!
//! Every quantity carries a numeric value (or one value per phase), a unit,
//! and a system-type tag naming the symmetrical-component frame it is
//! expressed in. Concrete types pin unit (and, for sequence-component types,
//! system type) to a single allowed constant; supplying anything else is a
//! validation error. Each type also declares a fixed decimal precision used
//! when the value is written out; the precision itself never appears on the
//! wire.
//!
//! NaN is deliberately representable: power-factor semantics use it as the
//! "undefined" sentinel (a DC load has no meaningful cos phi). Domain checks
//! are therefore written as violation tests (`v < min`), which NaN never
//! trips.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod multi_phase;
pub mod single_phase;

/// Measurement unit of a quantity, serialized by its wire string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    Ampere,
    Day,
    Degree,
    Hertz,
    Hour,
    Kelvin,
    Meter,
    Minute,
    Ohm,
    Percent,
    Second,
    Siemens,
    Unitless,
    Volt,
    #[serde(rename = "VA")]
    VoltAmpere,
    #[serde(rename = "VAR")]
    VoltampereReactive,
    Watt,
}

/// Symmetrical-component frame a quantity is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemType {
    Natural,
    PositiveSequence,
    NegativeSequence,
    ZeroSequence,
    PositiveNegativeCoupling,
    NegativeZeroCoupling,
    ZeroPositiveCoupling,
}

/// Physical kind of a power quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerType {
    AcActive,
    AcApparent,
    AcReactive,
    Current,
    Dc,
    Gas,
    Impedance,
    Mechanical,
    Thermal,
}

/// Excitation direction of a power factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerFactorDirection {
    /// Under-excited
    Ue,
    /// Over-excited
    Oe,
    /// Not defined
    Nd,
}

/// Conductor label a per-phase value or connection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    A,
    B,
    C,
    N,
    E,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

/// Count of decimal digits kept when a quantity is serialized.
pub mod precision {
    pub const ADMITTANCE: i32 = 13;
    pub const ANGLE: i32 = 5;
    pub const CURRENT: i32 = 2;
    pub const FREQUENCY: i32 = 4;
    pub const IMPEDANCE: i32 = 7;
    pub const LENGTH: i32 = 0;
    pub const POWER: i32 = 1;
    pub const POWERFACTOR: i32 = 7;
    pub const PU: i32 = 5;
    pub const VOLTAGE: i32 = 2;
}

/// Round `value` to `digits` decimal digits; non-finite values pass through.
pub fn round_to(value: f64, digits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Numeric domain of a quantity value.
///
/// Checks are violation tests so that NaN (the permitted "undefined"
/// sentinel) passes every domain, as does any finite in-range value.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Domain {
    /// Any float
    Any,
    /// `value >= 0`
    NonNegative,
    /// `min <= value <= max`
    Closed(f64, f64),
    /// `min <= value < max`
    HalfOpen(f64, f64),
}

impl Domain {
    pub(crate) fn violation(self, value: f64) -> Option<String> {
        match self {
            Domain::Any => None,
            Domain::NonNegative => (value < 0.0).then(|| "value must be >= 0".to_string()),
            Domain::Closed(min, max) => (value < min || value > max)
                .then(|| format!("value must be within [{min}, {max}]")),
            Domain::HalfOpen(min, max) => (value < min || value >= max)
                .then(|| format!("value must be within [{min}, {max})")),
        }
    }
}

/// Serialize a single value rounded to the owning type's precision.
pub(crate) struct Rounded(pub f64, pub i32);

impl Serialize for Rounded {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(round_to(self.0, self.1))
    }
}

/// Serialize a per-phase tuple rounded to the owning type's precision.
pub(crate) struct RoundedSeq<'a>(pub &'a [f64], pub i32);

impl Serialize for RoundedSeq<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|&v| round_to(v, self.1)))
    }
}

/// Visitor for quantity value slots.
///
/// Non-finite floats have no strict-JSON representation. Value positions
/// therefore also accept `null` (read back as NaN) and the token strings
/// `"NaN"`, `"Infinity"` and `"-Infinity"` (what the lenient reader rewrites
/// bare permissive-JSON tokens into).
struct FloatVisitor;

impl<'de> serde::de::Visitor<'de> for FloatVisitor {
    type Value = f64;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a number, null, or a non-finite token string")
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<f64, E> {
        Ok(f64::NAN)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<f64, E> {
        Ok(f64::NAN)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(FloatVisitor)
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<f64, E> {
        match v {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => Err(E::invalid_value(
                serde::de::Unexpected::Str(other),
                &self,
            )),
        }
    }
}

/// Deserialize a float value slot; see [`FloatVisitor`].
pub(crate) fn de_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    deserializer.deserialize_any(FloatVisitor)
}

/// A float wrapped for use inside sequences; see [`FloatVisitor`].
struct NanTolerantFloat(f64);

impl<'de> Deserialize<'de> for NanTolerantFloat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FloatVisitor).map(NanTolerantFloat)
    }
}

/// Deserialize a per-phase tuple of float value slots.
pub(crate) fn de_values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let raw = Vec::<NanTolerantFloat>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|v| v.0).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.75979903, 7), 0.7597990);
        assert_eq!(round_to(1.005, 1), 1.0);
        assert_eq!(round_to(123.456, 0), 123.0);
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_domain_nan_passes() {
        assert!(Domain::NonNegative.violation(f64::NAN).is_none());
        assert!(Domain::Closed(0.0, 1.0).violation(f64::NAN).is_none());
    }

    #[test]
    fn test_domain_violations() {
        assert!(Domain::NonNegative.violation(-0.1).is_some());
        assert!(Domain::Closed(0.0, 360.0).violation(361.0).is_some());
        assert!(Domain::HalfOpen(0.0, 12.0).violation(12.0).is_some());
        assert!(Domain::HalfOpen(0.0, 12.0).violation(11.9).is_none());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&Unit::VoltAmpere).unwrap(),
            "\"VA\""
        );
        assert_eq!(
            serde_json::to_string(&Unit::VoltampereReactive).unwrap(),
            "\"VAR\""
        );
        assert_eq!(serde_json::to_string(&Unit::Watt).unwrap(), "\"WATT\"");
        assert_eq!(
            serde_json::to_string(&PowerType::AcActive).unwrap(),
            "\"AC_ACTIVE\""
        );
        assert_eq!(
            serde_json::to_string(&SystemType::PositiveSequence).unwrap(),
            "\"POSITIVE_SEQUENCE\""
        );
        assert_eq!(
            serde_json::to_string(&PowerFactorDirection::Ue).unwrap(),
            "\"UE\""
        );
    }
}
