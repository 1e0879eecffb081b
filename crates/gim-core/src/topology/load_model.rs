//! Polynomial (ZIP) voltage-dependency model for load power.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{field, Diagnostics, Validate};
use crate::error::{GimError, GimResult};
use crate::quantities::multi_phase::{PhasePower, Power, Voltage};
use crate::quantities::{Domain, SystemType};

/// Load representation based on the polynomial model
///
/// `load = load_0 * (c_p * (u/u_0)^exp_p + c_i * (u/u_0)^exp_i + c_z * (u/u_0)^exp_z)`
///
/// with constant-power (P), constant-current (I) and constant-impedance (Z)
/// fractions summing to 1. Only `c_p` and `c_i` are stored; the Z fraction is
/// always derived as `1 - c_p - c_i`, so the three can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadModel {
    pub name: Option<String>,
    #[serde(default = "default_c_p")]
    pub c_p: f64,
    #[serde(default)]
    pub c_i: f64,
    #[serde(default)]
    pub exp_p: i64,
    #[serde(default = "default_exp_i")]
    pub exp_i: i64,
    #[serde(default = "default_exp_z")]
    pub exp_z: i64,
    /// Reference voltage per phase the coefficients apply at
    pub u_0: Voltage,
}

fn default_c_p() -> f64 {
    1.0
}

fn default_exp_i() -> i64 {
    1
}

fn default_exp_z() -> i64 {
    2
}

impl LoadModel {
    /// Constant-power model at the given reference voltage.
    pub fn constant_power(u_0: Voltage) -> Self {
        Self {
            name: None,
            c_p: 1.0,
            c_i: 0.0,
            exp_p: 0,
            exp_i: 1,
            exp_z: 2,
            u_0,
        }
    }

    /// Model with explicit P and I fractions; the Z fraction is derived.
    pub fn new(u_0: Voltage, c_p: f64, c_i: f64) -> GimResult<Self> {
        Self {
            c_p,
            c_i,
            ..Self::constant_power(u_0)
        }
        .validated()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Constant-impedance fraction, derived from the stored coefficients.
    pub fn c_z(&self) -> f64 {
        1.0 - self.c_p - self.c_i
    }

    /// Apply the polynomial voltage dependency to an operating point.
    ///
    /// Returns a new power with each phase value scaled by the polynomial at
    /// `u_i / u_0_i`, preserving the input's power type, unit and system
    /// type. All three per-phase tuples must have the same length.
    pub fn calc_power<P: PhasePower>(&self, u: &Voltage, power: &P) -> GimResult<Power> {
        let values = power.phase_values();
        if u.value.len() != values.len() {
            return Err(GimError::LengthMismatch {
                expected: values.len(),
                actual: u.value.len(),
            });
        }
        if self.u_0.value.len() != values.len() {
            return Err(GimError::LengthMismatch {
                expected: values.len(),
                actual: self.u_0.value.len(),
            });
        }

        let c_z = self.c_z();
        let scaled = values
            .iter()
            .zip(u.value.iter().zip(self.u_0.value.iter()))
            .map(|(p, (u_i, u_0_i))| {
                let ratio = u_i / u_0_i;
                p * (self.c_p * ratio.powi(self.exp_p as i32)
                    + self.c_i * ratio.powi(self.exp_i as i32)
                    + c_z * ratio.powi(self.exp_z as i32))
            })
            .collect();

        Ok(Power {
            value: scaled,
            power_type: power.power_type(),
            unit: power.unit(),
            system_type: SystemType::Natural,
        })
    }
}

impl Validate for LoadModel {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        for (name, value) in [("c_p", self.c_p), ("c_i", self.c_i)] {
            if let Some(msg) = Domain::Closed(0.0, 1.0).violation(value) {
                diag.add_error("domain", &field(path, name), msg);
            }
        }
        if self.c_p + self.c_i > 1.0 {
            diag.add_error(
                "invariant",
                path,
                format!(
                    "sum of components must not exceed 1, but c_p + c_i = {}",
                    self.c_p + self.c_i
                ),
            );
        }
        self.u_0.validate(&field(path, "u_0"), diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantities::multi_phase::ActivePower;

    fn u_0() -> Voltage {
        Voltage::new([400.0, 400.0, 400.0]).unwrap()
    }

    #[test]
    fn test_c_z_derived() {
        let model = LoadModel::new(u_0(), 1.0, 0.0).unwrap();
        assert_eq!(model.c_z(), 0.0);

        let model = LoadModel::new(u_0(), 0.4, 0.3).unwrap();
        assert!((model.c_z() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_coefficient_sum_overflow_rejected() {
        assert!(LoadModel::new(u_0(), 0.6, 0.6).is_err());
    }

    #[test]
    fn test_coefficient_domain() {
        assert!(LoadModel::new(u_0(), -0.1, 0.0).is_err());
        assert!(LoadModel::new(u_0(), 1.1, 0.0).is_err());
    }

    #[test]
    fn test_calc_power_constant_power() {
        let model = LoadModel::new(u_0(), 1.0, 0.0).unwrap();
        let p = ActivePower::new([1000.0, 1000.0, 1000.0]).unwrap();
        let u = Voltage::new([380.0, 400.0, 420.0]).unwrap();
        // exp_p = 0: voltage has no influence on the P fraction
        let out = model.calc_power(&u, &p).unwrap();
        assert_eq!(out.value, vec![1000.0, 1000.0, 1000.0]);
        assert_eq!(out.power_type, p.power_type);
        assert_eq!(out.unit, p.unit);
    }

    #[test]
    fn test_calc_power_constant_impedance() {
        let model = LoadModel::new(u_0(), 0.0, 0.0).unwrap();
        let p = ActivePower::new([1000.0]).unwrap();
        let u = Voltage::new([200.0]).unwrap();
        // pure Z at half voltage: quarter power
        let out = model.calc_power(&u, &p).unwrap();
        assert_eq!(out.value, vec![250.0]);
    }

    #[test]
    fn test_calc_power_length_mismatch() {
        let model = LoadModel::new(u_0(), 1.0, 0.0).unwrap();
        let p = ActivePower::new([1000.0, 1000.0]).unwrap();
        let u = Voltage::new([400.0, 400.0, 400.0]).unwrap();
        assert!(matches!(
            model.calc_power(&u, &p),
            Err(GimError::LengthMismatch { .. })
        ));
    }
}
