//! Data-point based characteristics of power injection.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{field, Diagnostics, Validate};

/// A named 2xN curve: two series of equal length, typically the abscissa
/// and ordinate of a control characteristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Characteristic {
    pub name: String,
    pub description: Option<String>,
    pub data: Option<(Vec<f64>, Vec<f64>)>,
}

impl Characteristic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            data: None,
        }
    }

    pub fn with_data(mut self, x: impl Into<Vec<f64>>, y: impl Into<Vec<f64>>) -> Self {
        self.data = Some((x.into(), y.into()));
        self
    }
}

impl Validate for Characteristic {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        if let Some((x, y)) = &self.data {
            if x.len() != y.len() {
                diag.add_error(
                    "invariant",
                    &field(path, "data"),
                    format!(
                        "both data series must have the same length, but {} != {}",
                        x.len(),
                        y.len()
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_checked() {
        let ok = Characteristic::new("Q(P)-Char").with_data([0.0, 0.5, 1.0], [0.0, 0.0, -0.3]);
        assert!(ok.validated().is_ok());

        let bad = Characteristic::new("Q(P)-Char").with_data([0.0, 0.5], [0.0]);
        assert!(bad.validated().is_err());
    }

    #[test]
    fn test_data_optional() {
        assert!(Characteristic::new("empty").validated().is_ok());
    }

    #[test]
    fn test_wire_shape() {
        let c = Characteristic::new("c").with_data([0.0, 1.0], [1.0, 0.0]);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["data"][0][1], 1.0);
        assert_eq!(json["data"][1][0], 1.0);
    }
}
