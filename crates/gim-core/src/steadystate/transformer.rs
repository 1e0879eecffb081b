//! Transformer operating points.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostics, Validate};

/// Operating point of a transformer, keyed by the transformer's name in the
/// topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformer {
    pub name: String,
    /// Actual tap position
    pub tap_pos: Option<i64>,
}

impl Validate for Transformer {
    fn validate(&self, _path: &str, _diag: &mut Diagnostics) {}
}
