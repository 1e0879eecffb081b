//! # gim-core: Grid Interchange Model Core
//!
//! Provides the validated data model for electrical power-system grid
//! interchange documents: topology (nodes, branches, transformers, loads,
//! external grids), topology cases (element in/out-of-service state) and
//! steady-state cases (operating points and controller setpoints).
//!
//! ## Design Philosophy
//!
//! Everything is an **immutable value object**: an instance either fully
//! satisfies its invariants or it does not exist. Construction (and
//! deserialization in `gim-io`) runs all validators eagerly via the
//! [`Validate`] trait and reports *every* offending field path at once
//! through the [`diagnostics`] infrastructure.
//!
//! Derived facts (phase counts, symmetry, totals, averages, the Z fraction
//! of a load model) are computed from the canonical stored fields on
//! demand. They are never stored, so they can never drift from the data.
//!
//! Cross-aggregate references (a case naming a load of a topology) are plain
//! name strings, resolved explicitly by the case consistency checks
//! ([`SteadystateCase::is_valid_topology`],
//! [`TopologyCase::matches_topology`]); those checks log what is wrong and
//! return `false` instead of failing hard.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gim_core::meta::Meta;
//! use gim_core::quantities::single_phase::Voltage;
//! use gim_core::topology::{Node, Topology};
//! use gim_core::Validate;
//!
//! let meta = Meta::new("example_grid", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
//!
//! let mut topology = Topology::new(meta);
//! topology.nodes.push(Node::new("Bus 1", Voltage::new(20_000.0).unwrap()));
//! topology.nodes.push(Node::new("Bus 2", Voltage::new(400.0).unwrap()));
//!
//! let topology = topology.validated().expect("invariants hold");
//! assert_eq!(topology.nodes.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`quantities`] - single- and multi-phase physical quantities
//! - [`topology`] - the physical grid structure
//! - [`topology_case`] - in/out-of-service element states
//! - [`steadystate`] - operating points and controllers
//! - [`meta`] - document identity header and schema revision
//! - [`attribute`] - open-ended vendor extension data
//! - [`diagnostics`] - validation and diagnostic reporting
//!
//! ## Integration with gim-io
//!
//! The gim-io crate persists these aggregates as deterministic,
//! alphabetically-keyed JSON and validates whole documents on load.

use serde::{Deserialize, Serialize};

pub mod attribute;
pub mod diagnostics;
pub mod error;
pub mod meta;
pub mod quantities;
pub mod steadystate;
pub mod topology;
pub mod topology_case;

pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity, Validate};
pub use error::{GimError, GimResult};
pub use meta::{Meta, SignConvention, VERSION};
pub use steadystate::SteadystateCase;
pub use topology::Topology;
pub use topology_case::{ElementState, TopologyCase};

/// Voltage system of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoltageSystemType {
    Ac,
    Dc,
}
