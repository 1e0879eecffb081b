//! Grid identity header embedded in every interchange document.

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attribute::AttributeData;
use crate::diagnostics::{Diagnostics, Validate};

/// Schema revision written into every serialized document.
///
/// Informational metadata, not a content-negotiation mechanism: readers carry
/// foreign version strings through untouched and decide themselves what to do
/// about a mismatch.
pub const VERSION: &str = "2.2.0";

/// Sign convention of power values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignConvention {
    /// Consumer load centered
    Passive,
    /// Producer load centered
    Active,
}

/// Metadata related to a grid export.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    /// Schema revision of the document; defaults to [`VERSION`].
    pub version: String,
    /// Name of the grid.
    pub grid: String,
    pub date: NaiveDate,
    pub id: Uuid,
    pub case: Option<String>,
    pub creator: Option<String>,
    pub project: Option<String>,
    pub sign_convention: Option<SignConvention>,
    pub optional_data: Option<Vec<AttributeData>>,
}

impl Meta {
    /// Create a header for `grid` with a fresh id and the current schema
    /// revision.
    pub fn new(grid: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            version: VERSION.to_string(),
            grid: grid.into(),
            date,
            id: Uuid::new_v4(),
            case: None,
            creator: None,
            project: None,
            sign_convention: None,
            optional_data: None,
        }
    }

    pub fn with_case(mut self, case: impl Into<String>) -> Self {
        self.case = Some(case.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_sign_convention(mut self, sign_convention: SignConvention) -> Self {
        self.sign_convention = Some(sign_convention);
        self
    }
}

impl Validate for Meta {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        if let Some(data) = &self.optional_data {
            crate::attribute::validate_optional_data(data, path, diag);
        }
    }
}

impl Serialize for Meta {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Meta", 9)?;
        st.serialize_field("version", &self.version)?;
        st.serialize_field("grid", &self.grid)?;
        st.serialize_field("date", &self.date)?;
        st.serialize_field("id", &self.id)?;
        st.serialize_field("case", &self.case)?;
        st.serialize_field("creator", &self.creator)?;
        st.serialize_field("project", &self.project)?;
        st.serialize_field("sign_convention", &self.sign_convention)?;
        st.serialize_field("optional_data", &self.optional_data)?;
        st.end()
    }
}

/// Wire shape of [`Meta`].
///
/// Carries the deprecated `name` alias: documents written before the `grid`
/// rename are still accepted, with `name` copied into `grid` and a
/// deprecation warning emitted. Supplying neither is a hard error.
#[derive(Deserialize)]
struct MetaWire {
    version: Option<String>,
    grid: Option<String>,
    name: Option<String>,
    date: NaiveDate,
    id: Option<Uuid>,
    case: Option<String>,
    creator: Option<String>,
    project: Option<String>,
    sign_convention: Option<SignConvention>,
    optional_data: Option<Vec<AttributeData>>,
}

impl TryFrom<MetaWire> for Meta {
    type Error = String;

    fn try_from(wire: MetaWire) -> Result<Self, Self::Error> {
        if wire.name.is_some() {
            tracing::warn!("name is deprecated. Use grid instead.");
        }
        let grid = wire
            .grid
            .or(wire.name)
            .ok_or_else(|| "grid field required".to_string())?;

        Ok(Self {
            version: wire.version.unwrap_or_else(|| VERSION.to_string()),
            grid,
            date: wire.date,
            id: wire.id.unwrap_or_else(Uuid::new_v4),
            case: wire.case,
            creator: wire.creator,
            project: wire.project,
            sign_convention: wire.sign_convention,
            optional_data: wire.optional_data,
        })
    }
}

impl<'de> Deserialize<'de> for Meta {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = MetaWire::deserialize(deserializer)?;
        Meta::try_from(wire).map_err(serde::de::Error::custom)
    }
}
