//! Incident reports and the student matches embedded in them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::UserId;

/// Incident categories offered on the report form.
///
/// Intake does not enforce membership; the list only drives form options.
pub const INCIDENT_TYPES: [&str; 7] = [
    "theft",
    "vandalism",
    "unauthorized-access",
    "violence",
    "emergency",
    "suspicious-activity",
    "other",
];

/// Priority levels offered on the report form. Not enforced on intake.
pub const INCIDENT_PRIORITIES: [&str; 4] = ["low", "medium", "high", "critical"];

/// Stable incident identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(Uuid);

impl IncidentId {
    /// Generate a new random [`IncidentId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Investigation status. New incidents always start `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Open,
    Investigating,
    Resolved,
}

/// Candidate student attached to an incident at creation time.
///
/// A denormalised copy of the student's record; later edits to the user do
/// not flow back into existing incidents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedStudent {
    pub id: UserId,
    pub name: String,
    pub student_id: Option<String>,
    pub email: String,
    pub department: String,
    pub photo: Option<String>,
    /// Match confidence as a percentage in `0..=100`.
    pub confidence: u8,
}

/// Stored incident record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: IncidentId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub incident_type: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact: String,
    pub reported_by: String,
    pub status: IncidentStatus,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub identified_students: Vec<MatchedStudent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Keys this version does not model, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Validation errors raised for incident report fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentValidationError {
    /// A required field was missing or empty.
    MissingField(&'static str),
}

impl fmt::Display for IncidentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} must not be empty"),
        }
    }
}

impl std::error::Error for IncidentValidationError {}

/// Raw text fields of an incident report form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentFields {
    pub title: String,
    pub incident_type: String,
    pub priority: String,
    pub location: String,
    pub description: String,
    pub contact: String,
}

/// Validated incident report awaiting persistence.
///
/// ## Invariants
/// - Every field is a non-empty string. Nothing else is checked, so `type`
///   and `priority` may hold values outside the form option lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentReport {
    fields: IncidentFields,
}

impl IncidentReport {
    /// Validate raw form fields.
    ///
    /// # Examples
    /// ```
    /// use campus_security::domain::{IncidentFields, IncidentReport};
    ///
    /// let report = IncidentReport::try_from_fields(IncidentFields {
    ///     title: "Broken window".into(),
    ///     incident_type: "vandalism".into(),
    ///     priority: "high".into(),
    ///     location: "Library".into(),
    ///     description: "Ground floor window smashed".into(),
    ///     contact: "0800 000 000".into(),
    /// });
    /// assert!(report.is_ok());
    /// ```
    pub fn try_from_fields(fields: IncidentFields) -> Result<Self, IncidentValidationError> {
        let required = [
            ("title", &fields.title),
            ("type", &fields.incident_type),
            ("priority", &fields.priority),
            ("location", &fields.location),
            ("description", &fields.description),
            ("contact", &fields.contact),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(IncidentValidationError::MissingField(field));
            }
        }
        Ok(Self { fields })
    }

    /// Build the stored record for a fresh incident.
    #[must_use]
    pub fn into_incident(self, stamp: IntakeStamp) -> Incident {
        let IncidentFields {
            title,
            incident_type,
            priority,
            location,
            description,
            contact,
        } = self.fields;
        Incident {
            id: stamp.id,
            title,
            incident_type,
            priority,
            location,
            description,
            contact,
            reported_by: stamp.reported_by,
            status: IncidentStatus::Open,
            image_path: stamp.image_path,
            identified_students: stamp.identified_students,
            created_at: stamp.now,
            updated_at: stamp.now,
            extra: Map::new(),
        }
    }
}

/// Reorder store-ordered incidents newest first.
///
/// Incidents sharing a `createdAt` keep reverse insertion order.
pub fn sort_newest_first(incidents: &mut [Incident]) {
    incidents.reverse();
    incidents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Values generated by the intake flow for a new incident.
#[derive(Debug, Clone)]
pub struct IntakeStamp {
    pub id: IncidentId,
    pub reported_by: String,
    pub image_path: Option<String>,
    pub identified_students: Vec<MatchedStudent>,
    pub now: DateTime<Utc>,
}
