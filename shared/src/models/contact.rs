//! Contact Model

use serde::{Deserialize, Serialize};

/// Contact inquiry topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ContactSubject {
    Reservation,
    Feedback,
    Catering,
    Events,
    #[default]
    General,
    Complaint,
}

impl ContactSubject {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactSubject::Reservation => "reservation",
            ContactSubject::Feedback => "feedback",
            ContactSubject::Catering => "catering",
            ContactSubject::Events => "events",
            ContactSubject::General => "general",
            ContactSubject::Complaint => "complaint",
        }
    }

    /// Map a free-form subject onto the closed set; unknown values become `general`
    pub fn coerce(value: Option<&str>) -> Self {
        match value {
            Some("reservation") => ContactSubject::Reservation,
            Some("feedback") => ContactSubject::Feedback,
            Some("catering") => ContactSubject::Catering,
            Some("events") => ContactSubject::Events,
            Some("complaint") => ContactSubject::Complaint,
            _ => ContactSubject::General,
        }
    }
}

/// Submitted contact message (write-once)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
    pub created_at: i64,
}

/// Contact form payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactCreate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// `POST /contact` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReceived {
    pub message: String,
    pub contact: Contact,
}
