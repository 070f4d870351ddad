use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestStatus {
    #[default]
    Registered,
    Contacted,
    ShowingBooked,
    Offered,
    Declined,
    Withdrawn,
}

impl InterestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Registered => "Registered",
            Self::Contacted => "Contacted",
            Self::ShowingBooked => "Showing booked",
            Self::Offered => "Offered",
            Self::Declined => "Declined",
            Self::Withdrawn => "Withdrawn",
        }
    }

    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Declined | Self::Withdrawn)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// An interest registration for an apartment.
///
/// `apartment` is the free-text address as entered; only it, `status` and
/// `showing_at` take part in grouping and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestRecord {
    pub id: String,
    pub apartment: String,
    #[serde(default)]
    pub status: InterestStatus,
    #[serde(default)]
    pub showing_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub contact: ContactDetails,
}

impl InterestRecord {
    pub fn new(id: impl Into<String>, apartment: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            apartment: apartment.into(),
            status: InterestStatus::default(),
            showing_at: None,
            contact: ContactDetails::default(),
        }
    }

    pub fn with_showing(mut self, showing_at: DateTime<Utc>) -> Self {
        self.showing_at = Some(showing_at);
        self.status = InterestStatus::ShowingBooked;
        self
    }

    pub fn with_status(mut self, status: InterestStatus) -> Self {
        self.status = status;
        self
    }
}
