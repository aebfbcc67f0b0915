//! Appointment record and its status vocabulary.
//!
//! # Responsibility
//! - Define the booking record shared by customer, vet and admin flows.
//! - Declare the status graph: each status knows its legal successors.
//!
//! # Invariants
//! - Status transitions are monotonic along the declared graph; no write
//!   may produce a status outside the successor set of the current one.
//! - `REJECTED`, `COMPLETED` and `CANCELLED` are terminal.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Visit modality of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentType {
    Virtual,
    InPerson,
}

impl AppointmentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Virtual => "VIRTUAL",
            Self::InPerson => "IN_PERSON",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "VIRTUAL" => Some(Self::Virtual),
            "IN_PERSON" => Some(Self::InPerson),
            _ => None,
        }
    }
}

impl Display for AppointmentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an appointment.
///
/// A booking starts as an unconfirmed request and must not consume
/// calendar capacity until clinical or administrative staff confirm it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// Requested by a customer, awaiting staff confirmation.
    PendingApproval,
    /// Confirmed and on the calendar.
    Scheduled,
    /// Declined by staff. Terminal.
    Rejected,
    /// Visit took place. Terminal.
    Completed,
    /// Called off after scheduling. Terminal.
    Cancelled,
}

impl AppointmentStatus {
    /// Legal successor statuses of this status.
    pub fn successors(self) -> &'static [AppointmentStatus] {
        match self {
            Self::PendingApproval => &[Self::Scheduled, Self::Rejected],
            Self::Scheduled => &[Self::Completed, Self::Cancelled],
            Self::Rejected | Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Whether the status admits no further transitions.
    pub fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }

    /// Whether `to` is in this status's successor set.
    pub fn can_transition(self, to: AppointmentStatus) -> bool {
        self.successors().contains(&to)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::Scheduled => "SCHEDULED",
            Self::Rejected => "REJECTED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING_APPROVAL" => Some(Self::PendingApproval),
            "SCHEDULED" => Some(Self::Scheduled),
            "REJECTED" => Some(Self::Rejected),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking record as held by the entity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Opaque unique id, never reused.
    pub id: String,
    /// Pet the visit is for.
    pub pet_id: String,
    /// Veterinarian the visit is with.
    pub vet_id: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    /// Free-text reason given by the requester.
    pub reason: String,
}

/// Validation failure for an appointment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentValidationError {
    EmptyReason,
    EmptyDate,
    EmptyTime,
}

impl Display for AppointmentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyReason => write!(f, "appointment reason must not be empty"),
            Self::EmptyDate => write!(f, "appointment date must not be empty"),
            Self::EmptyTime => write!(f, "appointment time must not be empty"),
        }
    }
}

impl Error for AppointmentValidationError {}

impl Appointment {
    /// Checks the shape constraints of the record.
    pub fn validate(&self) -> Result<(), AppointmentValidationError> {
        if self.reason.trim().is_empty() {
            return Err(AppointmentValidationError::EmptyReason);
        }
        if self.date.trim().is_empty() {
            return Err(AppointmentValidationError::EmptyDate);
        }
        if self.time.trim().is_empty() {
            return Err(AppointmentValidationError::EmptyTime);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AppointmentStatus::{
        Cancelled, Completed, PendingApproval, Rejected, Scheduled,
    };
    use super::{Appointment, AppointmentStatus, AppointmentType, AppointmentValidationError};

    const ALL_STATUSES: [AppointmentStatus; 5] =
        [PendingApproval, Scheduled, Rejected, Completed, Cancelled];

    #[test]
    fn successor_sets_match_declared_graph() {
        assert_eq!(PendingApproval.successors(), &[Scheduled, Rejected]);
        assert_eq!(Scheduled.successors(), &[Completed, Cancelled]);
        for terminal in [Rejected, Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for to in ALL_STATUSES {
                assert!(!terminal.can_transition(to));
            }
        }
    }

    #[test]
    fn no_status_transitions_to_itself() {
        for status in ALL_STATUSES {
            assert!(!status.can_transition(status));
        }
    }

    #[test]
    fn status_and_type_labels_roundtrip() {
        for status in ALL_STATUSES {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        for kind in [AppointmentType::Virtual, AppointmentType::InPerson] {
            assert_eq!(AppointmentType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(AppointmentStatus::parse("scheduled"), None);
    }

    #[test]
    fn serialized_shape_matches_persisted_layout() {
        let appointment = Appointment {
            id: "a1".to_string(),
            pet_id: "p1".to_string(),
            vet_id: "v1".to_string(),
            date: "2024-05-15".to_string(),
            time: "10:30 AM".to_string(),
            kind: AppointmentType::Virtual,
            status: AppointmentStatus::Scheduled,
            reason: "Annual Checkup".to_string(),
        };
        let json = serde_json::to_string(&appointment).expect("appointment serializes");
        assert!(json.contains("\"petId\":\"p1\""));
        assert!(json.contains("\"type\":\"VIRTUAL\""));
        assert!(json.contains("\"status\":\"SCHEDULED\""));
    }

    #[test]
    fn validate_rejects_blank_reason() {
        let appointment = Appointment {
            id: "a2".to_string(),
            pet_id: "p1".to_string(),
            vet_id: "v1".to_string(),
            date: "2024-06-12".to_string(),
            time: "02:00 PM".to_string(),
            kind: AppointmentType::Virtual,
            status: AppointmentStatus::PendingApproval,
            reason: "   ".to_string(),
        };
        assert_eq!(
            appointment.validate(),
            Err(AppointmentValidationError::EmptyReason)
        );
    }
}
