//! Pet record owned by a session customer.
//!
//! # Invariants
//! - `owner_id` names an existing or plausible user id; referential
//!   integrity beyond storing the id is not enforced here (single-tenant
//!   design, one active owner id per session).
//! - Records are mutated only by whole-record replacement.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Pet profile as held by the entity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Opaque unique id, never reused.
    pub id: String,
    /// Owning user id.
    pub owner_id: String,
    pub name: String,
    pub species: String,
    pub breed: String,
    /// Age in whole years.
    pub age: u32,
    /// Body weight in kilograms.
    pub weight: f64,
    /// Image URI.
    pub image: String,
    /// Date of the most recent visit, when one is on record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<String>,
}

/// Validation failure for pet registration input.
#[derive(Debug, Clone, PartialEq)]
pub enum PetValidationError {
    EmptyName,
    EmptySpecies,
    /// Weight must be a finite, non-negative number of kilograms.
    InvalidWeight(f64),
}

impl Display for PetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "pet name must not be empty"),
            Self::EmptySpecies => write!(f, "pet species must not be empty"),
            Self::InvalidWeight(value) => write!(f, "invalid pet weight: {value}"),
        }
    }
}

impl Error for PetValidationError {}

impl Pet {
    /// Checks the shape constraints of the record.
    pub fn validate(&self) -> Result<(), PetValidationError> {
        if self.name.trim().is_empty() {
            return Err(PetValidationError::EmptyName);
        }
        if self.species.trim().is_empty() {
            return Err(PetValidationError::EmptySpecies);
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(PetValidationError::InvalidWeight(self.weight));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Pet, PetValidationError};

    fn sample_pet() -> Pet {
        Pet {
            id: "p1".to_string(),
            owner_id: "c1".to_string(),
            name: "Buddy".to_string(),
            species: "Dog".to_string(),
            breed: "Golden Retriever".to_string(),
            age: 3,
            weight: 32.0,
            image: "https://example.test/buddy.jpg".to_string(),
            last_visit: None,
        }
    }

    #[test]
    fn validate_accepts_complete_record() {
        sample_pet().validate().expect("complete pet should validate");
    }

    #[test]
    fn validate_rejects_blank_name_and_species() {
        let mut pet = sample_pet();
        pet.name = String::new();
        assert_eq!(pet.validate(), Err(PetValidationError::EmptyName));

        let mut pet = sample_pet();
        pet.species = " ".to_string();
        assert_eq!(pet.validate(), Err(PetValidationError::EmptySpecies));
    }

    #[test]
    fn validate_rejects_negative_or_non_finite_weight() {
        let mut pet = sample_pet();
        pet.weight = -0.5;
        assert!(matches!(
            pet.validate(),
            Err(PetValidationError::InvalidWeight(_))
        ));

        pet.weight = f64::NAN;
        assert!(matches!(
            pet.validate(),
            Err(PetValidationError::InvalidWeight(_))
        ));
    }

    #[test]
    fn serialized_shape_uses_camel_case_and_omits_absent_last_visit() {
        let json = serde_json::to_string(&sample_pet()).expect("pet serializes");
        assert!(json.contains("\"ownerId\":\"c1\""));
        assert!(!json.contains("lastVisit"));
    }
}
