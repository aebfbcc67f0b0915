//! First-run dataset and demo session identities.
//!
//! The pet and appointment seeds keep the UI populated on a fresh install;
//! the user slot is never seeded, so the application starts
//! unauthenticated.

use crate::model::appointment::{Appointment, AppointmentStatus, AppointmentType};
use crate::model::pet::Pet;
use crate::model::user::{User, UserRole};

/// Pets present on first run, before any customer registers their own.
pub fn default_pets() -> Vec<Pet> {
    vec![
        Pet {
            id: "p1".to_string(),
            owner_id: "c1".to_string(),
            name: "Buddy".to_string(),
            species: "Dog".to_string(),
            breed: "Golden Retriever".to_string(),
            age: 3,
            weight: 32.0,
            image: "https://images.unsplash.com/photo-1552053831-71594a27632d?auto=format&fit=crop&q=80&w=200"
                .to_string(),
            last_visit: None,
        },
        Pet {
            id: "p2".to_string(),
            owner_id: "c1".to_string(),
            name: "Luna".to_string(),
            species: "Cat".to_string(),
            breed: "Siamese".to_string(),
            age: 5,
            weight: 4.5,
            image: "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?auto=format&fit=crop&q=80&w=200"
                .to_string(),
            last_visit: None,
        },
    ]
}

/// Appointments present on first run.
pub fn default_appointments() -> Vec<Appointment> {
    vec![Appointment {
        id: "a1".to_string(),
        pet_id: "p1".to_string(),
        vet_id: "v1".to_string(),
        date: "2024-05-15".to_string(),
        time: "10:30 AM".to_string(),
        kind: AppointmentType::Virtual,
        status: AppointmentStatus::Scheduled,
        reason: "Annual Checkup".to_string(),
    }]
}

/// Fixed demo identity installed by a role-based login.
pub fn demo_user(role: UserRole) -> User {
    match role {
        UserRole::Customer => User {
            id: "c1".to_string(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            role,
            avatar: "https://picsum.photos/id/64/100/100".to_string(),
        },
        UserRole::Veterinarian => User {
            id: "v1".to_string(),
            name: "Dr. Sarah Smith".to_string(),
            email: "sarah@petpulse.vet".to_string(),
            role,
            avatar: "https://picsum.photos/id/65/100/100".to_string(),
        },
        UserRole::Admin => User {
            id: "a1".to_string(),
            name: "Admin User".to_string(),
            email: "admin@petpulse.com".to_string(),
            role,
            avatar: "https://picsum.photos/id/66/100/100".to_string(),
        },
    }
}
