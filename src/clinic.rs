//! Patient and prescription registry.
//!
//! Both record types are identity-only entities: they live in keyed stores
//! but carry no stock level.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::entity::{require_text, Entity, ItemId};
use crate::error::{StockroomResult, ValidationError};
use crate::storage::{KeyedStore, StoreError};

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(deserialize_with = "crate::entity::checked::id")]
    pub id: ItemId,
    #[serde(deserialize_with = "crate::entity::checked::name")]
    pub name: String,
    #[serde(deserialize_with = "checked_age")]
    pub age: u32,
    #[serde(deserialize_with = "crate::entity::checked::gender")]
    pub gender: String,
}

impl Patient {
    /// Creates a validated patient.
    ///
    /// # Errors
    /// `InvalidIdentifier` for id `0`, `EmptyField` for a blank name or
    /// gender, `OutOfRange` for an age above 150.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        age: u32,
        gender: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: ItemId::parse(id)?,
            name: require_text("name", name.into())?,
            age: check_age(age)?,
            gender: require_text("gender", gender.into())?,
        })
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}, Age: {}, Gender: {}", self.id, self.name, self.age, self.gender)
    }
}

const MAX_AGE: u32 = 150;

fn check_age(age: u32) -> Result<u32, ValidationError> {
    if age > MAX_AGE {
        return Err(ValidationError::OutOfRange {
            field: "age".to_string(),
            value: i64::from(age),
            min: 0,
            max: i64::from(MAX_AGE),
        });
    }
    Ok(age)
}

fn checked_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    check_age(u32::deserialize(deserializer)?).map_err(serde::de::Error::custom)
}

/// A prescription issued to a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(deserialize_with = "crate::entity::checked::id")]
    pub id: ItemId,
    #[serde(deserialize_with = "crate::entity::checked::id")]
    pub patient_id: ItemId,
    #[serde(deserialize_with = "crate::entity::checked::medication_name")]
    pub medication_name: String,
    pub date_issued: NaiveDate,
}

impl Prescription {
    /// Creates a validated prescription.
    ///
    /// # Errors
    /// `InvalidIdentifier` for a zero id or patient id, `EmptyField` for a
    /// blank medication name.
    pub fn new(
        id: u32,
        patient_id: u32,
        medication_name: impl Into<String>,
        date_issued: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: ItemId::parse(id)?,
            patient_id: ItemId::parse(patient_id)?,
            medication_name: require_text("medication_name", medication_name.into())?,
            date_issued,
        })
    }
}

impl fmt::Display for Prescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} (Issued: {})",
            self.id,
            self.medication_name,
            self.date_issued.format("%Y-%m-%d")
        )
    }
}

impl Entity for Patient {
    fn id(&self) -> ItemId {
        self.id
    }
}

impl Entity for Prescription {
    fn id(&self) -> ItemId {
        self.id
    }
}

/// Patients, prescriptions, and a patient → prescriptions index.
#[derive(Debug, Clone, Default)]
pub struct HealthRegistry {
    patients: KeyedStore<Patient>,
    prescriptions: KeyedStore<Prescription>,
    by_patient: BTreeMap<ItemId, Vec<ItemId>>,
}

impl HealthRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the demo patients and prescriptions, issued relative to
    /// `today`.
    ///
    /// # Errors
    /// Fails if any demo id is already present.
    pub fn seed_data(&mut self, today: NaiveDate) -> StockroomResult<()> {
        self.patients.add(Patient::new(1, "Yaa Asantewaa", 34, "Female")?)?;
        self.patients.add(Patient::new(2, "Nana Kwame", 45, "Male")?)?;
        self.patients.add(Patient::new(3, "Kweku Obo", 29, "Female")?)?;

        let issued = [
            (1, 1, "Amoxicillin", 5),
            (2, 1, "Ibuprofen", 2),
            (3, 2, "Metformin", 10),
            (4, 3, "Vitamin D", 1),
            (5, 1, "Paracetamol", 0),
        ];
        for (id, patient_id, medication, days_ago) in issued {
            self.prescriptions.add(Prescription::new(
                id,
                patient_id,
                medication,
                today - Days::new(days_ago),
            )?)?;
        }
        Ok(())
    }

    /// Patient store.
    #[must_use]
    pub fn patients(&self) -> &KeyedStore<Patient> {
        &self.patients
    }

    /// Mutable patient store.
    pub fn patients_mut(&mut self) -> &mut KeyedStore<Patient> {
        &mut self.patients
    }

    /// Prescription store. Changes are visible to
    /// [`HealthRegistry::prescriptions_for`] after the next
    /// [`HealthRegistry::build_prescription_map`].
    #[must_use]
    pub fn prescriptions(&self) -> &KeyedStore<Prescription> {
        &self.prescriptions
    }

    /// Mutable prescription store.
    pub fn prescriptions_mut(&mut self) -> &mut KeyedStore<Prescription> {
        &mut self.prescriptions
    }

    /// Rebuild the patient → prescriptions index from scratch.
    pub fn build_prescription_map(&mut self) {
        self.by_patient.clear();
        for prescription in &self.prescriptions {
            self.by_patient
                .entry(prescription.patient_id)
                .or_default()
                .push(prescription.id);
        }
        debug!(patients = self.by_patient.len(), "rebuilt prescription map");
    }

    /// Prescriptions indexed for `patient_id`, in id order.
    ///
    /// A known patient with no prescriptions yields an empty list.
    ///
    /// # Errors
    /// `NotFound` if the patient is not registered.
    pub fn prescriptions_for(&self, patient_id: ItemId) -> Result<Vec<&Prescription>, StoreError> {
        self.patients.get(patient_id)?;
        let Some(ids) = self.by_patient.get(&patient_id) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| self.prescriptions.get(*id).ok())
            .collect())
    }
}
