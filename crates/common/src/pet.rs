use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Identifier assigned to a pet by storage on insert.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PetId(u64);

impl PetId {
    pub fn new(id: u64) -> Self {
        PetId(id)
    }

    /// The id after this one, or `None` once the id space is used up.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(PetId)
    }
}

impl From<u64> for PetId {
    fn from(value: u64) -> Self {
        PetId(value)
    }
}

impl From<PetId> for u64 {
    fn from(id: PetId) -> Self {
        id.0
    }
}

impl FromStr for PetId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(PetId)
    }
}

impl Display for PetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pet {
    /// `None` until the pet has been inserted into a repository.
    pub id: Option<PetId>,
    pub name: String,
    pub species: String,
    pub food: String,
}

impl Pet {
    /// A pet that has not been stored yet.
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        food: impl Into<String>,
    ) -> Self {
        Pet {
            id: None,
            name: name.into(),
            species: species.into(),
            food: food.into(),
        }
    }

    pub fn with_id(
        id: impl Into<PetId>,
        name: impl Into<String>,
        species: impl Into<String>,
        food: impl Into<String>,
    ) -> Self {
        Pet {
            id: Some(id.into()),
            ..Pet::new(name, species, food)
        }
    }

    pub fn assign_id(&self, id: PetId) -> Self {
        Pet {
            id: Some(id),
            ..self.clone()
        }
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Pet {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl Display for Pet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{} {} ({}, eats {})", id, self.name, self.species, self.food),
            None => write!(f, "{} ({}, eats {})", self.name, self.species, self.food),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pet_has_no_id() {
        let pet = Pet::new("Geodude", "Rock", "Pokefood");
        assert_eq!(pet.id, None);
        assert_eq!(pet.name, "Geodude");
    }

    #[test]
    fn test_with_name_keeps_other_fields() {
        let pet = Pet::with_id(1, "Pickahu", "mouse", "apples");
        let renamed = pet.with_name("Pick");

        assert_eq!(renamed.id, Some(PetId::new(1)));
        assert_eq!(renamed.name, "Pick");
        assert_eq!(renamed.species, "mouse");
        assert_eq!(renamed.food, "apples");
        // the renamed copy leaves the source pet alone
        assert_eq!(pet.name, "Pickahu");
    }

    #[test]
    fn test_pet_id_parse_and_display() {
        let id: PetId = "42".parse().unwrap();
        assert_eq!(id, PetId::new(42));
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.next(), Some(PetId::new(43)));
        assert_eq!(PetId::new(u64::MAX).next(), None);
        assert!("forty-two".parse::<PetId>().is_err());
    }

    #[test]
    fn test_pet_serializes_id_as_plain_integer() {
        let pet = Pet::with_id(7, "Mudkip", "Pokemon", "Pokefood");
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["id"], 7);

        let unsaved = serde_json::to_value(Pet::new("Mudkip", "Pokemon", "Pokefood")).unwrap();
        assert!(unsaved["id"].is_null());
    }
}
