use std::{
    collections::BTreeMap,
    fmt::Debug,
    sync::{Arc, RwLock},
};

use serde::{Deserialize, Serialize};

use crate::{
    Pet, PetId,
    storage::pets::{PetRepository, PetRepositoryError},
};

type Result<T> = std::result::Result<T, PetRepositoryError>;

/// Stored pets plus the id counter. Shared by the in-memory and file backends.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "PetTableFile", into = "PetTableFile")]
pub(super) struct PetTable {
    next_id: PetId,
    pets: BTreeMap<PetId, Pet>,
}

/// On-disk shape of a [`PetTable`].
#[derive(Serialize, Deserialize)]
struct PetTableFile {
    next_id: PetId,
    pets: Vec<Pet>,
}

impl TryFrom<PetTableFile> for PetTable {
    type Error = String;

    fn try_from(file: PetTableFile) -> std::result::Result<Self, Self::Error> {
        let mut pets = BTreeMap::new();
        for pet in file.pets {
            let id = pet
                .id
                .ok_or_else(|| format!("stored pet '{}' has no id", pet.name))?;
            if pets.insert(id, pet).is_some() {
                return Err(format!("pet id {} is stored more than once", id));
            }
        }
        // never hand out an id that is already taken, even if the file's counter is stale
        let next_id = match pets.keys().next_back() {
            Some(last) => {
                let after_last = last
                    .next()
                    .ok_or_else(|| format!("pet id {} leaves no ids to assign", last))?;
                after_last.max(file.next_id)
            }
            None => file.next_id,
        };
        Ok(PetTable { next_id, pets })
    }
}

impl From<PetTable> for PetTableFile {
    fn from(table: PetTable) -> Self {
        PetTableFile {
            next_id: table.next_id,
            pets: table.pets.into_values().collect(),
        }
    }
}

impl PetTable {
    pub(super) fn new() -> Self {
        PetTable {
            next_id: PetId::new(1),
            pets: BTreeMap::new(),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.pets.len()
    }

    /// Assigns the next id. Fails without touching the table once the
    /// counter cannot advance past the id being handed out.
    pub(super) fn insert(&mut self, pet: Pet) -> Result<Pet> {
        let id = self.next_id;
        self.next_id = id.next().ok_or(PetRepositoryError::IdsExhausted)?;
        let stored = pet.assign_id(id);
        self.pets.insert(id, stored.clone());
        Ok(stored)
    }

    pub(super) fn all(&self) -> Vec<Pet> {
        self.pets.values().cloned().collect()
    }

    pub(super) fn get(&self, id: PetId) -> Option<Pet> {
        self.pets.get(&id).cloned()
    }

    pub(super) fn update(&mut self, pet: Pet) -> Result<Pet> {
        let id = pet.id.ok_or(PetRepositoryError::MissingId)?;
        match self.pets.get_mut(&id) {
            Some(existing) => {
                *existing = pet.clone();
                Ok(pet)
            }
            None => Err(PetRepositoryError::PetNotFound(id)),
        }
    }

    pub(super) fn remove(&mut self, id: PetId) -> bool {
        self.pets.remove(&id).is_some()
    }
}

#[derive(Clone, Debug)]
pub struct InMemoryPetRepository {
    pets: Arc<RwLock<PetTable>>,
}

impl InMemoryPetRepository {
    pub fn new() -> Self {
        Self {
            pets: Arc::new(RwLock::new(PetTable::new())),
        }
    }
}

impl Default for InMemoryPetRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PetRepository for InMemoryPetRepository {
    fn insert(&mut self, pet: Pet) -> Result<Pet> {
        let mut pets = self
            .pets
            .write()
            .map_err(|_| PetRepositoryError::LockPoisoned)?;
        pets.insert(pet)
    }

    fn get_all(&self) -> Result<Vec<Pet>> {
        let pets = self
            .pets
            .read()
            .map_err(|_| PetRepositoryError::LockPoisoned)?;
        Ok(pets.all())
    }

    fn get_by_id(&self, id: PetId) -> Result<Option<Pet>> {
        let pets = self
            .pets
            .read()
            .map_err(|_| PetRepositoryError::LockPoisoned)?;
        Ok(pets.get(id))
    }

    fn update(&mut self, pet: Pet) -> Result<Pet> {
        let mut pets = self
            .pets
            .write()
            .map_err(|_| PetRepositoryError::LockPoisoned)?;
        pets.update(pet)
    }

    fn delete(&mut self, id: PetId) -> Result<bool> {
        let mut pets = self
            .pets
            .write()
            .map_err(|_| PetRepositoryError::LockPoisoned)?;
        Ok(pets.remove(id))
    }
}
