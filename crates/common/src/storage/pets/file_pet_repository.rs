use tracing::{debug, instrument, trace};

use crate::{
    Pet, PetId,
    storage::pets::{
        PetRepository, PetRepositoryError, PetRepositoryInitializationError,
        PetRepositoryPersistenceError, in_memory_pet_repository::PetTable,
    },
};
use std::{
    fmt::Debug,
    path::Path,
    sync::{Arc, RwLock},
};

/// Pet repository backed by a single JSON state file.
///
/// The whole table is kept in memory and rewritten to disk after every
/// successful mutation. A mutation whose write fails leaves the in-memory
/// state unchanged.
#[derive(Clone, Debug)]
pub struct FilePetRepository {
    file_path: String,
    pets: Arc<RwLock<PetTable>>,
}

impl FilePetRepository {
    pub fn new(file_path: String) -> Result<Self, PetRepositoryInitializationError> {
        // Load existing pets from file, if it exists
        let pets = if Path::new(&file_path).exists() {
            Self::load_file(&file_path)?
        } else {
            debug!(%file_path, "No pet state file yet, starting empty");
            PetTable::new()
        };

        Ok(Self {
            file_path,
            pets: Arc::new(RwLock::new(pets)),
        })
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    fn load_file(file_path: &str) -> Result<PetTable, PetRepositoryInitializationError> {
        let file_content = std::fs::read_to_string(file_path).map_err(|e| {
            PetRepositoryInitializationError(format!("Failed to read file {}: {}", file_path, e))
        })?;
        let pets: PetTable = serde_json::from_str(&file_content).map_err(|e| {
            PetRepositoryInitializationError(format!("Failed to parse file {}: {}", file_path, e))
        })?;
        debug!("Loaded {} pets from {}", pets.len(), file_path);
        Ok(pets)
    }

    fn persist(&self, pets: &PetTable) -> Result<(), PetRepositoryPersistenceError> {
        trace!("Persisting pets to file: {}", self.file_path);
        let serialized = serde_json::to_string_pretty(pets).map_err(|e| {
            PetRepositoryPersistenceError(format!("Failed to serialize pets: {}", e))
        })?;
        std::fs::write(&self.file_path, serialized).map_err(|e| {
            PetRepositoryPersistenceError(format!("Failed to write to file: {}", e))
        })?;
        debug!("Successfully persisted {} pets", pets.len());
        Ok(())
    }

    /// Applies `change` to a copy of the table, persists the copy, and only
    /// then swaps it in. `change` also reports whether it modified the table;
    /// an unmodified table is neither written nor swapped.
    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut PetTable) -> Result<(T, bool), PetRepositoryError>,
    ) -> Result<T, PetRepositoryError> {
        let mut pets = self
            .pets
            .write()
            .map_err(|_| PetRepositoryError::LockPoisoned)?;
        let mut staged = pets.clone();
        let (result, modified) = change(&mut staged)?;
        if !modified {
            trace!("Nothing changed, skipping write to {}", self.file_path);
            return Ok(result);
        }
        self.persist(&staged)?;
        *pets = staged;
        Ok(result)
    }
}

impl PetRepository for FilePetRepository {
    #[instrument(level = "info", skip(self), fields(file_path = %self.file_path))]
    fn insert(&mut self, pet: Pet) -> Result<Pet, PetRepositoryError> {
        self.mutate(|pets| pets.insert(pet).map(|stored| (stored, true)))
    }

    #[instrument(level = "debug", skip(self))]
    fn get_all(&self) -> Result<Vec<Pet>, PetRepositoryError> {
        let pets = self
            .pets
            .read()
            .map_err(|_| PetRepositoryError::LockPoisoned)?;
        Ok(pets.all())
    }

    #[instrument(level = "debug", skip(self))]
    fn get_by_id(&self, id: PetId) -> Result<Option<Pet>, PetRepositoryError> {
        let pets = self
            .pets
            .read()
            .map_err(|_| PetRepositoryError::LockPoisoned)?;
        Ok(pets.get(id))
    }

    #[instrument(level = "info", skip(self), fields(file_path = %self.file_path))]
    fn update(&mut self, pet: Pet) -> Result<Pet, PetRepositoryError> {
        self.mutate(|pets| pets.update(pet).map(|updated| (updated, true)))
    }

    #[instrument(level = "info", skip(self), fields(file_path = %self.file_path))]
    fn delete(&mut self, id: PetId) -> Result<bool, PetRepositoryError> {
        self.mutate(|pets| {
            let removed = pets.remove(id);
            Ok((removed, removed))
        })
    }
}
