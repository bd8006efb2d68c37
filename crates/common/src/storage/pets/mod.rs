mod file_pet_repository;
mod in_memory_pet_repository;

pub use file_pet_repository::FilePetRepository;
pub use in_memory_pet_repository::InMemoryPetRepository;

use std::fmt::Debug;

use thiserror::Error;

use crate::{Pet, PetId};

#[derive(Debug, Error)]
pub enum PetRepositoryError {
    #[error("Pet not found: {0}")]
    PetNotFound(PetId),
    #[error("Pet has no id; it must be inserted before it can be updated")]
    MissingId,
    #[error("No pet ids left to assign")]
    IdsExhausted,
    #[error("Pet storage lock poisoned")]
    LockPoisoned,
    #[error("{0}")]
    PersistenceError(#[from] PetRepositoryPersistenceError),
    #[error("Pet repository error: {0}")]
    Custom(String),
}

#[derive(Debug, Error)]
#[error("Initialization error: {0}")]
pub struct PetRepositoryInitializationError(String);

#[derive(Debug, Error)]
#[error("Persistence error: {0}")]
pub struct PetRepositoryPersistenceError(String);

type Result<T> = std::result::Result<T, PetRepositoryError>;

/// Data access for [`Pet`] records.
///
/// Identifiers are owned by the repository: `insert` assigns one and ignores
/// whatever id the caller passed in. Clones share the same underlying state.
pub trait PetRepository: Clone + Debug + Send + Sync {
    /// Stores a new pet and returns it with its freshly assigned id.
    fn insert(&mut self, pet: Pet) -> Result<Pet>;
    /// All stored pets, ordered by id.
    fn get_all(&self) -> Result<Vec<Pet>>;
    fn get_by_id(&self, id: PetId) -> Result<Option<Pet>>;
    /// Persists the current field values of an already stored pet.
    fn update(&mut self, pet: Pet) -> Result<Pet>;
    /// Returns whether a pet with this id existed and was removed.
    fn delete(&mut self, id: PetId) -> Result<bool>;
}

/// Enum wrapper to support different pet repository implementations
///
/// Lets applications pick a backend (File or InMemory) from configuration
/// while the service stays generic over [`PetRepository`].
#[derive(Clone, Debug)]
pub enum PetStorage {
    File(FilePetRepository),
    InMemory(InMemoryPetRepository),
    #[cfg(any(test, feature = "testing"))]
    Mock(crate::testing::MockPetRepository),
}

impl PetRepository for PetStorage {
    fn insert(&mut self, pet: Pet) -> Result<Pet> {
        match self {
            PetStorage::File(repo) => repo.insert(pet),
            PetStorage::InMemory(repo) => repo.insert(pet),
            #[cfg(any(test, feature = "testing"))]
            PetStorage::Mock(repo) => repo.insert(pet),
        }
    }

    fn get_all(&self) -> Result<Vec<Pet>> {
        match self {
            PetStorage::File(repo) => repo.get_all(),
            PetStorage::InMemory(repo) => repo.get_all(),
            #[cfg(any(test, feature = "testing"))]
            PetStorage::Mock(repo) => repo.get_all(),
        }
    }

    fn get_by_id(&self, id: PetId) -> Result<Option<Pet>> {
        match self {
            PetStorage::File(repo) => repo.get_by_id(id),
            PetStorage::InMemory(repo) => repo.get_by_id(id),
            #[cfg(any(test, feature = "testing"))]
            PetStorage::Mock(repo) => repo.get_by_id(id),
        }
    }

    fn update(&mut self, pet: Pet) -> Result<Pet> {
        match self {
            PetStorage::File(repo) => repo.update(pet),
            PetStorage::InMemory(repo) => repo.update(pet),
            #[cfg(any(test, feature = "testing"))]
            PetStorage::Mock(repo) => repo.update(pet),
        }
    }

    fn delete(&mut self, id: PetId) -> Result<bool> {
        match self {
            PetStorage::File(repo) => repo.delete(id),
            PetStorage::InMemory(repo) => repo.delete(id),
            #[cfg(any(test, feature = "testing"))]
            PetStorage::Mock(repo) => repo.delete(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCall, MockPetRepository};

    #[test]
    fn test_storage_dispatches_to_in_memory() {
        let mut storage = PetStorage::InMemory(InMemoryPetRepository::new());

        let stored = storage.insert(Pet::new("Geodude", "Rock", "Pokefood")).unwrap();
        assert_eq!(stored.id, Some(PetId::new(1)));
        assert_eq!(storage.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_storage_dispatches_to_mock() {
        let mut mock = MockPetRepository::new();
        mock.on_delete(PetId::new(3), true);
        let mut storage = PetStorage::Mock(mock.clone());

        assert!(storage.delete(PetId::new(3)).unwrap());
        assert_eq!(mock.calls(), vec![MockCall::Delete(PetId::new(3))]);
    }
}
