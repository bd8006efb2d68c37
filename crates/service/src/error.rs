use pet_store_common::PetId;

#[derive(Debug, thiserror::Error)]
pub enum PetServiceError {
    #[error("No pet with id {0}")]
    PetNotFound(PetId),
    #[error("Storage returned an inserted pet without an id")]
    IdNotAssigned,
    #[error("Pet repository error: {0}")]
    Repository(#[from] pet_store_common::storage::pets::PetRepositoryError),
}
