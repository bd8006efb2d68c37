use pet_store_common::{Pet, PetId, storage::pets::PetRepository};
use tracing::{debug, info, instrument, warn};

use crate::error::PetServiceError;

pub const PET_DELETED: &str = "Pet was deleted!";
pub const PET_NOT_DELETED: &str = "Pet was not deleted";

type Result<T> = std::result::Result<T, PetServiceError>;

/// Business operations over pets. All persistence goes through `R`.
#[derive(Clone, Debug)]
pub struct PetService<R: PetRepository> {
    repository: R,
}

impl<R: PetRepository> PetService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Stores a new pet and returns a confirmation naming its assigned id.
    #[instrument(level = "info", skip_all, fields(name = %pet.name))]
    pub fn insert(&mut self, pet: Pet) -> Result<String> {
        let stored = self.repository.insert(pet)?;
        let id = stored.id.ok_or(PetServiceError::IdNotAssigned)?;
        info!(%id, "Inserted pet");
        Ok(format!("Your new pet id is: {}", id))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn get_number_of_pets(&self) -> Result<usize> {
        let count = self.repository.get_all()?.len();
        debug!(count, "Counted pets");
        Ok(count)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn list_pets(&self) -> Result<Vec<Pet>> {
        Ok(self.repository.get_all()?)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn get_pet(&self, id: PetId) -> Result<Option<Pet>> {
        Ok(self.repository.get_by_id(id)?)
    }

    /// Renames the pet with `id`, leaving its other fields as they are.
    ///
    /// Fails with [`PetServiceError::PetNotFound`] if there is no such pet;
    /// nothing is written in that case.
    #[instrument(level = "info", skip(self))]
    pub fn update_name(&mut self, id: PetId, new_name: &str) -> Result<Pet> {
        let Some(pet) = self.repository.get_by_id(id)? else {
            warn!("Cannot rename missing pet");
            return Err(PetServiceError::PetNotFound(id));
        };
        let updated = self.repository.update(pet.with_name(new_name))?;
        info!("Renamed pet");
        Ok(updated)
    }

    #[instrument(level = "info", skip(self))]
    pub fn delete_pet(&mut self, id: PetId) -> Result<String> {
        if self.repository.delete(id)? {
            info!("Deleted pet");
            Ok(PET_DELETED.to_string())
        } else {
            debug!("No pet to delete");
            Ok(PET_NOT_DELETED.to_string())
        }
    }
}
