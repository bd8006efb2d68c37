mod error;
mod pet_service;

pub use error::PetServiceError;
pub use pet_service::{PET_DELETED, PET_NOT_DELETED, PetService};
