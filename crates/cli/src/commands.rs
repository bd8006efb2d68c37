use clap::Subcommand;
use pet_store_common::{Pet, PetId, storage::pets::PetRepository};
use pet_store_service::{PetService, PetServiceError};
use tracing::instrument;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a new pet and print its id
    Insert {
        #[arg(long)]
        name: String,
        #[arg(long)]
        species: String,
        #[arg(long)]
        food: String,
    },
    /// Print how many pets are stored
    Count,
    /// Print every stored pet
    List,
    /// Print a single pet
    Show { id: PetId },
    /// Give a pet a new name
    Rename { id: PetId, new_name: String },
    /// Remove a pet
    Delete { id: PetId },
}

impl Command {
    /// Runs the command and returns what should be printed.
    #[instrument(level = "debug", skip(service))]
    pub fn run<R: PetRepository>(
        self,
        service: &mut PetService<R>,
    ) -> Result<String, PetServiceError> {
        match self {
            Command::Insert {
                name,
                species,
                food,
            } => service.insert(Pet::new(name, species, food)),
            Command::Count => Ok(service.get_number_of_pets()?.to_string()),
            Command::List => {
                let pets = service.list_pets()?;
                if pets.is_empty() {
                    return Ok("No pets stored".to_string());
                }
                Ok(pets
                    .iter()
                    .map(Pet::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Command::Show { id } => Ok(match service.get_pet(id)? {
                Some(pet) => pet.to_string(),
                None => format!("No pet with id {}", id),
            }),
            Command::Rename { id, new_name } => {
                Ok(service.update_name(id, &new_name)?.to_string())
            }
            Command::Delete { id } => service.delete_pet(id),
        }
    }
}
