use std::path::Path;

use config::ConfigError;
use serde::{Deserialize, Serialize};

use crate::storage::pets::{
    FilePetRepository, InMemoryPetRepository, PetRepositoryInitializationError, PetStorage,
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum PetStorageConfig {
    #[serde(rename = "InMemory")]
    InMemory,
    #[serde(rename = "File")]
    File {
        /// file path where pet state will be stored
        state_file: String,
    },
}

impl PetStorageConfig {
    /// Validate that the pet storage configuration is complete and usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            PetStorageConfig::InMemory => Ok(()),
            PetStorageConfig::File { state_file } => {
                if state_file.is_empty() {
                    return Err(ConfigError::Message(
                        "Pet storage state_file cannot be empty".to_string(),
                    ));
                }

                // A bare file name lives in the working directory
                let parent = Path::new(state_file)
                    .parent()
                    .filter(|parent| !parent.as_os_str().is_empty());
                if let Some(parent) = parent {
                    if !parent.exists() {
                        return Err(ConfigError::Message(format!(
                            "Pet storage state_file parent directory does not exist: {}",
                            parent.display()
                        )));
                    }
                }

                Ok(())
            }
        }
    }

    /// Creates a pet storage instance based on the given configuration.
    pub fn build_pet_storage(&self) -> Result<PetStorage, PetRepositoryInitializationError> {
        match self {
            PetStorageConfig::File { state_file } => Ok(PetStorage::File(
                FilePetRepository::new(state_file.clone())?,
            )),
            PetStorageConfig::InMemory => Ok(PetStorage::InMemory(InMemoryPetRepository::new())),
        }
    }
}
