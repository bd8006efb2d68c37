mod pet_storage_config;

pub use pet_storage_config::PetStorageConfig;
