use pet_store_common::config::PetStorageConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Default location of the pet state file, relative to the working directory
const DEFAULT_STATE_FILE: &str = "pets.json";

fn default_storage() -> PetStorageConfig {
    PetStorageConfig::File {
        state_file: DEFAULT_STATE_FILE.to_string(),
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CliConfig {
    /// Where pets are stored
    /// Defaults to a `File` store at [`DEFAULT_STATE_FILE`]
    #[serde(default = "default_storage")]
    pub storage: PetStorageConfig,
}

impl CliConfig {
    /// Load configuration from multiple sources in order of priority:
    /// 1. Configuration file (pet_store.toml, pet_store.yaml, pet_store.json)
    /// 2. Environment variables (prefixed with PET_STORE_, nested with __)
    pub fn load() -> Result<Self, ConfigError> {
        Self::build("pet_store", false)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        Self::build(path, true)
    }

    fn build(file_name: &str, required: bool) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(file_name).required(required))
            .add_source(
                Environment::with_prefix("PET_STORE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let cli_config: Self = config.try_deserialize()?;

        cli_config.validate()?;

        Ok(cli_config)
    }

    /// Validate that the configuration is complete and usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> String {
        let path = dir.path().join("pet_store.toml");
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_in_memory_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[storage]\ntype = \"InMemory\"\n");

        let config = CliConfig::load_from_file(&path).unwrap();
        assert_eq!(config.storage, PetStorageConfig::InMemory);
    }

    #[test]
    fn test_load_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("pets.json").to_string_lossy().into_owned();
        let path = write_config(
            &dir,
            &format!("[storage]\ntype = \"File\"\nstate_file = {:?}\n", state_file),
        );

        let config = CliConfig::load_from_file(&path).unwrap();
        assert_eq!(config.storage, PetStorageConfig::File { state_file });
    }

    #[test]
    fn test_storage_defaults_to_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "# nothing configured\n");

        let config = CliConfig::load_from_file(&path).unwrap();
        assert_eq!(config.storage, default_storage());
    }

    #[test]
    fn test_invalid_storage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "[storage]\ntype = \"File\"\nstate_file = \"/this/directory/should/not/exist/hopefully/12345/pets.json\"\n",
        );

        let result = CliConfig::load_from_file(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml").to_string_lossy().into_owned();

        assert!(CliConfig::load_from_file(&path).is_err());
    }
}
