mod pet;
pub mod config;
pub mod storage;
pub mod testing;

pub use pet::{Pet, PetId};
