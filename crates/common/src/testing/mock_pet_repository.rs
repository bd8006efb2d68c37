use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::{
    Pet, PetId,
    storage::pets::{PetRepository, PetRepositoryError},
};

/// A call received by [`MockPetRepository`], in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum MockCall {
    Insert(Pet),
    GetAll,
    GetById(PetId),
    Update(Pet),
    Delete(PetId),
}

#[derive(Debug, Default)]
struct MockState {
    insert_results: Vec<(Pet, Pet)>,
    all_pets: Vec<Pet>,
    by_id: HashMap<PetId, Option<Pet>>,
    update_results: Vec<(Pet, Pet)>,
    delete_results: HashMap<PetId, bool>,
    should_fail: bool,
    calls: Vec<MockCall>,
}

/// Mock pet repository for testing
///
/// Returns whatever was stubbed for a given input instead of storing
/// anything. Unstubbed reads answer like an empty store (`[]`, `None`,
/// `false`). Unstubbed `insert`/`update` fail, since there is no sensible
/// pet to hand back.
#[derive(Clone, Debug, Default)]
pub struct MockPetRepository {
    state: Arc<RwLock<MockState>>,
}

impl MockPetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stub `insert(input)` to return `returned`
    pub fn on_insert(&mut self, input: Pet, returned: Pet) {
        if let Ok(mut state) = self.state.write() {
            state.insert_results.push((input, returned));
        }
    }

    /// Stub `get_all()` to return `pets`
    pub fn on_get_all(&mut self, pets: Vec<Pet>) {
        if let Ok(mut state) = self.state.write() {
            state.all_pets = pets;
        }
    }

    /// Stub `get_by_id(id)` to return `pet`
    pub fn on_get_by_id(&mut self, id: PetId, pet: Option<Pet>) {
        if let Ok(mut state) = self.state.write() {
            state.by_id.insert(id, pet);
        }
    }

    /// Stub `update(input)` to return `returned`
    pub fn on_update(&mut self, input: Pet, returned: Pet) {
        if let Ok(mut state) = self.state.write() {
            state.update_results.push((input, returned));
        }
    }

    /// Stub `delete(id)` to return `deleted`
    pub fn on_delete(&mut self, id: PetId, deleted: bool) {
        if let Ok(mut state) = self.state.write() {
            state.delete_results.insert(id, deleted);
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&mut self, should_fail: bool) {
        if let Ok(mut state) = self.state.write() {
            state.should_fail = should_fail;
        }
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<MockCall> {
        self.state
            .read()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    /// Records the call, then answers it from the stubbed state.
    fn respond<T>(
        &self,
        call: MockCall,
        answer: impl FnOnce(&MockState) -> Result<T, PetRepositoryError>,
    ) -> Result<T, PetRepositoryError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| PetRepositoryError::LockPoisoned)?;
        state.calls.push(call);
        if state.should_fail {
            return Err(PetRepositoryError::Custom("Mock failure".to_string()));
        }
        answer(&*state)
    }
}

fn stubbed_for(results: &[(Pet, Pet)], input: &Pet) -> Option<Pet> {
    results
        .iter()
        .rev()
        .find(|(stubbed_input, _)| stubbed_input == input)
        .map(|(_, returned)| returned.clone())
}

impl PetRepository for MockPetRepository {
    fn insert(&mut self, pet: Pet) -> Result<Pet, PetRepositoryError> {
        self.respond(MockCall::Insert(pet.clone()), |state| {
            stubbed_for(&state.insert_results, &pet).ok_or_else(|| {
                PetRepositoryError::Custom(format!("No stubbed response for insert({:?})", pet))
            })
        })
    }

    fn get_all(&self) -> Result<Vec<Pet>, PetRepositoryError> {
        self.respond(MockCall::GetAll, |state| Ok(state.all_pets.clone()))
    }

    fn get_by_id(&self, id: PetId) -> Result<Option<Pet>, PetRepositoryError> {
        self.respond(MockCall::GetById(id), |state| {
            Ok(state.by_id.get(&id).cloned().flatten())
        })
    }

    fn update(&mut self, pet: Pet) -> Result<Pet, PetRepositoryError> {
        self.respond(MockCall::Update(pet.clone()), |state| {
            stubbed_for(&state.update_results, &pet).ok_or_else(|| {
                PetRepositoryError::Custom(format!("No stubbed response for update({:?})", pet))
            })
        })
    }

    fn delete(&mut self, id: PetId) -> Result<bool, PetRepositoryError> {
        self.respond(MockCall::Delete(id), |state| {
            Ok(state.delete_results.get(&id).copied().unwrap_or(false))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_stubbed_results_per_input() {
        let mut mock = MockPetRepository::new();
        let geodude = Pet::new("Geodude", "Rock", "Pokefood");
        mock.on_insert(geodude.clone(), Pet::with_id(1, "Geodude", "Rock", "Pokefood"));
        mock.on_delete(PetId::new(1), true);

        let stored = mock.insert(geodude).unwrap();
        assert_eq!(stored.id, Some(PetId::new(1)));
        assert!(mock.delete(PetId::new(1)).unwrap());
    }

    #[test]
    fn test_unstubbed_calls_answer_like_an_empty_store() {
        let mut mock = MockPetRepository::new();

        assert!(mock.get_all().unwrap().is_empty());
        assert!(mock.get_by_id(PetId::new(1)).unwrap().is_none());
        assert!(!mock.delete(PetId::new(1)).unwrap());

        let result = mock.insert(Pet::new("Geodude", "Rock", "Pokefood"));
        assert!(matches!(result, Err(PetRepositoryError::Custom(_))));
        let result = mock.update(Pet::with_id(1, "Geodude", "Rock", "Pokefood"));
        assert!(matches!(result, Err(PetRepositoryError::Custom(_))));
    }

    #[test]
    fn test_should_fail_fails_every_call_but_still_records_it() {
        let mut mock = MockPetRepository::new();
        mock.on_get_all(vec![Pet::with_id(1, "Geodude", "Rock", "Pokefood")]);
        mock.set_should_fail(true);

        assert!(mock.get_all().is_err());
        assert!(mock.delete(PetId::new(1)).is_err());
        assert_eq!(
            mock.calls(),
            vec![MockCall::GetAll, MockCall::Delete(PetId::new(1))]
        );
    }

    #[test]
    fn test_later_stub_wins() {
        let mut mock = MockPetRepository::new();
        let pet = Pet::with_id(1, "Pick", "mouse", "apples");
        mock.on_update(pet.clone(), pet.with_name("first"));
        mock.on_update(pet.clone(), pet.with_name("second"));

        assert_eq!(mock.update(pet).unwrap().name, "second");
    }
}
