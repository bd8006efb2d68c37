#![cfg(any(test, feature = "testing"))]

// Test doubles for pet_store_common
//
// MockPetRepository answers from stubbed per-input results instead of storing
// anything, so services can be tested without a real backend.
//
// Usage:
// - Construct a fresh mock per test and stub only what the test needs
// - Use set_should_fail to exercise error propagation
// - Inspect calls() to check what the code under test asked for

pub mod mock_pet_repository;

pub use mock_pet_repository::{MockCall, MockPetRepository};
