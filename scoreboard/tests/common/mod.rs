//! Shared test utilities for scoreboard integration tests

pub mod fakes;
pub mod fixtures;

pub use fakes::{FakeChannel, FakeSource, MemoryStore};
pub use fixtures::TestFixtures;
