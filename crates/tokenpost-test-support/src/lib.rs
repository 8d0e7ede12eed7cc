//! Shared test mocks and utilities for the Tokenpost API.

mod clock;
mod repository;
mod rng;

pub use clock::FixedClock;
pub use repository::{FailingRecordStore, FaultInjectingRecordStore};
pub use rng::{MockRng, SequenceRng};
