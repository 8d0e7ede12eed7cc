//! Tokenpost Core — shared domain abstractions.
//!
//! This crate defines the record model, the record store contract and the
//! injectable clock/RNG seams that the posts context and the store
//! implementations depend on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod record;
pub mod repository;
pub mod rng;
