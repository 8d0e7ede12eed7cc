//! Application services that orchestrate domain logic against a store.

pub mod authorization;
pub mod command_handlers;
