//! Pure domain logic: no I/O, no store access.

pub mod authorization;
pub mod commands;
pub mod sanitize;
pub mod token;
pub mod validation;
