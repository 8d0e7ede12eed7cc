//! Tokenpost — Posts context.
//!
//! Creation of private posts from untrusted input, and deletion guarded by
//! the secret token handed out when the post was created.

pub mod application;
pub mod domain;
