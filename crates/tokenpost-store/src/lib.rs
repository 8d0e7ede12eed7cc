//! Record store implementations.
//!
//! `PgRecordStore` is the production store; `InMemoryRecordStore` backs
//! local runs without a database and the test suites.

pub mod memory_record_store;
pub mod pg_record_store;

pub use memory_record_store::InMemoryRecordStore;
pub use pg_record_store::PgRecordStore;
