//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every request-level command (create, delete).
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command, used as a log field.
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through handler and store logs.
    fn correlation_id(&self) -> Uuid;
}
