//! Command abstractions.

use uuid::Uuid;

/// Trait that all catalogue commands implement.
///
/// Every command is issued on behalf of a signed-in user; identity itself
/// is resolved by the auth provider before the command is built.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;

    /// The user the command acts for.
    fn actor_id(&self) -> Uuid;
}
