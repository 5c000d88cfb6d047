//! Service layer
//!
//! Services hold the watcher's side effects that are not part of the poll
//! decision itself. They are trait-based so the poller can be tested with
//! fakes.

mod notifier;

// Re-export traits
pub use notifier::NotificationService;

// Re-export implementations
pub use notifier::ChatNotifier;
