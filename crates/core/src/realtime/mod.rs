//! Realtime module - live change feeds scoped to one user.
//!
//! The wire transport is an external collaborator. This module defines the
//! change payload it delivers, the listener trait consumers implement, and
//! the manager that keeps one open channel per entity type.

mod change;
mod listener;
mod manager;


// Re-export the public interface
pub use change::{ChangeKind, EntityKind, RawChange, TableRecord};
pub use listener::ChangeListener;
pub use manager::{ChannelHandle, RealtimeManager, RealtimeTransport};
