use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::change::{ChangeKind, EntityKind, RawChange, TableRecord};
use super::listener::ChangeListener;
use crate::errors::Result;

/// Handle to one open realtime channel.
pub trait ChannelHandle: Send + Sync {
    /// Stops delivery on this channel. Closing twice is a no-op.
    fn close(&self);

    /// Whether the channel is still delivering events.
    fn is_open(&self) -> bool;
}

/// Wire transport that opens filtered change feeds.
///
/// Implementations own the connection; the manager only keeps handles.
pub trait RealtimeTransport: Send + Sync {
    /// Opens one channel delivering changes to `table` rows whose `user_id`
    /// matches, invoking `handler` for every event.
    fn open_channel(
        &self,
        channel_name: &str,
        table: &str,
        user_id: Uuid,
        handler: Arc<dyn Fn(RawChange) + Send + Sync>,
    ) -> Result<Box<dyn ChannelHandle>>;
}

/// Keeps one live channel per entity type.
///
/// Ordering, dedup, and replay are entirely the transport's business; this
/// manager only routes events and owns the handles. Create one instance per
/// signed-in session and share it; it is not a process-wide singleton.
pub struct RealtimeManager {
    transport: Arc<dyn RealtimeTransport>,
    channels: DashMap<EntityKind, Box<dyn ChannelHandle>>,
}

impl RealtimeManager {
    /// Creates a new RealtimeManager instance
    pub fn new(transport: Arc<dyn RealtimeTransport>) -> Self {
        Self {
            transport,
            channels: DashMap::new(),
        }
    }

    /// Opens a change feed for `T` filtered to `user_id`, fanning events out
    /// to `listener`.
    ///
    /// A channel already registered for the same entity type is closed and
    /// removed first, so the replaced subscription cannot keep delivering.
    pub fn subscribe<T: TableRecord>(
        &self,
        user_id: Uuid,
        listener: Arc<dyn ChangeListener<T>>,
    ) -> Result<()> {
        let kind = T::KIND;
        debug!(
            "Subscribing to {} changes for user {}",
            kind.table(),
            user_id
        );

        if let Some((_, previous)) = self.channels.remove(&kind) {
            debug!("Closing replaced {} channel", kind.table());
            previous.close();
        }

        let handler: Arc<dyn Fn(RawChange) + Send + Sync> = Arc::new(move |change| {
            dispatch(change, listener.as_ref());
        });
        let handle =
            self.transport
                .open_channel(kind.channel(), kind.table(), user_id, handler)?;
        self.channels.insert(kind, handle);
        Ok(())
    }

    /// Closes and forgets the channel for one entity type. No-op when none
    /// is registered.
    pub fn unsubscribe(&self, kind: EntityKind) {
        if let Some((_, handle)) = self.channels.remove(&kind) {
            debug!("Unsubscribing from {} changes", kind.table());
            handle.close();
        }
    }

    /// Closes every open channel and clears the registry.
    pub fn unsubscribe_all(&self) {
        debug!("Unsubscribing from all realtime channels");
        let kinds: Vec<EntityKind> = self.channels.iter().map(|entry| *entry.key()).collect();
        for kind in kinds {
            if let Some((_, handle)) = self.channels.remove(&kind) {
                handle.close();
            }
        }
    }

    /// Whether a channel is currently registered for the entity type.
    pub fn is_subscribed(&self, kind: EntityKind) -> bool {
        self.channels.contains_key(&kind)
    }
}

fn dispatch<T: TableRecord>(change: RawChange, listener: &dyn ChangeListener<T>) {
    let table = T::KIND.table();
    match change.event_type {
        ChangeKind::Insert => {
            if let Some(new) = decode(table, "new", change.new) {
                listener.on_insert(new);
            }
        }
        ChangeKind::Update => {
            // The old image is optional on updates; tolerate its absence.
            let old = change.old.and_then(|value| serde_json::from_value(value).ok());
            if let Some(new) = decode(table, "new", change.new) {
                listener.on_update(new, old);
            }
        }
        ChangeKind::Delete => {
            if let Some(old) = decode(table, "old", change.old) {
                listener.on_delete(old);
            }
        }
    }
}

fn decode<T: DeserializeOwned>(
    table: &str,
    role: &str,
    value: Option<serde_json::Value>,
) -> Option<T> {
    let value = match value {
        Some(value) => value,
        None => {
            warn!("Skipping {} event with no {} row", table, role);
            return None;
        }
    };
    match serde_json::from_value(value) {
        Ok(row) => Some(row),
        Err(e) => {
            warn!("Skipping {} event with unreadable {} row: {}", table, role, e);
            None
        }
    }
}
