/// Trait for receiving typed row changes from a realtime channel.
///
/// Every method defaults to a no-op so a listener implements only the
/// events it cares about. Handlers run on the transport's delivery context
/// and must be fast and non-blocking; queue anything heavy.
pub trait ChangeListener<T>: Send + Sync {
    /// A row was inserted.
    fn on_insert(&self, _new: T) {}

    /// A row was updated. `old` is present only when the backend publishes
    /// the prior row image.
    fn on_update(&self, _new: T, _old: Option<T>) {}

    /// A row was deleted.
    fn on_delete(&self, _old: T) {}
}
