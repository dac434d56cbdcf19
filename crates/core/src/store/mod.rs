//! Store module - client-side dashboard state.
//!
//! The store is a plain owned value mutated through `&mut self`; callers on
//! the UI's single execution context need no locking. `StoreListener` is the
//! bridge for realtime deliveries, which arrive on other threads and go
//! through a mutex it owns.

mod dashboard_store;
mod store_listener;


// Re-export the public interface
pub use dashboard_store::{DashboardStore, KpiSample, NewStoreKpi, StoreKpi, StoreKpiUpdate};
pub use store_listener::StoreListener;
