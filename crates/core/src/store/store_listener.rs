use std::sync::{Arc, Mutex};

use crate::integrations::Integration;
use crate::kpis::KpiRecord;
use crate::realtime::ChangeListener;

use super::dashboard_store::DashboardStore;

/// Bridges realtime channel events into the dashboard store.
///
/// Transport handlers run off the UI context, so the listener owns the one
/// lock in the store's world; UI-side mutations go through the same handle.
pub struct StoreListener {
    store: Arc<Mutex<DashboardStore>>,
}

impl StoreListener {
    /// Creates a new StoreListener instance
    pub fn new(store: Arc<Mutex<DashboardStore>>) -> Self {
        Self { store }
    }
}

impl ChangeListener<KpiRecord> for StoreListener {
    fn on_insert(&self, new: KpiRecord) {
        self.store.lock().unwrap().upsert_kpi(new);
    }

    fn on_update(&self, new: KpiRecord, _old: Option<KpiRecord>) {
        self.store.lock().unwrap().upsert_kpi(new);
    }

    fn on_delete(&self, old: KpiRecord) {
        self.store.lock().unwrap().delete_kpi(old.id);
    }
}

impl ChangeListener<Integration> for StoreListener {
    fn on_insert(&self, new: Integration) {
        self.store.lock().unwrap().upsert_integration(new);
    }

    fn on_update(&self, new: Integration, _old: Option<Integration>) {
        self.store.lock().unwrap().upsert_integration(new);
    }

    fn on_delete(&self, old: Integration) {
        self.store.lock().unwrap().remove_integration(old.id);
    }
}
