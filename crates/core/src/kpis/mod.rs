//! KPIs module - domain models, services, and traits.

mod kpis_constants;
mod kpis_model;
mod kpis_service;
mod kpis_traits;


#[cfg(test)]
mod kpis_service_tests;

// Re-export the public interface
pub use kpis_constants::*;
pub use kpis_model::{
    format_kpi_value, is_on_track, progress, KpiDraft, KpiRecord, KpiSummary, KpiUnit, KpiUpdate,
    NewKpi, Trend,
};
pub use kpis_service::KpiService;
pub use kpis_traits::{KpiRepositoryTrait, KpiServiceTrait};
