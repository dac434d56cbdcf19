//! Dashboard module - the aggregated overview a signed-in seller lands on.

mod dashboard_model;
mod dashboard_service;
mod dashboard_traits;

#[cfg(test)]
mod dashboard_service_tests;

// Re-export the public interface
pub use dashboard_model::DashboardData;
pub use dashboard_service::DashboardService;
pub use dashboard_traits::DashboardServiceTrait;
