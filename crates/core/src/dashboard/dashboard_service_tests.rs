#[cfg(test)]
mod tests {
    use crate::constants::{DASHBOARD_RECENT_KPIS, DASHBOARD_RECENT_SYNC_LOGS};
    use crate::dashboard::{DashboardService, DashboardServiceTrait};
    use crate::errors::Result;
    use crate::integrations::{
        Integration, IntegrationServiceTrait, IntegrationStatus, IntegrationUpdate,
        NewIntegration, Platform, SyncFrequency,
    };
    use crate::kpis::{
        KpiRecord, KpiServiceTrait, KpiSummary, KpiUnit, KpiUpdate, NewKpi, Trend,
    };
    use crate::sync::{
        NewSyncLog, RecentActivityEntry, SyncLog, SyncLogServiceTrait, SyncStatus,
    };
    use crate::Error;
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    fn create_test_kpi(user_id: Uuid, metric_name: &str) -> KpiRecord {
        KpiRecord {
            id: Uuid::new_v4(),
            user_id,
            metric_name: metric_name.to_string(),
            value: dec!(45000),
            target: dec!(50000),
            unit: KpiUnit::Currency,
            category: "Revenue".to_string(),
            change_percent: dec!(12.5),
            trend: Trend::Up,
            recorded_at: Utc::now(),
        }
    }

    fn create_test_integration(user_id: Uuid) -> Integration {
        Integration {
            id: Uuid::new_v4(),
            user_id,
            platform: Platform::Shopify,
            status: IntegrationStatus::Connected,
            api_key: None,
            store_name: "North Star Goods".to_string(),
            sync_frequency: SyncFrequency::Daily,
            last_sync: Some(Utc::now()),
            created_at: Utc::now(),
        }
    }

    fn create_test_activity(user_id: Uuid) -> RecentActivityEntry {
        RecentActivityEntry {
            log: SyncLog {
                id: Uuid::new_v4(),
                user_id,
                integration_id: Uuid::new_v4(),
                status: SyncStatus::Success,
                error_message: None,
                synced_at: Utc::now(),
            },
            platform: Some(Platform::Shopify),
            store_name: Some("North Star Goods".to_string()),
        }
    }

    #[derive(Clone, Default)]
    struct MockKpiService {
        kpis: Arc<Mutex<Vec<KpiRecord>>>,
        recent_limit: Arc<Mutex<Option<i64>>>,
        fail: Arc<Mutex<bool>>,
    }

    #[async_trait]
    impl KpiServiceTrait for MockKpiService {
        async fn get_kpis(&self) -> Result<Vec<KpiRecord>> {
            unimplemented!()
        }

        async fn get_recent_kpis(&self, limit: i64) -> Result<Vec<KpiRecord>> {
            *self.recent_limit.lock().unwrap() = Some(limit);
            let kpis = self.kpis.lock().unwrap().clone();
            Ok(kpis.into_iter().take(limit as usize).collect())
        }

        async fn get_kpis_by_category(&self, _category: &str) -> Result<Vec<KpiRecord>> {
            unimplemented!()
        }

        async fn get_kpi(&self, _kpi_id: Uuid) -> Result<KpiRecord> {
            unimplemented!()
        }

        async fn create_kpi(&self, _new_kpi: NewKpi) -> Result<KpiRecord> {
            unimplemented!()
        }

        async fn update_kpi(&self, _kpi_id: Uuid, _update: KpiUpdate) -> Result<KpiRecord> {
            unimplemented!()
        }

        async fn delete_kpi(&self, _kpi_id: Uuid) -> Result<()> {
            unimplemented!()
        }

        async fn get_summary(&self) -> Result<KpiSummary> {
            if *self.fail.lock().unwrap() {
                return Err(Error::Unauthenticated);
            }
            let kpis = self.kpis.lock().unwrap();
            Ok(KpiSummary::from_records(&kpis))
        }
    }

    #[derive(Clone, Default)]
    struct MockIntegrationService {
        integrations: Arc<Mutex<Vec<Integration>>>,
    }

    #[async_trait]
    impl IntegrationServiceTrait for MockIntegrationService {
        async fn get_integrations(&self) -> Result<Vec<Integration>> {
            Ok(self.integrations.lock().unwrap().clone())
        }

        async fn get_integration(&self, _integration_id: Uuid) -> Result<Integration> {
            unimplemented!()
        }

        async fn connect_integration(
            &self,
            _new_integration: NewIntegration,
        ) -> Result<Integration> {
            unimplemented!()
        }

        async fn update_integration(
            &self,
            _integration_id: Uuid,
            _update: IntegrationUpdate,
        ) -> Result<Integration> {
            unimplemented!()
        }

        async fn delete_integration(&self, _integration_id: Uuid) -> Result<()> {
            unimplemented!()
        }
    }

    #[derive(Clone, Default)]
    struct MockSyncLogService {
        activity: Arc<Mutex<Vec<RecentActivityEntry>>>,
        activity_limit: Arc<Mutex<Option<i64>>>,
    }

    #[async_trait]
    impl SyncLogServiceTrait for MockSyncLogService {
        async fn get_sync_logs(&self, _limit: Option<i64>) -> Result<Vec<SyncLog>> {
            unimplemented!()
        }

        async fn record_log(&self, _new_log: NewSyncLog) -> Result<SyncLog> {
            unimplemented!()
        }

        async fn recent_activity(&self, limit: i64) -> Result<Vec<RecentActivityEntry>> {
            *self.activity_limit.lock().unwrap() = Some(limit);
            let activity = self.activity.lock().unwrap().clone();
            Ok(activity.into_iter().take(limit as usize).collect())
        }
    }

    fn setup() -> (
        Arc<MockKpiService>,
        Arc<MockIntegrationService>,
        Arc<MockSyncLogService>,
        DashboardService,
    ) {
        let kpi_service = Arc::new(MockKpiService::default());
        let integration_service = Arc::new(MockIntegrationService::default());
        let sync_log_service = Arc::new(MockSyncLogService::default());
        let service = DashboardService::new(
            kpi_service.clone(),
            integration_service.clone(),
            sync_log_service.clone(),
        );
        (kpi_service, integration_service, sync_log_service, service)
    }

    #[tokio::test]
    async fn test_overview_assembles_all_sections() {
        // Setup
        let user_id = Uuid::new_v4();
        let (kpi_service, integration_service, sync_log_service, service) = setup();
        kpi_service
            .kpis
            .lock()
            .unwrap()
            .push(create_test_kpi(user_id, "Monthly Revenue"));
        integration_service
            .integrations
            .lock()
            .unwrap()
            .push(create_test_integration(user_id));
        sync_log_service
            .activity
            .lock()
            .unwrap()
            .push(create_test_activity(user_id));

        // Execute
        let overview = service.overview().await.unwrap();

        // Assert
        assert_eq!(overview.summary.total_kpis, 1);
        assert_eq!(overview.summary.trends_up, 1);
        assert_eq!(overview.recent_kpis.len(), 1);
        assert_eq!(overview.recent_kpis[0].metric_name, "Monthly Revenue");
        assert_eq!(overview.integrations.len(), 1);
        assert_eq!(overview.recent_activity.len(), 1);
        assert_eq!(
            overview.recent_activity[0].store_name.as_deref(),
            Some("North Star Goods")
        );
    }

    #[tokio::test]
    async fn test_overview_caps_recent_sections() {
        // Setup
        let (kpi_service, _, sync_log_service, service) = setup();

        // Execute
        service.overview().await.unwrap();

        // Assert: the recent sections ask for fixed page sizes
        assert_eq!(
            *kpi_service.recent_limit.lock().unwrap(),
            Some(DASHBOARD_RECENT_KPIS)
        );
        assert_eq!(
            *sync_log_service.activity_limit.lock().unwrap(),
            Some(DASHBOARD_RECENT_SYNC_LOGS)
        );
    }

    #[tokio::test]
    async fn test_overview_propagates_section_errors() {
        // Setup
        let (kpi_service, _, _, service) = setup();
        *kpi_service.fail.lock().unwrap() = true;

        // Execute
        let result = service.overview().await;

        // Assert
        assert!(matches!(result, Err(Error::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_overview_with_no_data() {
        // Setup: a brand-new account with nothing recorded yet
        let (_, _, _, service) = setup();

        // Execute
        let overview = service.overview().await.unwrap();

        // Assert
        assert_eq!(overview.summary.total_kpis, 0);
        assert_eq!(overview.summary.average_progress, rust_decimal::Decimal::ZERO);
        assert!(overview.recent_kpis.is_empty());
        assert!(overview.integrations.is_empty());
        assert!(overview.recent_activity.is_empty());
    }
}
