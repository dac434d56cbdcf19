#[cfg(test)]
mod tests {
    use crate::auth::MockSessionProvider;
    use crate::errors::{BackendError, Result};
    use crate::integrations::{
        Integration, IntegrationRepositoryTrait, IntegrationStatus, IntegrationUpdate,
        NewIntegration, Platform, SyncFrequency,
    };
    use crate::kpis::{KpiRecord, KpiRepositoryTrait, KpiUnit, KpiUpdate, NewKpi};
    use crate::sync::{
        NewSyncLog, PlatformConnectorTrait, PlatformMetric, SyncLog, SyncLogRepositoryTrait,
        SyncRunner, SyncRunnerTrait, SyncStatus,
    };
    use crate::Error;
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    // --- Mock IntegrationRepository ---
    #[derive(Clone, Default)]
    struct MockIntegrationRepository {
        integrations: Arc<Mutex<Vec<Integration>>>,
        calls: Arc<Mutex<usize>>,
    }

    impl MockIntegrationRepository {
        fn new() -> Self {
            Self::default()
        }

        fn add_integration(&self, integration: Integration) {
            self.integrations.lock().unwrap().push(integration);
        }

        fn get(&self, id: Uuid) -> Option<Integration> {
            self.integrations
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id == id)
                .cloned()
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl IntegrationRepositoryTrait for MockIntegrationRepository {
        async fn list(&self, user_id: Uuid) -> Result<Vec<Integration>> {
            *self.calls.lock().unwrap() += 1;
            Ok(self
                .integrations
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn get_by_id(&self, user_id: Uuid, integration_id: Uuid) -> Result<Integration> {
            *self.calls.lock().unwrap() += 1;
            self.integrations
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.user_id == user_id && i.id == integration_id)
                .cloned()
                .ok_or_else(|| Error::Backend(BackendError::NotFound(integration_id.to_string())))
        }

        async fn create(&self, _user_id: Uuid, _new: NewIntegration) -> Result<Integration> {
            unimplemented!()
        }

        async fn update(
            &self,
            user_id: Uuid,
            integration_id: Uuid,
            update: IntegrationUpdate,
        ) -> Result<Integration> {
            *self.calls.lock().unwrap() += 1;
            let mut integrations = self.integrations.lock().unwrap();
            let integration = integrations
                .iter_mut()
                .find(|i| i.user_id == user_id && i.id == integration_id)
                .ok_or_else(|| Error::Backend(BackendError::NotFound(integration_id.to_string())))?;
            if let Some(status) = update.status {
                integration.status = status;
            }
            if let Some(last_sync) = update.last_sync {
                integration.last_sync = Some(last_sync);
            }
            Ok(integration.clone())
        }

        async fn delete(&self, _user_id: Uuid, _integration_id: Uuid) -> Result<()> {
            unimplemented!()
        }
    }

    // --- Mock KpiRepository ---
    #[derive(Clone, Default)]
    struct MockKpiRepository {
        records: Arc<Mutex<Vec<KpiRecord>>>,
    }

    impl MockKpiRepository {
        fn new() -> Self {
            Self::default()
        }

        fn add_record(&self, record: KpiRecord) {
            self.records.lock().unwrap().push(record);
        }

        fn records(&self) -> Vec<KpiRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl KpiRepositoryTrait for MockKpiRepository {
        async fn list(&self, user_id: Uuid, _limit: Option<i64>) -> Result<Vec<KpiRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn list_by_category(
            &self,
            _user_id: Uuid,
            _category: &str,
        ) -> Result<Vec<KpiRecord>> {
            unimplemented!()
        }

        async fn get_by_id(&self, _user_id: Uuid, _kpi_id: Uuid) -> Result<KpiRecord> {
            unimplemented!()
        }

        async fn create(&self, user_id: Uuid, new_kpi: NewKpi) -> Result<KpiRecord> {
            let record = KpiRecord {
                id: Uuid::new_v4(),
                user_id,
                metric_name: new_kpi.metric_name.clone(),
                value: new_kpi.value,
                target: new_kpi.target,
                unit: new_kpi.unit,
                category: new_kpi.category.clone(),
                change_percent: new_kpi.change_percent,
                trend: new_kpi.trend(),
                recorded_at: new_kpi.recorded_at.unwrap_or_else(Utc::now),
            };
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn update(
            &self,
            user_id: Uuid,
            kpi_id: Uuid,
            update: KpiUpdate,
        ) -> Result<KpiRecord> {
            let mut records = self.records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|r| r.user_id == user_id && r.id == kpi_id)
                .ok_or_else(|| Error::Backend(BackendError::NotFound(kpi_id.to_string())))?;
            if let Some(value) = update.value {
                record.value = value;
            }
            if let Some(target) = update.target {
                record.target = target;
            }
            if let Some(change_percent) = update.change_percent {
                record.change_percent = change_percent;
            }
            if let Some(trend) = update.derived_trend() {
                record.trend = trend;
            }
            if let Some(recorded_at) = update.recorded_at {
                record.recorded_at = recorded_at;
            }
            Ok(record.clone())
        }

        async fn delete(&self, _user_id: Uuid, _kpi_id: Uuid) -> Result<()> {
            unimplemented!()
        }
    }

    // --- Mock SyncLogRepository ---
    #[derive(Clone, Default)]
    struct MockSyncLogRepository {
        logs: Arc<Mutex<Vec<SyncLog>>>,
    }

    impl MockSyncLogRepository {
        fn new() -> Self {
            Self::default()
        }

        fn logs_for(&self, integration_id: Uuid) -> Vec<SyncLog> {
            self.logs
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.integration_id == integration_id)
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl SyncLogRepositoryTrait for MockSyncLogRepository {
        async fn list(&self, user_id: Uuid, limit: i64) -> Result<Vec<SyncLog>> {
            let mut logs: Vec<SyncLog> = self
                .logs
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.user_id == user_id)
                .cloned()
                .collect();
            logs.truncate(limit as usize);
            Ok(logs)
        }

        async fn create(&self, user_id: Uuid, new_log: NewSyncLog) -> Result<SyncLog> {
            let log = SyncLog {
                id: Uuid::new_v4(),
                user_id,
                integration_id: new_log.integration_id,
                status: new_log.status,
                error_message: new_log.error_message.clone(),
                synced_at: Utc::now(),
            };
            self.logs.lock().unwrap().push(log.clone());
            Ok(log)
        }
    }

    // --- Mock PlatformConnector ---
    #[derive(Clone, Default)]
    struct MockPlatformConnector {
        metrics: Arc<Mutex<Vec<PlatformMetric>>>,
        fail_for: Arc<Mutex<HashSet<Uuid>>>,
    }

    impl MockPlatformConnector {
        fn new() -> Self {
            Self::default()
        }

        fn set_metrics(&self, metrics: Vec<PlatformMetric>) {
            *self.metrics.lock().unwrap() = metrics;
        }

        fn fail_for(&self, integration_id: Uuid) {
            self.fail_for.lock().unwrap().insert(integration_id);
        }
    }

    #[async_trait]
    impl PlatformConnectorTrait for MockPlatformConnector {
        async fn fetch_metrics(&self, integration: &Integration) -> Result<Vec<PlatformMetric>> {
            if self.fail_for.lock().unwrap().contains(&integration.id) {
                return Err(Error::Backend(BackendError::RequestFailed(
                    "store API unreachable".to_string(),
                )));
            }
            Ok(self.metrics.lock().unwrap().clone())
        }
    }

    fn create_test_integration(user_id: Uuid, platform: Platform) -> Integration {
        Integration {
            id: Uuid::new_v4(),
            user_id,
            platform,
            status: IntegrationStatus::Connected,
            api_key: Some("sk_test".to_string()),
            store_name: "North Star Goods".to_string(),
            sync_frequency: SyncFrequency::Daily,
            last_sync: None,
            created_at: Utc::now(),
        }
    }

    fn revenue_metric() -> PlatformMetric {
        PlatformMetric {
            metric_name: "Monthly Revenue".to_string(),
            value: dec!(45000),
            target: dec!(50000),
            unit: KpiUnit::Currency,
            category: "Revenue".to_string(),
            change_percent: dec!(12.5),
        }
    }

    fn orders_metric() -> PlatformMetric {
        PlatformMetric {
            metric_name: "Orders".to_string(),
            value: dec!(320),
            target: dec!(400),
            unit: KpiUnit::Count,
            category: "Sales".to_string(),
            change_percent: dec!(-0.2),
        }
    }

    struct Setup {
        integration_repository: Arc<MockIntegrationRepository>,
        kpi_repository: Arc<MockKpiRepository>,
        sync_log_repository: Arc<MockSyncLogRepository>,
        connector: Arc<MockPlatformConnector>,
        runner: SyncRunner,
    }

    fn setup(user_id: Option<Uuid>) -> Setup {
        let integration_repository = Arc::new(MockIntegrationRepository::new());
        let kpi_repository = Arc::new(MockKpiRepository::new());
        let sync_log_repository = Arc::new(MockSyncLogRepository::new());
        let connector = Arc::new(MockPlatformConnector::new());
        let session = Arc::new(MockSessionProvider::new());
        session.set_user_id(user_id);
        let runner = SyncRunner::new(
            integration_repository.clone(),
            kpi_repository.clone(),
            sync_log_repository.clone(),
            connector.clone(),
            session,
        );
        Setup {
            integration_repository,
            kpi_repository,
            sync_log_repository,
            connector,
            runner,
        }
    }

    #[tokio::test]
    async fn test_successful_run_writes_one_terminal_log() {
        // Setup
        let user_id = Uuid::new_v4();
        let s = setup(Some(user_id));
        let integration = create_test_integration(user_id, Platform::Shopify);
        s.integration_repository.add_integration(integration.clone());
        s.connector.set_metrics(vec![revenue_metric()]);

        // Execute
        let outcome = s.runner.run(integration.id).await.unwrap();

        // Assert: outcome and audit trail
        assert_eq!(outcome.status, SyncStatus::Success);
        assert_eq!(outcome.metrics_synced, 1);

        let logs = s.sync_log_repository.logs_for(integration.id);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].status, SyncStatus::InProgress);
        assert_eq!(logs[1].status, SyncStatus::Success);
        assert_eq!(logs[1].error_message, None);

        // Integration marked synced
        let stored = s.integration_repository.get(integration.id).unwrap();
        assert_eq!(stored.status, IntegrationStatus::Connected);
        assert!(stored.last_sync.is_some());
    }

    #[tokio::test]
    async fn test_successful_run_upserts_metrics_by_name() {
        // Setup: one existing KPI that the sync refreshes, one novel metric
        let user_id = Uuid::new_v4();
        let s = setup(Some(user_id));
        let integration = create_test_integration(user_id, Platform::Shopify);
        s.integration_repository.add_integration(integration.clone());

        let existing = KpiRecord {
            id: Uuid::new_v4(),
            user_id,
            metric_name: "Monthly Revenue".to_string(),
            value: dec!(30000),
            target: dec!(50000),
            unit: KpiUnit::Currency,
            category: "Revenue".to_string(),
            change_percent: dec!(0),
            trend: crate::kpis::Trend::Neutral,
            recorded_at: Utc::now(),
        };
        s.kpi_repository.add_record(existing.clone());
        s.connector
            .set_metrics(vec![revenue_metric(), orders_metric()]);

        // Execute
        let outcome = s.runner.run(integration.id).await.unwrap();

        // Assert: two metrics synced into two records, not three
        assert_eq!(outcome.metrics_synced, 2);
        let records = s.kpi_repository.records();
        assert_eq!(records.len(), 2);

        let revenue = records
            .iter()
            .find(|r| r.metric_name == "Monthly Revenue")
            .unwrap();
        assert_eq!(revenue.id, existing.id);
        assert_eq!(revenue.value, dec!(45000));
        assert_eq!(revenue.trend, crate::kpis::Trend::Up);

        let orders = records.iter().find(|r| r.metric_name == "Orders").unwrap();
        assert_eq!(orders.value, dec!(320));
        assert_eq!(orders.user_id, user_id);
    }

    #[tokio::test]
    async fn test_failed_run_records_error_and_propagates() {
        // Setup
        let user_id = Uuid::new_v4();
        let s = setup(Some(user_id));
        let integration = create_test_integration(user_id, Platform::Etsy);
        s.integration_repository.add_integration(integration.clone());
        s.connector.fail_for(integration.id);

        // Execute
        let result = s.runner.run(integration.id).await;

        // Assert: the connector error came back
        assert!(matches!(result, Err(Error::Backend(_))));

        // Audit trail: in_progress then error with the message
        let logs = s.sync_log_repository.logs_for(integration.id);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].status, SyncStatus::InProgress);
        assert_eq!(logs[1].status, SyncStatus::Error);
        assert!(logs[1]
            .error_message
            .as_deref()
            .unwrap()
            .contains("store API unreachable"));

        // Integration flagged, last_sync untouched
        let stored = s.integration_repository.get(integration.id).unwrap();
        assert_eq!(stored.status, IntegrationStatus::Error);
        assert_eq!(stored.last_sync, None);

        // No KPI rows appeared
        assert!(s.kpi_repository.records().is_empty());
    }

    #[tokio::test]
    async fn test_run_all_continues_past_failures() {
        // Setup: the first integration's connector fails, the second works
        let user_id = Uuid::new_v4();
        let s = setup(Some(user_id));
        let failing = create_test_integration(user_id, Platform::Etsy);
        let working = create_test_integration(user_id, Platform::Shopify);
        s.integration_repository.add_integration(failing.clone());
        s.integration_repository.add_integration(working.clone());
        s.connector.set_metrics(vec![revenue_metric()]);
        s.connector.fail_for(failing.id);

        // Execute
        let outcomes = s.runner.run_all().await.unwrap();

        // Assert: both integrations got an outcome
        assert_eq!(outcomes.len(), 2);
        let failed = outcomes
            .iter()
            .find(|o| o.integration_id == failing.id)
            .unwrap();
        assert_eq!(failed.status, SyncStatus::Error);
        assert!(failed.error_message.is_some());

        let succeeded = outcomes
            .iter()
            .find(|o| o.integration_id == working.id)
            .unwrap();
        assert_eq!(succeeded.status, SyncStatus::Success);
        assert_eq!(succeeded.metrics_synced, 1);
    }

    #[tokio::test]
    async fn test_unauthenticated_run_touches_nothing() {
        // Setup: no signed-in user
        let s = setup(None);

        // Execute
        let result = s.runner.run(Uuid::new_v4()).await;

        // Assert
        assert!(matches!(result, Err(Error::Unauthenticated)));
        assert_eq!(s.integration_repository.call_count(), 0);
    }
}
