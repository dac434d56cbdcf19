#[cfg(test)]
mod tests {
    use crate::auth::MockSessionProvider;
    use crate::errors::Result;
    use crate::kpis::{
        KpiRecord, KpiRepositoryTrait, KpiService, KpiServiceTrait, KpiUnit, KpiUpdate, NewKpi,
        Trend,
    };
    use crate::Error;
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    // --- Mock KpiRepository ---
    #[derive(Clone, Default)]
    struct MockKpiRepository {
        records: Arc<Mutex<Vec<KpiRecord>>>,
        calls: Arc<Mutex<usize>>,
    }

    impl MockKpiRepository {
        fn new() -> Self {
            Self::default()
        }

        fn add_record(&self, record: KpiRecord) {
            self.records.lock().unwrap().push(record);
        }

        /// Number of repository methods invoked, for fail-fast assertions.
        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }

        fn bump(&self) {
            *self.calls.lock().unwrap() += 1;
        }
    }

    #[async_trait]
    impl KpiRepositoryTrait for MockKpiRepository {
        async fn list(&self, user_id: Uuid, limit: Option<i64>) -> Result<Vec<KpiRecord>> {
            self.bump();
            let records = self.records.lock().unwrap();
            let mut out: Vec<KpiRecord> = records
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect();
            if let Some(limit) = limit {
                out.truncate(limit as usize);
            }
            Ok(out)
        }

        async fn list_by_category(&self, user_id: Uuid, category: &str) -> Result<Vec<KpiRecord>> {
            self.bump();
            let records = self.records.lock().unwrap();
            Ok(records
                .iter()
                .filter(|r| r.user_id == user_id && r.category == category)
                .cloned()
                .collect())
        }

        async fn get_by_id(&self, user_id: Uuid, kpi_id: Uuid) -> Result<KpiRecord> {
            self.bump();
            let records = self.records.lock().unwrap();
            records
                .iter()
                .find(|r| r.user_id == user_id && r.id == kpi_id)
                .cloned()
                .ok_or_else(|| {
                    Error::Backend(crate::errors::BackendError::NotFound(kpi_id.to_string()))
                })
        }

        async fn create(&self, user_id: Uuid, new_kpi: NewKpi) -> Result<KpiRecord> {
            self.bump();
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
            _user_id: Uuid,
            _kpi_id: Uuid,
            _update: KpiUpdate,
        ) -> Result<KpiRecord> {
            self.bump();
            unimplemented!()
        }

        async fn delete(&self, user_id: Uuid, kpi_id: Uuid) -> Result<()> {
            self.bump();
            self.records
                .lock()
                .unwrap()
                .retain(|r| !(r.user_id == user_id && r.id == kpi_id));
            Ok(())
        }
    }

    fn create_test_record(user_id: Uuid, value: rust_decimal::Decimal) -> KpiRecord {
        KpiRecord {
            id: Uuid::new_v4(),
            user_id,
            metric_name: "Monthly Revenue".to_string(),
            value,
            target: dec!(100),
            unit: KpiUnit::Currency,
            category: "Revenue".to_string(),
            change_percent: dec!(1.0),
            trend: Trend::Up,
            recorded_at: Utc::now(),
        }
    }

    fn create_test_new_kpi() -> NewKpi {
        NewKpi {
            metric_name: "Monthly Revenue".to_string(),
            value: dec!(45000),
            target: dec!(50000),
            unit: KpiUnit::Currency,
            category: "Revenue".to_string(),
            change_percent: dec!(12.5),
            recorded_at: None,
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_calls_fail_before_reaching_repository() {
        // Setup: no signed-in user
        let repository = Arc::new(MockKpiRepository::new());
        let session = Arc::new(MockSessionProvider::signed_out());
        let service = KpiService::new(repository.clone(), session);

        // Execute: every operation must fail fast
        assert!(matches!(
            service.get_kpis().await,
            Err(Error::Unauthenticated)
        ));
        assert!(matches!(
            service.create_kpi(create_test_new_kpi()).await,
            Err(Error::Unauthenticated)
        ));
        assert!(matches!(
            service.update_kpi(Uuid::new_v4(), KpiUpdate::default()).await,
            Err(Error::Unauthenticated)
        ));
        assert!(matches!(
            service.delete_kpi(Uuid::new_v4()).await,
            Err(Error::Unauthenticated)
        ));
        assert!(matches!(
            service.get_summary().await,
            Err(Error::Unauthenticated)
        ));

        // Assert: the repository was never touched
        assert_eq!(repository.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_kpis_returns_only_callers_records() {
        // Setup: two users' records in the backing store
        let user_id = Uuid::new_v4();
        let other_user = Uuid::new_v4();
        let repository = Arc::new(MockKpiRepository::new());
        repository.add_record(create_test_record(user_id, dec!(90)));
        repository.add_record(create_test_record(other_user, dec!(10)));

        let session = Arc::new(MockSessionProvider::signed_in(user_id));
        let service = KpiService::new(repository, session);

        // Execute
        let kpis = service.get_kpis().await.unwrap();

        // Assert
        assert_eq!(kpis.len(), 1);
        assert_eq!(kpis[0].user_id, user_id);
    }

    #[tokio::test]
    async fn test_create_kpi_stamps_authenticated_user() {
        // Setup
        let user_id = Uuid::new_v4();
        let repository = Arc::new(MockKpiRepository::new());
        let session = Arc::new(MockSessionProvider::signed_in(user_id));
        let service = KpiService::new(repository, session);

        // Execute
        let created = service.create_kpi(create_test_new_kpi()).await.unwrap();

        // Assert
        assert_eq!(created.user_id, user_id);
        assert_eq!(created.trend, Trend::Up);
    }

    #[tokio::test]
    async fn test_create_kpi_rejects_empty_metric_name() {
        // Setup
        let repository = Arc::new(MockKpiRepository::new());
        let session = Arc::new(MockSessionProvider::signed_in(Uuid::new_v4()));
        let service = KpiService::new(repository.clone(), session);

        let mut new_kpi = create_test_new_kpi();
        new_kpi.metric_name = "   ".to_string();

        // Execute
        let result = service.create_kpi(new_kpi).await;

        // Assert: validation failed and nothing was written
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(repository.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_record_without_writing() {
        // Setup
        let user_id = Uuid::new_v4();
        let record = create_test_record(user_id, dec!(42));
        let repository = Arc::new(MockKpiRepository::new());
        repository.add_record(record.clone());
        let session = Arc::new(MockSessionProvider::signed_in(user_id));
        let service = KpiService::new(repository, session);

        // Execute: an all-None patch
        let result = service
            .update_kpi(record.id, KpiUpdate::default())
            .await
            .unwrap();

        // Assert: the stored record came back unchanged (the mock's update()
        // would have panicked if it had been called)
        assert_eq!(result, record);
    }

    #[tokio::test]
    async fn test_get_summary_aggregates_repository_rows() {
        // Setup
        let user_id = Uuid::new_v4();
        let repository = Arc::new(MockKpiRepository::new());
        repository.add_record(create_test_record(user_id, dec!(90)));
        repository.add_record(create_test_record(user_id, dec!(40)));
        let session = Arc::new(MockSessionProvider::signed_in(user_id));
        let service = KpiService::new(repository, session);

        // Execute
        let summary = service.get_summary().await.unwrap();

        // Assert: 90% and 40% progress, one on track, both trending up
        assert_eq!(summary.total_kpis, 2);
        assert_eq!(summary.on_track_kpis, 1);
        assert_eq!(summary.average_progress, dec!(65));
        assert_eq!(summary.trends_up, 2);
        assert_eq!(summary.trends_down, 0);
    }
}
