use std::sync::Arc;

use authscan_core::{normalize_serial, VerifyOutcome};
use authscan_storage::SerialStore;

use crate::ServiceError;

/// Verifies scanned serials and consumes them on first success.
pub struct VerificationService {
    store: Arc<dyn SerialStore>,
}

impl VerificationService {
    #[must_use]
    pub fn new(store: Arc<dyn SerialStore>) -> Self {
        Self { store }
    }

    /// Check `raw` against the registry and mark it used if it is valid and unused.
    ///
    /// Empty input never reaches the store. Store failures are logged and
    /// reported as [`VerifyOutcome::ServerError`]; a failed mark leaves the
    /// record unused.
    pub async fn verify_and_mark(&self, raw: &str) -> VerifyOutcome {
        let serial = normalize_serial(raw);
        if serial.is_empty() {
            return VerifyOutcome::EmptySerial;
        }

        match self.lookup_and_mark(&serial).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    serial = %serial,
                    error = %e,
                    transient = e.is_transient(),
                    "serial verification failed"
                );
                VerifyOutcome::ServerError
            },
        }
    }

    async fn lookup_and_mark(&self, serial: &str) -> Result<VerifyOutcome, ServiceError> {
        let Some(record) = self.store.find_by_serial(serial).await? else {
            return Ok(VerifyOutcome::Unknown);
        };
        if record.used {
            return Ok(VerifyOutcome::AlreadyUsed);
        }
        if self.store.mark_used(&record).await? {
            tracing::info!(serial = %serial, "serial consumed on first scan");
            Ok(VerifyOutcome::FirstScan)
        } else {
            // consumed by a concurrent request between lookup and update
            Ok(VerifyOutcome::AlreadyUsed)
        }
    }
}

#[cfg(test)]
mod tests {
    use authscan_core::{SeedRow, SerialRecord};

    use super::*;
    use crate::test_support::{seeded_storage, ScriptedStore};

    fn service_with(rows: &[SeedRow]) -> (VerificationService, authscan_storage::Storage, tempfile::TempDir) {
        let (storage, temp_dir) = seeded_storage(rows);
        let service = VerificationService::new(Arc::new(storage.clone()));
        (service, storage, temp_dir)
    }

    #[tokio::test]
    async fn unknown_serial_reports_fake_and_mutates_nothing() {
        let (service, storage, _dir) = service_with(&[SeedRow::new("TEST1234", false)]);

        for raw in ["FAKE1234", "test12345", "0"] {
            let outcome = service.verify_and_mark(raw).await;
            assert_eq!(outcome, VerifyOutcome::Unknown);
            assert_eq!(outcome.message(), "Fake or Unknown Product");
        }
        assert_eq!(storage.count().unwrap(), 1);
        assert_eq!(storage.count_used().unwrap(), 0);
    }

    #[tokio::test]
    async fn first_scan_succeeds_then_already_used() {
        let (service, storage, _dir) = service_with(&[SeedRow::new("TEST1234", false)]);

        let first = service.verify_and_mark("TEST1234").await;
        assert_eq!(first, VerifyOutcome::FirstScan);
        assert!(first.is_valid());
        assert!(storage.find_by_serial("TEST1234").unwrap().unwrap().used);

        for _ in 0..3 {
            assert_eq!(service.verify_and_mark("TEST1234").await, VerifyOutcome::AlreadyUsed);
        }
    }

    #[tokio::test]
    async fn seeded_used_serial_is_rejected() {
        let (service, _storage, _dir) = service_with(&[SeedRow::new("USED1234", true)]);
        let outcome = service.verify_and_mark("USED1234").await;
        assert_eq!(outcome, VerifyOutcome::AlreadyUsed);
        assert!(outcome.message().contains("already used"));
    }

    #[tokio::test]
    async fn case_and_whitespace_address_same_record() {
        let (service, _storage, _dir) = service_with(&[SeedRow::new("TEST123", false)]);
        assert_eq!(service.verify_and_mark(" test123 ").await, VerifyOutcome::FirstScan);
        assert_eq!(service.verify_and_mark("TEST123").await, VerifyOutcome::AlreadyUsed);
    }

    #[tokio::test]
    async fn empty_input_never_reaches_store() {
        let store = Arc::new(ScriptedStore::default());
        let service = VerificationService::new(Arc::clone(&store) as Arc<dyn SerialStore>);

        for raw in ["", "   ", "\t\n"] {
            assert_eq!(service.verify_and_mark(raw).await, VerifyOutcome::EmptySerial);
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn mark_failure_reports_server_error() {
        let store = Arc::new(ScriptedStore {
            record: Some(SerialRecord { id: 1, serial_number: "TEST1234".to_owned(), used: false }),
            fail_mark: true,
            ..ScriptedStore::default()
        });
        let service = VerificationService::new(store);

        let outcome = service.verify_and_mark("test1234").await;
        assert_eq!(outcome, VerifyOutcome::ServerError);
        assert_eq!(outcome.message(), "Verification failed (server error)");
    }

    #[tokio::test]
    async fn rejected_write_leaves_record_unused() {
        let (service, storage, dir) = service_with(&[SeedRow::new("TEST1234", false)]);
        let conn = rusqlite::Connection::open(dir.path().join("test.db")).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER reject_mark BEFORE UPDATE ON serials
             BEGIN SELECT RAISE(ABORT, 'mark rejected'); END;",
        )
        .unwrap();
        drop(conn);

        assert_eq!(service.verify_and_mark("TEST1234").await, VerifyOutcome::ServerError);
        assert!(!storage.find_by_serial("TEST1234").unwrap().unwrap().used);
    }

    #[tokio::test]
    async fn lookup_failure_reports_server_error() {
        let store = Arc::new(ScriptedStore { fail_find: true, ..ScriptedStore::default() });
        let service = VerificationService::new(store);
        assert_eq!(service.verify_and_mark("ANY").await, VerifyOutcome::ServerError);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_scans_yield_exactly_one_success() {
        let (service, storage, _dir) = service_with(&[SeedRow::new("RACE1", false)]);
        let service = Arc::new(service);

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let service = Arc::clone(&service);
                let raw = if i % 2 == 0 { "race1" } else { " RACE1 " };
                tokio::spawn(async move { service.verify_and_mark(raw).await })
            })
            .collect();

        let outcomes: Vec<VerifyOutcome> = futures_util::future::join_all(handles)
            .await
            .into_iter()
            .map(Result::unwrap)
            .collect();

        let successes = outcomes.iter().filter(|o| **o == VerifyOutcome::FirstScan).count();
        let already = outcomes.iter().filter(|o| **o == VerifyOutcome::AlreadyUsed).count();
        assert_eq!(successes, 1);
        assert_eq!(already, 19);
        assert!(storage.find_by_serial("RACE1").unwrap().unwrap().used);
    }
}
