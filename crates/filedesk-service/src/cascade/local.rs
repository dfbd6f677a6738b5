//! In-process cleanup against the file record store and byte storage.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use filedesk_core::traits::storage::StorageProvider;
use filedesk_database::store::FileRecordStore;

use crate::bounded::bounded;

use super::coordinator::CascadeReport;

/// Removes every file owned by an account: stored bytes one by one, then
/// the records in a single bulk call. Never fails.
#[derive(Debug, Clone)]
pub struct LocalCascade {
    files: Arc<dyn FileRecordStore>,
    storage: Arc<dyn StorageProvider>,
    call_timeout: Duration,
}

impl LocalCascade {
    pub fn new(
        files: Arc<dyn FileRecordStore>,
        storage: Arc<dyn StorageProvider>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            files,
            storage,
            call_timeout,
        }
    }

    pub async fn run(&self, user_id: &str) -> CascadeReport {
        let mut report = CascadeReport::new(user_id);

        let owned = match bounded(
            self.call_timeout,
            "list files for cascade",
            self.files.list_by_owner(user_id),
        )
        .await
        {
            Ok(owned) => owned,
            Err(e) => {
                warn!(user_id, error = %e, "Cascade could not list files; deleting records only");
                report.failures += 1;
                Vec::new()
            }
        };
        report.files_found = owned.len();

        for file in &owned {
            match bounded(
                self.call_timeout,
                "delete stored bytes",
                self.storage.delete(&file.storage_path),
            )
            .await
            {
                Ok(()) => report.bytes_deleted += 1,
                Err(e) => {
                    warn!(
                        user_id,
                        file_id = %file.id,
                        path = %file.storage_path,
                        error = %e,
                        "Cascade failed to delete stored bytes"
                    );
                    report.failures += 1;
                }
            }
        }

        match bounded(
            self.call_timeout,
            "delete file records by owner",
            self.files.delete_by_owner(user_id),
        )
        .await
        {
            Ok(count) => report.records_deleted = count,
            Err(e) => {
                warn!(user_id, error = %e, "Cascade failed to delete file records");
                report.failures += 1;
            }
        }

        info!(
            user_id,
            files_found = report.files_found,
            bytes_deleted = report.bytes_deleted,
            records_deleted = report.records_deleted,
            failures = report.failures,
            "Cascade finished"
        );
        report
    }
}
