//! Mutation Coordinator: pre-flight checks and write-through calls.
//!
//! Nothing here touches directory state. Created or updated records are handed
//! back to the caller as-is; reconciliation happens through a full reload.

use crate::app::gateway::RecordGateway;
use crate::domain::cliente::ClienteRecord;
use crate::error::{DirectoryError, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct MutationCoordinator {
    gateway: Arc<dyn RecordGateway>,
}

impl MutationCoordinator {
    pub fn new(gateway: Arc<dyn RecordGateway>) -> Self {
        Self { gateway }
    }

    /// Rejects a record with any blank required field, listing exactly those fields.
    pub fn validate(record: &ClienteRecord) -> Result<()> {
        let blank = record.blank_fields();
        if blank.is_empty() {
            Ok(())
        } else {
            Err(DirectoryError::Validation(blank))
        }
    }

    /// The id of a persisted record; unsaved records cannot be deleted or edited.
    pub fn persisted_id(record: &ClienteRecord) -> Result<i64> {
        record.id.ok_or_else(|| {
            DirectoryError::InvalidArgument(format!(
                "el cliente '{}' no tiene id (no ha sido guardado)",
                record.full_name().trim()
            ))
        })
    }

    pub async fn create(&self, record: &ClienteRecord) -> Result<ClienteRecord> {
        Self::validate(record)?;
        let created = self.gateway.create(record).await?;
        tracing::info!(id = ?created.id, "cliente created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, record: &ClienteRecord) -> Result<ClienteRecord> {
        Self::validate(record)?;
        let updated = self.gateway.update(id, record).await?;
        tracing::info!(id, "cliente updated");
        Ok(updated)
    }

    /// Partial update: only non-blank fields are meaningful, so no validation gate.
    pub async fn patch(&self, id: i64, record: &ClienteRecord) -> Result<ClienteRecord> {
        let patched = self.gateway.patch(id, record).await?;
        tracing::info!(id, "cliente patched");
        Ok(patched)
    }

    /// Deletes by id. The caller owns confirmation and the pending marker.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.gateway.delete(id).await?;
        tracing::info!(id, "cliente deleted");
        Ok(())
    }
}
