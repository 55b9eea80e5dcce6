//! The data-access port: the only boundary that talks to persistence.

use async_trait::async_trait;

use bureau_core::types::RecordId;
use bureau_core::CoreError;
use bureau_entities::kind::EntityKind;

/// Server-side filter for `list`. Most screens fetch everything and filter
/// client-side; the status restriction exists for collections too large to
/// ship whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Restrict to one status wire string, e.g. `"active"`.
    pub status: Option<String>,
}

impl ListFilter {
    /// No restriction: the whole collection.
    pub fn all() -> Self {
        Self::default()
    }
}

/// CRUD operations against one hosted collection.
///
/// All operations are async and may fail with [`CoreError::Operation`];
/// `update` and `delete` fail with [`CoreError::NotFound`] when the id no
/// longer exists server-side. `list` returns an empty vec (not an error)
/// when nothing matches.
#[async_trait]
pub trait DataAccessPort<E: EntityKind>: Send + Sync {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<E>, CoreError>;

    /// Insert; the returned record carries the server-assigned id and
    /// timestamps. Fails if required core fields are missing.
    async fn create(&self, input: E::Create) -> Result<E, CoreError>;

    /// Partial update; only the patch's set fields are applied. Returns the
    /// updated row.
    async fn update(&self, id: RecordId, patch: E::Update) -> Result<E, CoreError>;

    /// Delete by id. A second delete of the same id yields `NotFound`,
    /// never a crash.
    async fn delete(&self, id: RecordId) -> Result<(), CoreError>;
}
