//! In-memory [`DataAccessPort`] implementation.
//!
//! Behaves like the hosted document store: ids and timestamps are assigned
//! on insert, patches overlay only their set fields, and `list` returns rows
//! newest-first. Serves the test suites and headless tooling that should not
//! touch a real backend.
//!
//! Patch application goes through JSON: the row and the patch are both
//! serialized, the patch's keys overwrite the row's, and the merged object
//! deserializes back into the record type. This mirrors the wire semantics
//! exactly: a patch field that was `None` is absent from the JSON and thus
//! cannot clobber anything.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use bureau_core::types::RecordId;
use bureau_core::CoreError;
use bureau_entities::kind::EntityKind;

use crate::port::{DataAccessPort, ListFilter};

/// Per-operation call counters, for assertions on gating behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounts {
    pub list: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

struct Inner<E> {
    rows: Vec<E>,
    counts: OpCounts,
    /// When set, the next operation fails with `Operation(msg)` instead of
    /// touching the rows.
    fail_next: Option<String>,
}

/// HashMap-free, order-preserving in-memory collection.
pub struct InMemoryPort<E: EntityKind> {
    inner: Mutex<Inner<E>>,
}

impl<E: EntityKind> InMemoryPort<E> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                rows: Vec::new(),
                counts: OpCounts::default(),
                fail_next: None,
            }),
        }
    }

    /// Seed the collection with existing rows (ids already assigned).
    pub fn with_rows(rows: Vec<E>) -> Self {
        let port = Self::new();
        port.inner.lock().unwrap().rows = rows;
        port
    }

    /// Make the next operation fail with `CoreError::Operation(message)`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.inner.lock().unwrap().fail_next = Some(message.into());
    }

    /// Snapshot of the operation counters.
    pub fn counts(&self) -> OpCounts {
        self.inner.lock().unwrap().counts
    }

    /// Snapshot of the stored rows, insertion order.
    pub fn rows(&self) -> Vec<E> {
        self.inner.lock().unwrap().rows.clone()
    }

    fn take_injected_failure(inner: &mut Inner<E>) -> Option<CoreError> {
        inner.fail_next.take().map(CoreError::Operation)
    }
}

impl<E: EntityKind> Default for InMemoryPort<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn to_object<T: serde::Serialize>(value: &T) -> Result<serde_json::Map<String, Value>, CoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CoreError::Operation("record is not a JSON object".into())),
        Err(e) => Err(CoreError::Operation(e.to_string())),
    }
}

fn from_object<E: EntityKind>(map: serde_json::Map<String, Value>) -> Result<E, CoreError> {
    serde_json::from_value(Value::Object(map)).map_err(|e| CoreError::Operation(e.to_string()))
}

#[async_trait]
impl<E: EntityKind> DataAccessPort<E> for InMemoryPort<E> {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<E>, CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.list += 1;
        if let Some(err) = Self::take_injected_failure(&mut inner) {
            return Err(err);
        }
        let mut rows: Vec<E> = inner
            .rows
            .iter()
            .filter(|r| match &filter.status {
                Some(status) => r.status_label() == status,
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        Ok(rows)
    }

    async fn create(&self, input: E::Create) -> Result<E, CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.create += 1;
        if let Some(err) = Self::take_injected_failure(&mut inner) {
            return Err(err);
        }
        let now = Utc::now();
        let mut object = to_object(&input)?;
        object.insert("id".into(), serde_json::json!(Uuid::new_v4()));
        object.insert("created_at".into(), serde_json::json!(now));
        object.insert("updated_at".into(), serde_json::json!(now));
        let record: E = from_object(object)?;
        inner.rows.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: RecordId, patch: E::Update) -> Result<E, CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.update += 1;
        if let Some(err) = Self::take_injected_failure(&mut inner) {
            return Err(err);
        }
        let position = inner
            .rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or(CoreError::NotFound {
                entity: E::NAME,
                id,
            })?;
        let mut object = to_object(&inner.rows[position])?;
        for (key, value) in to_object(&patch)? {
            object.insert(key, value);
        }
        object.insert("updated_at".into(), serde_json::json!(Utc::now()));
        let record: E = from_object(object)?;
        inner.rows[position] = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: RecordId) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.delete += 1;
        if let Some(err) = Self::take_injected_failure(&mut inner) {
            return Err(err);
        }
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id() != id);
        if inner.rows.len() == before {
            return Err(CoreError::NotFound {
                entity: E::NAME,
                id,
            });
        }
        Ok(())
    }
}
