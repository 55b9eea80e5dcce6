//! The entity list controller.
//!
//! One controller instance exclusively owns the in-memory collection for its
//! screen, plus the search/filter/sort state and the dialog state machine.
//! Mutations flow: validate (in the form) -> port call -> reconcile local
//! state -> toast. A failed mutation leaves `records` exactly as it was and
//! keeps the initiating dialog open so the user can retry without retyping.

use std::cmp::Reverse;
use std::sync::Arc;

use bureau_core::dialog::DialogState;
use bureau_core::search::{matches_term, StatusFilter};
use bureau_core::types::RecordId;
use bureau_core::CoreError;
use bureau_entities::kind::EntityKind;

use crate::confirm::ConfirmationGate;
use crate::notify::{Toast, ToastBus};
use crate::port::{DataAccessPort, ListFilter};

/// How local state is reconciled after a successful mutation. Fixed per
/// screen at construction; never mixed within one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileStrategy {
    /// Apply the server's returned row to the local collection in place.
    #[default]
    OptimisticMerge,
    /// Re-fetch the whole collection. For entities whose rows are enriched
    /// server-side beyond what the mutation response carries.
    Refetch,
}

/// Ordering applied by [`ListController::filtered_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first, by creation timestamp (the server's default order).
    #[default]
    Newest,
    /// Case-insensitive by the record's primary label.
    Label,
}

/// Fetch lifecycle of the collection. `Failed` is distinct from an empty
/// `Loaded` so the screen can tell "no data" from "fetch broke".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed(String),
}

/// Owns one entity collection and orchestrates its CRUD dialogs.
pub struct ListController<E: EntityKind> {
    port: Arc<dyn DataAccessPort<E>>,
    toasts: ToastBus,
    gate: Arc<dyn ConfirmationGate>,
    reconcile: ReconcileStrategy,

    records: Vec<E>,
    load: LoadState,
    search_term: String,
    status_filter: StatusFilter,
    sort: SortOrder,
    dialog: DialogState,

    /// Request generation for in-flight `list()` calls. Only the response
    /// matching the latest generation may write `records`; superseded
    /// responses are discarded (last writer wins, no empty flicker).
    generation: u64,
}

impl<E: EntityKind> ListController<E> {
    pub fn new(
        port: Arc<dyn DataAccessPort<E>>,
        toasts: ToastBus,
        gate: Arc<dyn ConfirmationGate>,
    ) -> Self {
        Self {
            port,
            toasts,
            gate,
            reconcile: ReconcileStrategy::default(),
            records: Vec::new(),
            load: LoadState::default(),
            search_term: String::new(),
            status_filter: StatusFilter::default(),
            sort: SortOrder::default(),
            dialog: DialogState::default(),
            generation: 0,
        }
    }

    pub fn with_reconcile(mut self, strategy: ReconcileStrategy) -> Self {
        self.reconcile = strategy;
        self
    }

    // -- State accessors -----------------------------------------------------

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn dialog(&self) -> DialogState {
        self.dialog
    }

    /// The record the open dialog refers to, if it is still in the
    /// collection.
    pub fn selected(&self) -> Option<&E> {
        let id = self.dialog.record_id()?;
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    // -- Dialog orchestration ------------------------------------------------

    pub fn open_create(&mut self) -> Result<(), CoreError> {
        self.dialog.open_create()
    }

    pub fn open_view(&mut self, id: RecordId) -> Result<(), CoreError> {
        self.dialog.open_view(id)
    }

    /// Viewing -> Editing for the same record; the detail view closes first.
    pub fn open_edit(&mut self) -> Result<(), CoreError> {
        self.dialog.open_edit()
    }

    /// Discards the dialog's working copy; `records` is untouched.
    pub fn close_dialog(&mut self) {
        self.dialog.close();
    }

    // -- Fetch ---------------------------------------------------------------

    /// Start a fetch: bumps the request generation and flips the loading
    /// flag. The previous `records` stay visible until the fresh response
    /// lands.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.load = LoadState::Loading;
        self.generation
    }

    /// Apply a fetch response. Returns `false` when the response belongs to
    /// a superseded request and was discarded.
    pub fn apply_refresh(&mut self, generation: u64, result: Result<Vec<E>, CoreError>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                entity = E::NAME,
                generation,
                current = self.generation,
                "discarding stale list response"
            );
            return false;
        }
        match result {
            Ok(rows) => {
                self.records = rows;
                self.load = LoadState::Loaded;
            }
            Err(err) => {
                tracing::warn!(entity = E::NAME, error = %err, "list fetch failed");
                self.load = LoadState::Failed(err.to_string());
            }
        }
        true
    }

    /// Fetch the collection and replace `records`. Safe to call while an
    /// earlier refresh is still in flight: the later call wins.
    pub async fn refresh(&mut self) {
        let generation = self.begin_refresh();
        let result = self.port.list(&ListFilter::all()).await;
        self.apply_refresh(generation, result);
    }

    // -- Derived view --------------------------------------------------------

    /// Pure derivation of the visible rows: search term (case-insensitive
    /// substring over the entity's searchable fields), then status filter,
    /// then sort. Never mutates `records`; recomputed on every call.
    pub fn filtered_view(&self) -> Vec<&E> {
        let mut rows: Vec<&E> = self
            .records
            .iter()
            .filter(|r| matches_term(&self.search_term, &r.search_fields()))
            .filter(|r| self.status_filter.allows(r.status_label()))
            .collect();
        match self.sort {
            SortOrder::Newest => rows.sort_by_key(|r| Reverse(r.created_at())),
            SortOrder::Label => rows.sort_by_key(|r| r.primary_label().to_lowercase()),
        }
        rows
    }

    // -- Mutations -----------------------------------------------------------

    /// Create a record. On success the collection gains exactly one entry
    /// and the Create dialog (if still open) closes; on failure `records`
    /// is untouched and the dialog stays open.
    pub async fn create(&mut self, input: E::Create) -> Result<(), CoreError> {
        match self.port.create(input).await {
            Ok(record) => {
                let label = record.primary_label().to_string();
                match self.reconcile {
                    ReconcileStrategy::OptimisticMerge => self.records.push(record),
                    ReconcileStrategy::Refetch => self.refresh().await,
                }
                if self.dialog == DialogState::Creating {
                    self.dialog.close();
                }
                self.toasts
                    .publish(Toast::success(format!("{} created", E::NAME), label));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(entity = E::NAME, error = %err, "create failed");
                self.toasts.publish(Toast::failure(
                    format!("Could not create {}", E::NAME),
                    err.to_string(),
                ));
                Err(err)
            }
        }
    }

    /// Apply a partial update. On success the matching element is replaced
    /// with the server's row (or the list re-fetched) and the Edit dialog
    /// for that record closes. A `NotFound` failure re-fetches to reconcile
    /// the stale collection; any failure keeps the dialog open.
    pub async fn edit(&mut self, id: RecordId, patch: E::Update) -> Result<(), CoreError> {
        match self.port.update(id, patch).await {
            Ok(updated) => {
                match self.reconcile {
                    ReconcileStrategy::OptimisticMerge => {
                        if let Some(slot) = self.records.iter_mut().find(|r| r.id() == id) {
                            *slot = updated;
                        }
                    }
                    ReconcileStrategy::Refetch => self.refresh().await,
                }
                // Close only the dialog that initiated this save; a dialog
                // the user already closed must not be reopened, and a
                // dialog on another record must not be touched.
                if self.dialog == DialogState::Editing(id) {
                    self.dialog.close();
                }
                self.toasts
                    .publish(Toast::success(format!("{} updated", E::NAME), ""));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(entity = E::NAME, error = %err, "update failed");
                self.toasts.publish(Toast::failure(
                    format!("Could not update {}", E::NAME),
                    err.to_string(),
                ));
                if err.is_not_found() {
                    self.refresh().await;
                }
                Err(err)
            }
        }
    }

    /// Delete a record, gated by the confirmation prompt. A refused prompt
    /// means no port call and no state change. On success the element is
    /// removed and any dialog referencing it force-closes.
    pub async fn remove(&mut self, id: RecordId) -> Result<(), CoreError> {
        let prompt = format!("Delete this {}? This cannot be undone.", E::NAME);
        if !self.gate.confirm(&prompt).await {
            return Ok(());
        }
        match self.port.delete(id).await {
            Ok(()) => {
                match self.reconcile {
                    ReconcileStrategy::OptimisticMerge => {
                        self.records.retain(|r| r.id() != id);
                    }
                    ReconcileStrategy::Refetch => self.refresh().await,
                }
                self.dialog.force_close_if_references(id);
                self.toasts
                    .publish(Toast::success(format!("{} deleted", E::NAME), ""));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(entity = E::NAME, error = %err, "delete failed");
                self.toasts.publish(Toast::failure(
                    format!("Could not delete {}", E::NAME),
                    err.to_string(),
                ));
                if err.is_not_found() {
                    // The row is gone elsewhere; reconcile and drop any
                    // dialog still showing it.
                    self.dialog.force_close_if_references(id);
                    self.refresh().await;
                }
                Err(err)
            }
        }
    }
}
