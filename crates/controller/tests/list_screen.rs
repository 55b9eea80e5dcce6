//! Integration tests for a full list screen: controller + form + detail
//! against the in-memory port.
//!
//! Exercises the contracts every screen relies on:
//! - search/filter derivation is pure and repeatable
//! - failed mutations leave the collection untouched and the dialog open
//! - successful create appends exactly one entry and closes the dialog
//! - delete is gated by the confirmation prompt
//! - empty numeric inputs never turn into zero on the wire

use std::sync::Arc;

use assert_matches::assert_matches;

use bureau_controller::confirm::{AlwaysConfirm, NeverConfirm};
use bureau_controller::form::{EntityForm, SubmitOutcome};
use bureau_controller::memory::InMemoryPort;
use bureau_controller::notify::{ToastBus, ToastVariant};
use bureau_controller::port::DataAccessPort;
use bureau_controller::{ListController, ReconcileStrategy};
use bureau_core::dialog::DialogState;
use bureau_core::search::StatusFilter;
use bureau_core::CoreError;
use bureau_entities::client::Client;
use bureau_entities::kind::EntityKind;
use bureau_entities::package::{Package, UpdatePackage};
use bureau_entities::status::ClientStatus;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn client_input(name: &str) -> <Client as EntityKind>::Create {
    let mut view = Client::default_view();
    view.name = name.into();
    Client::create_from_view(&view)
}

fn package_input(name: &str, price: Option<f64>) -> <Package as EntityKind>::Create {
    let mut view = Package::default_view();
    view.name = name.into();
    view.price = price;
    Package::create_from_view(&view)
}

fn client_controller(port: Arc<InMemoryPort<Client>>) -> ListController<Client> {
    ListController::new(port, ToastBus::default(), Arc::new(AlwaysConfirm))
}

// ---------------------------------------------------------------------------
// Search and filter derivation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_search_and_all_filter_return_the_whole_collection() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    port.create(client_input("Acme")).await.unwrap();
    let mut ctrl = client_controller(port);
    ctrl.refresh().await;

    let view = ctrl.filtered_view();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].name, "Acme");
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    port.create(client_input("Acme")).await.unwrap();
    let mut ctrl = client_controller(port);
    ctrl.refresh().await;

    ctrl.set_search_term("acm");
    assert_eq!(ctrl.filtered_view().len(), 1);

    ctrl.set_search_term("globex");
    assert!(ctrl.filtered_view().is_empty());
}

#[tokio::test]
async fn filtering_twice_is_idempotent_and_does_not_mutate_records() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    port.create(client_input("Acme")).await.unwrap();
    port.create(client_input("Globex")).await.unwrap();
    let mut ctrl = client_controller(port);
    ctrl.refresh().await;

    ctrl.set_search_term("acm");
    ctrl.set_status_filter(StatusFilter::All);
    let before = ctrl.records().to_vec();

    let first: Vec<String> = ctrl.filtered_view().iter().map(|r| r.name.clone()).collect();
    let second: Vec<String> = ctrl.filtered_view().iter().map(|r| r.name.clone()).collect();

    assert_eq!(first, second);
    assert_eq!(ctrl.records(), &before[..]);
}

#[tokio::test]
async fn status_filter_narrows_and_all_bypasses() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    let lead = port.create(client_input("Lead Co")).await.unwrap();
    let active = port.create(client_input("Active Co")).await.unwrap();
    port.update(
        active.id,
        bureau_entities::client::UpdateClient {
            status: Some(ClientStatus::Active),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let mut ctrl = client_controller(port);
    ctrl.refresh().await;

    ctrl.set_status_filter(StatusFilter::Only("active".into()));
    let view = ctrl.filtered_view();
    assert_eq!(view.len(), 1);
    assert_ne!(view[0].id, lead.id);

    ctrl.set_status_filter(StatusFilter::All);
    assert_eq!(ctrl.filtered_view().len(), 2);
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_appends_exactly_one_and_closes_the_dialog() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    let mut ctrl = client_controller(port);
    ctrl.refresh().await;
    ctrl.open_create().unwrap();

    ctrl.create(client_input("Widget")).await.unwrap();
    assert_eq!(ctrl.records().len(), 1);
    assert_eq!(ctrl.dialog(), DialogState::Closed);

    // A second create with different input neither duplicates nor
    // overwrites the first entry.
    ctrl.open_create().unwrap();
    ctrl.create(client_input("Gadget")).await.unwrap();
    assert_eq!(ctrl.records().len(), 2);
    let names: Vec<&str> = ctrl.records().iter().map(|r| r.name.as_str()).collect();
    assert!(names.contains(&"Widget"));
    assert!(names.contains(&"Gadget"));
}

#[tokio::test]
async fn failed_create_leaves_records_untouched_and_dialog_open() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    port.create(client_input("Existing")).await.unwrap();
    let mut ctrl = client_controller(port.clone());
    ctrl.refresh().await;
    ctrl.open_create().unwrap();

    let before = ctrl.records().to_vec();
    port.fail_next("backend unavailable");
    let err = ctrl.create(client_input("Doomed")).await.unwrap_err();

    assert_matches!(err, CoreError::Operation(_));
    assert_eq!(ctrl.records(), &before[..]);
    assert_eq!(ctrl.dialog(), DialogState::Creating);
}

#[tokio::test]
async fn create_failure_emits_a_destructive_toast() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    let bus = ToastBus::default();
    let mut rx = bus.subscribe();
    let mut ctrl = ListController::new(port.clone(), bus, Arc::new(AlwaysConfirm));

    port.fail_next("permission denied");
    let _ = ctrl.create(client_input("Doomed")).await;

    let toast = rx.recv().await.unwrap();
    assert_eq!(toast.variant, ToastVariant::Destructive);
    assert!(toast.description.contains("permission denied"));
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edit_replaces_the_matching_element_in_place() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    let record = port.create(client_input("Acme")).await.unwrap();
    port.create(client_input("Globex")).await.unwrap();
    let mut ctrl = client_controller(port);
    ctrl.refresh().await;

    ctrl.edit(
        record.id,
        bureau_entities::client::UpdateClient {
            name: Some("Acme SARL".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(ctrl.records().len(), 2);
    let renamed = ctrl.records().iter().find(|r| r.id == record.id).unwrap();
    assert_eq!(renamed.name, "Acme SARL");
}

#[tokio::test]
async fn failed_edit_leaves_records_untouched() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    let record = port.create(client_input("Acme")).await.unwrap();
    let mut ctrl = client_controller(port.clone());
    ctrl.refresh().await;

    let before = ctrl.records().to_vec();
    port.fail_next("server validation rejected");
    let err = ctrl
        .edit(record.id, Default::default())
        .await
        .unwrap_err();

    assert_matches!(err, CoreError::Operation(_));
    assert_eq!(ctrl.records(), &before[..]);
}

#[tokio::test]
async fn editing_a_concurrently_deleted_record_reconciles_the_list() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    let record = port.create(client_input("Acme")).await.unwrap();
    let mut ctrl = client_controller(port.clone());
    ctrl.refresh().await;

    // Deleted elsewhere between fetch and save.
    port.delete(record.id).await.unwrap();
    let err = ctrl
        .edit(record.id, Default::default())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    // The NotFound path re-fetched; the stale row is gone locally too.
    assert!(ctrl.records().is_empty());
}

// ---------------------------------------------------------------------------
// Remove and the confirmation gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refused_confirmation_means_no_port_call_and_no_state_change() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    let record = port.create(client_input("Acme")).await.unwrap();
    let gate = Arc::new(NeverConfirm::new());
    let mut ctrl =
        ListController::new(port.clone(), ToastBus::default(), gate.clone());
    ctrl.refresh().await;

    ctrl.remove(record.id).await.unwrap();

    assert_eq!(gate.asked(), 1);
    assert_eq!(port.counts().delete, 0);
    assert_eq!(ctrl.records().len(), 1);
}

#[tokio::test]
async fn confirmed_delete_removes_the_row_and_closes_its_dialog() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    let record = port.create(client_input("Acme")).await.unwrap();
    let mut ctrl = client_controller(port.clone());
    ctrl.refresh().await;
    ctrl.open_view(record.id).unwrap();

    ctrl.remove(record.id).await.unwrap();

    assert_eq!(port.counts().delete, 1);
    assert!(ctrl.records().is_empty());
    assert_eq!(ctrl.dialog(), DialogState::Closed);
}

#[tokio::test]
async fn delete_leaves_unrelated_dialogs_alone() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    let doomed = port.create(client_input("Doomed")).await.unwrap();
    let kept = port.create(client_input("Kept")).await.unwrap();
    let mut ctrl = client_controller(port);
    ctrl.refresh().await;
    ctrl.open_view(kept.id).unwrap();

    ctrl.remove(doomed.id).await.unwrap();

    assert_eq!(ctrl.dialog(), DialogState::Viewing(kept.id));
    assert_eq!(ctrl.records().len(), 1);
}

// ---------------------------------------------------------------------------
// Refetch reconciliation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refetch_strategy_reloads_the_collection_after_create() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    let mut ctrl = ListController::new(
        port.clone(),
        ToastBus::default(),
        Arc::new(AlwaysConfirm),
    )
    .with_reconcile(ReconcileStrategy::Refetch);
    ctrl.refresh().await;
    let lists_before = port.counts().list;

    ctrl.create(client_input("Acme")).await.unwrap();

    assert_eq!(ctrl.records().len(), 1);
    assert_eq!(port.counts().list, lists_before + 1);
}

// ---------------------------------------------------------------------------
// Numeric unset sentinel on the wire
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clearing_a_price_input_never_sends_zero() {
    let port = Arc::new(InMemoryPort::<Package>::new());
    let record = port.create(package_input("Pack", Some(990.0))).await.unwrap();

    // The edit form's price input is cleared; the patch carries no price.
    let mut view = record.to_view();
    view.price = None;
    let patch: UpdatePackage = Package::patch_from_view(&view, &record);
    assert!(patch.price.is_none());

    let updated = port.update(record.id, patch).await.unwrap();
    // The omitted field is untouched server-side, not zeroed.
    assert_eq!(updated.price, Some(990.0));
}

// ---------------------------------------------------------------------------
// Form end-to-end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn form_roundtrip_preserves_unknown_metadata() {
    let port = Arc::new(InMemoryPort::<Client>::new());
    let mut input = client_input("Acme");
    let mut metadata = bureau_core::metadata::Metadata::new();
    metadata.insert("legacy_ref", serde_json::json!("X-42"));
    input.metadata = Some(metadata);
    let record = port.create(input).await.unwrap();

    let mut ctrl = client_controller(port.clone());
    ctrl.refresh().await;
    ctrl.open_view(record.id).unwrap();
    ctrl.open_edit().unwrap();

    let mut form = EntityForm::<Client>::for_edit(&record);
    form.draft_mut().company_name = "Acme SARL".into();
    let outcome = form.submit(&mut ctrl).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Saved);

    let saved = &port.rows()[0];
    assert_eq!(saved.metadata.str_or_default("legacy_ref"), "X-42");
    assert_eq!(saved.metadata.str_or_default("company_name"), "Acme SARL");
}
