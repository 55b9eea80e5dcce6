//! Read-only detail view of one record.
//!
//! Holds a working copy of the selected record and projects it through the
//! view model; the action buttons delegate back to the controller. No
//! mutable state lives here beyond what the dialog machine already tracks.

use bureau_core::CoreError;
use bureau_entities::kind::EntityKind;

use crate::list::ListController;

pub struct DetailView<E: EntityKind> {
    record: E,
}

impl<E: EntityKind> DetailView<E> {
    pub fn new(record: E) -> Self {
        Self { record }
    }

    /// The normalized shape the screen renders. Every field defaulted.
    pub fn view(&self) -> E::View {
        self.record.to_view()
    }

    pub fn record(&self) -> &E {
        &self.record
    }

    /// Edit button: Viewing -> Editing on the same record.
    pub fn on_edit(&self, controller: &mut ListController<E>) -> Result<(), CoreError> {
        controller.open_edit()
    }

    /// Delete button: delegates to the confirmation-gated remove. A
    /// successful delete force-closes this dialog via the controller.
    pub async fn on_delete(&self, controller: &mut ListController<E>) -> Result<(), CoreError> {
        controller.remove(self.record.id()).await
    }

    /// Close button: discards this working copy.
    pub fn on_close(&self, controller: &mut ListController<E>) {
        controller.close_dialog();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AlwaysConfirm;
    use crate::memory::InMemoryPort;
    use crate::notify::ToastBus;
    use crate::port::DataAccessPort;
    use bureau_core::dialog::DialogState;
    use bureau_entities::client::Client;
    use std::sync::Arc;

    async fn seeded() -> (Arc<InMemoryPort<Client>>, Client) {
        let port = Arc::new(InMemoryPort::<Client>::new());
        let mut view = Client::default_view();
        view.name = "Acme".into();
        let record = port.create(Client::create_from_view(&view)).await.unwrap();
        (port, record)
    }

    #[tokio::test]
    async fn edit_button_moves_viewing_to_editing() {
        let (port, record) = seeded().await;
        let mut ctrl = ListController::new(port, ToastBus::default(), Arc::new(AlwaysConfirm));
        ctrl.refresh().await;
        ctrl.open_view(record.id).unwrap();

        let detail = DetailView::new(record.clone());
        detail.on_edit(&mut ctrl).unwrap();
        assert_eq!(ctrl.dialog(), DialogState::Editing(record.id));
    }

    #[tokio::test]
    async fn delete_button_removes_and_closes_this_dialog() {
        let (port, record) = seeded().await;
        let mut ctrl = ListController::new(port, ToastBus::default(), Arc::new(AlwaysConfirm));
        ctrl.refresh().await;
        ctrl.open_view(record.id).unwrap();

        let detail = DetailView::new(record);
        detail.on_delete(&mut ctrl).await.unwrap();
        assert!(ctrl.records().is_empty());
        assert_eq!(ctrl.dialog(), DialogState::Closed);
    }

    #[tokio::test]
    async fn closing_the_detail_discards_the_working_copy_only() {
        let (port, record) = seeded().await;
        let mut ctrl = ListController::new(port, ToastBus::default(), Arc::new(AlwaysConfirm));
        ctrl.refresh().await;
        ctrl.open_view(record.id).unwrap();

        let detail = DetailView::new(record);
        detail.on_close(&mut ctrl);
        assert_eq!(ctrl.dialog(), DialogState::Closed);
        assert_eq!(ctrl.records().len(), 1);
    }
}
