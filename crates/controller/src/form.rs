//! The entity form: a draft view model plus submit orchestration.
//!
//! The form owns a working copy only; nothing reaches the controller's
//! collection until a submit passes validation and the port call succeeds.
//! Closing the form discards the draft.

use bureau_core::CoreError;
use bureau_entities::kind::{EntityKind, FieldError};

use crate::list::ListController;

/// What a submit attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The port call succeeded; the controller reconciled its collection.
    Saved,
    /// Required fields were missing; no call reached the data layer.
    Invalid(Vec<FieldError>),
    /// A save was already in flight; the duplicate click was dropped.
    AlreadySaving,
}

/// Controlled-input form bound to one draft record.
pub struct EntityForm<E: EntityKind> {
    draft: E::View,
    /// `Some` in edit mode: the original record the patch is diffed against.
    base: Option<E>,
    saving: bool,
    errors: Vec<FieldError>,
}

impl<E: EntityKind> EntityForm<E> {
    /// Create mode: draft seeded from the entity's defaults.
    pub fn for_create() -> Self {
        Self {
            draft: E::default_view(),
            base: None,
            saving: false,
            errors: Vec::new(),
        }
    }

    /// Edit mode: draft seeded from the record's view model.
    pub fn for_edit(record: &E) -> Self {
        Self {
            draft: record.to_view(),
            base: Some(record.clone()),
            saving: false,
            errors: Vec::new(),
        }
    }

    pub fn draft(&self) -> &E::View {
        &self.draft
    }

    /// Mutable access for input binding.
    pub fn draft_mut(&mut self) -> &mut E::View {
        &mut self.draft
    }

    /// `true` while a save is outstanding; the submit control is disabled.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Field errors from the last failed validation, for inline display.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Run the required-field checks without submitting.
    pub fn validate(&mut self) -> bool {
        self.errors = E::validate_view(&self.draft);
        self.errors.is_empty()
    }

    /// Validate and submit through the controller. Routes to `create` or
    /// `edit` depending on whether the form was opened on an existing
    /// record. Persistence failures propagate untouched: the controller
    /// already toasted and kept the dialog open, and the draft is intact
    /// for a retry.
    pub async fn submit(
        &mut self,
        controller: &mut ListController<E>,
    ) -> Result<SubmitOutcome, CoreError> {
        if self.saving {
            return Ok(SubmitOutcome::AlreadySaving);
        }
        if !self.validate() {
            return Ok(SubmitOutcome::Invalid(self.errors.clone()));
        }

        self.saving = true;
        let result = match &self.base {
            None => controller.create(E::create_from_view(&self.draft)).await,
            Some(base) => {
                let patch = E::patch_from_view(&self.draft, base);
                controller.edit(base.id(), patch).await
            }
        };
        self.saving = false;

        result.map(|()| SubmitOutcome::Saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AlwaysConfirm;
    use crate::memory::InMemoryPort;
    use crate::port::DataAccessPort;
    use crate::notify::ToastBus;
    use bureau_entities::client::Client;
    use std::sync::Arc;

    fn controller(port: Arc<InMemoryPort<Client>>) -> ListController<Client> {
        ListController::new(port, ToastBus::default(), Arc::new(AlwaysConfirm))
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_port() {
        let port = Arc::new(InMemoryPort::<Client>::new());
        let mut ctrl = controller(port.clone());
        let mut form = EntityForm::<Client>::for_create();

        let outcome = form.submit(&mut ctrl).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref errs) if errs[0].field == "name"));
        assert_eq!(port.counts().create, 0);
    }

    #[tokio::test]
    async fn create_submit_appends_and_closes_dialog() {
        let port = Arc::new(InMemoryPort::<Client>::new());
        let mut ctrl = controller(port);
        ctrl.open_create().unwrap();

        let mut form = EntityForm::<Client>::for_create();
        form.draft_mut().name = "Acme".into();
        let outcome = form.submit(&mut ctrl).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(ctrl.records().len(), 1);
        assert_eq!(ctrl.dialog(), bureau_core::dialog::DialogState::Closed);
        assert!(!form.is_saving());
    }

    #[tokio::test]
    async fn failed_save_keeps_the_draft_for_retry() {
        let port = Arc::new(InMemoryPort::<Client>::new());
        let mut ctrl = controller(port.clone());
        ctrl.open_create().unwrap();

        let mut form = EntityForm::<Client>::for_create();
        form.draft_mut().name = "Acme".into();
        port.fail_next("backend unavailable");

        let err = form.submit(&mut ctrl).await.unwrap_err();
        assert!(matches!(err, CoreError::Operation(_)));
        assert_eq!(form.draft().name, "Acme");
        assert!(!form.is_saving());
        // Dialog stayed open; the retry succeeds.
        let outcome = form.submit(&mut ctrl).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Saved);
    }

    #[tokio::test]
    async fn edit_submit_patches_the_original_record() {
        let port = Arc::new(InMemoryPort::<Client>::new());
        let mut view = Client::default_view();
        view.name = "Acme".into();
        let record = port.create(Client::create_from_view(&view)).await.unwrap();

        let mut ctrl = controller(port);
        ctrl.refresh().await;
        ctrl.open_view(record.id).unwrap();
        ctrl.open_edit().unwrap();

        let mut form = EntityForm::<Client>::for_edit(&record);
        form.draft_mut().name = "Acme SARL".into();
        let outcome = form.submit(&mut ctrl).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(ctrl.records()[0].name, "Acme SARL");
        assert_eq!(ctrl.dialog(), bureau_core::dialog::DialogState::Closed);
    }
}
