use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::settings::FormSettings;
use crate::controller::{Collaborators, SubmissionController, SubmitOutcome};
use crate::domain::UploadForm;
use crate::service::ValidationEngine;
use crate::util::FormError;

/// Everything one upload form needs, wired once at startup.
///
/// Several contexts can live side by side; nothing here is process-global.
pub struct UploadFormContext {
    form: UploadForm,
    engine: Arc<ValidationEngine>,
    controller: Arc<SubmissionController>,
    submit_installed: AtomicBool,
}

impl UploadFormContext {
    pub fn new(settings: &FormSettings, collaborators: Collaborators) -> Self {
        let form = UploadForm::new(settings.labels.idle.clone());
        let engine = Arc::new(ValidationEngine::with_upload_rules(
            form.clone(),
            settings.limits,
        ));
        let controller = Arc::new(SubmissionController::new(
            engine.clone(),
            collaborators,
            settings.labels.clone(),
        ));
        Self {
            form,
            engine,
            controller,
            submit_installed: AtomicBool::new(false),
        }
    }

    pub fn form(&self) -> &UploadForm {
        &self.form
    }

    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    /// Hand out the form's submit handler. Only one handler may be installed
    /// per form.
    pub fn set_form_submit(&self) -> Result<SubmitHandler, FormError> {
        if self.submit_installed.swap(true, Ordering::SeqCst) {
            return Err(FormError::HandlerAlreadyInstalled);
        }
        tracing::debug!("upload form submit handler installed");
        Ok(SubmitHandler {
            controller: self.controller.clone(),
        })
    }

    /// Clear displayed validation errors, e.g. when the modal is reopened.
    pub fn reset_validator(&self) {
        self.engine.reset();
    }
}

/// Submit event handler returned by [`UploadFormContext::set_form_submit`].
#[derive(Clone)]
pub struct SubmitHandler {
    controller: Arc<SubmissionController>,
}

impl SubmitHandler {
    pub async fn on_submit(&self) -> SubmitOutcome {
        self.controller.submit().await
    }
}
