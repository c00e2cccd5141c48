use std::sync::{Arc, RwLock};

use crate::config::settings::SubmitLabels;
use crate::repository::{ModalLifecycle, Notifier, Transport};
use crate::service::ValidationEngine;
use crate::util::lock::{read_lock, write_lock};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmissionState {
    Idle,
    Sending,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are on display and nothing was sent.
    Invalid,
    /// A submission was already in flight; the intent was ignored.
    AlreadySending,
    Sent,
    Failed,
}

/// External parties the controller hands work to.
#[derive(Clone)]
pub struct Collaborators {
    pub transport: Arc<dyn Transport>,
    pub notifier: Arc<dyn Notifier>,
    pub modal: Arc<dyn ModalLifecycle>,
}

/// Gates the submit action: `Idle -> Sending` on a valid submit intent,
/// `Sending -> Idle` once the transport settles.
pub struct SubmissionController {
    engine: Arc<ValidationEngine>,
    collaborators: Collaborators,
    labels: SubmitLabels,
    state: RwLock<SubmissionState>,
}

impl SubmissionController {
    pub fn new(
        engine: Arc<ValidationEngine>,
        collaborators: Collaborators,
        labels: SubmitLabels,
    ) -> Self {
        Self {
            engine,
            collaborators,
            labels,
            state: RwLock::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *read_lock(&self.state)
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if self.state() == SubmissionState::Sending {
            tracing::debug!("submit ignored, upload already in flight");
            return SubmitOutcome::AlreadySending;
        }

        if !self.engine.validate() {
            tracing::info!("submit blocked by validation errors");
            return SubmitOutcome::Invalid;
        }

        let Some(_sending) = self.begin_sending() else {
            return SubmitOutcome::AlreadySending;
        };

        let data = self.engine.form().form_data();
        tracing::info!(parts = data.len(), "sending upload form");

        // `_sending` is dropped after the notifications below, which puts
        // the button back and returns to Idle on every path, panics included.
        match self.collaborators.transport.send(data).await {
            Ok(()) => {
                self.collaborators.notifier.show_success();
                self.collaborators.modal.close_modal();
                SubmitOutcome::Sent
            }
            Err(error) => {
                tracing::warn!(error = %error, "upload form submission failed");
                self.collaborators.notifier.show_error();
                SubmitOutcome::Failed
            }
        }
    }

    fn begin_sending(&self) -> Option<SendingGuard<'_>> {
        let mut state = write_lock(&self.state);
        if *state == SubmissionState::Sending {
            return None;
        }
        *state = SubmissionState::Sending;
        self.engine
            .form()
            .submit_button()
            .block(&self.labels.sending);
        Some(SendingGuard { controller: self })
    }

    fn finish_sending(&self) {
        self.engine.form().submit_button().unblock(&self.labels.idle);
        *write_lock(&self.state) = SubmissionState::Idle;
    }
}

struct SendingGuard<'a> {
    controller: &'a SubmissionController,
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.controller.finish_sending();
    }
}
