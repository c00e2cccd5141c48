use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use upload_form::config::{FormSettings, SubmitLabels};
use upload_form::controller::{Collaborators, SubmissionState, SubmitOutcome};
use upload_form::domain::{FieldKey, FormData, SubmitButton};
use upload_form::repository::{ModalLifecycle, Notifier, Transport};
use upload_form::util::{FormError, TransportError};
use upload_form::UploadFormContext;

#[derive(Default)]
struct RecordingTransport {
    fail: bool,
    calls: AtomicUsize,
    sent: Mutex<Vec<FormData>>,
    button: Mutex<Option<SubmitButton>>,
    disabled_during_send: Mutex<Vec<(bool, String)>>,
    gate: Option<Arc<Notify>>,
}

impl RecordingTransport {
    fn watch(&self, button: SubmitButton) {
        *self.button.lock().unwrap() = Some(button);
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, data: FormData) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let seen = self
            .button
            .lock()
            .unwrap()
            .as_ref()
            .map(|button| (button.is_disabled(), button.label()));
        if let Some(seen) = seen {
            self.disabled_during_send.lock().unwrap().push(seen);
        }
        self.sent.lock().unwrap().push(data);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            Err(TransportError::Rejected { status: 500 })
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
struct RecordingUi {
    events: Mutex<Vec<&'static str>>,
    panic_on_error: bool,
}

impl RecordingUi {
    fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingUi {
    fn show_success(&self) {
        self.events.lock().unwrap().push("success");
    }

    fn show_error(&self) {
        self.events.lock().unwrap().push("error");
        if self.panic_on_error {
            panic!("error dialog failed to render");
        }
    }
}

impl ModalLifecycle for RecordingUi {
    fn close_modal(&self) {
        self.events.lock().unwrap().push("close");
    }
}

fn context_with(transport: Arc<RecordingTransport>, ui: Arc<RecordingUi>) -> UploadFormContext {
    let context = UploadFormContext::new(
        &FormSettings::default(),
        Collaborators {
            transport: transport.clone(),
            notifier: ui.clone(),
            modal: ui,
        },
    );
    transport.watch(context.form().submit_button().clone());
    context
}

fn fill_valid(context: &UploadFormContext) {
    context.form().description.set("Закат над морем");
    context.form().hashtags.set("#Sunset #море #2024");
}

#[tokio::test]
async fn invalid_form_is_not_sent() {
    let transport = Arc::new(RecordingTransport::default());
    let ui = Arc::new(RecordingUi::default());
    let context = context_with(transport.clone(), ui.clone());
    context.form().hashtags.set("#cat #cat");

    let handler = context.set_form_submit().expect("install handler");
    let outcome = handler.on_submit().await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(context.controller().state(), SubmissionState::Idle);
    assert!(!context.form().submit_button().is_disabled());
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    assert!(ui.events().is_empty());
    assert_eq!(
        context.engine().error(FieldKey::Hashtags).as_deref(),
        Some("Хэштеги не должны повторяться.")
    );
}

#[tokio::test]
async fn successful_submission_notifies_and_closes() {
    let transport = Arc::new(RecordingTransport::default());
    let ui = Arc::new(RecordingUi::default());
    let context = context_with(transport.clone(), ui.clone());
    fill_valid(&context);

    let handler = context.set_form_submit().expect("install handler");
    let outcome = handler.on_submit().await;

    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        transport.disabled_during_send.lock().unwrap().as_slice(),
        &[(true, SubmitLabels::default().sending)]
    );
    assert_eq!(ui.events(), vec!["success", "close"]);
    assert_eq!(context.controller().state(), SubmissionState::Idle);
    assert!(!context.form().submit_button().is_disabled());
    assert_eq!(context.form().submit_button().label(), SubmitLabels::default().idle);

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent[0].text("description"), Some("Закат над морем"));
    assert_eq!(sent[0].text("hashtags"), Some("#Sunset #море #2024"));
}

#[tokio::test]
async fn failed_submission_keeps_form_and_reenables_button() {
    let transport = Arc::new(RecordingTransport {
        fail: true,
        ..RecordingTransport::default()
    });
    let ui = Arc::new(RecordingUi::default());
    let context = context_with(transport.clone(), ui.clone());
    fill_valid(&context);

    let handler = context.set_form_submit().expect("install handler");
    let outcome = handler.on_submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(ui.events(), vec!["error"]);
    assert_eq!(context.controller().state(), SubmissionState::Idle);
    assert!(!context.form().submit_button().is_disabled());
    assert_eq!(context.form().description.value(), "Закат над морем");

    let retry = handler.on_submit().await;
    assert_eq!(retry, SubmitOutcome::Failed);
    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn submit_while_sending_is_ignored() {
    let gate = Arc::new(Notify::new());
    let transport = Arc::new(RecordingTransport {
        gate: Some(gate.clone()),
        ..RecordingTransport::default()
    });
    let ui = Arc::new(RecordingUi::default());
    let context = context_with(transport.clone(), ui.clone());
    fill_valid(&context);
    let handler = context.set_form_submit().expect("install handler");

    let (first, second) = tokio::join!(handler.on_submit(), async {
        assert_eq!(context.controller().state(), SubmissionState::Sending);
        assert!(context.form().submit_button().is_disabled());
        let outcome = handler.on_submit().await;
        gate.notify_one();
        outcome
    });

    assert_eq!(first, SubmitOutcome::Sent);
    assert_eq!(second, SubmitOutcome::AlreadySending);
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    assert_eq!(context.controller().state(), SubmissionState::Idle);
}

#[tokio::test]
async fn panicking_notifier_still_restores_button() {
    let transport = Arc::new(RecordingTransport {
        fail: true,
        ..RecordingTransport::default()
    });
    let ui = Arc::new(RecordingUi {
        panic_on_error: true,
        ..RecordingUi::default()
    });
    let context = Arc::new(context_with(transport, ui.clone()));
    fill_valid(&context);
    let handler = context.set_form_submit().expect("install handler");

    let result = tokio::spawn(async move { handler.on_submit().await }).await;

    assert!(result.expect_err("notifier panicked").is_panic());
    assert_eq!(ui.events(), vec!["error"]);
    assert_eq!(context.controller().state(), SubmissionState::Idle);
    assert!(!context.form().submit_button().is_disabled());
    assert_eq!(context.form().submit_button().label(), SubmitLabels::default().idle);
}

#[test]
fn submit_handler_installs_once() {
    let context = context_with(
        Arc::new(RecordingTransport::default()),
        Arc::new(RecordingUi::default()),
    );
    assert!(context.set_form_submit().is_ok());
    assert!(matches!(
        context.set_form_submit(),
        Err(FormError::HandlerAlreadyInstalled)
    ));
}

#[test]
fn reset_validator_clears_errors_only() {
    let context = context_with(
        Arc::new(RecordingTransport::default()),
        Arc::new(RecordingUi::default()),
    );
    context.form().description.set("x".repeat(141));
    context.form().hashtags.set("tag");

    let handler = context.set_form_submit().expect("install handler");
    let outcome = tokio_test::block_on(handler.on_submit());
    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(context.engine().errors().len(), 2);

    context.reset_validator();
    assert!(context.engine().errors().is_empty());
    assert_eq!(context.form().hashtags.value(), "tag");
    assert_eq!(context.form().description.value().chars().count(), 141);
}

#[test]
fn contexts_are_independent() {
    let first = context_with(
        Arc::new(RecordingTransport::default()),
        Arc::new(RecordingUi::default()),
    );
    let second = context_with(
        Arc::new(RecordingTransport::default()),
        Arc::new(RecordingUi::default()),
    );
    first.form().hashtags.set("bad");
    assert!(!first.engine().validate());
    assert!(second.engine().validate());
    assert!(second.set_form_submit().is_ok());
    assert!(first.set_form_submit().is_ok());
}
