/// Global success/error messages shown after a submission settles.
pub trait Notifier: Send + Sync {
    fn show_success(&self);
    fn show_error(&self);
}

pub trait ModalLifecycle: Send + Sync {
    /// Close and reset the upload modal. Called only after a successful
    /// submission.
    fn close_modal(&self);
}

/// Reports submission results through `tracing` when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_success(&self) {
        tracing::info!("image uploaded");
    }

    fn show_error(&self) {
        tracing::error!("image upload failed, form kept for retry");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogModal;

impl ModalLifecycle for LogModal {
    fn close_modal(&self) {
        tracing::debug!("upload modal closed");
    }
}
