pub mod notify;
pub mod transport;

pub use notify::{LogModal, LogNotifier, ModalLifecycle, Notifier};
pub use transport::{HttpTransport, Transport};
