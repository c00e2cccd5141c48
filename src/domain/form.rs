use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock};

use super::form_data::{Attachment, FormData};
use crate::util::lock::{read_lock, write_lock};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum FieldKey {
    Description,
    Hashtags,
}

impl FieldKey {
    /// Name of the field inside the submitted payload.
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKey::Description => "description",
            FieldKey::Hashtags => "hashtags",
        }
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value holder standing in for an input control.
///
/// Clones share the same value, so the host keeps one handle for editing
/// while validators read the current text through another.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    value: Arc<RwLock<String>>,
}

impl InputField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(RwLock::new(value.into())),
        }
    }

    pub fn value(&self) -> String {
        read_lock(&self.value).clone()
    }

    pub fn set(&self, value: impl Into<String>) {
        *write_lock(&self.value) = value.into();
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct ButtonState {
    disabled: bool,
    label: String,
}

/// The form's single submit control.
///
/// Hosts only get a read-only view; blocking and unblocking belongs to the
/// submission controller.
#[derive(Clone, Debug)]
pub struct SubmitButton {
    state: Arc<RwLock<ButtonState>>,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ButtonState {
                disabled: false,
                label: label.into(),
            })),
        }
    }

    pub fn is_disabled(&self) -> bool {
        read_lock(&self.state).disabled
    }

    pub fn label(&self) -> String {
        read_lock(&self.state).label.clone()
    }

    pub(crate) fn block(&self, label: &str) {
        let mut state = write_lock(&self.state);
        state.disabled = true;
        state.label = label.to_string();
    }

    pub(crate) fn unblock(&self, label: &str) {
        let mut state = write_lock(&self.state);
        state.disabled = false;
        state.label = label.to_string();
    }
}

/// The image upload form: two text fields, an optional image and the submit
/// control.
#[derive(Clone, Debug)]
pub struct UploadForm {
    pub description: InputField,
    pub hashtags: InputField,
    attachment: Arc<RwLock<Option<Attachment>>>,
    submit_button: SubmitButton,
}

impl UploadForm {
    pub fn new(idle_label: impl Into<String>) -> Self {
        Self {
            description: InputField::default(),
            hashtags: InputField::default(),
            attachment: Arc::new(RwLock::new(None)),
            submit_button: SubmitButton::new(idle_label),
        }
    }

    pub fn field(&self, key: FieldKey) -> &InputField {
        match key {
            FieldKey::Description => &self.description,
            FieldKey::Hashtags => &self.hashtags,
        }
    }

    pub fn submit_button(&self) -> &SubmitButton {
        &self.submit_button
    }

    pub fn attach(&self, attachment: Attachment) {
        *write_lock(&self.attachment) = Some(attachment);
    }

    pub fn attachment(&self) -> Option<Attachment> {
        read_lock(&self.attachment).clone()
    }

    /// Snapshot of the current values as a multipart payload. Field text is
    /// passed through as typed, without normalization.
    pub fn form_data(&self) -> FormData {
        let mut data = FormData::new();
        if let Some(attachment) = self.attachment() {
            data.append_file("filename", attachment);
        }
        data.append_text(FieldKey::Description.as_str(), self.description.value());
        data.append_text(FieldKey::Hashtags.as_str(), self.hashtags.value());
        data
    }
}
