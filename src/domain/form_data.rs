/// Image file selected in the upload form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormPart {
    Text(String),
    File(Attachment),
}

/// Ordered multipart payload built from the form's current values.
///
/// The controller hands it to the transport without looking inside.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FormData {
    parts: Vec<(String, FormPart)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push((name.into(), FormPart::Text(value.into())));
    }

    pub fn append_file(&mut self, name: impl Into<String>, attachment: Attachment) {
        self.parts.push((name.into(), FormPart::File(attachment)));
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(key, part)| match part {
            FormPart::Text(value) if key == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn file(&self, name: &str) -> Option<&Attachment> {
        self.parts.iter().find_map(|(key, part)| match part {
            FormPart::File(attachment) if key == name => Some(attachment),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormPart)> {
        self.parts.iter().map(|(name, part)| (name.as_str(), part))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn into_parts(self) -> Vec<(String, FormPart)> {
        self.parts
    }
}
