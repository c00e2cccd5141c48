pub mod form;
pub mod form_data;

pub use form::{FieldKey, InputField, SubmitButton, UploadForm};
pub use form_data::{Attachment, FormData, FormPart};
