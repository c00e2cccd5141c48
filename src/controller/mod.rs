pub mod submit;

pub use submit::{Collaborators, SubmissionController, SubmissionState, SubmitOutcome};
