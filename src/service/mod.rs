pub mod engine;
pub mod validators;

pub use engine::{Predicate, ValidationEngine, ValidationRule};
pub use validators::{
    check_amount_hashtags, validate_description, validate_hashtags, validate_unique_hashtags,
    FormLimits, UploadRules, MAX_DESCRIPTION_LENGTH, MAX_HASHTAGS, MAX_HASHTAG_LENGTH,
};
