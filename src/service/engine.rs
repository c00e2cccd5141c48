use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::{FieldKey, UploadForm};
use crate::util::lock::{read_lock, write_lock};

use super::validators::{FormLimits, UploadRules};

pub type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// A predicate over one field's raw value and the message shown when it
/// fails.
pub struct ValidationRule {
    predicate: Predicate,
    message: String,
}

impl ValidationRule {
    pub fn check(&self, value: &str) -> bool {
        (self.predicate)(value)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Runs registered rules against the live form fields and owns the inline
/// error display for each field.
pub struct ValidationEngine {
    form: UploadForm,
    rules: BTreeMap<FieldKey, Vec<ValidationRule>>,
    errors: RwLock<BTreeMap<FieldKey, String>>,
}

impl ValidationEngine {
    pub fn new(form: UploadForm) -> Self {
        Self {
            form,
            rules: BTreeMap::new(),
            errors: RwLock::new(BTreeMap::new()),
        }
    }

    /// Engine with the description, count, syntax and uniqueness rules
    /// registered in that order.
    pub fn with_upload_rules(form: UploadForm, limits: FormLimits) -> Self {
        let rules = Arc::new(UploadRules::new(limits));
        let mut engine = Self::new(form);

        let description = rules.clone();
        engine.add_validator(
            FieldKey::Description,
            move |value| description.validate_description(value),
            limits.description_message(),
        );

        let amount = rules.clone();
        engine.add_validator(
            FieldKey::Hashtags,
            move |value| amount.check_amount_hashtags(value),
            limits.amount_message(),
        );

        let syntax = rules.clone();
        engine.add_validator(
            FieldKey::Hashtags,
            move |value| syntax.validate_hashtags(value),
            limits.syntax_message(),
        );

        engine.add_validator(
            FieldKey::Hashtags,
            move |value| rules.validate_unique_hashtags(value),
            limits.unique_message(),
        );

        engine
    }

    /// Rules for the same field accumulate; the field passes only when all
    /// of them do.
    pub fn add_validator<P>(
        &mut self,
        field: FieldKey,
        predicate: P,
        message: impl Into<String>,
    ) -> &mut Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rules.entry(field).or_default().push(ValidationRule {
            predicate: Box::new(predicate),
            message: message.into(),
        });
        self
    }

    pub fn rules(&self, field: FieldKey) -> &[ValidationRule] {
        self.rules.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Check every field against its rules.
    ///
    /// Each failing field shows the message of its first failing rule;
    /// fields that pass have their message cleared. Field values are only
    /// read.
    pub fn validate(&self) -> bool {
        let mut errors = BTreeMap::new();
        for (field, rules) in &self.rules {
            let value = self.form.field(*field).value();
            if let Some(rule) = rules.iter().find(|rule| !rule.check(&value)) {
                tracing::debug!(field = %field, message = rule.message(), "field failed validation");
                errors.insert(*field, rule.message.clone());
            }
        }

        let is_valid = errors.is_empty();
        *write_lock(&self.errors) = errors;
        is_valid
    }

    pub fn reset(&self) {
        write_lock(&self.errors).clear();
    }

    pub fn error(&self, field: FieldKey) -> Option<String> {
        read_lock(&self.errors).get(&field).cloned()
    }

    pub fn errors(&self) -> BTreeMap<FieldKey, String> {
        read_lock(&self.errors).clone()
    }

    pub fn form(&self) -> &UploadForm {
        &self.form
    }
}
