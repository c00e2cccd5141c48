use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::ValidateLength;

use crate::util::normalize_tags;

pub const MAX_DESCRIPTION_LENGTH: usize = 140;
pub const MAX_HASHTAGS: usize = 5;
/// Characters per hashtag, `#` included.
pub const MAX_HASHTAG_LENGTH: usize = 20;

static DEFAULT_RULES: Lazy<UploadRules> = Lazy::new(|| UploadRules::new(FormLimits::default()));

/// Limits applied to the upload form. The tag count and the per-tag length
/// are separate values and each feeds exactly one check.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormLimits {
    pub max_description_length: usize,
    pub max_hashtags: usize,
    pub max_hashtag_length: usize,
}

impl Default for FormLimits {
    fn default() -> Self {
        Self {
            max_description_length: MAX_DESCRIPTION_LENGTH,
            max_hashtags: MAX_HASHTAGS,
            max_hashtag_length: MAX_HASHTAG_LENGTH,
        }
    }
}

impl FormLimits {
    pub fn description_message(&self) -> String {
        format!(
            "Комментарий не может содержать более {} символов",
            self.max_description_length
        )
    }

    pub fn amount_message(&self) -> String {
        format!("Можно добавить не более {} хештегов.", self.max_hashtags)
    }

    pub fn syntax_message(&self) -> String {
        format!(
            "Хэштег должен начинаться с # и содержать не более {} символов.",
            self.max_hashtag_length
        )
    }

    pub fn unique_message(&self) -> String {
        "Хэштеги не должны повторяться.".to_string()
    }
}

/// Field predicates bound to one set of limits.
#[derive(Debug, Clone)]
pub struct UploadRules {
    limits: FormLimits,
    hashtag: Regex,
}

impl UploadRules {
    pub fn new(limits: FormLimits) -> Self {
        Self {
            limits,
            hashtag: hashtag_regex(limits.max_hashtag_length),
        }
    }

    pub fn limits(&self) -> &FormLimits {
        &self.limits
    }

    /// Raw description text, counted in characters.
    pub fn validate_description(&self, value: &str) -> bool {
        value.validate_length(None, Some(self.limits.max_description_length as u64), None)
    }

    pub fn check_amount_hashtags(&self, value: &str) -> bool {
        normalize_tags(value).len() <= self.limits.max_hashtags
    }

    pub fn validate_hashtags(&self, value: &str) -> bool {
        normalize_tags(value)
            .iter()
            .all(|tag| self.hashtag.is_match(tag))
    }

    pub fn validate_unique_hashtags(&self, value: &str) -> bool {
        let tags = normalize_tags(value);
        let distinct: HashSet<&str> = tags.iter().map(String::as_str).collect();
        tags.len() == distinct.len()
    }
}

/// `#` followed by Latin or Cyrillic letters and digits. Tags reach the regex
/// already lowercased, so only lowercase ranges are listed. Limits below two
/// characters still allow one character after `#`.
fn hashtag_regex(max_length: usize) -> Regex {
    let body = max_length.saturating_sub(1).max(1);
    Regex::new(&format!("^#[a-zа-яё0-9]{{1,{body}}}$")).expect("hashtag regex must compile")
}

pub fn validate_description(value: &str) -> bool {
    DEFAULT_RULES.validate_description(value)
}

pub fn check_amount_hashtags(value: &str) -> bool {
    DEFAULT_RULES.check_amount_hashtags(value)
}

pub fn validate_hashtags(value: &str) -> bool {
    DEFAULT_RULES.validate_hashtags(value)
}

pub fn validate_unique_hashtags(value: &str) -> bool {
    DEFAULT_RULES.validate_unique_hashtags(value)
}
