/// A single normalized hashtag token: lowercase, never empty.
pub type Tag = String;

/// Split a raw hashtags field into lowercase tags.
///
/// Normalization steps:
/// - trim leading/trailing whitespace
/// - split on any run of whitespace
/// - lowercase every chunk
/// - drop chunks that are empty after trimming
///
/// Input order is kept and duplicates are preserved; uniqueness is checked
/// separately by the hashtag validators.
pub fn normalize_tags(raw: impl AsRef<str>) -> Vec<Tag> {
    raw.as_ref()
        .trim()
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|tag| !tag.trim().is_empty())
        .collect()
}
