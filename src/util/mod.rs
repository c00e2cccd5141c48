pub mod error;
pub(crate) mod lock;
pub mod normalize;

pub use error::{FormError, TransportError};
pub use normalize::{normalize_tags, Tag};
