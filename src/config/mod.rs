pub mod settings;

pub use settings::{FormSettings, LoggingSettings, Settings, SubmitLabels, TransportSettings};
