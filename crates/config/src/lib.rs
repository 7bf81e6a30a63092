// Configuration loading

pub mod settings;

pub use settings::{ApiSettings, ConfigError, MatchingSettings, SearchSettings, Settings};
