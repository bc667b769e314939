pub mod settings;

pub use settings::{ApiSettings, AppConfig, ServerSettings, SessionSettings};
