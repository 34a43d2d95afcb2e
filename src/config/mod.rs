pub mod configs;
pub mod defaults;
pub mod loader;
pub mod validate;

pub use configs::{
    ApiConfig, AppConfig, ConsoleConfig, GeneralConfig, LoggingConfig, SubmitPolicy,
};
