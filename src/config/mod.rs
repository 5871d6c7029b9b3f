mod env_overrides;
mod loader;
mod locale;
pub mod schema;
#[cfg(test)]
mod test_env;

pub use locale::SUPPORTED_LOCALES;
pub use schema::{Config, ObservabilityConfig, WebhookConfig};
