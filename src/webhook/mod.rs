pub mod client;
pub mod http_client;
pub mod scrub;
pub mod wire;

pub use client::{Endpoint, NewsletterBackend, WebhookClient, WebhookEndpoints};
pub use http_client::{
    build_webhook_client, build_webhook_client_with_timeout, try_build_webhook_client,
};
pub use wire::FetchedVariables;
