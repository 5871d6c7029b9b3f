#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");

pub mod config;
pub mod error;
pub mod newsletter;
pub mod ui;
pub mod webhook;
pub mod workflow;

pub use config::Config;
pub use error::{NewsroomError, Result};
pub use webhook::{NewsletterBackend, WebhookClient};
pub use workflow::{NewsletterController, Outcome, Region};
