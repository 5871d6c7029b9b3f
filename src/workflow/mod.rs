pub mod controller;
pub mod outcome;

pub use controller::{BusyRegions, NewsletterController, Region, WorkflowState};
pub use outcome::Outcome;
