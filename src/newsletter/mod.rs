pub mod extract;
pub mod inline_image;
pub mod markdown;
pub mod render;
pub mod store;
pub mod types;

pub use extract::extract;
pub use inline_image::InlineImage;
pub use markdown::{Segment, Segments, split, strip};
pub use render::render_plain;
pub use store::VariablesStore;
pub use types::{MAX_LINES_RANGE, NO_TONE, NewsletterVariables, ToneOption};
