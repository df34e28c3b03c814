pub mod feedback;
pub mod metrics;
pub mod prompt;
pub mod providers;

pub use feedback::{FeedbackError, FeedbackHandler};
