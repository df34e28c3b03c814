//! Request and response shapes for the HTTP API.

pub mod feedback;

pub use feedback::{DiagnosisComparison, FeedbackResponse};
