use serde::{Deserialize, Serialize};
use validator::Validate;

/// A student's EKG diagnosis set against the correct one.
///
/// All four fields are required. Content is free text with no length or format
/// rules; an empty string is a valid value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DiagnosisComparison {
    /// The diagnosis the student submitted.
    pub user_answer: String,
    /// The ground-truth diagnosis.
    pub correct_answer: String,
    /// The student's reasoning.
    pub user_explanation: String,
    /// Defining EKG characteristics of the correct diagnosis.
    pub ekg_attributes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}
