//! Prompt construction for diagnosis feedback.

use crate::models::DiagnosisComparison;

/// Interpolate a comparison into the fixed feedback instruction.
pub fn build_feedback_prompt(comparison: &DiagnosisComparison) -> String {
    format!(
        "An EKG analysis has been conducted. The correct diagnosis based on the EKG attributes \
         is '{correct}', characterized by: {attributes}.\n\
         The user diagnosed the EKG as '{answer}' and provided the following reasoning: {explanation}.\n\n\
         Provide feedback comparing the user's diagnosis and reasoning against the correct EKG attributes. \
         Explain why the user's diagnosis and reasoning are either correct or incorrect, \
         highlighting any important EKG characteristics that they missed or misinterpreted. \
         Generate this response as if you were a licensed physician speaking very succinctly to a student; \
         do not call them user, address them personally.",
        correct = comparison.correct_answer,
        attributes = comparison.ekg_attributes,
        answer = comparison.user_answer,
        explanation = comparison.user_explanation,
    )
}
