use crate::core::formatter::{format_response, INVALID_TEXT_MESSAGE};
use crate::domain::model::Detection;
use crate::domain::ports::EmotionClassifier;
use crate::utils::error::Result;
use std::sync::Arc;

/// Turns the raw `textToAnalyze` value into the message shown to the user.
#[derive(Clone)]
pub struct EmotionService {
    classifier: Arc<dyn EmotionClassifier>,
}

impl EmotionService {
    pub fn new(classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self { classifier }
    }

    pub async fn respond(&self, text: Option<&str>) -> Result<String> {
        let text = match text {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                tracing::debug!("Rejecting blank input without calling the classifier");
                return Ok(INVALID_TEXT_MESSAGE.to_string());
            }
        };

        match self.classifier.detect_emotion(text).await? {
            Detection::Scored(scores) => Ok(format_response(&scores)),
            Detection::Invalid => Ok(INVALID_TEXT_MESSAGE.to_string()),
        }
    }
}
