pub mod classifier;
pub mod formatter;
pub mod handler;

pub use crate::domain::model::{Detection, Emotion, EmotionScores};
pub use crate::domain::ports::{ClassifierSettings, EmotionClassifier};
pub use crate::utils::error::Result;
