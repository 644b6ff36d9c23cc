pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{AppConfig, ClassifierConfig, ServerConfig};
pub use core::{
    classifier::WatsonClassifier,
    formatter::{format_response, INVALID_TEXT_MESSAGE},
    handler::EmotionService,
};
pub use domain::model::{Detection, Emotion, EmotionScores};
pub use utils::error::{DetectorError, Result};
