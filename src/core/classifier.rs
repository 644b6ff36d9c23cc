use crate::domain::model::{Detection, EmotionScores};
use crate::domain::ports::{ClassifierSettings, EmotionClassifier};
use crate::utils::error::{DetectorError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";

#[derive(Debug, Serialize)]
struct EmotionPredictRequest<'a> {
    raw_document: RawDocument<'a>,
}

#[derive(Debug, Serialize)]
struct RawDocument<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmotionPredictResponse {
    emotion_predictions: Vec<EmotionPrediction>,
}

#[derive(Debug, Deserialize)]
struct EmotionPrediction {
    emotion: RawEmotionScores,
}

// 上游可能回傳更多欄位，這裡只取五個
#[derive(Debug, Deserialize)]
struct RawEmotionScores {
    anger: f64,
    disgust: f64,
    fear: f64,
    joy: f64,
    sadness: f64,
}

/// Watson NLP `EmotionPredict` client.
pub struct WatsonClassifier<C: ClassifierSettings> {
    config: C,
    client: Client,
}

impl<C: ClassifierSettings> WatsonClassifier<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self { config, client })
    }

    fn is_rejection(&self, status: StatusCode) -> bool {
        status.is_client_error() || self.config.rejection_statuses().contains(&status.as_u16())
    }
}

#[async_trait]
impl<C: ClassifierSettings> EmotionClassifier for WatsonClassifier<C> {
    async fn detect_emotion(&self, text: &str) -> Result<Detection> {
        tracing::debug!("Making classifier request to: {}", self.config.endpoint());

        let payload = EmotionPredictRequest {
            raw_document: RawDocument { text },
        };
        let response = self
            .client
            .post(self.config.endpoint())
            .header(MODEL_ID_HEADER, self.config.model_id())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Classifier response status: {}", status);

        if self.is_rejection(status) {
            tracing::warn!("Classifier rejected the document (status {})", status);
            return Ok(Detection::Invalid);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(DetectorError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let scores = parse_emotion_response(&body)?;
        tracing::debug!("Dominant emotion: {}", scores.dominant_emotion());

        Ok(Detection::Scored(scores))
    }
}

/// 解析成功回應，取第一筆 prediction 的五個分數
pub fn parse_emotion_response(body: &str) -> Result<EmotionScores> {
    let response: EmotionPredictResponse = serde_json::from_str(body)
        .map_err(|e| DetectorError::malformed(format!("unexpected body shape: {}", e)))?;

    let raw = response
        .emotion_predictions
        .into_iter()
        .next()
        .map(|prediction| prediction.emotion)
        .ok_or_else(|| DetectorError::malformed("emotionPredictions is empty"))?;

    for (name, value) in [
        ("anger", raw.anger),
        ("disgust", raw.disgust),
        ("fear", raw.fear),
        ("joy", raw.joy),
        ("sadness", raw.sadness),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(DetectorError::malformed(format!(
                "score for '{}' must be a non-negative number, got {}",
                name, value
            )));
        }
    }

    Ok(EmotionScores::new(
        raw.anger,
        raw.disgust,
        raw.fear,
        raw.joy,
        raw.sadness,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;
    use crate::domain::model::Emotion;
    use httpmock::prelude::*;
    use serde_json::json;

    fn config_for(server: &MockServer) -> ClassifierConfig {
        ClassifierConfig {
            endpoint: server.url("/predict"),
            ..ClassifierConfig::default()
        }
    }

    #[test]
    fn test_parse_ignores_extra_keys() {
        let body = json!({
            "emotionPredictions": [{
                "emotion": {
                    "anger": 0.1, "disgust": 0.2, "fear": 0.3, "joy": 0.05, "sadness": 0.01,
                    "surprise": 0.99
                },
                "target": ""
            }],
            "producerId": {"name": "Ensemble Aggregated Emotion Workflow"}
        });

        let scores = parse_emotion_response(&body.to_string()).unwrap();
        assert_eq!(scores.fear, 0.3);
        assert_eq!(scores.dominant_emotion(), Emotion::Fear);
    }

    #[test]
    fn test_parse_uses_first_prediction() {
        let body = json!({
            "emotionPredictions": [
                {"emotion": {"anger": 0.9, "disgust": 0.0, "fear": 0.0, "joy": 0.0, "sadness": 0.0}},
                {"emotion": {"anger": 0.0, "disgust": 0.0, "fear": 0.0, "joy": 0.9, "sadness": 0.0}}
            ]
        });

        let scores = parse_emotion_response(&body.to_string()).unwrap();
        assert_eq!(scores.dominant_emotion(), Emotion::Anger);
    }

    #[test]
    fn test_parse_rejects_malformed_bodies() {
        let cases = [
            "not json".to_string(),
            json!({}).to_string(),
            json!({"emotionPredictions": []}).to_string(),
            json!({"emotionPredictions": [{"emotion": {"anger": 0.1}}]}).to_string(),
            json!({"emotionPredictions": [{"emotion": {
                "anger": "high", "disgust": 0.0, "fear": 0.0, "joy": 0.0, "sadness": 0.0
            }}]})
            .to_string(),
            json!({"emotionPredictions": [{"emotion": {
                "anger": -0.1, "disgust": 0.0, "fear": 0.0, "joy": 0.0, "sadness": 0.0
            }}]})
            .to_string(),
        ];

        for body in cases {
            let result = parse_emotion_response(&body);
            assert!(
                matches!(result, Err(DetectorError::MalformedResponse { .. })),
                "expected malformed error for {}",
                body
            );
        }
    }

    #[tokio::test]
    async fn test_sends_payload_and_model_header() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/predict")
                    .header(MODEL_ID_HEADER, "emotion_aggregated-workflow_lang_en_stock")
                    .json_body(json!({"raw_document": {"text": "I love this new technology."}}));
                then.status(200).json_body(json!({
                    "emotionPredictions": [{"emotion": {
                        "anger": 0.01, "disgust": 0.01, "fear": 0.01, "joy": 0.95, "sadness": 0.02
                    }}]
                }));
            })
            .await;

        let classifier = WatsonClassifier::new(config_for(&server)).unwrap();
        let detection = classifier
            .detect_emotion("I love this new technology.")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(detection.dominant_emotion(), Some(Emotion::Joy));
    }

    #[tokio::test]
    async fn test_client_error_is_rejection() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/predict");
                then.status(400).body("document is empty");
            })
            .await;

        let classifier = WatsonClassifier::new(config_for(&server)).unwrap();
        let detection = classifier.detect_emotion("").await.unwrap();

        assert_eq!(detection, Detection::Invalid);
    }

    #[tokio::test]
    async fn test_server_error_is_fatal_unless_configured() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/predict");
                then.status(500).body("internal error");
            })
            .await;

        let classifier = WatsonClassifier::new(config_for(&server)).unwrap();
        let result = classifier.detect_emotion("hello").await;
        assert!(matches!(
            result,
            Err(DetectorError::UpstreamStatus { status: 500, .. })
        ));

        let config = ClassifierConfig {
            rejection_statuses: vec![500],
            ..config_for(&server)
        };
        let classifier = WatsonClassifier::new(config).unwrap();
        let detection = classifier.detect_emotion("hello").await.unwrap();
        assert!(detection.is_invalid());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_api_error() {
        let config = ClassifierConfig {
            endpoint: "http://127.0.0.1:1/predict".to_string(),
            timeout_seconds: 2,
            ..ClassifierConfig::default()
        };

        let classifier = WatsonClassifier::new(config).unwrap();
        let result = classifier.detect_emotion("hello").await;
        assert!(matches!(result, Err(DetectorError::ApiError(_))));
    }
}
