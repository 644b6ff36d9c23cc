use serde::{Deserialize, Serialize};
use std::fmt;

/// 追蹤的五種情緒，順序固定 (同分時以先出現者為準)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier scores for one document.
///
/// `dominant_emotion` is derived once in [`EmotionScores::new`] and cannot be set directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionScores {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
    dominant_emotion: Emotion,
}

impl EmotionScores {
    pub fn new(anger: f64, disgust: f64, fear: f64, joy: f64, sadness: f64) -> Self {
        let mut scores = Self {
            anger,
            disgust,
            fear,
            joy,
            sadness,
            dominant_emotion: Emotion::Anger,
        };
        scores.dominant_emotion = scores.arg_max();
        scores
    }

    pub fn score(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }

    pub fn dominant_emotion(&self) -> Emotion {
        self.dominant_emotion
    }

    fn arg_max(&self) -> Emotion {
        let mut best = Emotion::ALL[0];
        for emotion in Emotion::ALL.into_iter().skip(1) {
            // strictly greater: ties keep the earlier key
            if self.score(emotion) > self.score(best) {
                best = emotion;
            }
        }
        best
    }
}

/// 一次偵測的結果：有分數，或是被 classifier 拒絕的 sentinel
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    Scored(EmotionScores),
    Invalid,
}

impl Detection {
    pub fn dominant_emotion(&self) -> Option<Emotion> {
        match self {
            Detection::Scored(scores) => Some(scores.dominant_emotion()),
            Detection::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Detection::Invalid)
    }
}
