use crate::domain::model::Detection;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ClassifierSettings: Send + Sync {
    fn endpoint(&self) -> &str;
    fn model_id(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn rejection_statuses(&self) -> &[u16];
}

#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// 送出一次偵測請求；被上游拒絕時回傳 `Detection::Invalid` 而非錯誤
    async fn detect_emotion(&self, text: &str) -> Result<Detection>;
}
