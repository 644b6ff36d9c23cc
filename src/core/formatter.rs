use crate::domain::model::EmotionScores;

/// 輸入為空或被 classifier 拒絕時回給使用者的固定訊息
pub const INVALID_TEXT_MESSAGE: &str = "Invalid text! Please try again!";

/// 整數值的分數保留 `.0` (例如 `1.0`)
fn render_score(score: f64) -> String {
    let rendered = score.to_string();
    if score.is_finite() && !rendered.contains('.') {
        format!("{}.0", rendered)
    } else {
        rendered
    }
}

pub fn format_response(scores: &EmotionScores) -> String {
    format!(
        "For the given statement, the system response is \
         'anger': {}, 'disgust': {}, 'fear': {}, 'joy': {} and 'sadness': {}. \
         The dominant emotion is <b>{}</b>.",
        render_score(scores.anger),
        render_score(scores.disgust),
        render_score(scores.fear),
        render_score(scores.joy),
        render_score(scores.sadness),
        scores.dominant_emotion()
    )
}
