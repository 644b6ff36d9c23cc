use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};

use crate::{core::handler::EmotionService, utils::error::DetectorError};

const INDEX_PAGE: &str = include_str!("../../templates/index.html");
const TEXT_PARAM: &str = "textToAnalyze";

pub struct AppState {
    pub service: EmotionService,
}

pub async fn index_handler() -> impl IntoResponse {
    Html(INDEX_PAGE)
}

pub async fn emotion_detector_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<String, DetectorError> {
    // 參數重複時取第一個
    let text = params
        .iter()
        .find(|(key, _)| key == TEXT_PARAM)
        .map(|(_, value)| value.as_str());

    state.service.respond(text).await
}
