use serde::Deserialize;

/// 提问请求
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub assignment_id: i64,
    pub content: String,
}

/// 回答请求
#[derive(Debug, Deserialize)]
pub struct CreateAnswerRequest {
    pub content: String,
}
