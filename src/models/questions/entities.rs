use serde::{Deserialize, Serialize};

// 问题实体（answers 按回答时间升序）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: String,
    pub asked_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

// 答案实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub professor_id: i64,
    pub content: String,
    pub answered_at: chrono::DateTime<chrono::Utc>,
}
