use serde::{Deserialize, Serialize};

use crate::models::questions::entities::Question;

// 问题列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub items: Vec<Question>,
}
