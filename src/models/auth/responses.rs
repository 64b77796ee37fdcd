use serde::{Deserialize, Serialize};

use crate::models::users::entities::User;

// 登录响应
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64, // 秒
    pub user: User,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 令牌校验响应
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyTokenResponse {
    pub user_id: i64,
    pub role: String,
    pub expires_at: i64,
}
