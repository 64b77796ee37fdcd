use serde::{Deserialize, Serialize};

use crate::models::PaginatedResponse;
use crate::models::users::entities::User;

pub type UserListResponse = PaginatedResponse<User>;

// 审批统计（管理员首页）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalStatsResponse {
    pub pending_students: i64,
    pub approved_students: i64,
    pub pending_professors: i64,
    pub approved_professors: i64,
}
