use serde::Deserialize;

use crate::models::common::PaginationQuery;
use crate::models::users::entities::UserRole;

// 创建用户请求（注册与管理员建号共用）
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub display_name: Option<String>,
}

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct UserQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub allowed: Option<bool>,
    pub search: Option<String>,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub allowed: Option<bool>,
    pub search: Option<String>,
}
