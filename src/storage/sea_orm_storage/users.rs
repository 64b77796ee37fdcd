//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UserListQuery},
        responses::{ApprovalStatsResponse, UserListResponse},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建用户（password 字段应已由服务层哈希）
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        // 管理员账号无需审批
        let allowed = req.role == UserRole::Admin;

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            allowed: Set(allowed),
            display_name: Set(req.display_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| match CourseHubError::from(e) {
                err if err.is_already_exists() => err,
                err => CourseHubError::database_operation(format!("创建用户失败: {err}")),
            })?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取用户（登录用）
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find();

        // 角色筛选
        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 审批状态筛选
        if let Some(allowed) = query.allowed {
            select = select.filter(Column::Allowed.eq(allowed));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 设置审批状态
    pub async fn set_user_allowed_impl(&self, id: i64, allowed: bool) -> Result<bool> {
        let existing = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        if existing.is_none() {
            return Ok(false);
        }

        let model = ActiveModel {
            id: Set(id),
            allowed: Set(allowed),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新审批状态失败: {e}")))?;

        Ok(true)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                Column::LastLogin,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 用户总数
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户总数失败: {e}")))
    }

    /// 审批统计
    pub async fn get_approval_stats_impl(&self) -> Result<ApprovalStatsResponse> {
        let count = |role: UserRole, allowed: bool| {
            Users::find()
                .filter(Column::Role.eq(role.to_string()))
                .filter(Column::Allowed.eq(allowed))
                .count(&self.db)
        };

        let pending_students = count(UserRole::Student, false)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询审批统计失败: {e}")))?;
        let approved_students = count(UserRole::Student, true)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询审批统计失败: {e}")))?;
        let pending_professors = count(UserRole::Professor, false)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询审批统计失败: {e}")))?;
        let approved_professors = count(UserRole::Professor, true)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询审批统计失败: {e}")))?;

        Ok(ApprovalStatsResponse {
            pending_students: pending_students as i64,
            approved_students: approved_students as i64,
            pending_professors: pending_professors as i64,
            approved_professors: approved_professors as i64,
        })
    }
}
