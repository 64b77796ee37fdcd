use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::sanitize::sanitize_input;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;

/// 注册
///
/// 开放注册只接受学生与教授；新账号 allowed = false，
/// 由管理员审批后才能登录。管理员账号由启动流程播种。
pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if create_request.role == UserRole::Admin {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::RoleInvalid,
            "Cannot register an admin account",
        )));
    }

    // 字段校验：用户名、邮箱、密码策略
    if let Err(msg) = validate_username(&create_request.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }
    if let Err(msg) = validate_email(&create_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    if let Err(msg) = validate_password_simple(&create_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PasswordTooWeak, msg)));
    }

    // 用户名与邮箱占用检查
    if let Err(response) =
        ensure_identity_available(&storage, &create_request.username, &create_request.email).await
    {
        return Ok(response);
    }

    // 显示名转义后入库
    if let Some(display_name) = create_request.display_name.take() {
        create_request.display_name = Some(sanitize_input(display_name.trim()));
    }

    // 明文密码替换为哈希
    create_request.password = match hash_password(&create_request.password) {
        Ok(password_hash) => password_hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("密码哈希失败: {e}"),
                )),
            );
        }
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功，等待管理员审批")))
        }
        // 占用检查之后仍可能撞上并发注册，唯一约束兜底
        Err(e) if e.is_already_exists() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserNameAlreadyExists, "Username or email taken"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("注册失败: {e}"),
            )),
        ),
    }
}

/// 用户名与邮箱都未被占用时返回 Ok
async fn ensure_identity_available(
    storage: &Arc<dyn Storage>,
    username: &str,
    email: &str,
) -> Result<(), HttpResponse> {
    let lookup_failed = |e: crate::errors::CourseHubError| {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::RegisterFailed,
            format!("Register failed: {e}"),
        ))
    };

    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => {
            return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserNameAlreadyExists,
                "Username already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Err(lookup_failed(e)),
    }

    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(lookup_failed(e)),
    }
}
