use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

/// 登录
///
/// 用户名或邮箱 + 密码。密码校验通过但账号未获审批时返回
/// 独立的错误码，前端据此提示"等待审批"而不是"密码错误"。
pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let user = match storage
        .get_user_by_username_or_email(&login_request.username)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Username or password is incorrect",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Username or password is incorrect",
        )));
    }

    // 审批门禁
    if !user.allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountNotApproved,
            "账号尚未通过管理员审批",
        )));
    }

    let _ = storage.update_last_login(user.id).await;

    // remember_me 拉长 refresh token 有效期
    let refresh_expiry = login_request
        .remember_me
        .then(|| chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry));

    let token_pair = match user.generate_token_pair(refresh_expiry).await {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    tracing::info!("User {} logged in successfully", user.username);

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60, // 分钟转秒
        user,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
