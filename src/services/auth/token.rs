use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::responses::VerifyTokenResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 使用 cookie 中的 refresh token 换取新的 access token
pub async fn handle_refresh_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let refresh_token = match JwtUtils::extract_refresh_token_from_cookie(request) {
        Some(token) => token,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                "Missing refresh token",
            )));
        }
    };

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            serde_json::json!({ "access_token": access_token }),
            "Token refreshed",
        ))),
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                "Invalid refresh token",
            )))
        }
    }
}

/// 校验 Authorization 头中的 access token
pub async fn handle_verify_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // RequireJWT 已经完成验证，这里只回显关键信息
    match RequireJWT::extract_user_claims(request) {
        Some(user) => {
            let token = request
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
                .unwrap_or_default();

            let expires_at = JwtUtils::verify_token(token)
                .map(|claims| claims.exp as i64)
                .unwrap_or_default();

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                VerifyTokenResponse {
                    user_id: user.id,
                    role: user.role.to_string(),
                    expires_at,
                },
                "Token is valid",
            )))
        }
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))),
    }
}

/// 获取当前登录用户信息
pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user, "查询成功"))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))),
    }
}
