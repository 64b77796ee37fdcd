//! JWT 签发与校验
//!
//! access token 走 Authorization 头，refresh token 走 HttpOnly cookie。
//! 两类 token 共用一个密钥，靠 claims 里的 token_type 区分，刷新接口
//! 只接受 refresh 类型。

use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";
const REFRESH_COOKIE_NAME: &str = "refresh_token";

/// JWT 载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID（字符串形式）
    pub sub: String,
    /// 用户角色
    pub role: String,
    /// "access" 或 "refresh"
    pub token_type: String,
    /// 过期时间戳
    pub exp: usize,
    /// 签发时间戳
    pub iat: usize,
}

/// 一次签发的 access + refresh 令牌对
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn encoding_key() -> EncodingKey {
        EncodingKey::from_secret(AppConfig::get().jwt.secret.as_ref())
    }

    fn decoding_key() -> DecodingKey {
        DecodingKey::from_secret(AppConfig::get().jwt.secret.as_ref())
    }

    fn issue(
        user_id: i64,
        role: &str,
        token_type: &str,
        ttl: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(&Header::default(), &claims, &Self::encoding_key())
    }

    /// 签发 access token（有效期来自配置，单位分钟）
    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let minutes = AppConfig::get().jwt.access_token_expiry;
        Self::issue(
            user_id,
            role,
            TOKEN_TYPE_ACCESS,
            chrono::Duration::minutes(minutes),
        )
    }

    /// 签发 refresh token；expiry 为 None 时用配置默认值（单位天）
    pub fn generate_refresh_token(
        user_id: i64,
        role: &str,
        expiry: Option<chrono::Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let ttl = expiry.unwrap_or_else(|| {
            chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry)
        });
        Self::issue(user_id, role, TOKEN_TYPE_REFRESH, ttl)
    }

    /// 签发令牌对
    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::generate_refresh_token(user_id, role, refresh_token_expiry)?,
        })
    }

    /// 解码并校验签名与过期时间
    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &Self::decoding_key(), &Validation::default())
            .map(|data| data.claims)
    }

    fn verify_typed(
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::verify_token(token)?;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    /// 校验 access token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_typed(token, TOKEN_TYPE_ACCESS)
    }

    /// 校验 refresh token
    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_typed(token, TOKEN_TYPE_REFRESH)
    }

    /// 用 refresh token 换新的 access token
    pub fn refresh_access_token(
        refresh_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Self::generate_access_token(user_id, &claims.role)
    }

    /// 构造携带 refresh token 的 HttpOnly cookie
    pub fn create_refresh_token_cookie(refresh_token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE_NAME, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::days(
                config.jwt.refresh_token_expiry,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 构造过期 cookie，注销时用于清掉客户端的 refresh token
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE_NAME, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    /// 从请求 cookie 中取出 refresh token
    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
    }
}
