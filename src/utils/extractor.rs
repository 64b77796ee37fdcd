//! 路径参数安全提取器
//!
//! 在进入业务层之前完成路径参数的格式校验，非法参数统一返回 400。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_course_code;

static FILE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{1,64}$").expect("Invalid file token regex"));

fn bad_request(message: &str) -> Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
        ErrorCode::BadRequest,
        message,
    ));
    InternalError::from_response(message.to_string(), response).into()
}

/// 路径中的数字 ID（{id}）
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(SafeIDI64)
            .ok_or_else(|| bad_request("Invalid id in path"));
        ready(result)
    }
}

/// 路径中的课程代码（{course_code}），统一转为大写
pub struct SafeCourseCode(pub String);

impl FromRequest for SafeCourseCode {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("course_code") {
            Some(raw) if validate_course_code(raw).is_ok() => {
                Ok(SafeCourseCode(raw.to_uppercase()))
            }
            _ => Err(bad_request("Invalid course code in path")),
        };
        ready(result)
    }
}

/// 路径中的文件 token（{file_token}）
pub struct SafeFileToken(pub String);

impl FromRequest for SafeFileToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("file_token") {
            Some(raw) if FILE_TOKEN_RE.is_match(raw) => Ok(SafeFileToken(raw.to_string())),
            _ => Err(bad_request("Invalid file token in path")),
        };
        ready(result)
    }
}
