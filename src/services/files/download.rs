use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::path::Path;

use super::FileService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

/// 按 token 下载文件，响应携带登记时的原始文件名
pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    file_token: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let db_file = match storage.get_file_by_token(&file_token).await {
        Ok(Some(f)) => f,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询文件失败: {e}"),
                )),
            );
        }
    };

    let file_path = format!("{}/{}.bin", AppConfig::get().upload.dir, db_file.token);

    // 数据库有记录但磁盘文件丢了，按 404 处理并留日志
    if !Path::new(&file_path).exists() {
        tracing::error!("File record {} exists but blob is missing on disk", db_file.token);
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "文件不存在",
        )));
    }

    let buf = match std::fs::read(&file_path) {
        Ok(buf) => buf,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", file_path, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            );
        }
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", db_file.file_name),
        ))
        .body(buf))
}
