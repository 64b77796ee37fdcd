use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use super::FileService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::ErrorCode;
use crate::models::{ApiResponse, files::responses::FileUploadResponse};
use crate::utils::validate_magic_bytes;

/// 写盘过程中拒绝请求的原因
enum FieldRejection {
    TypeMismatch,
    TooLarge,
    Io(String),
}

/// 把 multipart 字段流式写到磁盘，边写边做魔术字节与大小检查。
/// 失败时清掉半成品文件。
async fn save_field(
    field: &mut actix_multipart::Field,
    file_path: &str,
    extension: &str,
    max_size: usize,
) -> Result<i64, FieldRejection> {
    let mut f = std::fs::File::create(file_path).map_err(|e| FieldRejection::Io(e.to_string()))?;
    let mut total_size: usize = 0;
    let mut first_chunk = true;

    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| {
            let _ = std::fs::remove_file(file_path);
            FieldRejection::Io(e.to_string())
        })?;

        // 第一个数据块校验文件头
        if first_chunk {
            first_chunk = false;
            if !validate_magic_bytes(&data, extension) {
                let _ = std::fs::remove_file(file_path);
                return Err(FieldRejection::TypeMismatch);
            }
        }

        total_size += data.len();
        if total_size > max_size {
            let _ = std::fs::remove_file(file_path);
            return Err(FieldRejection::TooLarge);
        }

        f.write_all(&data).map_err(|e| {
            let _ = std::fs::remove_file(file_path);
            FieldRejection::Io(e.to_string())
        })?;
    }

    Ok(total_size as i64)
}

pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;

    let user_id = match RequireJWT::extract_user_id(req) {
        Some(id) => id,
        None => {
            return Ok(
                HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                    ErrorCode::Unauthorized,
                    "用户未登录",
                )),
            );
        }
    };

    if !Path::new(upload_dir).exists()
        && let Err(e) = std::fs::create_dir_all(upload_dir)
    {
        tracing::error!("Failed to create upload dir {}: {}", upload_dir, e);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "创建上传目录失败",
            )),
        );
    }

    let mut uploaded: Option<(String, String, String, i64)> = None; // (token, 原名, MIME, 大小)

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }

        // 一次只收一个文件
        if uploaded.is_some() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        // 扩展名白名单
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        if !config
            .upload
            .allowed_types
            .iter()
            .any(|t| t.to_lowercase() == extension)
        {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                "File type not allowed",
            )));
        }

        // MIME 类型仅作记录，不参与校验
        let file_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_default();

        let token = Uuid::new_v4().to_string();
        let file_path = format!("{upload_dir}/{token}.bin");

        match save_field(&mut field, &file_path, &extension, config.upload.max_size).await {
            Ok(size) => uploaded = Some((token, original_name, file_type, size)),
            Err(FieldRejection::TypeMismatch) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "文件内容与扩展名不匹配",
                )));
            }
            Err(FieldRejection::TooLarge) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                )));
            }
            Err(FieldRejection::Io(e)) => {
                tracing::error!("Upload write failed: {}", e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件写入失败"),
                ));
            }
        }
    }

    let Some((token, original_name, file_type, file_size)) = uploaded else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    };

    let storage = service.get_storage(req);

    match storage
        .create_file(&token, &original_name, file_size, &file_type, user_id)
        .await
    {
        Ok(file) => {
            let response = FileUploadResponse {
                token: file.token,
                file_name: file.file_name,
                size: file.file_size,
                content_type: file.file_type,
                uploaded_at: file.uploaded_at,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "File uploaded successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("Failed to upload file: {e}"),
            )),
        ),
    }
}
