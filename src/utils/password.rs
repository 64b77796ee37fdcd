//! 密码哈希（argon2id，参数来自配置）

use crate::config::AppConfig;
use crate::errors::CourseHubError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

fn hasher() -> Result<Argon2<'static>, CourseHubError> {
    let cfg = &AppConfig::get().argon2;
    let params = Params::new(cfg.memory_cost, cfg.time_cost, cfg.parallelism, None)
        .map_err(|e| CourseHubError::validation(format!("Argon2 参数错误: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 生成密码哈希（PHC 字符串格式）
pub fn hash_password(password: &str) -> Result<String, CourseHubError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CourseHubError::validation(format!("密码哈希失败: {e}")))
}

/// 校验密码；哈希串本身损坏时按不匹配处理
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}
