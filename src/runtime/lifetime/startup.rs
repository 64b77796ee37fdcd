//! 服务启动预处理：存储初始化、管理员播种、缓存创建

use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 按配置创建缓存后端，未知后端回退到 moka
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let cache_type = &AppConfig::get().cache.cache_type;

    if let Some(constructor) = get_object_cache_plugin(cache_type) {
        match constructor().await {
            Ok(cache) => {
                info!("Cache backend '{}' created", cache_type);
                return Ok(Arc::from(cache));
            }
            Err(e) => warn!("Failed to create '{}' cache: {}", cache_type, e),
        }
    } else {
        warn!("Cache backend '{}' not found in registry", cache_type);
    }

    // 回退路径
    if cache_type != "moka"
        && let Some(fallback) = get_object_cache_plugin("moka")
        && let Ok(cache) = fallback().await
    {
        warn!("Falling back to in-memory moka cache");
        return Ok(Arc::from(cache));
    }

    Err(format!("No cache backend available (tried: {cache_type})").into())
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 空库时播种默认管理员
///
/// 管理员账号不走审批流程，创建即 allowed。密码优先取
/// ADMIN_PASSWORD 环境变量，否则随机生成并打印到日志。
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(0) => info!("Empty user table, seeding default admin account..."),
        Ok(count) => {
            debug!("{} user(s) present, skipping admin seed", count);
            return;
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin_request = CreateUserRequest {
        username: "admin".to_string(),
        email: "admin@localhost".to_string(),
        password: password_hash,
        role: UserRole::Admin,
        display_name: Some("Administrator".to_string()),
    };

    match storage.create_user(admin_request).await {
        Ok(user) => info!(
            "Default admin account created (ID: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    info!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await.expect("Failed to create cache");

    StartupContext { storage, cache }
}
