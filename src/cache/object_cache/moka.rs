//! Moka 进程内缓存后端

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaObjectCache);

pub struct MokaObjectCache {
    inner: Cache<String, String>,
}

impl MokaObjectCache {
    pub fn new() -> Result<Self, String> {
        let cache_config = &AppConfig::get().cache;
        let inner = Cache::builder()
            .max_capacity(cache_config.memory.max_capacity)
            .time_to_live(std::time::Duration::from_secs(cache_config.default_ttl))
            .build();

        debug!(
            "Moka cache ready, max capacity {}",
            cache_config.memory.max_capacity
        );
        Ok(Self { inner })
    }
}

#[async_trait]
impl ObjectCache for MokaObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(value) => CacheResult::Found(value),
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, _ttl: u64) {
        // TTL 在构建缓存时全局设定，逐条的 ttl 参数在该后端不生效
        self.inner.insert(key, value).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
