//! 缓存层
//!
//! 认证中间件用它缓存 token -> 用户 的映射，减少每次请求的数据库往返。
//! 后端通过注册表插件化，当前内置 Moka 内存实现。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

/// 缓存查询结果
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

/// 对象缓存后端接口
#[async_trait]
pub trait ObjectCache: Send + Sync {
    /// 读取原始字符串值
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// 写入原始字符串值，ttl 单位为秒
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    /// 删除键
    async fn remove(&self, key: &str);
    /// 清空缓存
    async fn invalidate_all(&self);
}

/// 声明并注册一个缓存插件
///
/// 注册发生在进程启动时（ctor），构造则推迟到运行时按配置进行。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $constructor:ty) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $constructor:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(
                        || -> $crate::cache::register::BoxedObjectCacheFuture {
                            Box::pin(async {
                                let cache = <$constructor>::new().map_err(|e| {
                                    $crate::errors::CourseHubError::cache_connection(e)
                                })?;
                                Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                            })
                        },
                    ),
                );
            }
        }
    };
}
