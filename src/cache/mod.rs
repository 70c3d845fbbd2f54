//! 对象缓存抽象
//!
//! 认证中间件按令牌缓存已认证的档案，避免每个请求都打到数据库。
//! 后端以插件形式注册（moka 内存缓存 / redis），启动时按配置选择，
//! Redis 不可用时回退到内存缓存。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

/// 缓存查询结果
///
/// ExistsButNoValue 表示后端暂时不可用（连接失败等），
/// 调用方应当回源而不是当作未命中缓存处理。
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// ttl 为 0 时使用后端的默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}

/// 注册一个对象缓存插件
///
/// 在模块里声明一次，ctor 会在 main 之前把构造器注册进全局注册表。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $cache_type:ty) => {
        ::paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $cache_type:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = <$cache_type>::new()
                                .map_err($crate::errors::VocademyError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
