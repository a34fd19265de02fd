use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use kanpan_core::cache::error::CacheError;
use kanpan_core::cache::port::Cache;
use std::time::Duration;

/// # Summary
/// 基于 DashMap 的限时内存缓存实现。
///
/// # Invariants
/// - 所有操作均通过并发哈希表 `DashMap` 执行，保证多线程安全。
/// - 每个条目存储 (字节, 到期时刻)；到期条目在读取时淘汰，无后台清扫。
pub struct MemCache {
    // 线程安全的 KV 存储容器：值与绝对到期时刻成对存放
    storage: DashMap<String, (Vec<u8>, DateTime<Utc>)>,
}

impl MemCache {
    /// # Summary
    /// 创建一个新的 MemCache 实例。
    ///
    /// # Logic
    /// 初始化底层的 DashMap 存储引擎。
    ///
    /// # Returns
    /// * `Self` - 初始化的缓存实例。
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }
}

impl Default for MemCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for MemCache {
    /// # Summary
    /// 写入原始字节数据并设定存活时长。
    ///
    /// # Logic
    /// 以当前时刻加 TTL 计算绝对到期时刻，与字节一并插入哈希表。
    /// 同名 Key 覆盖。TTL 超出 chrono 表示范围时饱和为"永不过期"。
    ///
    /// # Arguments
    /// * `key`: 唯一索引。
    /// * `value`: 待存入的字节序列。
    /// * `ttl`: 存活时长。
    ///
    /// # Returns
    /// * `Result<(), CacheError>` - 始终返回 Ok，除非内存分配失败。
    async fn set_raw(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        let expiry = Utc::now().checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.storage.insert(key.to_string(), (value, expiry));
        Ok(())
    }

    /// # Summary
    /// 获取原始字节数据。
    ///
    /// # Logic
    /// 从哈希表中检索 Key；条目已到期则原子移除并按不存在处理，
    /// 否则克隆为独立所有权对象返回。
    ///
    /// # Arguments
    /// * `key`: 唯一索引。
    ///
    /// # Returns
    /// * `Result<Option<Vec<u8>>, CacheError>` - 存在且未到期返回数据，否则 None。
    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let now = Utc::now();
        let expired = match self.storage.get(key) {
            Some(entry) => {
                let (bytes, expiry) = entry.value();
                if *expiry > now {
                    return Ok(Some(bytes.clone()));
                }
                true
            }
            None => false,
        };
        if expired {
            self.storage.remove(key);
        }
        Ok(None)
    }

    /// # Summary
    /// 删除指定键。
    ///
    /// # Logic
    /// 从哈希表中执行原子移除操作。
    ///
    /// # Arguments
    /// * `key`: 待删除的唯一索引。
    ///
    /// # Returns
    /// * `Result<(), CacheError>` - 无论键是否存在均返回 Ok。
    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.storage.remove(key);
        Ok(())
    }
}
