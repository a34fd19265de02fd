use async_trait::async_trait;
use kanpan_core::cache::port::{Cache, CacheExt};
use kanpan_core::market::entity::RawRecord;
use kanpan_core::market::error::MarketError;
use kanpan_core::market::port::{DayQuery, MarketDataProvider, MinuteQuery, SnapshotQuery};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// 分钟级行情的记忆化窗口
pub const MINUTE_TTL: Duration = Duration::from_secs(60);
/// 日线行情的记忆化窗口
pub const DAY_TTL: Duration = Duration::from_secs(300);
/// 个股快照的记忆化窗口
pub const SNAPSHOT_TTL: Duration = Duration::from_secs(900);

/// # Summary
/// 限时记忆化装饰器：按查询键缓存原始应答，按接口粒度设定 TTL。
///
/// # Invariants
/// - 缓存故障绝不致命：读写失败都记日志后直连内层提供者。
/// - 核心管线保持缓存无关，此装饰器是缓存能力的唯一消费方。
pub struct CachedProvider {
    // 内层提供者
    inner: Arc<dyn MarketDataProvider>,
    // 注入的缓存能力
    cache: Arc<dyn Cache>,
}

impl CachedProvider {
    /// 包装一个内层提供者并注入缓存能力
    pub fn new(inner: Arc<dyn MarketDataProvider>, cache: Arc<dyn Cache>) -> Self {
        Self { inner, cache }
    }

    /// # Summary
    /// 读缓存；任何缓存故障都按未命中处理。
    async fn read(&self, key: &str) -> Option<Vec<RawRecord>> {
        match self.cache.get::<Vec<RawRecord>>(key).await {
            Ok(hit) => hit,
            Err(err) => {
                warn!(key, error = %err, "缓存读取失败，按未命中处理");
                None
            }
        }
    }

    /// # Summary
    /// 写缓存；失败只记日志。
    async fn write(&self, key: &str, records: &Vec<RawRecord>, ttl: Duration) {
        if let Err(err) = self.cache.set(key, records, ttl).await {
            warn!(key, error = %err, "缓存写入失败");
        }
    }
}

#[async_trait]
impl MarketDataProvider for CachedProvider {
    /// # Summary
    /// 分钟级行情：60 秒记忆化。
    ///
    /// # Logic
    /// 1. 按查询键查缓存，命中直接返回。
    /// 2. 未命中时直连内层，成功后写回缓存。
    ///
    /// # Arguments
    /// * `query`: 分钟级查询参数。
    ///
    /// # Returns
    /// 记录列表或内层错误。
    async fn fetch_minute_series(
        &self,
        query: &MinuteQuery,
    ) -> Result<Vec<RawRecord>, MarketError> {
        let key = query.cache_key();
        if let Some(records) = self.read(&key).await {
            debug!(key, "分钟级行情缓存命中");
            return Ok(records);
        }
        let records = self.inner.fetch_minute_series(query).await?;
        self.write(&key, &records, MINUTE_TTL).await;
        Ok(records)
    }

    /// # Summary
    /// 日线行情：300 秒记忆化。
    ///
    /// # Arguments
    /// * `query`: 日线查询参数。
    ///
    /// # Returns
    /// 记录列表或内层错误。
    async fn fetch_day_series(&self, query: &DayQuery) -> Result<Vec<RawRecord>, MarketError> {
        let key = query.cache_key();
        if let Some(records) = self.read(&key).await {
            debug!(key, "日线行情缓存命中");
            return Ok(records);
        }
        let records = self.inner.fetch_day_series(query).await?;
        self.write(&key, &records, DAY_TTL).await;
        Ok(records)
    }

    /// # Summary
    /// 个股快照：900 秒记忆化。
    ///
    /// # Arguments
    /// * `query`: 快照查询参数。
    ///
    /// # Returns
    /// 记录列表或内层错误。
    async fn fetch_stock_snapshot(
        &self,
        query: &SnapshotQuery,
    ) -> Result<Vec<RawRecord>, MarketError> {
        let key = query.cache_key();
        if let Some(records) = self.read(&key).await {
            debug!(key, "个股快照缓存命中");
            return Ok(records);
        }
        let records = self.inner.fetch_stock_snapshot(query).await?;
        self.write(&key, &records, SNAPSHOT_TTL).await;
        Ok(records)
    }
}
