use async_trait::async_trait;
use kanpan_core::market::entity::RawRecord;
use kanpan_core::market::error::MarketError;
use kanpan_core::market::port::{DayQuery, MarketDataProvider, MinuteQuery, SnapshotQuery};
use kanpan_synth::provider::SynthProvider;
use std::sync::Arc;
use tracing::warn;

/// # Summary
/// 断流降级装饰器：内层提供者失败或返回空时改用合成数据源应答。
///
/// # Invariants
/// - 对调用方永不返回错误：任何上游故障都被吸收为合成数据。
/// - 降级动作必须留下 `warn` 级日志（用户可见的非致命提示由渲染层做）。
pub struct FallbackProvider {
    // 内层真实提供者
    inner: Arc<dyn MarketDataProvider>,
    // 合成降级来源
    synth: SynthProvider,
}

impl FallbackProvider {
    /// 包装一个内层提供者
    pub fn new(inner: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            inner,
            synth: SynthProvider::new(),
        }
    }
}

#[async_trait]
impl MarketDataProvider for FallbackProvider {
    /// # Summary
    /// 分钟级行情：失败或为空时降级合成。
    ///
    /// # Arguments
    /// * `query`: 分钟级查询参数。
    ///
    /// # Returns
    /// 永远是 Ok；降级时为合成记录。
    async fn fetch_minute_series(
        &self,
        query: &MinuteQuery,
    ) -> Result<Vec<RawRecord>, MarketError> {
        match self.inner.fetch_minute_series(query).await {
            Ok(records) if !records.is_empty() => Ok(records),
            Ok(_) => {
                warn!(key = %query.cache_key(), "分钟级行情为空，降级合成数据");
                self.synth.fetch_minute_series(query).await
            }
            Err(err) => {
                warn!(key = %query.cache_key(), error = %err, "分钟级行情获取失败，降级合成数据");
                self.synth.fetch_minute_series(query).await
            }
        }
    }

    /// # Summary
    /// 日线行情：失败或为空时降级合成。
    ///
    /// # Arguments
    /// * `query`: 日线查询参数。
    ///
    /// # Returns
    /// 永远是 Ok；降级时为合成记录。
    async fn fetch_day_series(&self, query: &DayQuery) -> Result<Vec<RawRecord>, MarketError> {
        match self.inner.fetch_day_series(query).await {
            Ok(records) if !records.is_empty() => Ok(records),
            Ok(_) => {
                warn!(key = %query.cache_key(), "日线行情为空，降级合成数据");
                self.synth.fetch_day_series(query).await
            }
            Err(err) => {
                warn!(key = %query.cache_key(), error = %err, "日线行情获取失败，降级合成数据");
                self.synth.fetch_day_series(query).await
            }
        }
    }

    /// # Summary
    /// 个股快照：失败或为空时降级合成。
    ///
    /// # Arguments
    /// * `query`: 快照查询参数。
    ///
    /// # Returns
    /// 永远是 Ok；降级时为合成记录。
    async fn fetch_stock_snapshot(
        &self,
        query: &SnapshotQuery,
    ) -> Result<Vec<RawRecord>, MarketError> {
        match self.inner.fetch_stock_snapshot(query).await {
            Ok(records) if !records.is_empty() => Ok(records),
            Ok(_) => {
                warn!(key = %query.cache_key(), "个股快照为空，降级合成数据");
                self.synth.fetch_stock_snapshot(query).await
            }
            Err(err) => {
                warn!(key = %query.cache_key(), error = %err, "个股快照获取失败，降级合成数据");
                self.synth.fetch_stock_snapshot(query).await
            }
        }
    }
}
