use crate::records::{day_records, minute_records, snapshot_records};
use async_trait::async_trait;
use kanpan_core::market::entity::RawRecord;
use kanpan_core::market::error::MarketError;
use kanpan_core::market::port::{DayQuery, MarketDataProvider, MinuteQuery, SnapshotQuery};
use tracing::debug;

/// 合成行情的基准点位与波动幅度
const SYNTH_BASE: f64 = 3000.0;
const SYNTH_FLUCTUATION: f64 = 25.0;

/// # Summary
/// 全合成的行情提供者：断流降级的统一数据源。
///
/// # Invariants
/// - 相同查询参数必然产出逐位相同的记录（种子由查询键派生）。
/// - 永不返回错误。
#[derive(Debug, Clone, Default)]
pub struct SynthProvider;

impl SynthProvider {
    /// 创建一个新的 SynthProvider 实例
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MarketDataProvider for SynthProvider {
    /// # Summary
    /// 合成分钟级记录。
    ///
    /// # Logic
    /// 1. 以查询键为种子，保证同参数幂等。
    /// 2. 沿交易分钟网格铺满日期区间。
    ///
    /// # Arguments
    /// * `query`: 分钟级查询参数。
    ///
    /// # Returns
    /// 合成记录列表，永不失败。
    async fn fetch_minute_series(
        &self,
        query: &MinuteQuery,
    ) -> Result<Vec<RawRecord>, MarketError> {
        debug!(key = %query.cache_key(), "合成分钟级行情");
        Ok(minute_records(
            query.start_date,
            query.end_date,
            query.period,
            SYNTH_BASE,
            SYNTH_FLUCTUATION,
            &query.cache_key(),
        ))
    }

    /// # Summary
    /// 合成日线记录（多个指数依次拼接，各自独立播种）。
    ///
    /// # Arguments
    /// * `query`: 日线查询参数。
    ///
    /// # Returns
    /// 合成记录列表，永不失败。
    async fn fetch_day_series(&self, query: &DayQuery) -> Result<Vec<RawRecord>, MarketError> {
        debug!(key = %query.cache_key(), "合成日线行情");
        let mut records = Vec::new();
        for exponent_id in &query.exponent_ids {
            records.extend(day_records(
                query.start_date,
                query.end_date,
                *exponent_id,
                SYNTH_BASE,
                SYNTH_FLUCTUATION,
                &format!("{}|{}", query.cache_key(), exponent_id),
            ));
        }
        Ok(records)
    }

    /// # Summary
    /// 合成个股快照记录。
    ///
    /// # Arguments
    /// * `query`: 快照查询参数。
    ///
    /// # Returns
    /// 合成记录列表，永不失败。
    async fn fetch_stock_snapshot(
        &self,
        query: &SnapshotQuery,
    ) -> Result<Vec<RawRecord>, MarketError> {
        debug!(key = %query.cache_key(), "合成个股快照");
        Ok(snapshot_records(query.deal_date, &query.cache_key()))
    }
}
