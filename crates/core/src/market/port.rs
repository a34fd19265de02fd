use crate::common::Period;
use crate::market::entity::RawRecord;
use crate::market::error::MarketError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// # Summary
/// 分钟级行情查询参数。
///
/// # Invariants
/// - `field_list` 是数据源识别的逗号分隔字段名（例如 "time,open,high,low,close"）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinuteQuery {
    // 开始日期（含）
    pub start_date: NaiveDate,
    // 结束日期（含）
    pub end_date: NaiveDate,
    // 数据源侧指数标识
    pub exponent_id: u32,
    // 行情周期
    pub period: Period,
    // 请求的字段列表
    pub field_list: String,
}

impl MinuteQuery {
    /// 稳定的缓存键（按参数逐项拼接）
    pub fn cache_key(&self) -> String {
        format!(
            "min:{}:{}:{}:{}:{}",
            self.start_date, self.end_date, self.exponent_id, self.period, self.field_list
        )
    }
}

/// # Summary
/// 日线行情查询参数，支持一次请求多个指数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayQuery {
    // 开始日期（含）
    pub start_date: NaiveDate,
    // 结束日期（含）
    pub end_date: NaiveDate,
    // 数据源侧指数标识列表
    pub exponent_ids: Vec<u32>,
    // 请求的字段列表
    pub field_list: String,
}

impl DayQuery {
    /// 稳定的缓存键（按参数逐项拼接）
    pub fn cache_key(&self) -> String {
        let ids: Vec<String> = self.exponent_ids.iter().map(|id| id.to_string()).collect();
        format!(
            "day:{}:{}:{}:{}",
            self.start_date,
            self.end_date,
            ids.join(","),
            self.field_list
        )
    }
}

/// # Summary
/// 个股快照查询参数（按成交日全量拉取）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotQuery {
    // 成交日期
    pub deal_date: NaiveDate,
    // 请求的字段列表
    pub field_list: String,
    // 可选的代码前缀过滤
    pub start_with: Option<String>,
}

impl SnapshotQuery {
    /// 稳定的缓存键（按参数逐项拼接）
    pub fn cache_key(&self) -> String {
        format!(
            "snap:{}:{}:{}",
            self.deal_date,
            self.field_list,
            self.start_with.as_deref().unwrap_or("")
        )
    }
}

/// # Summary
/// 市场行情数据提供者接口（原始数据源）。
///
/// # Invariants
/// - 实现者在传输/鉴权失败时返回 `MarketError`；调用方必须把任何失败视作
///   "无数据可用" 并降级到合成数据源，绝不把错误传进指标管线。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// # Summary
    /// 获取指定区间内某个指数的分钟级记录。
    ///
    /// # Logic
    /// 1. 校验时间范围合法性。
    /// 2. 构建数据源请求并解析响应。
    ///
    /// # Arguments
    /// * `query`: 分钟级查询参数。
    ///
    /// # Returns
    /// 成功返回原始记录列表，失败返回 `MarketError`。
    async fn fetch_minute_series(&self, query: &MinuteQuery)
    -> Result<Vec<RawRecord>, MarketError>;

    /// # Summary
    /// 获取指定区间内一个或多个指数的日线记录。
    ///
    /// # Arguments
    /// * `query`: 日线查询参数。
    ///
    /// # Returns
    /// 成功返回原始记录列表，失败返回 `MarketError`。
    async fn fetch_day_series(&self, query: &DayQuery) -> Result<Vec<RawRecord>, MarketError>;

    /// # Summary
    /// 获取某个成交日的全市场个股快照。
    ///
    /// # Arguments
    /// * `query`: 快照查询参数。
    ///
    /// # Returns
    /// 成功返回原始记录列表，失败返回 `MarketError`。
    async fn fetch_stock_snapshot(
        &self,
        query: &SnapshotQuery,
    ) -> Result<Vec<RawRecord>, MarketError>;
}
