use crate::breadth::{self, DistributionPanel};
use crate::signal::{self, DivergencePanel, DivergenceToggles};
use crate::style::{self, LARGE_CAP_EXPONENT, SMALL_CAP_EXPONENT, SizeStylePanel};
use chrono::{Days, NaiveDate};
use kanpan_core::common::{Period, find_index};
use kanpan_core::config::QueryConfig;
use kanpan_core::market::entity::{AxisValue, RawRecord, TimeSeries};
use kanpan_core::market::port::{DayQuery, MarketDataProvider, MinuteQuery, SnapshotQuery};
use kanpan_indicator::divergence::DivergenceParams;
use kanpan_series::candle::shape_candles;
use kanpan_series::parse::{is_blank, parse_day_series, parse_minute_series};
use kanpan_synth::records::{minute_records, snapshot_records};
use kanpan_synth::series::{WalkSpec, period_series, random_walk_series};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// 日线卡片请求的字段
const DAY_FIELDS: &str = "open,high,low,close";
/// 分钟卡片请求的字段
const MINUTE_FIELDS: &str = "time,open,high,low,close";
/// 风格面板只要收盘价
const CLOSE_FIELDS: &str = "time,close";
/// 快照面板请求的字段
const SNAPSHOT_FIELDS: &str = "code,pctChg,close,preClose";

/// 日线取值的收盘价优先链与开盘价备选链
const DAY_CLOSE_CHAIN: &[&str] = &["close", "closePrice", "close_price", "price"];
const DAY_OPEN_CHAIN: &[&str] = &["open", "openPrice", "open_price"];
/// 风格面板的收盘价链
const STYLE_CLOSE_CHAIN: &[&str] = &["close", "closePrice", "price"];

/// # Summary
/// 单指数趋势面板数据。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPanel {
    // 面板标题（指数名）
    pub title: String,
    // X 轴标签
    pub x: Vec<AxisValue>,
    // 数值序列
    pub y: Vec<Option<f64>>,
    // 是否为合成数据（断流降级）
    pub synthetic: bool,
}

/// # Summary
/// 面板级监控服务：渲染层消费的唯一门面。
///
/// # Invariants
/// - 所有面板操作不可失败：上游故障一律内部降级为合成数据。
/// - 服务自身无跨请求状态；记忆化由注入的提供者装饰器承担。
pub struct MonitorService {
    // 行情数据提供者（通常已被降级/缓存装饰器包裹）
    provider: Arc<dyn MarketDataProvider>,
}

impl MonitorService {
    /// 注入行情提供者
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// # Summary
    /// 指数分时/日线趋势面板。
    ///
    /// # Logic
    /// 1. 指数名查目录；日线走日线接口并按收盘价链取值（全缺时退到开盘价链），
    ///    分钟走分钟接口。
    /// 2. 目录未命中、拉取失败或解析为空 → 按种子合成周期序列。
    ///
    /// # Arguments
    /// * `config`: 请求配置。
    ///
    /// # Returns
    /// 面板数据。
    pub async fn index_trend_panel(&self, config: &QueryConfig) -> TrendPanel {
        let series = self.fetch_index_series(config).await;
        match series {
            Some(series) if !is_blank(&series) => {
                info!(index = %config.index, points = series.len(), "趋势面板就绪");
                TrendPanel {
                    title: config.index.clone(),
                    x: series.x,
                    y: series.y,
                    synthetic: false,
                }
            }
            _ => {
                warn!(index = %config.index, "趋势数据不可用，使用合成序列");
                let seed = format!(
                    "{}|{}|{}|{}",
                    config.index, config.period, config.start_date, config.end_date
                );
                let series =
                    period_series(config.period, config.start_date, 3000.0, 50.0, &seed);
                TrendPanel {
                    title: config.index.clone(),
                    x: series.x,
                    y: series.y,
                    synthetic: true,
                }
            }
        }
    }

    /// 拉取并解析单个指数的序列；任何一步失败返回 None
    async fn fetch_index_series(&self, config: &QueryConfig) -> Option<TimeSeries> {
        let index = find_index(&config.index)?;
        if config.period == Period::Day1 {
            let query = DayQuery {
                start_date: config.start_date,
                end_date: config.end_date,
                exponent_ids: vec![index.exponent_id],
                field_list: DAY_FIELDS.to_string(),
            };
            let records = self.provider.fetch_day_series(&query).await.ok()?;
            let series = parse_day_series(&records, DAY_CLOSE_CHAIN, Some(config.start_date));
            if is_blank(&series) {
                // 收盘价链全缺：退到开盘价链
                let series =
                    parse_day_series(&records, DAY_OPEN_CHAIN, Some(config.start_date));
                return Some(series);
            }
            Some(series)
        } else {
            let query = MinuteQuery {
                start_date: config.start_date,
                end_date: config.end_date,
                exponent_id: index.exponent_id,
                period: config.period,
                field_list: MINUTE_FIELDS.to_string(),
            };
            let records = self.provider.fetch_minute_series(&query).await.ok()?;
            Some(parse_minute_series(
                &records,
                Some(config.start_date),
                config.period.minutes(),
            ))
        }
    }

    /// # Summary
    /// 大小盘风格强度面板。
    ///
    /// # Logic
    /// 1. 从 `start - 7 天` 预取（滚动窗口需要热身数据）。
    /// 2. 沪深300（大盘）与中证1000（小盘）各取一条收盘序列；
    ///    拉取失败时以各自的基准点位合成。
    /// 3. 交给风格管线：对齐 → 步进收益 → 差值 → 滚动求和 → 阈值判定。
    ///
    /// # Arguments
    /// * `config`: 请求配置。
    ///
    /// # Returns
    /// 面板数据。
    pub async fn size_style_panel(&self, config: &QueryConfig) -> SizeStylePanel {
        let prefetch = config
            .start_date
            .checked_sub_days(Days::new(7))
            .unwrap_or(config.start_date);

        let large = self
            .fetch_style_series(config, prefetch, LARGE_CAP_EXPONENT, 4200.0, 20.0)
            .await;
        let small = self
            .fetch_style_series(config, prefetch, SMALL_CAP_EXPONENT, 6200.0, 25.0)
            .await;

        style::size_style_trend(
            &large,
            &small,
            config.period,
            prefetch,
            config.start_date,
            config.end_date,
        )
    }

    /// 拉取风格面板的一条收盘序列；失败时按基准点位合成
    async fn fetch_style_series(
        &self,
        config: &QueryConfig,
        prefetch: NaiveDate,
        exponent_id: u32,
        base: f64,
        fluctuation: f64,
    ) -> TimeSeries {
        let fetched = if config.period == Period::Day1 {
            let query = DayQuery {
                start_date: prefetch,
                end_date: config.end_date,
                exponent_ids: vec![exponent_id],
                field_list: "close".to_string(),
            };
            self.provider
                .fetch_day_series(&query)
                .await
                .map(|records| parse_day_series(&records, STYLE_CLOSE_CHAIN, Some(prefetch)))
        } else {
            let query = MinuteQuery {
                start_date: prefetch,
                end_date: config.end_date,
                exponent_id,
                period: config.period,
                field_list: CLOSE_FIELDS.to_string(),
            };
            self.provider
                .fetch_minute_series(&query)
                .await
                .map(|records| {
                    parse_minute_series(&records, Some(prefetch), config.period.minutes())
                })
        };

        match fetched {
            Ok(series) if !is_blank(&series) => return series,
            Ok(_) => warn!(exponent_id, "风格序列为空，使用合成序列"),
            Err(err) => warn!(exponent_id, error = %err, "风格序列获取失败，使用合成序列"),
        }

        // 日线降级沿用小时级网格，其余沿用请求周期
        let synth_period = if config.period == Period::Day1 {
            Period::Minute60
        } else {
            config.period
        };
        let seed = format!("style|{}|{}", exponent_id, config.start_date);
        period_series(synth_period, config.start_date, base, fluctuation, &seed)
    }

    /// # Summary
    /// 背离信号面板。
    ///
    /// # Logic
    /// 1. 拉取所选指数的分钟级 OHLCV；失败时合成同参数记录。
    /// 2. 整形为蜡烛数组后跑三族指标的枢轴/背离扫描。
    ///
    /// # Arguments
    /// * `config`: 请求配置。
    /// * `toggles`: 指标族开关。
    ///
    /// # Returns
    /// 面板数据。
    pub async fn divergence_panel(
        &self,
        config: &QueryConfig,
        toggles: DivergenceToggles,
    ) -> DivergencePanel {
        let records = match find_index(&config.index) {
            Some(index) => {
                let query = MinuteQuery {
                    start_date: config.start_date,
                    end_date: config.end_date,
                    exponent_id: index.exponent_id,
                    period: config.period,
                    field_list: MINUTE_FIELDS.to_string(),
                };
                match self.provider.fetch_minute_series(&query).await {
                    Ok(records) if !records.is_empty() => records,
                    Ok(_) => {
                        warn!(index = %config.index, "背离面板数据为空，合成记录");
                        self.synthetic_minute_records(config)
                    }
                    Err(err) => {
                        warn!(index = %config.index, error = %err, "背离面板拉取失败，合成记录");
                        self.synthetic_minute_records(config)
                    }
                }
            }
            None => {
                warn!(index = %config.index, "指数目录未命中，合成记录");
                self.synthetic_minute_records(config)
            }
        };

        let shaped = shape_candles(&records, Some(config.start_date), config.period.minutes());
        let panel = signal::divergence_panel(&shaped, toggles, DivergenceParams::default());
        info!(
            index = %config.index,
            points = panel.price.len(),
            signals = panel.signals.len(),
            "背离面板就绪"
        );
        panel
    }

    /// 背离面板的合成记录（3100 ± 25 的游走基准）
    fn synthetic_minute_records(&self, config: &QueryConfig) -> Vec<RawRecord> {
        let seed = format!("divergence|{}|{}", config.index, config.period);
        minute_records(
            config.start_date,
            config.end_date,
            config.period,
            3100.0,
            25.0,
            &seed,
        )
    }

    /// # Summary
    /// 个股涨跌分布面板。
    ///
    /// # Logic
    /// 1. 按区间末日拉全市场快照；失败时合成快照。
    /// 2. 逐股归入 13 个涨跌幅分组并统计涨跌停占比。
    ///
    /// # Arguments
    /// * `config`: 请求配置。
    ///
    /// # Returns
    /// 面板数据。
    pub async fn distribution_panel(&self, config: &QueryConfig) -> DistributionPanel {
        let query = SnapshotQuery {
            deal_date: config.end_date,
            field_list: SNAPSHOT_FIELDS.to_string(),
            start_with: None,
        };
        let records = match self.provider.fetch_stock_snapshot(&query).await {
            Ok(records) if !records.is_empty() => records,
            Ok(_) => {
                warn!(deal_date = %config.end_date, "快照为空，合成快照");
                snapshot_records(config.end_date, &format!("distribution|{}", config.end_date))
            }
            Err(err) => {
                warn!(deal_date = %config.end_date, error = %err, "快照拉取失败，合成快照");
                snapshot_records(config.end_date, &format!("distribution|{}", config.end_date))
            }
        };
        breadth::distribution(&records)
    }

    /// # Summary
    /// 占位面板：尚未接入真实数据的卡片用标题播种的随机游走填充。
    ///
    /// # Arguments
    /// * `title`: 卡片标题（兼种子文本）。
    ///
    /// # Returns
    /// 合成趋势面板。
    pub fn placeholder_panel(&self, title: &str) -> TrendPanel {
        let series = random_walk_series(&WalkSpec {
            seed_text: title.to_string(),
            ..WalkSpec::default()
        });
        TrendPanel {
            title: title.to_string(),
            x: series.x,
            y: series.y,
            synthetic: true,
        }
    }
}
