use crate::extract::{CLOSE_KEYS, HIGH_KEYS, LOW_KEYS, OPEN_KEYS, VOLUME_KEYS, first_number};
use crate::parse::minute_axis_value;
use chrono::NaiveDate;
use kanpan_core::common::time;
use kanpan_core::market::entity::{Candle, RawRecord, ShapedCandles};
use tracing::debug;

/// 成交量缺失时的价差代理系数：`|close[i] - close[i-1]| * SCALE`。
/// 代理量只是活跃度的替身，不是测量值，系数只需稳定且有量级感。
pub const VOLUME_PROXY_SCALE: f64 = 1000.0;

/// # Summary
/// 把原始 OHLCV 记录整形为列式对齐的蜡烛图数组。
///
/// # Logic
/// 1. 四价按候选键提取；缺开盘 → 用昨收补，缺收盘 → 用开盘或昨收补，
///    仍缺收盘的记录整条丢弃。
/// 2. 最高/最低缺失时取现有四价的最值，并防御性钳制到覆盖开收盘。
/// 3. 成交量：有值则在 0 处钳底；无值则按价差代理合成（无昨收时为 0），
///    输出永不缺失，合成点计数返回给调用方做"模拟量"提示。
/// 4. X 轴标签沿用分钟序列的归一化与回填路径。
///
/// # Arguments
/// * `records`: 原始记录列表。
/// * `anchor`: 回填缺失时间戳的锚点日期。
/// * `period_minutes`: 周期步长（分钟），决定回填网格。
///
/// # Returns
/// 等长的 OHLCV 数组束。
pub fn shape_candles(
    records: &[RawRecord],
    anchor: Option<NaiveDate>,
    period_minutes: Option<u32>,
) -> ShapedCandles {
    let grid = match (anchor, period_minutes) {
        (Some(_), Some(step)) => {
            let grid = time::trading_minutes_of_day(step);
            if grid.is_empty() { None } else { Some(grid) }
        }
        _ => None,
    };

    let mut shaped = ShapedCandles::default();
    let mut prev_close: Option<f64> = None;
    for (idx, record) in records.iter().enumerate() {
        let mut candle = Candle {
            open: first_number(record, OPEN_KEYS),
            close: first_number(record, CLOSE_KEYS),
            low: first_number(record, LOW_KEYS),
            high: first_number(record, HIGH_KEYS),
        };
        if candle.open.is_none() {
            candle.open = prev_close;
        }
        if candle.close.is_none() {
            candle.close = candle.open.or(prev_close);
        }
        let Some(close) = candle.close else {
            continue;
        };
        let open = candle.open.unwrap_or(close);
        candle.open = Some(open);
        let candle = candle.normalized();

        let (volume, synthetic) = match first_number(record, VOLUME_KEYS) {
            Some(v) => (v.max(0.0), false),
            None => match prev_close {
                Some(base) => ((close - base).abs() * VOLUME_PROXY_SCALE, true),
                None => (0.0, true),
            },
        };

        shaped
            .x
            .push(minute_axis_value(record, idx, anchor, grid.as_deref()));
        shaped.open.push(open);
        shaped.close.push(close);
        shaped.low.push(candle.low.unwrap_or(close));
        shaped.high.push(candle.high.unwrap_or(close));
        shaped.volume.push(volume);
        if synthetic {
            shaped.synthetic_volume += 1;
        }
        prev_close = Some(close);
    }

    if shaped.synthetic_volume > 0 {
        debug!(
            total = shaped.len(),
            synthetic = shaped.synthetic_volume,
            "成交量缺失，部分点由价差代理合成"
        );
    }
    shaped
}
