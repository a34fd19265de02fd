use crate::extract::{
    DAY_X_KEYS, MINUTE_X_KEYS, MINUTE_Y_KEYS, TRADE_DATE_KEYS, first_number, first_value,
    value_text,
};
use chrono::NaiveDate;
use kanpan_core::common::time;
use kanpan_core::market::entity::{AxisValue, RawRecord, TimeSeries};

/// # Summary
/// 解析日线记录列表为时间序列。
///
/// # Logic
/// 1. 时间字段按 `DAY_X_KEYS` 优先级提取，保留原始文本（展示归一化由下游做）。
/// 2. 记录不带时间时：有锚点则按 "锚点 + 第 N 个交易日" 回填，否则用位置序号。
/// 3. 取值字段按调用方给定的候选键提取并强转数值；取不到值的记录整条跳过。
///
/// # Arguments
/// * `records`: 原始记录列表。
/// * `value_keys`: 取值字段候选键（例如收盘价优先链）。
/// * `anchor`: 回填缺失时间用的锚点日期。
///
/// # Returns
/// 等长的 (X, Y) 序列；Y 全部非缺失。
pub fn parse_day_series(
    records: &[RawRecord],
    value_keys: &[&str],
    anchor: Option<NaiveDate>,
) -> TimeSeries {
    let mut series = TimeSeries::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let x_val = first_value(record, DAY_X_KEYS).and_then(value_text);
        let x = match x_val {
            Some(text) => AxisValue::Label(text),
            None => match anchor {
                Some(anchor) => {
                    AxisValue::Label(time::add_trading_days(anchor, idx_i64(idx)).to_string())
                }
                None => AxisValue::Index(idx),
            },
        };
        let Some(y) = first_number(record, value_keys) else {
            continue;
        };
        series.push(x, Some(y));
    }
    series
}

/// # Summary
/// 解析分钟级记录列表为时间序列。
///
/// # Logic
/// 1. 时间字段按 `MINUTE_X_KEYS` 提取并归一化为展示标签。
/// 2. 裸钟点标签（只有时间没有日期）从记录的交易日期字段或锚点补上日期。
/// 3. 仍无标签时按交易分钟网格回填：`idx / 网格长度` 个交易日之后的
///    `网格[idx % 长度]` 分钟。
/// 4. 最终兜底为位置序号。
/// 5. 取值走收盘价优先链；取不到值的记录整条跳过。
///
/// # Arguments
/// * `records`: 原始记录列表。
/// * `anchor`: 回填用的锚点日期。
/// * `period_minutes`: 周期步长（分钟），决定回填网格。
///
/// # Returns
/// 等长的 (X, Y) 序列；Y 全部非缺失。
pub fn parse_minute_series(
    records: &[RawRecord],
    anchor: Option<NaiveDate>,
    period_minutes: Option<u32>,
) -> TimeSeries {
    let grid = match (anchor, period_minutes) {
        (Some(_), Some(step)) => {
            let grid = time::trading_minutes_of_day(step);
            if grid.is_empty() { None } else { Some(grid) }
        }
        _ => None,
    };

    let mut series = TimeSeries::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let x = minute_axis_value(record, idx, anchor, grid.as_deref());
        let Some(y) = first_number(record, MINUTE_Y_KEYS) else {
            continue;
        };
        series.push(x, Some(y));
    }
    series
}

/// # Summary
/// 单条分钟记录的 X 轴坐标（解析器与蜡烛图整形器共用）。
///
/// # Logic
/// 见 `parse_minute_series` 的 1-4 步。
///
/// # Arguments
/// * `record`: 原始记录。
/// * `idx`: 记录的位置序号。
/// * `anchor`: 锚点日期。
/// * `grid`: 交易分钟网格。
///
/// # Returns
/// 归一化后的轴坐标。
pub(crate) fn minute_axis_value(
    record: &RawRecord,
    idx: usize,
    anchor: Option<NaiveDate>,
    grid: Option<&[u32]>,
) -> AxisValue {
    let x_val = first_value(record, MINUTE_X_KEYS).and_then(value_text);
    let mut x_text = x_val.as_deref().and_then(time::minute_display_text);

    // 裸钟点：补上记录自带的交易日期或锚点日期
    if let Some(text) = &x_text {
        if text.contains(':') && !text.contains('-') && !text.contains('\n') {
            let date_text = first_value(record, TRADE_DATE_KEYS)
                .and_then(value_text)
                .map(|raw| time::day_label_text(&raw))
                .or_else(|| anchor.map(|a| a.to_string()));
            if let Some(date_text) = date_text {
                x_text = Some(format!("{}\n{}", date_text, text));
            }
        }
    }

    // 无任何时间字段：按交易分钟网格回填
    if x_text.is_none() {
        if let (Some(anchor), Some(grid)) = (anchor, grid) {
            if !grid.is_empty() {
                let day_offset = idx / grid.len();
                let minute_of_day = grid[idx % grid.len()];
                let trading_date = time::add_trading_days(anchor, idx_i64(day_offset));
                x_text = Some(format!(
                    "{}\n{:02}:{:02}",
                    trading_date,
                    minute_of_day / 60,
                    minute_of_day % 60
                ));
            }
        }
    }

    match x_text {
        Some(text) => AxisValue::Label(text),
        None => AxisValue::Index(idx),
    }
}

/// usize 序号安全转 i64（超界饱和，避免截断类强转）
fn idx_i64(idx: usize) -> i64 {
    i64::try_from(idx).unwrap_or(i64::MAX)
}

/// 整条日线序列的 Y 值是否全部缺失（上层据此切换到备选字段链）
pub fn is_blank(series: &TimeSeries) -> bool {
    series.is_empty() || series.y.iter().all(Option::is_none)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::CLOSE_KEYS;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<RawRecord> {
        match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_day_series_with_backfill() {
        let recs = records(json!([
            {"tradeDate": "20240105", "close": 3100.5},
            {"close": "3110.0"},
            {"tradeDate": "2024-01-09", "open": 1.0}
        ]));
        // 2024-01-05 是周五，第二条缺时间 → 回填到下一个交易日（周一）
        let series = parse_day_series(&recs, CLOSE_KEYS, Some(d(2024, 1, 5)));
        assert_eq!(series.len(), 2);
        assert_eq!(series.x[0], AxisValue::Label("20240105".to_string()));
        assert_eq!(series.x[1], AxisValue::Label("2024-01-08".to_string()));
        assert_eq!(series.y, vec![Some(3100.5), Some(3110.0)]);
    }

    #[test]
    fn test_parse_minute_series_bare_clock_gains_date() {
        let recs = records(json!([
            {"time": "0931", "tradeDate": "20240105", "close": 3100.0},
            {"time": "09:35", "close": 3101.0}
        ]));
        let series = parse_minute_series(&recs, Some(d(2024, 1, 5)), Some(1));
        assert_eq!(
            series.x[0],
            AxisValue::Label("2024-01-05\n09:31".to_string())
        );
        // 记录不带日期时用锚点
        assert_eq!(
            series.x[1],
            AxisValue::Label("2024-01-05\n09:35".to_string())
        );
    }

    #[test]
    fn test_parse_minute_series_grid_backfill() {
        // 完全没有时间字段：按 1 分钟网格回填，首格是 09:30
        let recs = records(json!([
            {"close": 3100.0},
            {"close": 3101.0}
        ]));
        let series = parse_minute_series(&recs, Some(d(2024, 1, 5)), Some(1));
        assert_eq!(
            series.x[0],
            AxisValue::Label("2024-01-05\n09:30".to_string())
        );
        assert_eq!(
            series.x[1],
            AxisValue::Label("2024-01-05\n09:31".to_string())
        );
    }

    #[test]
    fn test_parse_minute_series_skips_valueless_records() {
        let recs = records(json!([
            {"time": "09:31"},
            {"time": "09:32", "close": 3100.0}
        ]));
        let series = parse_minute_series(&recs, None, None);
        assert_eq!(series.len(), 1);
        assert_eq!(series.y, vec![Some(3100.0)]);
    }
}
