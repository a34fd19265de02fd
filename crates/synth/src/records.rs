use crate::seed::seed_rng;
use chrono::NaiveDate;
use kanpan_core::common::Period;
use kanpan_core::common::time;
use kanpan_core::market::entity::RawRecord;
use rand::RngExt;
use rand::rngs::StdRng;
use serde_json::{Value, json};

/// 合成个股快照的股票数量
const SNAPSHOT_STOCKS: usize = 320;

fn number(value: f64) -> Value {
    json!((value * 100.0).round() / 100.0)
}

fn push_ohlcv(record: &mut RawRecord, rng: &mut StdRng, prev_close: &mut f64, fluctuation: f64) {
    let open = *prev_close;
    let close = open + rng.random_range(-fluctuation..=fluctuation);
    let spread = fluctuation * rng.random_range(0.05..=0.25);
    let high = open.max(close) + spread;
    let low = (open.min(close) - spread).max(0.0);
    let volume = rng.random_range::<f64, _>(5.0e7..=2.0e8).round();
    record.insert("open".to_string(), number(open));
    record.insert("close".to_string(), number(close));
    record.insert("high".to_string(), number(high));
    record.insert("low".to_string(), number(low));
    record.insert("volume".to_string(), json!(volume));
    *prev_close = close;
}

/// # Summary
/// 生成分钟级合成 OHLCV 记录：沿交易分钟网格铺满日期区间。
///
/// # Logic
/// 1. 枚举区间内的交易日，每天展开该周期的分钟网格。
/// 2. 收盘价做随机游走，OHLC 与成交量围绕它派生。
/// 3. 时间字段用 `"YYYY-MM-DD HH:MM"` 形态，走与真实数据相同的归一化。
///
/// # Arguments
/// * `start` / `end`: 日期区间（含）。
/// * `period`: 行情周期。
/// * `base` / `fluctuation`: 游走参数。
/// * `seed_text`: 种子文本。
///
/// # Returns
/// 合成记录列表。
pub fn minute_records(
    start: NaiveDate,
    end: NaiveDate,
    period: Period,
    base: f64,
    fluctuation: f64,
    seed_text: &str,
) -> Vec<RawRecord> {
    let step = period.minutes().unwrap_or(1);
    let grid = time::trading_minutes_of_day(step);
    let dates = time::trading_dates(start, end);
    let mut rng = seed_rng(seed_text);
    let mut prev_close = base;

    let mut records = Vec::with_capacity(dates.len() * grid.len());
    for date in &dates {
        for minute in &grid {
            let mut record = RawRecord::new();
            record.insert(
                "dateTime".to_string(),
                json!(format!("{} {:02}:{:02}", date, minute / 60, minute % 60)),
            );
            push_ohlcv(&mut record, &mut rng, &mut prev_close, fluctuation);
            records.push(record);
        }
    }
    records
}

/// # Summary
/// 生成日线合成 OHLCV 记录。
///
/// # Arguments
/// * `start` / `end`: 日期区间（含）。
/// * `exponent_id`: 写回记录的指数标识。
/// * `base` / `fluctuation`: 游走参数。
/// * `seed_text`: 种子文本。
///
/// # Returns
/// 每个交易日一条的合成记录列表。
pub fn day_records(
    start: NaiveDate,
    end: NaiveDate,
    exponent_id: u32,
    base: f64,
    fluctuation: f64,
    seed_text: &str,
) -> Vec<RawRecord> {
    let dates = time::trading_dates(start, end);
    let mut rng = seed_rng(seed_text);
    let mut prev_close = base;

    let mut records = Vec::with_capacity(dates.len());
    for date in &dates {
        let mut record = RawRecord::new();
        record.insert("tradeDate".to_string(), json!(date.to_string()));
        record.insert("exponentId".to_string(), json!(exponent_id));
        push_ohlcv(&mut record, &mut rng, &mut prev_close, fluctuation);
        records.push(record);
    }
    records
}

/// # Summary
/// 生成全市场个股快照合成记录（涨跌分布面板的降级来源）。
///
/// # Logic
/// 1. 固定 320 只合成股票，代码按沪深板段轮转。
/// 2. 涨跌幅取 `[-11%, 11%]`，自然覆盖涨停/跌停带。
/// 3. 极少量记录不带涨跌幅字段，模拟停牌。
///
/// # Arguments
/// * `deal_date`: 成交日期。
/// * `seed_text`: 种子文本。
///
/// # Returns
/// 合成快照记录列表。
pub fn snapshot_records(deal_date: NaiveDate, seed_text: &str) -> Vec<RawRecord> {
    let mut rng = seed_rng(seed_text);
    let mut records = Vec::with_capacity(SNAPSHOT_STOCKS);
    let prefixes = ["600", "000", "300", "688"];
    for i in 0..SNAPSHOT_STOCKS {
        let mut record = RawRecord::new();
        let prefix = prefixes[i % prefixes.len()];
        record.insert("code".to_string(), json!(format!("{}{:03}", prefix, i)));
        record.insert("dealDate".to_string(), json!(deal_date.to_string()));
        if rng.random_range(0.0..1.0f64) < 0.02 {
            // 停牌：无涨跌幅字段
            record.insert("halt".to_string(), json!(true));
            records.push(record);
            continue;
        }
        let pct: f64 = rng.random_range(-11.0..=11.0);
        let pre_close: f64 = rng.random_range(3.0..=80.0);
        record.insert("pctChg".to_string(), number(pct));
        record.insert("preClose".to_string(), number(pre_close));
        record.insert(
            "close".to_string(),
            number(pre_close * (1.0 + pct / 100.0)),
        );
        records.push(record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_minute_records_cover_grid() {
        let records = minute_records(
            d(2024, 1, 5),
            d(2024, 1, 5),
            Period::Minute5,
            3000.0,
            20.0,
            "测试",
        );
        // 5 分钟网格一个交易日 48 个点
        assert_eq!(records.len(), 48);
        assert_eq!(
            records[0].get("dateTime"),
            Some(&json!("2024-01-05 09:35"))
        );
        assert!(records.iter().all(|r| r.contains_key("close")));
    }

    #[test]
    fn test_day_records_skip_weekend() {
        let records = day_records(d(2024, 1, 5), d(2024, 1, 8), 3, 4200.0, 20.0, "测试");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("tradeDate"), Some(&json!("2024-01-05")));
        assert_eq!(records[1].get("tradeDate"), Some(&json!("2024-01-08")));
    }

    #[test]
    fn test_snapshot_records_deterministic() {
        let a = snapshot_records(d(2024, 1, 5), "快照");
        let b = snapshot_records(d(2024, 1, 5), "快照");
        assert_eq!(a.len(), b.len());
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
