use crate::seed::seed_rng;
use chrono::NaiveDate;
use kanpan_core::common::Period;
use kanpan_core::common::time;
use kanpan_core::market::entity::{AxisValue, TimeSeries};
use rand::RngExt;

/// # Summary
/// 随机游走序列参数。
#[derive(Debug, Clone)]
pub struct WalkSpec {
    // 点数
    pub length: usize,
    // 起始基准值
    pub base: f64,
    // 单步最大波动幅度
    pub fluctuation: f64,
    // 种子文本
    pub seed_text: String,
}

impl Default for WalkSpec {
    fn default() -> Self {
        Self {
            length: 30,
            base: 3000.0,
            fluctuation: 50.0,
            seed_text: "default".to_string(),
        }
    }
}

/// # Summary
/// 生成确定性随机游走序列（X 轴为位置序号）。
///
/// # Logic
/// 1. 按种子文本初始化发生器。
/// 2. 从基准值出发，每步叠加 `[-fluctuation, fluctuation]` 内的增量。
///
/// # Arguments
/// * `spec`: 游走参数。
///
/// # Returns
/// 等长的 (序号, 数值) 序列。
pub fn random_walk_series(spec: &WalkSpec) -> TimeSeries {
    let mut rng = seed_rng(&spec.seed_text);
    let mut series = TimeSeries::with_capacity(spec.length);
    let mut value = spec.base;
    for i in 0..spec.length {
        value += rng.random_range(-spec.fluctuation..=spec.fluctuation);
        series.push(AxisValue::Index(i), Some(value));
    }
    series
}

/// 周期对应的合成序列长度
fn period_length(period: Period) -> usize {
    match period {
        Period::Minute1 => 60,
        Period::Minute5 => 48,
        Period::Minute30 => 32,
        Period::Minute60 => 24,
        Period::Day1 => 30,
    }
}

/// # Summary
/// 生成带交易时刻标签的周期序列（断流降级时替代分时图）。
///
/// # Logic
/// 1. 长度按周期取固定值（1 分钟 60 点、5 分钟 48 点……）。
/// 2. X 轴沿交易分钟网格展开：每超出一天的部分推进到下一个交易日。
/// 3. Y 轴复用随机游走，种子把周期与锚点拼进种子文本，保证不同面板
///    各自稳定。
///
/// # Arguments
/// * `period`: 行情周期。
/// * `anchor`: 起始交易日。
/// * `base` / `fluctuation`: 游走参数。
/// * `seed_text`: 种子文本前缀。
///
/// # Returns
/// 等长的 (标签, 数值) 序列。
pub fn period_series(
    period: Period,
    anchor: NaiveDate,
    base: f64,
    fluctuation: f64,
    seed_text: &str,
) -> TimeSeries {
    let length = period_length(period);
    let step = period.minutes().unwrap_or(1);
    let grid = time::trading_minutes_of_day(step);

    let walk = random_walk_series(&WalkSpec {
        length,
        base,
        fluctuation,
        seed_text: format!(
            "{}|{}|{}|{}|{}",
            seed_text, period, anchor, base, fluctuation
        ),
    });

    let mut series = TimeSeries::with_capacity(length);
    for (i, y) in walk.y.iter().enumerate() {
        let day_offset = i / grid.len();
        let minute_of_day = grid[i % grid.len()];
        let trading_date = time::add_trading_days(anchor, day_offset_i64(day_offset));
        let label = format!(
            "{}\n{:02}:{:02}",
            trading_date,
            minute_of_day / 60,
            minute_of_day % 60
        );
        series.push(AxisValue::Label(label), *y);
    }
    series
}

/// usize 偏移安全转 i64（超界饱和）
fn day_offset_i64(offset: usize) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_walk_deterministic_per_seed() {
        let spec = WalkSpec::default();
        let a = random_walk_series(&spec);
        let b = random_walk_series(&spec);
        assert_eq!(a.len(), 30);
        for (x, y) in a.y.iter().zip(b.y.iter()) {
            assert_eq!(x.unwrap().to_bits(), y.unwrap().to_bits());
        }

        let other = random_walk_series(&WalkSpec {
            seed_text: "其他面板".to_string(),
            ..WalkSpec::default()
        });
        assert_ne!(
            a.y.iter().map(|v| v.unwrap().to_bits()).collect::<Vec<_>>(),
            other.y.iter().map(|v| v.unwrap().to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_period_series_labels_follow_grid() {
        // 2024-01-05 是周五
        let series = period_series(Period::Minute5, d(2024, 1, 5), 3000.0, 50.0, "上证指数");
        assert_eq!(series.len(), 48);
        assert_eq!(
            series.x[0],
            AxisValue::Label("2024-01-05\n09:35".to_string())
        );
        // 5 分钟网格一天 48 个点，恰好铺满一个交易日
        assert_eq!(
            series.x[47],
            AxisValue::Label("2024-01-05\n15:00".to_string())
        );
    }
}
