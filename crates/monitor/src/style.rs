use chrono::NaiveDate;
use kanpan_core::common::Period;
use kanpan_core::common::time;
use kanpan_core::market::entity::{AxisValue, TimeSeries};
use kanpan_series::align::{align_by_key, positional_align};
use kanpan_series::returns::{rolling_sum, step_returns};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// 风格判定阈值（百分比）
pub const STYLE_THRESHOLD: f64 = 0.3;
/// 大盘基准：沪深300
pub const LARGE_CAP_EXPONENT: u32 = 3;
/// 小盘基准：中证1000
pub const SMALL_CAP_EXPONENT: u32 = 12;

/// # Summary
/// 大小盘风格判定结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeStyle {
    // 小盘风格：强度 ≥ +阈值
    SmallCap,
    // 大盘风格：强度 ≤ -阈值
    LargeCap,
    // 均衡：强度在阈值带内
    Balanced,
    // 未知：无有效强度
    Unknown,
}

impl std::fmt::Display for SizeStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeStyle::SmallCap => write!(f, "小盘风格"),
            SizeStyle::LargeCap => write!(f, "大盘风格"),
            SizeStyle::Balanced => write!(f, "均衡"),
            SizeStyle::Unknown => write!(f, "未知"),
        }
    }
}

/// # Summary
/// 大小盘风格面板数据：交给渲染层的纯数据。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeStylePanel {
    // X 轴标签
    pub x: Vec<AxisValue>,
    // 滚动强度序列（小盘收益 - 大盘收益 的滚动和）
    pub strength: Vec<Option<f64>>,
    // 使用的滚动窗口
    pub window: usize,
    // 判定阈值
    pub threshold: f64,
    // 风格判定
    pub style: SizeStyle,
    // 最后一个有效强度值
    pub last_strength: Option<f64>,
}

/// 周期对应的滚动窗口：日线 3，30/60 分钟 5，其余 10
pub fn rolling_window(period: Period) -> usize {
    match period {
        Period::Day1 => 3,
        Period::Minute30 | Period::Minute60 => 5,
        _ => 10,
    }
}

/// # Summary
/// 由最后一个有效强度值判定风格。
///
/// # Arguments
/// * `strength`: 强度序列。
/// * `threshold`: 判定阈值。
///
/// # Returns
/// (风格, 最后一个有效强度)。
pub fn decide_style(strength: &[Option<f64>], threshold: f64) -> (SizeStyle, Option<f64>) {
    let last = strength.iter().rev().find_map(|v| *v);
    let style = match last {
        None => SizeStyle::Unknown,
        Some(v) if v >= threshold => SizeStyle::SmallCap,
        Some(v) if v <= -threshold => SizeStyle::LargeCap,
        Some(_) => SizeStyle::Balanced,
    };
    (style, last)
}

/// # Summary
/// 大小盘风格强度管线：两条指数序列 → 滚动强度与风格判定。
///
/// # Logic
/// 1. 按归一化键对齐两条序列（日线用日期标签、分钟用分钟键）；
///    键对齐零命中且两边都非空时按位置截断降级。
/// 2. 两边各算步进收益，强度差 = 小盘收益 - 大盘收益。
/// 3. 差值按周期窗口（日 3 / 30·60 分 5 / 其余 10）滚动求和。
/// 4. 预取窗口带进来的早期点按标签日期过滤回 [start, end]。
/// 5. 日线回填到完整交易日轴：数据缺口显式呈现为缺失点。
///
/// # Arguments
/// * `large`: 大盘基准序列（沪深300）。
/// * `small`: 小盘基准序列（中证1000）。
/// * `period`: 行情周期。
/// * `prefetch_anchor`: 预取起点（start - 7 天），解析回填用的锚点。
/// * `start` / `end`: 用户请求的日期区间。
///
/// # Returns
/// 面板数据。
pub fn size_style_trend(
    large: &TimeSeries,
    small: &TimeSeries,
    period: Period,
    prefetch_anchor: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
) -> SizeStylePanel {
    // 1. 对齐
    let (mut x_data, mut large_price, mut small_price) = if period == Period::Day1 {
        align_by_key(
            &large.x,
            &large.y,
            &small.x,
            &small.y,
            |v| Some(v.day_label(Some(prefetch_anchor))),
            |key| AxisValue::from(key),
        )
    } else {
        align_by_key(
            &large.x,
            &large.y,
            &small.x,
            &small.y,
            |v| Some(v.minute_key(None)),
            |key| AxisValue::Label(time::minute_key_label(key)),
        )
    };
    if x_data.is_empty() && !large.is_empty() && !small.is_empty() {
        let (x, a, b) = positional_align(&large.x, &large.y, &small.x, &small.y);
        x_data = x;
        large_price = a;
        small_price = b;
    }

    // 2. 步进收益与强度差
    let large_step = step_returns(&large_price);
    let small_step = step_returns(&small_price);
    let diff_step: Vec<Option<f64>> = small_step
        .iter()
        .zip(large_step.iter())
        .map(|(s, l)| match (s, l) {
            (Some(s), Some(l)) => Some(s - l),
            _ => None,
        })
        .collect();

    // 3. 滚动求和
    let window = rolling_window(period);
    let mut strength = rolling_sum(&diff_step, window);

    // 4. 过滤回请求区间（预取窗口只服务于收益计算的热身）
    let start_key = start.to_string();
    let end_key = end.to_string();
    let keep: Vec<usize> = x_data
        .iter()
        .enumerate()
        .filter(|(_, x)| {
            x.label_date()
                .map(|d| d.as_str() >= start_key.as_str() && d.as_str() <= end_key.as_str())
                .unwrap_or(true)
        })
        .map(|(i, _)| i)
        .collect();
    if !keep.is_empty() && keep.len() != x_data.len() {
        x_data = keep.iter().map(|&i| x_data[i].clone()).collect();
        strength = keep.iter().map(|&i| strength[i]).collect();
    }

    // 5. 日线回填到完整交易日轴
    if period == Period::Day1 {
        let expected = time::trading_dates(start, end);
        if !expected.is_empty() {
            let mut by_date: HashMap<String, Option<f64>> = HashMap::new();
            for (x, v) in x_data.iter().zip(strength.iter()) {
                if let Some(date) = x.label_date() {
                    by_date.entry(date).or_insert(*v);
                }
            }
            x_data = expected
                .iter()
                .map(|d| AxisValue::Label(d.to_string()))
                .collect();
            strength = expected
                .iter()
                .map(|d| by_date.get(&d.to_string()).copied().flatten())
                .collect();
        }
    }

    let (style, last_strength) = decide_style(&strength, STYLE_THRESHOLD);
    debug!(points = x_data.len(), window, style = %style, "风格强度管线完成");

    SizeStylePanel {
        x: x_data,
        strength,
        window,
        threshold: STYLE_THRESHOLD,
        style,
        last_strength,
    }
}
