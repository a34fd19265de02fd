use kanpan_core::market::entity::RawRecord;
use kanpan_series::extract::{CLOSE_KEYS, PCT_CHANGE_KEYS, PRE_CLOSE_KEYS, first_number};
use serde::Serialize;

/// 涨跌停判定阈值（百分比）
pub const LIMIT_THRESHOLD: f64 = 9.9;

/// 分布直方图的 13 个分组，自涨停向跌停排列
pub const BUCKET_LABELS: [&str; 13] = [
    "涨停", ">10%", "8%", "6%", "4%", "2%", "0%", "-2%", "-4%", "-6%", "-8%", "<-10%", "跌停",
];

/// # Summary
/// 分组色调：渲染层据此着色（涨红/跌绿/中性灰）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BucketTone {
    // 上涨侧
    Advance,
    // 下跌侧
    Decline,
    // 中性
    Neutral,
}

/// # Summary
/// 单个涨跌幅分组。
#[derive(Debug, Clone, Serialize)]
pub struct BreadthBucket {
    // 分组标签
    pub label: &'static str,
    // 股票数量
    pub count: usize,
    // 色调
    pub tone: BucketTone,
}

/// # Summary
/// 个股涨跌分布面板数据。
#[derive(Debug, Clone, Serialize)]
pub struct DistributionPanel {
    // 13 个涨跌幅分组
    pub buckets: Vec<BreadthBucket>,
    // 上涨家数
    pub advancers: usize,
    // 下跌家数
    pub decliners: usize,
    // 平盘家数
    pub flat: usize,
    // 停牌家数（无法取得涨跌幅的记录）
    pub halted: usize,
    // 涨停家数
    pub limit_up: usize,
    // 跌停家数
    pub limit_down: usize,
    // 涨停占比（百分比，两位小数）
    pub limit_up_ratio: f64,
    // 跌停占比（百分比，两位小数）
    pub limit_down_ratio: f64,
}

/// 分组标签对应的色调
fn tone_of(label: &str) -> BucketTone {
    match label {
        "涨停" | ">10%" | "8%" | "6%" | "4%" | "2%" => BucketTone::Advance,
        "跌停" | "<-10%" | "-8%" | "-6%" | "-4%" | "-2%" => BucketTone::Decline,
        _ => BucketTone::Neutral,
    }
}

/// # Summary
/// 单只股票的涨跌幅归入的分组下标。
///
/// # Logic
/// 涨停带 [9.9, 10.1] 与跌停带 [-10.1, -9.9] 优先；超出 ±10.1 的归入
/// `>10%` / `<-10%`（注册制板块的宽涨跌幅）；其余按 2% 一档归组。
fn bucket_index(pct: f64) -> usize {
    if (9.9..=10.1).contains(&pct) {
        return 0; // 涨停
    }
    if pct > 10.1 {
        return 1; // >10%
    }
    if (-10.1..=-9.9).contains(&pct) {
        return 12; // 跌停
    }
    if pct < -10.1 {
        return 11; // <-10%
    }
    if pct >= 8.0 {
        2
    } else if pct >= 6.0 {
        3
    } else if pct >= 4.0 {
        4
    } else if pct >= 2.0 {
        5
    } else if pct > -2.0 {
        6
    } else if pct > -4.0 {
        7
    } else if pct > -6.0 {
        8
    } else if pct > -8.0 {
        9
    } else {
        10
    }
}

/// 记录的涨跌幅：优先直取百分比字段，缺失时由收盘/昨收推算
fn pct_change(record: &RawRecord) -> Option<f64> {
    if let Some(pct) = first_number(record, PCT_CHANGE_KEYS) {
        return Some(pct);
    }
    let close = first_number(record, CLOSE_KEYS)?;
    let pre_close = first_number(record, PRE_CLOSE_KEYS)?;
    if pre_close == 0.0 {
        return None;
    }
    Some((close / pre_close - 1.0) * 100.0)
}

/// 百分比保留两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// # Summary
/// 全市场快照 → 涨跌分布面板。
///
/// # Logic
/// 1. 每条记录取涨跌幅（直取或由收盘/昨收推算）；取不到的计入停牌。
/// 2. 涨跌幅归入 13 个分组；±9.9% 起算涨跌停。
/// 3. 统计涨/跌/平家数与涨跌停占比（分母含停牌，下限 1 防零除）。
///
/// # Arguments
/// * `records`: 个股快照记录。
///
/// # Returns
/// 分布面板数据。
pub fn distribution(records: &[RawRecord]) -> DistributionPanel {
    let mut counts = [0usize; 13];
    let mut advancers = 0usize;
    let mut decliners = 0usize;
    let mut flat = 0usize;
    let mut halted = 0usize;
    let mut limit_up = 0usize;
    let mut limit_down = 0usize;

    for record in records {
        let Some(pct) = pct_change(record) else {
            halted += 1;
            continue;
        };
        counts[bucket_index(pct)] += 1;
        let rounded = round2(pct);
        if rounded > 0.0 {
            advancers += 1;
        } else if rounded < 0.0 {
            decliners += 1;
        } else {
            flat += 1;
        }
        if pct >= LIMIT_THRESHOLD {
            limit_up += 1;
        } else if pct <= -LIMIT_THRESHOLD {
            limit_down += 1;
        }
    }

    let total = (advancers + decliners + flat + halted).max(1);
    let total_f = u32::try_from(total).map(f64::from).unwrap_or(f64::MAX);
    let limit_up_f = u32::try_from(limit_up).map(f64::from).unwrap_or(0.0);
    let limit_down_f = u32::try_from(limit_down).map(f64::from).unwrap_or(0.0);

    let buckets = BUCKET_LABELS
        .iter()
        .zip(counts.iter())
        .map(|(label, count)| BreadthBucket {
            label,
            count: *count,
            tone: tone_of(label),
        })
        .collect();

    DistributionPanel {
        buckets,
        advancers,
        decliners,
        flat,
        halted,
        limit_up,
        limit_down,
        limit_up_ratio: round2(limit_up_f * 100.0 / total_f),
        limit_down_ratio: round2(limit_down_f * 100.0 / total_f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        match value {
            serde_json::Value::Object(map) => map,
            _ => RawRecord::new(),
        }
    }

    #[test]
    fn test_distribution_counts_and_buckets() {
        let records = vec![
            record(json!({"code": "600000", "pctChg": 10.0})),  // 涨停
            record(json!({"code": "300001", "pctChg": 15.2})),  // >10%
            record(json!({"code": "000001", "pctChg": 2.4})),   // 2%
            record(json!({"code": "000002", "pctChg": 0.0})),   // 平盘
            record(json!({"code": "000003", "pctChg": -3.0})),  // -2%
            record(json!({"code": "000004", "pctChg": -10.0})), // 跌停
            record(json!({"code": "000005"})),                  // 停牌
        ];
        let panel = distribution(&records);
        assert_eq!(panel.buckets.len(), 13);
        assert_eq!(panel.buckets[0].count, 1); // 涨停
        assert_eq!(panel.buckets[1].count, 1); // >10%
        assert_eq!(panel.buckets[5].count, 1); // 2%
        assert_eq!(panel.buckets[6].count, 1); // 0%
        assert_eq!(panel.buckets[7].count, 1); // -2%
        assert_eq!(panel.buckets[12].count, 1); // 跌停
        assert_eq!(panel.advancers, 3);
        assert_eq!(panel.decliners, 2);
        assert_eq!(panel.flat, 1);
        assert_eq!(panel.halted, 1);
        assert_eq!(panel.limit_up, 2);
        assert_eq!(panel.limit_down, 1);
        // 占比分母含停牌：7 条记录
        assert!((panel.limit_up_ratio - round2(200.0 / 7.0)).abs() < 1e-9);
    }

    #[test]
    fn test_pct_change_derived_from_close() {
        let rec = record(json!({"close": 10.5, "preClose": 10.0}));
        let panel = distribution(&[rec]);
        assert_eq!(panel.advancers, 1);
        assert_eq!(panel.buckets[4].count, 1); // +5% → 4% 档
    }

    #[test]
    fn test_zero_pre_close_counts_as_halt() {
        let rec = record(json!({"close": 10.5, "preClose": 0.0}));
        let panel = distribution(&[rec]);
        assert_eq!(panel.halted, 1);
    }
}
