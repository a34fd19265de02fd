use kanpan_core::market::entity::RawRecord;
use serde_json::Value;

/// 日线记录的时间字段候选键，按优先级排列
pub const DAY_X_KEYS: &[&str] = &[
    "tradeDate",
    "trade_date",
    "date",
    "datetime",
    "dateTime",
    "time",
    "tradeTime",
];

/// 分钟记录的时间字段候选键，按优先级排列
pub const MINUTE_X_KEYS: &[&str] = &[
    "dateTime",
    "datetime",
    "tradeDateTime",
    "tradeDatetime",
    "tradeTime",
    "time",
    "tradeDate",
    "date",
];

/// 记录中单独携带交易日期的候选键
pub const TRADE_DATE_KEYS: &[&str] = &["tradeDate", "trade_date", "date"];

/// 收盘价候选键
pub const CLOSE_KEYS: &[&str] = &["close", "closePrice", "close_price", "price"];

/// 开盘价候选键
pub const OPEN_KEYS: &[&str] = &["open", "openPrice", "open_price"];

/// 最高价候选键
pub const HIGH_KEYS: &[&str] = &["high", "highPrice", "high_price"];

/// 最低价候选键
pub const LOW_KEYS: &[&str] = &["low", "lowPrice", "low_price"];

/// 成交量候选键
pub const VOLUME_KEYS: &[&str] = &["volume", "vol", "tradeVolume", "trade_volume"];

/// 分钟序列取值的候选键（收盘优先，依次降级到其余价位）
pub const MINUTE_Y_KEYS: &[&str] = &["close", "closePrice", "price", "open", "high", "low"];

/// 涨跌幅候选键（百分比）
pub const PCT_CHANGE_KEYS: &[&str] = &["pctChg", "pctChange", "pct_change", "changePercent", "chg"];

/// 昨收价候选键
pub const PRE_CLOSE_KEYS: &[&str] = &["preClose", "pre_close", "prevClose", "yesterdayClose"];

/// # Summary
/// 按优先级在无模式记录中取第一个存在且非空的字段值。
///
/// # Logic
/// 1. 依序尝试候选键。
/// 2. 跳过不存在与 JSON null 的字段。
///
/// # Arguments
/// * `record`: 无模式记录。
/// * `keys`: 候选键列表（优先级递减）。
///
/// # Returns
/// 第一个命中的值引用，全部未命中返回 None。
pub fn first_value<'a>(record: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    for key in keys {
        if let Some(value) = record.get(*key) {
            if !value.is_null() {
                return Some(value);
            }
        }
    }
    None
}

/// # Summary
/// 宽容的数值强转：数字与"长得像数字的字符串"都接受。
///
/// # Logic
/// 1. JSON 数字直接取 f64。
/// 2. 字符串去除首尾空白后按十进制解析。
/// 3. 其余类型与解析失败一律返回 None，绝不报错。
///
/// # Arguments
/// * `value`: 原始 JSON 值。
///
/// # Returns
/// 转换成功的数值或 None。
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// 按优先级取第一个可转成数值的字段
pub fn first_number(record: &RawRecord, keys: &[&str]) -> Option<f64> {
    first_value(record, keys).and_then(as_number)
}

/// # Summary
/// 把原始 JSON 值转为文本（用于时间字段归一化）。
///
/// # Logic
/// 1. 字符串原样返回。
/// 2. 数字转十进制文本（如 `20240105` / `931`）。
/// 3. 其余类型返回 None。
///
/// # Arguments
/// * `value`: 原始 JSON 值。
///
/// # Returns
/// 文本或 None。
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => RawRecord::new(),
        }
    }

    #[test]
    fn test_first_value_priority_and_null_skip() {
        let rec = record(json!({"close": null, "closePrice": "3105.2", "price": 1.0}));
        // null 跳过，取次优键
        let hit = first_value(&rec, CLOSE_KEYS).unwrap();
        assert_eq!(hit, &json!("3105.2"));
        assert_eq!(first_number(&rec, CLOSE_KEYS), Some(3105.2));
        assert!(first_value(&rec, &["missing"]).is_none());
    }

    #[test]
    fn test_as_number_tolerates_strings() {
        assert_eq!(as_number(&json!(3.5)), Some(3.5));
        assert_eq!(as_number(&json!(" 42 ")), Some(42.0));
        assert_eq!(as_number(&json!("abc")), None);
        assert_eq!(as_number(&json!(true)), None);
        // 零是合法数值，不会被当成缺失
        assert_eq!(as_number(&json!(0)), Some(0.0));
    }
}
