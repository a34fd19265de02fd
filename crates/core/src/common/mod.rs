pub mod time;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 指数标的实体，代表系统关注的某一个大盘指数。
///
/// # Invariants
/// - `code` 必须是合法的指数代码；`exponent_id` 是数据源侧的指数标识。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexInfo {
    // 指数名称 (例如: 上证指数)
    pub name: &'static str,
    // 指数代码 (例如: 000001)
    pub code: &'static str,
    // 数据源侧的指数标识
    pub exponent_id: u32,
}

/// 系统跟踪的六个大盘指数
pub const INDEX_CATALOG: [IndexInfo; 6] = [
    IndexInfo {
        name: "上证指数",
        code: "000001",
        exponent_id: 1,
    },
    IndexInfo {
        name: "深证综指",
        code: "399101",
        exponent_id: 6,
    },
    IndexInfo {
        name: "沪深300",
        code: "000300",
        exponent_id: 3,
    },
    IndexInfo {
        name: "创业板指",
        code: "399006",
        exponent_id: 11,
    },
    IndexInfo {
        name: "科创50",
        code: "000688",
        exponent_id: 10,
    },
    IndexInfo {
        name: "中证1000",
        code: "000852",
        exponent_id: 12,
    },
];

/// # Summary
/// 按名称查找指数标的。
///
/// # Logic
/// 1. 在静态目录中线性查找同名条目。
///
/// # Arguments
/// * `name`: 指数名称（例如 "沪深300"）。
///
/// # Returns
/// 命中则返回静态引用，否则返回 None。
pub fn find_index(name: &str) -> Option<&'static IndexInfo> {
    INDEX_CATALOG.iter().find(|info| info.name == name)
}

/// # Summary
/// 行情时间周期枚举，定义序列点的时间跨度。
///
/// # Invariants
/// - 无特定约束。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Period {
    // 1分钟
    Minute1,
    // 5分钟
    Minute5,
    // 30分钟
    Minute30,
    // 60分钟
    Minute60,
    // 日线
    Day1,
}

impl Period {
    /// 分钟周期的步长；日线返回 None
    pub fn minutes(self) -> Option<u32> {
        match self {
            Period::Minute1 => Some(1),
            Period::Minute5 => Some(5),
            Period::Minute30 => Some(30),
            Period::Minute60 => Some(60),
            Period::Day1 => None,
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "minute1" | "1分钟" => Ok(Period::Minute1),
            "5m" | "minute5" | "5分钟" => Ok(Period::Minute5),
            "30m" | "minute30" | "30分钟" => Ok(Period::Minute30),
            "60m" | "minute60" | "60分钟" => Ok(Period::Minute60),
            "1d" | "day1" | "日线" => Ok(Period::Day1),
            _ => Err(format!("Unknown Period: {}", s)),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Minute1 => write!(f, "1m"),
            Period::Minute5 => write!(f, "5m"),
            Period::Minute30 => write!(f, "30m"),
            Period::Minute60 => write!(f, "60m"),
            Period::Day1 => write!(f, "1d"),
        }
    }
}
