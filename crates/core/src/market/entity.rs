use crate::common::time;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 数据源返回的单条无模式观测记录：字段名因接口/供应商而异
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// # Summary
/// 图表 X 轴坐标：归一化后的时间标签，或（降级时的）位置序号。
///
/// # Invariants
/// - 序号形态只在数据不携带任何可解析时间时出现。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    // 位置序号（降级形态）
    Index(usize),
    // 时间标签
    Label(String),
}

impl AxisValue {
    /// # Summary
    /// 归一化为分钟级对齐键 `"YYYY-MM-DD HH:MM"`。
    ///
    /// # Arguments
    /// * `anchor`: 裸钟点标签使用的锚点日期。
    ///
    /// # Returns
    /// 对齐键文本；序号形态返回十进制文本。
    pub fn minute_key(&self, anchor: Option<NaiveDate>) -> String {
        match self {
            AxisValue::Index(i) => i.to_string(),
            AxisValue::Label(s) => time::minute_key_text(s, anchor),
        }
    }

    /// # Summary
    /// 归一化为日线标签 `"YYYY-MM-DD"`。
    ///
    /// # Arguments
    /// * `anchor`: 序号形态做天数偏移时的锚点日期。
    ///
    /// # Returns
    /// 日线标签文本。
    pub fn day_label(&self, anchor: Option<NaiveDate>) -> String {
        match self {
            AxisValue::Index(i) => time::day_label_index(*i, anchor),
            AxisValue::Label(s) => time::day_label_text(s),
        }
    }

    /// 提取标签携带的 `YYYY-MM-DD` 日期；不携带时返回 None
    pub fn label_date(&self) -> Option<String> {
        match self {
            AxisValue::Index(i) => time::label_date_text(&i.to_string()),
            AxisValue::Label(s) => time::label_date_text(s),
        }
    }
}

impl std::fmt::Display for AxisValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisValue::Index(i) => write!(f, "{}", i),
            AxisValue::Label(s) => write!(f, "{}", s),
        }
    }
}

impl From<usize> for AxisValue {
    fn from(value: usize) -> Self {
        AxisValue::Index(value)
    }
}

impl From<String> for AxisValue {
    fn from(value: String) -> Self {
        AxisValue::Label(value)
    }
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        AxisValue::Label(value.to_string())
    }
}

/// # Summary
/// 等长的 (X 轴, 数值) 时间序列，单次渲染内的瞬态数据。
///
/// # Invariants
/// - `x.len() == y.len()`；键不要求唯一，对齐时首次出现者为准。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    // X 轴坐标序列
    pub x: Vec<AxisValue>,
    // 数值序列（可缺失）
    pub y: Vec<Option<f64>>,
}

impl TimeSeries {
    /// 预分配容量的空序列
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// 成对追加一个点，维持等长不变式
    pub fn push(&mut self, x: AxisValue, y: Option<f64>) {
        self.x.push(x);
        self.y.push(y);
    }

    /// 点数
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// # Summary
/// 单根 K 线的四价，字段均可缺失（来源不保证完整）。
///
/// # Invariants
/// - `low ≤ min(open, close) ≤ max(open, close) ≤ high` 由 `normalized`
///   防御性钳制保证，来源数据本身不保证。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Candle {
    // 开盘价
    pub open: Option<f64>,
    // 收盘价
    pub close: Option<f64>,
    // 最低价
    pub low: Option<f64>,
    // 最高价
    pub high: Option<f64>,
}

impl Candle {
    /// # Summary
    /// 防御性钳制：让最高/最低覆盖开收盘价。
    ///
    /// # Logic
    /// 1. 取开收盘中的较大者，缺失的 high 用它补齐，偏小的 high 抬升到它。
    /// 2. 取开收盘中的较小者，对 low 做镜像处理。
    ///
    /// # Returns
    /// 钳制后的 K 线。
    pub fn normalized(self) -> Candle {
        let mut candle = self;
        let body_high = match (candle.open, candle.close) {
            (Some(o), Some(c)) => Some(o.max(c)),
            (Some(o), None) => Some(o),
            (None, Some(c)) => Some(c),
            (None, None) => None,
        };
        let body_low = match (candle.open, candle.close) {
            (Some(o), Some(c)) => Some(o.min(c)),
            (Some(o), None) => Some(o),
            (None, Some(c)) => Some(c),
            (None, None) => None,
        };
        if let Some(body_high) = body_high {
            candle.high = Some(candle.high.map_or(body_high, |h| h.max(body_high)));
        }
        if let Some(body_low) = body_low {
            candle.low = Some(candle.low.map_or(body_low, |l| l.min(body_low)));
        }
        candle
    }
}

/// # Summary
/// 蜡烛图/成交量引擎的输出：列式对齐的 OHLCV 数组。
///
/// # Invariants
/// - 所有数组等长；`volume` 永不缺失（缺失点由价差代理合成）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapedCandles {
    // X 轴标签
    pub x: Vec<AxisValue>,
    // 开盘价
    pub open: Vec<f64>,
    // 收盘价
    pub close: Vec<f64>,
    // 最低价
    pub low: Vec<f64>,
    // 最高价
    pub high: Vec<f64>,
    // 成交量（缺失点为合成值）
    pub volume: Vec<f64>,
    // 由价差代理合成的成交量点数，调用方据此提示"模拟量"
    pub synthetic_volume: usize,
}

impl ShapedCandles {
    /// 点数
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// # Summary
/// 背离方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivergenceKind {
    // 底背离：价格走低而指标走高
    Bullish,
    // 顶背离：价格走高而指标走低
    Bearish,
}

/// # Summary
/// 一次背离信号，由枢轴/背离检测器产出，单次渲染内不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceSignal {
    // 背离方向
    pub kind: DivergenceKind,
    // 前一个枢轴的序号
    pub prior_index: usize,
    // 当前枢轴的序号
    pub index: usize,
    // 当前枢轴处的价格
    pub price: f64,
    // 当前枢轴处的指标值
    pub indicator: f64,
}

/// # Summary
/// 背离面板可选的指标族。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    Macd,
    Kdj,
    Rsi,
}

/// # Summary
/// MACD 指标束，与输入收盘序列逐点对齐。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MacdBundle {
    // 快慢 EMA 之差 (DIF)
    pub dif: Vec<Option<f64>>,
    // DIF 的信号 EMA (DEA)
    pub dea: Vec<Option<f64>>,
    // 柱状图 (DIF - DEA) * 2
    pub hist: Vec<Option<f64>>,
}

/// # Summary
/// KDJ 指标束，与输入收盘序列逐点对齐。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KdjBundle {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
    pub j: Vec<Option<f64>>,
}

/// # Summary
/// RSI 指标束，与输入收盘序列逐点对齐。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RsiBundle {
    pub rsi: Vec<Option<f64>>,
}
