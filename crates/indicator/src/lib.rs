//! # `kanpan-indicator` - 技术指标与背离检测
//!
//! EMA / MACD / RSI / KDJ 四族指标，以及枢轴（局部极值）与背离检测。
//! 全部以逐点对齐的 `Vec<Option<f64>>` 形态输入输出：
//! - 缺失点透传为缺失，内部平滑状态既不推进也不清零
//! - 畸形输入一律降级为单点缺失，绝不中断整条序列
//! - 无任何隐藏全局状态，相同输入必然产出逐位相同的输出

pub mod divergence;
pub mod ema;
pub mod kdj;
pub mod macd;
pub mod pivot;
pub mod rsi;
