//! # `kanpan-series` - 原始记录整形管线
//!
//! 把数据源返回的无模式记录整形成可绘制、可对齐的序列：
//! - 宽容的字段提取与数值强转（字段名因供应商而异）
//! - 日线/分钟线序列解析，缺失时间戳按交易日历回填
//! - 两序列按归一化键内连接对齐，零命中时按位置截断降级
//! - 步进收益与滚动求和（缺失点跳过而非清零）
//! - 蜡烛图/成交量整形（缺量点由价差代理合成）
//!
//! 全部为单遍、无状态的纯函数，逐请求重算，无任何跨请求状态。

pub mod align;
pub mod candle;
pub mod extract;
pub mod parse;
pub mod returns;
