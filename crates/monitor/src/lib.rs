//! # `kanpan-monitor` - 面板级监控服务
//!
//! 渲染层消费的唯一入口：每个面板操作拿一份请求配置，产出纯数据
//! （X 轴标签、数值序列、信号标注），不回调核心、不持跨请求状态。
//!
//! ## 架构职责
//! - 行情端口装饰器：断流降级（FallbackProvider）与限时记忆化（CachedProvider）
//! - 指数分时/日线趋势面板
//! - 大小盘风格强度面板（对齐 → 步进收益 → 差值 → 滚动求和 → 阈值判定）
//! - 背离信号面板（整形 → 指标 → 枢轴 → 背离）
//! - 个股涨跌分布面板

pub mod breadth;
pub mod cached;
pub mod fallback;
pub mod service;
pub mod signal;
pub mod style;
