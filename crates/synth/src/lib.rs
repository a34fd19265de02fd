//! # `kanpan-synth` - 确定性合成数据源
//!
//! 数据提供者故障时的统一降级来源：给定同一种子文本，产出逐位相同的
//! 随机游走序列与合成行情记录，保证断流期间所有面板仍有数据可画。
//! `SynthProvider` 按行情端口的原始记录形态产出数据，让整形、对齐、
//! 指标全链路在降级时走与真实数据完全相同的管线。

pub mod provider;
pub mod records;
pub mod seed;
pub mod series;
