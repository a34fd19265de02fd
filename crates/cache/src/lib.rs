//! # `kanpan-cache` - 限时内存缓存
//!
//! 实现核心缓存端口的内存适配器：每个条目携带绝对到期时刻，
//! 读取路径上淘汰过期数据。原始实现里按接口粒度做的限时记忆化
//! （分钟 60s / 日线 300s / 快照 900s）由上层装饰器基于此能力重建。

pub mod mem;
