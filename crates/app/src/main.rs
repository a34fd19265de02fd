use std::sync::Arc;

use kanpan_cache::mem::MemCache;
use kanpan_core::common::{INDEX_CATALOG, Period};
use kanpan_core::common::time::{RealTimeProvider, TimeProvider};
use kanpan_core::config::{DatePreset, QueryConfig};
use kanpan_monitor::cached::CachedProvider;
use kanpan_monitor::fallback::FallbackProvider;
use kanpan_monitor::service::MonitorService;
use kanpan_monitor::signal::DivergenceToggles;
use kanpan_synth::provider::SynthProvider;
use tracing::info;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化缓存、行情提供者与装饰器，注入 MonitorService 后跑一轮渲染。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 实例化基础设施层（Cache、Provider）并套上缓存/降级装饰器。
/// 3. 构造面板服务，按"近一周"预设执行一轮全面板渲染。
/// 4. 面板数据以 JSON 输出到标准输出（渲染层的数据交接面）。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志
    tracing_subscriber::fmt::init();
    info!("Kanpan monitor starting...");

    // 2. 实例化基础设施层：合成数据源 + 限时缓存 + 断流降级
    let cache = Arc::new(MemCache::new());
    let source = Arc::new(SynthProvider::new());
    let cached = Arc::new(CachedProvider::new(source, cache));
    let provider = Arc::new(FallbackProvider::new(cached));

    // 3. 构造面板服务
    let service = MonitorService::new(provider);

    // 4. 请求级配置：近一周预设
    let clock = RealTimeProvider;
    let (start_date, end_date) = DatePreset::PastWeek.apply(clock.today());
    let config = QueryConfig {
        start_date,
        end_date,
        period: Period::Minute5,
        index: INDEX_CATALOG[0].name.to_string(),
    };

    let trend = service.index_trend_panel(&config).await;
    info!(points = trend.x.len(), synthetic = trend.synthetic, "趋势面板");

    let style = service.size_style_panel(&config).await;
    info!(style = %style.style, window = style.window, "风格面板");

    let divergence = service
        .divergence_panel(&config, DivergenceToggles::default())
        .await;
    info!(signals = divergence.signals.len(), "背离面板");

    let distribution = service.distribution_panel(&config).await;
    info!(
        advancers = distribution.advancers,
        decliners = distribution.decliners,
        "分布面板"
    );

    let payload = serde_json::json!({
        "trend": trend,
        "size_style": style,
        "divergence": divergence,
        "distribution": distribution,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);

    info!("Render pass complete. Exiting...");
    Ok(())
}
