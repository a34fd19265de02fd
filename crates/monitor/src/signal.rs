use kanpan_core::market::entity::{
    AxisValue, DivergenceSignal, IndicatorKind, ShapedCandles,
};
use kanpan_indicator::divergence::{DivergenceParams, detect_divergence};
use kanpan_indicator::kdj::kdj_default;
use kanpan_indicator::macd::macd_default;
use kanpan_indicator::rsi::rsi_default;
use serde::{Deserialize, Serialize};

/// # Summary
/// 背离面板的指标族开关。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DivergenceToggles {
    pub macd: bool,
    pub kdj: bool,
    pub rsi: bool,
}

impl Default for DivergenceToggles {
    fn default() -> Self {
        Self {
            macd: true,
            kdj: true,
            rsi: true,
        }
    }
}

/// # Summary
/// 背离信号面板数据。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivergencePanel {
    // X 轴标签
    pub x: Vec<AxisValue>,
    // 价格（收盘）序列
    pub price: Vec<f64>,
    // 按指标族标注的背离信号，整体按下标升序
    pub signals: Vec<(IndicatorKind, DivergenceSignal)>,
    // 合成成交量点数（提示"模拟量"用）
    pub synthetic_volume: usize,
}

/// # Summary
/// 在整形后的蜡烛数据上跑三族指标的背离扫描。
///
/// # Logic
/// 1. 按开关逐族计算指标，取各族最敏锐的线与价格做背离：
///    MACD 用 DIF、KDJ 用 J、RSI 用 RSI。
/// 2. 全部信号合并后按枢轴下标升序。
///
/// # Arguments
/// * `shaped`: 整形后的蜡烛数据。
/// * `toggles`: 指标族开关。
/// * `params`: 枢轴与间隔参数。
///
/// # Returns
/// 面板数据。
pub fn divergence_panel(
    shaped: &ShapedCandles,
    toggles: DivergenceToggles,
    params: DivergenceParams,
) -> DivergencePanel {
    let close: Vec<Option<f64>> = shaped.close.iter().map(|v| Some(*v)).collect();
    let high: Vec<Option<f64>> = shaped.high.iter().map(|v| Some(*v)).collect();
    let low: Vec<Option<f64>> = shaped.low.iter().map(|v| Some(*v)).collect();

    let mut signals: Vec<(IndicatorKind, DivergenceSignal)> = Vec::new();
    if toggles.macd {
        let bundle = macd_default(&close);
        for signal in detect_divergence(&close, &bundle.dif, params) {
            signals.push((IndicatorKind::Macd, signal));
        }
    }
    if toggles.kdj {
        let bundle = kdj_default(&high, &low, &close);
        for signal in detect_divergence(&close, &bundle.j, params) {
            signals.push((IndicatorKind::Kdj, signal));
        }
    }
    if toggles.rsi {
        let bundle = rsi_default(&close);
        for signal in detect_divergence(&close, &bundle.rsi, params) {
            signals.push((IndicatorKind::Rsi, signal));
        }
    }
    signals.sort_by_key(|(_, s)| s.index);

    DivergencePanel {
        x: shaped.x.clone(),
        price: shaped.close.clone(),
        signals,
        synthetic_volume: shaped.synthetic_volume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanpan_series::candle::shape_candles;
    use kanpan_core::market::entity::RawRecord;
    use serde_json::json;

    fn records_from_closes(closes: &[f64]) -> Vec<RawRecord> {
        closes
            .iter()
            .enumerate()
            .filter_map(|(i, c)| match json!({
                "time": format!("{:02}:{:02}", 9 + i / 60, 31 + i % 60),
                "close": c,
                "volume": 100.0
            }) {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_disabled_families_emit_nothing() {
        let shaped = shape_candles(&records_from_closes(&[10.0, 12.0, 10.0, 11.0, 13.0, 11.0]), None, None);
        let toggles = DivergenceToggles {
            macd: false,
            kdj: false,
            rsi: false,
        };
        let panel = divergence_panel(&shaped, toggles, DivergenceParams::default());
        assert!(panel.signals.is_empty());
        assert_eq!(panel.price.len(), 6);
    }

    #[test]
    fn test_signals_sorted_by_index() {
        // 价格两个高点抬高：用小枢轴窗口便于构造
        let closes = [10.0, 14.0, 10.0, 11.0, 15.0, 11.0, 12.0, 16.0, 12.0];
        let shaped = shape_candles(&records_from_closes(&closes), None, None);
        let params = DivergenceParams {
            pivot_window: 1,
            max_bars: 10,
        };
        let panel = divergence_panel(&shaped, DivergenceToggles::default(), params);
        let indices: Vec<usize> = panel.signals.iter().map(|(_, s)| s.index).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted);
    }
}
