use crate::pivot::{PivotKind, find_pivots};
use kanpan_core::market::entity::{DivergenceKind, DivergenceSignal};
use tracing::debug;

/// # Summary
/// 背离检测参数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivergenceParams {
    // 枢轴邻域半宽
    pub pivot_window: usize,
    // 相邻枢轴允许的最大间隔（bar 数）
    pub max_bars: usize,
}

impl Default for DivergenceParams {
    fn default() -> Self {
        Self {
            pivot_window: 3,
            max_bars: 30,
        }
    }
}

/// # Summary
/// 在价格与指标序列之间检测顶/底背离。
///
/// # Logic
/// 1. 在价格序列上分别找高点枢轴（顶背离候选）与低点枢轴（底背离候选）。
/// 2. 按下标顺序遍历同类相邻枢轴对：间隔 ≤ `max_bars` 时，
///    价涨而指标跌 → 顶背离；价跌而指标涨 → 底背离。
/// 3. 间隔超限的枢轴对只重置锚点，不产出信号。
/// 4. 枢轴处指标缺失的配对跳过（锚点照常推进）。
/// 5. 单遍、因果、无前瞻；输出按当前枢轴下标升序。
///
/// # Arguments
/// * `price`: 价格序列（可缺失）。
/// * `indicator`: 指标序列，与价格逐点对齐。
/// * `params`: 枢轴窗口与间隔参数。
///
/// # Returns
/// 升序的背离信号列表。
pub fn detect_divergence(
    price: &[Option<f64>],
    indicator: &[Option<f64>],
    params: DivergenceParams,
) -> Vec<DivergenceSignal> {
    let mut signals = Vec::new();
    let cases = [
        (PivotKind::High, DivergenceKind::Bearish),
        (PivotKind::Low, DivergenceKind::Bullish),
    ];
    for (pivot_kind, signal_kind) in cases {
        let pivots = find_pivots(price, params.pivot_window, pivot_kind);
        let mut anchor: Option<usize> = None;
        for &current in &pivots {
            let Some(prior) = anchor else {
                anchor = Some(current);
                continue;
            };
            anchor = Some(current);
            if current - prior > params.max_bars {
                continue;
            }
            let pair = (
                price[prior],
                price[current],
                indicator.get(prior).copied().flatten(),
                indicator.get(current).copied().flatten(),
            );
            let (Some(p1), Some(p2), Some(v1), Some(v2)) = pair else {
                continue;
            };
            let diverged = match signal_kind {
                DivergenceKind::Bearish => p2 > p1 && v2 < v1,
                DivergenceKind::Bullish => p2 < p1 && v2 > v1,
            };
            if diverged {
                signals.push(DivergenceSignal {
                    kind: signal_kind,
                    prior_index: prior,
                    index: current,
                    price: p2,
                    indicator: v2,
                });
            }
        }
    }
    signals.sort_by_key(|s| s.index);
    debug!(count = signals.len(), "背离扫描完成");
    signals
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 两个高点枢轴：价格抬高、指标走低 → 一次顶背离
    #[test]
    fn test_bearish_divergence_detected() {
        let price = vec![
            Some(1.0),
            Some(5.0),
            Some(1.0),
            Some(2.0),
            Some(6.0),
            Some(2.0),
        ];
        let indicator = vec![
            Some(10.0),
            Some(50.0),
            Some(10.0),
            Some(20.0),
            Some(40.0),
            Some(20.0),
        ];
        let params = DivergenceParams {
            pivot_window: 1,
            max_bars: 10,
        };
        let signals = detect_divergence(&price, &indicator, params);
        assert_eq!(signals.len(), 1);
        let signal = &signals[0];
        assert_eq!(signal.kind, DivergenceKind::Bearish);
        assert_eq!(signal.prior_index, 1);
        assert_eq!(signal.index, 4);
        assert!((signal.price - 6.0).abs() < 1e-9);
        assert!((signal.indicator - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_bullish_divergence_detected() {
        // 价格创出更低的低点，指标低点却在抬高
        let price = vec![
            Some(4.0),
            Some(2.0),
            Some(4.0),
            Some(5.0),
            Some(1.0),
            Some(5.0),
        ];
        let indicator = vec![
            Some(50.0),
            Some(30.0),
            Some(50.0),
            Some(45.0),
            Some(40.0),
            Some(45.0),
        ];
        let params = DivergenceParams {
            pivot_window: 1,
            max_bars: 10,
        };
        let signals = detect_divergence(&price, &indicator, params);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, DivergenceKind::Bullish);
    }

    #[test]
    fn test_max_bars_resets_anchor_silently() {
        let price = vec![
            Some(1.0),
            Some(5.0),
            Some(1.0),
            Some(2.0),
            Some(6.0),
            Some(2.0),
        ];
        let indicator = vec![
            Some(10.0),
            Some(50.0),
            Some(10.0),
            Some(20.0),
            Some(40.0),
            Some(20.0),
        ];
        // 价涨指标跌本该构成顶背离，但两个枢轴相隔 3 根，超出 max_bars=2 → 无信号
        let params = DivergenceParams {
            pivot_window: 1,
            max_bars: 2,
        };
        let signals = detect_divergence(&price, &indicator, params);
        assert!(signals.is_empty());
    }

    #[test]
    fn test_same_direction_no_signal() {
        // 价格与指标同涨：不是背离
        let price = vec![
            Some(1.0),
            Some(5.0),
            Some(1.0),
            Some(2.0),
            Some(6.0),
            Some(2.0),
        ];
        let indicator = vec![
            Some(10.0),
            Some(40.0),
            Some(10.0),
            Some(20.0),
            Some(50.0),
            Some(20.0),
        ];
        let params = DivergenceParams {
            pivot_window: 1,
            max_bars: 10,
        };
        assert!(detect_divergence(&price, &indicator, params).is_empty());
    }
}
