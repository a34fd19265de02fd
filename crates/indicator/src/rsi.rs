use kanpan_core::market::entity::RsiBundle;

/// RSI 默认周期
pub const RSI_DEFAULT_PERIOD: u32 = 14;

/// 由平滑后的平均涨跌幅算出 RSI 值；平均跌幅恰为 0 时取 100
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// # Summary
/// RSI：Wilder 平滑的相对强弱指数。
///
/// # Logic
/// 1. 前 `period` 个点输出缺失（热身区）。
/// 2. 第 `period` 个价差用算术平均播种平均涨幅/跌幅。
/// 3. 之后按 Wilder 法平滑：`avg = (avg·(period-1) + delta) / period`。
/// 4. 缺失点输出缺失且不动任何状态；价差基准停留在上一个有效价格。
///
/// # Arguments
/// * `close`: 收盘价序列（可缺失）。
/// * `period`: 平滑周期。
///
/// # Returns
/// 与输入等长的 RSI 序列束。
pub fn rsi(close: &[Option<f64>], period: u32) -> RsiBundle {
    let period = period.max(1);
    let period_f = f64::from(period);
    let warmup = period as usize;

    let mut out = vec![None; close.len()];
    let mut prev: Option<f64> = None;
    let mut deltas_seen = 0usize;
    let mut sum_gain = 0.0;
    let mut sum_loss = 0.0;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for (i, value) in close.iter().enumerate() {
        let Some(x) = *value else {
            continue;
        };
        if let Some(base) = prev {
            let delta = x - base;
            let gain = delta.max(0.0);
            let loss = (-delta).max(0.0);
            deltas_seen += 1;
            if deltas_seen < warmup {
                sum_gain += gain;
                sum_loss += loss;
            } else if deltas_seen == warmup {
                sum_gain += gain;
                sum_loss += loss;
                avg_gain = sum_gain / period_f;
                avg_loss = sum_loss / period_f;
                out[i] = Some(rsi_value(avg_gain, avg_loss));
            } else {
                avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
                avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
                out[i] = Some(rsi_value(avg_gain, avg_loss));
            }
        }
        prev = Some(x);
    }
    RsiBundle { rsi: out }
}

/// 默认周期 14 的便捷入口
pub fn rsi_default(close: &[Option<f64>]) -> RsiBundle {
    rsi(close, RSI_DEFAULT_PERIOD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_warmup_is_null() {
        let close: Vec<Option<f64>> = (0..20).map(|i| Some(3000.0 + f64::from(i))).collect();
        let bundle = rsi_default(&close);
        for i in 0..14 {
            assert!(bundle.rsi[i].is_none(), "热身区第 {} 点应缺失", i);
        }
        assert!(bundle.rsi[14].is_some());
    }

    #[test]
    fn test_rsi_monotonic_series_saturates() {
        // 单调上涨：平均跌幅为 0 → RSI = 100
        let rising: Vec<Option<f64>> = (0..20).map(|i| Some(3000.0 + f64::from(i) * 2.0)).collect();
        let bundle = rsi_default(&rising);
        assert!((bundle.rsi[19].unwrap() - 100.0).abs() < 1e-9);

        // 单调下跌：平均涨幅为 0 → RSI 趋向 0
        let falling: Vec<Option<f64>> = (0..20).map(|i| Some(3000.0 - f64::from(i) * 2.0)).collect();
        let bundle = rsi_default(&falling);
        assert!(bundle.rsi[19].unwrap() < 1e-9);
    }

    #[test]
    fn test_rsi_null_point_passthrough() {
        let mut close: Vec<Option<f64>> = (0..20).map(|i| Some(3000.0 + f64::from(i))).collect();
        close[16] = None;
        let bundle = rsi(&close, 14);
        assert!(bundle.rsi[16].is_none());
        assert!(bundle.rsi[17].is_some());
    }
}
