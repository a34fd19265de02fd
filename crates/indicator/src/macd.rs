use crate::ema::ema;
use kanpan_core::market::entity::MacdBundle;

/// MACD 默认参数 (快, 慢, 信号)
pub const MACD_DEFAULT: (u32, u32, u32) = (12, 26, 9);

/// # Summary
/// MACD：快慢 EMA 之差加信号线。
///
/// # Logic
/// 1. `dif = EMA(close, fast) - EMA(close, slow)`，任一侧缺失则该点缺失。
/// 2. `dea = EMA(dif, signal)`。
/// 3. `hist = (dif - dea) * 2`。
///
/// # Arguments
/// * `close`: 收盘价序列（可缺失）。
/// * `fast` / `slow` / `signal`: EMA 周期。
///
/// # Returns
/// 与输入逐点对齐的 MACD 指标束。
pub fn macd(close: &[Option<f64>], fast: u32, slow: u32, signal: u32) -> MacdBundle {
    let fast_line = ema(close, fast);
    let slow_line = ema(close, slow);
    let dif: Vec<Option<f64>> = fast_line
        .iter()
        .zip(slow_line.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();
    let dea = ema(&dif, signal);
    let hist: Vec<Option<f64>> = dif
        .iter()
        .zip(dea.iter())
        .map(|(d, e)| match (d, e) {
            (Some(d), Some(e)) => Some((d - e) * 2.0),
            _ => None,
        })
        .collect();
    MacdBundle { dif, dea, hist }
}

/// 默认参数 (12, 26, 9) 的便捷入口
pub fn macd_default(close: &[Option<f64>]) -> MacdBundle {
    let (fast, slow, signal) = MACD_DEFAULT;
    macd(close, fast, slow, signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_first_point_zero() {
        // 快慢 EMA 都以首值播种，首点 dif 与 hist 必为 0
        let bundle = macd_default(&[Some(10.0), Some(11.0), Some(12.0)]);
        assert!((bundle.dif[0].unwrap()).abs() < 1e-12);
        assert!((bundle.dea[0].unwrap()).abs() < 1e-12);
        assert!((bundle.hist[0].unwrap()).abs() < 1e-12);
        // 上涨序列里快线高于慢线
        assert!(bundle.dif[2].unwrap() > 0.0);
    }

    #[test]
    fn test_macd_null_alignment() {
        let bundle = macd_default(&[Some(10.0), None, Some(11.0)]);
        assert!(bundle.dif[1].is_none());
        assert!(bundle.dea[1].is_none());
        assert!(bundle.hist[1].is_none());
        assert!(bundle.hist[2].is_some());
    }

    #[test]
    fn test_hist_is_twice_gap() {
        let bundle = macd_default(&[Some(3000.0), Some(3050.0), Some(2990.0), Some(3080.0)]);
        for i in 0..4 {
            let (d, e, h) = (bundle.dif[i], bundle.dea[i], bundle.hist[i]);
            assert!((h.unwrap() - (d.unwrap() - e.unwrap()) * 2.0).abs() < 1e-9);
        }
    }
}
