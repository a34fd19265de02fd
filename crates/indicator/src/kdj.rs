use kanpan_core::market::entity::KdjBundle;

/// KDJ 默认窗口
pub const KDJ_DEFAULT_PERIOD: u32 = 9;

/// # Summary
/// KDJ：滚动高低窗口上的随机指标变体。
///
/// # Logic
/// 1. RSV 取尾随 `period` 窗口内的最高高价/最低低价：
///    `(close - min_low) / (max_high - min_low) * 100`；
///    窗口无有效点或高低持平时取 50.0。
/// 2. 递推平滑：`K = K_prev·2/3 + RSV/3`，`D = D_prev·2/3 + K/3`，
///    `J = 3K - 2D`；K/D 以 50.0 播种。
/// 3. 高/低价缺失时退化为该点收盘价；收盘缺失的点输出缺失且不动状态。
/// 4. 三个输入允许参差长度，越界一律按缺失处理。
///
/// # Arguments
/// * `high` / `low` / `close`: 价格序列（可缺失、可参差）。
/// * `period`: 滚动窗口宽度。
///
/// # Returns
/// 与收盘序列等长的 K/D/J 序列束。
pub fn kdj(
    high: &[Option<f64>],
    low: &[Option<f64>],
    close: &[Option<f64>],
    period: u32,
) -> KdjBundle {
    let len = close.len();
    let window = period.max(1) as usize;

    let mut bundle = KdjBundle {
        k: vec![None; len],
        d: vec![None; len],
        j: vec![None; len],
    };
    let mut k_prev = 50.0;
    let mut d_prev = 50.0;

    for i in 0..len {
        let Some(c) = close[i] else {
            continue;
        };
        let start = i.saturating_sub(window - 1);
        let mut highest = f64::NEG_INFINITY;
        let mut lowest = f64::INFINITY;
        let mut seen = false;
        for j in start..=i {
            let close_j = close.get(j).copied().flatten();
            let high_j = high.get(j).copied().flatten().or(close_j);
            let low_j = low.get(j).copied().flatten().or(close_j);
            if let Some(h) = high_j {
                highest = highest.max(h);
                seen = true;
            }
            if let Some(l) = low_j {
                lowest = lowest.min(l);
                seen = true;
            }
        }

        let rsv = if !seen || highest <= lowest {
            50.0
        } else {
            (c - lowest) / (highest - lowest) * 100.0
        };

        let k = k_prev * 2.0 / 3.0 + rsv / 3.0;
        let d = d_prev * 2.0 / 3.0 + k / 3.0;
        let j = 3.0 * k - 2.0 * d;
        k_prev = k;
        d_prev = d;
        bundle.k[i] = Some(k);
        bundle.d[i] = Some(d);
        bundle.j[i] = Some(j);
    }
    bundle
}

/// 默认窗口 9 的便捷入口
pub fn kdj_default(high: &[Option<f64>], low: &[Option<f64>], close: &[Option<f64>]) -> KdjBundle {
    kdj(high, low, close, KDJ_DEFAULT_PERIOD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kdj_flat_window_takes_midpoint() {
        // 高低持平：RSV = 50，首点 K = 50·2/3 + 50/3 = 50
        let flat = vec![Some(10.0); 5];
        let bundle = kdj_default(&flat, &flat, &flat);
        assert!((bundle.k[0].unwrap() - 50.0).abs() < 1e-9);
        assert!((bundle.d[0].unwrap() - 50.0).abs() < 1e-9);
        assert!((bundle.j[0].unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_kdj_j_identity() {
        let close: Vec<Option<f64>> = (0..12).map(|i| Some(3000.0 + f64::from(i) * 3.0)).collect();
        let high: Vec<Option<f64>> = close.iter().map(|c| c.map(|v| v + 2.0)).collect();
        let low: Vec<Option<f64>> = close.iter().map(|c| c.map(|v| v - 2.0)).collect();
        let bundle = kdj_default(&high, &low, &close);
        for i in 0..12 {
            let (k, d, j) = (
                bundle.k[i].unwrap(),
                bundle.d[i].unwrap(),
                bundle.j[i].unwrap(),
            );
            assert!((j - (3.0 * k - 2.0 * d)).abs() < 1e-9);
        }
        // 持续上涨时 K 向上偏离 50
        assert!(bundle.k[11].unwrap() > 60.0);
    }

    #[test]
    fn test_kdj_missing_high_low_defaults_to_close() {
        let close = vec![Some(10.0), Some(12.0), Some(11.0)];
        let empty: Vec<Option<f64>> = vec![None; 3];
        let bundle = kdj_default(&empty, &empty, &close);
        // 第二点窗口为 [10,12]：RSV = (12-10)/(12-10)*100 = 100
        let k1 = 50.0 * 2.0 / 3.0 + 100.0 / 3.0;
        assert!((bundle.k[1].unwrap() - k1).abs() < 1e-9);
    }

    #[test]
    fn test_kdj_null_close_passthrough() {
        let close = vec![Some(10.0), None, Some(11.0)];
        let bundle = kdj_default(&close, &close, &close);
        assert!(bundle.k[1].is_none());
        assert!(bundle.j[2].is_some());
    }
}
