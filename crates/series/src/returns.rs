/// # Summary
/// 价格序列 → 步进收益序列（百分比）。
///
/// # Logic
/// 1. 以最近一个有效价格为基准：`(p / prev - 1) * 100`。
/// 2. 首个点、基准缺失或为零的点输出缺失；但该点价格仍会成为新基准。
/// 3. 缺失点输出缺失且不改变基准（基准停留在上一个有效价格）。
///
/// # Arguments
/// * `prices`: 价格序列（可缺失）。
///
/// # Returns
/// 与输入等长的收益序列。
pub fn step_returns(prices: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(prices.len());
    let mut prev: Option<f64> = None;
    for price in prices {
        let Some(value) = *price else {
            out.push(None);
            continue;
        };
        match prev {
            Some(base) if base != 0.0 => {
                out.push(Some((value / base - 1.0) * 100.0));
            }
            _ => out.push(None),
        }
        prev = Some(value);
    }
    out
}

/// # Summary
/// 尾随窗口滚动求和，缺失点跳过而非清零。
///
/// # Logic
/// 1. 窗口钳制到 ≥ 1。
/// 2. 每个点对 `[max(0, i-window+1), i]` 内的有效值求和。
/// 3. 窗口内全缺失时输出缺失；部分缺失时就按剩余点求和——这是求和
///    不是均值，序列起始的不完整窗口不做归一化。
///
/// # Arguments
/// * `values`: 输入序列（可缺失）。
/// * `window`: 窗口宽度。
///
/// # Returns
/// 与输入等长的滚动和序列。
pub fn rolling_sum(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = i.saturating_sub(window - 1);
        let mut sum = 0.0;
        let mut count = 0usize;
        for value in values[start..=i].iter().flatten() {
            sum += value;
            count += 1;
        }
        out.push(if count > 0 { Some(sum) } else { None });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|v| (v - expected).abs() < 1e-9)
    }

    #[test]
    fn test_step_returns_basic() {
        let out = step_returns(&[Some(100.0), Some(110.0), Some(99.0)]);
        assert_eq!(out[0], None);
        assert!(approx(out[1], 10.0));
        assert!(approx(out[2], -10.0));
    }

    #[test]
    fn test_step_returns_gap_keeps_anchor() {
        // 缺失点不改变基准：99 相对 110 计算
        let out = step_returns(&[Some(100.0), Some(110.0), None, Some(99.0)]);
        assert_eq!(out[2], None);
        assert!(approx(out[3], -10.0));
    }

    #[test]
    fn test_step_returns_zero_base() {
        // 零价不能做基准，但会成为下一个点的新基准（此时仍算不出收益）
        let out = step_returns(&[Some(0.0), Some(5.0)]);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn test_rolling_sum_skips_nulls() {
        let out = rolling_sum(&[Some(1.0), Some(2.0), None, Some(4.0)], 2);
        assert_eq!(out, vec![Some(1.0), Some(3.0), Some(2.0), Some(4.0)]);
    }

    #[test]
    fn test_rolling_sum_all_null_window() {
        let out = rolling_sum(&[None, None, Some(3.0)], 2);
        assert_eq!(out, vec![None, None, Some(3.0)]);
    }

    #[test]
    fn test_rolling_sum_window_clamped() {
        let out = rolling_sum(&[Some(1.0), Some(2.0)], 0);
        assert_eq!(out, vec![Some(1.0), Some(2.0)]);
    }
}
