/// # Summary
/// 枢轴方向：对称邻域内的局部高点或低点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotKind {
    // 局部高点
    High,
    // 局部低点
    Low,
}

/// # Summary
/// 扫描序列中的枢轴（局部极值）。
///
/// # Logic
/// 1. 只考察 `window ≤ i < len - window` 的点（两侧邻域必须完整）。
/// 2. 高点：中心值严格大于左右两个窗口内的所有值；低点镜像。
/// 3. 中心或任一邻居缺失的点跳过。
///
/// # Arguments
/// * `values`: 输入序列（可缺失）。
/// * `window`: 对称邻域半宽，钳制到 ≥ 1。
/// * `kind`: 枢轴方向。
///
/// # Returns
/// 升序的枢轴下标列表。
pub fn find_pivots(values: &[Option<f64>], window: usize, kind: PivotKind) -> Vec<usize> {
    let window = window.max(1);
    let mut out = Vec::new();
    if values.len() < 2 * window + 1 {
        return out;
    }
    for i in window..values.len() - window {
        let Some(center) = values[i] else {
            continue;
        };
        let neighbors = values[i - window..i].iter().chain(&values[i + 1..=i + window]);
        let mut qualified = true;
        for neighbor in neighbors {
            match neighbor {
                Some(v) => {
                    let beats = match kind {
                        PivotKind::High => center > *v,
                        PivotKind::Low => center < *v,
                    };
                    if !beats {
                        qualified = false;
                        break;
                    }
                }
                None => {
                    qualified = false;
                    break;
                }
            }
        }
        if qualified {
            out.push(i);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_high_pivot() {
        let out = find_pivots(&[Some(1.0), Some(5.0), Some(1.0)], 1, PivotKind::High);
        assert_eq!(out, vec![1]);
    }

    #[test]
    fn test_low_pivot_mirror() {
        let out = find_pivots(&[Some(5.0), Some(1.0), Some(5.0)], 1, PivotKind::Low);
        assert_eq!(out, vec![1]);
    }

    #[test]
    fn test_equal_neighbor_disqualifies() {
        // 极值必须严格占优：平台不算枢轴
        let out = find_pivots(&[Some(1.0), Some(5.0), Some(5.0)], 1, PivotKind::High);
        assert!(out.is_empty());
    }

    #[test]
    fn test_null_in_window_skips() {
        let out = find_pivots(&[None, Some(5.0), Some(1.0)], 1, PivotKind::High);
        assert!(out.is_empty());
    }

    #[test]
    fn test_boundary_points_excluded() {
        let out = find_pivots(
            &[Some(9.0), Some(1.0), Some(2.0), Some(1.0), Some(9.0)],
            2,
            PivotKind::High,
        );
        // 两端的 9 没有完整邻域，中间的 2 赢不过它们
        assert!(out.is_empty());
    }
}
