/// # Summary
/// 指数移动平均：`α = 2 / (period + 1)`，首个有效值播种。
///
/// # Logic
/// 1. 首个有效值直接作为 EMA 初值。
/// 2. 之后每个有效值按 `ema = α·x + (1-α)·ema` 递推。
/// 3. 缺失点输出缺失，平滑状态既不推进也不清零——下一个有效值
///    从上一次的 EMA 继续平滑。此行为是下游数值轨迹的一部分，
///    必须原样保持。
///
/// # Arguments
/// * `values`: 输入序列（可缺失）。
/// * `period`: 平滑周期。
///
/// # Returns
/// 与输入等长的 EMA 序列。
pub fn ema(values: &[Option<f64>], period: u32) -> Vec<Option<f64>> {
    let alpha = 2.0 / (f64::from(period) + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut state: Option<f64> = None;
    for value in values {
        let Some(x) = *value else {
            out.push(None);
            continue;
        };
        let next = match state {
            None => x,
            Some(prev) => alpha * x + (1.0 - alpha) * prev,
        };
        state = Some(next);
        out.push(Some(next));
    }
    out
}
