use kanpan_core::market::entity::AxisValue;
use std::collections::HashMap;
use tracing::warn;

/// # Summary
/// 按归一化键把两条 (X, Y) 序列做内连接对齐。
///
/// # Logic
/// 1. 先为第二条序列建 键 → 值 映射：空键跳过，重复键首次出现为准。
/// 2. 按序遍历第一条序列，只保留键在映射中存在的点。
/// 3. 输出 X 为 `label_fn(键)`，保持第一条序列的顺序与重复。
///
/// # Arguments
/// * `x1` / `y1`: 第一条序列（顺序权威方）。
/// * `x2` / `y2`: 第二条序列（被查方）。
/// * `key_fn`: 轴坐标 → 对齐键；返回 None 的点跳过。
/// * `label_fn`: 对齐键 → 输出轴坐标。
///
/// # Returns
/// (对齐后的 X, 第一条的 Y, 第二条的 Y)，三者等长；
/// 长度 ≤ min(两条序列去重后的长度)。
pub fn align_by_key<V, K, L>(
    x1: &[AxisValue],
    y1: &[V],
    x2: &[AxisValue],
    y2: &[V],
    key_fn: K,
    label_fn: L,
) -> (Vec<AxisValue>, Vec<V>, Vec<V>)
where
    V: Clone,
    K: Fn(&AxisValue) -> Option<String>,
    L: Fn(&str) -> AxisValue,
{
    let mut lookup: HashMap<String, &V> = HashMap::with_capacity(x2.len());
    for (x, v) in x2.iter().zip(y2.iter()) {
        let Some(key) = key_fn(x) else {
            continue;
        };
        lookup.entry(key).or_insert(v);
    }

    let mut aligned_x = Vec::new();
    let mut aligned_y1 = Vec::new();
    let mut aligned_y2 = Vec::new();
    for (x, v1) in x1.iter().zip(y1.iter()) {
        let Some(key) = key_fn(x) else {
            continue;
        };
        if let Some(v2) = lookup.get(&key) {
            aligned_x.push(label_fn(&key));
            aligned_y1.push(v1.clone());
            aligned_y2.push((*v2).clone());
        }
    }
    (aligned_x, aligned_y1, aligned_y2)
}

/// # Summary
/// 位置截断对齐：键对齐零命中时的显式降级模式。
///
/// # Logic
/// 1. 取四个输入的最短长度 n。
/// 2. 两条序列都截断到前 n 个点按位置配对。
///
/// # Arguments
/// * `x1` / `y1` / `x2` / `y2`: 两条序列。
///
/// # Returns
/// (第一条的 X 前缀, 第一条的 Y 前缀, 第二条的 Y 前缀)。
pub fn positional_align<V: Clone>(
    x1: &[AxisValue],
    y1: &[V],
    x2: &[AxisValue],
    y2: &[V],
) -> (Vec<AxisValue>, Vec<V>, Vec<V>) {
    let n = x1.len().min(y1.len()).min(x2.len()).min(y2.len());
    if n > 0 {
        warn!(points = n, "键对齐零命中，按位置截断配对");
    }
    (
        x1[..n].to_vec(),
        y1[..n].to_vec(),
        y2[..n].to_vec(),
    )
}
