use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

/// # Summary
/// 由种子文本构造确定性随机数发生器。
///
/// # Logic
/// 1. 对种子文本取 SHA-256 摘要。
/// 2. 取摘要前 8 字节按大端解释为 u64 种子。
/// 3. 用该种子初始化 `StdRng`。
///
/// 相同文本必然得到相同的数字序列，与进程、平台、运行次数无关。
///
/// # Arguments
/// * `seed_text`: 种子文本（通常由查询参数拼接而成）。
///
/// # Returns
/// 确定性的 `StdRng`。
pub fn seed_rng(seed_text: &str) -> StdRng {
    let digest = Sha256::digest(seed_text.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    StdRng::seed_from_u64(u64::from_be_bytes(bytes))
}
