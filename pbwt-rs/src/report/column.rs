use super::MatchRecord;
use crate::index::PbwtIndex;

/// 扫描单个位点边界 k（1 <= k <= M）上的相邻对，
/// 将 `d[k][i] + min_len <= k` 的对追加到 `out`，按 i 递增。
pub fn scan_column(index: &PbwtIndex, k: usize, min_len: usize, out: &mut Vec<MatchRecord>) {
    debug_assert!((1..=index.n_sites()).contains(&k));
    debug_assert!(min_len >= 1);
    if min_len > k {
        return;
    }
    // 等价于 d <= k - L，先判断 L <= k 避免下溢
    let limit = (k - min_len) as u32;
    let a = index.prefix(k);
    let d = index.divergence(k);
    for i in 1..a.len() {
        if d[i] <= limit {
            out.push(MatchRecord {
                hap1: a[i],
                hap2: a[i - 1],
                start: d[i],
                end: k as u32,
            });
        }
    }
}
