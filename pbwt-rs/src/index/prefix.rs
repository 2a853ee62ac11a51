use crate::matrix::HaplotypeMatrix;
use crate::util::allele;

/// 单列推进时的暂存区：等位基因为 1 的分组先缓存在这里，
/// 0 分组直接写入下一列，扫描结束后再把 1 分组拼接到末尾。
#[derive(Debug, Default)]
pub struct ColumnScratch {
    ones_a: Vec<u32>,
    ones_d: Vec<u32>,
}

impl ColumnScratch {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            ones_a: Vec::with_capacity(n),
            ones_d: Vec::with_capacity(n),
        }
    }
}

/// 以位点 `site` 上的等位基因对上一列的顺序做稳定划分，得到下一列的 (a, d)。
///
/// 水位 p / q 初始化为 `site + 1`，扫描时对经过的 divergence 取最大值，
/// 元素落入 0 组（或 1 组）后记录 p（或 q）并将其归零。
/// 归零表示该元素与同组下一个元素至少从下一个位点起一致；
/// 取最大值则让一段长匹配的起点沿着组内成员向后传递。
pub fn advance_column(
    matrix: &HaplotypeMatrix,
    site: usize,
    prev_a: &[u32],
    prev_d: &[u32],
    next_a: &mut [u32],
    next_d: &mut [u32],
    scratch: &mut ColumnScratch,
) {
    debug_assert_eq!(prev_a.len(), prev_d.len());
    debug_assert_eq!(prev_a.len(), next_a.len());
    debug_assert_eq!(prev_a.len(), next_d.len());

    let mut p = site as u32 + 1;
    let mut q = site as u32 + 1;
    let mut n_zeros = 0usize;
    scratch.ones_a.clear();
    scratch.ones_d.clear();

    for (&idx, &div) in prev_a.iter().zip(prev_d) {
        p = p.max(div);
        q = q.max(div);
        if matrix.allele(idx as usize, site) == allele::REF {
            next_a[n_zeros] = idx;
            next_d[n_zeros] = p;
            n_zeros += 1;
            p = 0;
        } else {
            scratch.ones_a.push(idx);
            scratch.ones_d.push(q);
            q = 0;
        }
    }

    next_a[n_zeros..].copy_from_slice(&scratch.ones_a);
    next_d[n_zeros..].copy_from_slice(&scratch.ones_d);
}

/// 对整个矩阵从左到右依次推进，返回展平的 (prefix, divergence) 历史。
/// 第 k 列位于 `[k * N, (k + 1) * N)`，共 M + 1 列，提前一次性分配。
pub fn build_prefix_divergence(matrix: &HaplotypeMatrix) -> (Vec<u32>, Vec<u32>) {
    let n = matrix.n_haps();
    let m = matrix.n_sites();
    let total = (m + 1) * n;

    let mut prefix = vec![0u32; total];
    let mut divergence = vec![0u32; total];
    for (i, slot) in prefix[..n].iter_mut().enumerate() {
        *slot = i as u32;
    }

    let mut scratch = ColumnScratch::with_capacity(n);
    for k in 0..m {
        let (a_head, a_tail) = prefix.split_at_mut((k + 1) * n);
        let (d_head, d_tail) = divergence.split_at_mut((k + 1) * n);
        advance_column(
            matrix,
            k,
            &a_head[k * n..],
            &d_head[k * n..],
            &mut a_tail[..n],
            &mut d_tail[..n],
            &mut scratch,
        );
    }

    (prefix, divergence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(flat: &[u32], n: usize, k: usize) -> &[u32] {
        &flat[k * n..(k + 1) * n]
    }

    #[test]
    fn first_column_is_identity_with_zero_divergence() {
        let m = HaplotypeMatrix::from_rows(vec![vec![1, 0], vec![0, 1], vec![1, 1]]).unwrap();
        let (a, d) = build_prefix_divergence(&m);
        assert_eq!(a.len(), 3 * 3);
        assert_eq!(column(&a, 3, 0), &[0, 1, 2]);
        assert_eq!(column(&d, 3, 0), &[0, 0, 0]);
    }

    #[test]
    fn three_by_three_worked_example() {
        // 0: 0 0 0
        // 1: 0 0 1
        // 2: 1 1 1
        let m = HaplotypeMatrix::from_rows(vec![
            vec![0, 0, 0],
            vec![0, 0, 1],
            vec![1, 1, 1],
        ])
        .unwrap();
        let (a, d) = build_prefix_divergence(&m);

        assert_eq!(column(&a, 3, 1), &[0, 1, 2]);
        assert_eq!(column(&d, 3, 1), &[1, 0, 1]);

        assert_eq!(column(&a, 3, 2), &[0, 1, 2]);
        assert_eq!(column(&d, 3, 2), &[2, 0, 2]);

        assert_eq!(column(&a, 3, 3), &[0, 1, 2]);
        assert_eq!(column(&d, 3, 3), &[3, 3, 2]);
    }

    #[test]
    fn partition_is_stable_within_groups() {
        let m = HaplotypeMatrix::from_rows(vec![vec![1], vec![0], vec![1], vec![0]]).unwrap();
        let (a, d) = build_prefix_divergence(&m);
        assert_eq!(column(&a, 4, 1), &[1, 3, 0, 2]);
        // 每组首元素继承哨兵值 1，组内后续元素归零
        assert_eq!(column(&d, 4, 1), &[1, 0, 1, 0]);
    }

    #[test]
    fn scratch_is_reused_across_columns() {
        let m = HaplotypeMatrix::from_rows(vec![vec![1, 1], vec![0, 1]]).unwrap();
        let mut scratch = ColumnScratch::default();
        let mut a1 = [0u32; 2];
        let mut d1 = [0u32; 2];
        advance_column(&m, 0, &[0, 1], &[0, 0], &mut a1, &mut d1, &mut scratch);
        assert_eq!(a1, [1, 0]);
        assert_eq!(d1, [1, 1]);

        let mut a2 = [0u32; 2];
        let mut d2 = [0u32; 2];
        advance_column(&m, 1, &a1, &d1, &mut a2, &mut d2, &mut scratch);
        assert_eq!(a2, [1, 0]);
        assert_eq!(d2, [2, 1]);
    }
}
